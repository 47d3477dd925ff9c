use crate::error::{RegistryError, Result};
use crate::settings::RegistrySettings;
use crate::view::{Navigation, UrlDetail, UrlSummary};
use std::collections::{BTreeSet, HashMap, HashSet};
use tinylink_core::{
    ClickEvent, Clock, DraftEntry, ShortCode, SystemClock, UrlRecord, ValidDraft,
};
use tinylink_generator::Generator;
use tracing::{debug, info, warn};

/// The in-memory collection of shortened URLs for one session.
///
/// The registry handles:
/// - Validation of whole batches before anything is stored
/// - Short code allocation, custom or generated, with collision retries
/// - Click recording
/// - Read-only listing and detail views
///
/// Records keep their insertion order and are never removed. Expiry
/// timestamps are stored for display but not enforced.
pub struct Registry<G, C = SystemClock> {
    records: Vec<UrlRecord>,
    index: HashMap<ShortCode, usize>,
    generator: G,
    clock: C,
    settings: RegistrySettings,
}

impl<G: Generator> Registry<G, SystemClock> {
    /// Creates an empty registry with default settings and the system clock.
    pub fn new(generator: G) -> Self {
        Self::with_clock(generator, SystemClock, RegistrySettings::default())
    }

    pub fn with_settings(generator: G, settings: RegistrySettings) -> Self {
        Self::with_clock(generator, SystemClock, settings)
    }
}

impl<G: Generator, C: Clock> Registry<G, C> {
    pub fn with_clock(generator: G, clock: C, settings: RegistrySettings) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            generator,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// Registers a batch of drafts and returns the short codes allocated to
    /// them, in submission order.
    ///
    /// The batch is all-or-nothing: any invalid field, any duplicate short
    /// code (inside the batch or against the registry), or a failed code
    /// generation rejects every entry and leaves the registry untouched.
    pub fn register(&mut self, drafts: &[DraftEntry]) -> Result<Vec<ShortCode>> {
        self.check_batch_size(drafts.len())?;

        let now = self.clock.now();
        let valid = Self::validate_batch(drafts, now)?;

        // Custom codes first, so generated ones can steer around them.
        let mut taken: HashSet<ShortCode> = HashSet::with_capacity(valid.len());
        let mut duplicates = BTreeSet::new();
        for code in valid.iter().filter_map(|draft| draft.shortcode.as_ref()) {
            if self.index.contains_key(code) || !taken.insert(code.clone()) {
                duplicates.insert(code.to_string());
            }
        }
        if !duplicates.is_empty() {
            let duplicates: Vec<String> = duplicates.into_iter().collect();
            warn!(?duplicates, "batch rejected: short code already in use");
            return Err(RegistryError::DuplicateShortcode(duplicates));
        }

        let mut codes = Vec::with_capacity(valid.len());
        for draft in &valid {
            let code = match &draft.shortcode {
                Some(code) => code.clone(),
                None => {
                    let code = self.allocate(&taken)?;
                    taken.insert(code.clone());
                    code
                }
            };
            codes.push(code);
        }

        for (draft, code) in valid.into_iter().zip(&codes) {
            self.index.insert(code.clone(), self.records.len());
            self.records.push(UrlRecord::new(
                code.clone(),
                draft.long_url,
                now,
                draft.expires_at,
            ));
        }

        info!(
            count = codes.len(),
            total = self.records.len(),
            "registered shortened urls"
        );
        Ok(codes)
    }

    /// Records a click on `code` and returns where the caller should
    /// navigate. A blank or missing referrer is recorded as `"Direct"`.
    pub fn record_click(&mut self, code: &str, referrer: Option<&str>) -> Result<Navigation> {
        let Some(&position) = self.index.get(code) else {
            warn!(code, "click on unknown short code");
            return Err(RegistryError::NotFound(code.to_string()));
        };

        let click = ClickEvent::new(
            self.clock.now(),
            referrer,
            self.settings.location_placeholder.as_str(),
        );
        let record = &mut self.records[position];
        record.push_click(click);

        info!(
            code,
            clicks = record.click_count(),
            "recorded click"
        );
        Ok(Navigation {
            shortcode: record.shortcode.clone(),
            target: record.long_url.clone(),
        })
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> Vec<UrlSummary> {
        self.records.iter().map(UrlSummary::from).collect()
    }

    /// One record with its click history.
    pub fn get(&self, code: &str) -> Result<UrlDetail> {
        self.index
            .get(code)
            .map(|&position| UrlDetail::from(&self.records[position]))
            .ok_or_else(|| {
                warn!(code, "short code not found");
                RegistryError::NotFound(code.to_string())
            })
    }

    pub fn records(&self) -> &[UrlRecord] {
        &self.records
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The current time according to the registry's clock.
    pub fn now(&self) -> jiff::Timestamp {
        self.clock.now()
    }

    fn check_batch_size(&self, actual: usize) -> Result<()> {
        let max = self.settings.max_batch_size;
        if actual == 0 || actual > max {
            warn!(actual, max, "batch rejected: bad size");
            return Err(RegistryError::BatchSize { min: 1, max, actual });
        }
        Ok(())
    }

    fn validate_batch(drafts: &[DraftEntry], now: jiff::Timestamp) -> Result<Vec<ValidDraft>> {
        let mut valid = Vec::with_capacity(drafts.len());
        let mut errors = Vec::new();

        for (index, draft) in drafts.iter().enumerate() {
            match draft.validate(index, now) {
                Ok(draft) => valid.push(draft),
                Err(mut field_errors) => errors.append(&mut field_errors),
            }
        }

        if !errors.is_empty() {
            warn!(errors = errors.len(), "batch rejected: invalid fields");
            return Err(RegistryError::Validation(errors));
        }
        Ok(valid)
    }

    /// Draws candidates until one is valid and free, or the attempt budget
    /// runs out.
    fn allocate(&self, taken: &HashSet<ShortCode>) -> Result<ShortCode> {
        let attempts = self.settings.max_generation_attempts;

        for attempt in 1..=attempts {
            let candidate: ShortCode = self.generator.generate().into();

            if !ShortCode::is_valid(candidate.as_str()) {
                debug!(attempt, code = %candidate, "generated short code is malformed");
                continue;
            }
            if self.index.contains_key(&candidate) || taken.contains(&candidate) {
                debug!(attempt, code = %candidate, "generated short code collided");
                continue;
            }

            return Ok(candidate);
        }

        warn!(attempts, "short code generation exhausted");
        Err(RegistryError::GenerationExhausted { attempts })
    }
}

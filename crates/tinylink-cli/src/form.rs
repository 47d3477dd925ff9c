use thiserror::Error;
use tinylink_core::DraftEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Maximum of {0} URLs allowed")]
    Full(usize),
    #[error("no row {row}; the form has {rows} row(s)")]
    NoSuchRow { row: usize, rows: usize },
}

/// Rows waiting to be submitted as one batch.
///
/// Rows are numbered from 1 for display. The form is kept after a failed
/// submission so the user can fix it.
#[derive(Debug, Clone)]
pub struct DraftForm {
    rows: Vec<DraftEntry>,
    max_rows: usize,
    default_validity: i64,
}

impl DraftForm {
    pub fn new(max_rows: usize, default_validity: i64) -> Self {
        Self {
            rows: Vec::with_capacity(max_rows),
            max_rows,
            default_validity,
        }
    }

    /// Appends a row and returns its 1-based number.
    pub fn add(
        &mut self,
        long_url: String,
        shortcode: Option<String>,
        validity: Option<i64>,
    ) -> Result<usize, FormError> {
        if self.rows.len() >= self.max_rows {
            return Err(FormError::Full(self.max_rows));
        }

        let mut draft = DraftEntry::new(long_url)
            .with_validity(validity.unwrap_or(self.default_validity));
        draft.shortcode = shortcode;
        self.rows.push(draft);
        Ok(self.rows.len())
    }

    /// Removes the 1-based `row`.
    pub fn remove(&mut self, row: usize) -> Result<DraftEntry, FormError> {
        if row == 0 || row > self.rows.len() {
            return Err(FormError::NoSuchRow {
                row,
                rows: self.rows.len(),
            });
        }
        Ok(self.rows.remove(row - 1))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[DraftEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_applies_default_validity() {
        let mut form = DraftForm::new(5, 30);

        let row = form
            .add("https://example.com".to_string(), None, None)
            .unwrap();

        assert_eq!(row, 1);
        assert_eq!(form.rows()[0].validity_minutes, 30);
        assert_eq!(form.rows()[0].shortcode, None);
    }

    #[test]
    fn add_keeps_explicit_values() {
        let mut form = DraftForm::new(5, 30);

        form.add(
            "https://example.com".to_string(),
            Some("abcd".to_string()),
            Some(90),
        )
        .unwrap();

        assert_eq!(form.rows()[0].requested_shortcode(), Some("abcd"));
        assert_eq!(form.rows()[0].validity_minutes, 90);
    }

    #[test]
    fn add_refuses_beyond_limit() {
        let mut form = DraftForm::new(2, 30);
        form.add("https://a.example".to_string(), None, None).unwrap();
        form.add("https://b.example".to_string(), None, None).unwrap();

        let err = form
            .add("https://c.example".to_string(), None, None)
            .unwrap_err();

        assert_eq!(err, FormError::Full(2));
        assert_eq!(err.to_string(), "Maximum of 2 URLs allowed");
        assert_eq!(form.len(), 2);
    }

    #[test]
    fn remove_is_one_based() {
        let mut form = DraftForm::new(5, 30);
        form.add("https://a.example".to_string(), None, None).unwrap();
        form.add("https://b.example".to_string(), None, None).unwrap();

        let removed = form.remove(1).unwrap();

        assert_eq!(removed.long_url, "https://a.example");
        assert_eq!(form.rows()[0].long_url, "https://b.example");
        assert_eq!(
            form.remove(0).unwrap_err(),
            FormError::NoSuchRow { row: 0, rows: 1 }
        );
        assert_eq!(
            form.remove(2).unwrap_err(),
            FormError::NoSuchRow { row: 2, rows: 1 }
        );
    }

    #[test]
    fn clear_empties() {
        let mut form = DraftForm::new(5, 30);
        form.add("https://a.example".to_string(), None, None).unwrap();
        form.clear();
        assert!(form.is_empty());
    }
}

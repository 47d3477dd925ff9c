use tinylink_core::DEFAULT_LOCATION;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_BATCH_SIZE: usize = 5;
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Configures a [`Registry`](crate::Registry) instance.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RegistrySettings {
    /// Largest number of drafts accepted in one batch.
    #[builder(default = DEFAULT_MAX_BATCH_SIZE)]
    pub max_batch_size: usize,
    /// How many candidates are drawn from the generator for a single entry
    /// before giving up.
    #[builder(default = DEFAULT_MAX_GENERATION_ATTEMPTS)]
    pub max_generation_attempts: u32,
    /// Stored as the location of every click.
    #[builder(default = DEFAULT_LOCATION.to_string(), setter(into))]
    pub location_placeholder: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

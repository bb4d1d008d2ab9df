//! Configuration for running binding scripts

/// Options for [`run_with_config`](crate::run_with_config)
#[derive(Debug, Clone, Default)]
pub struct ScriptConfig {
    /// Fail with [`ScriptError::Skipped`](crate::ScriptError::Skipped) when a
    /// binding leaves the hierarchy untouched, instead of only logging it
    pub strict: bool,
}

impl ScriptConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

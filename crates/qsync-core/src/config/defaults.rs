//! Default values for configuration types.

use crate::config::types::{ExportConfig, WarningsConfig};

impl WarningsConfig {
    /// Returns whether warnings are emitted, defaulting to true.
    pub fn enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

impl ExportConfig {
    /// Returns whether empty-string values are dropped from exports, defaulting to false.
    pub fn drop_empty_values(&self) -> bool {
        self.drop_empty_values.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(WarningsConfig::default().enabled());
        assert!(!ExportConfig::default().drop_empty_values());
    }

    #[test]
    fn test_explicit_values_win() {
        let warnings = WarningsConfig {
            enabled: Some(false),
        };
        assert!(!warnings.enabled());
    }
}

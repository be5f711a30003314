use std::path::Path;

use anyhow::{Context, Result};
use fluxgrid_kernel::FluidConfig;

/// Command-line overrides layered on top of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub max_exchange: Option<u8>,
    pub spread_divisor: Option<u8>,
    pub record_events: Option<bool>,
}

/// Resolve the fluid configuration: defaults, then the optional JSON file,
/// then command-line overrides. The result is validated.
pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<FluidConfig> {
    let mut config = match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<FluidConfig>(&data)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => FluidConfig::default(),
    };

    if let Some(max_exchange) = overrides.max_exchange {
        config.max_exchange = max_exchange;
    }
    if let Some(spread_divisor) = overrides.spread_divisor {
        config.spread_divisor = spread_divisor;
    }
    if let Some(record_events) = overrides.record_events {
        config.record_events = record_events;
    }

    config.validate()?;
    tracing::debug!(?config, "fluid configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = resolve(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config, FluidConfig::default());
    }

    #[test]
    fn file_values_are_loaded() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "max_exchange": 12, "spread_divisor": 8 }}"#).unwrap();

        let config = resolve(Some(tmp.path()), ConfigOverrides::default()).unwrap();
        assert_eq!(config.max_exchange, 12);
        assert_eq!(config.spread_divisor, 8);
    }

    #[test]
    fn overrides_win_over_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, r#"{{ "max_exchange": 12 }}"#).unwrap();

        let overrides = ConfigOverrides {
            max_exchange: Some(40),
            ..ConfigOverrides::default()
        };
        let config = resolve(Some(tmp.path()), overrides).unwrap();
        assert_eq!(config.max_exchange, 40);
    }

    #[test]
    fn invalid_result_is_rejected() {
        let overrides = ConfigOverrides {
            spread_divisor: Some(2),
            ..ConfigOverrides::default()
        };
        assert!(resolve(None, overrides).is_err());
    }

    #[test]
    fn malformed_file_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "not json").unwrap();
        let err = resolve(Some(tmp.path()), ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }
}

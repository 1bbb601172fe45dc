//! INI file configuration adapter.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::PulseError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PulseError> {
        let mut config = Ini::new();
        config.load(&path).map_err(|e| PulseError::ConfigParse {
            file: path.as_ref().display().to_string(),
            reason: e,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, PulseError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| PulseError::ConfigParse {
                file: "<inline>".into(),
                reason: e,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[run]
symbols = 005930.KS, AAPL
data_dir = data/bars
news_dir = data/news

[portfolio]
initial_capital = 10000000

[indicators]
rsi_period = 14
macd_slow = 26

[scoring]
buy_threshold = 80
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("run", "symbols"),
            Some("005930.KS, AAPL".to_string())
        );
        assert_eq!(adapter.get_int("indicators", "rsi_period", 0), 14);
        assert_eq!(
            adapter.get_double("portfolio", "initial_capital", 0.0),
            10_000_000.0
        );
    }

    #[test]
    fn missing_key_returns_none_or_default() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("run", "state_dir"), None);
        assert_eq!(adapter.get_int("indicators", "sma_short", 5), 5);
        assert_eq!(adapter.get_double("scoring", "baseline", 50.0), 50.0);
    }

    #[test]
    fn non_numeric_value_falls_back_to_default() {
        let adapter = FileConfigAdapter::from_string("[indicators]\nrsi_period = abc\n").unwrap();
        assert_eq!(adapter.get_int("indicators", "rsi_period", 14), 14);
    }

    #[test]
    fn bool_forms() {
        let adapter =
            FileConfigAdapter::from_string("[run]\na = true\nb = yes\nc = 1\nd = no\n").unwrap();
        assert!(adapter.get_bool("run", "a", false));
        assert!(adapter.get_bool("run", "b", false));
        assert!(adapter.get_bool("run", "c", false));
        assert!(!adapter.get_bool("run", "d", true));
        assert!(adapter.get_bool("run", "missing", true));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("run", "data_dir"),
            Some("data/bars".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/pulse.ini").unwrap_err();
        assert!(matches!(err, PulseError::ConfigParse { .. }));
    }
}

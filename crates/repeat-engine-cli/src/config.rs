use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;
use chrono_tz::Tz;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use repeat_engine::CalendarDate;
use serde::{Deserialize, Serialize};

/// Read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "nextdate.toml";

/// Prefix of environment variables that override the file.
pub const ENV_PREFIX: &str = "NEXTDATE_";

/// How dates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// YYYYMMDD
    #[default]
    Compact,
    /// DD.MM.YYYY
    Display,
}

impl DateFormat {
    pub fn format(self, date: CalendarDate) -> String {
        match self {
            DateFormat::Compact => date.compact(),
            DateFormat::Display => date.display(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA timezone that decides which calendar day "today" is
    pub timezone: String,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_level: String,
    pub date_format: DateFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            log_level: "warn".to_string(),
            date_format: DateFormat::default(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `NEXTDATE_*` environment variables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) if !path.exists() => {
                bail!("config file '{}' does not exist", path.display())
            }
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .with_context(|| format!("failed to load configuration from '{}'", file.display()))?;

        config.tz()?;
        Ok(config)
    }

    pub fn tz(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| anyhow::anyhow!("Invalid timezone: '{}'", self.timezone))
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> anyhow::Result<CalendarDate> {
        Ok(CalendarDate::from(Utc::now().with_timezone(&self.tz()?).date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.date_format, DateFormat::Compact);
        assert!(config.tz().is_ok());
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    timezone = "Europe/Moscow"
                    date_format = "display"
                "#,
            )?;
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.timezone, "Europe/Moscow");
            assert_eq!(config.date_format, DateFormat::Display);
            assert_eq!(config.log_level, "warn");

            jail.set_env("NEXTDATE_TIMEZONE", "Asia/Tokyo");
            jail.set_env("NEXTDATE_LOG_LEVEL", "debug");
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.timezone, "Asia/Tokyo");
            assert_eq!(config.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("NEXTDATE_TIMEZONE", "Mars/Olympus_Mons");
            let err = Config::load(None).unwrap_err();
            assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/nextdate.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"), "got: {err}");
    }

    #[test]
    fn test_date_format() {
        let date = CalendarDate::parse_compact("20230320").unwrap();
        assert_eq!(DateFormat::Compact.format(date), "20230320");
        assert_eq!(DateFormat::Display.format(date), "20.03.2023");
    }
}

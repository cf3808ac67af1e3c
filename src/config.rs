use std::env;

use chrono::{DateTime, FixedOffset, Local, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_uri: String,
    pub database_name: String,
    /// HS256 secret shared with the account service that issues tokens.
    pub jwt_secret: String,
    pub bind_addr: String,
    pub frontend_origin: String,
    /// Wall-clock zone for "today" and deadlines; the host zone when unset.
    pub utc_offset: Option<FixedOffset>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let utc_offset = match lookup("TASKLINE_UTC_OFFSET_MINUTES") {
            None => None,
            Some(raw) => {
                let invalid = || ConfigError::Invalid {
                    var: "TASKLINE_UTC_OFFSET_MINUTES",
                    value: raw.clone(),
                };
                let minutes: i32 = raw.trim().parse().map_err(|_| invalid())?;
                let offset = minutes.checked_mul(60).and_then(FixedOffset::east_opt);
                Some(offset.ok_or_else(invalid)?)
            }
        };

        Ok(Self {
            mongo_uri: required("MONGO_URI")?,
            database_name: lookup("DATABASE_NAME").unwrap_or_else(|| "taskline".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            frontend_origin: lookup("FRONTEND_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            utc_offset,
        })
    }

    /// The current instant in the configured wall-clock zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self.utc_offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn fills_defaults() {
        let config =
            Config::from_lookup(lookup(&[("MONGO_URI", "mongodb://db"), ("JWT_SECRET", "s")]))
                .unwrap();
        assert_eq!(config.database_name, "taskline");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.frontend_origin, "http://localhost:3000");
        assert!(config.utc_offset.is_none());
    }

    #[test]
    fn requires_secret() {
        let err = Config::from_lookup(lookup(&[("MONGO_URI", "mongodb://db")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn reads_utc_offset() {
        let config = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://db"),
            ("JWT_SECRET", "s"),
            ("TASKLINE_UTC_OFFSET_MINUTES", "-300"),
        ]))
        .unwrap();
        assert_eq!(config.utc_offset, FixedOffset::west_opt(5 * 3600));
        assert_eq!(config.now().offset().local_minus_utc(), -5 * 3600);
    }

    #[rstest]
    #[case("+5h")]
    #[case("1500")]
    #[case("99999999")]
    #[case("-2147483648")]
    fn rejects_unusable_offset(#[case] raw: &str) {
        let err = Config::from_lookup(lookup(&[
            ("MONGO_URI", "mongodb://db"),
            ("JWT_SECRET", "s"),
            ("TASKLINE_UTC_OFFSET_MINUTES", raw),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "TASKLINE_UTC_OFFSET_MINUTES", ref value } if value == raw
        ));
    }
}

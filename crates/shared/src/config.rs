use crate::errors::AppError;
use domain::ProgramId;
use std::env;
use std::str::FromStr;

/// ログの出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::Configuration(format!(
                "LOG_FORMAT は json または pretty を指定してください: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub program_id: ProgramId,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "dev".to_string(),
            program_id: ProgramId::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let program_id = match lookup("TODO_PROGRAM_ID") {
            Some(raw) => raw.trim().parse::<ProgramId>().map_err(|e| {
                AppError::Configuration(format!("TODO_PROGRAM_ID が不正です: {e}"))
            })?,
            None => defaults.program_id,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Config {
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
            program_id,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.environment, "dev");
        assert_eq!(config.program_id, ProgramId::default());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        let program_id = ProgramId::new([3u8; 32]).to_string();
        let config = Config::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "test"),
            ("TODO_PROGRAM_ID", &program_id),
            ("LOG_FORMAT", "Pretty"),
        ]))
        .unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.program_id, ProgramId::new([3u8; 32]));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_program_id_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[("TODO_PROGRAM_ID", "not-base58!")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_invalid_log_format_is_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}

use crate::admissions::{StatusPolicy, DEFAULT_DEADLINE_THRESHOLD_DAYS, DEFAULT_ROLLING_WINDOW_DAYS};
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub policy: StatusPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let policy = StatusPolicy {
            deadline_threshold_days: policy_days(
                "ADMISSION_DEADLINE_DAYS",
                DEFAULT_DEADLINE_THRESHOLD_DAYS,
            )?,
            rolling_window_days: policy_days(
                "ADMISSION_ROLLING_WINDOW_DAYS",
                DEFAULT_ROLLING_WINDOW_DAYS,
            )?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            policy,
        })
    }
}

fn policy_days(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };

    match raw.trim().parse::<i64>() {
        Ok(days) if days >= 0 => Ok(days),
        _ => Err(ConfigError::InvalidPolicyValue { name, value: raw }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPolicyValue { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPolicyValue { name, value } => {
                write!(f, "{name} must be a non-negative number of days, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("ADMISSION_DEADLINE_DAYS");
        env::remove_var("ADMISSION_ROLLING_WINDOW_DAYS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.policy, StatusPolicy::default());
    }

    #[test]
    fn policy_thresholds_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        env::set_var("ADMISSION_DEADLINE_DAYS", "14");
        env::set_var("ADMISSION_ROLLING_WINDOW_DAYS", " 60 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.policy.deadline_threshold_days, 14);
        assert_eq!(config.policy.rolling_window_days, 60);
    }

    #[test]
    fn rejects_negative_or_garbled_thresholds() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADMISSION_DEADLINE_DAYS", "-1");
        let negative = AppConfig::load();
        env::set_var("ADMISSION_DEADLINE_DAYS", "seven");
        let garbled = AppConfig::load();
        reset_env();

        assert!(matches!(
            negative,
            Err(ConfigError::InvalidPolicyValue {
                name: "ADMISSION_DEADLINE_DAYS",
                ..
            })
        ));
        assert!(garbled.is_err());
    }
}

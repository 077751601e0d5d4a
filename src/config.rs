//! Payment helper configuration
//! Handles environment variable loading, configuration validation, and defaults

use crate::payments::amount::AmountLimits;
use crate::payments::expiry::TimeoutPolicy;
use crate::payments::retry::RetryPolicy;
use crate::payments::transaction_id::{TransactionIdConfig, DEFAULT_PREFIX};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    pub amount: AmountLimits,
    pub retry: RetryPolicy,
    pub timeout: TimeoutPolicy,
    pub transaction_id: TransactionIdConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Plain,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            format: LogFormat::Plain,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

impl PaymentConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        let config = PaymentConfig {
            amount: amount_from_env()?,
            retry: retry_from_env()?,
            timeout: timeout_from_env()?,
            transaction_id: TransactionIdConfig {
                prefix: env::var("PAYMENT_TX_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
            },
            logging: LoggingConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_amount_limits(&self.amount)?;
        validate_retry_policy(&self.retry)?;
        validate_timeout_policy(&self.timeout)?;

        let prefix = &self.transaction_id.prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidValue("PAYMENT_TX_PREFIX".to_string()));
        }

        self.logging.validate()
    }
}

fn amount_from_env() -> Result<AmountLimits, ConfigError> {
    let defaults = AmountLimits::default();
    Ok(AmountLimits {
        min: parse_var("PAYMENT_MIN_AMOUNT", defaults.min)?,
        max: parse_var("PAYMENT_MAX_AMOUNT", defaults.max)?,
    })
}

fn retry_from_env() -> Result<RetryPolicy, ConfigError> {
    let defaults = RetryPolicy::default();
    Ok(RetryPolicy {
        base_delay: Duration::from_millis(parse_var(
            "PAYMENT_RETRY_BASE_DELAY_MS",
            defaults.base_delay.as_millis() as u64,
        )?),
        max_delay: Duration::from_millis(parse_var(
            "PAYMENT_RETRY_MAX_DELAY_MS",
            defaults.max_delay.as_millis() as u64,
        )?),
    })
}

fn timeout_from_env() -> Result<TimeoutPolicy, ConfigError> {
    let defaults = TimeoutPolicy::default();
    Ok(TimeoutPolicy {
        timeout_minutes: parse_var("PAYMENT_TIMEOUT_MINUTES", defaults.timeout_minutes)?,
        poll_interval_secs: parse_var(
            "PAYMENT_POLL_INTERVAL_SECONDS",
            defaults.poll_interval_secs,
        )?,
    })
}

fn validate_amount_limits(limits: &AmountLimits) -> Result<(), ConfigError> {
    if !limits.min.is_finite() || limits.min < 0.0 {
        return Err(ConfigError::InvalidValue("PAYMENT_MIN_AMOUNT".to_string()));
    }
    if !limits.max.is_finite() {
        return Err(ConfigError::InvalidValue("PAYMENT_MAX_AMOUNT".to_string()));
    }
    if limits.min > limits.max {
        return Err(ConfigError::ValidationFailed(
            "PAYMENT_MIN_AMOUNT must be <= PAYMENT_MAX_AMOUNT".to_string(),
        ));
    }
    Ok(())
}

fn validate_retry_policy(policy: &RetryPolicy) -> Result<(), ConfigError> {
    if policy.base_delay.is_zero() {
        return Err(ConfigError::InvalidValue(
            "PAYMENT_RETRY_BASE_DELAY_MS".to_string(),
        ));
    }
    if policy.base_delay > policy.max_delay {
        return Err(ConfigError::ValidationFailed(
            "PAYMENT_RETRY_BASE_DELAY_MS must be <= PAYMENT_RETRY_MAX_DELAY_MS".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeout_policy(policy: &TimeoutPolicy) -> Result<(), ConfigError> {
    if policy.timeout_minutes == 0 {
        return Err(ConfigError::InvalidValue("PAYMENT_TIMEOUT_MINUTES".to_string()));
    }
    if policy.poll_interval_secs == 0 {
        return Err(ConfigError::InvalidValue(
            "PAYMENT_POLL_INTERVAL_SECONDS".to_string(),
        ));
    }
    Ok(())
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "plain".to_string())
                .trim()
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                "plain" => LogFormat::Plain,
                _ => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            },
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
        if !valid_levels.contains(&self.level.to_uppercase().as_str()) {
            return Err(ConfigError::InvalidValue("LOG_LEVEL".to_string()));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for configuration: {0}")]
    InvalidValue(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Environment variables are process-global; tests that touch them hold this lock.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const PAYMENT_VARS: &[&str] = &[
        "PAYMENT_MIN_AMOUNT",
        "PAYMENT_MAX_AMOUNT",
        "PAYMENT_RETRY_BASE_DELAY_MS",
        "PAYMENT_RETRY_MAX_DELAY_MS",
        "PAYMENT_TIMEOUT_MINUTES",
        "PAYMENT_POLL_INTERVAL_SECONDS",
        "PAYMENT_TX_PREFIX",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in PAYMENT_VARS {
            env::remove_var(name);
        }
        for (name, value) in vars {
            env::set_var(name, value);
        }
        let result = f();
        for name in PAYMENT_VARS {
            env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_from_env_uses_defaults() {
        let config = with_env(&[], PaymentConfig::from_env).expect("defaults are valid");
        assert_eq!(config.amount, AmountLimits::default());
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.timeout, TimeoutPolicy::default());
        assert_eq!(config.transaction_id.prefix, "TXN");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_from_env_reads_every_variable() {
        let config = with_env(
            &[
                ("PAYMENT_MIN_AMOUNT", "500"),
                ("PAYMENT_MAX_AMOUNT", "2000000"),
                ("PAYMENT_RETRY_BASE_DELAY_MS", "250"),
                ("PAYMENT_RETRY_MAX_DELAY_MS", "10000"),
                ("PAYMENT_TIMEOUT_MINUTES", "5"),
                ("PAYMENT_POLL_INTERVAL_SECONDS", "10"),
                ("PAYMENT_TX_PREFIX", "SHOP"),
                ("LOG_LEVEL", "debug"),
                ("LOG_FORMAT", "JSON"),
            ],
            PaymentConfig::from_env,
        )
        .expect("valid configuration");

        assert_eq!(config.amount.min, 500.0);
        assert_eq!(config.amount.max, 2_000_000.0);
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
        assert_eq!(config.retry.max_delay, Duration::from_secs(10));
        assert_eq!(config.timeout.timeout_minutes, 5);
        assert_eq!(config.timeout.poll_interval_secs, 10);
        assert_eq!(config.transaction_id.prefix, "SHOP");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_from_env_rejects_unparseable_values() {
        for (name, value) in [
            ("PAYMENT_MIN_AMOUNT", "abc"),
            ("PAYMENT_RETRY_BASE_DELAY_MS", "-1"),
            ("PAYMENT_TIMEOUT_MINUTES", "three"),
            ("LOG_FORMAT", "xml"),
        ] {
            let result = with_env(&[(name, value)], PaymentConfig::from_env);
            match result {
                Err(ConfigError::InvalidValue(var)) => assert_eq!(var, name),
                other => panic!("{}={} should be rejected, got {:?}", name, value, other),
            }
        }
    }

    #[test]
    fn test_from_env_runs_validation() {
        let result = with_env(
            &[("PAYMENT_MIN_AMOUNT", "900"), ("PAYMENT_MAX_AMOUNT", "100")],
            PaymentConfig::from_env,
        );
        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_log_format_is_case_insensitive() {
        let config = with_env(&[("LOG_FORMAT", " Plain ")], LoggingConfig::from_env)
            .expect("plain is accepted");
        assert_eq!(config.format, LogFormat::Plain);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = PaymentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.amount.min, 100.0);
        assert_eq!(config.amount.max, 10_000_000.0);
        assert_eq!(config.timeout.timeout_minutes, 3);
        assert_eq!(config.retry.max_delay, Duration::from_secs(30));
        assert_eq!(config.transaction_id.prefix, "TXN");
    }

    #[test]
    fn test_inverted_amount_bounds_rejected() {
        let mut config = PaymentConfig::default();
        config.amount = AmountLimits {
            min: 500.0,
            max: 100.0,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PaymentConfig::default();
        config.timeout.timeout_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_delay_above_ceiling_rejected() {
        let mut config = PaymentConfig::default();
        config.retry.base_delay = Duration::from_secs(60);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prefix_must_be_alphanumeric() {
        let mut config = PaymentConfig::default();
        config.transaction_id.prefix = "TX-N".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        let config = LoggingConfig {
            level: "verbose".to_string(),
            format: LogFormat::Plain,
        };
        assert!(config.validate().is_err());
        assert!(LoggingConfig::default().validate().is_ok());
    }
}

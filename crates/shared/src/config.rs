//! Application configuration management.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Project analytics configuration.
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Inclusive range of numeric ledger account codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccountCodeRange {
    /// First code in the range.
    pub from: u32,
    /// Last code in the range.
    pub to: u32,
}

impl AccountCodeRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// Returns true if the account code is numeric and inside the range.
    ///
    /// Non-numeric codes never match.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        code.trim()
            .parse::<u32>()
            .is_ok_and(|value| (self.from..=self.to).contains(&value))
    }
}

/// Settings consumed by the financial aggregator and recompute trigger.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Only cost centers of this analytic plan are attributed to projects.
    #[serde(default)]
    pub project_plan_id: Option<Uuid>,
    /// Cash discounts granted to customers.
    #[serde(default = "default_customer_discount_accounts")]
    pub customer_discount_accounts: AccountCodeRange,
    /// Cash discounts received from vendors.
    #[serde(default = "default_vendor_discount_accounts")]
    pub vendor_discount_accounts: AccountCodeRange,
    /// Upper bound of projects refreshed by one bulk recompute.
    #[serde(default = "default_recompute_limit")]
    pub recompute_limit: u64,
}

// SKR03 "Gewährte Skonti"
fn default_customer_discount_accounts() -> AccountCodeRange {
    AccountCodeRange::new(8730, 8739)
}

// SKR03 "Erhaltene Skonti"
fn default_vendor_discount_accounts() -> AccountCodeRange {
    AccountCodeRange::new(3730, 3739)
}

fn default_recompute_limit() -> u64 {
    100
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            project_plan_id: None,
            customer_discount_accounts: default_customer_discount_accounts(),
            vendor_discount_accounts: default_vendor_discount_accounts(),
            recompute_limit: default_recompute_limit(),
        }
    }
}

impl AnalyticsConfig {
    /// Checks the settings for values the aggregator cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        for (name, range) in [
            ("customer_discount_accounts", self.customer_discount_accounts),
            ("vendor_discount_accounts", self.vendor_discount_accounts),
        ] {
            if range.from > range.to {
                return Err(AppError::Validation(format!(
                    "{name}: range start {} is after end {}",
                    range.from, range.to
                )));
            }
        }

        if self.recompute_limit == 0 {
            return Err(AppError::Validation(
                "recompute_limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or fails validation.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("KONTOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.analytics.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("8730", true)]
    #[case("8736", true)]
    #[case("8739", true)]
    #[case(" 8735 ", true)]
    #[case("8729", false)]
    #[case("8740", false)]
    #[case("1200", false)]
    #[case("873A", false)]
    #[case("", false)]
    fn test_account_code_range_contains(#[case] code: &str, #[case] expected: bool) {
        let range = AccountCodeRange::new(8730, 8739);
        assert_eq!(range.contains(code), expected);
    }

    #[test]
    fn test_analytics_defaults() {
        let analytics = AnalyticsConfig::default();
        assert_eq!(analytics.project_plan_id, None);
        assert_eq!(
            analytics.customer_discount_accounts,
            AccountCodeRange::new(8730, 8739)
        );
        assert_eq!(
            analytics.vendor_discount_accounts,
            AccountCodeRange::new(3730, 3739)
        );
        assert_eq!(analytics.recompute_limit, 100);
        assert!(analytics.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let analytics = AnalyticsConfig {
            vendor_discount_accounts: AccountCodeRange::new(3739, 3730),
            ..AnalyticsConfig::default()
        };
        let err = analytics.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("vendor_discount_accounts"));
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let analytics = AnalyticsConfig {
            recompute_limit: 0,
            ..AnalyticsConfig::default()
        };
        assert!(matches!(
            analytics.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("KONTOR__DATABASE__URL", Some("postgres://localhost/kontor_test")),
                ("KONTOR__ANALYTICS__RECOMPUTE_LIMIT", Some("25")),
                ("KONTOR__ANALYTICS__CUSTOMER_DISCOUNT_ACCOUNTS__FROM", Some("4730")),
                ("KONTOR__ANALYTICS__CUSTOMER_DISCOUNT_ACCOUNTS__TO", Some("4739")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/kontor_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.analytics.recompute_limit, 25);
                assert_eq!(
                    config.analytics.customer_discount_accounts,
                    AccountCodeRange::new(4730, 4739)
                );
                assert_eq!(
                    config.analytics.vendor_discount_accounts,
                    AccountCodeRange::new(3730, 3739)
                );
            },
        );
    }

    #[test]
    fn test_load_rejects_invalid_limit() {
        temp_env::with_vars(
            [
                ("KONTOR__DATABASE__URL", Some("postgres://localhost/kontor_test")),
                ("KONTOR__ANALYTICS__RECOMPUTE_LIMIT", Some("0")),
            ],
            || {
                let err = AppConfig::load().unwrap_err();
                assert_eq!(err.error_code(), "VALIDATION_ERROR");
            },
        );
    }
}

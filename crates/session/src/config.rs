use ledgerbook_ledger::{DEFAULT_CURRENCY, validate::validate_currency};

/// Environment variable naming the currency for statements created without one.
pub const DEFAULT_CURRENCY_ENV: &str = "LEDGERBOOK_DEFAULT_CURRENCY";

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub default_currency: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl SessionConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEFAULT_CURRENCY_ENV) {
            let code = raw.trim().to_ascii_uppercase();
            match validate_currency(&code) {
                Ok(()) => config.default_currency = code,
                Err(err) => tracing::warn!(
                    value = %raw,
                    error = %err,
                    "{DEFAULT_CURRENCY_ENV} ignored; using {DEFAULT_CURRENCY}"
                ),
            }
        }

        config
    }
}

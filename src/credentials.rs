//! API credentials picked up from the environment for new development users.
//!
//! A variable that is not set means "do not register this credential"; it is
//! never an error.  Lookup goes through a caller-supplied function so tests
//! can feed a map instead of touching the process environment.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PREMIUM_API_KEY_VAR: &str = "ROTKI_API_KEY";
pub const PREMIUM_API_SECRET_VAR: &str = "ROTKI_API_SECRET";

/// rotki premium subscription credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for PremiumCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PremiumCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Third-party data providers the tool knows how to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalService {
    Cryptocompare,
    Etherscan,
    OptimismEtherscan,
}

impl ExternalService {
    pub const ALL: [Self; 3] = [Self::Cryptocompare, Self::Etherscan, Self::OptimismEtherscan];

    /// Environment variable holding this service's API key.
    ///
    /// The optimism variable is plural on purpose; existing `.env` files use
    /// that spelling.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Cryptocompare => "CRYPTOCOMPARE_API_KEY",
            Self::Etherscan => "ETHERSCAN_API_KEY",
            Self::OptimismEtherscan => "OPTIMISM_ETHERSCAN_API_KEYS",
        }
    }
}

impl fmt::Display for ExternalService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cryptocompare => "cryptocompare",
            Self::Etherscan => "etherscan",
            Self::OptimismEtherscan => "optimism_etherscan",
        })
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalServiceCredential {
    pub service: ExternalService,
    pub api_key: String,
}

impl fmt::Debug for ExternalServiceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalServiceCredential")
            .field("service", &self.service)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Everything found in the environment, already filtered down to what should
/// be registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvCredentials {
    pub premium: Option<PremiumCredentials>,
    pub external: Vec<ExternalServiceCredential>,
}

impl EnvCredentials {
    /// Collect credentials through `lookup` (usually `std::env::var(..).ok()`).
    ///
    /// Premium needs both key and secret; with only one of them set it is
    /// skipped.  External services are checked in [`ExternalService::ALL`]
    /// order.
    pub fn collect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let premium = match (lookup(PREMIUM_API_KEY_VAR), lookup(PREMIUM_API_SECRET_VAR)) {
            (Some(api_key), Some(api_secret)) => Some(PremiumCredentials {
                api_key,
                api_secret,
            }),
            (None, None) => None,
            _ => {
                tracing::debug!(
                    "only one of {PREMIUM_API_KEY_VAR}/{PREMIUM_API_SECRET_VAR} is set, skipping premium"
                );
                None
            },
        };

        let external = ExternalService::ALL
            .into_iter()
            .filter_map(|service| {
                lookup(service.env_var()).map(|api_key| ExternalServiceCredential {
                    service,
                    api_key,
                })
            })
            .collect();

        Self { premium, external }
    }

    /// Read from the real process environment.
    pub fn from_process_env() -> Self {
        Self::collect(|name| std::env::var(name).ok())
    }
}

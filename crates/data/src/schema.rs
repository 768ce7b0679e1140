use serde::{Deserialize, Serialize};

pub use sp21_core::{CardClass, SpecialCardDef};

pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOCALE: &str = "en_US";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub engine_url: String,
    /// Per-request timeout; absent means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine_url: DEFAULT_ENGINE_URL.to_string(),
            timeout_secs: None,
            locale: None,
        }
    }
}

/// Values that win over the config file, highest priority last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub engine_url: Option<String>,
    pub locale: Option<String>,
}

impl ConfigOverrides {
    /// Layer `other` on top of `self`.
    pub fn then(self, other: ConfigOverrides) -> Self {
        Self {
            engine_url: other.engine_url.or(self.engine_url),
            locale: other.locale.or(self.locale),
        }
    }
}

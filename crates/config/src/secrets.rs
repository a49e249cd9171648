// Values API key management
//
// The key is looked up from:
// 1. System keychain (preferred)
// 2. GRIDHUB_API_KEY environment variable (fallback for CI/headless)
//
// The key is NEVER stored in settings.json, and never logged.

use std::env;

/// Keychain service the key is filed under
const KEYCHAIN_SERVICE: &str = "gridhub";

/// Account name within the service
const KEYCHAIN_ACCOUNT: &str = "values/api";

/// Environment variable checked when the keychain has no key
pub const API_KEY_ENV: &str = "GRIDHUB_API_KEY";

/// Where a key was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// Stored in the system keychain
    Keychain,
    /// Taken from the environment
    Environment,
    /// Not configured anywhere
    None,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Keychain => "keychain",
            KeySource::Environment => "environment",
            KeySource::None => "none",
        }
    }
}

/// A key together with its source, so `config key` can report
/// where the key came from without printing it.
#[derive(Debug, Clone)]
pub struct KeyLookup {
    pub key: Option<String>,
    pub source: KeySource,
}

/// Look up the values API key: keychain first, then the
/// GRIDHUB_API_KEY environment variable.
pub fn get_api_key() -> KeyLookup {
    #[cfg(feature = "keychain")]
    {
        if let Ok(entry) = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT) {
            if let Ok(key) = entry.get_password() {
                return KeyLookup {
                    key: Some(key),
                    source: KeySource::Keychain,
                };
            }
        }
    }

    // Headless fallback
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return KeyLookup {
                key: Some(key),
                source: KeySource::Environment,
            };
        }
    }

    KeyLookup {
        key: None,
        source: KeySource::None,
    }
}

/// Store the values API key in the keychain.
#[cfg(feature = "keychain")]
pub fn set_api_key(key: &str) -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to create keychain entry: {}", e))?;

    entry
        .set_password(key)
        .map_err(|e| format!("Failed to store key in keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn set_api_key(_key: &str) -> Result<(), String> {
    Err(format!(
        "Keychain support not enabled. Set the {} environment variable instead.",
        API_KEY_ENV
    ))
}

/// Remove the values API key from the keychain.
#[cfg(feature = "keychain")]
pub fn delete_api_key() -> Result<(), String> {
    let entry = keyring::Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT)
        .map_err(|e| format!("Failed to access keychain entry: {}", e))?;

    entry
        .delete_credential()
        .map_err(|e| format!("Failed to delete key from keychain: {}", e))
}

#[cfg(not(feature = "keychain"))]
pub fn delete_api_key() -> Result<(), String> {
    Err("Keychain support not enabled.".to_string())
}

/// Whether a usable keychain backend is present.
pub fn keychain_available() -> bool {
    #[cfg(feature = "keychain")]
    {
        // Probe with a throwaway entry.
        keyring::Entry::new(KEYCHAIN_SERVICE, "test").is_ok()
    }
    #[cfg(not(feature = "keychain"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_source_names() {
        assert_eq!(KeySource::Keychain.as_str(), "keychain");
        assert_eq!(KeySource::Environment.as_str(), "environment");
        assert_eq!(KeySource::None.as_str(), "none");
    }

    #[test]
    fn test_key_lookup_env_fallback() {
        // One test owns the variable end to end so parallel tests
        // cannot race on it.
        env::remove_var(API_KEY_ENV);
        let lookup = get_api_key();
        if lookup.source != KeySource::Keychain {
            assert_eq!(lookup.source, KeySource::None);
            assert!(lookup.key.is_none());
        }

        env::set_var(API_KEY_ENV, "test-key-123");
        let lookup = get_api_key();
        if lookup.source != KeySource::Keychain {
            assert_eq!(lookup.source, KeySource::Environment);
            assert_eq!(lookup.key, Some("test-key-123".to_string()));
        }

        env::remove_var(API_KEY_ENV);
    }
}

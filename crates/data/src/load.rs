use crate::schema::{ClientConfig, ConfigOverrides, SpecialCardDef, DEFAULT_LOCALE};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use sp21_core::Catalog;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const CLIENT_CONFIG_FILE: &str = "client.json";
pub const SPECIAL_CARDS_FILE: &str = "special_cards.json";

pub const ENGINE_URL_ENV: &str = "SP21_ENGINE_URL";
pub const LOCALE_ENV: &str = "SP21_LANG";

/// Loads `special_cards.json` from `dir`, or the built-in catalog when the
/// file does not exist.
pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let path = dir.join(SPECIAL_CARDS_FILE);
    if !path.exists() {
        info!(path = %path.display(), "no special card file, using built-in catalog");
        return Ok(Catalog::builtin());
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let catalog = parse_catalog(&raw).with_context(|| format!("load {}", path.display()))?;
    debug!(cards = catalog.len(), "special card catalog loaded");
    Ok(catalog)
}

pub fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let defs: Vec<SpecialCardDef> = serde_json::from_str(raw).context("parse special cards")?;
    let catalog = Catalog::from_defs(defs)?;
    Ok(catalog)
}

/// Reads `client.json` from `dir`; defaults when the file is absent.
pub fn load_client_config(dir: &Path) -> anyhow::Result<ClientConfig> {
    let path = dir.join(CLIENT_CONFIG_FILE);
    if !path.exists() {
        return Ok(ClientConfig::default());
    }
    let config: ClientConfig = load_json(&path)?;
    validate_config(&config).with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn env_overrides() -> ConfigOverrides {
    overrides_from(|key| std::env::var(key).ok())
}

pub fn overrides_from(lookup: impl Fn(&str) -> Option<String>) -> ConfigOverrides {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
    ConfigOverrides {
        engine_url: non_empty(ENGINE_URL_ENV),
        locale: non_empty(LOCALE_ENV),
    }
}

pub fn apply_overrides(
    mut config: ClientConfig,
    overrides: ConfigOverrides,
) -> anyhow::Result<ClientConfig> {
    if let Some(url) = overrides.engine_url {
        config.engine_url = url;
    }
    if let Some(locale) = overrides.locale {
        config.locale = Some(locale);
    }
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ClientConfig) -> anyhow::Result<()> {
    if config.engine_url.trim().is_empty() {
        bail!("engine_url must not be empty");
    }
    if config.timeout_secs == Some(0) {
        bail!("timeout_secs must be positive");
    }
    Ok(())
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or(DEFAULT_LOCALE).trim();
    if raw.is_empty() {
        return DEFAULT_LOCALE.to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "ja" | "jp" | "ja_jp" => "ja_JP".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

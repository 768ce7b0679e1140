use sp21_core::{CardClass, Catalog, MINUS_THREE_ID};
use sp21_data::{load_catalog, load_client_config, DEFAULT_ENGINE_URL};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn bundled_catalog_matches_builtin() {
    let catalog = load_catalog(&assets_root()).expect("load catalog");
    assert_eq!(catalog, Catalog::builtin());
    assert_eq!(catalog.class_of(MINUS_THREE_ID), Some(CardClass::Declare));
}

#[test]
fn bundled_client_config_points_at_local_engine() {
    let config = load_client_config(&assets_root()).expect("load config");
    assert_eq!(config.engine_url, DEFAULT_ENGINE_URL);
    assert_eq!(config.timeout_secs, Some(30));
    assert_eq!(config.locale.as_deref(), Some("en_US"));
}

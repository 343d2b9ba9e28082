use std::path::{Path, PathBuf};

use gap_desk::config::Config;
use gap_desk::intraday::IntradayController;
use gap_desk::query::SortDir;
use gap_desk::scanner::ScannerController;

#[test]
/// Verifies the shipped config file parses and matches the built-in defaults.
fn shipped_default_toml_matches_defaults() {
    let config = Config::from_path(Path::new("config/default.toml"))
        .expect("config/default.toml should parse");
    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_ms, 30_000);
    assert_eq!(config.scanner.page_limit, 50);
    assert_eq!(config.scanner.default_sort, "gd_volume");
    assert_eq!(config.intraday.page_limit, 50);
    assert_eq!(config.intraday.default_sort, "changePct");
    assert_eq!(
        config.watchlist.local_path,
        PathBuf::from("data/watchlist.json")
    );
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
}

#[test]
/// Verifies configured page limits and sorts flow into the controllers'
/// composed parameters.
fn controllers_pick_up_configured_paging() {
    let config = Config::from_toml_str(
        r#"
[scanner]
page_limit = 25
default_sort = "gd_gap"

[intraday]
page_limit = 10
default_sort = "totalVolume"
"#,
    )
    .expect("config should parse");

    let scanner = ScannerController::from_config(&config.scanner);
    let params = scanner.compose();
    assert_eq!(params.get("limit").map(String::as_str), Some("25"));
    assert_eq!(params.get("sort").map(String::as_str), Some("gd_gap"));
    assert_eq!(scanner.sort().dir, SortDir::Desc);

    let intraday = IntradayController::from_config(&config.intraday);
    let params = intraday.compose();
    assert_eq!(params.get("limit").map(String::as_str), Some("10"));
    assert_eq!(params.get("sort").map(String::as_str), Some("totalVolume"));
}

#[test]
/// Verifies unknown or malformed values are rejected with context.
fn invalid_config_is_rejected() {
    let err = Config::from_toml_str("[api]\nbase_url = \"::nope\"").unwrap_err();
    assert!(format!("{:#}", err).contains("api.base_url"));
    assert!(Config::from_toml_str("[intraday]\npage_limit = 0").is_err());
    assert!(Config::from_toml_str("[scanner]\ndefault_sort = \"  \"").is_err());
    assert!(Config::from_path(Path::new("config/does-not-exist.toml")).is_err());
}

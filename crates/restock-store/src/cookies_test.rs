use chrono::{Duration, Utc};

use super::*;

#[test]
fn load_missing_cache_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_cookie_cache(&dir.path().join("cookies.json"), 86_400).is_none());
}

#[test]
fn load_malformed_cache_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    std::fs::write(&path, "garbage").unwrap();
    assert!(load_cookie_cache(&path, 86_400).is_none());
}

#[test]
fn save_then_load_returns_cookies_while_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let cookies = vec!["sid=abc; Path=/".to_owned(), "region=x".to_owned()];
    save_cookie_cache(&path, &cookies).unwrap();

    let loaded = load_cookie_cache(&path, 86_400).expect("fresh cache should load");
    assert_eq!(loaded, cookies);
}

#[test]
fn load_expired_cache_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    // Hand-write a cache stamped two days in the past.
    let stale = serde_json::json!({
        "saved_at": (Utc::now() - Duration::days(2)).to_rfc3339(),
        "cookies": ["sid=abc"],
    });
    std::fs::write(&path, serde_json::to_string(&stale).unwrap()).unwrap();

    assert!(load_cookie_cache(&path, 86_400).is_none());
}

#[test]
fn load_future_stamped_cache_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");

    let future = serde_json::json!({
        "saved_at": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "cookies": ["sid=abc"],
    });
    std::fs::write(&path, serde_json::to_string(&future).unwrap()).unwrap();

    assert!(load_cookie_cache(&path, 86_400).is_none());
}

#[test]
fn empty_cookie_list_is_treated_as_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies.json");
    save_cookie_cache(&path, &[]).unwrap();
    assert!(load_cookie_cache(&path, 86_400).is_none());
}

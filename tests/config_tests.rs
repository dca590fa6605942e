use std::collections::HashMap;
use std::path::PathBuf;

use newsbrief::core::config::{
    Credentials, DigestConfig, MAX_HOURS_LOOKBACK, PERPLEXITY_API_KEY, TELEGRAM_BOT_TOKEN,
    TELEGRAM_CHAT_ID,
};
use newsbrief::errors::DigestError;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn test_defaults_match_original_feed_list() {
    let config = DigestConfig::default();
    assert_eq!(config.max_articles, 5);
    assert_eq!(config.hours_lookback, 48);
    assert_eq!(config.feeds.len(), 5);
    assert_eq!(config.feeds[0].name, "The Verge - AI");
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.completion.model, "sonar");
    assert_eq!(config.completion.article_max_tokens, 250);
    assert_eq!(config.completion.overview_max_tokens, 300);
    assert_eq!(config.storage_dir, PathBuf::from("storage"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = DigestConfig::from_toml(
        r#"
        max_articles = 3

        [[feeds]]
        name = "Only"
        url = "https://only.example/rss"

        [completion]
        model = "sonar-pro"
        "#,
    )
    .unwrap();

    assert_eq!(config.max_articles, 3);
    assert_eq!(config.hours_lookback, 48);
    assert_eq!(config.feeds.len(), 1);
    assert_eq!(config.feeds[0].url, "https://only.example/rss");
    assert_eq!(config.completion.model, "sonar-pro");
    assert_eq!(config.completion.article_max_tokens, 250);
    assert_eq!(config.telegram.api_base, "https://api.telegram.org");
}

#[test]
fn test_validate_rejects_bad_values() {
    let zero_budget = DigestConfig {
        max_articles: 0,
        ..DigestConfig::default()
    };
    assert!(zero_budget.validate().is_err());

    let negative_window = DigestConfig {
        hours_lookback: -1,
        ..DigestConfig::default()
    };
    assert!(negative_window.validate().is_err());

    let no_feeds = DigestConfig {
        feeds: Vec::new(),
        ..DigestConfig::default()
    };
    assert!(no_feeds.validate().is_err());

    let blank_feed = DigestConfig::from_toml(
        r#"
        [[feeds]]
        name = ""
        url = "https://x.example/rss"
        "#,
    )
    .unwrap();
    assert!(blank_feed.validate().is_err());
}

#[test]
fn test_validate_bounds_hours_lookback() {
    let huge = DigestConfig::from_toml("hours_lookback = 9000000000000000").unwrap();
    let err = huge.validate().unwrap_err();
    assert!(matches!(err, DigestError::Config(_)));
    assert!(err.to_string().contains("hours_lookback"));

    let longest = DigestConfig {
        hours_lookback: MAX_HOURS_LOOKBACK,
        ..DigestConfig::default()
    };
    assert!(longest.validate().is_ok());

    let past_longest = DigestConfig {
        hours_lookback: MAX_HOURS_LOOKBACK + 1,
        ..DigestConfig::default()
    };
    assert!(past_longest.validate().is_err());
}

#[test]
fn test_load_without_path_uses_defaults() {
    assert_eq!(DigestConfig::load(None).unwrap(), DigestConfig::default());
}

#[test]
fn test_load_reports_unreadable_file() {
    let err = DigestConfig::load(Some(std::path::Path::new("/nonexistent/newsbrief.toml")))
        .unwrap_err();
    assert!(matches!(err, DigestError::Config(_)));
}

#[test]
fn test_load_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newsbrief.toml");
    std::fs::write(&path, "hours_lookback = 24\nstorage_dir = \"snapshots\"\n").unwrap();

    let config = DigestConfig::load(Some(&path)).unwrap();
    assert_eq!(config.hours_lookback, 24);
    assert_eq!(config.storage_dir, PathBuf::from("snapshots"));
}

#[test]
fn test_credentials_resolve_when_all_present() {
    let creds = Credentials::from_lookup(lookup_from(&[
        (PERPLEXITY_API_KEY, "pplx-key"),
        (TELEGRAM_BOT_TOKEN, "123:abc"),
        (TELEGRAM_CHAT_ID, "-100200"),
    ]))
    .unwrap();

    assert_eq!(creds.perplexity_api_key, "pplx-key");
    assert_eq!(creds.telegram_bot_token, "123:abc");
    assert_eq!(creds.telegram_chat_id, "-100200");
    assert!(!format!("{creds:?}").contains("pplx-key"));
}

#[test]
fn test_each_missing_credential_is_named() {
    let all = [
        (PERPLEXITY_API_KEY, "pplx-key"),
        (TELEGRAM_BOT_TOKEN, "123:abc"),
        (TELEGRAM_CHAT_ID, "-100200"),
    ];

    for missing in [PERPLEXITY_API_KEY, TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID] {
        let pairs: Vec<(&str, &str)> = all.iter().copied().filter(|(k, _)| *k != missing).collect();
        let err = Credentials::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, DigestError::Config(_)));
        assert!(
            err.to_string().contains(missing),
            "error should name {missing}: {err}"
        );
    }
}

#[test]
fn test_blank_credential_counts_as_missing() {
    let err = Credentials::from_lookup(lookup_from(&[
        (PERPLEXITY_API_KEY, "   "),
        (TELEGRAM_BOT_TOKEN, "123:abc"),
        (TELEGRAM_CHAT_ID, "-100200"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains(PERPLEXITY_API_KEY));
}

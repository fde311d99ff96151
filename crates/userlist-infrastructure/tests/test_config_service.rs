use userlist_infrastructure::ConfigService;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    // Use temporary directory for test
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r#"
[backend]
url = "https://proj.supabase.co/"
anon_key = "anon"
table = "people"
timeout_secs = 10
"#,
    )
    .unwrap();

    let service = ConfigService::with_path(config_path);
    let config = service.get_config().expect("Should load config");

    assert_eq!(config.url, "https://proj.supabase.co");
    assert_eq!(config.anon_key, "anon");
    assert_eq!(config.table, "people");
    assert_eq!(config.timeout_secs, 10);
    assert_eq!(config.table_endpoint(), "https://proj.supabase.co/rest/v1/people");
}

#[test]
fn test_config_is_cached_until_invalidated() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    let write = |table: &str| {
        std::fs::write(
            &config_path,
            format!(
                "[backend]\nurl = \"https://proj.supabase.co\"\nanon_key = \"anon\"\ntable = \"{}\"\n",
                table
            ),
        )
        .unwrap();
    };

    write("first");
    let service = ConfigService::with_path(config_path.clone());
    assert_eq!(service.get_config().unwrap().table, "first");

    write("second");
    assert_eq!(service.get_config().unwrap().table, "first");

    service.invalidate_cache();
    assert_eq!(service.get_config().unwrap().table, "second");
}

#[test]
fn test_invalid_url_in_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "[backend]\nurl = \"proj.supabase.co\"\nanon_key = \"anon\"\n",
    )
    .unwrap();

    let err = ConfigService::with_path(config_path).get_config().unwrap_err();
    assert!(err.is_config());
}

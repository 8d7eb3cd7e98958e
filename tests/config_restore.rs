use voicetide::config::AppConfig;

#[test]
fn default_round_trips_through_toml() {
    let config = AppConfig::default();
    let text = toml::to_string(&config).expect("serialize default");
    let parsed: AppConfig = toml::from_str(&text).expect("parse default");

    assert_eq!(parsed.log.path, config.log.path);
    assert_eq!(parsed.chart.window_buckets, config.chart.window_buckets);
    assert_eq!(
        parsed.chart.daily_threshold_days,
        config.chart.daily_threshold_days
    );
}

#[test]
fn partial_toml_fills_in_defaults() {
    let text = r#"
        [chart]
        window_buckets = 48
    "#;
    let parsed: AppConfig = toml::from_str(text).expect("parse partial");
    assert_eq!(parsed.chart.window_buckets, 48);
    assert_eq!(parsed.chart.daily_threshold_days, 5);
    assert_eq!(parsed.log.path, "logs.json");
}

#[test]
fn empty_toml_is_all_defaults() {
    let parsed: AppConfig = toml::from_str("").expect("parse empty");
    assert_eq!(parsed.log.path, "logs.json");
    assert_eq!(parsed.chart.window_buckets, 24);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config = AppConfig::load_or_default("/definitely/not/here/voicetide.toml");
    assert_eq!(config.log.path, "logs.json");
    assert_eq!(config.chart.window_buckets, 24);
}

use super::*;

#[test]
fn test_defaults() {
    let config = TunerConfig::default();

    assert_eq!(config.iterations, 10);
    assert_eq!(config.variables.len(), 2);
    assert_eq!(config.variables[0].name, "LMRWeight");
    assert_eq!(config.variables[1].delta, 500.0);
    assert_eq!(config.match_config.hash, 64);
    assert_eq!(config.match_config.time_control, "15.0+0.12");
    assert_eq!(config.match_config.working_directory, PathBuf::from("./engine"));
    assert_eq!(config.sampler.warn_after, 2000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_round_trip() {
    let config = TunerConfig {
        seed: Some(7),
        ..Default::default()
    };

    let text = config.to_toml().unwrap();
    let parsed = TunerConfig::from_toml(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let text = r#"
iterations = 3

[match]
games = 10
timeout_secs = 600

[[variables]]
name = "Aspiration"
default = 25.0
minval = 5.0
maxval = 100.0
delta = 20.0
apply_factor = 0.5
"#;

    let config = TunerConfig::from_toml(text).unwrap();

    assert_eq!(config.iterations, 3);
    assert_eq!(config.match_config.games, 10);
    assert_eq!(config.match_config.timeout_secs, Some(600));
    assert_eq!(config.match_config.engine_command, "./Avalanche");
    assert_eq!(config.variables.len(), 1);
    assert_eq!(config.variables[0].name, "Aspiration");
    assert_eq!(config.sampler.max_attempts, None);
}

#[test]
fn test_invalid_configs_rejected() {
    assert!(matches!(
        TunerConfig::from_toml("iterations = 0"),
        Err(TunerError::Config(_))
    ));
    assert!(TunerConfig::from_toml("iterations = \"ten\"").is_err());

    let duplicate = r#"
[[variables]]
name = "X"
default = 1.0
minval = 0.0
maxval = 2.0
delta = 1.0
apply_factor = 1.0

[[variables]]
name = "X"
default = 1.0
minval = 0.0
maxval = 2.0
delta = 1.0
apply_factor = 1.0
"#;
    assert!(TunerConfig::from_toml(duplicate).is_err());

    let no_cap = TunerConfig {
        sampler: SamplerConfig {
            warn_after: 2000,
            max_attempts: Some(0),
        },
        ..Default::default()
    };
    assert!(no_cap.validate().is_err());
}

#[test]
fn test_load_missing_file() {
    let err = TunerConfig::load(Path::new("/nonexistent/tuner.toml")).unwrap_err();
    assert!(matches!(err, TunerError::Config(_)));
}

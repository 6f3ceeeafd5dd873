use super::*;

fn sample_report() -> TuningReport {
    let specs = vec![VariableSpec::new("LMRWeight", 580.0, 100.0, 900.0, 260.0, 0.45)];
    let mut report = TuningReport::new(specs);
    report.seed = Some(1234);
    report.push(IterationRecord {
        iteration: 1,
        deltas: vec![40.0],
        a: CandidateConfig {
            values: vec![TunedValue {
                name: "LMRWeight".to_string(),
                value: 620.0,
            }],
        },
        b: CandidateConfig {
            values: vec![TunedValue {
                name: "LMRWeight".to_string(),
                value: 540.0,
            }],
        },
        outcome: 0.6,
        result: Some(MatchResult::new(25, 15, 10)),
        direction: Direction::Plus,
        tie_break: false,
        values: vec![TunedValue {
            name: "LMRWeight".to_string(),
            value: 598.0,
        }],
    });
    report.final_values = report.iterations[0].values.clone();
    report
}

#[test]
fn test_new_report_starts_at_defaults() {
    let specs = vec![VariableSpec::new("LMRBias", 980.0, 100.0, 1500.0, 500.0, 0.4)];
    let report = TuningReport::new(specs);

    assert!(report.iterations.is_empty());
    assert_eq!(report.final_values[0].value, 980.0);
}

#[test]
fn test_text_report_lists_iterations_and_final_values() {
    let text = sample_report().generate_report();

    assert!(text.contains("Seed: 1234"));
    assert!(text.contains("Iterations: 1"));
    assert!(text.contains("LMRWeight"));
    assert!(text.contains("0.600"));
    assert!(text.contains("598.00"));
    assert!(text.contains("Final values:\nLMRWeight: 598\n"));
}

#[test]
fn test_save_and_load() {
    let path = std::env::temp_dir().join(format!("tuner-report-{}.json", std::process::id()));
    let report = sample_report();

    report.save(&path).unwrap();
    let loaded = TuningReport::load(&path).unwrap();
    assert_eq!(loaded, report);

    std::fs::remove_file(path).ok();
}

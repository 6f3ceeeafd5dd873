use super::*;

fn lmr_weight() -> VariableSpec {
    VariableSpec::new("LMRWeight", 580.0, 100.0, 900.0, 260.0, 0.45)
}

#[test]
fn test_clamp_idempotent() {
    let ranges = [(0.0, 200.0), (-5.0, 5.0), (3.0, 3.0), (100.0, 1500.0)];
    let inputs = [-1e9, -250.0, -5.0, 0.0, 2.5, 3.0, 150.0, 200.0, 201.0, 1e9];

    for &(lo, hi) in &ranges {
        for &x in &inputs {
            let once = clamp(x, lo, hi);
            assert_eq!(clamp(once, lo, hi), once);
            assert!(once >= lo && once <= hi);
        }
    }
}

#[test]
fn test_state_starts_at_defaults_in_order() {
    let specs = vec![
        lmr_weight(),
        VariableSpec::new("LMRBias", 980.0, 100.0, 1500.0, 500.0, 0.4),
    ];
    let state = TuningState::from_defaults(&specs);

    assert_eq!(state.len(), 2);
    assert_eq!(state.values()[0].name, "LMRWeight");
    assert_eq!(state.values()[1].name, "LMRBias");
    assert_eq!(state.get("LMRBias"), Some(980.0));
    assert_eq!(state.get("Missing"), None);
}

#[test]
fn test_rounding_to_engine_value() {
    let v = TunedValue {
        name: "LMRWeight".to_string(),
        value: 579.5,
    };
    assert_eq!(v.rounded(), 580);

    let v = TunedValue {
        name: "LMRWeight".to_string(),
        value: 579.49,
    };
    assert_eq!(v.rounded(), 579);
}

#[test]
fn test_validate_accepts_sane_spec() {
    assert!(lmr_weight().validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_specs() {
    let mut spec = lmr_weight();
    spec.default = 950.0;
    assert!(spec.validate().is_err());

    let mut spec = lmr_weight();
    spec.minval = 1000.0;
    assert!(spec.validate().is_err());

    let mut spec = lmr_weight();
    spec.delta = -1.0;
    assert!(spec.validate().is_err());

    let mut spec = lmr_weight();
    spec.apply_factor = f64::NAN;
    assert!(spec.validate().is_err());

    let mut spec = lmr_weight();
    spec.name = "  ".to_string();
    assert!(spec.validate().is_err());
}

#[test]
fn test_validate_rejects_duplicate_names() {
    let specs = vec![lmr_weight(), lmr_weight()];
    assert!(matches!(validate_variables(&specs), Err(TunerError::Config(_))));
    assert!(validate_variables(&[]).is_err());
    assert!(validate_variables(&[lmr_weight()]).is_ok());
}

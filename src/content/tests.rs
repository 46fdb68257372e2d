//! Content domain: unit tests for tuning loading and validation.

use std::path::Path;

use super::{
    ContentLoadError, MAX_STRIKER_COUNT, load_tuning, parse_tuning, resolve_tuning,
    validate_tuning,
};
use crate::movement::{Capabilities, MovementTuning};

#[test]
fn test_shipped_tuning_parses_and_validates() {
    let contents = include_str!("../../assets/data/movement.ron");
    let tuning = parse_tuning("movement.ron", contents).expect("shipped tuning should parse");

    assert!(validate_tuning(&tuning).is_empty());
    assert!(tuning.capabilities.barrage);
    assert_eq!(tuning.striker_count, 3);
}

#[test]
fn test_missing_fields_keep_defaults() {
    let tuning = parse_tuning("partial.ron", "(walk_speed: 400.0)").expect("partial tuning");

    let defaults = MovementTuning::default();
    assert_eq!(tuning.walk_speed, 400.0);
    assert_eq!(tuning.jump_force, defaults.jump_force);
    assert_eq!(tuning.capabilities, defaults.capabilities);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("broken.ron", "(walk_speed: )").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().contains("broken.ron"));
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_tuning(Path::new("does/not/exist.ron")).unwrap_err();
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_negative_and_non_finite_values_rejected() {
    let tuning = MovementTuning {
        coyote_time: -0.1,
        dash_force: f32::NAN,
        slide_speed: f32::INFINITY,
        ..Default::default()
    };

    let errors = validate_tuning(&tuning);
    let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
    assert_eq!(errors.len(), 3);
    assert!(fields.contains(&"coyote_time"));
    assert!(fields.contains(&"dash_force"));
    assert!(fields.contains(&"slide_speed"));
}

#[test]
fn test_wall_jump_control_capped_at_full() {
    let tuning = MovementTuning {
        wall_jump_control: 1.5,
        ..Default::default()
    };

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "wall_jump_control");
}

#[test]
fn test_invalid_tuning_falls_back_to_defaults() {
    let invalid = MovementTuning {
        jump_force: -10.0,
        ..Default::default()
    };
    assert_eq!(resolve_tuning(Ok(invalid)), MovementTuning::default());

    let failed = Err(ContentLoadError {
        file: "movement.ron".to_string(),
        message: "IO error: missing".to_string(),
    });
    assert_eq!(resolve_tuning(failed), MovementTuning::default());

    let custom = MovementTuning {
        walk_speed: 250.0,
        ..Default::default()
    };
    assert_eq!(resolve_tuning(Ok(custom.clone())), custom);
}

#[test]
fn test_striker_count_is_bounded() {
    let tuning = MovementTuning {
        striker_count: MAX_STRIKER_COUNT + 1,
        ..Default::default()
    };

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "striker_count");

    let at_limit = MovementTuning {
        striker_count: MAX_STRIKER_COUNT,
        ..Default::default()
    };
    assert!(validate_tuning(&at_limit).is_empty());
}

#[test]
fn test_barrage_needs_positive_strike_rate() {
    let barrage = Capabilities {
        barrage: true,
        ..Default::default()
    };
    let tuning = MovementTuning {
        strike_rate: 0.0,
        capabilities: barrage,
        ..Default::default()
    };

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "strike_rate");

    // A zero rate is harmless when only one probe can fire
    let single = MovementTuning {
        strike_rate: 0.0,
        ..Default::default()
    };
    assert!(validate_tuning(&single).is_empty());

    let one_striker = MovementTuning {
        striker_count: 1,
        ..tuning
    };
    assert!(validate_tuning(&one_striker).is_empty());
}

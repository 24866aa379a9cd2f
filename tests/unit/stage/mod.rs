use super::*;

#[test]
fn thirds_map_to_stages_with_closed_upper_bounds() {
    assert_eq!(stage_for_progress(0.0, 3), -1);
    assert_eq!(stage_for_progress(0.01, 3), 0);
    assert_eq!(stage_for_progress(300.0 / 900.0, 3), 0);
    assert_eq!(stage_for_progress(0.34, 3), 1);
    assert_eq!(stage_for_progress(600.0 / 900.0, 3), 1);
    assert_eq!(stage_for_progress(0.7, 3), 2);
    assert_eq!(stage_for_progress(1.0, 3), 2);
}

#[test]
fn degenerate_inputs_stay_in_range() {
    assert_eq!(stage_for_progress(0.5, 0), -1);
    assert_eq!(stage_for_progress(f64::NAN, 3), -1);
    assert_eq!(stage_for_progress(-1.0, 3), -1);
    assert_eq!(stage_for_progress(7.0, 3), 2);
    assert_eq!(stage_for_progress(1e-12, 3), 0);
}

#[test]
fn snapshot_defaults_to_reset_state() {
    let s = StageSnapshot::default();
    assert_eq!((s.last_stage, s.active_index, s.image_stage), (-1, -1, 0));
}

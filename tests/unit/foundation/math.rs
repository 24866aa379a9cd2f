use super::*;

#[test]
fn inverse_lerp_zero_width_is_a_step() {
    assert_eq!(inverse_lerp(10.0, 10.0, 9.0), 0.0);
    assert_eq!(inverse_lerp(10.0, 10.0, 10.0), 0.0);
    assert_eq!(inverse_lerp(10.0, 10.0, 10.5), 1.0);
}

#[test]
fn lerp_and_inverse_agree() {
    let t = inverse_lerp(100.0, 300.0, 150.0);
    assert!(approx_eq(t, 0.25, 1e-12));
    assert!(approx_eq(lerp(100.0, 300.0, t), 150.0, 1e-12));
}

#[test]
fn clamp01_handles_nan() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(3.0), 1.0);
    assert_eq!(clamp01(-1.0), 0.0);
}

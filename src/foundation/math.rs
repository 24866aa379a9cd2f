pub(crate) const EPSILON: f64 = 1e-9;

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` inside `[a, b]`, unclamped. A zero-width range maps everything past `a` to 1.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    let span = b - a;
    if span.abs() < EPSILON {
        return if v > a { 1.0 } else { 0.0 };
    }
    (v - a) / span
}

pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

//! Easing functions for time-based animations.

/// Linear interpolation between two values.
#[inline]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 { (end - start).mul_add(t, start) }

/// Ease-out (fast start, decelerates): `1 - (1 - t)^3`.
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t1 = t - 1.0;
    (t1 * t1).mul_add(t1, 1.0)
}

/// Interpolates a pixel dimension and rounds to the nearest pixel.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn lerp_px(start: u32, end: u32, t: f64) -> u32 {
    lerp(f64::from(start), f64::from(end), t).round().max(0.0) as u32
}

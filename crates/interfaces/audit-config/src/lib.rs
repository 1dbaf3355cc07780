//! Central configuration constants for scan timing and presentation defaults.

/// Default playback speed for a scan (1.0 = catalog offsets as written).
pub const DEFAULT_SPEED: f64 = 1.0;

/// Slowest allowed playback speed.
pub const MIN_SPEED: f64 = 0.1;

/// Fastest allowed playback speed.
pub const MAX_SPEED: f64 = 50.0;

/// Redraw interval for terminal presenters, in milliseconds.
pub const RENDER_TICK_MS: u64 = 100;

/// Name reported for the built-in catalog.
pub const DEFAULT_CATALOG_NAME: &str = "shadow-audit";

/// Clamp a requested speed into the allowed range. Non-finite input falls back to the default.
pub fn clamp_speed(v: f64) -> f64 {
    if !v.is_finite() {
        return DEFAULT_SPEED;
    }
    v.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_speed_bounds() {
        assert_eq!(clamp_speed(0.0), MIN_SPEED);
        assert_eq!(clamp_speed(1000.0), MAX_SPEED);
        assert_eq!(clamp_speed(2.5), 2.5);
        assert_eq!(clamp_speed(f64::NAN), DEFAULT_SPEED);
    }
}

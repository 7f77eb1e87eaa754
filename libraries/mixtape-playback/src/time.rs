//! Time labels and progress math

/// Render seconds as `MM:SS`
///
/// Fractions are truncated. NaN, infinite and negative inputs render as
/// `00:00`. Minutes are not wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Render time left as `-MM:SS`
pub fn format_remaining(current: f64, duration: Option<f64>) -> String {
    let remaining = match known_duration(duration) {
        Some(duration) => (duration - current).max(0.0),
        None => 0.0,
    };
    format!("-{}", format_time(remaining))
}

/// Progress through the track as a percentage
///
/// Zero while the duration is unknown. Not clamped: a position past the
/// end (after an unclamped seek) reads above 100.
pub fn progress_percent(current: f64, duration: Option<f64>) -> f64 {
    match known_duration(duration) {
        Some(duration) if duration > 0.0 && current.is_finite() => current / duration * 100.0,
        _ => 0.0,
    }
}

/// Convert a click on the progress track into a seek percentage
///
/// `offset_x` is measured from the left edge of the track. The result is
/// clamped to `[0, 100]`; a collapsed track yields `None`.
pub fn click_percentage(offset_x: f64, width: f64) -> Option<f64> {
    if !width.is_finite() || width <= 0.0 || !offset_x.is_finite() {
        return None;
    }
    Some((offset_x / width * 100.0).clamp(0.0, 100.0))
}

/// Duration filtered down to a usable finite value
pub fn known_duration(duration: Option<f64>) -> Option<f64> {
    duration.filter(|d| d.is_finite() && *d >= 0.0)
}

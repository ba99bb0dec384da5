//! Compact vector formatting for trace and debug logs.

use itertools::Itertools;
use num_complex::Complex64;

pub fn format_f64_vec(x: &[f64]) -> String {
    format!("[{}]", x.iter().map(|v| format!("{:.6}", v)).join(", "))
}

/// Formats complex values as `re+jim`.
pub fn format_rect_vec(x: &[Complex64]) -> String {
    format!(
        "[{}]",
        x.iter()
            .map(|v| format!("{:.6}{:+.6}j", v.re, v.im))
            .join(", ")
    )
}

/// Formats complex values as `magnitude∠degrees`.
pub fn format_polar_vec(x: &[Complex64]) -> String {
    format!(
        "[{}]",
        x.iter()
            .map(|v| format!("{:.6}∠{:.4}°", v.norm(), v.arg().to_degrees()))
            .join(", ")
    )
}

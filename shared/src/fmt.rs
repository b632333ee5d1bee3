//! Presentation formatting for confidence values.

/// Renders a confidence for display with one decimal place.
///
/// The API has no settled scale: some deployments send a 0-1 fraction, others
/// an already-scaled 0-100 percentage. Values above 1 are taken as
/// percentages, everything else is scaled by 100. This is a compatibility
/// shim and is lossy at exactly 1.0 (a fractional 100% reads as 1.0%).
pub fn format_confidence(raw: f64) -> String {
    let percent = if raw > 1.0 { raw } else { raw * 100.0 };
    format!("{percent:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_confidence_is_scaled() {
        assert_eq!(format_confidence(0.87), "87.0");
        assert_eq!(format_confidence(0.5), "50.0");
        assert_eq!(format_confidence(0.005), "0.5");
    }

    #[test]
    fn percentage_confidence_passes_through() {
        assert_eq!(format_confidence(87.0), "87.0");
        assert_eq!(format_confidence(100.0), "100.0");
        assert_eq!(format_confidence(12.34), "12.3");
    }

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(format_confidence(0.0), "0.0");
    }

    #[test]
    fn boundary_value_reads_as_fraction() {
        // Known ambiguity: exactly 1.0 is treated as the fractional scale.
        assert_eq!(format_confidence(1.0), "100.0");
        assert_eq!(format_confidence(1.01), "1.0");
    }
}

//! Output rendering for the estimate.

use prh_core::{Estimate, round_to_half_hour};

/// Renders the one-line human-readable summary.
#[must_use]
pub fn render_text(estimate: &Estimate, round: bool) -> String {
    if round {
        format!(
            "Total active hours: {:.1}",
            round_to_half_hour(estimate.hours)
        )
    } else {
        format!("Total active hours: {:.2}", estimate.hours)
    }
}

/// Renders the estimate and its session breakdown as pretty JSON.
pub fn render_json(estimate: &Estimate) -> serde_json::Result<String> {
    serde_json::to_string_pretty(estimate)
}

#[cfg(test)]
mod tests {
    use prh_core::{EstimatorConfig, estimate_active_hours};

    use super::*;

    fn two_hour_estimate() -> Estimate {
        use chrono::{Duration, TimeZone, Utc};
        use prh_core::Commit;

        let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let commits: Vec<Commit> = [0, 300, 3600, 7200]
            .iter()
            .enumerate()
            .map(|(i, &secs)| Commit::new(format!("sha-{i}"), base + Duration::seconds(secs)))
            .collect();
        estimate_active_hours(&commits, &EstimatorConfig::default())
    }

    #[test]
    fn text_output_has_two_decimals() {
        assert_eq!(
            render_text(&two_hour_estimate(), false),
            "Total active hours: 2.00"
        );
    }

    #[test]
    fn rounded_output_has_one_decimal() {
        assert_eq!(
            render_text(&two_hour_estimate(), true),
            "Total active hours: 2.0"
        );
    }

    #[test]
    fn json_output_includes_breakdown() {
        let rendered = render_json(&two_hour_estimate()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["active_secs"], 7200);
        assert_eq!(value["sessions"].as_array().unwrap().len(), 1);
    }
}

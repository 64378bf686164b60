//! Per-run classification summary

use riskgate_core::ClassificationResult;
use riskgate_telemetry::{MetricsCollector, MetricsSnapshot};
use tracing::info;

/// Record a finished classification and log the counters at `info`
pub fn log_run_summary(result: &ClassificationResult) -> MetricsSnapshot {
    let metrics = MetricsCollector::new();
    metrics.record(result);
    let snapshot = metrics.snapshot();

    info!(
        tier = result.risk_level.key(),
        gpai = snapshot.gpai,
        warnings = snapshot.warnings,
        exceptions_documented = snapshot.exceptions_documented,
        deadlines = result.applicable_deadlines.len(),
        "Classification complete"
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use riskgate_core::{ClassificationInput, HighRiskDomain, RiskTier};
    use riskgate_rules::classify;

    #[test]
    fn test_run_summary_counts_one_classification() {
        let input = ClassificationInput {
            narrow_procedural_task: true,
            emotion_recognition_work_education: true,
            emotion_recognition_medical_safety: true,
            ..ClassificationInput::new("Sorter", "ACME", "Sortiert Bewerbungseingänge")
                .with_domain(HighRiskDomain::Employment, None)
                .with_reference_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
                .with_gpai(false)
        };
        let result = classify(&input);
        let snapshot = log_run_summary(&result);

        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.tier(result.risk_level), 1);
        assert_eq!(snapshot.tier(RiskTier::High), 0);
        assert_eq!(snapshot.gpai, 1);
        assert_eq!(snapshot.warnings, 1);
        assert_eq!(snapshot.exceptions_documented, 1);
    }
}

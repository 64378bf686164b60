//! End-to-end classification scenarios

use chrono::NaiveDate;
use riskgate_core::{
    BiometricException, ClassificationInput, ContentMedium, DeadlineKey, HighRiskDomain, RiskTier,
};
use riskgate_rules::classify;
use riskgate_rules::tables::{
    DATA_PROTECTION_OBLIGATION, HIGH_RISK_OBLIGATIONS, MINIMAL_OBLIGATIONS,
    UNACCEPTABLE_OBLIGATIONS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn system(on: NaiveDate) -> ClassificationInput {
    ClassificationInput::new("X", "Y", "Z").with_reference_date(on)
}

fn deadline_keys(result: &riskgate_core::ClassificationResult) -> Vec<DeadlineKey> {
    result.applicable_deadlines.keys().copied().collect()
}

#[test]
fn test_nothing_set_is_minimal() {
    let result = classify(&system(date(2026, 9, 1)));

    assert_eq!(result.risk_level, RiskTier::Minimal);
    assert_eq!(result.obligations, MINIMAL_OBLIGATIONS.to_vec());
    assert_eq!(result.universal_obligations.len(), 2);
    assert!(result.universal_obligations[0].contains("KI-Kompetenz"));
    assert_eq!(deadline_keys(&result), vec![DeadlineKey::AiLiteracy]);
    assert!(result.applicable_articles.is_empty());
    assert!(!result.exception_documentation_required);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_social_scoring_is_prohibited() {
    let input = ClassificationInput {
        performs_social_scoring: true,
        ..system(date(2025, 3, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Unacceptable);
    assert!(result.is_prohibited());
    assert!(result.reasons.iter().any(|r| r.contains("Artikel 5(1)(c)")));
    assert_eq!(result.applicable_articles, vec!["Artikel 5(1)(c)"]);
    assert_eq!(result.obligations, UNACCEPTABLE_OBLIGATIONS.to_vec());
    assert_eq!(
        deadline_keys(&result),
        vec![DeadlineKey::ProhibitedPractices, DeadlineKey::AiLiteracy]
    );
}

#[test]
fn test_social_scoring_before_prohibition_date() {
    let input = ClassificationInput {
        performs_social_scoring: true,
        ..system(date(2025, 1, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Minimal);
    assert_eq!(
        result.universal_obligations,
        vec![DATA_PROTECTION_OBLIGATION.to_string()]
    );
    assert!(result.applicable_deadlines.is_empty());
}

#[test]
fn test_domain_exception_avoids_high_risk() {
    let input = ClassificationInput {
        narrow_procedural_task: true,
        ..system(date(2026, 9, 1)).with_domain(HighRiskDomain::Employment, None)
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Minimal);
    assert!(result.exception_documentation_required);
    assert!(result
        .reasons
        .iter()
        .any(|r| r.contains("Enge verfahrenstechnische Aufgabe")));
    assert!(result.reasons.last().unwrap().contains("nach Anwendung der Ausnahme"));
    assert!(result
        .applicable_deadlines
        .contains_key(&DeadlineKey::HighRiskAnnexIii));
}

#[test]
fn test_domain_exception_with_chatbot_is_limited() {
    let input = ClassificationInput {
        improves_human_work: true,
        interacts_with_humans: true,
        ..system(date(2026, 9, 1)).with_domain(HighRiskDomain::Education, None)
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Limited);
    assert!(result.exception_documentation_required);
    assert!(result.reasons[0].starts_with("Ausnahme angewendet"));
    assert!(result.reasons[1].starts_with("Transparenzpflicht ausgelöst"));
    assert_eq!(result.transparency_obligations.len(), 1);
}

#[test]
fn test_chatbot_with_video_content_is_limited() {
    let input = ClassificationInput {
        interacts_with_humans: true,
        generates_synthetic_content: true,
        synthetic_content_types: [ContentMedium::Video].into_iter().collect(),
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Limited);
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("Video") && r.contains("Persistentes")));
    assert!(result
        .recommendations
        .iter()
        .any(|r| r.contains("Live-Video")));
    assert_eq!(result.applicable_articles, vec!["Artikel 50(1)", "Artikel 50(2)"]);
    assert!(result
        .applicable_deadlines
        .contains_key(&DeadlineKey::Transparency));
}

#[test]
fn test_realtime_biometrics_with_exception_is_high() {
    let input = ClassificationInput {
        realtime_biometric_public: true,
        realtime_biometric_exception: Some(BiometricException::VictimSearch),
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::High);
    assert!(result
        .applicable_articles
        .contains(&"Artikel 5(1)(h)(i)".to_string()));
    assert!(!result.exception_documentation_required);
}

#[test]
fn test_realtime_biometrics_without_exception_is_prohibited() {
    let input = ClassificationInput {
        realtime_biometric_public: true,
        ..system(date(2026, 9, 1))
    };

    assert_eq!(classify(&input).risk_level, RiskTier::Unacceptable);
}

#[test]
fn test_realtime_exception_waits_for_annex_iii_date() {
    let input = ClassificationInput {
        realtime_biometric_public: true,
        realtime_biometric_exception: Some(BiometricException::ImminentThreat),
        ..system(date(2025, 3, 1))
    };

    assert_eq!(classify(&input).risk_level, RiskTier::Minimal);
}

#[test]
fn test_regulated_product_carries_transparency_overlay() {
    let input = ClassificationInput {
        is_product_annex_i: true,
        requires_third_party_assessment: true,
        annex_i_product_type: Some("Medizinprodukte (Klasse IIa und höher)".to_string()),
        interacts_with_humans: true,
        ..system(date(2027, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::High);
    assert_eq!(result.obligations, HIGH_RISK_OBLIGATIONS.to_vec());
    assert_eq!(result.recommendations.len(), 7);
    assert_eq!(result.transparency_obligations.len(), 1);
    assert_eq!(result.applicable_articles, vec!["Artikel 6(1)", "Anhang I"]);
    assert_eq!(
        deadline_keys(&result),
        vec![
            DeadlineKey::AiLiteracy,
            DeadlineKey::Transparency,
            DeadlineKey::HighRiskAnnexI,
        ]
    );

    let earlier = classify(&input.with_reference_date(date(2026, 9, 1)));
    assert_eq!(earlier.risk_level, RiskTier::Limited);
}

#[test]
fn test_profiling_keeps_domain_high() {
    let input = ClassificationInput {
        performs_profiling: true,
        narrow_procedural_task: true,
        improves_human_work: true,
        detects_patterns_only: true,
        preparatory_task_only: true,
        generates_deepfakes: true,
        ..system(date(2026, 9, 1))
            .with_domain(HighRiskDomain::EssentialServices, Some("Kreditwürdigkeitsprüfung"))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::High);
    assert!(!result.exception_documentation_required);
    assert!(result.reasons.iter().any(|r| r.contains("Profiling")));
    assert!(result
        .transparency_obligations
        .iter()
        .any(|o| o.starts_with("Art. 50(4)")));
}

#[test]
fn test_exception_reasons_survive_special_case_high() {
    let input = ClassificationInput {
        preparatory_task_only: true,
        predictive_policing_with_objective_facts: true,
        ..system(date(2026, 9, 1)).with_domain(HighRiskDomain::LawEnforcement, None)
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::High);
    assert!(!result.exception_documentation_required);
    assert!(result.reasons[0].starts_with("Ausnahme angewendet"));
    assert!(result
        .applicable_articles
        .contains(&"Anhang III, Nr. 6(d)".to_string()));
}

#[test]
fn test_conflicting_predictive_policing_resolves_to_high() {
    let input = ClassificationInput {
        predictive_policing_only_profiling: true,
        predictive_policing_with_objective_facts: true,
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::High);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.has_warnings());
}

#[test]
fn test_conflicting_emotion_recognition_resolves_to_limited() {
    let input = ClassificationInput {
        emotion_recognition_work_education: true,
        emotion_recognition_medical_safety: true,
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Limited);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.applicable_articles, vec!["Artikel 50(3)"]);
}

#[test]
fn test_conflicting_biometric_categorization_is_prohibited() {
    let input = ClassificationInput {
        biometric_categorization_sensitive: true,
        biometric_categorization_lawful: true,
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Unacceptable);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.transparency_obligations.is_empty());
}

#[test]
fn test_gpai_overlay_on_prohibited_system() {
    let input = ClassificationInput {
        scrapes_facial_recognition: true,
        ..system(date(2025, 9, 1)).with_gpai(true)
    };

    let result = classify(&input);
    assert_eq!(result.risk_level, RiskTier::Unacceptable);
    assert!(result.gpai_has_systemic_risk);
    assert_eq!(result.gpai_obligations.len(), 9);
    assert!(result.applicable_deadlines.contains_key(&DeadlineKey::Gpai));
    assert_eq!(result.obligations, UNACCEPTABLE_OBLIGATIONS.to_vec());
}

#[test]
fn test_gpai_overlay_on_minimal_system() {
    let result = classify(&system(date(2026, 9, 1)).with_gpai(false));

    assert_eq!(result.risk_level, RiskTier::Minimal);
    assert!(!result.gpai_has_systemic_risk);
    assert_eq!(result.gpai_obligations.len(), 4);
    assert_eq!(result.obligations.len(), 1 + 4);
    assert!(result.reasons.iter().any(|r| r.starts_with("GPAI-Modell")));
}

#[test]
fn test_systemic_risk_without_gpai_is_ignored() {
    let input = ClassificationInput {
        gpai_has_systemic_risk: true,
        ..system(date(2026, 9, 1))
    };

    let result = classify(&input);
    assert!(!result.gpai_has_systemic_risk);
    assert!(result.gpai_obligations.is_empty());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_unknown_domain_key_is_treated_as_absent() {
    let input = ClassificationInput::from_yaml(
        r#"
system_name: X
provider: Y
system_description: Z
high_risk_domain: space_mining
synthetic_content_types: [video, hologram]
reference_date: 2026-09-01
"#,
    )
    .unwrap();

    assert_eq!(input.high_risk_domain, None);
    assert_eq!(input.synthetic_content_types.len(), 1);
    assert_eq!(classify(&input).risk_level, RiskTier::Minimal);
}

#[test]
fn test_result_serializes_deadline_keys() {
    let input = ClassificationInput {
        interacts_with_humans: true,
        ..system(date(2026, 9, 1))
    };

    let value = serde_json::to_value(classify(&input)).unwrap();
    assert_eq!(value["risk_level"], "limited");
    assert_eq!(value["applicable_deadlines"]["ki_kompetenz"], "2025-02-02");
    assert_eq!(value["applicable_deadlines"]["transparenzpflichten"], "2026-08-02");
    assert_eq!(value["reference_date"], "2026-09-01");
}

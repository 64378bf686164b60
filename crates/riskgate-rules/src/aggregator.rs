//! Tier-independent overlays
//!
//! Helpers that decorate a verdict regardless of which tier was reached:
//! conflict warnings, cumulative Article 50 duties, GPAI duties, and the
//! universal duties every AI system carries.

use chrono::NaiveDate;
use riskgate_core::{ClassificationInput, ContentMedium, DeadlineKey};
use std::collections::BTreeSet;
use tracing::warn;

use crate::tables::{
    marking_entry, TransparencyTrigger, AI_ACT_DEADLINES, AI_LITERACY_OBLIGATION,
    DATA_PROTECTION_OBLIGATION, GPAI_OBLIGATIONS, GPAI_SYSTEMIC_RISK_OBLIGATIONS,
};

/// Detect contradictory answers
///
/// Contradictions never block evaluation; each warning states which answer
/// takes precedence.
pub fn conflict_warnings(input: &ClassificationInput) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.emotion_recognition_work_education && input.emotion_recognition_medical_safety {
        warnings.push(
            "Widersprüchliche Angaben: Emotionserkennung am Arbeitsplatz/in Bildung und \
             Emotionserkennung für medizinische/Sicherheitszwecke gleichzeitig ausgewählt. \
             Die medizinische/sicherheitsrelevante Nutzung hat Vorrang, das Verbot nach \
             Artikel 5(1)(f) wird nicht angewendet."
                .to_string(),
        );
    }

    if input.biometric_categorization_sensitive && input.biometric_categorization_lawful {
        warnings.push(
            "Widersprüchliche Angaben: Sensible und rechtmäßige biometrische Kategorisierung \
             gleichzeitig ausgewählt. Die sensible Kategorisierung hat Vorrang, das Verbot nach \
             Artikel 5(1)(g) wird angewendet."
                .to_string(),
        );
    }

    if input.predictive_policing_only_profiling && input.predictive_policing_with_objective_facts {
        warnings.push(
            "Widersprüchliche Angaben: Predictive Policing ausschließlich auf Basis von Profiling \
             und auf Basis objektiver Fakten gleichzeitig ausgewählt. Die Variante mit objektiven \
             Fakten hat Vorrang, das System wird als Hochrisiko statt als verboten eingestuft."
                .to_string(),
        );
    }

    if input.realtime_biometric_exception.is_some() && !input.realtime_biometric_public {
        warnings.push(
            "Ausnahme für Echtzeit-Biometrie angegeben, obwohl keine Echtzeit-Fernidentifizierung \
             ausgewählt ist. Die Ausnahme wird ignoriert."
                .to_string(),
        );
    }

    if input.gpai_has_systemic_risk && !input.is_gpai {
        warnings.push(
            "Systemisches Risiko angegeben, obwohl das System nicht als GPAI-Modell markiert ist. \
             Die Angabe wird ignoriert."
                .to_string(),
        );
    }

    for warning in &warnings {
        warn!(system = %input.system_name, "{}", warning);
    }

    warnings
}

/// Article 50 triggers set in the input, in evaluation order
pub fn fired_transparency_triggers(input: &ClassificationInput) -> Vec<TransparencyTrigger> {
    TransparencyTrigger::ALL
        .into_iter()
        .filter(|trigger| match trigger {
            TransparencyTrigger::Chatbot => input.interacts_with_humans,
            TransparencyTrigger::Deepfake => input.generates_deepfakes,
            TransparencyTrigger::AiGeneratedContent => input.generates_synthetic_content,
            TransparencyTrigger::EmotionRecognitionAllowed => {
                input.emotion_recognition_medical_safety
            }
            TransparencyTrigger::BiometricCategorizationAllowed => {
                input.biometric_categorization_lawful
            }
        })
        .collect()
}

/// Cumulative transparency duties
///
/// One line per fired trigger, followed by medium-specific marking methods
/// when synthetic content is generated and media were named.
pub fn transparency_obligations(input: &ClassificationInput) -> Vec<String> {
    let mut obligations: Vec<String> = fired_transparency_triggers(input)
        .iter()
        .map(|trigger| trigger.obligation().to_string())
        .collect();

    if input.generates_synthetic_content {
        obligations.extend(marking_guidance(&input.synthetic_content_types));
    }

    obligations
}

/// Code-of-Practice marking methods for the given media
pub fn marking_guidance(media: &BTreeSet<ContentMedium>) -> Vec<String> {
    media
        .iter()
        .flat_map(|medium| {
            let entry = marking_entry(*medium);
            entry
                .methods
                .iter()
                .map(move |method| format!("Code of Practice ({}): {}", entry.name, method))
        })
        .collect()
}

/// GPAI duties, extended when the model carries systemic risk
pub fn gpai_obligations(systemic_risk: bool) -> Vec<String> {
    let mut obligations: Vec<String> = GPAI_OBLIGATIONS.iter().map(|s| s.to_string()).collect();

    if systemic_risk {
        obligations.extend(GPAI_SYSTEMIC_RISK_OBLIGATIONS.iter().map(|s| s.to_string()));
    }

    obligations
}

/// Duties applying to every AI system on the given date
///
/// Returns the obligations together with the deadline keys they stem from.
pub fn universal_obligations(on: NaiveDate) -> (Vec<String>, Vec<DeadlineKey>) {
    let mut obligations = Vec::new();
    let mut deadlines = Vec::new();

    if AI_ACT_DEADLINES.applies(DeadlineKey::AiLiteracy, on) {
        obligations.push(AI_LITERACY_OBLIGATION.to_string());
        deadlines.push(DeadlineKey::AiLiteracy);
    }

    obligations.push(DATA_PROTECTION_OBLIGATION.to_string());

    (obligations, deadlines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ClassificationInput {
        ClassificationInput::new("X", "Y", "Z")
    }

    #[test]
    fn test_no_conflicts_for_clean_input() {
        assert!(conflict_warnings(&input()).is_empty());
    }

    #[test]
    fn test_each_contradictory_pair_warns_once() {
        let input = ClassificationInput {
            emotion_recognition_work_education: true,
            emotion_recognition_medical_safety: true,
            biometric_categorization_sensitive: true,
            biometric_categorization_lawful: true,
            predictive_policing_only_profiling: true,
            predictive_policing_with_objective_facts: true,
            ..input()
        };

        let warnings = conflict_warnings(&input);
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("Artikel 5(1)(f)"));
        assert!(warnings[1].contains("Artikel 5(1)(g)"));
        assert!(warnings[2].contains("objektiver"));
    }

    #[test]
    fn test_dangling_selectors_warn() {
        let input = ClassificationInput {
            realtime_biometric_exception: Some(riskgate_core::BiometricException::VictimSearch),
            gpai_has_systemic_risk: true,
            ..input()
        };

        assert_eq!(conflict_warnings(&input).len(), 2);
    }

    #[test]
    fn test_marking_lines_need_synthetic_flag() {
        let mut input = ClassificationInput {
            interacts_with_humans: true,
            synthetic_content_types: [ContentMedium::Image].into_iter().collect(),
            ..input()
        };
        assert_eq!(transparency_obligations(&input).len(), 1);

        input.generates_synthetic_content = true;
        let obligations = transparency_obligations(&input);
        assert_eq!(obligations.len(), 2 + 3);
        assert!(obligations[2].starts_with("Code of Practice (Bild)"));
    }

    #[test]
    fn test_marking_guidance_follows_medium_order() {
        let media: BTreeSet<_> = [ContentMedium::Text, ContentMedium::Video].into_iter().collect();
        let lines = marking_guidance(&media);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("(Video)"));
        assert!(lines[3].contains("(Text)"));
    }

    #[test]
    fn test_gpai_catalog_sizes() {
        assert_eq!(gpai_obligations(false).len(), 4);
        assert_eq!(gpai_obligations(true).len(), 9);
    }

    #[test]
    fn test_universal_obligations_gate_ai_literacy() {
        let before = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();

        let (obligations, deadlines) = universal_obligations(before);
        assert_eq!(obligations, vec![DATA_PROTECTION_OBLIGATION.to_string()]);
        assert!(deadlines.is_empty());

        let (obligations, deadlines) = universal_obligations(after);
        assert_eq!(obligations.len(), 2);
        assert_eq!(deadlines, vec![DeadlineKey::AiLiteracy]);
    }
}

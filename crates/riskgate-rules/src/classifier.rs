//! Risk-tier classification
//!
//! Walks the decision tree in fixed priority order:
//!
//! 1. Prohibited practices (Article 5) → `Unacceptable`
//! 2. Regulated products (Article 6(1), Annex I) → `High`
//! 3. Annex III domains with Article 6(3) carve-outs → `High`
//! 4. Transparency triggers (Article 50) → `Limited`
//! 5. Fallback → `Minimal`
//!
//! Each phase is gated by its application date and produces its own
//! [`Findings`]; the first terminal phase wins. Conflict warnings, universal
//! duties, GPAI duties, cumulative transparency duties, and the deadline map
//! are merged in once, after the tier is known.

use chrono::{DateTime, NaiveDate, Utc};
use riskgate_core::{ClassificationInput, ClassificationResult, DeadlineKey, RiskTier};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::aggregator::{
    conflict_warnings, fired_transparency_triggers, gpai_obligations, marking_guidance,
    transparency_obligations, universal_obligations,
};
use crate::tables::{
    biometric_exception_entry, domain_entry, DomainException, ProhibitedPractice,
    AI_ACT_DEADLINES, HIGH_RISK_OBLIGATIONS, HIGH_RISK_RECOMMENDATIONS, LIMITED_OBLIGATIONS,
    LIMITED_RECOMMENDATIONS, MINIMAL_OBLIGATIONS, MINIMAL_RECOMMENDATIONS,
    UNACCEPTABLE_OBLIGATIONS, UNACCEPTABLE_RECOMMENDATIONS,
};

/// Reasons, citations, and rule categories contributed by one phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// Human-readable reasons, in evaluation order
    pub reasons: Vec<String>,

    /// Citations, without duplicates
    pub articles: Vec<String>,

    /// Rule categories that contributed
    pub deadlines: Vec<DeadlineKey>,
}

impl Findings {
    /// Check if the phase contributed anything
    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Add a reason
    pub fn reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Add a citation unless already present
    pub fn article(&mut self, article: &str) {
        if !self.articles.iter().any(|a| a == article) {
            self.articles.push(article.to_string());
        }
    }

    /// Record a contributing rule category
    pub fn deadline(&mut self, key: DeadlineKey) {
        if !self.deadlines.contains(&key) {
            self.deadlines.push(key);
        }
    }

    /// Merge another phase's findings after this one
    pub fn merge(&mut self, other: Findings) {
        self.reasons.extend(other.reasons);
        for article in &other.articles {
            self.article(article);
        }
        for key in other.deadlines {
            self.deadline(key);
        }
    }
}

/// Outcome of the Annex III phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainOutcome {
    /// Findings placing the system in the high-risk tier
    pub high_risk: Option<Findings>,

    /// Article 6(3) carve-outs that kept the domain pathway from firing
    pub exemption: Option<Findings>,
}

/// Tier decision before the overlays are applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct Verdict {
    tier: RiskTier,
    findings: Findings,
    obligations: Vec<String>,
    recommendations: Vec<String>,
    exception_documented: bool,
}

impl Verdict {
    fn new(tier: RiskTier, findings: Findings, obligations: &[&str], recommendations: &[&str]) -> Self {
        Self {
            tier,
            findings,
            obligations: obligations.iter().map(|s| s.to_string()).collect(),
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
            exception_documented: false,
        }
    }
}

/// Classify an AI system as of today (or its reference date)
pub fn classify(input: &ClassificationInput) -> ClassificationResult {
    classify_at(input, Utc::now())
}

/// Classify an AI system, stamping the result with `now`
///
/// `now` also supplies the reference date when the input carries none.
pub fn classify_at(input: &ClassificationInput, now: DateTime<Utc>) -> ClassificationResult {
    let on = input.reference_date.unwrap_or_else(|| now.date_naive());
    debug!(system = %input.system_name, reference_date = %on, "Classifying AI system");

    let warnings = conflict_warnings(input);
    let verdict = evaluate(input, on);

    info!(
        system = %input.system_name,
        tier = ?verdict.tier,
        reasons = verdict.findings.reasons.len(),
        warnings = warnings.len(),
        "Classification complete"
    );

    finish(input, on, now, verdict, warnings)
}

fn evaluate(input: &ClassificationInput, on: NaiveDate) -> Verdict {
    if let Some(findings) = prohibited_practices(input, on) {
        return Verdict::new(
            RiskTier::Unacceptable,
            findings,
            &UNACCEPTABLE_OBLIGATIONS,
            &UNACCEPTABLE_RECOMMENDATIONS,
        );
    }

    if let Some(findings) = regulated_product(input, on) {
        return Verdict::new(
            RiskTier::High,
            findings,
            &HIGH_RISK_OBLIGATIONS,
            &HIGH_RISK_RECOMMENDATIONS,
        );
    }

    let domain = domain_pathway(input, on);
    let exception_claimed = domain.exemption.is_some();
    let mut carried = domain.exemption.unwrap_or_default();

    if let Some(findings) = domain.high_risk {
        carried.merge(findings);
        return Verdict::new(
            RiskTier::High,
            carried,
            &HIGH_RISK_OBLIGATIONS,
            &HIGH_RISK_RECOMMENDATIONS,
        );
    }

    if let Some(findings) = transparency_triggers(input, on) {
        carried.merge(findings);
        let mut verdict = Verdict::new(
            RiskTier::Limited,
            carried,
            &LIMITED_OBLIGATIONS,
            &LIMITED_RECOMMENDATIONS,
        );
        verdict
            .recommendations
            .extend(marking_guidance(&input.synthetic_content_types));
        verdict.exception_documented = exception_claimed;
        return verdict;
    }

    if exception_claimed {
        carried.reason(
            "Minimales Risiko nach Anwendung der Ausnahme nach Artikel 6(3): \
             keine weiteren Hochrisiko-Kriterien oder Transparenzpflichten anwendbar",
        );
    } else {
        carried.reason("Keine Hochrisiko-Kriterien oder Transparenzpflichten anwendbar");
    }

    let mut verdict = Verdict::new(
        RiskTier::Minimal,
        carried,
        &MINIMAL_OBLIGATIONS,
        &MINIMAL_RECOMMENDATIONS,
    );
    verdict.exception_documented = exception_claimed;
    verdict
}

/// Phase 1: Article 5 prohibitions
///
/// Returns `None` before the prohibitions apply or when none fires. The two
/// permitted variants (objective-facts policing, medical/safety emotion
/// recognition) suppress their prohibited counterparts; real-time biometric
/// identification is only prohibited without a recognized exception.
pub fn prohibited_practices(input: &ClassificationInput, on: NaiveDate) -> Option<Findings> {
    if !AI_ACT_DEADLINES.applies(DeadlineKey::ProhibitedPractices, on) {
        debug!("Prohibited practices not yet applicable");
        return None;
    }

    let mut findings = Findings::default();

    for practice in ProhibitedPractice::ALL {
        let fired = match practice {
            ProhibitedPractice::SubliminalManipulation => input.uses_subliminal_manipulation,
            ProhibitedPractice::ExploitationVulnerable => input.exploits_vulnerable_groups,
            ProhibitedPractice::SocialScoring => input.performs_social_scoring,
            ProhibitedPractice::PredictivePolicingProfiling => {
                input.predictive_policing_only_profiling
                    && !input.predictive_policing_with_objective_facts
            }
            ProhibitedPractice::FacialRecognitionScraping => input.scrapes_facial_recognition,
            ProhibitedPractice::EmotionRecognitionWorkEducation => {
                input.emotion_recognition_work_education
                    && !input.emotion_recognition_medical_safety
            }
            ProhibitedPractice::BiometricCategorizationSensitive => {
                input.biometric_categorization_sensitive
            }
            ProhibitedPractice::RealtimeBiometricPublic => {
                input.realtime_biometric_public && input.realtime_biometric_exception.is_none()
            }
        };

        if fired {
            let entry = practice.entry();
            debug!(practice = practice.key(), "Prohibited practice fired");
            findings.reason(format!(
                "Verbotene Praktik: {} ({}) - {}",
                entry.name, entry.article, entry.description
            ));
            findings.article(entry.article);
        }
    }

    if findings.is_empty() {
        None
    } else {
        findings.deadline(DeadlineKey::ProhibitedPractices);
        Some(findings)
    }
}

/// Phase 2: Pathway A, AI in products under Annex I legislation
pub fn regulated_product(input: &ClassificationInput, on: NaiveDate) -> Option<Findings> {
    if !AI_ACT_DEADLINES.applies(DeadlineKey::HighRiskAnnexI, on) {
        debug!("Annex I pathway not yet applicable");
        return None;
    }

    if !input.requires_third_party_assessment {
        return None;
    }

    let role = if input.is_safety_component_annex_i && input.is_product_annex_i {
        "Sicherheitskomponente eines Produkts und selbst ein reguliertes Produkt"
    } else if input.is_safety_component_annex_i {
        "Sicherheitskomponente eines regulierten Produkts"
    } else if input.is_product_annex_i {
        "selbst ein reguliertes Produkt"
    } else {
        return None;
    };

    let mut findings = Findings::default();
    findings.reason(format!("Hochrisiko Pathway A: KI-System ist {} nach Anhang I", role));
    findings.reason("Konformitätsbewertung durch Dritte (notifizierte Stelle) erforderlich");
    if let Some(category) = non_blank(&input.annex_i_product_type) {
        findings.reason(format!("Produktkategorie: {}", category));
    }
    findings.article("Artikel 6(1)");
    findings.article("Anhang I");
    findings.deadline(DeadlineKey::HighRiskAnnexI);

    debug!("Annex I pathway fired");
    Some(findings)
}

/// Phase 3: Pathway B, Annex III domains and the deferred special cases
///
/// Profiling disables every carve-out. Any number of carve-outs may apply at
/// once; a single one is enough to keep the domain pathway from firing. The
/// special cases (real-time biometrics under an exception, objective-facts
/// predictive policing) reach the high-risk tier without a domain selection.
pub fn domain_pathway(input: &ClassificationInput, on: NaiveDate) -> DomainOutcome {
    let mut outcome = DomainOutcome::default();

    if !AI_ACT_DEADLINES.applies(DeadlineKey::HighRiskAnnexIii, on) {
        debug!("Annex III pathway not yet applicable");
        return outcome;
    }

    let mut high = Findings::default();

    if let Some(domain) = input.high_risk_domain {
        let entry = domain_entry(domain);

        let applying: Vec<DomainException> = if input.performs_profiling {
            Vec::new()
        } else {
            DomainException::ALL
                .into_iter()
                .filter(|exception| match exception {
                    DomainException::NarrowProceduralTask => input.narrow_procedural_task,
                    DomainException::ImprovesHumanWork => input.improves_human_work,
                    DomainException::DetectsPatternsOnly => input.detects_patterns_only,
                    DomainException::PreparatoryTaskOnly => input.preparatory_task_only,
                })
                .collect()
        };

        if applying.is_empty() {
            high.reason(format!(
                "Hochrisiko Pathway B: Anwendungsbereich '{}'",
                entry.name
            ));
            if let Some(use_case) = non_blank(&input.high_risk_use_case) {
                high.reason(format!("Anwendungsfall: {}", use_case));
            }
            if input.performs_profiling {
                high.reason("Profiling natürlicher Personen - Ausnahmen nach Artikel 6(3) nicht anwendbar");
            }
            high.article(entry.article);
            high.article("Artikel 6(2)");
            high.deadline(DeadlineKey::HighRiskAnnexIii);
            debug!(domain = domain.key(), "Annex III pathway fired");
        } else {
            let mut exemption = Findings::default();
            for exception in &applying {
                exemption.reason(format!("Ausnahme angewendet: {}", exception.label()));
                exemption.article(exception.article());
            }
            exemption.deadline(DeadlineKey::HighRiskAnnexIii);
            debug!(
                domain = domain.key(),
                exceptions = applying.len(),
                "Annex III pathway exempted"
            );
            outcome.exemption = Some(exemption);
        }
    }

    if input.realtime_biometric_public {
        if let Some(exception) = input.realtime_biometric_exception {
            let entry = biometric_exception_entry(exception);
            high.reason(format!(
                "Echtzeit-Biometrie unter Ausnahme nach Artikel 5(2): {} - {}",
                entry.name, entry.description
            ));
            high.reason(
                "Vorherige Genehmigung durch eine Justizbehörde oder unabhängige Verwaltungsbehörde erforderlich (Artikel 5(3))",
            );
            high.article(entry.article);
            high.article("Artikel 5(2)");
            high.article("Anhang III, Nr. 1");
            high.deadline(DeadlineKey::HighRiskAnnexIii);
        }
    }

    if input.predictive_policing_with_objective_facts {
        high.reason(
            "Predictive Policing auf Basis objektiver, nachprüfbarer Fakten: nicht verboten, \
             aber Hochrisiko-Anwendung in der Strafverfolgung",
        );
        high.article("Anhang III, Nr. 6(d)");
        high.deadline(DeadlineKey::HighRiskAnnexIii);
    }

    if !high.is_empty() {
        outcome.high_risk = Some(high);
    }

    outcome
}

/// Phase 4: Article 50 transparency triggers
///
/// Shares the Annex III application date.
pub fn transparency_triggers(input: &ClassificationInput, on: NaiveDate) -> Option<Findings> {
    if !AI_ACT_DEADLINES.applies(DeadlineKey::Transparency, on) {
        debug!("Transparency duties not yet applicable");
        return None;
    }

    if !input.has_transparency_trigger() {
        return None;
    }
    let triggers = fired_transparency_triggers(input);

    let mut findings = Findings::default();
    for trigger in &triggers {
        findings.reason(format!("Transparenzpflicht ausgelöst: {}", trigger.description()));
        findings.article(trigger.article());
    }
    findings.deadline(DeadlineKey::Transparency);

    debug!(triggers = triggers.len(), "Transparency triggers fired");
    Some(findings)
}

fn finish(
    input: &ClassificationInput,
    on: NaiveDate,
    now: DateTime<Utc>,
    verdict: Verdict,
    warnings: Vec<String>,
) -> ClassificationResult {
    let Verdict {
        tier,
        findings,
        mut obligations,
        recommendations,
        exception_documented,
    } = verdict;
    let Findings {
        mut reasons,
        articles,
        deadlines: mut contributing,
    } = findings;

    let (universal, universal_keys) = universal_obligations(on);
    contributing.extend(universal_keys);

    let systemic_risk = input.is_gpai && input.gpai_has_systemic_risk;
    let gpai = if input.is_gpai {
        contributing.push(DeadlineKey::Gpai);
        gpai_obligations(systemic_risk)
    } else {
        Vec::new()
    };

    if tier == RiskTier::Minimal && input.is_gpai {
        reasons.push(
            "GPAI-Modell: Die Pflichten für Allzweck-KI-Modelle gelten unabhängig von der Risikostufe (Artikel 53)"
                .to_string(),
        );
        obligations.extend(gpai.iter().cloned());
    }

    let transparency = if matches!(tier, RiskTier::High | RiskTier::Limited)
        && AI_ACT_DEADLINES.applies(DeadlineKey::Transparency, on)
    {
        transparency_obligations(input)
    } else {
        Vec::new()
    };
    if !transparency.is_empty() {
        contributing.push(DeadlineKey::Transparency);
    }

    let applicable_deadlines: BTreeMap<DeadlineKey, NaiveDate> = contributing
        .into_iter()
        .map(|key| (key, AI_ACT_DEADLINES.date(key)))
        .collect();

    ClassificationResult {
        risk_level: tier,
        reasons,
        obligations,
        recommendations,
        applicable_articles: articles,
        timestamp: now,
        reference_date: on,
        is_gpai: input.is_gpai,
        gpai_has_systemic_risk: systemic_risk,
        gpai_obligations: gpai,
        transparency_obligations: transparency,
        universal_obligations: universal,
        applicable_deadlines,
        exception_documentation_required: exception_documented,
        warnings,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

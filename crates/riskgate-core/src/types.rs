//! Core types for RiskGate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::keys::{deserialize_lenient, deserialize_media};
use crate::{BiometricException, ContentMedium, Error, HighRiskDomain, Result};

/// Risk tier of an AI system
///
/// Variants are declared in ascending severity so the derived ordering gives
/// `Unacceptable > High > Limited > Minimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// No mandatory requirements beyond the universal ones
    Minimal,
    /// Transparency duties (Article 50)
    Limited,
    /// Full high-risk compliance regime
    High,
    /// Prohibited practice (Article 5)
    Unacceptable,
}

impl RiskTier {
    /// All tiers, most severe first
    pub const ALL: [Self; 4] = [Self::Unacceptable, Self::High, Self::Limited, Self::Minimal];

    /// Stable key as it appears in serialized results
    pub fn key(&self) -> &'static str {
        match self {
            Self::Unacceptable => "unacceptable",
            Self::High => "high",
            Self::Limited => "limited",
            Self::Minimal => "minimal",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unacceptable => "Unannehmbares Risiko (Verboten)",
            Self::High => "Hohes Risiko",
            Self::Limited => "Begrenztes Risiko",
            Self::Minimal => "Minimales Risiko",
        }
    }

    /// Colour code used by rendering layers
    pub fn color(&self) -> &'static str {
        match self {
            Self::Unacceptable => "#FF0000",
            Self::High => "#FFA500",
            Self::Limited => "#FFD700",
            Self::Minimal => "#00FF00",
        }
    }

    /// Short description of what the tier means
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unacceptable => "Verboten - Artikel 5",
            Self::High => "Strenge Compliance-Anforderungen",
            Self::Limited => "Transparenzpflichten",
            Self::Minimal => "Keine verpflichtenden Anforderungen",
        }
    }

    /// Maximum administrative fine for infringements at this tier
    pub fn max_penalty(&self) -> &'static str {
        match self {
            Self::Unacceptable => "Bis zu 35 Mio. EUR oder 7% des Umsatzes",
            Self::High => "Bis zu 15 Mio. EUR oder 3% des Umsatzes",
            Self::Limited => "Bis zu 7,5 Mio. EUR oder 1,5% des Umsatzes",
            Self::Minimal => "N/A",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rule category whose application date is reported in a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeadlineKey {
    #[serde(rename = "verbotene_praktiken")]
    ProhibitedPractices,
    #[serde(rename = "ki_kompetenz")]
    AiLiteracy,
    #[serde(rename = "gpai")]
    Gpai,
    #[serde(rename = "transparenzpflichten")]
    Transparency,
    #[serde(rename = "hochrisiko_anhang_iii")]
    HighRiskAnnexIii,
    #[serde(rename = "hochrisiko_anhang_i")]
    HighRiskAnnexI,
}

impl DeadlineKey {
    /// Stable key as it appears in serialized results
    pub fn key(&self) -> &'static str {
        match self {
            Self::ProhibitedPractices => "verbotene_praktiken",
            Self::AiLiteracy => "ki_kompetenz",
            Self::Gpai => "gpai",
            Self::Transparency => "transparenzpflichten",
            Self::HighRiskAnnexIii => "hochrisiko_anhang_iii",
            Self::HighRiskAnnexI => "hochrisiko_anhang_i",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProhibitedPractices => "Verbotene Praktiken (Art. 5)",
            Self::AiLiteracy => "KI-Kompetenz (Art. 4)",
            Self::Gpai => "GPAI-Modell-Pflichten",
            Self::Transparency => "Transparenzpflichten (Art. 50)",
            Self::HighRiskAnnexIii => "Hochrisiko-Systeme (Anhang III)",
            Self::HighRiskAnnexI => "Hochrisiko-Produkte (Anhang I)",
        }
    }
}

/// Questionnaire answers describing one AI system
///
/// Every decision field defaults to `false`/absent. The three identity
/// strings are required but not checked by the classifier; call
/// [`ClassificationInput::validate`] first.
///
/// Unknown field names are rejected when loading, so a misspelled flag
/// cannot silently fall back to `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationInput {
    /// Name of the AI system
    pub system_name: String,

    /// Providing organisation
    pub provider: String,

    /// Free-text description of purpose and function
    pub system_description: String,

    // Prohibited practices (Article 5)
    pub uses_subliminal_manipulation: bool,
    pub exploits_vulnerable_groups: bool,
    pub performs_social_scoring: bool,
    pub predictive_policing_only_profiling: bool,
    /// Permitted variant of predictive policing; suppresses the profiling-only prohibition
    pub predictive_policing_with_objective_facts: bool,
    pub scrapes_facial_recognition: bool,
    pub emotion_recognition_work_education: bool,
    pub biometric_categorization_sensitive: bool,
    pub realtime_biometric_public: bool,

    /// Exception claimed for real-time biometric identification
    #[serde(deserialize_with = "deserialize_lenient")]
    pub realtime_biometric_exception: Option<BiometricException>,

    // High-risk pathway A (Annex I products)
    pub is_safety_component_annex_i: bool,
    pub is_product_annex_i: bool,
    pub requires_third_party_assessment: bool,
    pub annex_i_product_type: Option<String>,

    // High-risk pathway B (Annex III domains)
    #[serde(deserialize_with = "deserialize_lenient")]
    pub high_risk_domain: Option<HighRiskDomain>,
    pub high_risk_use_case: Option<String>,
    /// Profiling of natural persons; disables every Article 6(3) exception
    pub performs_profiling: bool,

    // Article 6(3) exceptions
    pub narrow_procedural_task: bool,
    pub improves_human_work: bool,
    pub detects_patterns_only: bool,
    pub preparatory_task_only: bool,

    // Transparency triggers (Article 50)
    pub interacts_with_humans: bool,
    pub generates_synthetic_content: bool,
    pub generates_deepfakes: bool,
    /// Permitted variant of emotion recognition; suppresses the workplace/education prohibition
    pub emotion_recognition_medical_safety: bool,
    pub biometric_categorization_lawful: bool,

    /// Media produced when generating synthetic content
    #[serde(deserialize_with = "deserialize_media")]
    pub synthetic_content_types: BTreeSet<ContentMedium>,

    // General-purpose AI
    pub is_gpai: bool,
    pub gpai_has_systemic_risk: bool,

    /// Date against which time-gated rules are evaluated (today if absent)
    pub reference_date: Option<NaiveDate>,
}

impl ClassificationInput {
    /// Create an input with the required identity fields and all flags unset
    pub fn new(
        system_name: impl Into<String>,
        provider: impl Into<String>,
        system_description: impl Into<String>,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            provider: provider.into(),
            system_description: system_description.into(),
            ..Self::default()
        }
    }

    /// Set the reference date
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Select a high-risk domain and optional use case
    pub fn with_domain(mut self, domain: HighRiskDomain, use_case: Option<&str>) -> Self {
        self.high_risk_domain = Some(domain);
        self.high_risk_use_case = use_case.map(str::to_string);
        self
    }

    /// Declare the system a general-purpose AI model
    pub fn with_gpai(mut self, systemic_risk: bool) -> Self {
        self.is_gpai = true;
        self.gpai_has_systemic_risk = systemic_risk;
        self
    }

    /// Check the required identity fields
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("system_name", &self.system_name),
            ("provider", &self.provider),
            ("system_description", &self.system_description),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )))
        }
    }

    /// Whether any Article 50 transparency flag is set
    pub fn has_transparency_trigger(&self) -> bool {
        self.interacts_with_humans
            || self.generates_synthetic_content
            || self.generates_deepfakes
            || self.emotion_recognition_medical_safety
            || self.biometric_categorization_lawful
    }

    /// Load an input record from a YAML or JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse an input record from YAML (JSON is accepted as a YAML subset)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Outcome of one classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Assigned risk tier
    pub risk_level: RiskTier,

    /// Why this tier was reached, in evaluation order
    pub reasons: Vec<String>,

    /// Tier-specific obligations
    pub obligations: Vec<String>,

    /// Tier-specific recommendations
    pub recommendations: Vec<String>,

    /// Legal citations supporting the reasons
    pub applicable_articles: Vec<String>,

    /// When the classification was produced
    pub timestamp: DateTime<Utc>,

    /// Date the time-gated rules were evaluated against
    pub reference_date: NaiveDate,

    /// Declared general-purpose AI model
    pub is_gpai: bool,

    /// Declared GPAI model with systemic risk
    pub gpai_has_systemic_risk: bool,

    /// GPAI obligations (any tier)
    pub gpai_obligations: Vec<String>,

    /// Article 50 obligations, including on top of the high-risk regime
    pub transparency_obligations: Vec<String>,

    /// Obligations applying to every AI system
    pub universal_obligations: Vec<String>,

    /// Application date of every rule category that contributed to this result
    pub applicable_deadlines: BTreeMap<DeadlineKey, NaiveDate>,

    /// An Article 6(3) exception avoided the high-risk tier and must be documented
    pub exception_documentation_required: bool,

    /// Contradictory answers detected in the input
    pub warnings: Vec<String>,
}

impl ClassificationResult {
    /// Whether the system may not be operated at all
    pub fn is_prohibited(&self) -> bool {
        self.risk_level == RiskTier::Unacceptable
    }

    /// Whether the result carries any conflict warning
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

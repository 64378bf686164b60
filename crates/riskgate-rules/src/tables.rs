//! Static rule tables
//!
//! Reference data for the AI Act (Regulation (EU) 2024/1689): prohibited
//! practices, Annex III domains, Annex I products, exception catalogs,
//! obligation catalogs, and the application calendar. Tables are read-only
//! and indexed by the closed key enumerations, so a lookup can never miss.

use chrono::NaiveDate;
use riskgate_core::{BiometricException, ContentMedium, DeadlineKey, HighRiskDomain};
use serde::Serialize;

/// Prohibited AI practice (Article 5(1))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProhibitedPractice {
    SubliminalManipulation,
    ExploitationVulnerable,
    SocialScoring,
    PredictivePolicingProfiling,
    FacialRecognitionScraping,
    EmotionRecognitionWorkEducation,
    BiometricCategorizationSensitive,
    RealtimeBiometricPublic,
}

impl ProhibitedPractice {
    /// All practices in catalog order
    pub const ALL: [Self; 8] = [
        Self::SubliminalManipulation,
        Self::ExploitationVulnerable,
        Self::SocialScoring,
        Self::PredictivePolicingProfiling,
        Self::FacialRecognitionScraping,
        Self::EmotionRecognitionWorkEducation,
        Self::BiometricCategorizationSensitive,
        Self::RealtimeBiometricPublic,
    ];

    /// Stable table key
    pub fn key(&self) -> &'static str {
        match self {
            Self::SubliminalManipulation => "subliminal_manipulation",
            Self::ExploitationVulnerable => "exploitation_vulnerable",
            Self::SocialScoring => "social_scoring",
            Self::PredictivePolicingProfiling => "predictive_policing_profiling",
            Self::FacialRecognitionScraping => "facial_recognition_scraping",
            Self::EmotionRecognitionWorkEducation => "emotion_recognition_work_education",
            Self::BiometricCategorizationSensitive => "biometric_categorization_sensitive",
            Self::RealtimeBiometricPublic => "realtime_biometric_public",
        }
    }

    /// Catalog entry for this practice
    pub fn entry(&self) -> &'static CatalogEntry {
        &PROHIBITED_PRACTICES[*self as usize]
    }
}

/// Name, description, and citation of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub article: &'static str,
}

/// Prohibited practices, indexed by [`ProhibitedPractice`]
pub static PROHIBITED_PRACTICES: [CatalogEntry; 8] = [
    CatalogEntry {
        name: "Unterschwellige Manipulation",
        description: "KI, die unterschwellige Techniken einsetzt, um Verhalten zu beeinflussen",
        article: "Artikel 5(1)(a)",
    },
    CatalogEntry {
        name: "Ausnutzung von Schutzbedürftigen",
        description: "Ausnutzung von Schwächen aufgrund von Alter, Behinderung oder sozioökonomischer Lage",
        article: "Artikel 5(1)(b)",
    },
    CatalogEntry {
        name: "Soziales Scoring",
        description: "Bewertung von Personen basierend auf sozialem Verhalten oder Persönlichkeitsmerkmalen",
        article: "Artikel 5(1)(c)",
    },
    CatalogEntry {
        name: "Predictive Policing (nur Profiling)",
        description: "Vorhersage von Straftaten ausschließlich basierend auf Profiling",
        article: "Artikel 5(1)(d)",
    },
    CatalogEntry {
        name: "Gesichtserkennung-Scraping",
        description: "Erstellen von Gesichtserkennungs-Datenbanken durch ungezieltes Internet-/CCTV-Scraping",
        article: "Artikel 5(1)(e)",
    },
    CatalogEntry {
        name: "Emotionserkennung am Arbeitsplatz/in Bildung",
        description: "Ableitung von Emotionen am Arbeitsplatz oder in Bildungseinrichtungen (außer medizinisch/sicherheitsrelevant)",
        article: "Artikel 5(1)(f)",
    },
    CatalogEntry {
        name: "Biometrische Kategorisierung (sensibel)",
        description: "Kategorisierung durch Ableitung von Rasse, politischen Meinungen, Gewerkschaftszugehörigkeit, Religion, Sexualleben",
        article: "Artikel 5(1)(g)",
    },
    CatalogEntry {
        name: "Echtzeit-Biometrie in öffentlichen Räumen",
        description: "Echtzeit-Fernidentifizierung in öffentlich zugänglichen Räumen für Strafverfolgung",
        article: "Artikel 5(1)(h)",
    },
];

/// Exceptions permitting real-time biometric identification, indexed by [`BiometricException`]
pub static REALTIME_BIOMETRIC_EXCEPTIONS: [CatalogEntry; 3] = [
    CatalogEntry {
        name: "Gezielte Opfersuche",
        description: "Gezielte Suche nach bestimmten Opfern von Entführung, Menschenhandel oder sexueller Ausbeutung sowie nach vermissten Personen",
        article: "Artikel 5(1)(h)(i)",
    },
    CatalogEntry {
        name: "Abwehr unmittelbarer Gefahr",
        description: "Abwenden einer konkreten, erheblichen und unmittelbaren Gefahr für Leib und Leben oder eines Terroranschlags",
        article: "Artikel 5(1)(h)(ii)",
    },
    CatalogEntry {
        name: "Lokalisierung von Tatverdächtigen",
        description: "Aufspüren oder Identifizieren von Personen, die einer schweren Straftat nach Anhang II verdächtigt werden",
        article: "Artikel 5(1)(h)(iii)",
    },
];

/// Catalog entry for a real-time biometric exception
pub fn biometric_exception_entry(exception: BiometricException) -> &'static CatalogEntry {
    &REALTIME_BIOMETRIC_EXCEPTIONS[exception as usize]
}

/// High-risk domain with its Annex III use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainEntry {
    pub name: &'static str,
    pub use_cases: &'static [&'static str],
    pub article: &'static str,
}

/// Annex III high-risk domains, indexed by [`HighRiskDomain`]
pub static HIGH_RISK_DOMAINS: [DomainEntry; 8] = [
    DomainEntry {
        name: "Biometrie",
        use_cases: &[
            "Biometrische Fernidentifikation (nicht nur Verifikation)",
            "Biometrische Kategorisierung nach sensiblen Merkmalen",
            "Emotionserkennungssysteme",
        ],
        article: "Anhang III, Nr. 1",
    },
    DomainEntry {
        name: "Kritische Infrastruktur",
        use_cases: &[
            "Sicherheitskomponenten für digitale Infrastruktur",
            "Straßenverkehrsmanagement",
            "Wasser-/Gas-/Heizungs-/Stromversorgung",
        ],
        article: "Anhang III, Nr. 2",
    },
    DomainEntry {
        name: "Bildung und Berufsausbildung",
        use_cases: &[
            "Zulassungsentscheidungen",
            "Benotung und Bewertung",
            "Verhaltensüberwachung von Schülern/Studenten",
            "Prüfungsbetrugs-Erkennung",
        ],
        article: "Anhang III, Nr. 3",
    },
    DomainEntry {
        name: "Beschäftigung und Personalmanagement",
        use_cases: &[
            "Rekrutierung und Lebenslauf-Screening",
            "Zielgerichtete Stellenanzeigen",
            "Bewerbungsgespräch-Auswertung",
            "Leistungsüberwachung",
            "Beförderungs-/Kündigungsentscheidungen",
            "Aufgabenzuweisung",
        ],
        article: "Anhang III, Nr. 4",
    },
    DomainEntry {
        name: "Zugang zu wesentlichen Diensten",
        use_cases: &[
            "Kreditwürdigkeitsprüfung",
            "Risikobewertung für Lebens-/Krankenversicherung",
            "Sozialleistungs-Berechtigung",
            "Notruf-Bewertung und Dispatching",
            "Medizinische Triage",
        ],
        article: "Anhang III, Nr. 5",
    },
    DomainEntry {
        name: "Strafverfolgung",
        use_cases: &[
            "Risikobewertung für (Rück-)Fälligkeit",
            "Polygraph und ähnliche Tools",
            "Beweis-Zuverlässigkeitsbewertung",
            "Profiling bei Ermittlungen",
            "Kriminalitätsanalyse",
        ],
        article: "Anhang III, Nr. 6",
    },
    DomainEntry {
        name: "Migration und Grenzkontrolle",
        use_cases: &[
            "Sicherheits-/Gesundheits-/Migrationsrisikobewertung",
            "Asyl-/Visa-/Aufenthaltsgenehmigungsprüfung",
            "Dokumenten-Echtheitsprüfung",
            "Personenerkennung und -identifikation",
        ],
        article: "Anhang III, Nr. 7",
    },
    DomainEntry {
        name: "Justiz und demokratische Prozesse",
        use_cases: &[
            "Rechtsrecherche und -interpretation",
            "Alternative Streitbeilegung",
            "Beweisbewertung",
            "Beeinflussung von Gerichtsentscheidungen",
        ],
        article: "Anhang III, Nr. 8",
    },
];

/// Catalog entry for a high-risk domain
pub fn domain_entry(domain: HighRiskDomain) -> &'static DomainEntry {
    &HIGH_RISK_DOMAINS[domain as usize]
}

/// Annex I product categories covered by Union harmonisation legislation
pub static ANNEX_I_PRODUCTS: [&str; 13] = [
    "Medizinprodukte (Klasse IIa und höher)",
    "In-vitro-Diagnostika",
    "Maschinen und Anlagen",
    "Spielzeug",
    "Aufzüge und Sicherheitskomponenten",
    "Persönliche Schutzausrüstung",
    "Funkanlagen",
    "Druckgeräte",
    "Zivilluftfahrtsysteme",
    "Kraftfahrzeuge und Anhänger",
    "Land- und Forstwirtschaftsfahrzeuge",
    "Schiffsausrüstung",
    "Eisenbahnsysteme",
];

/// Article 6(3) carve-out for an Annex III system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainException {
    NarrowProceduralTask,
    ImprovesHumanWork,
    DetectsPatternsOnly,
    PreparatoryTaskOnly,
}

impl DomainException {
    /// All carve-outs in catalog order
    pub const ALL: [Self; 4] = [
        Self::NarrowProceduralTask,
        Self::ImprovesHumanWork,
        Self::DetectsPatternsOnly,
        Self::PreparatoryTaskOnly,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::NarrowProceduralTask => "Enge verfahrenstechnische Aufgabe",
            Self::ImprovesHumanWork => "Verbessert bereits abgeschlossene menschliche Arbeit",
            Self::DetectsPatternsOnly => "Erkennt nur Muster ohne menschliche Bewertung zu ersetzen",
            Self::PreparatoryTaskOnly => "Nur vorbereitende Aufgabe",
        }
    }

    /// Citation of the specific carve-out
    pub fn article(&self) -> &'static str {
        match self {
            Self::NarrowProceduralTask => "Artikel 6(3)(a)",
            Self::ImprovesHumanWork => "Artikel 6(3)(b)",
            Self::DetectsPatternsOnly => "Artikel 6(3)(c)",
            Self::PreparatoryTaskOnly => "Artikel 6(3)(d)",
        }
    }
}

/// Article 50 transparency trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyTrigger {
    Chatbot,
    Deepfake,
    AiGeneratedContent,
    EmotionRecognitionAllowed,
    BiometricCategorizationAllowed,
}

impl TransparencyTrigger {
    /// All triggers in evaluation order
    pub const ALL: [Self; 5] = [
        Self::Chatbot,
        Self::Deepfake,
        Self::AiGeneratedContent,
        Self::EmotionRecognitionAllowed,
        Self::BiometricCategorizationAllowed,
    ];

    /// What the system does that triggers the duty
    pub fn description(&self) -> &'static str {
        match self {
            Self::Chatbot => "KI-System interagiert direkt mit Nutzern (Chatbot, virtueller Assistent)",
            Self::Deepfake => "Generiert oder manipuliert Bild-, Audio- oder Videoinhalte (Deepfakes)",
            Self::AiGeneratedContent => "Generiert synthetische Inhalte (Text, Bild, Audio oder Video)",
            Self::EmotionRecognitionAllowed => "Emotionserkennung für medizinische oder Sicherheitszwecke",
            Self::BiometricCategorizationAllowed => "Rechtmäßige biometrische Kategorisierung",
        }
    }

    /// Citation of the duty
    pub fn article(&self) -> &'static str {
        match self {
            Self::Chatbot => "Artikel 50(1)",
            Self::AiGeneratedContent => "Artikel 50(2)",
            Self::EmotionRecognitionAllowed | Self::BiometricCategorizationAllowed => "Artikel 50(3)",
            Self::Deepfake => "Artikel 50(4)",
        }
    }

    /// The duty itself, phrased as an obligation
    pub fn obligation(&self) -> &'static str {
        match self {
            Self::Chatbot => {
                "Art. 50(1): Nutzer müssen darüber informiert werden, dass sie mit einem KI-System interagieren"
            }
            Self::Deepfake => {
                "Art. 50(4): Deepfakes müssen als künstlich erzeugt oder manipuliert offengelegt werden"
            }
            Self::AiGeneratedContent => {
                "Art. 50(2): Synthetische Inhalte müssen in maschinenlesbarem Format als KI-generiert gekennzeichnet werden"
            }
            Self::EmotionRecognitionAllowed => {
                "Art. 50(3): Betroffene Personen über den Betrieb des Emotionserkennungssystems informieren"
            }
            Self::BiometricCategorizationAllowed => {
                "Art. 50(3): Betroffene Personen über den Betrieb des biometrischen Kategorisierungssystems informieren"
            }
        }
    }
}

/// Code-of-Practice marking guidance for one content medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkingEntry {
    pub name: &'static str,
    pub methods: &'static [&'static str],
}

/// Marking methods for AI-generated content, indexed by [`ContentMedium`]
pub static CODE_OF_PRACTICE_MARKING: [MarkingEntry; 4] = [
    MarkingEntry {
        name: "Video",
        methods: &[
            "Persistentes, nicht aufdringliches Symbol während der gesamten Wiedergabe",
            "Hinweis zu Beginn des Videos (Disclaimer)",
            "Bei Live-Video: kontinuierliche Markierung während der gesamten Übertragung",
        ],
    },
    MarkingEntry {
        name: "Bild",
        methods: &[
            "Sichtbares Label \"KI-generiert\" auf dem Bild",
            "Wasserzeichen",
            "Eingebettete Metadaten zur Herkunft (z.B. C2PA)",
        ],
    },
    MarkingEntry {
        name: "Audio",
        methods: &[
            "Hörbarer Hinweis zu Beginn (Audio-Disclaimer)",
            "Wiederholte akustische Hinweise bei längeren Inhalten",
            "Markierung in den Metadaten",
        ],
    },
    MarkingEntry {
        name: "Text",
        methods: &["Einheitliches KI-Symbol beim ersten Kontakt anzeigen"],
    },
];

/// Marking guidance for a content medium
pub fn marking_entry(medium: ContentMedium) -> &'static MarkingEntry {
    &CODE_OF_PRACTICE_MARKING[medium as usize]
}

pub const UNACCEPTABLE_OBLIGATIONS: [&str; 3] = [
    "Das KI-System darf NICHT in der EU betrieben werden",
    "Sofortige Einstellung aller Aktivitäten erforderlich",
    "Mögliche Strafe: Bis zu 35 Mio. EUR oder 7% des weltweiten Jahresumsatzes (je nachdem, welcher Betrag höher ist)",
];

pub const UNACCEPTABLE_RECOMMENDATIONS: [&str; 3] = [
    "Rechtliche Beratung einholen",
    "System umgestalten um verbotene Praktiken zu eliminieren",
    "Alternative Ansätze prüfen die EU AI Act-konform sind",
];

pub const HIGH_RISK_OBLIGATIONS: [&str; 11] = [
    "Risikomanagementsystem einrichten (Artikel 9)",
    "Daten-Governance sicherstellen (Artikel 10)",
    "Technische Dokumentation erstellen (Artikel 11, Anhang IV)",
    "Automatische Protokollierung implementieren (Artikel 12)",
    "Transparenz gegenüber Betreibern gewährleisten (Artikel 13)",
    "Menschliche Aufsicht ermöglichen (Artikel 14)",
    "Genauigkeit, Robustheit und Cybersicherheit sicherstellen (Artikel 15)",
    "Konformitätsbewertung durchführen (Artikel 43)",
    "CE-Kennzeichnung anbringen (Artikel 48)",
    "Registrierung in EU-Datenbank (Artikel 49)",
    "Post-Market-Monitoring einrichten (Artikel 72)",
];

pub const HIGH_RISK_RECOMMENDATIONS: [&str; 7] = [
    "Frühzeitig mit Konformitätsbewertung beginnen",
    "Qualitätsmanagementsystem implementieren",
    "Verantwortlichen für KI-Compliance benennen",
    "Dokumentation kontinuierlich aktualisieren",
    "Schulungen für alle Beteiligten durchführen",
    "Externe Prüfer/Notified Body konsultieren",
    "Notfallpläne für Systemausfälle erstellen",
];

pub const LIMITED_OBLIGATIONS: [&str; 4] = [
    "Nutzer über KI-Interaktion informieren",
    "KI-generierte Inhalte als solche kennzeichnen",
    "Maschinenlesbare Markierung für synthetische Inhalte",
    "Bei Deepfakes: Offenlegungspflicht",
];

pub const LIMITED_RECOMMENDATIONS: [&str; 3] = [
    "Klare Offenlegungsmechanismen implementieren",
    "Nutzungsbedingungen aktualisieren",
    "Schulung für Mitarbeiter durchführen",
];

pub const MINIMAL_OBLIGATIONS: [&str; 1] =
    ["Keine verpflichtenden Anforderungen nach EU AI Act über die universellen Pflichten hinaus"];

pub const MINIMAL_RECOMMENDATIONS: [&str; 5] = [
    "Freiwillige Verhaltenskodizes berücksichtigen (Artikel 95)",
    "Best Practices für verantwortungsvolle KI befolgen",
    "Regelmäßige Überprüfung bei Änderungen am System",
    "Einstufung intern dokumentieren und bei Änderungen neu bewerten",
    "KI-Kompetenz der beteiligten Mitarbeiter fördern",
];

pub const GPAI_OBLIGATIONS: [&str; 4] = [
    "Technische Dokumentation des Modells erstellen und aktuell halten (Artikel 53(1)(a))",
    "Informationen und Dokumentation für nachgelagerte Anbieter bereitstellen (Artikel 53(1)(b))",
    "Strategie zur Einhaltung des EU-Urheberrechts umsetzen (Artikel 53(1)(c))",
    "Zusammenfassung der Trainingsinhalte veröffentlichen (Artikel 53(1)(d))",
];

pub const GPAI_SYSTEMIC_RISK_OBLIGATIONS: [&str; 5] = [
    "Modellbewertung nach dem Stand der Technik inkl. Adversarial Testing (Artikel 55(1)(a))",
    "Systemische Risiken auf Unionsebene bewerten und mindern (Artikel 55(1)(b))",
    "Schwerwiegende Vorfälle erfassen und dem AI Office melden (Artikel 55(1)(c))",
    "Angemessene Cybersicherheit für Modell und Infrastruktur gewährleisten (Artikel 55(1)(d))",
    "Energieverbrauch des Modells dokumentieren (Anhang XI)",
];

pub const AI_LITERACY_OBLIGATION: &str =
    "KI-Kompetenz: Ausreichende KI-Kompetenz des Personals sicherstellen (Artikel 4)";

pub const DATA_PROTECTION_OBLIGATION: &str =
    "Datenschutz: Bei Verarbeitung personenbezogener Daten gelten die Anforderungen der DSGVO";

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Application dates of the regulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineCalendar {
    pub entry_into_force: NaiveDate,
    pub prohibited_practices: NaiveDate,
    pub ai_literacy: NaiveDate,
    pub gpai: NaiveDate,
    pub high_risk_annex_iii: NaiveDate,
    /// Shares the Annex III date
    pub transparency: NaiveDate,
    pub high_risk_annex_i: NaiveDate,
}

/// The calendar of Regulation (EU) 2024/1689
pub const AI_ACT_DEADLINES: DeadlineCalendar = DeadlineCalendar {
    entry_into_force: ymd(2024, 8, 1),
    prohibited_practices: ymd(2025, 2, 2),
    ai_literacy: ymd(2025, 2, 2),
    gpai: ymd(2025, 8, 2),
    high_risk_annex_iii: ymd(2026, 8, 2),
    transparency: ymd(2026, 8, 2),
    high_risk_annex_i: ymd(2027, 8, 2),
};

impl DeadlineCalendar {
    /// Application date of a rule category
    pub fn date(&self, key: DeadlineKey) -> NaiveDate {
        match key {
            DeadlineKey::ProhibitedPractices => self.prohibited_practices,
            DeadlineKey::AiLiteracy => self.ai_literacy,
            DeadlineKey::Gpai => self.gpai,
            DeadlineKey::Transparency => self.transparency,
            DeadlineKey::HighRiskAnnexIii => self.high_risk_annex_iii,
            DeadlineKey::HighRiskAnnexI => self.high_risk_annex_i,
        }
    }

    /// Whether a rule category applies on the given date
    pub fn applies(&self, key: DeadlineKey, on: NaiveDate) -> bool {
        on >= self.date(key)
    }

    /// Milestones in chronological order, for reference output
    pub fn milestones(&self) -> [(NaiveDate, &'static str); 5] {
        [
            (self.entry_into_force, "AI Act tritt in Kraft"),
            (
                self.prohibited_practices,
                "Verbotene Praktiken (Art. 5) und KI-Kompetenzpflichten gelten",
            ),
            (self.gpai, "Governance-Regeln und GPAI-Modell-Pflichten gelten"),
            (
                self.high_risk_annex_iii,
                "Vollständige Anwendung für Hochrisiko-Systeme (Anhang III) und Transparenzpflichten",
            ),
            (
                self.high_risk_annex_i,
                "Hochrisiko-KI in regulierten Produkten (Anhang I)",
            ),
        ]
    }
}

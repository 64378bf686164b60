//! Closed key enumerations for the selector fields of a classification input
//!
//! Each enumeration maps one-to-one onto a rule table keyed by a stable
//! string. Input files carry the string keys; a key that matches no variant
//! is treated as "not selected" (logged, never an error) so that a typo in
//! an optional selector cannot abort a classification.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::Error;

/// High-risk application domain (Annex III)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighRiskDomain {
    Biometrics,
    CriticalInfrastructure,
    Education,
    Employment,
    EssentialServices,
    LawEnforcement,
    MigrationBorder,
    JusticeDemocracy,
}

impl HighRiskDomain {
    /// All domains in catalog order
    pub const ALL: [Self; 8] = [
        Self::Biometrics,
        Self::CriticalInfrastructure,
        Self::Education,
        Self::Employment,
        Self::EssentialServices,
        Self::LawEnforcement,
        Self::MigrationBorder,
        Self::JusticeDemocracy,
    ];

    /// Stable table key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Biometrics => "biometrics",
            Self::CriticalInfrastructure => "critical_infrastructure",
            Self::Education => "education",
            Self::Employment => "employment",
            Self::EssentialServices => "essential_services",
            Self::LawEnforcement => "law_enforcement",
            Self::MigrationBorder => "migration_border",
            Self::JusticeDemocracy => "justice_democracy",
        }
    }
}

/// Narrow exception permitting real-time remote biometric identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricException {
    /// Targeted search for victims or missing persons
    VictimSearch,
    /// Prevention of a specific, imminent threat to life or a terrorist attack
    ImminentThreat,
    /// Locating suspects of serious criminal offences
    SeriousCrimeSuspect,
}

impl BiometricException {
    /// All exceptions in catalog order
    pub const ALL: [Self; 3] = [
        Self::VictimSearch,
        Self::ImminentThreat,
        Self::SeriousCrimeSuspect,
    ];

    /// Stable table key
    pub fn key(&self) -> &'static str {
        match self {
            Self::VictimSearch => "victim_search",
            Self::ImminentThreat => "imminent_threat",
            Self::SeriousCrimeSuspect => "serious_crime_suspect",
        }
    }
}

/// Medium of generated synthetic content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMedium {
    Video,
    Image,
    Audio,
    Text,
}

impl ContentMedium {
    /// All media in catalog order
    pub const ALL: [Self; 4] = [Self::Video, Self::Image, Self::Audio, Self::Text];

    /// Stable table key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Text => "text",
        }
    }
}

macro_rules! keyed_enum {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.key() == wanted)
                    .ok_or_else(|| Error::validation(format!("unknown {} '{}'", $what, s)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

keyed_enum!(HighRiskDomain, "high-risk domain");
keyed_enum!(BiometricException, "biometric exception");
keyed_enum!(ContentMedium, "content medium");

/// Parse an optional selector key, treating unrecognized keys as absent
pub fn parse_lenient<T>(raw: Option<&str>) -> Option<T>
where
    T: FromStr<Err = Error>,
{
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = raw, "{}; treating as not selected", e);
            None
        }
    }
}

pub(crate) fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = Error>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(parse_lenient(raw.as_deref()))
}

pub(crate) fn deserialize_media<'de, D>(
    deserializer: D,
) -> Result<BTreeSet<ContentMedium>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|s| parse_lenient(Some(s)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_roundtrip_through_from_str() {
        for domain in HighRiskDomain::ALL {
            assert_eq!(domain.key().parse::<HighRiskDomain>().unwrap(), domain);
        }
        for exception in BiometricException::ALL {
            assert_eq!(
                exception.key().parse::<BiometricException>().unwrap(),
                exception
            );
        }
    }

    #[test]
    fn test_unknown_key_is_absent() {
        assert_eq!(parse_lenient::<HighRiskDomain>(Some("astrology")), None);
        assert_eq!(parse_lenient::<HighRiskDomain>(Some("  ")), None);
        assert_eq!(
            parse_lenient::<HighRiskDomain>(Some("employment")),
            Some(HighRiskDomain::Employment)
        );
    }

    #[test]
    fn test_from_str_reports_unknown_key() {
        let err = "hologram".parse::<ContentMedium>().unwrap_err();
        assert!(err.to_string().contains("hologram"));
    }
}

//! Text and JSON rendering of results and reference tables

use crate::cli::ReferenceTable;
use chrono::NaiveDate;
use riskgate_core::{
    BiometricException, ClassificationInput, ClassificationResult, ContentMedium, HighRiskDomain,
    RiskTier,
};
use riskgate_rules::tables::{
    biometric_exception_entry, domain_entry, marking_entry, ANNEX_I_PRODUCTS,
};
use riskgate_rules::{DomainException, ProhibitedPractice, AI_ACT_DEADLINES};
use serde_json::{json, Value};
use std::io::{self, Write};

const RULE: &str = "============================================================";

/// Write a classification report
///
/// Sections appear in a fixed order: overview, verdict, warnings, reasons,
/// citations, obligations with their overlays, recommendations, deadlines.
/// Deadline status is relative to `today`.
pub fn write_report<W: Write>(
    out: &mut W,
    input: &ClassificationInput,
    result: &ClassificationResult,
    today: NaiveDate,
) -> io::Result<()> {
    writeln!(out, "EU AI Act Risikoklassifizierung")?;
    writeln!(out, "{}", RULE)?;

    heading(out, "Übersicht")?;
    writeln!(out, "  System:       {}", input.system_name)?;
    writeln!(out, "  Anbieter:     {}", input.provider)?;
    writeln!(out, "  Beschreibung: {}", input.system_description)?;
    writeln!(out, "  Stichtag:     {}", result.reference_date)?;
    writeln!(
        out,
        "  Erstellt:     {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    heading(out, "Ergebnis")?;
    let tier = result.risk_level;
    writeln!(out, "  Risikostufe:  {} ({})", tier.label(), tier.description())?;
    writeln!(out, "  Max. Strafe:  {}", tier.max_penalty())?;
    if result.is_gpai {
        let systemic = if result.gpai_has_systemic_risk {
            " (mit systemischem Risiko)"
        } else {
            ""
        };
        writeln!(out, "  GPAI-Modell:  Ja{}", systemic)?;
    }

    if result.has_warnings() {
        heading(out, "Warnungen")?;
        for warning in &result.warnings {
            writeln!(out, "  ! {}", warning)?;
        }
    }

    heading(out, "Begründung")?;
    list(out, &result.reasons)?;

    heading(out, "Rechtsgrundlagen")?;
    if result.applicable_articles.is_empty() {
        writeln!(out, "  Keine spezifischen Artikel")?;
    } else {
        list(out, &result.applicable_articles)?;
    }

    heading(out, "Pflichten")?;
    list(out, &result.obligations)?;
    if !result.transparency_obligations.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Transparenzpflichten (Artikel 50):")?;
        list(out, &result.transparency_obligations)?;
    }
    if !result.gpai_obligations.is_empty() && tier != RiskTier::Minimal {
        writeln!(out)?;
        writeln!(out, "  GPAI-Pflichten:")?;
        list(out, &result.gpai_obligations)?;
    }
    writeln!(out)?;
    writeln!(out, "  Universelle Pflichten:")?;
    list(out, &result.universal_obligations)?;
    if result.exception_documentation_required {
        writeln!(out)?;
        writeln!(
            out,
            "  Hinweis: Die angewendete Ausnahme nach Artikel 6(3) muss vor dem \
             Inverkehrbringen dokumentiert und auf Anfrage den Behörden vorgelegt werden \
             (Artikel 6(4))."
        )?;
    }

    heading(out, "Empfehlungen")?;
    list(out, &result.recommendations)?;

    heading(out, "Fristen")?;
    if result.applicable_deadlines.is_empty() {
        writeln!(out, "  Keine anwendbaren Fristen")?;
    }
    for (key, date) in &result.applicable_deadlines {
        let status = if *date <= today { "gilt" } else { "ausstehend" };
        writeln!(out, "  {}  {:<36} {}", date, key.label(), status)?;
    }

    Ok(())
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn list<W: Write>(out: &mut W, items: &[String]) -> io::Result<()> {
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

/// A reference table as JSON
pub fn reference_value(table: ReferenceTable) -> Value {
    match table {
        ReferenceTable::Tiers => RiskTier::ALL
            .iter()
            .map(|tier| {
                json!({
                    "key": tier.key(),
                    "label": tier.label(),
                    "color": tier.color(),
                    "description": tier.description(),
                    "max_penalty": tier.max_penalty(),
                })
            })
            .collect(),
        ReferenceTable::Prohibited => ProhibitedPractice::ALL
            .iter()
            .map(|practice| {
                let entry = practice.entry();
                json!({
                    "key": practice.key(),
                    "name": entry.name,
                    "description": entry.description,
                    "article": entry.article,
                })
            })
            .collect(),
        ReferenceTable::Domains => HighRiskDomain::ALL
            .iter()
            .map(|domain| {
                let entry = domain_entry(*domain);
                json!({
                    "key": domain.key(),
                    "name": entry.name,
                    "use_cases": entry.use_cases,
                    "article": entry.article,
                })
            })
            .collect(),
        ReferenceTable::Products => json!(ANNEX_I_PRODUCTS),
        ReferenceTable::Exceptions => json!({
            "realtime_biometric": BiometricException::ALL
                .iter()
                .map(|exception| {
                    let entry = biometric_exception_entry(*exception);
                    json!({
                        "key": exception.key(),
                        "name": entry.name,
                        "description": entry.description,
                        "article": entry.article,
                    })
                })
                .collect::<Vec<_>>(),
            "annex_iii": DomainException::ALL
                .iter()
                .map(|exception| {
                    json!({
                        "key": exception,
                        "label": exception.label(),
                        "article": exception.article(),
                    })
                })
                .collect::<Vec<_>>(),
        }),
        ReferenceTable::Marking => ContentMedium::ALL
            .iter()
            .map(|medium| {
                let entry = marking_entry(*medium);
                json!({
                    "key": medium.key(),
                    "name": entry.name,
                    "methods": entry.methods,
                })
            })
            .collect(),
        ReferenceTable::Deadlines => AI_ACT_DEADLINES
            .milestones()
            .iter()
            .map(|(date, description)| json!({ "date": date, "description": description }))
            .collect(),
    }
}

/// Write a reference table as text
pub fn write_reference<W: Write>(out: &mut W, table: ReferenceTable) -> io::Result<()> {
    match table {
        ReferenceTable::Tiers => {
            for tier in RiskTier::ALL {
                writeln!(out, "{:<34} {}  {}", tier.label(), tier.color(), tier.description())?;
                writeln!(out, "  Max. Strafe: {}", tier.max_penalty())?;
            }
        }
        ReferenceTable::Prohibited => {
            for practice in ProhibitedPractice::ALL {
                let entry = practice.entry();
                writeln!(out, "{} [{}]", entry.name, entry.article)?;
                writeln!(out, "  {}", entry.description)?;
            }
        }
        ReferenceTable::Domains => {
            for domain in HighRiskDomain::ALL {
                let entry = domain_entry(domain);
                writeln!(out, "{} ({}) [{}]", entry.name, domain.key(), entry.article)?;
                for use_case in entry.use_cases {
                    writeln!(out, "  - {}", use_case)?;
                }
            }
        }
        ReferenceTable::Products => {
            for product in ANNEX_I_PRODUCTS {
                writeln!(out, "- {}", product)?;
            }
        }
        ReferenceTable::Exceptions => {
            writeln!(out, "Echtzeit-Biometrie (Artikel 5(1)(h))")?;
            for exception in BiometricException::ALL {
                let entry = biometric_exception_entry(exception);
                writeln!(out, "  {} ({}) [{}]", entry.name, exception.key(), entry.article)?;
                writeln!(out, "    {}", entry.description)?;
            }
            writeln!(out, "Hochrisiko-Ausnahmen (Artikel 6(3))")?;
            for exception in DomainException::ALL {
                writeln!(out, "  {} [{}]", exception.label(), exception.article())?;
            }
        }
        ReferenceTable::Marking => {
            for medium in ContentMedium::ALL {
                let entry = marking_entry(medium);
                writeln!(out, "{} ({})", entry.name, medium.key())?;
                for method in entry.methods {
                    writeln!(out, "  - {}", method)?;
                }
            }
        }
        ReferenceTable::Deadlines => {
            for (date, description) in AI_ACT_DEADLINES.milestones() {
                writeln!(out, "{}  {}", date, description)?;
            }
        }
    }

    Ok(())
}

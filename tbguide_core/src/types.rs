//! Core domain types for the TB Guide reference tool.
//!
//! This module defines the fundamental types used throughout the system:
//! - Patient classification (age class) and drug formulations
//! - Dosage result lines
//! - Guide content (sections, quiz questions, reference posology, glossary)
//! - Viewer state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Patient and Formulation Types
// ============================================================================

/// Patient age class used by the dosage engine.
///
/// Convention: `Adult` is age ≥ 18 years, `Child` is age < 18 years.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgeClass {
    Adult,
    Child,
}

impl AgeClass {
    /// UI-facing label for the age class selector
    pub fn label(&self) -> &'static str {
        match self {
            AgeClass::Adult => "Adulte (≥ 18 ans)",
            AgeClass::Child => "Enfant (< 18 ans)",
        }
    }
}

/// Drug-combination product a dose is computed for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Formulation {
    /// Combined four-drug tablet (H+R+Z+E), intensive phase
    Hrze,
    /// Combined two-drug tablet (H+R), continuation phase
    Hr,
    /// Four independent single-drug doses
    Separate,
}

// ============================================================================
// Dosage Result Types
// ============================================================================

/// Value of a single dosage recommendation line
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DoseValue {
    /// Fixed daily tablet count from a weight band ("1.5", "2", ...)
    Tablets(&'static str),
    /// Per-kilogram computed dose in milligrams per day
    MilligramsPerDay(u32),
    /// Instructional fallback when no validated band applies
    Guidance(&'static str),
}

/// One labeled line of a dosage recommendation
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DoseLine {
    pub label: &'static str,
    pub value: DoseValue,
    pub note: Option<&'static str>,
}

impl DoseLine {
    /// Render the line value the way the guide prints it
    pub fn rendered_value(&self) -> String {
        let value = match &self.value {
            DoseValue::Tablets(count) => format!("{} comprimé(s) par jour", count),
            DoseValue::MilligramsPerDay(mg) => format!("{} mg/jour", mg),
            DoseValue::Guidance(text) => (*text).to_string(),
        };
        match self.note {
            Some(note) => format!("{} ({})", value, note),
            None => value,
        }
    }
}

/// Complete dosage recommendation for one computation
///
/// `advisory` is appended to every successful result regardless of inputs.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DosageResult {
    pub lines: Vec<DoseLine>,
    pub advisory: &'static str,
}

impl DosageResult {
    /// Find a line by drug/formulation label
    pub fn line(&self, label: &str) -> Option<&DoseLine> {
        self.lines.iter().find(|l| l.label == label)
    }
}

// ============================================================================
// Guide Content Types
// ============================================================================

/// Identifier of a guide section
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Epidemiologie,
    Diagnostic,
    Traitement,
    Calculateur,
    Suivi,
    CasParticuliers,
    Resistance,
    InfectionLatente,
    Quiz,
    References,
}

impl SectionId {
    /// Stable slug used in persistence and on the command line
    pub fn as_slug(&self) -> &'static str {
        match self {
            SectionId::Epidemiologie => "epidemiologie",
            SectionId::Diagnostic => "diagnostic",
            SectionId::Traitement => "traitement",
            SectionId::Calculateur => "calculateur",
            SectionId::Suivi => "suivi",
            SectionId::CasParticuliers => "cas-particuliers",
            SectionId::Resistance => "resistance",
            SectionId::InfectionLatente => "infection-latente",
            SectionId::Quiz => "quiz",
            SectionId::References => "references",
        }
    }

    /// Parse a slug back into a section id
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "epidemiologie" => Some(SectionId::Epidemiologie),
            "diagnostic" => Some(SectionId::Diagnostic),
            "traitement" => Some(SectionId::Traitement),
            "calculateur" => Some(SectionId::Calculateur),
            "suivi" => Some(SectionId::Suivi),
            "cas-particuliers" => Some(SectionId::CasParticuliers),
            "resistance" => Some(SectionId::Resistance),
            "infection-latente" => Some(SectionId::InfectionLatente),
            "quiz" => Some(SectionId::Quiz),
            "references" => Some(SectionId::References),
            _ => None,
        }
    }
}

/// One entry of the guide navigation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub label: String,
    pub icon: String,
}

/// A training quiz question
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
}

/// Reference posology for one antituberculosis drug (display values)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrugReference {
    pub name: String,
    pub adult_dose: String,
    pub child_dose: String,
    pub max_dose: String,
}

/// Abbreviation glossary entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Abbreviation {
    pub term: String,
    pub definition: String,
}

/// Guide committees roster
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Committees {
    pub presidente: String,
    pub coordinateur: String,
    pub conception: String,
    pub redaction: Vec<String>,
    pub lecture: Vec<String>,
}

/// The complete immutable guide content
#[derive(Clone, Debug)]
pub struct GuideContent {
    pub sections: Vec<Section>,
    pub quiz: Vec<QuizQuestion>,
    pub posology: Vec<DrugReference>,
    pub abbreviations: Vec<Abbreviation>,
    pub committees: Committees,
}

// ============================================================================
// Viewer State
// ============================================================================

/// Persistent viewer state: the single "last viewed section" marker
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ViewerState {
    pub last_section: Option<SectionId>,
    pub viewed_at: Option<DateTime<Utc>>,
}

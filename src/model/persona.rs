//! Ranked sections and the persona report bundle.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::{Deserialize, Serialize};

/// Persona used when the first document yields no first line.
pub const UNKNOWN_PERSONA: &str = "Unknown Persona";
/// Job used when the first document yields no second line.
pub const UNKNOWN_JOB: &str = "Unknown Job";

/// A heading that matched at least one task keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source document file name
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    /// Relevance score (number of matched keywords, always >= 1)
    pub importance_rank: u32,
}

impl RankedSection {
    /// Create a ranked section.
    pub fn new(
        document: impl Into<String>,
        page_number: u32,
        section_title: impl Into<String>,
        importance_rank: u32,
    ) -> Self {
        Self {
            document: document.into(),
            page_number,
            section_title: section_title.into(),
            importance_rank,
        }
    }
}

/// Who is reading, and what for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub role: String,
    pub job: String,
}

impl Persona {
    /// Create a persona.
    pub fn new(role: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            job: job.into(),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(UNKNOWN_PERSONA, UNKNOWN_JOB)
    }
}

/// Metadata block of a persona report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaMetadata {
    pub documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601 timestamp with offset
    pub processing_timestamp: String,
}

impl PersonaMetadata {
    /// Create metadata stamped with the given time.
    pub fn new(
        documents: Vec<String>,
        persona: &Persona,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            documents,
            persona: persona.role.clone(),
            job_to_be_done: persona.job.clone(),
            processing_timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }

    /// Create metadata stamped with the local current time.
    pub fn now(documents: Vec<String>, persona: &Persona) -> Self {
        let now = Local::now();
        Self::new(documents, persona, now.with_timezone(now.offset()))
    }
}

/// Output of the persona ranking path for one group of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaReport {
    pub metadata: PersonaMetadata,
    pub extracted_sections: Vec<RankedSection>,
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::common::{CodeLanguage, DiagramKind};

/// One complete response of the generation service for a prompt.
///
/// Field names follow the camelCase wire contract. Only `sourceCode` and
/// `classDiagram` are checked for presence by the client, every other field
/// falls back to an empty value when the service leaves it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedAsset {
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub system_design: String,
    pub class_diagram: String,
    #[serde(default)]
    pub sequence_diagram: String,
    pub source_code: SourceCode,
    #[serde(default)]
    pub test_cases: Vec<String>,
    #[serde(default)]
    pub compliance_score: f64,
    #[serde(default)]
    pub standards_compliance: Vec<String>,
    #[serde(default)]
    pub sim_data: SimData,
}

impl GeneratedAsset {
    pub fn source(&self, language: CodeLanguage) -> &str {
        match language {
            CodeLanguage::Cpp => &self.source_code.cpp,
            CodeLanguage::Rust => &self.source_code.rust,
            CodeLanguage::Java => &self.source_code.java,
        }
    }

    pub fn diagram(&self, kind: DiagramKind) -> &str {
        match kind {
            DiagramKind::Class => &self.class_diagram,
            DiagramKind::Sequence => &self.sequence_diagram,
        }
    }
}

/// Source listings keyed by target language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCode {
    #[serde(default)]
    pub cpp: String,
    #[serde(default)]
    pub rust: String,
    #[serde(default)]
    pub java: String,
}

/// Mock simulation outcome reported by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimData {
    #[serde(default)]
    pub status: SimStatus,
    #[serde(default)]
    pub metrics: Vec<SimMetric>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimStatus {
    Success,
    Failure,
    /// Anything the service sent that is not one of the two verdicts
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimStatus::Success => write!(f, "success"),
            SimStatus::Failure => write!(f, "failure"),
            SimStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimMetric {
    pub name: String,
    pub value: f64,
}

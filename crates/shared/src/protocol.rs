use serde::{Deserialize, Serialize};

use crate::{
    domain::{AnalysisMetrics, AnalysisResult, BestMatch},
    error::ProtocolError,
};

/// Path of the analysis endpoint, relative to the service base URL.
pub const DNA_MATCHING_PATH: &str = "/dna_matching";
/// Multipart part carrying the sequence to match.
pub const TARGET_SEQUENCE_PART: &str = "target_sequence";
/// Optional multipart part carrying the reference list spreadsheet.
pub const EXCEL_FILE_PART: &str = "excel_file";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaMatchingSection {
    pub best_match_name: String,
    pub best_match_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaAnalysisSection {
    pub rmp: f64,
    pub cpi: f64,
    pub pi: f64,
    pub kinship_lr: f64,
    pub fsi: f64,
}

/// Success body of `POST /dna_matching`. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnaMatchingResponse {
    pub dna_matching: DnaMatchingSection,
    pub dna_analysis: DnaAnalysisSection,
}

impl From<DnaMatchingResponse> for AnalysisResult {
    fn from(value: DnaMatchingResponse) -> Self {
        Self {
            best_match: BestMatch {
                name: value.dna_matching.best_match_name,
                percentage: value.dna_matching.best_match_percentage,
            },
            analysis: AnalysisMetrics {
                rmp: value.dna_analysis.rmp,
                cpi: value.dna_analysis.cpi,
                pi: value.dna_analysis.pi,
                kinship_lr: value.dna_analysis.kinship_lr,
                fsi: value.dna_analysis.fsi,
            },
        }
    }
}

impl From<&AnalysisResult> for DnaMatchingResponse {
    fn from(value: &AnalysisResult) -> Self {
        Self {
            dna_matching: DnaMatchingSection {
                best_match_name: value.best_match.name.clone(),
                best_match_percentage: value.best_match.percentage,
            },
            dna_analysis: DnaAnalysisSection {
                rmp: value.analysis.rmp,
                cpi: value.analysis.cpi,
                pi: value.analysis.pi,
                kinship_lr: value.analysis.kinship_lr,
                fsi: value.analysis.fsi,
            },
        }
    }
}

/// Parses a success body, telling apart bodies that are not JSON at all from
/// JSON documents that lack the expected sections.
pub fn parse_dna_matching_response(body: &[u8]) -> Result<AnalysisResult, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(ProtocolError::MalformedJson)?;
    let response: DnaMatchingResponse =
        serde_json::from_value(value).map_err(ProtocolError::UnexpectedShape)?;
    Ok(response.into())
}

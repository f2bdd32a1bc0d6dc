use serde::{Deserialize, Serialize};

/// Best scoring entry of the reference list for the submitted sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestMatch {
    pub name: String,
    /// Similarity in percent, 0 to 100.
    pub percentage: f64,
}

/// Forensic statistics reported alongside the match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetrics {
    /// Random match probability.
    pub rmp: f64,
    /// Combined probability of inclusion.
    pub cpi: f64,
    /// Paternity index.
    pub pi: f64,
    pub kinship_lr: f64,
    /// Full sibling index.
    pub fsi: f64,
}

impl AnalysisMetrics {
    /// Metrics paired with their display labels, in fixed presentation order.
    pub fn labelled(&self) -> [(&'static str, f64); 5] {
        [
            ("RMP", self.rmp),
            ("CPI", self.cpi),
            ("PI", self.pi),
            ("Kinship LR", self.kinship_lr),
            ("FSI", self.fsi),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub best_match: BestMatch,
    pub analysis: AnalysisMetrics,
}

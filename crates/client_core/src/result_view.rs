//! Pure projection of a [`SubmissionOutcome`] into display content.

use shared::domain::AnalysisResult;

use crate::controller::SubmissionOutcome;

pub const MATCHING_GROUP_TITLE: &str = "DNA Matching Results";
pub const ANALYSIS_GROUP_TITLE: &str = "DNA Analysis";
pub const BUSY_TEXT: &str = "Analysing sequence...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayGroup {
    pub title: &'static str,
    pub fields: Vec<DisplayField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultDisplay {
    Empty,
    Busy,
    Error {
        message: String,
    },
    Report {
        best_match: DisplayGroup,
        analysis: DisplayGroup,
    },
}

impl ResultDisplay {
    pub fn submit_enabled(&self) -> bool {
        !matches!(self, Self::Busy)
    }

    /// Plain-text rendering, one entry per line.
    pub fn to_lines(&self) -> Vec<String> {
        match self {
            Self::Empty => Vec::new(),
            Self::Busy => vec![BUSY_TEXT.to_string()],
            Self::Error { message } => vec![format!("Error: {message}")],
            Self::Report {
                best_match,
                analysis,
            } => {
                let mut lines = Vec::new();
                for (index, group) in [best_match, analysis].into_iter().enumerate() {
                    if index > 0 {
                        lines.push(String::new());
                    }
                    lines.push(format!("{}:", group.title));
                    lines.extend(
                        group
                            .fields
                            .iter()
                            .map(|field| format!("{}: {}", field.label, field.value)),
                    );
                }
                lines
            }
        }
    }
}

pub fn render(outcome: &SubmissionOutcome) -> ResultDisplay {
    match outcome {
        SubmissionOutcome::Idle => ResultDisplay::Empty,
        SubmissionOutcome::Pending => ResultDisplay::Busy,
        SubmissionOutcome::Failure(message) => ResultDisplay::Error {
            message: message.clone(),
        },
        SubmissionOutcome::Success(result) => render_report(result),
    }
}

fn render_report(result: &AnalysisResult) -> ResultDisplay {
    let best_match = DisplayGroup {
        title: MATCHING_GROUP_TITLE,
        fields: vec![
            DisplayField {
                label: "Best Match Name",
                value: result.best_match.name.clone(),
            },
            DisplayField {
                label: "Best Match Percentage",
                value: format_percentage(result.best_match.percentage),
            },
        ],
    };
    let analysis = DisplayGroup {
        title: ANALYSIS_GROUP_TITLE,
        fields: result
            .analysis
            .labelled()
            .into_iter()
            .map(|(label, value)| DisplayField {
                label,
                value: format_metric(value),
            })
            .collect(),
    };
    ResultDisplay::Report {
        best_match,
        analysis,
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_fixed(value, 2))
}

/// Shortest decimal form that round-trips, with integral values printed
/// without a fractional part.
pub fn format_metric(value: f64) -> String {
    if value == 0.0 {
        // Also covers -0.0.
        return "0".to_string();
    }
    value.to_string()
}

/// Formats `value` with exactly `decimals` fractional digits, rounding half
/// away from zero on the shortest decimal representation of the value.
///
/// Rounding the binary value directly would turn 97.345 (stored as
/// 97.3449999...) into 97.34.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .map(|byte| byte - b'0')
        .collect();

    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|digit| *digit >= b'5');
    if round_up {
        let mut index = digits.len();
        loop {
            if index == 0 {
                digits.insert(0, 1);
                break;
            }
            index -= 1;
            if digits[index] == 9 {
                digits[index] = 0;
            } else {
                digits[index] += 1;
                break;
            }
        }
    }

    let int_len = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() && digits.iter().any(|digit| *digit != 0) {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|digit| char::from(b'0' + digit)));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|digit| char::from(b'0' + digit)));
    }
    out
}

#[cfg(test)]
#[path = "tests/result_view_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// Outcome of `Validator::check` (spec §4.4). Distinct from
/// `EvaluationVerdict` because rejection happens before either query is
/// ever executed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationVerdict {
    Ok,
    Rejected { reason: String },
}

impl ValidationVerdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationVerdict::Ok)
    }
}

/// Metadata attached to a `CORRECT` verdict (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    pub duration_ms: f64,
    pub rows_returned: usize,
}

/// The outcome of a full submission evaluation (spec §4.10, §6, §7).
///
/// Every failure mode described in §7 — validation rejection, timeout,
/// driver error, mismatch — is represented here rather than surfaced as
/// a `Result::Err` to the Orchestrator's caller; by the time a verdict
/// exists, nothing is left to propagate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum EvaluationVerdict {
    #[serde(rename = "CORRECT")]
    Correct { metadata: ExecutionMetadata },
    #[serde(rename = "INCORRECT")]
    Incorrect { feedback: String },
    #[serde(rename = "ERROR")]
    Error { feedback: String },
}

impl EvaluationVerdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, EvaluationVerdict::Correct { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_tagged_status() {
        let verdict = EvaluationVerdict::Correct {
            metadata: ExecutionMetadata {
                duration_ms: 12.5,
                rows_returned: 3,
            },
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["status"], "CORRECT");
        assert_eq!(json["metadata"]["rows_returned"], 3);
    }

    #[test]
    fn is_correct_only_for_correct_variant() {
        assert!(EvaluationVerdict::Correct {
            metadata: ExecutionMetadata {
                duration_ms: 0.0,
                rows_returned: 0
            }
        }
        .is_correct());
        assert!(!EvaluationVerdict::Incorrect {
            feedback: "x".into()
        }
        .is_correct());
    }
}

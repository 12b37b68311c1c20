use queryeval_core::{EvaluationVerdict, ExecutionMetadata, Question, TargetSelector, ValidationVerdict};

use crate::comparator::{compare, ComparisonOutcome};
use crate::executor::Executor;
use crate::governor::Governor;
use crate::validator::validate;

/// Composes the whole pipeline described in spec §4.10: admit, validate,
/// execute the solution, execute the participant, compare. Every branch
/// converts to an `EvaluationVerdict`; nothing escapes as a `Result`.
pub struct Orchestrator<'a> {
    governor: &'a Governor,
    executor: &'a Executor<'a>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(governor: &'a Governor, executor: &'a Executor<'a>) -> Self {
        Orchestrator { governor, executor }
    }

    pub async fn evaluate(
        &self,
        user_id: &str,
        question: &Question,
        participant_sql: &str,
        target: &TargetSelector,
    ) -> EvaluationVerdict {
        if !self.governor.admit(user_id) {
            return EvaluationVerdict::Error {
                feedback: "Rate limit exceeded. Please wait a moment before submitting again.".to_string(),
            };
        }

        if let ValidationVerdict::Rejected { reason } = validate(participant_sql, false) {
            return EvaluationVerdict::Incorrect { feedback: reason };
        }

        // The solution is not re-validated here; curators are trusted,
        // and it is assumed to have been validated once at authoring
        // time.
        let solution_outcome = self
            .executor
            .execute(&question.solution_sql, "system_eval", target)
            .await;
        let solution_result = match solution_outcome.result {
            Some(result) => result,
            None => {
                return EvaluationVerdict::Error {
                    feedback: "System Error: Failed to generate expected results. Please contact an admin."
                        .to_string(),
                };
            }
        };

        let participant_outcome = self.executor.execute(participant_sql, user_id, target).await;
        let participant_result = match participant_outcome.result {
            Some(result) => result,
            None => {
                return EvaluationVerdict::Incorrect {
                    feedback: participant_outcome
                        .error_message
                        .unwrap_or_else(|| "Query execution failed.".to_string()),
                };
            }
        };

        match compare(&participant_result, &solution_result) {
            ComparisonOutcome::Correct => EvaluationVerdict::Correct {
                metadata: ExecutionMetadata {
                    duration_ms: participant_outcome.duration_ms,
                    rows_returned: participant_result.row_count(),
                },
            },
            ComparisonOutcome::Incorrect { feedback } => EvaluationVerdict::Incorrect { feedback },
        }
    }
}

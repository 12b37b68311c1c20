use queryeval_core::EvaluationVerdict;

/// `Attempt.score` rollup (supplemented from the original prototype's
/// `AttemptAnswer.status` aggregation): `count(correct) / count(total)
/// x 100`. A thin consumer of core verdicts, with no persistence of its
/// own — the catalog owns storing the result.
pub fn score_attempt(verdicts: &[EvaluationVerdict]) -> f64 {
    if verdicts.is_empty() {
        return 0.0;
    }
    let correct = verdicts.iter().filter(|v| v.is_correct()).count();
    (correct as f64 / verdicts.len() as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use queryeval_core::ExecutionMetadata;

    fn correct() -> EvaluationVerdict {
        EvaluationVerdict::Correct {
            metadata: ExecutionMetadata {
                duration_ms: 1.0,
                rows_returned: 1,
            },
        }
    }

    fn incorrect() -> EvaluationVerdict {
        EvaluationVerdict::Incorrect {
            feedback: "nope".to_string(),
        }
    }

    #[test]
    fn empty_attempt_scores_zero() {
        assert_eq!(score_attempt(&[]), 0.0);
    }

    #[test]
    fn all_correct_scores_100() {
        assert_eq!(score_attempt(&[correct(), correct()]), 100.0);
    }

    #[test]
    fn half_correct_scores_50() {
        assert_eq!(score_attempt(&[correct(), incorrect()]), 50.0);
    }

    #[test]
    fn error_verdicts_count_as_incorrect_for_scoring() {
        let error = EvaluationVerdict::Error {
            feedback: "rate limited".to_string(),
        };
        assert_eq!(score_attempt(&[correct(), error]), 50.0);
    }
}

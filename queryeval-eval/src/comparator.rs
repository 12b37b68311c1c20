use queryeval_core::ResultSet;

/// The Comparator's raw outcome, before the Orchestrator attaches
/// execution metadata to a `Correct` result (spec §4.8, §4.10 step 5).
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    Correct,
    Incorrect { feedback: String },
}

/// Ordered decision procedure: first branch that triggers wins (spec
/// §4.8). No set-equality fallback regardless of any `order_sensitive`
/// flag on the question — see DESIGN.md for why that field is read but
/// not yet acted on here.
pub fn compare(participant: &ResultSet, solution: &ResultSet) -> ComparisonOutcome {
    if participant.columns.len() != solution.columns.len() {
        return ComparisonOutcome::Incorrect {
            feedback: format!(
                "Column count mismatch: You returned {} columns, expected {}. Check your SELECT clause.",
                participant.columns.len(),
                solution.columns.len()
            ),
        };
    }

    let participant_lower: Vec<String> = participant.columns.iter().map(|c| c.to_lowercase()).collect();
    let solution_lower: Vec<String> = solution.columns.iter().map(|c| c.to_lowercase()).collect();
    if participant_lower != solution_lower {
        return ComparisonOutcome::Incorrect {
            feedback: format!(
                "Column names or order mismatch. You have: {} | Expected: {}",
                participant.columns.join(", "),
                solution.columns.join(", ")
            ),
        };
    }

    if participant.rows == solution.rows {
        return ComparisonOutcome::Correct;
    }

    if participant.rows.len() != solution.rows.len() {
        return ComparisonOutcome::Incorrect {
            feedback: format!(
                "Row count mismatch: You returned {} rows, expected {}. Check your WHERE clause and filters.",
                participant.rows.len(),
                solution.rows.len()
            ),
        };
    }

    ComparisonOutcome::Incorrect {
        feedback: "Row count matches but values or order are incorrect. Check your WHERE conditions, JOINs, and ORDER BY clause.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queryeval_core::NormalizedValue;

    fn rs(columns: &[&str], rows: Vec<Vec<NormalizedValue>>) -> ResultSet {
        ResultSet::new(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn identical_result_sets_are_correct() {
        let a = rs(
            &["id"],
            vec![vec![NormalizedValue::Integer(1)], vec![NormalizedValue::Integer(2)]],
        );
        let b = rs(
            &["id"],
            vec![vec![NormalizedValue::Integer(1)], vec![NormalizedValue::Integer(2)]],
        );
        assert_eq!(compare(&a, &b), ComparisonOutcome::Correct);
    }

    #[test]
    fn column_count_mismatch_is_checked_first() {
        let participant = rs(&["id", "name"], vec![]);
        let solution = rs(&["id"], vec![]);
        match compare(&participant, &solution) {
            ComparisonOutcome::Incorrect { feedback } => {
                assert!(feedback.contains("Column count mismatch"));
            }
            other => panic!("expected incorrect, got {other:?}"),
        }
    }

    #[test]
    fn column_name_mismatch_is_case_insensitive_but_order_matters() {
        let participant = rs(&["ID", "Name"], vec![]);
        let solution = rs(&["id", "name"], vec![]);
        assert_eq!(compare(&participant, &solution), ComparisonOutcome::Correct);

        let reordered = rs(&["name", "id"], vec![]);
        match compare(&reordered, &solution) {
            ComparisonOutcome::Incorrect { feedback } => {
                assert!(feedback.contains("Column names or order mismatch"));
            }
            other => panic!("expected incorrect, got {other:?}"),
        }
    }

    #[test]
    fn row_count_mismatch_after_columns_match() {
        let participant = rs(&["id"], vec![vec![NormalizedValue::Integer(1)]]);
        let solution = rs(
            &["id"],
            vec![vec![NormalizedValue::Integer(1)], vec![NormalizedValue::Integer(2)]],
        );
        match compare(&participant, &solution) {
            ComparisonOutcome::Incorrect { feedback } => {
                assert!(feedback.contains("Row count mismatch"));
            }
            other => panic!("expected incorrect, got {other:?}"),
        }
    }

    #[test]
    fn same_row_count_wrong_values_or_order() {
        let participant = rs(&["id"], vec![vec![NormalizedValue::Integer(2)], vec![NormalizedValue::Integer(1)]]);
        let solution = rs(&["id"], vec![vec![NormalizedValue::Integer(1)], vec![NormalizedValue::Integer(2)]]);
        match compare(&participant, &solution) {
            ComparisonOutcome::Incorrect { feedback } => {
                assert!(feedback.contains("values or order are incorrect"));
            }
            other => panic!("expected incorrect, got {other:?}"),
        }
    }
}

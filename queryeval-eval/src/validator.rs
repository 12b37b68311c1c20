use once_cell::sync::Lazy;
use queryeval_core::ValidationVerdict;
use regex::Regex;

/// Banned server-side tokens (spec §4.4 rule 4), matched case-insensitive
/// as whole words. Not an exhaustive SQL grammar — see the module note
/// below.
const BANNED_TOKENS: &[&str] = &[
    "DROP",
    "DELETE",
    "UPDATE",
    "INSERT",
    "TRUNCATE",
    "ALTER",
    "EXEC",
    "EXECUTE",
    "MERGE",
    "GRANT",
    "REVOKE",
    "XP_CMDSHELL",
    "SP_CONFIGURE",
    "OPENROWSET",
    "OPENDATASOURCE",
    "CREATE",
    "INTO",
    "OUTPUT",
    "BACKUP",
    "RESTORE",
];

static BANNED_TOKEN_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    BANNED_TOKENS
        .iter()
        .map(|token| {
            let pattern = Regex::new(&format!(r"\b{token}\b")).expect("banned token pattern is valid");
            (*token, pattern)
        })
        .collect()
});

/// A string-level filter, not a parser; its guarantees are necessarily
/// conservative. It is intentionally strict: false positives on
/// participant queries are preferred over any false negative. Do not
/// get clever here — no comment-stripping, no tokenizing of string
/// literals. The rule set below IS the contract.
pub fn validate(sql: &str, is_solution: bool) -> ValidationVerdict {
    let clean = sql.trim();
    let upper = clean.to_uppercase();

    if !(upper.starts_with("SELECT") || upper.starts_with("WITH")) {
        return ValidationVerdict::Rejected {
            reason: "Query must be a SELECT statement.".to_string(),
        };
    }

    if clean.contains(';') {
        let without_trailing = clean.trim_end().trim_end_matches(';');
        if without_trailing.contains(';') {
            return ValidationVerdict::Rejected {
                reason: "Multi-statement queries are disallowed for security.".to_string(),
            };
        }
    }

    if clean.contains("--") || clean.contains("/*") {
        return ValidationVerdict::Rejected {
            reason: "SQL comments are disallowed to ensure clarity and block obfuscated injections."
                .to_string(),
        };
    }

    for (token, pattern) in BANNED_TOKEN_PATTERNS.iter() {
        if pattern.is_match(&upper) {
            return ValidationVerdict::Rejected {
                reason: format!("Unauthorized token detected: {token}"),
            };
        }
    }

    if !upper.contains("ORDER BY") {
        let reason = if is_solution {
            "Solution query must include ORDER BY for deterministic scoring."
        } else {
            "ORDER BY is required for deterministic scoring. Add ORDER BY and retry."
        };
        return ValidationVerdict::Rejected {
            reason: reason.to_string(),
        };
    }

    ValidationVerdict::Ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(sql: &str) -> bool {
        validate(sql, false).is_ok()
    }

    #[test]
    fn accepts_a_plain_select_with_order_by() {
        assert!(ok("SELECT id FROM users ORDER BY id"));
    }

    #[test]
    fn accepts_a_cte_prefixed_select() {
        assert!(ok("WITH x AS (SELECT 1 AS id) SELECT id FROM x ORDER BY id"));
    }

    #[test]
    fn rejects_non_select() {
        let verdict = validate("UPDATE users SET name = 'x'", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn rejects_embedded_semicolon() {
        let verdict = validate("SELECT 1; SELECT 2 ORDER BY 1", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn allows_a_single_trailing_semicolon() {
        assert!(ok("SELECT id FROM users ORDER BY id;"));
    }

    #[test]
    fn rejects_line_comments() {
        let verdict = validate("SELECT id FROM users -- sneaky\nORDER BY id", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn rejects_block_comments() {
        let verdict = validate("SELECT id /* x */ FROM users ORDER BY id", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn rejects_banned_token_as_whole_word() {
        let verdict = validate("SELECT id FROM users; DROP TABLE users ORDER BY id", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn does_not_false_positive_on_token_substrings() {
        // "into" is banned as a whole word, but "pointless" must not match.
        assert!(ok("SELECT pointless FROM users ORDER BY pointless"));
    }

    #[test]
    fn rejects_missing_order_by() {
        let verdict = validate("SELECT id FROM users", false);
        assert!(!verdict.is_ok());
    }

    #[test]
    fn solution_and_participant_missing_order_by_messages_differ() {
        let participant = validate("SELECT id FROM users", false);
        let solution = validate("SELECT id FROM users", true);
        match (participant, solution) {
            (ValidationVerdict::Rejected { reason: p }, ValidationVerdict::Rejected { reason: s }) => {
                assert_ne!(p, s);
            }
            _ => panic!("expected both to be rejected"),
        }
    }
}

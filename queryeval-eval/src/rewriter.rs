use once_cell::sync::Lazy;
use regex::Regex;

/// Matches an optional leading `WITH ... AS ( ... )` CTE, the `SELECT`
/// keyword, and an optional `DISTINCT`. Case-insensitive, dot-matches-
/// newline (`(?is)`) — the pattern IS the spec; do not try to generalize
/// it to nested CTEs or multiple CTEs.
static TOP_INJECTION_POINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^(\s*WITH\s+.*?\bAS\s+\(.*?\)\s*)?(\s*SELECT\b)(\s+DISTINCT\b)?")
        .expect("row-cap injection pattern is valid")
});

/// Injects a hard row cap into a validated `SELECT` without otherwise
/// altering semantics (spec §4.5). Only called after `validate` has
/// passed, so the input is known to start with `SELECT`/`WITH` and have
/// no embedded semicolons or comments.
pub fn rewrite(sql: &str, max_result_rows: u32) -> String {
    let cleaned = sql.trim().trim_end_matches(';');

    match TOP_INJECTION_POINT.captures(cleaned) {
        Some(caps) => {
            let matched = caps.get(0).expect("capture 0 is always the whole match");
            let g1 = caps.get(1).map_or("", |m| m.as_str());
            let g2 = caps.get(2).map_or("", |m| m.as_str());
            let g3 = caps.get(3).map_or("", |m| m.as_str());

            let mut rewritten = String::with_capacity(cleaned.len() + 16);
            rewritten.push_str(g1);
            rewritten.push_str(g2);
            rewritten.push_str(g3);
            rewritten.push_str(&format!(" TOP ({max_result_rows})"));
            rewritten.push_str(&cleaned[matched.end()..]);
            rewritten
        }
        // Fallback wrapper: best-effort only, can disrupt an outer
        // ORDER BY. Reached only when the primary regex does not match
        // (deeply nested CTE chains beyond a single leading CTE, e.g.).
        None => format!("SELECT TOP ({max_result_rows}) * FROM ({cleaned}) AS q"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_top_after_select() {
        let out = rewrite("SELECT id FROM users ORDER BY id", 100);
        assert_eq!(out, "SELECT TOP (100) id FROM users ORDER BY id");
    }

    #[test]
    fn preserves_distinct() {
        let out = rewrite("SELECT DISTINCT id FROM users ORDER BY id", 100);
        assert_eq!(out, "SELECT DISTINCT TOP (100) id FROM users ORDER BY id");
    }

    #[test]
    fn preserves_a_single_leading_cte() {
        let out = rewrite(
            "WITH x AS (SELECT 1 AS id) SELECT id FROM x ORDER BY id",
            50,
        );
        assert_eq!(
            out,
            "WITH x AS (SELECT 1 AS id) SELECT TOP (50) id FROM x ORDER BY id"
        );
    }

    #[test]
    fn strips_trailing_semicolon_before_rewriting() {
        let out = rewrite("SELECT id FROM users ORDER BY id;", 100);
        assert!(!out.ends_with(';'));
    }

    #[test]
    fn falls_back_to_wrapper_when_pattern_does_not_match() {
        // No `AS (` immediately following `WITH x`, so neither branch of
        // the optional CTE group nor a bare leading SELECT applies.
        let input = "WITH x (SELECT 1) SELECT id FROM x ORDER BY id";
        let out = rewrite(input, 100);
        assert!(out.starts_with("SELECT TOP (100) * FROM ("));
        assert!(out.contains(input));
    }
}

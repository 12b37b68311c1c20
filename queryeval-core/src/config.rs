use config::Environment;
use serde::Deserialize;

use crate::error::CoreError;

mod defaults {
    pub fn query_timeout_seconds() -> u64 {
        5
    }
    pub fn max_result_rows() -> u32 {
        100
    }
    pub fn run_rate_limit() -> u32 {
        10
    }
    pub fn max_concurrent_query_runs() -> u32 {
        20
    }
    pub fn decimal_precision() -> u32 {
        4
    }
    pub fn case_insensitive_columns() -> bool {
        true
    }
    pub fn strip_strings() -> bool {
        true
    }
    pub fn health_cooldown_seconds() -> u64 {
        300
    }
}

/// Mirrors the environment variables the `config` crate layers over the
/// defaults below. Field names are upper-cased by `Environment::default()`
/// to match the `SCREAMING_SNAKE_CASE` variables documented in spec §4.1.
#[derive(Debug, Deserialize)]
struct RawConfig {
    primary_conn: String,
    #[serde(default)]
    replica_conns: String,
    #[serde(default = "defaults::query_timeout_seconds")]
    query_timeout_seconds: u64,
    #[serde(default = "defaults::max_result_rows")]
    max_result_rows: u32,
    #[serde(default = "defaults::run_rate_limit")]
    run_rate_limit: u32,
    #[serde(default = "defaults::max_concurrent_query_runs")]
    max_concurrent_query_runs: u32,
    #[serde(default = "defaults::decimal_precision")]
    decimal_precision: u32,
    #[serde(default = "defaults::case_insensitive_columns")]
    case_insensitive_columns: bool,
    #[serde(default = "defaults::strip_strings")]
    strip_strings: bool,
    #[serde(default = "defaults::health_cooldown_seconds")]
    health_cooldown_seconds: u64,
}

/// Process-wide tunables for the evaluation pipeline (spec §4.1).
///
/// Built once at startup from the environment and handed down by
/// reference/`Arc` to the components in `queryeval-eval` and
/// `queryeval-db` that need it; nothing in this struct is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub primary_conn: String,
    pub replica_conns: Vec<String>,
    pub query_timeout_seconds: u64,
    pub max_result_rows: u32,
    pub run_rate_limit: u32,
    pub max_concurrent_query_runs: u32,
    pub decimal_precision: u32,
    pub case_insensitive_columns: bool,
    pub strip_strings: bool,
    pub health_cooldown_seconds: u64,
}

impl Config {
    /// Loads configuration from the process environment, the way
    /// `liminal-ingest` reads its `LIMINAL_*` variables, but layered
    /// through the `config` crate instead of hand-rolled `env::var` calls
    /// so defaults and required-ness live in one place.
    pub fn from_env() -> Result<Self, CoreError> {
        let raw = config::Config::builder()
            .add_source(Environment::default())
            .build()
            .map_err(|e| CoreError::InvalidConfig("<environment>", e.to_string()))?;

        let raw: RawConfig = raw.try_deserialize().map_err(|e| {
            if std::env::var("PRIMARY_CONN").is_err() {
                CoreError::MissingConfig("PRIMARY_CONN")
            } else {
                CoreError::InvalidConfig("<environment>", e.to_string())
            }
        })?;

        Ok(Config {
            primary_conn: raw.primary_conn,
            replica_conns: split_replica_conns(&raw.replica_conns),
            query_timeout_seconds: raw.query_timeout_seconds,
            max_result_rows: raw.max_result_rows,
            run_rate_limit: raw.run_rate_limit,
            max_concurrent_query_runs: raw.max_concurrent_query_runs,
            decimal_precision: raw.decimal_precision,
            case_insensitive_columns: raw.case_insensitive_columns,
            strip_strings: raw.strip_strings,
            health_cooldown_seconds: raw.health_cooldown_seconds,
        })
    }

    /// Convenience constructor for tests and `qbctl`, where a config is
    /// assembled in code rather than read from the environment.
    pub fn new(primary_conn: impl Into<String>) -> Self {
        Config {
            primary_conn: primary_conn.into(),
            replica_conns: Vec::new(),
            query_timeout_seconds: defaults::query_timeout_seconds(),
            max_result_rows: defaults::max_result_rows(),
            run_rate_limit: defaults::run_rate_limit(),
            max_concurrent_query_runs: defaults::max_concurrent_query_runs(),
            decimal_precision: defaults::decimal_precision(),
            case_insensitive_columns: defaults::case_insensitive_columns(),
            strip_strings: defaults::strip_strings(),
            health_cooldown_seconds: defaults::health_cooldown_seconds(),
        }
    }

    pub fn with_replica_conns(mut self, replica_conns: Vec<String>) -> Self {
        self.replica_conns = replica_conns;
        self
    }
}

fn split_replica_conns(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_replica_conns() {
        let got = split_replica_conns(" conn-a , conn-b,, conn-c ");
        assert_eq!(got, vec!["conn-a", "conn-b", "conn-c"]);
    }

    #[test]
    fn empty_replica_conns_is_empty_vec() {
        assert!(split_replica_conns("").is_empty());
        assert!(split_replica_conns("   ").is_empty());
    }

    #[test]
    fn new_applies_documented_defaults() {
        let cfg = Config::new("primary");
        assert_eq!(cfg.query_timeout_seconds, 5);
        assert_eq!(cfg.max_result_rows, 100);
        assert_eq!(cfg.run_rate_limit, 10);
        assert_eq!(cfg.max_concurrent_query_runs, 20);
        assert_eq!(cfg.decimal_precision, 4);
        assert!(cfg.case_insensitive_columns);
        assert!(cfg.strip_strings);
        assert_eq!(cfg.health_cooldown_seconds, 300);
        assert!(cfg.replica_conns.is_empty());
    }

    #[test]
    fn with_replica_conns_overrides() {
        let cfg = Config::new("primary").with_replica_conns(vec!["r1".into()]);
        assert_eq!(cfg.replica_conns, vec!["r1".to_string()]);
    }
}

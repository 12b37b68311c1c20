use serde::{Deserialize, Serialize};

/// A single connection target, opaque to everything above `queryeval-db`.
///
/// The `connection_string` is tiberius-compatible (the Rust ecosystem's
/// equivalent of an ODBC connection string for this driver) and is never
/// logged in full — only `label` appears in tracing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub label: String,
    pub connection_string: String,
}

impl ConnectionSpec {
    pub fn new(label: impl Into<String>, connection_string: impl Into<String>) -> Self {
        ConnectionSpec {
            label: label.into(),
            connection_string: connection_string.into(),
        }
    }
}

/// How the Executor should pick a connection for a given run (spec §4.6).
///
/// `UseRouter` defers to `queryeval-db::Router`'s replica-failover
/// selection; `UseExplicit` bypasses the router entirely, which is how
/// `qbctl` and the sandbox run-query path talk to a single named target.
#[derive(Debug, Clone)]
pub enum TargetSelector {
    UseRouter { force_primary: bool },
    UseExplicit { spec: ConnectionSpec },
}

impl TargetSelector {
    pub fn router() -> Self {
        TargetSelector::UseRouter {
            force_primary: false,
        }
    }

    pub fn router_primary_only() -> Self {
        TargetSelector::UseRouter {
            force_primary: true,
        }
    }

    pub fn explicit(spec: ConnectionSpec) -> Self {
        TargetSelector::UseExplicit { spec }
    }
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use queryeval_core::ConnectionSpec;
use tracing::warn;

use crate::connect::{self, Connection};
use crate::error::DbError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Replica-failover router (spec §4.2), grounded on the prototype's
/// `AssessmentDBRouter`: round-robin over healthy replicas, always
/// falling back to primary, with a passive cooldown instead of an
/// active health prober.
pub struct Router {
    primary: ConnectionSpec,
    replicas: Vec<ConnectionSpec>,
    cursor: AtomicUsize,
    unhealthy: Mutex<HashMap<String, Instant>>,
    health_cooldown: Duration,
}

impl Router {
    pub fn new(primary: ConnectionSpec, replicas: Vec<ConnectionSpec>, health_cooldown: Duration) -> Self {
        Router {
            primary,
            replicas,
            cursor: AtomicUsize::new(0),
            unhealthy: Mutex::new(HashMap::new()),
            health_cooldown,
        }
    }

    fn is_healthy(&self, label: &str) -> bool {
        let mut unhealthy = self.unhealthy.lock().unwrap();
        match unhealthy.get(label) {
            None => true,
            Some(marked_at) => {
                if marked_at.elapsed() > self.health_cooldown {
                    unhealthy.remove(label);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Primary failures are never recorded — it is the fallback of last
    /// resort and its transient failures must always surface.
    fn mark_unhealthy(&self, spec: &ConnectionSpec) {
        if spec.label != self.primary.label {
            self.unhealthy
                .lock()
                .unwrap()
                .insert(spec.label.clone(), Instant::now());
        }
    }

    fn pick_replica(&self) -> Option<ConnectionSpec> {
        let healthy: Vec<&ConnectionSpec> = self
            .replicas
            .iter()
            .filter(|r| self.is_healthy(&r.label))
            .collect();
        if healthy.is_empty() {
            return None;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % healthy.len();
        Some(healthy[idx].clone())
    }

    /// Returns a live connection and the spec it ultimately connected to.
    pub async fn acquire(&self, force_primary: bool) -> Result<(Connection, ConnectionSpec), DbError> {
        let mut attempts = Vec::with_capacity(2);
        if !force_primary {
            if let Some(picked) = self.pick_replica() {
                attempts.push(picked);
            }
        }
        attempts.push(self.primary.clone());

        let mut last_error = None;
        for spec in attempts {
            match connect::connect(&spec.connection_string, CONNECT_TIMEOUT).await {
                Ok(conn) => return Ok((conn, spec)),
                Err(e) => {
                    warn!(target = %spec.label, error = %e, "connection attempt failed");
                    self.mark_unhealthy(&spec);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(DbError::NoTargetsAvailable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(label: &str) -> ConnectionSpec {
        ConnectionSpec::new(label, format!("server=tcp:{label},1433"))
    }

    #[test]
    fn primary_is_never_marked_unhealthy() {
        let router = Router::new(spec("primary"), vec![spec("r1")], Duration::from_secs(300));
        router.mark_unhealthy(&spec("primary"));
        assert!(router.is_healthy("primary"));
    }

    #[test]
    fn replica_recovers_after_cooldown() {
        let router = Router::new(spec("primary"), vec![spec("r1")], Duration::from_millis(0));
        router.mark_unhealthy(&spec("r1"));
        // cooldown is 0, so elapsed() > 0 almost immediately
        std::thread::sleep(Duration::from_millis(1));
        assert!(router.is_healthy("r1"));
    }

    #[test]
    fn replica_stays_unhealthy_within_cooldown() {
        let router = Router::new(spec("primary"), vec![spec("r1")], Duration::from_secs(300));
        router.mark_unhealthy(&spec("r1"));
        assert!(!router.is_healthy("r1"));
    }

    #[test]
    fn round_robin_cursor_advances() {
        let router = Router::new(
            spec("primary"),
            vec![spec("r1"), spec("r2")],
            Duration::from_secs(300),
        );
        let first = router.pick_replica().unwrap();
        let second = router.pick_replica().unwrap();
        assert_ne!(first.label, second.label);
    }
}

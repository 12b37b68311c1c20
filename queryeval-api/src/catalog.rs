use async_trait::async_trait;
use queryeval_core::{EvaluationVerdict, Question, QuestionId, TargetSelector};

/// Opaque identifier for a catalog attempt. Like `QuestionId`, this
/// crate only needs it as an opaque key to pass back to `Catalog`.
pub type AttemptId = String;

/// The minimal async surface the Orchestrator's HTTP caller needs from
/// the catalog (questions, assessments, assignments, attempts, auth,
/// persistence). None of that is implemented here — it's a real system
/// with its own database, migrations, and CRUD surface, entirely out of
/// scope for this crate. A trivial in-memory implementation exists
/// under `tests/` to exercise the HTTP surface end to end.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn question(&self, id: &QuestionId) -> anyhow::Result<Question>;
    async fn database_target(&self, question_id: &QuestionId) -> anyhow::Result<TargetSelector>;
    async fn record_answer(
        &self,
        attempt: &AttemptId,
        question: &QuestionId,
        verdict: &EvaluationVerdict,
    ) -> anyhow::Result<()>;
}

/// Opaque identifier for a catalog question. The catalog itself is out
/// of scope (see `queryeval-api::catalog::Catalog`); this crate only
/// needs something `Clone + Eq` to key off of.
pub type QuestionId = String;

/// The subset of a catalog `Question` the evaluation pipeline needs
/// (spec §3). Everything else about a question — prompt, difficulty,
/// tags — belongs to the out-of-scope catalog.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub solution_sql: String,
    /// When true, a participant's row order must match the solution's
    /// exactly. Read and threaded through by the Orchestrator, but the
    /// Comparator does not act on it yet — see DESIGN.md's Open
    /// Question entry for `order_sensitive`.
    pub order_sensitive: bool,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, solution_sql: impl Into<String>) -> Self {
        Question {
            id: id.into(),
            solution_sql: solution_sql.into(),
            order_sensitive: false,
        }
    }

    pub fn order_sensitive(mut self, order_sensitive: bool) -> Self {
        self.order_sensitive = order_sensitive;
        self
    }
}

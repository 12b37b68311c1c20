use std::sync::Arc;

use queryeval_core::Config;
use queryeval_db::Router as DbRouter;
use queryeval_eval::Governor;

use crate::catalog::Catalog;

/// Shared process state handed to every handler. Everything here is
/// `Arc`-wrapped so handlers can clone it cheaply per request, the way
/// `liminalqa-ingest`'s `AppState` wraps its `LiminalDB` handle.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub governor: Arc<Governor>,
    pub router: Arc<DbRouter>,
    pub config: Arc<Config>,
    pub auth_token: Option<String>,
}

use crate::auth::Authorizer;
use envsense_store::SummaryService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub summaries: SummaryService,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(summaries: SummaryService, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { summaries, authorizer }
    }
}

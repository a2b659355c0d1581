use std::sync::Arc;
use xt_core::{HeadlinesSource, SummaryModel};
use crate::cors::OriginGate;

pub struct AppState {
    pub summary_model: Arc<dyn SummaryModel>,
    pub headlines: Arc<dyn HeadlinesSource>,
    pub origin_gate: OriginGate,
}

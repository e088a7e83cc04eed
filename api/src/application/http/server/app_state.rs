use std::sync::Arc;

use diasense_core::application::DiaSenseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: Arc<DiaSenseService>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DiaSenseService) -> Self {
        Self {
            args,
            service: Arc::new(service),
        }
    }
}

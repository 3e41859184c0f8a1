//! State

use std::sync::Arc;

use product_app::context::AppContext;

use crate::shutdown::ShutdownTrigger;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) shutdown: ShutdownTrigger,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, shutdown: ShutdownTrigger) -> Self {
        Self { app, shutdown }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, shutdown: ShutdownTrigger) -> Arc<Self> {
        Arc::new(Self::new(app, shutdown))
    }
}

//! Service-level test infrastructure.


pub(crate) use context::TestContext;

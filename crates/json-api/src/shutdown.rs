//! Graceful shutdown: OS signals and the `/shutdown` route.

use std::{future, io, sync::Arc};

use salvo::{oapi::ToSchema, prelude::*, server::ServerHandle};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{signal, sync::Notify};
use tracing::{info, warn};

use crate::{errors::ApiError, extensions::*, state::State};

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),

    #[cfg(windows)]
    #[error("failed to install Windows terminate handler: {0}")]
    Terminate(#[source] io::Error),
}

/// Lets request handlers ask the server to stop.
#[derive(Debug, Clone, Default)]
pub(crate) struct ShutdownTrigger {
    notify: Arc<Notify>,
}

impl ShutdownTrigger {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Request a shutdown. A permit is stored if nobody is waiting yet.
    pub(crate) fn trigger(&self) {
        self.notify.notify_one();
    }

    pub(crate) async fn triggered(&self) {
        self.notify.notified().await;
    }
}

/// Wait for Ctrl+C, SIGTERM or a [`ShutdownTrigger`], then stop the server
/// gracefully.
///
/// A signal handler that fails to install is logged and skipped; the other
/// sources keep working.
pub(crate) async fn listen(handle: ServerHandle, trigger: ShutdownTrigger) {
    let reason = wait_for_shutdown(ctrl_c(), terminate(), &trigger).await;

    info!("{reason}");

    handle.stop_graceful(None);
}

async fn ctrl_c() -> Result<(), ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(windows)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignalError::Terminate)?
        .recv()
        .await;

    Ok(())
}

async fn wait_for_shutdown<C, T>(
    ctrl_c: C,
    terminate: T,
    trigger: &ShutdownTrigger,
) -> &'static str
where
    C: Future<Output = Result<(), ShutdownSignalError>>,
    T: Future<Output = Result<(), ShutdownSignalError>>,
{
    tokio::select! {
        () = or_pending(ctrl_c) => "ctrl_c signal received",
        () = or_pending(terminate) => "terminate signal received",
        () = trigger.triggered() => "shutdown requested over http",
    }
}

/// Resolves when the signal fires; never resolves if its handler failed.
async fn or_pending<F>(signal: F)
where
    F: Future<Output = Result<(), ShutdownSignalError>>,
{
    if let Err(source) = signal.await {
        warn!("{source}");

        future::pending::<()>().await;
    }
}

/// Shutdown acknowledgement
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ShutdownResponse {
    pub result: String,
}

/// Shutdown Handler
///
/// Stops accepting connections and lets in-flight requests finish.
#[endpoint(tags("admin"), summary = "Shut down the server")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ShutdownResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state.shutdown.trigger();

    Ok(Json(ShutdownResponse {
        result: "shutting down".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use tokio::time::timeout;

    use product_app::domain::products::MockProductsService;

    use crate::test_helpers::{products_service_with_trigger, strict_products_mock};

    use super::*;

    fn make_service(trigger: ShutdownTrigger) -> Service {
        products_service_with_trigger(
            strict_products_mock(MockProductsService::new()),
            trigger,
            Router::with_path("shutdown").get(handler).post(handler),
        )
    }

    #[tokio::test]
    async fn trigger_before_wait_is_not_lost() -> TestResult {
        let trigger = ShutdownTrigger::new();

        trigger.clone().trigger();

        timeout(Duration::from_secs(1), trigger.triggered()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn get_shutdown_acknowledges_and_triggers() -> TestResult {
        let trigger = ShutdownTrigger::new();

        let mut res = TestClient::get("http://example.com/shutdown")
            .send(&make_service(trigger.clone()))
            .await;

        let body: ShutdownResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.result, "shutting down");

        timeout(Duration::from_secs(1), trigger.triggered()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn post_shutdown_also_triggers() -> TestResult {
        let trigger = ShutdownTrigger::new();

        let res = TestClient::post("http://example.com/shutdown")
            .send(&make_service(trigger.clone()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        timeout(Duration::from_secs(1), trigger.triggered()).await?;

        Ok(())
    }

    fn failed_install() -> impl Future<Output = Result<(), ShutdownSignalError>> {
        async { Err(ShutdownSignalError::CtrlC(io::Error::other("no signal support"))) }
    }

    #[tokio::test]
    async fn shutdown_route_stops_a_running_server() -> TestResult {
        let trigger = ShutdownTrigger::new();
        let server = Server::new(TcpListener::new("127.0.0.1:0").bind().await);

        tokio::spawn(listen(server.handle(), trigger.clone()));

        let res = TestClient::post("http://example.com/shutdown")
            .send(&make_service(trigger))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        timeout(Duration::from_secs(5), server.serve(Router::new())).await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_signal_handlers_do_not_end_the_wait() {
        let trigger = ShutdownTrigger::new();

        let waited = timeout(
            Duration::from_millis(50),
            wait_for_shutdown(failed_install(), failed_install(), &trigger),
        )
        .await;

        assert!(waited.is_err(), "install failures must not count as a signal");
    }

    #[tokio::test]
    async fn trigger_still_fires_when_signal_handlers_fail() -> TestResult {
        let trigger = ShutdownTrigger::new();

        trigger.trigger();

        let reason = timeout(
            Duration::from_secs(1),
            wait_for_shutdown(failed_install(), failed_install(), &trigger),
        )
        .await?;

        assert_eq!(reason, "shutdown requested over http");

        Ok(())
    }
}

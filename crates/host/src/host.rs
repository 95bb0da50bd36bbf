//! The request dispatcher.
//!
//! Resolves the plugin and action named by a request, runs the action's
//! read / check / execute stages, and folds every outcome, panics
//! included, into a [`PluginResponse`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use serde_json::Value;
use stratus_action::ActionContext;
use stratus_plugin::PluginRegistry;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::HostError;
use crate::request::{PluginRequest, PluginResponse};

/// Dispatches requests to the plugins of one registry.
///
/// Cheap to clone. Requests are independent of each other and may be
/// processed concurrently; the registry is the only thing they share.
#[derive(Debug, Clone)]
pub struct Host {
    registry: Arc<PluginRegistry>,
}

impl Host {
    /// Create a host over a populated registry.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Access the plugin registry.
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Process a request. Never fails: errors become failure responses.
    pub async fn process(&self, request: PluginRequest) -> PluginResponse {
        self.process_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Like [`process`](Self::process), aborting state waits once `cancel`
    /// fires.
    #[tracing::instrument(
        name = "process",
        skip_all,
        fields(plugin = %request.plugin, action = %request.action, request_id = tracing::field::Empty)
    )]
    pub async fn process_with_cancel(
        &self,
        request: PluginRequest,
        cancel: CancellationToken,
    ) -> PluginResponse {
        let request_id = Uuid::new_v4();
        tracing::Span::current().record("request_id", tracing::field::display(request_id));
        let ctx = ActionContext::new(request_id).with_cancellation(cancel);
        let started = Instant::now();

        tracing::info!("request started");
        let outcome = AssertUnwindSafe(self.dispatch(request, &ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(HostError::Panicked(panic_message(panic.as_ref()))));
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(results) => {
                tracing::info!(elapsed_ms, "request completed");
                PluginResponse::success(results)
            }
            Err(e) => {
                tracing::error!(elapsed_ms, kind = e.kind(), error = %e, "request failed");
                PluginResponse::failure(&e)
            }
        }
    }

    async fn dispatch(&self, request: PluginRequest, ctx: &ActionContext) -> Result<Value, HostError> {
        let plugin = self.registry.lookup(&request.plugin)?;
        let handler = plugin.action_by_name(&request.action)?;

        tracing::debug!(stage = "read_param", "decoding parameters");
        let input = handler.read_param(request.parameters)?;

        tracing::debug!(stage = "check_param", input = input.type_name(), "validating parameters");
        handler.check_param(&input)?;

        tracing::debug!(stage = "execute", "executing action");
        let results = handler.execute(input, ctx).await?;
        Ok(results)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}

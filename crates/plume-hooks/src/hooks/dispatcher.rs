//! Hook dispatcher: invokes every handler for an event and collects output.
//!
//! - Handlers run one after another in registration order, each awaited
//!   before the next starts, so output order is deterministic.
//! - No handlers registered is not an error; the result is simply empty.
//! - A failing handler aborts the dispatch. The error is wrapped with the
//!   module id and event name and returned to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use plume_core::error::{AppError, ErrorKind};
use plume_core::result::AppResult;

use super::definitions::{HookContext, HookOutput, Record};
use super::registry::HookRegistry;
use super::shaper::{FieldRules, Shape, shape};

/// Output of one handler, attributed to the module that produced it.
#[derive(Debug, Clone)]
pub struct HandlerOutput {
    /// Module that registered the handler.
    pub module_id: String,
    /// What the handler returned.
    pub output: HookOutput,
}

/// Dispatches events to all registered handlers.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    /// Hook registry.
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher.
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Invokes every handler for `event` and returns each handler's output
    /// together with its module id, in registration order.
    pub async fn invoke_each(&self, event: &str, ctx: &HookContext) -> AppResult<Vec<HandlerOutput>> {
        let handlers = self.registry.get_handlers(event).await;

        if handlers.is_empty() {
            debug!(event = %event, "No handlers registered");
            return Ok(Vec::new());
        }

        debug!(
            event = %event,
            handler_count = handlers.len(),
            invocation_id = %ctx.invocation_id,
            "Dispatching hook"
        );

        let mut outputs = Vec::with_capacity(handlers.len());
        for entry in &handlers {
            let output = entry.handler.handle(ctx).await.map_err(|e| {
                error!(
                    event = %event,
                    module_id = %entry.module_id,
                    error = %e,
                    "Hook handler failed"
                );
                AppError::with_source(
                    ErrorKind::Hook,
                    format!("handler of module '{}' failed on '{}'", entry.module_id, event),
                    e,
                )
            })?;

            debug!(
                event = %event,
                module_id = %entry.module_id,
                records = output.as_records().len(),
                "Handler returned"
            );

            outputs.push(HandlerOutput {
                module_id: entry.module_id.clone(),
                output,
            });
        }

        Ok(outputs)
    }

    /// Invokes every handler for `event` and returns their raw outputs in
    /// registration order.
    pub async fn invoke_all(&self, event: &str, ctx: &HookContext) -> AppResult<Vec<HookOutput>> {
        let outputs = self.invoke_each(event, ctx).await?;
        Ok(outputs.into_iter().map(|o| o.output).collect())
    }

    /// Invokes `event` and flattens every handler's records into one list.
    pub async fn invoke_records(&self, event: &str, ctx: &HookContext) -> AppResult<Vec<Record>> {
        let outputs = self.invoke_all(event, ctx).await?;
        Ok(outputs.into_iter().flat_map(HookOutput::into_records).collect())
    }

    /// Invokes `event` and shapes the flattened records with `rules`.
    ///
    /// Malformed records are dropped; only handler failures are errors.
    pub async fn invoke_shaped_with<T: DeserializeOwned>(
        &self,
        event: &str,
        ctx: &HookContext,
        rules: &FieldRules,
    ) -> AppResult<Vec<T>> {
        let records = self.invoke_records(event, ctx).await?;
        let received = records.len();
        let shaped: Vec<T> = shape(&records, rules);

        if shaped.len() < received {
            debug!(
                event = %event,
                received = received,
                dropped = received - shaped.len(),
                "Dropped malformed contributions"
            );
        }

        Ok(shaped)
    }

    /// Invokes `event` and shapes the records into `T` using its own rules.
    pub async fn invoke_shaped<T: Shape>(&self, event: &str, ctx: &HookContext) -> AppResult<Vec<T>> {
        self.invoke_shaped_with(event, ctx, &T::field_rules()).await
    }

    /// Invokes every handler for `event`, discarding their output.
    pub async fn fire(&self, event: &str, ctx: &HookContext) -> AppResult<()> {
        self.invoke_each(event, ctx).await.map(|_| ())
    }

    /// Returns a reference to the hook registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{ClosureHandler, StaticRecordsHandler};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(value: serde_json::Value) -> Record {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    fn setup() -> (Arc<HookRegistry>, HookDispatcher) {
        let registry = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(registry.clone());
        (registry, dispatcher)
    }

    #[tokio::test]
    async fn test_no_handlers_yields_empty() {
        let (_, dispatcher) = setup();
        let outputs = dispatcher
            .invoke_all("frontend-page-install", &HookContext::new())
            .await
            .unwrap();
        assert!(outputs.is_empty());
    }

    #[tokio::test]
    async fn test_outputs_follow_registration_order() {
        let (registry, dispatcher) = setup();
        for module in ["system", "frontend", "blog"] {
            registry
                .register(
                    "frontend-page-install",
                    module,
                    Arc::new(StaticRecordsHandler::new(vec![record(json!({ "from": module }))])),
                )
                .await;
        }

        let outputs = dispatcher
            .invoke_each("frontend-page-install", &HookContext::new())
            .await
            .unwrap();
        let order: Vec<&str> = outputs.iter().map(|o| o.module_id.as_str()).collect();
        assert_eq!(order, vec!["system", "frontend", "blog"]);

        let records = dispatcher
            .invoke_records("frontend-page-install", &HookContext::new())
            .await
            .unwrap();
        let from: Vec<&str> = records.iter().filter_map(|r| r["from"].as_str()).collect();
        assert_eq!(from, vec!["system", "frontend", "blog"]);
    }

    #[tokio::test]
    async fn test_unit_outputs_are_kept_but_contribute_no_records() {
        let (registry, dispatcher) = setup();
        registry
            .register(
                "frontend-page-install",
                "audit",
                Arc::new(ClosureHandler::new(|_| async { Ok(HookOutput::Unit) })),
            )
            .await;

        let ctx = HookContext::new();
        assert_eq!(
            dispatcher.invoke_all("frontend-page-install", &ctx).await.unwrap(),
            vec![HookOutput::Unit]
        );
        assert!(
            dispatcher
                .invoke_records("frontend-page-install", &ctx)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_failure_names_module_and_event_and_stops() {
        let (registry, dispatcher) = setup();
        let later_calls = Arc::new(AtomicUsize::new(0));
        let counter = later_calls.clone();

        registry
            .register(
                "frontend-main-menu-install",
                "broken",
                Arc::new(ClosureHandler::new(|_| async {
                    Err(AppError::internal("template missing"))
                })),
            )
            .await;
        registry
            .register(
                "frontend-main-menu-install",
                "blog",
                Arc::new(ClosureHandler::new(move |_| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok(HookOutput::Unit)
                    }
                })),
            )
            .await;

        let err = dispatcher
            .fire("frontend-main-menu-install", &HookContext::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Hook);
        assert!(err.message.contains("'broken'"));
        assert!(err.message.contains("frontend-main-menu-install"));
        assert!(err.chain().contains("template missing"));
        assert_eq!(later_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_context_reaches_handlers() {
        let (registry, dispatcher) = setup();
        registry
            .register(
                "frontend-page-install",
                "echo",
                Arc::new(ClosureHandler::new(|ctx| {
                    let locale = ctx.get_string("locale").unwrap_or("none").to_string();
                    async move { Ok(HookOutput::records([record(json!({ "locale": locale }))])) }
                })),
            )
            .await;

        let ctx = HookContext::new().with_string("locale", "hu");
        let records = dispatcher
            .invoke_records("frontend-page-install", &ctx)
            .await
            .unwrap();
        assert_eq!(records[0]["locale"], json!("hu"));
    }
}

//! Hook registry: modules register handlers by event name.
//!
//! Handlers for one event are kept in registration order, which is the
//! module load order. There is no de-duplication and no unregistration:
//! a registry is built once at startup and lives for the whole process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use plume_core::result::AppResult;

use super::definitions::{HookContext, HookOutput};

/// Trait for hook handler implementations.
#[async_trait]
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Handles a hook invocation.
    ///
    /// An `Err` means the handler itself is broken; it is propagated to the
    /// caller of the dispatch.
    async fn handle(&self, ctx: &HookContext) -> AppResult<HookOutput>;
}

/// A handler together with the module and event it was registered under.
#[derive(Debug, Clone)]
pub struct RegisteredHandler {
    /// Module that contributed this handler.
    pub module_id: String,
    /// Event the handler responds to.
    pub event: String,
    /// The handler.
    pub handler: Arc<dyn HookHandler>,
}

/// Registry of hook handlers organized by event name.
#[derive(Debug)]
pub struct HookRegistry {
    /// Event name → handlers in registration order.
    handlers: RwLock<HashMap<String, Vec<RegisteredHandler>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a handler to the list for `event`.
    pub async fn register(&self, event: &str, module_id: &str, handler: Arc<dyn HookHandler>) {
        let mut handlers = self.handlers.write().await;
        let entries = handlers.entry(event.to_string()).or_default();

        entries.push(RegisteredHandler {
            module_id: module_id.to_string(),
            event: event.to_string(),
            handler,
        });

        info!(
            event = %event,
            module_id = %module_id,
            position = entries.len(),
            "Hook handler registered"
        );
    }

    /// Returns all handlers for an event, in registration order.
    pub async fn get_handlers(&self, event: &str) -> Vec<RegisteredHandler> {
        let handlers = self.handlers.read().await;
        handlers.get(event).cloned().unwrap_or_default()
    }

    /// Returns the number of handlers registered for an event.
    pub async fn handler_count(&self, event: &str) -> usize {
        let handlers = self.handlers.read().await;
        handlers.get(event).map(Vec::len).unwrap_or(0)
    }

    /// Returns every event with the module ids of its handlers, sorted by
    /// event name.
    pub async fn snapshot(&self) -> Vec<(String, Vec<String>)> {
        let handlers = self.handlers.read().await;
        let mut events: Vec<(String, Vec<String>)> = handlers
            .iter()
            .map(|(event, entries)| {
                (
                    event.clone(),
                    entries.iter().map(|e| e.module_id.clone()).collect(),
                )
            })
            .collect();
        events.sort_by(|a, b| a.0.cmp(&b.0));
        events
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::StaticRecordsHandler;

    fn empty() -> Arc<dyn HookHandler> {
        Arc::new(StaticRecordsHandler::new(Vec::new()))
    }

    #[tokio::test]
    async fn test_register_keeps_order_and_duplicates() {
        let registry = HookRegistry::new();
        registry.register("frontend-page-install", "blog", empty()).await;
        registry.register("frontend-page-install", "frontend", empty()).await;
        registry.register("frontend-page-install", "blog", empty()).await;

        let modules: Vec<String> = registry
            .get_handlers("frontend-page-install")
            .await
            .into_iter()
            .map(|h| h.module_id)
            .collect();
        assert_eq!(modules, vec!["blog", "frontend", "blog"]);
    }

    #[tokio::test]
    async fn test_unknown_event_has_no_handlers() {
        let registry = HookRegistry::new();
        assert!(registry.get_handlers("nobody-listens").await.is_empty());
        assert_eq!(registry.handler_count("nobody-listens").await, 0);
    }

    #[tokio::test]
    async fn test_snapshot_sorted_by_event() {
        let registry = HookRegistry::new();
        registry.register("user-permission-install", "blog", empty()).await;
        registry.register("frontend-page-install", "blog", empty()).await;

        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot[0].0, "frontend-page-install");
        assert_eq!(snapshot[1].1, vec!["blog"]);
    }
}

//! Ready-made [`HookHandler`] implementations.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use plume_core::result::AppResult;

use crate::hooks::definitions::{HookContext, HookOutput, Record};
use crate::hooks::registry::HookHandler;

type HandlerFuture = Pin<Box<dyn Future<Output = AppResult<HookOutput>> + Send>>;

type BoxedHandlerFn = dyn Fn(&HookContext) -> HandlerFuture + Send + Sync;

/// A closure-based hook handler for quick handler creation.
///
/// The closure gets the context by reference and returns a future that
/// owns whatever it needs, so copy values out of the context before the
/// `async move` block.
pub struct ClosureHandler {
    handler: Arc<BoxedHandlerFn>,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    /// Creates a new closure-based handler.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(&HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<HookOutput>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |ctx: &HookContext| -> HandlerFuture { Box::pin(handler(ctx)) }),
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, ctx: &HookContext) -> AppResult<HookOutput> {
        (self.handler)(ctx).await
    }
}

/// Returns the same records on every invocation.
///
/// Used for declarative contributions such as catalog entries, permission
/// lists, and fixed menu items.
#[derive(Debug, Clone)]
pub struct StaticRecordsHandler {
    records: Vec<Record>,
}

impl StaticRecordsHandler {
    /// Wraps a fixed list of records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Serializes typed items into the fixed record list.
    pub fn from_serializable<T: Serialize>(items: &[T]) -> AppResult<Self> {
        Ok(Self::new(HookOutput::from_serializable(items)?.into_records()))
    }
}

#[async_trait]
impl HookHandler for StaticRecordsHandler {
    async fn handle(&self, _ctx: &HookContext) -> AppResult<HookOutput> {
        Ok(HookOutput::Records(self.records.clone()))
    }
}

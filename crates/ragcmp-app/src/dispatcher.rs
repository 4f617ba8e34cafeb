//! In-process event dispatch.
//!
//! Handlers are registered per [`EventKind`] and run one at a time in
//! registration order. Matching is by exact kind only. A handler registered
//! for [`EventKind::Generic`] never receives a
//! [`DomainEvent::DocumentUploaded`].
//!
//! The registry lives as long as the dispatcher. There is no unregister;
//! build a fresh dispatcher when isolation is needed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use ragcmp_core::enums::EventKind;
use ragcmp_core::events::DomainEvent;

use crate::error::DispatchError;
use crate::ports::EventPublisher;

/// Reacts to a dispatched event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}

/// Adapts a synchronous closure into an [`EventHandler`].
struct FnHandler<F>(F);

#[async_trait]
impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&DomainEvent) -> anyhow::Result<()> + Send + Sync + 'static,
{
    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        (self.0)(event)
    }
}

type HandlerList = Vec<Arc<dyn EventHandler>>;

#[derive(Default)]
pub struct EventDispatcher {
    handlers: RwLock<HashMap<EventKind, HandlerList>>,
}

impl EventDispatcher {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `kind`.
    pub fn register(&self, kind: EventKind, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Register a synchronous closure. It runs inline during dispatch.
    pub fn register_fn<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&DomainEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(FnHandler(handler)));
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .map_or(0, Vec::len)
    }

    /// Invoke every handler registered for the event's kind, in order.
    ///
    /// Each handler is awaited before the next one starts. Dispatching a kind
    /// with no handlers is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::HandlerFailed`] for the first failing handler.
    /// The handlers after it are skipped.
    pub async fn dispatch(&self, event: &DomainEvent) -> Result<(), DispatchError> {
        let kind = event.kind();
        // Snapshot so the lock is not held across handler awaits.
        let handlers = self.snapshot(kind);

        for (position, handler) in handlers.iter().enumerate() {
            if let Err(source) = handler.handle(event).await {
                tracing::warn!(%kind, position, error = %source, "event handler failed");
                return Err(DispatchError::HandlerFailed {
                    kind,
                    position,
                    source,
                });
            }
        }

        tracing::debug!(%kind, handlers = handlers.len(), "event dispatched");
        Ok(())
    }

    fn snapshot(&self, kind: EventKind) -> HandlerList {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl EventPublisher for EventDispatcher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DispatchError> {
        self.dispatch(event).await
    }
}

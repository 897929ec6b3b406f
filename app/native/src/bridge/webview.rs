//! Webview-backed [`UiBridge`].

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tauri::{Emitter, Runtime, WebviewWindow, Wry};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::{QueryError, UiBridge, UiEvent, UiQuery};
use crate::constants::UI_QUERY_TIMEOUT;
use crate::events;

/// Payload of the `halo://ui/query` event.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub id: Uuid,
    pub query: UiQuery,
}

/// Queries waiting for the page to answer.
#[derive(Debug, Default)]
pub struct PendingQueries {
    waiting: Mutex<HashMap<Uuid, oneshot::Sender<Value>>>,
}

impl PendingQueries {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Opens a new pending query.
    pub fn open(&self) -> (Uuid, oneshot::Receiver<Value>) {
        let id = Uuid::now_v7();
        let (tx, rx) = oneshot::channel();
        self.waiting.lock().insert(id, tx);
        (id, rx)
    }

    /// Delivers the answer for `id`. Returns `false` for unknown or expired ids.
    pub fn resolve(&self, id: Uuid, value: Value) -> bool {
        let Some(tx) = self.waiting.lock().remove(&id) else {
            return false;
        };
        tx.send(value).is_ok()
    }

    pub fn cancel(&self, id: Uuid) { self.waiting.lock().remove(&id); }

    #[must_use]
    pub fn len(&self) -> usize { self.waiting.lock().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.waiting.lock().is_empty() }

    /// Waits for the answer to `id`. The entry is dropped however the wait
    /// ends, including when this future is dropped before completing.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Timeout`] if no answer arrives in time, or
    /// [`QueryError::Closed`] if the entry was cancelled.
    pub async fn wait(
        &self,
        id: Uuid,
        rx: oneshot::Receiver<Value>,
        timeout: Duration,
    ) -> Result<Value, QueryError> {
        let _entry = PendingEntry { pending: self, id };
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(QueryError::Closed),
            Err(_) => Err(QueryError::Timeout(timeout)),
        }
    }
}

/// Removes a pending query when dropped.
struct PendingEntry<'a> {
    pending: &'a PendingQueries,
    id: Uuid,
}

impl Drop for PendingEntry<'_> {
    fn drop(&mut self) { self.pending.cancel(self.id); }
}

/// Talks to the page loaded in the overlay window.
pub struct WebviewBridge<R: Runtime = Wry> {
    window: WebviewWindow<R>,
    pending: PendingQueries,
    timeout: Duration,
}

impl<R: Runtime> WebviewBridge<R> {
    pub fn new(window: WebviewWindow<R>) -> Self {
        Self {
            window,
            pending: PendingQueries::new(),
            timeout: UI_QUERY_TIMEOUT,
        }
    }

    /// Routes an answer from the `ui_query_response` command.
    pub fn resolve(&self, id: Uuid, value: Value) -> bool { self.pending.resolve(id, value) }
}

/// Script that calls the page's shortcut handler, if it has one.
fn shortcut_script(label: &str) -> String {
    let label = Value::String(label.to_string());
    format!("window.halo?.handleShortcut?.({label});")
}

impl<R: Runtime> UiBridge for WebviewBridge<R> {
    fn query(&self, query: UiQuery) -> impl Future<Output = Result<Value, QueryError>> + Send {
        async move {
            let (id, rx) = self.pending.open();

            if let Err(err) = self.window.emit(events::ui::QUERY, QueryRequest { id, query }) {
                self.pending.cancel(id);
                return Err(QueryError::Unavailable(err.to_string()));
            }

            tracing::trace!(%id, ?query, "sent UI query");
            self.pending.wait(id, rx, self.timeout).await
        }
    }

    fn notify(&self, event: UiEvent) {
        let name = event.name();
        match self.window.emit(name, event.payload()) {
            Ok(()) => tracing::trace!(event = name, "emitted event"),
            Err(err) => tracing::warn!(event = name, error = %err, "failed to emit event"),
        }
    }

    fn invoke_shortcut(&self, label: &str) {
        if let Err(err) = self.window.eval(&shortcut_script(label)) {
            tracing::warn!(label, error = %err, "failed to invoke UI shortcut handler");
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_resolve_delivers_value() {
        let pending = PendingQueries::new();
        let (id, rx) = pending.open();

        assert!(pending.resolve(id, json!("settings")));
        assert_eq!(pending.wait(id, rx, UI_QUERY_TIMEOUT).await, Ok(json!("settings")));
        assert!(pending.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out_and_forgets_query() {
        let pending = PendingQueries::new();
        let (id, rx) = pending.open();

        let result = pending.wait(id, rx, UI_QUERY_TIMEOUT).await;

        assert_eq!(result, Err(QueryError::Timeout(UI_QUERY_TIMEOUT)));
        assert!(pending.is_empty());
        assert!(!pending.resolve(id, json!(null)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_wait_forgets_query() {
        let pending = PendingQueries::new();
        let (id, rx) = pending.open();

        let outer = tokio::time::timeout(
            Duration::from_millis(10),
            pending.wait(id, rx, UI_QUERY_TIMEOUT),
        )
        .await;

        assert!(outer.is_err());
        assert!(pending.is_empty());
        assert!(!pending.resolve(id, json!("main")));
    }

    #[tokio::test]
    async fn test_cancelled_query_is_closed() {
        let pending = PendingQueries::new();
        let (id, rx) = pending.open();

        pending.cancel(id);
        assert_eq!(pending.wait(id, rx, UI_QUERY_TIMEOUT).await, Err(QueryError::Closed));
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let pending = PendingQueries::new();
        let (_id, _rx) = pending.open();

        assert!(!pending.resolve(Uuid::now_v7(), json!(1)));
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let pending = PendingQueries::new();
        let (a, _rx_a) = pending.open();
        let (b, _rx_b) = pending.open();
        assert_ne!(a, b);
    }

    #[test]
    fn test_shortcut_script_quotes_label() {
        assert_eq!(
            shortcut_script("cmd+enter"),
            "window.halo?.handleShortcut?.(\"cmd+enter\");"
        );
        assert_eq!(
            shortcut_script("a\"b"),
            "window.halo?.handleShortcut?.(\"a\\\"b\");"
        );
    }

    #[test]
    fn test_query_request_shape() {
        let id = Uuid::now_v7();
        let value = serde_json::to_value(QueryRequest { id, query: UiQuery::LayoutMode }).unwrap();
        assert_eq!(value, json!({ "id": id.to_string(), "query": "getLayoutMode" }));
    }
}

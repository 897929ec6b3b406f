//! Request/response and notification channel to the UI layer.
//!
//! The overlay never reads UI state directly. It asks through a [`UiBridge`],
//! which the webview implementation answers by round-tripping an event to the
//! page and waiting for the `ui_query_response` command.

mod webview;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
pub use webview::{PendingQueries, QueryRequest, WebviewBridge};

use crate::events;
use crate::geometry::LayoutMode;
use crate::shortcuts::{KeybindOverrides, parse_overrides};

/// State the overlay can ask the UI layer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UiQuery {
    #[serde(rename = "getCurrentView")]
    CurrentView,
    #[serde(rename = "getLayoutMode")]
    LayoutMode,
    #[serde(rename = "customKeybinds")]
    CustomKeybinds,
    #[serde(rename = "contentProtection")]
    ContentProtection,
}

/// Fire-and-forget notifications sent to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ClickThroughToggled(bool),
    PreviousResponse,
    NextResponse,
    ScrollUp,
    ScrollDown,
}

impl UiEvent {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClickThroughToggled(_) => events::click_through::TOGGLED,
            Self::PreviousResponse => events::navigation::PREVIOUS_RESPONSE,
            Self::NextResponse => events::navigation::NEXT_RESPONSE,
            Self::ScrollUp => events::navigation::SCROLL_UP,
            Self::ScrollDown => events::navigation::SCROLL_DOWN,
        }
    }

    #[must_use]
    pub fn payload(self) -> Value {
        match self {
            Self::ClickThroughToggled(enabled) => json!(enabled),
            _ => Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("UI did not answer within {0:?}")]
    Timeout(Duration),

    #[error("UI query was dropped before it was answered")]
    Closed,

    #[error("UI layer is unavailable: {0}")]
    Unavailable(String),

    #[error("unexpected answer to {query:?}: {value}")]
    InvalidValue { query: UiQuery, value: String },
}

impl QueryError {
    fn invalid(query: UiQuery, value: &Value) -> Self {
        Self::InvalidValue { query, value: value.to_string() }
    }
}

/// Channel to the UI layer.
pub trait UiBridge: Send + Sync + 'static {
    /// Asks the UI layer for a value.
    fn query(&self, query: UiQuery) -> impl Future<Output = Result<Value, QueryError>> + Send;

    /// Sends a notification. Failures are logged, never returned.
    fn notify(&self, event: UiEvent);

    /// Invokes the page's shortcut handler with `label`. Failures are logged.
    fn invoke_shortcut(&self, label: &str);

    fn current_view(&self) -> impl Future<Output = Result<String, QueryError>> + Send {
        async move {
            let value = self.query(UiQuery::CurrentView).await?;
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| QueryError::invalid(UiQuery::CurrentView, &value))
        }
    }

    fn layout_mode(&self) -> impl Future<Output = Result<LayoutMode, QueryError>> + Send {
        async move {
            let value = self.query(UiQuery::LayoutMode).await?;
            value
                .as_str()
                .map(LayoutMode::from_name)
                .ok_or_else(|| QueryError::invalid(UiQuery::LayoutMode, &value))
        }
    }

    /// Keybind overrides stored by the UI, `None` when it has none.
    fn custom_keybinds(
        &self,
    ) -> impl Future<Output = Result<Option<KeybindOverrides>, QueryError>> + Send {
        async move {
            let value = self.query(UiQuery::CustomKeybinds).await?;
            match value {
                Value::Null => Ok(None),
                Value::Object(_) | Value::String(_) => Ok(Some(parse_overrides(&value))),
                other => Err(QueryError::invalid(UiQuery::CustomKeybinds, &other)),
            }
        }
    }

    /// Content-protection preference stored by the UI, `None` when unset.
    fn content_protection(&self) -> impl Future<Output = Result<Option<bool>, QueryError>> + Send {
        async move {
            let value = self.query(UiQuery::ContentProtection).await?;
            match &value {
                Value::Null => Ok(None),
                Value::Bool(enabled) => Ok(Some(*enabled)),
                // Local storage hands back strings.
                Value::String(raw) => match raw.trim() {
                    "true" => Ok(Some(true)),
                    "false" => Ok(Some(false)),
                    "" => Ok(None),
                    _ => Err(QueryError::invalid(UiQuery::ContentProtection, &value)),
                },
                _ => Err(QueryError::invalid(UiQuery::ContentProtection, &value)),
            }
        }
    }
}

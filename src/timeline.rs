//! Timeline data types cached on disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use uuid::Uuid;

/// One entry in the session list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    /// Session identifier (opaque, unique).
    pub id: String,

    /// Display title.
    pub title: String,

    /// When the session last changed.
    pub updated_at: DateTime<Utc>,

    /// Number of messages in the session.
    pub message_count: u32,

    /// Model the session is pinned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Preview of the most recent message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
}

impl SessionSummary {
    /// Create a summary with no messages yet.
    #[must_use]
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            updated_at: Utc::now(),
            message_count: 0,
            model: None,
            last_message: None,
        }
    }
}

/// The session list, ordered for display. Persisted wholesale: a save
/// replaces the previous list, never patches it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SessionList {
    /// Sessions in display order (most recent first, per the server).
    pub sessions: Vec<SessionSummary>,
}

impl SessionList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// One event in a session's trace.
///
/// A flattened tagged union: `kind` decides which of the optional fields are
/// populated. Optionals absent for a given kind stay `None` and are omitted
/// from the stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraceEvent {
    /// Event identifier, unique within its trace.
    pub id: String,

    /// What kind of event this is.
    pub kind: EventKind,

    /// When the event occurred. Ordering within a trace is positional, not
    /// timestamp-sorted.
    pub timestamp: DateTime<Utc>,

    /// Text payload (messages, thinking).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Tool name (tool calls and results).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Correlates a tool result with its call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Structured tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Value>,

    /// Structured tool output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Set when a tool result reports failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl TraceEvent {
    /// Create an event with a fresh id and the current timestamp.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            timestamp: Utc::now(),
            text: None,
            tool_name: None,
            tool_call_id: None,
            args: None,
            output: None,
            is_error: None,
        }
    }
}

/// Kinds of trace events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Message from the user.
    UserMessage,
    /// Message from the assistant.
    AssistantMessage,
    /// Assistant reasoning step.
    Thinking,
    /// Tool invocation.
    ToolCall,
    /// Tool output.
    ToolResult,
}

/// The ordered event trace for one session. Insertion order is
/// authoritative; a save replaces the whole trace on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Trace {
    /// Events in occurrence order.
    pub events: Vec<TraceEvent>,
}

impl Trace {
    /// Create an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl From<Vec<TraceEvent>> for Trace {
    fn from(events: Vec<TraceEvent>) -> Self {
        Self { events }
    }
}

/// Diagnostic snapshot of the cache's on-disk footprint.
///
/// Statistics are best-effort: when they cannot be gathered they are zero,
/// but the root path always reflects the configured location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheMetrics {
    /// Root directory the cache writes under.
    pub root: PathBuf,

    /// Number of cache files currently on disk.
    pub file_count: u64,

    /// Total size of cache files in bytes.
    pub total_bytes: u64,
}

//! Console and uncaught-exception capture.
//!
//! Every page carries a [`ConsoleCapture`] fed by three CDP event streams:
//! `Runtime.consoleAPICalled`, `Runtime.exceptionThrown` and
//! `Log.entryAdded`. The last one carries messages Chrome emits itself, such
//! as `Failed to load resource` for a broken stylesheet link. Messages keep
//! their arrival order. The smoke runner only cares about errors, which it
//! drains as [`CapturedError`]s after each page.

use chromiumoxide::cdp::browser_protocol::log::{LogEntry, LogEntryLevel};
use chromiumoxide::cdp::js_protocol::runtime::{
    EventConsoleApiCalled, EventExceptionThrown, RemoteObject,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

/// The severity level of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()` and uncaught exceptions
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs
    Other,
}

impl ConsoleLevel {
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl From<&EventConsoleApiCalled> for ConsoleLevel {
    fn from(event: &EventConsoleApiCalled) -> Self {
        use chromiumoxide::cdp::js_protocol::runtime::ConsoleApiCalledType;

        match event.r#type {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

impl From<&LogEntryLevel> for ConsoleLevel {
    fn from(level: &LogEntryLevel) -> Self {
        match level {
            LogEntryLevel::Verbose => ConsoleLevel::Debug,
            LogEntryLevel::Info => ConsoleLevel::Info,
            LogEntryLevel::Warning => ConsoleLevel::Warning,
            LogEntryLevel::Error => ConsoleLevel::Error,
        }
    }
}

/// Where a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageOrigin {
    /// A call to one of the `console.*` functions.
    ConsoleApi,
    /// An exception nothing on the page caught.
    UncaughtException,
    /// Chrome itself: network failures, CSP violations, interventions.
    Browser,
}

/// A captured console message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub origin: MessageOrigin,
    /// Arguments rendered as text and joined with spaces.
    pub text: String,
    /// Capture time (host clock, not page clock).
    pub timestamp: SystemTime,
    /// `url:line:column` of the top stack frame, when known.
    pub source: Option<String>,
}

impl ConsoleMessage {
    #[must_use]
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            origin: MessageOrigin::ConsoleApi,
            text: text.into(),
            timestamp: SystemTime::now(),
            source: None,
        }
    }

    /// An uncaught page exception. Always error level.
    #[must_use]
    pub fn exception(text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::UncaughtException,
            ..Self::new(ConsoleLevel::Error, text)
        }
    }

    /// A message Chrome logged on the page's behalf.
    #[must_use]
    pub fn browser(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::Browser,
            ..Self::new(level, text)
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }
}

/// The two kinds of error a smoke run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Console,
    Page,
}

impl ErrorKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Console => "Console Error",
            ErrorKind::Page => "Page Error",
        }
    }
}

/// A console error or uncaught exception, tagged by kind.
///
/// Displays as `Console Error: <text>` or `Page Error: <text>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl CapturedError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns `None` for anything below error level.
    #[must_use]
    pub fn from_message(message: &ConsoleMessage) -> Option<Self> {
        if !message.level.is_error() {
            return None;
        }
        let kind = match message.origin {
            MessageOrigin::ConsoleApi | MessageOrigin::Browser => ErrorKind::Console,
            MessageOrigin::UncaughtException => ErrorKind::Page,
        };
        Some(Self::new(kind, message.text.clone()))
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.message)
    }
}

/// Thread-safe message accumulator shared with the CDP listener tasks.
///
/// Cloning is cheap; all clones see the same buffer.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called from the listener tasks. A poisoned lock drops the message;
    /// the panic that poisoned it is the real failure.
    pub(crate) fn push(&self, message: ConsoleMessage) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message);
        }
    }

    /// Snapshot of everything captured so far.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn messages_with_level(&self, level: ConsoleLevel) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level == level)
            .collect()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|m| m.level.is_error())
            .count()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Empties the buffer and returns the errors it held, in arrival order.
    pub fn drain_errors(&self) -> Vec<CapturedError> {
        let drained = std::mem::take(
            &mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner),
        );
        drained.iter().filter_map(CapturedError::from_message).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.clear();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn render_argument(arg: &RemoteObject) -> String {
    match &arg.value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => arg
            .description
            .clone()
            .unwrap_or_else(|| "<object>".to_string()),
    }
}

pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let text = event
        .args
        .iter()
        .map(render_argument)
        .collect::<Vec<_>>()
        .join(" ");

    let mut message = ConsoleMessage::new(ConsoleLevel::from(event), text);

    if let Some(frame) = event
        .stack_trace
        .as_ref()
        .and_then(|trace| trace.call_frames.first())
    {
        message = message.with_source(format!(
            "{}:{}:{}",
            frame.url, frame.line_number, frame.column_number
        ));
    }

    message
}

pub(crate) fn parse_exception_event(event: &EventExceptionThrown) -> ConsoleMessage {
    let details = &event.exception_details;
    let text = match &details.exception {
        Some(exception) => exception_message(
            exception.class_name.as_deref(),
            exception.description.as_deref(),
            exception.value.as_ref(),
            &details.text,
        ),
        None => details.text.clone(),
    };

    let mut message = ConsoleMessage::exception(text);
    if let Some(url) = &details.url {
        message = message.with_source(format!(
            "{url}:{}:{}",
            details.line_number, details.column_number
        ));
    }
    message
}

pub(crate) fn parse_log_entry(entry: &LogEntry) -> ConsoleMessage {
    let message = ConsoleMessage::browser(ConsoleLevel::from(&entry.level), entry.text.clone());
    match &entry.url {
        Some(url) => message.with_source(url.clone()),
        None => message,
    }
}

/// The bare message of a thrown value: `TypeError: x is undefined\n    at ...`
/// becomes `x is undefined`; a thrown primitive is rendered as-is.
fn exception_message(
    class_name: Option<&str>,
    description: Option<&str>,
    value: Option<&serde_json::Value>,
    fallback: &str,
) -> String {
    if let Some(value) = value {
        return match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }
    let Some(first_line) = description.and_then(|d| d.lines().next()) else {
        return fallback.to_string();
    };
    class_name
        .and_then(|class| first_line.strip_prefix(class))
        .and_then(|rest| rest.strip_prefix(": "))
        .unwrap_or(first_line)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_error_level_messages_become_captured_errors() {
        let log = ConsoleMessage::new(ConsoleLevel::Log, "hello");
        let warn = ConsoleMessage::new(ConsoleLevel::Warning, "careful");
        let err = ConsoleMessage::new(ConsoleLevel::Error, "boom");

        assert_eq!(CapturedError::from_message(&log), None);
        assert_eq!(CapturedError::from_message(&warn), None);
        assert_eq!(
            CapturedError::from_message(&err),
            Some(CapturedError::new(ErrorKind::Console, "boom"))
        );
    }

    #[test]
    fn captured_errors_are_tagged_by_origin() {
        let console = CapturedError::new(ErrorKind::Console, "Failed to load resource");
        let page = CapturedError::from_message(&ConsoleMessage::exception("x is not defined"))
            .expect("exceptions are errors");

        assert_eq!(console.to_string(), "Console Error: Failed to load resource");
        assert_eq!(page.to_string(), "Page Error: x is not defined");
    }

    #[test]
    fn drain_errors_empties_the_buffer_in_order() {
        let capture = ConsoleCapture::new();
        capture.push(ConsoleMessage::new(ConsoleLevel::Error, "first"));
        capture.push(ConsoleMessage::new(ConsoleLevel::Log, "noise"));
        capture.push(ConsoleMessage::exception("second"));

        assert_eq!(capture.error_count(), 2);
        let errors = capture.drain_errors();
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["Console Error: first", "Page Error: second"]
        );
        assert!(capture.is_empty());
        assert!(capture.drain_errors().is_empty());
    }

    #[test]
    fn clones_share_one_buffer() {
        let capture = ConsoleCapture::new();
        let listener = capture.clone();
        listener.push(ConsoleMessage::new(ConsoleLevel::Info, "ready"));

        assert_eq!(capture.len(), 1);
        assert_eq!(capture.messages_with_level(ConsoleLevel::Info).len(), 1);
        capture.clear();
        assert!(listener.is_empty());
    }

    fn log_entry(level: &str, text: &str) -> LogEntry {
        serde_json::from_value(json!({
            "source": "network",
            "level": level,
            "text": text,
            "timestamp": 1_700_000_000_000.0,
            "url": "file:///srv/site/missing.css",
        }))
        .unwrap()
    }

    #[test]
    fn failed_resource_loads_are_console_errors() {
        let message = parse_log_entry(&log_entry(
            "error",
            "Failed to load resource: net::ERR_FILE_NOT_FOUND",
        ));

        assert_eq!(message.origin, MessageOrigin::Browser);
        assert_eq!(message.source.as_deref(), Some("file:///srv/site/missing.css"));
        assert_eq!(
            CapturedError::from_message(&message).map(|e| e.to_string()),
            Some("Console Error: Failed to load resource: net::ERR_FILE_NOT_FOUND".to_string())
        );
    }

    #[test]
    fn browser_warnings_are_not_errors() {
        let capture = ConsoleCapture::new();
        capture.push(parse_log_entry(&log_entry("warning", "deprecated API")));
        capture.push(parse_log_entry(&log_entry("verbose", "noise")));

        assert_eq!(capture.len(), 2);
        assert!(capture.drain_errors().is_empty());
    }

    #[test]
    fn exception_message_strips_class_prefix_and_stack() {
        let message = exception_message(
            Some("TypeError"),
            Some("TypeError: menu is null\n    at main.js:12:5"),
            None,
            "Uncaught",
        );
        assert_eq!(message, "menu is null");
    }

    #[test]
    fn exception_message_handles_thrown_primitives() {
        assert_eq!(
            exception_message(None, None, Some(&json!("plain string")), "Uncaught"),
            "plain string"
        );
        assert_eq!(exception_message(None, None, Some(&json!(42)), "Uncaught"), "42");
    }

    #[test]
    fn exception_message_falls_back_to_details_text() {
        assert_eq!(exception_message(None, None, None, "Uncaught"), "Uncaught");
        assert_eq!(
            exception_message(Some("Object"), Some("[object Object]"), None, "Uncaught"),
            "[object Object]"
        );
    }
}

//! Logged arguments and their normalization into message content

use super::inspect::Inspector;
use super::paint::{strip, Paint};
use super::pending::{PendingValue, Settled};
use super::trace::Trace;
use colored::Color;
use std::fmt;

const ERROR_MESSAGE: Paint = Paint::new().fg(Color::Red).bold();
const ERROR_DETAIL: Paint = Paint::new().fg(Color::BrightBlack);
const PLACEHOLDER: Paint = Paint::new().fg(Color::Yellow);

/// Inline token standing in for a value that hasn't settled
pub const PENDING_PLACEHOLDER: &str = "[Promise]";

/// One argument of a logging call
#[derive(Debug)]
pub enum Arg {
    /// Used verbatim
    Text(String),
    /// Message, cause chain and location trace
    Error(ErrorArg),
    /// Decoded as UTF-8 inline
    Bytes(Vec<u8>),
    /// Placeholder now, its own message once settled
    Pending(PendingValue),
    /// Structured value, rendered by the inspector
    Value(serde_json::Value),
    /// Pre-rendered `Debug` output
    Debug(String),
    /// Outcome of an earlier pending value
    Settled(Settled),
}

impl Arg {
    pub fn error<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Arg::Error(ErrorArg::new(error))
    }

    /// Render any `Debug` value, pretty-printed
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Arg::Debug(format!("{:#?}", value))
    }

    pub fn pending(value: PendingValue) -> Self {
        Arg::Pending(value)
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<&String> for Arg {
    fn from(text: &String) -> Self {
        Arg::Text(text.clone())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(bytes: Vec<u8>) -> Self {
        Arg::Bytes(bytes)
    }
}

impl From<&[u8]> for Arg {
    fn from(bytes: &[u8]) -> Self {
        Arg::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        Arg::Value(value)
    }
}

impl From<ErrorArg> for Arg {
    fn from(error: ErrorArg) -> Self {
        Arg::Error(error)
    }
}

impl From<PendingValue> for Arg {
    fn from(value: PendingValue) -> Self {
        Arg::Pending(value)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Value(serde_json::Value::from(value))
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64, usize, f64);

/// A logged error: message, `source()` chain and where it was logged
#[derive(Debug, Clone)]
pub struct ErrorArg {
    pub message: String,
    pub causes: Vec<String>,
    pub trace: Trace,
}

impl ErrorArg {
    /// Capture `error`'s message and cause chain plus the current trace
    pub fn new<E: std::error::Error + ?Sized>(error: &E) -> Self {
        Self::with_trace(error, Trace::capture())
    }

    pub fn with_trace<E: std::error::Error + ?Sized>(error: &E, trace: Trace) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            causes,
            trace,
        }
    }

    fn render(&self, full_traces: bool) -> String {
        let mut lines = vec![ERROR_MESSAGE.apply(&self.message)];
        lines.extend(
            self.causes
                .iter()
                .map(|cause| ERROR_DETAIL.apply(&format!("    caused by: {}", cause))),
        );
        if full_traces {
            lines.extend(
                self.trace
                    .full()
                    .iter()
                    .map(|line| ERROR_DETAIL.apply(&format!("    {}", line))),
            );
        } else if let Some(summary) = self.trace.summary() {
            lines.push(ERROR_DETAIL.apply(&format!("    {}", summary)));
        }
        lines.join("\n")
    }
}

/// Rendered message content and its style-free counterpart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub styled: String,
    pub plain: String,
}

impl Content {
    pub fn new(styled: String) -> Self {
        let plain = strip(&styled);
        Self { styled, plain }
    }

    /// Prepend `prefix` and a space
    #[must_use]
    pub fn prefixed(self, prefix: &str) -> Self {
        Self {
            styled: format!("{} {}", prefix, self.styled),
            plain: format!("{} {}", strip(prefix), self.plain),
        }
    }
}

/// Output of normalizing one call's arguments
#[derive(Debug)]
pub struct Normalized {
    pub content: Content,
    /// Values to settle and log later
    pub pending: Vec<PendingValue>,
    /// Call site carried by a settled value
    pub call_site: Option<String>,
}

/// Turns logged arguments into message content
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    inspector: Inspector,
    full_traces: bool,
}

impl Normalizer {
    pub fn new(inspector: Inspector, full_traces: bool) -> Self {
        Self {
            inspector,
            full_traces,
        }
    }

    pub fn full_traces(&self) -> bool {
        self.full_traces
    }

    pub fn normalize(&self, mut args: Vec<Arg>) -> Normalized {
        if args.len() == 1 && matches!(args[0], Arg::Settled(_)) {
            if let Some(Arg::Settled(settled)) = args.pop() {
                return self.unwrap_settled(settled);
            }
        }

        let mut pending = Vec::new();
        let parts: Vec<String> = args
            .into_iter()
            .map(|arg| match arg {
                Arg::Pending(value) => {
                    pending.push(value);
                    PLACEHOLDER.apply(PENDING_PLACEHOLDER)
                }
                other => self.render(other),
            })
            .collect();

        Normalized {
            content: Content::new(parts.join(" ")),
            pending,
            call_site: None,
        }
    }

    fn unwrap_settled(&self, settled: Settled) -> Normalized {
        let prefix = settled.prefix();
        let call_site = settled.call_site.clone();
        let rejected = settled.is_rejected();

        let body = match settled.into_value() {
            Arg::Text(text) if rejected => ERROR_MESSAGE.apply(&text),
            inner => self.render(inner),
        };

        Normalized {
            content: Content::new(body).prefixed(&prefix),
            pending: Vec::new(),
            call_site,
        }
    }

    fn render(&self, arg: Arg) -> String {
        match arg {
            Arg::Text(text) => text,
            Arg::Error(error) => error.render(self.full_traces),
            Arg::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Arg::Value(value) => self.inspector.render(&value),
            Arg::Debug(text) => self.inspector.render_debug(&text),
            // Nested outcomes are not unwrapped again
            Arg::Pending(_) | Arg::Settled(_) => PLACEHOLDER.apply(PENDING_PLACEHOLDER),
        }
    }
}

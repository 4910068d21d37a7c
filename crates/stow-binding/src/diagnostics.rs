//! The channel bindings report absorbed failures to.

use std::fmt;
use std::sync::Mutex;

use stow_codec::CodecError;
use tracing::warn;

/// Which store call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOperation {
    Get,
    Set,
    Remove,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Set => write!(f, "set"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// A failure a binding absorbed instead of returning.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The stored value could not be decoded; the default was used.
    DecodeFailed { key: String, error: CodecError },
    /// The new value could not be encoded; the store was not written.
    EncodeFailed { key: String, error: CodecError },
    /// The store itself rejected a call.
    StoreFailed {
        key: String,
        operation: StoreOperation,
        error: String,
    },
}

impl Diagnostic {
    pub fn key(&self) -> &str {
        match self {
            Self::DecodeFailed { key, .. }
            | Self::EncodeFailed { key, .. }
            | Self::StoreFailed { key, .. } => key,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailed { key, error } => {
                write!(f, "decode of {key:?} failed, using default: {error}")
            }
            Self::EncodeFailed { key, error } => {
                write!(f, "encode of {key:?} failed, store not written: {error}")
            }
            Self::StoreFailed {
                key,
                operation,
                error,
            } => write!(f, "store {operation} of {key:?} failed: {error}"),
        }
    }
}

/// Receiver for absorbed binding failures.
///
/// Any `Fn(&Diagnostic) + Send + Sync` closure is a channel.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: &Diagnostic);
}

impl<F> Diagnostics for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn report(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Default channel: emits a `tracing` warning per failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::DecodeFailed { key, error } => {
                warn!(key = %key, error = %error, "stored value undecodable, using default");
            }
            Diagnostic::EncodeFailed { key, error } => {
                warn!(key = %key, error = %error, "value unencodable, store not written");
            }
            Diagnostic::StoreFailed {
                key,
                operation,
                error,
            } => {
                warn!(key = %key, operation = %operation, error = %error, "settings store call failed");
            }
        }
    }
}

/// Keeps every report in memory, for assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything reported so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Drain everything reported so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic.clone());
        }
    }
}

//! Observable events
//!
//! Events are explicit and typed. The validator emits none of them; they come
//! from startup (config, model registration, loading) and from the CLI.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// One model registered
    ModelRegistered,
    /// Model files loaded from a directory
    ModelsLoaded,
    /// Registered models written to a directory
    ModelsExported,
    /// Document passed validation
    DocumentAccepted,
    /// Document failed validation
    DocumentRejected,
    /// Startup could not complete
    StartupFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ModelRegistered => "MODEL_REGISTERED",
            Event::ModelsLoaded => "MODELS_LOADED",
            Event::ModelsExported => "MODELS_EXPORTED",
            Event::DocumentAccepted => "DOCUMENT_ACCEPTED",
            Event::DocumentRejected => "DOCUMENT_REJECTED",
            Event::StartupFailed => "STARTUP_FAILED",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StartupFailed)
    }

    /// Rejections are worth a warning; everything else is informational
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::DocumentRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

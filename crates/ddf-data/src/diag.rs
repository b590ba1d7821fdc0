//! Load diagnostics and the session context that carries them.

use std::fmt;

use crate::legacy::LegacyError;
use crate::lexer::LexError;
use crate::values::ValueError;

/// How serious a problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Always informational.
    Warning,
    /// Fatal in strict mode, otherwise a warning plus a substituted value.
    WarnError,
    /// Aborts the load.
    Fatal,
}

/// Engine configuration for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Promote every `WarnError` to fatal.
    pub strict: bool,
    /// Downgrade unresolved required references to warnings.
    pub lax: bool,
}

/// Where a diagnostic was raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: usize,
    pub entry: Option<String>,
    pub text: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)?;
        if self.line > 0 {
            write!(f, ":{}", self.line)?;
        }
        if let Some(entry) = &self.entry {
            write!(f, " [{entry}]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)?;
        if !self.location.text.is_empty() {
            write!(f, "\n    > {}", self.location.text)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DdfError {
    #[error("{location}: {msg}")]
    Fatal { location: Location, msg: String },
    #[error("{location}: {source}")]
    Syntax {
        location: Location,
        #[source]
        source: LexError,
    },
    #[error("{location}: {source}")]
    Value {
        location: Location,
        #[source]
        source: ValueError,
    },
    #[error("{location}: {source}")]
    Legacy {
        location: Location,
        #[source]
        source: LegacyError,
    },
}

impl DdfError {
    pub fn location(&self) -> &Location {
        match self {
            Self::Fatal { location, .. }
            | Self::Syntax { location, .. }
            | Self::Value { location, .. }
            | Self::Legacy { location, .. } => location,
        }
    }
}

/// Session-scoped diagnostic state, threaded through parsing and linking.
///
/// Tracks the current file, line and entry so every message can say where it
/// came from, and keeps every non-fatal diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct LoadContext {
    options: LoadOptions,
    location: Location,
    diagnostics: Vec<Diagnostic>,
}

impl LoadContext {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> LoadOptions {
        self.options
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Start a new source. Clears line and entry state from the previous one.
    pub fn begin_file(&mut self, file: &str) {
        log::debug!("loading {file}");
        self.location = Location {
            file: file.to_string(),
            ..Location::default()
        };
    }

    pub fn set_line(&mut self, line: usize, text: &str) {
        self.location.line = line;
        self.location.text.clear();
        self.location.text.push_str(text);
    }

    pub fn set_entry(&mut self, entry: Option<&str>) {
        self.location.entry = entry.map(str::to_string);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.record(Severity::Warning, msg.into());
    }

    /// Report a recoverable error: fatal in strict mode, otherwise recorded
    /// and the caller substitutes a safe value.
    pub fn warn_error(&mut self, msg: impl Into<String>) -> Result<(), DdfError> {
        let msg = msg.into();
        if self.options.strict {
            return Err(self.fatal(msg));
        }
        self.record(Severity::WarnError, msg);
        Ok(())
    }

    /// Report at the given severity.
    pub fn report(&mut self, severity: Severity, msg: impl Into<String>) -> Result<(), DdfError> {
        match severity {
            Severity::Warning => {
                self.warning(msg);
                Ok(())
            }
            Severity::WarnError => self.warn_error(msg),
            Severity::Fatal => Err(self.fatal(msg)),
        }
    }

    pub fn fatal(&self, msg: impl Into<String>) -> DdfError {
        DdfError::Fatal {
            location: self.location.clone(),
            msg: msg.into(),
        }
    }

    pub fn syntax(&self, source: LexError) -> DdfError {
        let mut location = self.location.clone();
        location.line = source.line();
        location.text = source.text().to_string();
        DdfError::Syntax { location, source }
    }

    pub fn bad_value(&self, source: ValueError) -> DdfError {
        DdfError::Value {
            location: self.location.clone(),
            source,
        }
    }

    pub fn legacy(&self, source: LegacyError) -> DdfError {
        DdfError::Legacy {
            location: self.location.clone(),
            source,
        }
    }

    fn record(&mut self, severity: Severity, message: String) {
        let diag = Diagnostic {
            severity,
            location: self.location.clone(),
            message,
        };
        log::warn!("{diag}");
        self.diagnostics.push(diag);
    }
}

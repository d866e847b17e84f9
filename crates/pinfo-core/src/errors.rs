use thiserror::Error;

/// Result type alias using PInfoError
pub type Result<T> = std::result::Result<T, PInfoError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events, CLI output and
/// tests. Backends classify their internal failures with these kinds before
/// collapsing them into the boolean / default results of the core contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidEmail,
    InvalidDate,

    // Storage contents
    NotFound,
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidEmail => "ERR_INVALID_EMAIL",
            ExErrorKind::InvalidDate => "ERR_INVALID_DATE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context (operation, storage key,
/// backend) for programmatic handling and log output.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    key: Option<String>,
    backend: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            key: None,
            backend: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the storage key involved
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add the backend name
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn backend(&self) -> Option<&str> {
        self.backend.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        if let Some(backend) = &self.backend {
            write!(f, " (backend: {})", backend)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Errors raised by the profile form flow
///
/// The persistence contract itself never fails (`load` defaults, `save`
/// returns a flag); these variants exist for the callers that turn those
/// outcomes into user-facing results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PInfoError {
    /// Submitted email failed validation; nothing was written
    #[error("Invalid email")]
    InvalidEmail,

    /// Date of birth could not be parsed
    #[error("Invalid date of birth '{input}': expected YYYY-MM-DD")]
    InvalidDateOfBirth { input: String },

    /// Backend rejected the batch commit
    #[error("Failed to write personal information to {backend} store")]
    SaveFailed { backend: String },
}

impl From<PInfoError> for ExError {
    fn from(err: PInfoError) -> Self {
        match err {
            PInfoError::InvalidEmail => ExError::new(ExErrorKind::InvalidEmail)
                .with_op("submit_profile")
                .with_key(crate::personal_info::KEY_EMAIL)
                .with_message("Invalid email"),

            PInfoError::InvalidDateOfBirth { input } => ExError::new(ExErrorKind::InvalidDate)
                .with_key(crate::personal_info::KEY_DOB)
                .with_message(format!("Cannot parse '{}' as YYYY-MM-DD", input)),

            PInfoError::SaveFailed { backend } => ExError::new(ExErrorKind::Persistence)
                .with_op("save_personal_info")
                .with_backend(backend)
                .with_message("Batch commit rejected"),
        }
    }
}

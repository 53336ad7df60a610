//! The main Error type for archviz.

use crate::ErrorKind;
use std::fmt;

/// Unified error type for all archviz operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Get the context key-value pairs
    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up a context value by key.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.kind, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl Error {
    /// Create a ConfigInvalid error naming the offending setting
    pub fn config_invalid(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message).with_context("setting", setting)
    }

    /// Create an InvalidFormat error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create a MissingField error
    pub fn missing_field(field: &'static str, record: &'static str, index: usize) -> Self {
        Self::new(
            ErrorKind::MissingField,
            format!("{} #{} has no '{}'", record, index, field),
        )
        .with_context("field", field)
        .with_context("index", index.to_string())
    }

    /// Create a FieldCoercion error
    pub fn field_coercion(field: &'static str, value: impl Into<String>, expected: &str) -> Self {
        let value = value.into();
        Self::new(
            ErrorKind::FieldCoercion,
            format!("'{}' value {} is not {}", field, value, expected),
        )
        .with_context("field", field)
        .with_context("value", value)
    }

    /// Create an EmptyGraph error
    pub fn empty_graph(nodes: usize, edges: usize) -> Self {
        Self::new(ErrorKind::EmptyGraph, "No nodes or edges found in input JSON.")
            .with_context("nodes", nodes.to_string())
            .with_context("edges", edges.to_string())
    }

    /// Create a RenderFailed error
    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderFailed, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::InvalidFormat, "unexpected token");
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert_eq!(err.message(), "unexpected token");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::FieldCoercion, "bad layer")
            .with_operation("graph::build")
            .with_context("node", "svc:api")
            .with_context("path", "graph.json");

        assert_eq!(err.operation(), "graph::build");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("node", "svc:api".to_string()));
        assert_eq!(err.context_value("path"), Some("graph.json"));
        assert_eq!(err.context_value("missing"), None);
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::InvalidFormat, "failed")
            .with_operation("record::parse_document")
            .with_operation("input::load");

        assert_eq!(err.operation(), "input::load");
        assert_eq!(err.context().len(), 1);
        assert_eq!(
            err.context()[0],
            ("called", "record::parse_document".to_string())
        );
    }

    #[test]
    fn test_display() {
        let err = Error::field_coercion("layer", "\"top\"", "a non-negative integer")
            .with_operation("graph::build");

        let display = format!("{}", err);
        assert!(display.contains("FieldCoercion"));
        assert!(display.contains("graph::build"));
        assert!(display.contains("field: layer"));
        assert!(display.contains("is not a non-negative integer"));
    }

    #[test]
    fn test_empty_graph_exit_code() {
        let err = Error::empty_graph(3, 0);
        assert_eq!(err.kind(), ErrorKind::EmptyGraph);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.message(), "No nodes or edges found in input JSON.");
        assert_eq!(err.context_value("edges"), Some("0"));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_set_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::invalid_format("input is not JSON").set_source(json_err);

        assert!(err.source_ref().is_some());
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! Canonical form of anything that can be sanitized.
//!
//! Callers hand over typed errors, bare strings, panic payloads or arbitrary
//! values. Each is reduced to a `{type_name, message, stack?}` triple before
//! entering the pipeline, so no input shape is ever rejected.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error;
use std::fmt;

/// Type name given to inputs that are not error values.
pub const SYNTHETIC_TYPE_NAME: &str = "NonErrorValue";

/// Closed set of accepted inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorInput {
    /// A real error value.
    Standard {
        type_name: String,
        message: String,
        stack: Option<String>,
    },
    /// A bare message, e.g. a string panic payload.
    Message(String),
    /// Any other value, captured by its debug rendering.
    Opaque(String),
}

/// The `{type_name, message, stack?}` triple every input reduces to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalError {
    pub type_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInput {
    /// Build a standard input from explicit parts.
    pub fn standard(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        ErrorInput::Standard {
            type_name: type_name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack to a standard input. Other variants are returned as is.
    pub fn with_stack(self, stack: impl Into<String>) -> Self {
        match self {
            ErrorInput::Standard {
                type_name, message, ..
            } => ErrorInput::Standard {
                type_name,
                message,
                stack: Some(stack.into()),
            },
            other => other,
        }
    }

    /// Capture a typed error. The `source()` chain becomes the stack.
    pub fn from_error<E: Error + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("Caused by: {}", cause));
            source = cause.source();
        }

        ErrorInput::Standard {
            type_name: short_type_name(std::any::type_name::<E>()).to_string(),
            message: error.to_string(),
            stack: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }

    /// Capture an I/O error, using its kind (`TimedOut`, `NotFound`, ...) as
    /// the type name.
    pub fn from_io_error(error: &std::io::Error) -> Self {
        let mut input = Self::from_error(error);
        if let ErrorInput::Standard { type_name, .. } = &mut input {
            *type_name = format!("{:?}", error.kind());
        }
        input
    }

    /// Capture an arbitrary value by its debug rendering.
    pub fn from_opaque<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        ErrorInput::Opaque(format!("{:?}", value))
    }

    /// Capture a panic payload as returned by `std::panic::catch_unwind`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        if let Some(message) = payload.downcast_ref::<&str>() {
            ErrorInput::Message((*message).to_string())
        } else if let Some(message) = payload.downcast_ref::<String>() {
            ErrorInput::Message(message.clone())
        } else {
            ErrorInput::Opaque("panic with a non-string payload".to_string())
        }
    }

    /// Reduce to the canonical triple.
    pub fn canonicalize(&self) -> CanonicalError {
        match self {
            ErrorInput::Standard {
                type_name,
                message,
                stack,
            } => CanonicalError {
                type_name: type_name.clone(),
                message: message.clone(),
                stack: stack.clone(),
            },
            ErrorInput::Message(message) | ErrorInput::Opaque(message) => CanonicalError {
                type_name: SYNTHETIC_TYPE_NAME.to_string(),
                message: message.clone(),
                stack: None,
            },
        }
    }
}

impl From<&str> for ErrorInput {
    fn from(message: &str) -> Self {
        ErrorInput::Message(message.to_string())
    }
}

impl From<String> for ErrorInput {
    fn from(message: String) -> Self {
        ErrorInput::Message(message)
    }
}

impl From<&std::io::Error> for ErrorInput {
    fn from(error: &std::io::Error) -> Self {
        ErrorInput::from_io_error(error)
    }
}

impl From<std::io::Error> for ErrorInput {
    fn from(error: std::io::Error) -> Self {
        ErrorInput::from_io_error(&error)
    }
}

impl From<CanonicalError> for ErrorInput {
    fn from(error: CanonicalError) -> Self {
        ErrorInput::Standard {
            type_name: error.type_name,
            message: error.message,
            stack: error.stack,
        }
    }
}

/// Last path segment of a type name, without generic arguments.
///
/// `core::num::error::ParseIntError` becomes `ParseIntError`,
/// `my::Wrapper<alloc::string::String>` becomes `Wrapper`.
pub fn short_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim_start_matches("dyn ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "failed to load settings")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_error_uses_short_type_name_and_source_chain() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "config.json missing",
        ));
        let canonical = ErrorInput::from_error(&err).canonicalize();

        assert_eq!(canonical.type_name, "Outer");
        assert_eq!(canonical.message, "failed to load settings");
        assert_eq!(
            canonical.stack.as_deref(),
            Some("Caused by: config.json missing")
        );
    }

    #[test]
    fn test_from_error_without_source_has_no_stack() {
        let err = "x".parse::<u32>().unwrap_err();
        let canonical = ErrorInput::from_error(&err).canonicalize();
        assert_eq!(canonical.type_name, "ParseIntError");
        assert!(canonical.stack.is_none());
    }

    #[test]
    fn test_io_error_kind_becomes_type_name() {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline");
        let canonical = ErrorInput::from(err).canonicalize();
        assert_eq!(canonical.type_name, "TimedOut");
        assert_eq!(canonical.message, "deadline");
    }

    #[test]
    fn test_string_and_opaque_get_synthetic_type() {
        let canonical = ErrorInput::from("boom").canonicalize();
        assert_eq!(canonical.type_name, SYNTHETIC_TYPE_NAME);
        assert_eq!(canonical.message, "boom");

        let canonical = ErrorInput::from_opaque(&vec![1, 2, 3]).canonicalize();
        assert_eq!(canonical.type_name, SYNTHETIC_TYPE_NAME);
        assert_eq!(canonical.message, "[1, 2, 3]");
    }

    #[test]
    fn test_from_panic_payloads() {
        let payload = std::panic::catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(
            ErrorInput::from_panic(payload.as_ref()),
            ErrorInput::Message("static message".to_string())
        );

        let payload = std::panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
        assert_eq!(
            ErrorInput::from_panic(payload.as_ref()),
            ErrorInput::Message("formatted 42".to_string())
        );

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(7u8)).unwrap_err();
        assert!(matches!(
            ErrorInput::from_panic(payload.as_ref()),
            ErrorInput::Opaque(_)
        ));
    }

    #[test]
    fn test_with_stack() {
        let input = ErrorInput::standard("TimeoutError", "slow").with_stack("at main");
        assert_eq!(input.canonicalize().stack.as_deref(), Some("at main"));

        let input = ErrorInput::from("bare").with_stack("ignored");
        assert!(input.canonicalize().stack.is_none());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("my::Wrapper<alloc::string::String>"), "Wrapper");
        assert_eq!(short_type_name("dyn core::error::Error"), "Error");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}

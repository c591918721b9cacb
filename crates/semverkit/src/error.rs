//! Error type shared by every version operation

use std::fmt;
use thiserror::Error;

use crate::field::Field;
use crate::operator::Operator;

/// Identifies the builder argument an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    /// Zero-based positional argument
    Position(usize),
    /// Named field argument
    Named(Field),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Position(pos) => write!(f, "argument position {}", pos),
            Argument::Named(field) => write!(f, "argument '{}'", field),
        }
    }
}

/// Error type for version parsing, construction and comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("{0:?} is not valid SemVer string")]
    InvalidFormat(String),
    #[error("not expecting type in {argument} (type: {found})")]
    InvalidType { argument: Argument, found: &'static str },
    #[error("{0}")]
    InvalidValue(String),
    #[error("You cannot pass a string and additional positional arguments")]
    InvalidArgumentCombination,
    #[error("You cannot pass more than 5 arguments to Version (got {0})")]
    TooManyArguments(usize),
    #[error("replace() got unexpected field(s): {}", .0.join(", "))]
    UnknownField(Vec<String>),
    #[error("Invalid part. Expected one of major, minor, patch, prerelease, but got {0:?}")]
    InvalidArgument(String),
    #[error(
        "match expression should be in format <op><ver>, where <op> is one of {ops:?}. \
         You provided: {0:?}",
        ops = Operator::supported_operators()
    )]
    InvalidMatchExpression(String),
    #[error("Expected string, object, array or Version, but got {0}")]
    UnsupportedType(&'static str),
    #[error("Version index cannot be negative")]
    NegativeIndex,
    #[error("Version part undefined")]
    UndefinedPart,
}

impl VersionError {
    /// True for failures caused by the text of a version rather than by
    /// the kind of argument supplied.
    pub fn is_format_error(&self) -> bool {
        matches!(self, VersionError::InvalidFormat(_) | VersionError::InvalidValue(_))
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;

/// Name of a JSON value's kind, used in type errors
pub(crate) fn type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_errors() {
        assert!(VersionError::InvalidFormat("1.2".into()).is_format_error());
        assert!(VersionError::InvalidValue("negative".into()).is_format_error());
        assert!(!VersionError::UnsupportedType("bool").is_format_error());
        assert!(!VersionError::InvalidArgumentCombination.is_format_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            VersionError::InvalidFormat("1.2".into()).to_string(),
            "\"1.2\" is not valid SemVer string"
        );
        let err = VersionError::InvalidType {
            argument: Argument::Position(3),
            found: "bool",
        };
        assert_eq!(err.to_string(), "not expecting type in argument position 3 (type: bool)");
        let err = VersionError::InvalidType {
            argument: Argument::Named(Field::Major),
            found: "array",
        };
        assert_eq!(err.to_string(), "not expecting type in argument 'major' (type: array)");
        assert_eq!(
            VersionError::UnknownField(vec!["foo".into(), "bar".into()]).to_string(),
            "replace() got unexpected field(s): foo, bar"
        );
        assert_eq!(
            VersionError::InvalidMatchExpression("=1.0.0".into()).to_string(),
            "match expression should be in format <op><ver>, where <op> is one of \
             [\"<\", \">\", \"==\", \"<=\", \">=\", \"!=\"]. You provided: \"=1.0.0\""
        );
        assert_eq!(VersionError::NegativeIndex.to_string(), "Version index cannot be negative");
        assert_eq!(VersionError::UndefinedPart.to_string(), "Version part undefined");
    }

    #[test]
    fn test_type_name() {
        use serde_json::json;

        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(1)), "int");
        assert_eq!(type_name(&json!(-1)), "int");
        assert_eq!(type_name(&json!(1.5)), "float");
        assert_eq!(type_name(&json!("x")), "str");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({"a": 1})), "object");
    }
}

//! Construction of versions from positional, named or textual input
//!
//! Input is first resolved into a map from [`Field`] to raw value, where
//! named values override positional ones, and only then converted and
//! validated field by field.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::num::IntErrorKind;

use crate::error::{type_name, Argument, Result, VersionError};
use crate::field::Field;
use crate::version::Version;
use crate::version_parser::parse_version;

/// Maximum number of positional arguments
pub const MAX_POSITIONAL: usize = 5;

/// Builder accepting the same input shapes as the dynamic constructor:
/// up to five positional values, a single version string, and named
/// field values.
///
/// ```
/// use semverkit::VersionBuilder;
///
/// let v = VersionBuilder::new().arg("2.3.4-pre.2").build().unwrap();
/// assert_eq!(v.to_string(), "2.3.4-pre.2");
///
/// let v = VersionBuilder::new().arg(1).arg(2).major(5).build().unwrap();
/// assert_eq!(v.to_string(), "5.2.0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionBuilder {
    args: Vec<Value>,
    named: IndexMap<Field, Value>,
}

impl VersionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append several positional arguments
    pub fn args<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args.extend(values.into_iter().map(Into::into));
        self
    }

    /// Set a named field. A `null` value counts as not supplied.
    pub fn field(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.named.insert(field, value.into());
        self
    }

    pub fn major(self, value: impl Into<Value>) -> Self {
        self.field(Field::Major, value)
    }

    pub fn minor(self, value: impl Into<Value>) -> Self {
        self.field(Field::Minor, value)
    }

    pub fn patch(self, value: impl Into<Value>) -> Self {
        self.field(Field::Patch, value)
    }

    pub fn prerelease(self, value: impl Into<Value>) -> Self {
        self.field(Field::Prerelease, value)
    }

    pub fn build_metadata(self, value: impl Into<Value>) -> Self {
        self.field(Field::Build, value)
    }

    /// Set named fields from a mapping of field name to value
    pub fn fields<K, I>(mut self, fields: I) -> Result<Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut unknown = Vec::new();
        for (name, value) in fields {
            match Field::from_name(name.as_ref()) {
                Some(field) => {
                    self.named.insert(field, value);
                }
                None => unknown.push(name.as_ref().to_string()),
            }
        }
        if !unknown.is_empty() {
            return Err(VersionError::UnknownField(unknown));
        }
        Ok(self)
    }

    /// Builder populated from a JSON object of named fields
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Self::new().fields(map.iter().map(|(k, v)| (k.as_str(), v.clone())))
    }

    /// Resolve, validate and convert the collected input
    pub fn build(self) -> Result<Version> {
        let resolved = self.resolve()?;

        let int_field = |field: Field| match resolved.get(&field) {
            Some(value) if !value.is_null() => ensure_int(value),
            _ => Ok(0),
        };
        let text_field = |field: Field| resolved.get(&field).and_then(enforce_str);

        Ok(Version::from_fields(
            int_field(Field::Major)?,
            int_field(Field::Minor)?,
            int_field(Field::Patch)?,
            text_field(Field::Prerelease),
            text_field(Field::Build),
        ))
    }

    fn resolve(self) -> Result<IndexMap<Field, Value>> {
        let VersionBuilder { args, named } = self;

        if args.len() > MAX_POSITIONAL {
            return Err(VersionError::TooManyArguments(args.len()));
        }
        if args.len() > 1 && textual(&args[0]).is_some_and(|s| s.contains('.')) {
            return Err(VersionError::InvalidArgumentCombination);
        }
        for (field, value) in Field::ALL.iter().zip(&args) {
            check_type(*field, value, Argument::Position(field.position()))?;
        }

        let version_string = match args.first() {
            Some(Value::String(s)) if s.contains('.') => Some(s.clone()),
            _ => None,
        };

        let mut resolved = IndexMap::new();
        match version_string {
            Some(s) => {
                let parsed = parse_version(&s)?;
                resolved.insert(Field::Major, Value::from(parsed.major));
                resolved.insert(Field::Minor, Value::from(parsed.minor));
                resolved.insert(Field::Patch, Value::from(parsed.patch));
                if let Some(pre) = parsed.prerelease {
                    resolved.insert(Field::Prerelease, Value::from(pre));
                }
                if let Some(build) = parsed.build {
                    resolved.insert(Field::Build, Value::from(build));
                }
            }
            None => {
                resolved.extend(Field::ALL.into_iter().zip(args));
            }
        }

        for (field, value) in named {
            if value.is_null() {
                continue;
            }
            check_type(field, &value, Argument::Named(field))?;
            resolved.insert(field, value);
        }

        Ok(resolved)
    }
}

/// Text form of a value when it is a string or a number
fn textual(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.is_i64() || n.is_u64())
}

fn check_type(field: Field, value: &Value, argument: Argument) -> Result<()> {
    let allowed = match value {
        Value::String(_) => true,
        Value::Null => !field.is_numeric(),
        v => is_integer(v),
    };
    if allowed {
        Ok(())
    } else {
        Err(VersionError::InvalidType {
            argument,
            found: type_name(value),
        })
    }
}

/// Convert an integer or digit string into a version number
fn ensure_int(value: &Value) -> Result<u64> {
    const NOT_AN_INTEGER: &str = "Expected integer or integer string for major, minor, or patch";

    match value {
        Value::Number(n) => match (n.as_u64(), n.as_i64()) {
            (Some(v), _) => Ok(v),
            (None, Some(v)) => Err(negative(v)),
            _ => Err(VersionError::InvalidValue(NOT_AN_INTEGER.to_string())),
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(v) => Ok(v),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(VersionError::InvalidValue(
                    format!("Argument {} does not fit into a version number", s),
                )),
                Err(_) => match s.strip_prefix('-') {
                    Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                        if digits.bytes().all(|b| b == b'0') {
                            Ok(0)
                        } else {
                            Err(negative(s))
                        }
                    }
                    _ => Err(VersionError::InvalidValue(NOT_AN_INTEGER.to_string())),
                },
            }
        }
        _ => Err(VersionError::InvalidValue(NOT_AN_INTEGER.to_string())),
    }
}

fn negative(value: impl std::fmt::Display) -> VersionError {
    VersionError::InvalidValue(format!(
        "Argument {} is negative. A version can only be positive.",
        value
    ))
}

/// Text form of a prerelease or build value; empty strings count as absent
fn enforce_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: &Version) -> (u64, u64, u64, Option<&str>, Option<&str>) {
        (v.major(), v.minor(), v.patch(), v.prerelease(), v.build())
    }

    #[test]
    fn test_positional() {
        let v = VersionBuilder::new().args([1, 2, 3]).build().unwrap();
        assert_eq!(fields(&v), (1, 2, 3, None, None));

        let v = VersionBuilder::new()
            .arg(1)
            .arg("2")
            .arg(3)
            .arg("rc.1")
            .arg("build.5")
            .build()
            .unwrap();
        assert_eq!(fields(&v), (1, 2, 3, Some("rc.1"), Some("build.5")));

        let v = VersionBuilder::new().arg(7).build().unwrap();
        assert_eq!(fields(&v), (7, 0, 0, None, None));

        let v = VersionBuilder::new().build().unwrap();
        assert_eq!(fields(&v), (0, 0, 0, None, None));
    }

    #[test]
    fn test_integer_prerelease_and_build() {
        let v = VersionBuilder::new().args([json!(1), json!(2), json!(3), json!(4), json!(5)]).build().unwrap();
        assert_eq!(fields(&v), (1, 2, 3, Some("4"), Some("5")));

        let v = VersionBuilder::new().args([json!(1), json!(2), json!(3), json!(null), json!("b")]).build().unwrap();
        assert_eq!(fields(&v), (1, 2, 3, None, Some("b")));
    }

    #[test]
    fn test_version_string() {
        let v = VersionBuilder::new().arg("3.4.5-pre.2+build.4").build().unwrap();
        assert_eq!(fields(&v), (3, 4, 5, Some("pre.2"), Some("build.4")));

        // A single string without a dot is just the major part
        let v = VersionBuilder::new().arg("4").build().unwrap();
        assert_eq!(fields(&v), (4, 0, 0, None, None));
    }

    #[test]
    fn test_named_overrides_positional() {
        let v = VersionBuilder::new().arg(1).major(2).build().unwrap();
        assert_eq!(fields(&v), (2, 0, 0, None, None));

        let v = VersionBuilder::new()
            .arg("1.2.3-rc.1")
            .patch(9)
            .build_metadata("b7")
            .build()
            .unwrap();
        assert_eq!(fields(&v), (1, 2, 9, Some("rc.1"), Some("b7")));

        let v = VersionBuilder::new()
            .major(2)
            .minor(3)
            .patch(4)
            .build_metadata("build.2")
            .build()
            .unwrap();
        assert_eq!(fields(&v), (2, 3, 4, None, Some("build.2")));

        // A named null does not erase the positional value
        let v = VersionBuilder::new().arg("1.2.3-rc.1").prerelease(json!(null)).build().unwrap();
        assert_eq!(fields(&v), (1, 2, 3, Some("rc.1"), None));
    }

    #[test]
    fn test_from_map() {
        let map = json!({"major": 2, "minor": 0, "patch": 0, "prerelease": null, "build": null});
        let v = VersionBuilder::from_map(map.as_object().unwrap()).unwrap().build().unwrap();
        assert_eq!(fields(&v), (2, 0, 0, None, None));

        let map = json!({"major": 2, "revision": 0, "epoch": 1});
        assert_eq!(
            VersionBuilder::from_map(map.as_object().unwrap()).unwrap_err(),
            VersionError::UnknownField(vec!["revision".into(), "epoch".into()])
        );
    }

    #[test]
    fn test_too_many_arguments() {
        let err = VersionBuilder::new().args([1, 2, 3, 4, 5, 6]).build().unwrap_err();
        assert_eq!(err, VersionError::TooManyArguments(6));
    }

    #[test]
    fn test_string_with_more_arguments() {
        let err = VersionBuilder::new().arg("1.2.3").arg(4).build().unwrap_err();
        assert_eq!(err, VersionError::InvalidArgumentCombination);
    }

    #[test]
    fn test_invalid_type() {
        let err = VersionBuilder::new().arg(1).arg(json!([2])).build().unwrap_err();
        assert_eq!(
            err,
            VersionError::InvalidType {
                argument: Argument::Position(1),
                found: "array"
            }
        );

        let err = VersionBuilder::new().args([json!(1), json!(2), json!(null)]).build().unwrap_err();
        assert_eq!(
            err,
            VersionError::InvalidType {
                argument: Argument::Position(2),
                found: "null"
            }
        );

        let err = VersionBuilder::new().arg(1).arg(2).arg(3).arg(true).build().unwrap_err();
        assert!(matches!(
            err,
            VersionError::InvalidType { argument: Argument::Position(3), found: "bool" }
        ));

        let err = VersionBuilder::new().minor(json!({"x": 1})).build().unwrap_err();
        assert_eq!(
            err,
            VersionError::InvalidType {
                argument: Argument::Named(Field::Minor),
                found: "object"
            }
        );
    }

    #[test]
    fn test_invalid_value() {
        for bad in [json!(-1), json!("-3"), json!("abc"), json!("1.5x")] {
            let err = VersionBuilder::new().major(bad.clone()).build().unwrap_err();
            assert!(matches!(err, VersionError::InvalidValue(_)), "{:?} -> {:?}", bad, err);
        }

        let err = VersionBuilder::new().arg("99999999999999999999999.0.0").build().unwrap_err();
        assert!(matches!(err, VersionError::InvalidValue(_)));

        let v = VersionBuilder::new().major("-0").minor(" 4 ").build().unwrap();
        assert_eq!(fields(&v), (0, 4, 0, None, None));
    }

    #[test]
    fn test_invalid_format() {
        let err = VersionBuilder::new().arg("1.2").build().unwrap_err();
        assert_eq!(err, VersionError::InvalidFormat("1.2".into()));
    }

    #[test]
    fn test_empty_prerelease_is_absent() {
        let v = VersionBuilder::new().args([json!(1), json!(0), json!(0), json!("")]).build().unwrap();
        assert_eq!(v.prerelease(), None);
        assert_eq!(v.to_string(), "1.0.0");
    }
}

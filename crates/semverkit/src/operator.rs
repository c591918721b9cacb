//! Comparison operators used in match expressions

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::VersionError;

/// Comparison operators for match expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (==)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Not equal (!=)
    NotEqual,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::NotEqual => "!=",
        }
    }

    /// Get all supported operators
    pub fn supported_operators() -> &'static [&'static str] {
        &["<", ">", "==", "<=", ">=", "!="]
    }

    /// Whether a three-way comparison result satisfies the operator
    pub fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Equal => ordering.is_eq(),
            Operator::LessThan => ordering.is_lt(),
            Operator::LessThanOrEqual => ordering.is_le(),
            Operator::GreaterThan => ordering.is_gt(),
            Operator::GreaterThanOrEqual => ordering.is_ge(),
            Operator::NotEqual => ordering.is_ne(),
        }
    }

    /// Split a match expression such as `>=1.0.0` into its operator and
    /// the remaining version text.
    ///
    /// Two-character operators are recognised before `<` and `>`.
    pub fn split_expression(expr: &str) -> Result<(Operator, &str), VersionError> {
        if let Some(prefix) = expr.get(..2) {
            let op = match prefix {
                ">=" => Some(Operator::GreaterThanOrEqual),
                "<=" => Some(Operator::LessThanOrEqual),
                "==" => Some(Operator::Equal),
                "!=" => Some(Operator::NotEqual),
                _ => None,
            };
            if let Some(op) = op {
                return Ok((op, &expr[2..]));
            }
        }

        match expr.as_bytes().first() {
            Some(b'>') => Ok((Operator::GreaterThan, &expr[1..])),
            Some(b'<') => Ok((Operator::LessThan, &expr[1..])),
            _ => Err(VersionError::InvalidMatchExpression(expr.to_string())),
        }
    }
}

impl FromStr for Operator {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Operator::split_expression(s) {
            Ok((op, "")) => Ok(op),
            _ => Err(VersionError::InvalidMatchExpression(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_expression() {
        assert_eq!(
            Operator::split_expression(">=1.0.0").unwrap(),
            (Operator::GreaterThanOrEqual, "1.0.0")
        );
        assert_eq!(
            Operator::split_expression("<=1.0.0").unwrap(),
            (Operator::LessThanOrEqual, "1.0.0")
        );
        assert_eq!(Operator::split_expression("==1.0.0").unwrap(), (Operator::Equal, "1.0.0"));
        assert_eq!(Operator::split_expression("!=1.0.0").unwrap(), (Operator::NotEqual, "1.0.0"));
        assert_eq!(Operator::split_expression(">1.0.0").unwrap(), (Operator::GreaterThan, "1.0.0"));
        assert_eq!(Operator::split_expression("<1.0.0").unwrap(), (Operator::LessThan, "1.0.0"));
        // Falls back to the single-character operator
        assert_eq!(Operator::split_expression("<>1.0.0").unwrap(), (Operator::LessThan, ">1.0.0"));
    }

    #[test]
    fn test_invalid_expression() {
        for expr in ["", "=1.0.0", "1.0.0", "~1.0.0", "!1.0.0", "é1.0.0"] {
            assert_eq!(
                Operator::split_expression(expr).unwrap_err(),
                VersionError::InvalidMatchExpression(expr.to_string())
            );
        }
    }

    #[test]
    fn test_accepts() {
        use Ordering::*;

        assert!(Operator::GreaterThan.accepts(Greater));
        assert!(!Operator::GreaterThan.accepts(Equal));
        assert!(Operator::LessThan.accepts(Less));
        assert!(Operator::LessThanOrEqual.accepts(Equal));
        assert!(!Operator::LessThanOrEqual.accepts(Greater));
        assert!(Operator::GreaterThanOrEqual.accepts(Equal));
        assert!(Operator::Equal.accepts(Equal));
        assert!(!Operator::Equal.accepts(Less));
        assert!(Operator::NotEqual.accepts(Less));
        assert!(Operator::NotEqual.accepts(Greater));
        assert!(!Operator::NotEqual.accepts(Equal));
    }

    #[test]
    fn test_from_str_round_trip() {
        for op in Operator::supported_operators() {
            let parsed: Operator = op.parse().unwrap();
            assert_eq!(parsed.as_str(), *op);
            assert_eq!(parsed.to_string(), *op);
        }
        assert!("=".parse::<Operator>().is_err());
        assert!("<>".parse::<Operator>().is_err());
    }
}

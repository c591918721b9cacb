//! Precedence rules for versions and natural ordering of prerelease strings

use std::cmp::Ordering;

/// One dot-separated component of a prerelease string
#[derive(Debug, Clone, Copy)]
pub enum Identifier<'a> {
    /// All ASCII digits, compared by value
    Numeric(&'a str),
    /// Anything else, compared lexically
    Text(&'a str),
}

impl<'a> Identifier<'a> {
    pub fn new(component: &'a str) -> Self {
        if !component.is_empty() && component.bytes().all(|b| b.is_ascii_digit()) {
            Identifier::Numeric(component)
        } else {
            Identifier::Text(component)
        }
    }
}

impl Ord for Identifier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => compare_numeric(a, b),
            (Identifier::Numeric(_), Identifier::Text(_)) => Ordering::Less,
            (Identifier::Text(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Text(a), Identifier::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialEq for Identifier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Identifier<'_> {}

impl PartialOrd for Identifier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two digit strings by numeric value without parsing them, so
/// identifiers of any length are supported.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural comparison of two optional prerelease strings.
///
/// Components are compared pairwise; the first difference decides. When
/// one string runs out of components first, the longer string wins.
/// An absent prerelease behaves like the empty string.
pub fn natural_cmp(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.unwrap_or("");
    let b = b.unwrap_or("");

    a.split('.')
        .map(Identifier::new)
        .zip(b.split('.').map(Identifier::new))
        .map(|(x, y)| x.cmp(&y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.chars().count().cmp(&b.chars().count()))
}

/// Precedence of two prerelease fields belonging to versions with the
/// same major.minor.patch.
///
/// A version without prerelease is greater than any version with one.
pub fn compare_prerelease(a: Option<&str>, b: Option<&str>) -> Ordering {
    let a = a.filter(|s| !s.is_empty());
    let b = b.filter(|s| !s.is_empty());

    match natural_cmp(a, b) {
        Ordering::Equal => Ordering::Equal,
        _ if a.is_none() => Ordering::Greater,
        _ if b.is_none() => Ordering::Less,
        ord => ord,
    }
}

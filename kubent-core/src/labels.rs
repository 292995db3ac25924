//! Label selector expressions and their query-string rendering.
//!
//! Keys and values are not validated here; malformed selectors are rejected by the server.
use std::{collections::BTreeMap, fmt, iter::FromIterator};

/// A single selector requirement
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    /// `key=value`
    Equal(String, String),
    /// `key!=value`
    NotEqual(String, String),
    /// `key in (v1,v2)`
    In(String, Vec<String>),
    /// `key notin (v1,v2)`
    NotIn(String, Vec<String>),
    /// `key`
    Exists(String),
    /// `!key`
    DoesNotExist(String),
}

impl Expression {
    /// Label `key` must be set
    pub fn exists(key: impl Into<String>) -> Self {
        Self::Exists(key.into())
    }

    /// Label `key` must not be set
    pub fn does_not_exist(key: impl Into<String>) -> Self {
        Self::DoesNotExist(key.into())
    }

    /// Label `key` must equal `value`
    pub fn equal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equal(key.into(), value.into())
    }

    /// Label `key` must not equal `value`
    pub fn not_equal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotEqual(key.into(), value.into())
    }

    /// Label `key` must be one of `values`
    pub fn is_in<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::In(key.into(), values.into_iter().map(Into::into).collect())
    }

    /// Label `key` must be none of `values`
    pub fn not_in<I, V>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::NotIn(key.into(), values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Equal(key, value) => write!(f, "{key}={value}"),
            Expression::NotEqual(key, value) => write!(f, "{key}!={value}"),
            Expression::In(key, values) => write!(f, "{key} in ({})", values.join(",")),
            Expression::NotIn(key, values) => write!(f, "{key} notin ({})", values.join(",")),
            Expression::Exists(key) => write!(f, "{key}"),
            Expression::DoesNotExist(key) => write!(f, "!{key}"),
        }
    }
}

/// A conjunction of expressions
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Selector(Vec<Expression>);

impl Selector {
    /// Convert a selector to a string for the API
    pub fn to_selector_string(&self) -> String {
        self.0.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
    }

    /// Whether this selector has no requirements
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Add a requirement
    pub fn extend(mut self, expr: impl Into<Selector>) -> Self {
        self.0.extend(expr.into().0);
        self
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector_string())
    }
}

impl FromIterator<Expression> for Selector {
    fn from_iter<T: IntoIterator<Item = Expression>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<(String, String)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl From<Expression> for Selector {
    fn from(value: Expression) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<Expression>> for Selector {
    fn from(value: Vec<Expression>) -> Self {
        Self(value)
    }
}

impl From<&[Expression]> for Selector {
    fn from(value: &[Expression]) -> Self {
        Self(value.to_vec())
    }
}

impl From<BTreeMap<String, String>> for Selector {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map.into_iter().map(|(k, v)| Expression::Equal(k, v)).collect())
    }
}

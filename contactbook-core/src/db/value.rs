//! Bind values for prepared statement parameters.

/// A value bound to one parameter of a prepared statement.
///
/// Built through the `From` impls, usually via the `params!` macro. Column
/// data coming back out of a query is read through the typed `column_*`
/// accessors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// Binary blob.
    Blob(Vec<u8>),
    /// UTF-8 text.
    Text(String),
    /// SQL NULL.
    Null,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Blob(v.to_vec())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Convenience macro for building parameter lists.
///
/// Usage: `params![1_i64, name.as_str()]`
#[macro_export]
macro_rules! params {
    ($($val:expr),* $(,)?) => {
        &[$($crate::db::Value::from($val)),*][..]
    };
}

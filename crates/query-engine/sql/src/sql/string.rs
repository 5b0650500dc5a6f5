//! Statement parameters.

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    String(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// Bound as `json`.
    Value(serde_json::Value),
    Null,
}

/// A parameter together with the name the caller gave it.
///
/// Parameters are bound positionally: the first one fills `$1`, the second `$2`, and so on. The
/// name is only carried for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParam {
    pub name: String,
    pub value: Param,
}

impl NamedParam {
    pub fn new(name: impl Into<String>, value: Param) -> Self {
        NamedParam {
            name: name.into(),
            value,
        }
    }
}

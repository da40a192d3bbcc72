//! Formatting fields
//!
//! Every render builds one [`FieldMap`] from three layers, lowest precedence first:
//! 1. User fields given when building the counter
//! 2. Fields given to [`Counter::update_with`](crate::Counter::update_with)
//!    (accumulated, the latest value of a name wins)
//! 3. Built-in fields computed from the counter state
//!
//! User fields are not allowed to use a built-in name, or a name that looks
//! like a sub-series field (`count_1`, `rate_2`, ...). Those are dropped
//! with a warning when they are added, so built-ins always win.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Names of the built-in fields
pub const RESERVED_FIELDS: [&str; 14] = [
    "count",
    "desc",
    "desc_pad",
    "unit",
    "unit_pad",
    "elapsed",
    "rate",
    "interval",
    "total",
    "percentage",
    "eta",
    "len_total",
    "bar",
    "fill",
];

static SUB_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    // unwrap: the pattern is a valid literal
    Regex::new(r"^(?:count|percentage|eta|interval|rate)_\d+").unwrap()
});

/// Check if the name is reserved for built-in or sub-series fields
pub fn is_reserved(name: &str) -> bool {
    RESERVED_FIELDS.contains(&name) || SUB_FIELD.is_match(name)
}

/// Value of a field
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (for example, `total` of a counter without a total).
    /// Displayed as an empty string
    None,
    Int(i64),
    Float(f64),
    Str(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Int(x) => write!(f, "{x}"),
            // whole numbers keep a decimal so they still read as floats
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(x) => f.write_str(x),
        }
    }
}

#[rustfmt::skip]
const _: () = {
    impl From<i64> for Value { fn from(x: i64) -> Self { Self::Int(x) } }
    impl From<i32> for Value { fn from(x: i32) -> Self { Self::Int(x.into()) } }
    impl From<u32> for Value { fn from(x: u32) -> Self { Self::Int(x.into()) } }
    impl From<u64> for Value { fn from(x: u64) -> Self { Self::Int(x.try_into().unwrap_or(i64::MAX)) } }
    impl From<usize> for Value { fn from(x: usize) -> Self { Self::Int(x.try_into().unwrap_or(i64::MAX)) } }
    impl From<f64> for Value { fn from(x: f64) -> Self { Self::Float(x) } }
    impl From<f32> for Value { fn from(x: f32) -> Self { Self::Float(x.into()) } }
    impl From<&str> for Value { fn from(x: &str) -> Self { Self::Str(x.to_string()) } }
    impl From<String> for Value { fn from(x: String) -> Self { Self::Str(x) } }
    impl<T: Into<Value>> From<Option<T>> for Value {
        fn from(x: Option<T>) -> Self { x.map(Into::into).unwrap_or(Self::None) }
    }
};

/// Mapping from field name to value for one render
pub type FieldMap = BTreeMap<String, Value>;

/// User-defined fields, with reserved names filtered out
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UserFields(BTreeMap<String, Value>);

impl UserFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. Returns `false` (and warns) if the name is reserved,
    /// in which case the field is dropped
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let name = name.into();
        if is_reserved(&name) {
            warn_reserved(&[name]);
            return false;
        }
        self.0.insert(name, value.into());
        true
    }

    /// Insert all fields. Reserved names are dropped with one warning listing all of them
    pub fn extend<K, V, I>(&mut self, fields: I)
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut dropped = vec![];
        for (name, value) in fields {
            let name = name.into();
            if is_reserved(&name) {
                dropped.push(name);
            } else {
                self.0.insert(name, value.into());
            }
        }
        if !dropped.is_empty() {
            warn_reserved(&dropped);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn warn_reserved(names: &[String]) {
    log::warn!(
        "ignoring reserved fields specified as user-defined fields: {}",
        names.join(", ")
    );
}

/// Merge the layers into the mapping used for rendering
pub fn resolve(user: &UserFields, updates: &UserFields, builtins: FieldMap) -> FieldMap {
    let mut fields = FieldMap::new();
    for (name, value) in user.iter().chain(updates.iter()) {
        if !is_reserved(name) {
            fields.insert(name.to_string(), value.clone());
        }
    }
    fields.extend(builtins);
    fields
}

//! Demographic attribute map attached to a territory.
//!
//! Demographics are an open-ended key/value bag whose values are arbitrary
//! JSON. They are persisted as a single serialized text column, so the
//! persistence layer needs a notion of *semantic* equality that ignores key
//! ordering and numeric formatting. [`Demographics`] provides that through
//! its `PartialEq`/`Hash` implementations and through
//! [`Demographics::fingerprint`], a SHA-256 digest over the same canonical
//! traversal.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

/// JSON number with canonical equality.
///
/// Integral values compare equal regardless of how they were written, so
/// `2500000`, `2500000.0`, and `2.5e6` are the same number. Negative zero
/// equals zero.
///
/// # Examples
/// ```
/// use territory_backend::domain::DemographicNumber;
///
/// let int: DemographicNumber = serde_json::from_str("2500000").expect("int");
/// let float: DemographicNumber = serde_json::from_str("2.5e6").expect("float");
/// assert_eq!(int, float);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemographicNumber(Number);

impl DemographicNumber {
    /// Wrap a JSON number.
    #[must_use]
    pub const fn new(number: Number) -> Self {
        Self(number)
    }

    /// Borrow the underlying JSON number.
    #[must_use]
    pub const fn as_number(&self) -> &Number {
        &self.0
    }

    /// Canonical decimal rendering used for equality, hashing, and
    /// fingerprints.
    fn canonical(&self) -> String {
        if let Some(value) = self.0.as_i64() {
            return value.to_string();
        }
        if let Some(value) = self.0.as_u64() {
            return value.to_string();
        }
        match self.0.as_f64() {
            Some(value) if value == 0.0 => "0".to_owned(),
            Some(value) if value.is_finite() && value.fract() == 0.0 => format!("{value:.0}"),
            Some(value) => value.to_string(),
            None => self.0.to_string(),
        }
    }
}

impl PartialEq for DemographicNumber {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for DemographicNumber {}

impl Hash for DemographicNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for DemographicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A single dynamically typed demographic value.
///
/// `Null` represents an absent value and is rejected by the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum DemographicValue {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number with canonical equality.
    Number(DemographicNumber),
    /// JSON string.
    String(String),
    /// JSON array; element order is significant.
    Array(Vec<DemographicValue>),
    /// JSON object; key order is not significant.
    Object(BTreeMap<String, DemographicValue>),
}

impl DemographicValue {
    const fn tag(&self) -> u8 {
        match self {
            Self::Null => b'n',
            Self::Bool(_) => b'b',
            Self::Number(_) => b'd',
            Self::String(_) => b's',
            Self::Array(_) => b'a',
            Self::Object(_) => b'o',
        }
    }

    /// Returns `true` when the value is JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert back into an untyped JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(number) => Value::Number(number.0.clone()),
            Self::String(text) => Value::String(text.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    fn feed(&self, digest: &mut Sha256) {
        digest.update([self.tag()]);
        match self {
            Self::Null => {}
            Self::Bool(value) => digest.update([u8::from(*value)]),
            Self::Number(number) => feed_text(digest, &number.canonical()),
            Self::String(text) => feed_text(digest, text),
            Self::Array(items) => {
                feed_text(digest, &items.len().to_string());
                for item in items {
                    item.feed(digest);
                }
            }
            Self::Object(entries) => feed_entries(digest, entries),
        }
    }
}

/// Length-prefixed write so adjacent strings cannot run together.
fn feed_text(digest: &mut Sha256, text: &str) {
    digest.update(text.len().to_string().as_bytes());
    digest.update(b":");
    digest.update(text.as_bytes());
}

fn feed_entries(digest: &mut Sha256, entries: &BTreeMap<String, DemographicValue>) {
    feed_text(digest, &entries.len().to_string());
    for (key, value) in entries {
        feed_text(digest, key);
        value.feed(digest);
    }
}

impl PartialEq for DemographicValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Array(left), Self::Array(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for DemographicValue {}

impl Hash for DemographicValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            Self::Null => {}
            Self::Bool(value) => value.hash(state),
            Self::Number(number) => number.hash(state),
            Self::String(text) => text.hash(state),
            Self::Array(items) => items.hash(state),
            Self::Object(entries) => entries.hash(state),
        }
    }
}

impl From<Value> for DemographicValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(DemographicNumber(number)),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

impl From<DemographicValue> for Value {
    fn from(value: DemographicValue) -> Self {
        value.to_json()
    }
}

impl From<&str> for DemographicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for DemographicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for DemographicValue {
    fn from(value: i64) -> Self {
        Self::Number(DemographicNumber(Number::from(value)))
    }
}

impl From<f64> for DemographicValue {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, |number| {
            Self::Number(DemographicNumber(number))
        })
    }
}

impl From<bool> for DemographicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T> From<Vec<T>> for DemographicValue
where
    T: Into<Self>,
{
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for DemographicValue {
    /// Strings render raw, `null` renders empty, everything else as compact
    /// JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::String(text) => f.write_str(text),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

/// SHA-256 digest identifying the logical content of a demographics map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DemographicsFingerprint([u8; 32]);

impl DemographicsFingerprint {
    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DemographicsFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Open-ended key/value attribute map.
///
/// Keys are kept sorted, so two maps built in different insertion orders are
/// indistinguishable. Equality and hashing recurse through nested values.
///
/// # Examples
/// ```
/// use territory_backend::domain::Demographics;
///
/// let left: Demographics = serde_json::from_str(r#"{"a":1,"b":2.0}"#).expect("left");
/// let right: Demographics = serde_json::from_str(r#"{"b":2,"a":1.0}"#).expect("right");
/// assert_eq!(left, right);
/// assert_eq!(left.fingerprint(), right.fingerprint());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Demographics(BTreeMap<String, DemographicValue>);

impl Demographics {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<DemographicValue>,
    ) -> Option<DemographicValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DemographicValue> {
        self.0.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DemographicValue)> {
        self.0.iter()
    }

    /// Stable digest over the canonical traversal used by equality.
    #[must_use]
    pub fn fingerprint(&self) -> DemographicsFingerprint {
        let mut digest = Sha256::new();
        feed_entries(&mut digest, &self.0);
        DemographicsFingerprint(digest.finalize().into())
    }

    /// Serialize to the compact JSON text stored in the database column.
    ///
    /// # Errors
    /// Returns the serializer error; this does not happen for maps built from
    /// JSON input.
    pub fn to_json_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode the JSON text stored in the database column.
    ///
    /// # Errors
    /// Returns an error when the text is not a JSON object.
    pub fn from_json_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl FromIterator<(String, DemographicValue)> for Demographics {
    fn from_iter<I: IntoIterator<Item = (String, DemographicValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Demographics {
    type Item = (&'a String, &'a DemographicValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, DemographicValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

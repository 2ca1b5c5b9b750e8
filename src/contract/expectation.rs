use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// JSON type a field is declared to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl FieldType {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => value.is_number(),
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::Array => value.is_array(),
            FieldType::Object => value.is_object(),
            FieldType::Null => value.is_null(),
        }
    }

    /// Name of the JSON type actually found
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Null => "null",
        };
        write!(f, "{label}")
    }
}

/// Every element of `array` must contain `term` (case-insensitive) in at least one of `fields`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPredicate {
    pub array: String,
    pub fields: Vec<String>,
    /// Falls back to the request's `search` query value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

/// Declarative response contract. Field names are dot paths (`results.0.name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub status: u16,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, FieldType>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_empty: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub lengths: BTreeMap<String, usize>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub equals: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<SearchPredicate>,
}

impl Expectation {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            required: Vec::new(),
            types: BTreeMap::new(),
            non_empty: Vec::new(),
            lengths: BTreeMap::new(),
            equals: BTreeMap::new(),
            contains: None,
        }
    }

    pub fn require(mut self, path: impl Into<String>) -> Self {
        self.required.push(path.into());
        self
    }

    pub fn typed(mut self, path: impl Into<String>, field_type: FieldType) -> Self {
        self.types.insert(path.into(), field_type);
        self
    }

    pub fn non_empty(mut self, path: impl Into<String>) -> Self {
        self.non_empty.push(path.into());
        self
    }

    pub fn length(mut self, path: impl Into<String>, len: usize) -> Self {
        self.lengths.insert(path.into(), len);
        self
    }

    pub fn equals(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equals.insert(path.into(), value.into());
        self
    }

    pub fn contains<I, S>(mut self, array: impl Into<String>, fields: I, term: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains = Some(SearchPredicate {
            array: array.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            term: term.map(str::to_string),
        });
        self
    }
}

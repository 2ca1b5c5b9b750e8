use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use url::{form_urlencoded, Url};

use crate::http::{HttpMethod, PreparedRequest};

/// Declarative description of a request to send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointDescriptor {
    #[serde(default)]
    pub method: HttpMethod,

    /// Path template relative to the base URL, e.g. `/people/{id}`.
    /// An inline `?a=b` query is sent ahead of `query`.
    pub path: String,

    /// Values substituted into `{name}` placeholders of `path`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,

    /// Query pairs in send order; repeated keys are kept
    #[serde(default, skip_serializing_if = "Vec::is_empty", with = "query_pairs")]
    pub query: Vec<(String, String)>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl EndpointDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Every query pair that will be sent: inline pairs from `path`, then `query`
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = match self.path.split_once('?') {
            Some((_, inline)) => {
                let inline = inline.split_once('#').map_or(inline, |(query, _)| query);
                form_urlencoded::parse(inline.as_bytes()).into_owned().collect()
            }
            None => Vec::new(),
        };
        pairs.extend(self.query.iter().cloned());
        pairs
    }

    /// The first `search` query value, used as the default predicate term
    pub fn search_term(&self) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(key, _)| key == "search")
            .map(|(_, value)| value)
    }

    /// Substitute path parameters; any placeholder left over is an error
    pub fn resolve_path(&self) -> Result<String, String> {
        Ok(format!("/{}", self.segments()?.join("/")))
    }

    /// Path segments with parameters filled in, before percent-encoding
    fn segments(&self) -> Result<Vec<String>, String> {
        if self.path.contains('#') {
            return Err(format!("path '{}' must not carry a fragment", self.path));
        }
        let template = self.path.split_once('?').map_or(self.path.as_str(), |(path, _)| path);

        template
            .trim_start_matches('/')
            .split('/')
            .map(|segment| fill_placeholders(segment, &self.params))
            .collect()
    }

    /// Append the resolved path to `base` segment by segment and add the query pairs
    pub fn prepare(&self, base: &Url) -> Result<PreparedRequest, String> {
        let segments = self.segments()?;

        if self.body.is_some() && !self.method.allows_body() {
            return Err(format!("{} requests cannot carry a body", self.method));
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| format!("base URL {base} cannot carry a path"))?
            .pop_if_empty()
            .extend(&segments);

        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &pairs {
                query.append_pair(key, value);
            }
        }

        Ok(PreparedRequest {
            method: self.method,
            url,
            body: self.body.clone(),
        })
    }
}

/// Replace each `{name}` in one segment; parameter values are taken literally
fn fill_placeholders(segment: &str, params: &BTreeMap<String, String>) -> Result<String, String> {
    let mut filled = String::with_capacity(segment.len());
    let mut rest = segment;

    while let Some(start) = rest.find('{') {
        filled.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| format!("unterminated path parameter {}", &rest[start..]))?;
        let name = &after[..end];
        let value = params
            .get(name)
            .ok_or_else(|| format!("unresolved path parameter {{{name}}}"))?;
        filled.push_str(value);
        rest = &after[end + 1..];
    }

    filled.push_str(rest);
    Ok(filled)
}

/// Query pairs read from a YAML/JSON map (document order) or a list of `[key, value]`
mod query_pairs {
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(pairs.len()))?;
        for (key, value) in pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, String)>, D::Error> {
        deserializer.deserialize_any(PairsVisitor)
    }

    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of query parameters or a list of [key, value] pairs")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry::<String, String>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(pair) = seq.next_element::<(String, String)>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }
}

//! Parameter validation
//!
//! Every outgoing request passes through [`validate_kwargs`]: absent values
//! (null or empty string) are dropped from each parameter group, and the
//! required names are checked against the union of what is left.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::endpoint::HttpMethod;
use crate::{DenvrError, Result};

/// Name → value mapping for one parameter group
pub type ParamMap = Map<String, Value>;

/// Where a parameter travels in the HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamGroup {
    /// Query string
    Params,
    /// JSON body
    Json,
}

impl ParamGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamGroup::Params => "params",
            ParamGroup::Json => "json",
        }
    }
}

impl fmt::Display for ParamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Parameter groups as assembled for one call, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters {
    groups: BTreeMap<ParamGroup, ParamMap>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a group without adding values to it
    pub fn declare(&mut self, group: ParamGroup) -> &mut ParamMap {
        self.groups.entry(group).or_default()
    }

    pub fn insert(&mut self, group: ParamGroup, name: impl Into<String>, value: Value) {
        self.declare(group).insert(name.into(), value);
    }

    /// Builder form of [`Parameters::insert`]
    pub fn with(mut self, group: ParamGroup, name: impl Into<String>, value: Value) -> Self {
        self.insert(group, name, value);
        self
    }

    pub fn group(&self, group: ParamGroup) -> Option<&ParamMap> {
        self.groups.get(&group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamGroup, &ParamMap)> {
        self.groups.iter().map(|(g, m)| (*g, m))
    }
}

/// Validated parameter groups, ready for the transport.
///
/// No group contains a null or empty-string value. Only
/// [`validate_kwargs`] constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedRequest {
    groups: BTreeMap<ParamGroup, ParamMap>,
}

impl ResolvedRequest {
    pub fn group(&self, group: ParamGroup) -> Option<&ParamMap> {
        self.groups.get(&group)
    }

    /// Query string values
    pub fn params(&self) -> Option<&ParamMap> {
        self.group(ParamGroup::Params)
    }

    /// JSON body fields
    pub fn json(&self) -> Option<&ParamMap> {
        self.group(ParamGroup::Json)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.groups.values().find_map(|m| m.get(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamGroup, &ParamMap)> {
        self.groups.iter().map(|(g, m)| (*g, m))
    }

    /// Flatten the query group into string pairs.
    ///
    /// Arrays become repeated keys, objects are sent as JSON text.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let Some(params) = self.params() else {
            return pairs;
        };

        for (name, value) in params {
            match value {
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !is_absent(v)) {
                        pairs.push((name.clone(), query_value(item)));
                    }
                }
                other => pairs.push((name.clone(), query_value(other))),
            }
        }
        pairs
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Null and the empty string are absent. `false` and `0` are values.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Absence as seen by one group. A query array with no usable item would
/// flatten to zero pairs, so it counts as absent there.
fn is_absent_in(group: ParamGroup, value: &Value) -> bool {
    match (group, value) {
        (ParamGroup::Params, Value::Array(items)) => items.iter().all(is_absent),
        _ => is_absent(value),
    }
}

/// Filter absent values and check the required names.
///
/// In the query group an array whose items are all absent is dropped too.
///
/// `method` and `path` only feed diagnostics. On failure the error names
/// every missing parameter at once, sorted.
pub fn validate_kwargs(
    method: HttpMethod,
    path: &str,
    parameters: &Parameters,
    required: &[&str],
) -> Result<ResolvedRequest> {
    let groups: BTreeMap<ParamGroup, ParamMap> = parameters
        .iter()
        .map(|(group, values)| {
            let kept: ParamMap = values
                .iter()
                .filter(|(_, v)| !is_absent_in(group, v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            (group, kept)
        })
        .collect();

    let present: BTreeSet<&str> = groups
        .values()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    let missing: Vec<String> = required
        .iter()
        .copied()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect();

    if !missing.is_empty() {
        tracing::debug!("{} {}: missing {:?}", method, path, missing);
        return Err(DenvrError::MissingParameters {
            method,
            path: path.to_string(),
            missing,
        });
    }

    if !method.allows_body() && groups.get(&ParamGroup::Json).is_some_and(|m| !m.is_empty()) {
        tracing::warn!("{} {} carries a JSON body", method, path);
    }

    Ok(ResolvedRequest { groups })
}

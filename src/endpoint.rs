//! Endpoint declarations
//!
//! Each API operation is a static [`Endpoint`]: method, path, parameter
//! schema and the required names. Resolution against the config and
//! validation are driven from this data, so no operation carries its own
//! assembly logic.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::config::Config;
use crate::validate::{validate_kwargs, ParamGroup, Parameters, ResolvedRequest};
use crate::{DenvrError, Result};

/// HTTP verbs used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a JSON body is expected for this verb
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One declared parameter of an endpoint
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Keyword name used by callers and the config resolver (e.g. "source_v_m_name")
    pub name: &'static str,
    /// Name on the wire (e.g. "sourceVMName")
    pub wire: &'static str,
    pub group: ParamGroup,
    pub description: &'static str,
}

impl ParamSpec {
    pub const fn query(name: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self {
            name,
            wire,
            group: ParamGroup::Params,
            description,
        }
    }

    pub const fn body(name: &'static str, wire: &'static str, description: &'static str) -> Self {
        Self {
            name,
            wire,
            group: ParamGroup::Json,
            description,
        }
    }
}

/// Declaration of one API operation
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Operation name (e.g. "get_snapshot")
    pub name: &'static str,
    /// Resource group (e.g. "servers/snapshots")
    pub resource: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub summary: &'static str,
    pub params: &'static [ParamSpec],
    /// Wire names that must resolve to a non-empty value
    pub required: &'static [&'static str],
}

impl Endpoint {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn is_required(&self, spec: &ParamSpec) -> bool {
        self.required.contains(&spec.wire)
    }

    /// Assemble the parameter groups for a call.
    ///
    /// Every declared parameter is resolved through the config, so each
    /// group the endpoint uses is present even when all its values are absent.
    pub fn parameters(&self, config: &Config, kwargs: &Map<String, Value>) -> Parameters {
        let mut parameters = Parameters::new();
        for spec in self.params {
            let value = config
                .resolve(spec.name, kwargs.get(spec.name).cloned())
                .unwrap_or(Value::Null);
            parameters.insert(spec.group, spec.wire, value);
        }
        parameters
    }

    /// Resolve and validate keyword arguments into a request payload
    pub fn prepare(&self, config: &Config, kwargs: &Map<String, Value>) -> Result<ResolvedRequest> {
        if let Some(name) = kwargs.keys().find(|k| self.param(k).is_none()) {
            return Err(DenvrError::UnknownArgument {
                endpoint: self.name.to_string(),
                name: name.clone(),
            });
        }

        let parameters = self.parameters(config, kwargs);
        validate_kwargs(self.method, self.path, &parameters, self.required)
    }
}

/// Turn a typed request struct into keyword arguments.
///
/// `None` fields are dropped so they fall back to the config.
pub fn to_kwargs<R: Serialize + ?Sized>(request: &R) -> Result<Map<String, Value>> {
    match serde_json::to_value(request).map_err(DenvrError::Encode)? {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        Value::Null => Ok(Map::new()),
        other => Err(DenvrError::Encode(<serde_json::Error as serde::ser::Error>::custom(format!(
            "request must serialize to an object, got {}",
            other
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const GET_THING: Endpoint = Endpoint {
        name: "get_thing",
        resource: "things",
        method: HttpMethod::Get,
        path: "/api/v1/things/GetThing",
        summary: "Get a thing",
        params: &[
            ParamSpec::query("id", "Id", "Thing id"),
            ParamSpec::query("cluster", "Cluster", "Cluster"),
        ],
        required: &["Id", "Cluster"],
    };

    fn kwargs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_parameters_map_to_wire_names() {
        let config = Config::default();
        let params = GET_THING.parameters(&config, &kwargs(json!({"id": "t1", "cluster": "c1"})));
        let query = params.group(ParamGroup::Params).unwrap();

        assert_eq!(query.get("Id"), Some(&json!("t1")));
        assert_eq!(query.get("Cluster"), Some(&json!("c1")));
    }

    #[test]
    fn test_prepare_uses_config_default() {
        let config = Config::default().with_cluster("east-1");
        let resolved = GET_THING.prepare(&config, &kwargs(json!({"id": "t1"}))).unwrap();

        assert_eq!(resolved.get("Cluster"), Some(&json!("east-1")));
    }

    #[test]
    fn test_prepare_rejects_unknown_argument() {
        let config = Config::default();
        let err = GET_THING
            .prepare(&config, &kwargs(json!({"id": "t1", "colour": "red"})))
            .unwrap_err();

        assert!(matches!(err, DenvrError::UnknownArgument { ref name, .. } if name == "colour"));
    }

    #[test]
    fn test_prepare_reports_missing() {
        let err = GET_THING.prepare(&Config::default(), &Map::new()).unwrap_err();
        assert_eq!(
            err.missing_parameters().unwrap(),
            &["Cluster".to_string(), "Id".to_string()]
        );
    }

    #[test]
    fn test_to_kwargs_drops_none() {
        #[derive(Serialize)]
        struct Req {
            id: Option<String>,
            cluster: Option<String>,
        }

        let map = to_kwargs(&Req {
            id: Some("t1".to_string()),
            cluster: None,
        })
        .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("id"), Some(&json!("t1")));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert!(HttpMethod::Post.allows_body());
        assert!(!HttpMethod::Get.allows_body());
    }
}

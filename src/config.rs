//! Configuration Management
//!
//! Holds the defaults for cross-cutting parameters (cluster, namespace,
//! tenancy, ...) and resolves them against explicitly passed values.
//!
//! Configuration is loaded from a TOML file with the following resolution order:
//! 1. Explicit path (e.g. `--config <path>`)
//! 2. `DENVR_CONFIG` environment variable
//! 3. `<config dir>/denvr/config.toml`
//!
//! ```toml
//! [defaults]
//! server = "https://api.cloud.denvrdata.com"
//! cluster = "Msc1"
//! namespace = "denvr"
//!
//! [credentials]
//! token = "..."
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{DenvrError, Result};

/// Server used when neither the caller nor the config file sets one
pub const DEFAULT_SERVER: &str = "https://api.cloud.denvrdata.com";

/// Environment variable pointing at an alternate config file
pub const CONFIG_ENV_VAR: &str = "DENVR_CONFIG";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub credentials: Credentials,
}

/// Fallback values for parameters shared by many endpoints
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Defaults {
    /// Base URL of the API server
    #[serde(default)]
    pub server: Option<String>,
    /// Cluster to operate on (e.g. "Msc1")
    #[serde(default)]
    pub cluster: Option<String>,
    /// Namespace / VPC
    #[serde(default, alias = "vpcid")]
    pub namespace: Option<String>,
    /// Tenant name
    #[serde(default, alias = "tenant")]
    pub tenancy: Option<String>,
    /// Resource pool (e.g. "on-demand", "reserved")
    #[serde(default)]
    pub rpool: Option<String>,
}

/// Credentials sent with every request
#[derive(Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Credentials {
    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,
}

// Security: never print the token
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// The cross-cutting parameter names that have a configured default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultKey {
    Server,
    Cluster,
    Namespace,
    Tenancy,
    Rpool,
    Auth,
}

impl FromStr for DefaultKey {
    type Err = ();

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name {
            "server" => Ok(DefaultKey::Server),
            "cluster" => Ok(DefaultKey::Cluster),
            "namespace" | "vpcid" | "vpc" => Ok(DefaultKey::Namespace),
            "tenancy" | "tenant" | "tenant_name" => Ok(DefaultKey::Tenancy),
            "rpool" => Ok(DefaultKey::Rpool),
            "auth" | "token" => Ok(DefaultKey::Auth),
            _ => Err(()),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("denvr").join("config.toml"))
    }

    /// Load configuration from the standard locations.
    ///
    /// An explicit path or `DENVR_CONFIG` must exist. A missing file at the
    /// default location yields the default configuration.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_from(explicit_path, env_path, Self::default_path())
    }

    /// Lookup behind [`Config::load`], with the environment value and the
    /// default location passed in
    pub fn load_from(
        explicit_path: Option<&Path>,
        env_path: Option<PathBuf>,
        default_path: Option<PathBuf>,
    ) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_path(path);
        }

        if let Some(path) = env_path {
            return Self::from_path(&path);
        }

        match default_path {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DenvrError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| DenvrError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| DenvrError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.defaults.server = Some(server.into());
        self
    }

    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.defaults.cluster = Some(cluster.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.defaults.namespace = Some(namespace.into());
        self
    }

    pub fn with_tenancy(mut self, tenancy: impl Into<String>) -> Self {
        self.defaults.tenancy = Some(tenancy.into());
        self
    }

    pub fn with_rpool(mut self, rpool: impl Into<String>) -> Self {
        self.defaults.rpool = Some(rpool.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials.token = Some(token.into());
        self
    }

    /// Get effective server (config > built-in default)
    pub fn server(&self) -> &str {
        self.defaults.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    /// Bearer token, if one is configured
    pub fn token(&self) -> Option<&str> {
        self.credentials.token.as_deref()
    }

    /// Configured default for a key. The server always has one.
    pub fn default_value(&self, key: DefaultKey) -> Option<&str> {
        match key {
            DefaultKey::Server => Some(self.server()),
            DefaultKey::Cluster => self.defaults.cluster.as_deref(),
            DefaultKey::Namespace => self.defaults.namespace.as_deref(),
            DefaultKey::Tenancy => self.defaults.tenancy.as_deref(),
            DefaultKey::Rpool => self.defaults.rpool.as_deref(),
            DefaultKey::Auth => self.credentials.token.as_deref(),
        }
    }

    /// Resolve a parameter: explicit value > configured default > none.
    ///
    /// Only `None` and JSON `null` fall through to the default. Names without
    /// a configured default resolve to the explicit value.
    pub fn resolve(&self, name: &str, explicit: Option<Value>) -> Option<Value> {
        match explicit {
            Some(Value::Null) | None => name
                .parse::<DefaultKey>()
                .ok()
                .and_then(|key| self.default_value(key))
                .map(|v| Value::String(v.to_string())),
            Some(value) => Some(value),
        }
    }
}

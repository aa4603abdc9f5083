use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use denvr::api::{self, ENDPOINTS};
use denvr::{format_api_error, Config, DenvrError, HttpMethod, Session};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Command-line client for the Denvr cloud API
#[derive(Parser, Debug)]
#[command(name = "denvr", version, about, long_about = None)]
struct Args {
    /// Config file (defaults to $DENVR_CONFIG, then the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the API server
    #[arg(long)]
    server: Option<String>,

    /// Override the default cluster
    #[arg(long)]
    cluster: Option<String>,

    /// Override the default namespace/vpc
    #[arg(short, long)]
    namespace: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Run in read-only mode (block all write operations)
    #[arg(long)]
    readonly: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every available operation
    List,
    /// Describe the parameters of an operation
    Describe {
        /// Operation name (e.g. get_snapshot)
        operation: String,
    },
    /// Call an operation
    Call {
        /// Operation name (e.g. get_snapshot)
        operation: String,

        /// Parameter as key=value (value parsed as JSON when possible)
        #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE")]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("denvr started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("denvr").join("denvr.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".denvr").join("denvr.log");
    }
    PathBuf::from("denvr.log")
}

/// Parse `key=value` pairs into keyword arguments
fn parse_kwargs(args: &[String]) -> Result<Map<String, Value>> {
    let mut kwargs = Map::new();
    for arg in args {
        let (key, raw) = arg
            .split_once('=')
            .with_context(|| format!("Invalid argument '{}' (expected key=value)", arg))?;
        // Try to parse as JSON value, fall back to string
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        kwargs.insert(key.trim().to_string(), value);
    }
    Ok(kwargs)
}

fn list_operations() {
    for endpoint in ENDPOINTS {
        println!(
            "{:<30} {:<7} {:<50} {}",
            endpoint.name,
            endpoint.method.as_str(),
            endpoint.path,
            endpoint.summary
        );
    }
}

fn describe_operation(name: &str) -> Result<()> {
    let endpoint = api::find_endpoint(name)
        .with_context(|| format!("Unknown operation: {} (see `denvr list`)", name))?;

    println!("{} {}", endpoint.method, endpoint.path);
    println!("{}", endpoint.summary);
    for param in endpoint.params {
        let marker = if endpoint.is_required(param) { "*" } else { " " };
        println!(
            " {} {:<34} {:<6} {}",
            marker, param.name, param.group, param.description
        );
    }
    Ok(())
}

async fn call_operation(config: Config, name: &str, args: &[String], readonly: bool) -> Result<()> {
    let endpoint = api::find_endpoint(name)
        .with_context(|| format!("Unknown operation: {} (see `denvr list`)", name))?;

    if readonly && endpoint.method != HttpMethod::Get {
        anyhow::bail!("{} is blocked in read-only mode", endpoint.name);
    }

    let kwargs = parse_kwargs(args)?;
    let session = Session::new(config).context("Failed to create session")?;

    tracing::info!("Calling {} ({} {})", endpoint.name, endpoint.method, endpoint.path);

    match api::call_with_kwargs(&session, endpoint, &kwargs).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            tracing::error!("{}", failure_summary(endpoint.name, &err));
            Err(anyhow::anyhow!(format_api_error(&err)))
        }
    }
}

/// Log line for a failed call. Response bodies are never included.
fn failure_summary(operation: &str, err: &DenvrError) -> String {
    match err.status() {
        Some(status) => format!("{} failed ({}): {}", operation, status, format_api_error(err)),
        None => format!("{} failed: {}", operation, format_api_error(err)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    match &args.command {
        Command::List => {
            list_operations();
            Ok(())
        }
        Command::Describe { operation } => describe_operation(operation),
        Command::Call {
            operation,
            args: call_args,
        } => {
            // CLI > config file > built-in defaults
            let mut config =
                Config::load(args.config.as_deref()).context("Failed to load configuration")?;
            if let Some(server) = &args.server {
                config = config.with_server(server);
            }
            if let Some(cluster) = &args.cluster {
                config = config.with_cluster(cluster);
            }
            if let Some(namespace) = &args.namespace {
                config = config.with_namespace(namespace);
            }

            call_operation(config, operation, call_args, args.readonly).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_kwargs() {
        let kwargs = parse_kwargs(&[
            "id=snap-1".to_string(),
            "persist_storage=false".to_string(),
            "ssh_keys=[\"ssh-ed25519 AAAA\"]".to_string(),
        ])
        .unwrap();

        assert_eq!(kwargs.get("id"), Some(&json!("snap-1")));
        assert_eq!(kwargs.get("persist_storage"), Some(&json!(false)));
        assert_eq!(kwargs.get("ssh_keys"), Some(&json!(["ssh-ed25519 AAAA"])));
    }

    #[test]
    fn test_parse_kwargs_rejects_missing_equals() {
        assert!(parse_kwargs(&["cluster".to_string()]).is_err());
    }

    #[test]
    fn test_args_parse_call() {
        let args = Args::try_parse_from([
            "denvr", "--cluster", "Msc1", "call", "get_snapshot", "-a", "id=snap-1",
        ])
        .unwrap();

        assert_eq!(args.cluster.as_deref(), Some("Msc1"));
        match args.command {
            Command::Call { operation, args } => {
                assert_eq!(operation, "get_snapshot");
                assert_eq!(args, vec!["id=snap-1".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_failure_summary_leaves_out_body() {
        let err = DenvrError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "{\"error\": \"vm-42 owned by alice@example.com\"}".to_string(),
        };

        let line = failure_summary("get_server", &err);

        assert!(line.starts_with("get_server failed (404 Not Found)"));
        assert!(line.contains("Resource not found."));
        assert!(!line.contains("alice@example.com"));
    }

    #[test]
    fn test_failure_summary_without_status() {
        let err = DenvrError::MissingParameters {
            method: HttpMethod::Get,
            path: "/api/v1/servers/virtual/GetServer".to_string(),
            missing: vec!["Id".to_string()],
        };

        let line = failure_summary("get_server", &err);

        assert!(line.starts_with("get_server failed: missing required parameter(s)"));
        assert!(line.ends_with("Id"));
    }
}

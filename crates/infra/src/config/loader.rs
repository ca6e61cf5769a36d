//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `CARBONWISE_API_BASE_URL` is unset, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Uses built-in defaults when no file exists
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `CARBONWISE_API_BASE_URL`: API base URL (required for the env path)
//! - `CARBONWISE_API_TIMEOUT_SECS`: Remote calculation timeout in seconds
//! - `CARBONWISE_API_MAX_ATTEMPTS`: Attempts for idempotent requests
//! - `CARBONWISE_REMOTE_ENABLED`: Whether remote calculation is used
//!   (true/false)
//! - `CARBONWISE_SESSION_PATH`: Session file path
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./carbonwise.toml` or `./carbonwise.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use carbonwise_domain::{ApiConfig, CarbonError, Config, Result, SessionConfig};

const ENV_BASE_URL: &str = "CARBONWISE_API_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "CARBONWISE_API_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "CARBONWISE_API_MAX_ATTEMPTS";
const ENV_REMOTE_ENABLED: &str = "CARBONWISE_REMOTE_ENABLED";
const ENV_SESSION_PATH: &str = "CARBONWISE_SESSION_PATH";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["carbonwise.toml", "carbonwise.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Environment first, then a probed config file, then defaults.
///
/// # Errors
/// Returns `CarbonError::Config` if an environment value or a found file is
/// invalid, or the resulting configuration fails validation.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) if std::env::var_os(ENV_BASE_URL).is_some() => return Err(e),
        Err(e) => {
            tracing::debug!(error = %e, "Environment incomplete, trying file");
        }
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration file found, using defaults");
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Load configuration from environment variables
///
/// `CARBONWISE_API_BASE_URL` must be set. The other variables fall back to
/// their defaults.
///
/// # Errors
/// Returns `CarbonError::Config` if the base URL is missing or a value is
/// invalid.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_BASE_URL)?;
    let defaults = ApiConfig::default();

    let timeout_secs = env_parse(ENV_TIMEOUT_SECS)?.unwrap_or(defaults.timeout_secs);
    let max_attempts = env_parse(ENV_MAX_ATTEMPTS)?.unwrap_or(defaults.max_attempts);
    let remote_enabled = env_bool(ENV_REMOTE_ENABLED, defaults.remote_enabled);
    let session = std::env::var_os(ENV_SESSION_PATH)
        .map(|path| SessionConfig { path: PathBuf::from(path) })
        .unwrap_or_default();

    let config = Config {
        api: ApiConfig { base_url, timeout_secs, max_attempts, remote_enabled },
        session,
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CarbonError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CarbonError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CarbonError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CarbonError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CarbonError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CarbonError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CarbonError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory and up to two parents, then the
/// executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CarbonError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `CarbonError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CarbonError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 5] =
        [ENV_BASE_URL, ENV_TIMEOUT_SECS, ENV_MAX_ATTEMPTS, ENV_REMOTE_ENABLED, ENV_SESSION_PATH];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CARBONWISE_TEST_BOOL_ON", "on");
        std::env::set_var("CARBONWISE_TEST_BOOL_UPPER", "TRUE");
        std::env::set_var("CARBONWISE_TEST_BOOL_OFF", "0");

        assert!(env_bool("CARBONWISE_TEST_BOOL_ON", false));
        assert!(env_bool("CARBONWISE_TEST_BOOL_UPPER", false));
        assert!(!env_bool("CARBONWISE_TEST_BOOL_OFF", true));

        std::env::remove_var("CARBONWISE_TEST_BOOL_MISSING");
        assert!(env_bool("CARBONWISE_TEST_BOOL_MISSING", true));

        std::env::remove_var("CARBONWISE_TEST_BOOL_ON");
        std::env::remove_var("CARBONWISE_TEST_BOOL_UPPER");
        std::env::remove_var("CARBONWISE_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "https://carbon.example.com/api");
        std::env::set_var(ENV_TIMEOUT_SECS, "4");
        std::env::set_var(ENV_MAX_ATTEMPTS, "5");
        std::env::set_var(ENV_REMOTE_ENABLED, "false");
        std::env::set_var(ENV_SESSION_PATH, "/tmp/carbonwise-session.json");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.base_url, "https://carbon.example.com/api");
        assert_eq!(config.api.timeout_secs, 4);
        assert_eq!(config.api.max_attempts, 5);
        assert!(!config.api.remote_enabled);
        assert_eq!(config.session.path, PathBuf::from("/tmp/carbonwise-session.json"));
    }

    #[test]
    fn test_load_from_env_only_base_url_uses_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "http://127.0.0.1:9000/api");
        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.api.max_attempts, 3);
        assert!(config.api.remote_enabled);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CarbonError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "http://localhost:8000/api");
        std::env::set_var(ENV_TIMEOUT_SECS, "soon");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(CarbonError::Config(_))));
    }

    #[test]
    fn test_load_rejects_invalid_env_url_instead_of_falling_back() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_BASE_URL, "not a url");
        let result = load();
        clear_env();

        assert!(matches!(result, Err(CarbonError::Config(_))));
    }

    #[test]
    fn test_load_from_file_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carbonwise.json");
        std::fs::write(
            &path,
            r#"{"api": {"base_url": "https://json.example.com/api", "remote_enabled": false}}"#,
        )
        .unwrap();

        let config = load_from_file(Some(path)).expect("config from JSON");
        assert_eq!(config.api.base_url, "https://json.example.com/api");
        assert!(!config.api.remote_enabled);
        assert_eq!(config.api.max_attempts, 3);
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carbonwise.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://toml.example.com/api"
timeout_secs = 3

[session]
path = "/var/lib/carbonwise/session.json"
"#,
        )
        .unwrap();

        let config = load_from_file(Some(path)).expect("config from TOML");
        assert_eq!(config.api.base_url, "https://toml.example.com/api");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.session.path, PathBuf::from("/var/lib/carbonwise/session.json"));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/carbonwise.json")));
        assert!(matches!(result, Err(CarbonError::Config(_))));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("carbonwise.toml");
        std::fs::write(&path, "[api]\nmax_attempts = 0\n").unwrap();

        assert!(matches!(load_from_file(Some(path)), Err(CarbonError::Config(_))));
    }

    #[test]
    fn test_parse_config_empty_documents_use_defaults() {
        let toml = parse_config("", Path::new("carbonwise.toml")).unwrap();
        let json = parse_config("{}", Path::new("carbonwise.json")).unwrap();
        assert_eq!(toml, Config::default());
        assert_eq!(json, Config::default());
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("api: {}", Path::new("carbonwise.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}

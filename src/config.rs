//! Configuration loading and resolution.
//!
//! Precedence for every setting: CLI flag, then environment (model and API key
//! only), then the settings file, then the built-in default.

use crate::cli::{BenchArgs, ProbeArgs};
use crate::error::{Error, Result};
use crate::providers::{find_service, openai};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "INTENT_BENCH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "intent-bench.json";
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const MODEL_ENV: &str = "OPENROUTER_MODEL";

pub const DEFAULT_BENCH_INPUTS: [&str; 2] = ["intents_pre_loaded.csv", "intents_pos_loaded.csv"];
pub const DEFAULT_PROBE_INPUT: &str = "assets/intents_pos_loaded.csv";
pub const DEFAULT_PROBE_OUTPUT: &str = "assets/found_services.csv";
pub const DEFAULT_CALLS_PER_SAMPLE: usize = 2;

const REDACTED_VALUE: &str = "[REDACTED]";

/// Settings file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bench: Option<BenchConfig>,
    pub probe: Option<ProbeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub inputs: Option<Vec<PathBuf>>,
    pub model: Option<String>,
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(alias = "callsPerSample")]
    pub calls: Option<usize>,
    #[serde(alias = "timeoutSecs")]
    pub timeout_secs: Option<u64>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub url: Option<String>,
    #[serde(alias = "timeoutMs")]
    pub timeout_ms: Option<u64>,
    pub max: Option<usize>,
}

impl Config {
    /// Load using the process environment and working directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_with(explicit, env_lookup, &cwd)
    }

    /// Load from `explicit`, else `$INTENT_BENCH_CONFIG`, else `cwd/intent-bench.json`.
    ///
    /// A named file must exist; the implicit one is optional.
    pub fn load_with<F>(explicit: Option<&Path>, get_env: F, cwd: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| get_env(CONFIG_PATH_ENV).map(PathBuf::from));

        if let Some(path) = named {
            if !path.exists() {
                return Err(Error::config(format!(
                    "Settings file {} does not exist",
                    path.display()
                )));
            }
            return Self::load_from_path(&path);
        }

        Self::load_from_path(&cwd.join(DEFAULT_CONFIG_FILE))
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse settings file {}: {e}",
                path.display()
            ))
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        Ok(config)
    }
}

// ============================================================================
// Resolved settings
// ============================================================================

/// Everything the `bench` command needs, fully resolved.
#[derive(Clone)]
pub struct BenchSettings {
    pub inputs: Vec<PathBuf>,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub calls_per_sample: usize,
    pub timeout: Duration,
    /// `None` evaluates every sample.
    pub max_samples: Option<usize>,
}

impl fmt::Debug for BenchSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchSettings")
            .field("inputs", &self.inputs)
            .field("api_key", &REDACTED_VALUE)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("calls_per_sample", &self.calls_per_sample)
            .field("timeout", &self.timeout)
            .field("max_samples", &self.max_samples)
            .finish()
    }
}

impl BenchSettings {
    pub fn resolve<F>(args: &BenchArgs, config: &Config, get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = config.bench.clone().unwrap_or_default();

        let api_key = args
            .api_key
            .clone()
            .or_else(|| get_env(API_KEY_ENV))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "Missing API key: set {API_KEY_ENV} or pass --api-key"
                ))
            })?;

        let model = args
            .model
            .clone()
            .or_else(|| non_empty(get_env(MODEL_ENV)))
            .or(file.model)
            .unwrap_or_else(|| openai::DEFAULT_MODEL.to_string());

        let inputs = if args.inputs.is_empty() {
            file.inputs
                .filter(|inputs| !inputs.is_empty())
                .unwrap_or_else(|| DEFAULT_BENCH_INPUTS.iter().map(PathBuf::from).collect())
        } else {
            args.inputs.clone()
        };

        let calls_per_sample = args.calls.or(file.calls).unwrap_or(DEFAULT_CALLS_PER_SAMPLE);
        if calls_per_sample == 0 {
            return Err(Error::config("--calls must be at least 1"));
        }

        let timeout = match args.timeout_secs.or(file.timeout_secs) {
            Some(0) => return Err(Error::config("--timeout-secs must be positive")),
            Some(secs) => Duration::from_secs(secs),
            None => openai::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            inputs,
            api_key,
            model,
            base_url: args
                .base_url
                .clone()
                .or(file.base_url)
                .unwrap_or_else(|| openai::OPENROUTER_API_URL.to_string()),
            calls_per_sample,
            timeout,
            max_samples: row_cap(args.max.or(file.max)),
        })
    }
}

/// Everything the `probe` command needs, fully resolved.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub endpoint: String,
    pub timeout: Duration,
    pub max_samples: Option<usize>,
}

impl ProbeSettings {
    pub fn resolve(args: &ProbeArgs, config: &Config) -> Result<Self> {
        let file = config.probe.clone().unwrap_or_default();

        let timeout = match args.timeout_ms.or(file.timeout_ms) {
            Some(0) => return Err(Error::config("--timeout-ms must be positive")),
            Some(ms) => Duration::from_millis(ms),
            None => find_service::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            input: args
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROBE_INPUT)),
            output: args
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROBE_OUTPUT)),
            endpoint: args
                .url
                .clone()
                .or(file.url)
                .unwrap_or_else(|| find_service::DEFAULT_ENDPOINT.to_string()),
            timeout,
            max_samples: row_cap(args.max.or(file.max)),
        })
    }
}

fn row_cap(max: Option<usize>) -> Option<usize> {
    max.filter(|&n| n > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read the real process environment.
pub fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

use serde::{Deserialize, Serialize};

/// Main configuration structure for the verifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Retry policy for remote calls
    #[serde(default)]
    pub retry: RetryConfig,

    /// Inference services, one per model
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Regulatory compliance service
    #[serde(default)]
    pub compliance: ComplianceConfig,

    /// Decision thresholds
    #[serde(default)]
    pub verification: VerificationConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".bluecarbon/bluecarbon.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Number of days to retain logs
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

const fn default_retention_days() -> u32 {
    30
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            retention_days: default_retention_days(),
            log_dir: None,
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_initial_backoff_ms() -> u64 {
    250
}

const fn default_max_backoff_ms() -> u64 {
    2_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// A single model inference endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelEndpointConfig {
    /// Model identifier sent with every request
    pub id: String,

    /// Full URL the prediction request is POSTed to
    pub endpoint: String,
}

/// Inference fan-out configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InferenceConfig {
    /// Per-model timeout in milliseconds, covering retries
    #[serde(default = "default_inference_timeout_ms")]
    pub timeout_ms: u64,

    /// Models queried on every run; fusion order follows this list
    #[serde(default = "default_models")]
    pub models: Vec<ModelEndpointConfig>,
}

const fn default_inference_timeout_ms() -> u64 {
    10_000
}

fn default_models() -> Vec<ModelEndpointConfig> {
    vec![
        ModelEndpointConfig {
            id: "carbon-sequestration".to_string(),
            endpoint: "http://localhost:8001/predict".to_string(),
        },
        ModelEndpointConfig {
            id: "growth-biomass".to_string(),
            endpoint: "http://localhost:8002/predict".to_string(),
        },
    ]
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_inference_timeout_ms(),
            models: default_models(),
        }
    }
}

/// Compliance service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ComplianceConfig {
    /// URL the compliance request is POSTed to
    #[serde(default = "default_compliance_endpoint")]
    pub endpoint: String,

    /// Timeout in milliseconds, covering retries
    #[serde(default = "default_compliance_timeout_ms")]
    pub timeout_ms: u64,

    /// Crediting methodology the project is assessed against
    #[serde(default = "default_methodology")]
    pub methodology: String,
}

fn default_compliance_endpoint() -> String {
    "http://localhost:8010/compliance".to_string()
}

const fn default_compliance_timeout_ms() -> u64 {
    10_000
}

fn default_methodology() -> String {
    "VM0033".to_string()
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_compliance_endpoint(),
            timeout_ms: default_compliance_timeout_ms(),
            methodology: default_methodology(),
        }
    }
}

/// Thresholds for the final verified decision
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VerificationConfig {
    /// Minimum overall compliance score (inclusive)
    #[serde(default = "default_min_compliance_score")]
    pub min_compliance_score: f64,

    /// Minimum fused confidence (inclusive)
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
}

const fn default_min_compliance_score() -> f64 {
    0.7
}

const fn default_min_confidence() -> f64 {
    0.6
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            min_compliance_score: default_min_compliance_score(),
            min_confidence: default_min_confidence(),
        }
    }
}

impl VerificationConfig {
    /// Terminal decision rule.
    pub fn is_verified(&self, compliance_score: f64, confidence: f64) -> bool {
        compliance_score >= self.min_compliance_score && confidence >= self.min_confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_boundaries() {
        let thresholds = VerificationConfig::default();
        assert!(thresholds.is_verified(0.700, 0.600));
        assert!(!thresholds.is_verified(0.699, 0.600));
        assert!(!thresholds.is_verified(0.700, 0.599));
        assert!(thresholds.is_verified(0.9, 0.7));
    }

    #[test]
    fn test_default_models() {
        let config = Config::default();
        assert_eq!(config.inference.models.len(), 2);
        assert_eq!(config.compliance.methodology, "VM0033");
    }
}

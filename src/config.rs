use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;
use crate::scoring::{Markers, OverlapMode};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub qarank: QarankConfig,
    #[serde(default)]
    pub segmenter: SegmenterConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// QARank-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QarankConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for QarankConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Sentinel tokens recognised in the tagged-token stream
#[derive(Debug, Clone, Deserialize)]
pub struct SegmenterConfig {
    #[serde(default = "default_question_marker")]
    pub question_marker: String,
    #[serde(default = "default_answer_marker")]
    pub answer_marker: String,
    #[serde(default = "default_positive_label")]
    pub positive_label: String,
    #[serde(default = "default_negative_label")]
    pub negative_label: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            question_marker: default_question_marker(),
            answer_marker: default_answer_marker(),
            positive_label: default_positive_label(),
            negative_label: default_negative_label(),
        }
    }
}

impl SegmenterConfig {
    /// Marker set handed to the segmenter and the tagged-text parser
    pub fn markers(&self) -> Markers {
        Markers {
            question: self.question_marker.clone(),
            answer: self.answer_marker.clone(),
            positive: self.positive_label.clone(),
            negative: self.negative_label.clone(),
        }
    }
}

/// Scoring configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub overlap_mode: OverlapMode,
}

/// Report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "default_dedupe_answers")]
    pub dedupe_answers: bool,
    /// Fail the run when mean gold precision@N is below this value
    #[serde(default)]
    pub min_gold_precision: Option<f64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            dedupe_answers: default_dedupe_answers(),
            min_gold_precision: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_question_marker() -> String {
    "Q".to_string()
}

fn default_answer_marker() -> String {
    "A".to_string()
}

fn default_positive_label() -> String {
    "1".to_string()
}

fn default_negative_label() -> String {
    "0".to_string()
}

fn default_dedupe_answers() -> bool {
    true
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in QARANK_CONFIG environment variable (must exist)
    /// 2. ./config.toml in current directory
    ///
    /// Falls back to built-in defaults when neither is present.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        if let Ok(path) = std::env::var("QARANK_CONFIG") {
            return Self::from_file(Path::new(&path));
        }

        let default_path = PathBuf::from("config.toml");
        if default_path.is_file() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&config_str)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate TOML configuration text
    pub fn parse(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let seg = &self.segmenter;
        let markers = [
            ("question_marker", &seg.question_marker),
            ("answer_marker", &seg.answer_marker),
            ("positive_label", &seg.positive_label),
            ("negative_label", &seg.negative_label),
        ];

        for (name, value) in &markers {
            if value.trim().is_empty() {
                anyhow::bail!("segmenter.{} must not be empty", name);
            }
            if value.chars().any(char::is_whitespace) {
                anyhow::bail!("segmenter.{} must be a single token: {:?}", name, value);
            }
        }

        for (i, (a_name, a)) in markers.iter().enumerate() {
            for (b_name, b) in &markers[i + 1..] {
                if a == b {
                    anyhow::bail!(
                        "segmenter.{} and segmenter.{} must differ (both {:?})",
                        a_name,
                        b_name,
                        a
                    );
                }
            }
        }

        if let Some(threshold) = self.report.min_gold_precision {
            if !(0.0..=1.0).contains(&threshold) {
                anyhow::bail!("report.min_gold_precision must be between 0.0 and 1.0");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    const FULL_CONFIG: &str = r#"
[qarank]
log_level = "debug"

[segmenter]
question_marker = "QUESTION"
answer_marker = "ANSWER"
positive_label = "+"
negative_label = "-"

[scoring]
overlap_mode = "unique"

[report]
format = "json"
dedupe_answers = false
min_gold_precision = 0.5
"#;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.qarank.log_level, "info");
        assert_eq!(config.segmenter.question_marker, "Q");
        assert_eq!(config.segmenter.answer_marker, "A");
        assert_eq!(config.scoring.overlap_mode, OverlapMode::Literal);
        assert_eq!(config.report.format, ReportFormat::Text);
        assert!(config.report.dedupe_answers);
        assert!(config.report.min_gold_precision.is_none());
    }

    #[test]
    fn test_config_parse_full() {
        let config = Config::parse(FULL_CONFIG).unwrap();
        assert_eq!(config.qarank.log_level, "debug");
        assert_eq!(config.segmenter.answer_marker, "ANSWER");
        assert_eq!(config.scoring.overlap_mode, OverlapMode::Unique);
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(!config.report.dedupe_answers);
        assert_eq!(config.report.min_gold_precision, Some(0.5));

        let markers = config.segmenter.markers();
        assert_eq!(markers.question, "QUESTION");
        assert_eq!(markers.positive, "+");
    }

    #[test]
    fn test_config_partial_uses_defaults() {
        let config = Config::parse("[scoring]\noverlap_mode = \"literal\"\n").unwrap();
        assert_eq!(config.segmenter.question_marker, "Q");
        assert!(config.report.dedupe_answers);
    }

    #[test]
    fn test_config_rejects_duplicate_markers() {
        let err = Config::parse("[segmenter]\nquestion_marker = \"A\"\n").unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_config_rejects_empty_marker() {
        let err = Config::parse("[segmenter]\nanswer_marker = \"\"\n").unwrap_err();
        assert!(err.to_string().contains("answer_marker"));
    }

    #[test]
    fn test_config_rejects_threshold_out_of_range() {
        assert!(Config::parse("[report]\nmin_gold_precision = 1.5\n").is_err());
    }

    #[test]
    fn test_config_rejects_unknown_mode() {
        assert!(Config::parse("[scoring]\noverlap_mode = \"fuzzy\"\n").is_err());
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("qarank.toml");
        fs::write(&config_path, FULL_CONFIG).unwrap();

        let original = std::env::var("QARANK_CONFIG").ok();
        std::env::set_var("QARANK_CONFIG", &config_path);
        let config = Config::load();
        std::env::remove_var("QARANK_CONFIG");
        if let Some(v) = original {
            std::env::set_var("QARANK_CONFIG", v);
        }

        let config = config.unwrap();
        assert_eq!(config.scoring.overlap_mode, OverlapMode::Unique);
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let original = std::env::var("QARANK_CONFIG").ok();
        std::env::set_var("QARANK_CONFIG", "nonexistent.toml");
        let config = Config::load();
        std::env::remove_var("QARANK_CONFIG");
        if let Some(v) = original {
            std::env::set_var("QARANK_CONFIG", v);
        }
        assert!(config.is_err());
        assert!(config.unwrap_err().to_string().contains("nonexistent.toml"));
    }
}

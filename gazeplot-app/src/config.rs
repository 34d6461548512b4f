use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One run of the viewer: which export, which image, which stimulus, and
/// optionally which participant. A JSON file with the same fields selects a
/// different run without recompiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub dataset: PathBuf,
    pub image: PathBuf,
    pub stimulus: String,
    pub participant: Option<String>,
    pub marker_scale: Option<f32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("Literacy-Demo Data Export.tsv"),
            image: PathBuf::from("Question-pic.PNG"),
            stimulus: "Question-pic".to_string(),
            participant: None,
            marker_scale: None,
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("config {} is not valid JSON", path.display()))
    }

    /// An optional single argument names a config file; with no argument the
    /// built-in demo run is used.
    pub fn from_args() -> Result<Self> {
        match std::env::args().nth(1) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Marker divisor. Per-participant plots size markers as duration/5,
    /// all-participant summaries as duration/10; the default follows the
    /// mode unless overridden.
    pub fn marker_scale(&self) -> f32 {
        self.marker_scale
            .unwrap_or(if self.participant.is_some() { 5.0 } else { 10.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reproduces_the_demo_run() {
        let config = RunConfig::default();
        assert_eq!(config.stimulus, "Question-pic");
        assert_eq!(config.participant, None);
        assert_eq!(config.dataset, PathBuf::from("Literacy-Demo Data Export.tsv"));
    }

    #[test]
    fn marker_scale_defaults_follow_the_mode() {
        let mut config = RunConfig::default();
        assert_eq!(config.marker_scale(), 10.0);

        config.participant = Some("Participant5".to_string());
        assert_eq!(config.marker_scale(), 5.0);

        config.marker_scale = Some(7.5);
        assert_eq!(config.marker_scale(), 7.5);
    }

    #[test]
    fn json_config_fills_missing_fields_from_defaults() {
        let config: RunConfig = serde_json::from_str(
            r#"{ "dataset": "Recording5.tsv", "participant": "Participant5" }"#,
        )
        .unwrap();
        assert_eq!(config.dataset, PathBuf::from("Recording5.tsv"));
        assert_eq!(config.participant.as_deref(), Some("Participant5"));
        assert_eq!(config.stimulus, "Question-pic");
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        let result: Result<RunConfig, _> =
            serde_json::from_str(r#"{ "datset": "typo.tsv" }"#);
        assert!(result.is_err());
    }
}

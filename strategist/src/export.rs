use anyhow::Result;
use chrono::{DateTime, Utc};
use inflector::Inflector;

use crate::analysis::{Analysis, ProjectData};

/// A downloadable snapshot of an analysis session.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Export {
    pub project_data: ProjectData,
    pub analysis: Analysis,
    pub roi: Option<f64>,
    pub safety_checklist: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Export {
    #[must_use]
    pub fn new(
        project_data: ProjectData,
        analysis: Analysis,
        roi: Option<f64>,
        safety_checklist: Vec<String>,
    ) -> Self {
        Self {
            project_data,
            analysis,
            roi,
            safety_checklist,
            timestamp: Utc::now(),
        }
    }

    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if `json` isn't a valid export document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        let slug = self.project_data.name.to_snake_case();
        let slug = if slug.is_empty() { "project".to_string() } else { slug };

        format!("{slug}_analysis_{}.json", self.timestamp.format("%Y%m%d_%H%M%S"))
    }
}

use anyhow::Context;
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use axum_jsonschema::Json;
use schemars::JsonSchema;
use validator::Validate;

use crate::axum::errors::ApiResult;
use ::strategist::{report, roi, safety_checklist, Analysis, AnalysisReport, Export, ProjectData};

#[allow(clippy::unused_async)]
pub async fn analyze(Json(project): Json<ProjectData>) -> ApiResult<Json<AnalysisReport>> {
    project.validate()?;

    Ok(Json(report(&project)))
}

#[allow(clippy::unused_async)]
pub async fn checklist() -> Json<Vec<String>> {
    Json(safety_checklist())
}

/// The form's session state.
///
/// Without `analysis`, the whole report is recomputed from `project_data` and any `roi` or
/// `safety_checklist` sent alongside is ignored. With it, a missing `roi` or checklist is
/// recomputed and the supplied ones are kept as-is.
#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct ExportRequest {
    project_data: ProjectData,
    analysis: Option<Analysis>,
    roi: Option<f64>,
    safety_checklist: Option<Vec<String>>,
}

#[allow(clippy::unused_async)]
pub async fn export(Json(req): Json<ExportRequest>) -> ApiResult<Response> {
    req.project_data.validate()?;

    let export = match req.analysis {
        Some(analysis) => {
            let project_roi = req.roi.or_else(|| roi(&req.project_data));

            Export::new(
                req.project_data,
                analysis,
                project_roi,
                req.safety_checklist.unwrap_or_else(safety_checklist),
            )
        }
        None => {
            let AnalysisReport {
                analysis,
                roi,
                safety_checklist,
            } = report(&req.project_data);

            Export::new(req.project_data, analysis, roi, safety_checklist)
        }
    };

    let body = export.to_json().context("Failed to serialize export.")?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name()),
            ),
        ],
        body,
    )
        .into_response())
}

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::assist::ResumeAnalysis;
use crate::state::AppState;

use super::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewTasksRequest {
    pub interview_date: String,
    pub position: String,
    pub experience_level: String,
}

/// Generate interview preparation tasks (POST /assist/interview-tasks).
pub async fn interview_tasks(
    State(state): State<AppState>,
    Json(request): Json<InterviewTasksRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tasks = state
        .assist
        .generate_interview_tasks(
            &request.interview_date,
            &request.position,
            &request.experience_level,
        )
        .await?;

    tracing::info!(position = %request.position, "Generated interview tasks");
    Ok(Json(tasks))
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    /// Extracted resume text; file handling happens client-side.
    pub text: String,
}

/// Analyze resume text (POST /assist/resume).
pub async fn analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let analysis = state.assist.analyze_resume(&request.text).await?;
    Ok(Json(analysis))
}

//! Axum route handlers for the analysis API.

use std::collections::BTreeSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::models::{
    GapReport, InterviewQuestions, JobDescription, LearningPath, ProfileDocument, SkillCategory,
    SourceFormat,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BenchmarkRequest {
    pub cv_text: String,
    #[serde(default)]
    pub source_format: SourceFormat,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct BenchmarkResponse {
    #[serde(flatten)]
    pub report: GapReport,
    pub match_score: f64,
    pub strong_candidate: bool,
    pub breakdown: SkillBreakdown,
}

/// The report's skills grouped the way the results page lays them out.
#[derive(Debug, Serialize)]
pub struct SkillBreakdown {
    pub matched_technical: Vec<String>,
    pub matched_soft: Vec<String>,
    pub missing_technical: Vec<String>,
    pub missing_soft: Vec<String>,
}

impl SkillBreakdown {
    fn from_report(report: &GapReport) -> Self {
        let pick = |skills: &BTreeSet<String>, category| -> Vec<String> {
            report
                .in_category(skills, category)
                .map(str::to_string)
                .collect()
        };

        Self {
            matched_technical: pick(&report.matched_skills, SkillCategory::Technical),
            matched_soft: pick(&report.matched_skills, SkillCategory::Soft),
            missing_technical: pick(&report.missing_skills, SkillCategory::Technical),
            missing_soft: pick(&report.missing_skills, SkillCategory::Soft),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ElevateRequest {
    pub missing_skills: String,
}

#[derive(Debug, Deserialize)]
pub struct AceRequest {
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/benchmark
///
/// Compares the CV text with the job description and returns the gap report.
pub async fn handle_benchmark(
    State(state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> Result<Json<BenchmarkResponse>, AppError> {
    let profile = ProfileDocument::new(request.cv_text, request.source_format);
    let job_description = JobDescription::new(request.job_description);

    let report = state.analyzer.analyze(&profile, &job_description).await?;
    let match_score = report.match_score();
    info!(
        "Benchmark: {} matched, {} missing, score {:.2}%",
        report.matched_skills.len(),
        report.missing_skills.len(),
        match_score
    );

    Ok(Json(BenchmarkResponse {
        strong_candidate: report.is_strong_candidate(),
        match_score,
        breakdown: SkillBreakdown::from_report(&report),
        report,
    }))
}

/// POST /api/v1/elevate
///
/// Returns learning resources for a comma-separated list of missing skills.
pub async fn handle_elevate(
    State(state): State<AppState>,
    Json(request): Json<ElevateRequest>,
) -> Result<Json<LearningPath>, AppError> {
    let path = state.analyzer.learning_path(&request.missing_skills).await?;
    Ok(Json(path))
}

/// POST /api/v1/ace
pub async fn handle_ace(
    State(state): State<AppState>,
    Json(request): Json<AceRequest>,
) -> Result<Json<InterviewQuestions>, AppError> {
    let questions = state
        .analyzer
        .interview_questions(&JobDescription::new(request.job_description))
        .await?;
    Ok(Json(questions))
}

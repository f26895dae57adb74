//! Gap Analyzer ("Benchmark"): compares a CV with a job description and
//! produces a `GapReport` from one generation call.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::analysis::engine::{AnalysisError, Analyzer, StructuredTask};
use crate::analysis::models::{
    GapReport, JobDescription, ProfileDocument, SkillCategory, SourceFormat,
};
use crate::analysis::prompts::{render, GAP_ANALYSIS_TEMPLATE, PDF_EXTRACTED_NOTE};
use crate::analysis::response::{
    categorise, check_schema_version, clean_entries, decode, ensure_disjoint, skill_set,
};
use crate::llm_client::prompts::{JSON_ONLY_PREAMBLE, RESPONSE_SCHEMA_VERSION};

/// Wire shape of a gap analysis reply, schema version 1.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GapResponse {
    schema_version: u32,
    matched_skills: Vec<String>,
    missing_skills: Vec<String>,
    recommendations: Vec<String>,
    skill_categories: BTreeMap<String, SkillCategory>,
}

/// Validated, trimmed inputs for one gap analysis.
pub struct GapAnalysisTask<'a> {
    cv_text: &'a str,
    jd_text: &'a str,
    source_format: SourceFormat,
}

impl StructuredTask for GapAnalysisTask<'_> {
    type Output = GapReport;
    const NAME: &'static str = "gap_analysis";

    fn prompt(&self) -> String {
        let cv_format_note = match self.source_format {
            SourceFormat::PlainText => "",
            SourceFormat::PdfExtracted => PDF_EXTRACTED_NOTE,
        };

        let schema_version = RESPONSE_SCHEMA_VERSION.to_string();

        render(
            GAP_ANALYSIS_TEMPLATE,
            &[
                ("preamble", JSON_ONLY_PREAMBLE),
                ("schema_version", schema_version.as_str()),
                ("cv_format_note", cv_format_note),
                ("jd_text", self.jd_text),
                ("cv_text", self.cv_text),
            ],
        )
    }

    fn parse(&self, response: &str) -> Result<GapReport, AnalysisError> {
        parse_gap_response(response)
    }
}

fn parse_gap_response(response: &str) -> Result<GapReport, AnalysisError> {
    let raw: GapResponse = decode(response)?;
    check_schema_version(raw.schema_version)?;

    let matched_skills = skill_set("matched_skills", raw.matched_skills)?;
    let missing_skills = skill_set("missing_skills", raw.missing_skills)?;
    ensure_disjoint(&matched_skills, &missing_skills)?;
    let skill_categories = categorise(raw.skill_categories, &matched_skills, &missing_skills)?;

    Ok(GapReport {
        matched_skills,
        missing_skills,
        recommendations: clean_entries("recommendations", raw.recommendations)?,
        skill_categories,
    })
}

impl Analyzer {
    /// Produces a gap report for one CV / job description pair.
    ///
    /// The profile is validated before the job description; neither may be blank.
    pub async fn analyze(
        &self,
        profile: &ProfileDocument,
        job_description: &JobDescription,
    ) -> Result<GapReport, AnalysisError> {
        let task = GapAnalysisTask {
            cv_text: self.validate_text("profile", profile.raw_text())?,
            jd_text: self.validate_text("job_description", job_description.raw_text())?,
            source_format: profile.source_format(),
        };

        self.run(&task).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::analysis::engine::testing::{CannedGenerator, FailingGenerator};
    use crate::llm_client::LlmError;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn well_formed() -> String {
        json!({
            "schema_version": 1,
            "matched_skills": ["Python"],
            "missing_skills": ["AWS", "Docker"],
            "recommendations": [
                "Deploy a small service on AWS",
                "Containerise a side project with Docker",
                "Learn AWS IAM basics"
            ],
            "skill_categories": {
                "Python": "technical",
                "AWS": "technical",
                "Docker": "technical"
            }
        })
        .to_string()
    }

    fn analyzer_with(response: impl Into<String>) -> (Analyzer, Arc<CannedGenerator>) {
        let generator = Arc::new(CannedGenerator::new(response));
        (Analyzer::new(generator.clone()), generator)
    }

    #[tokio::test]
    async fn test_scenario_python_sql_against_python_aws_docker() {
        let (analyzer, _) = analyzer_with(well_formed());
        let report = analyzer
            .analyze(
                &ProfileDocument::plain_text("Python, SQL"),
                &JobDescription::new("Requires Python, AWS, Docker"),
            )
            .await
            .unwrap();

        assert_eq!(report.matched_skills, set(&["Python"]));
        assert_eq!(report.missing_skills, set(&["AWS", "Docker"]));
        assert_eq!(
            report.recommendations,
            vec![
                "Deploy a small service on AWS",
                "Containerise a side project with Docker",
                "Learn AWS IAM basics"
            ]
        );
        assert!(report.matched_skills.is_disjoint(&report.missing_skills));
        assert_eq!(
            report.skill_categories.get("Docker"),
            Some(&SkillCategory::Technical)
        );
    }

    #[tokio::test]
    async fn test_prompt_embeds_both_trimmed_inputs() {
        let (analyzer, generator) = analyzer_with(well_formed());
        analyzer
            .analyze(
                &ProfileDocument::plain_text("  Python, SQL \n"),
                &JobDescription::new("\tRequires Python, AWS, Docker  "),
            )
            .await
            .unwrap();

        let prompt = generator.last_prompt();
        assert!(prompt.contains("CANDIDATE CV:\nPython, SQL"));
        assert!(prompt.contains("JOB DESCRIPTION:\nRequires Python, AWS, Docker\n"));
        assert!(prompt.contains("\"schema_version\": 1"));
        assert!(!prompt.contains("extracted from a PDF"));
    }

    #[tokio::test]
    async fn test_pdf_extracted_profile_adds_layout_note() {
        let (analyzer, generator) = analyzer_with(well_formed());
        analyzer
            .analyze(
                &ProfileDocument::new("Python", SourceFormat::PdfExtracted),
                &JobDescription::new("Python"),
            )
            .await
            .unwrap();

        assert!(generator.last_prompt().contains("extracted from a PDF"));
    }

    #[tokio::test]
    async fn test_blank_profile_is_invalid_regardless_of_job() {
        for jd in ["Requires Rust", "", "   "] {
            let (analyzer, generator) = analyzer_with(well_formed());
            let err = analyzer
                .analyze(&ProfileDocument::plain_text(" \n\t "), &JobDescription::new(jd))
                .await
                .unwrap_err();

            assert!(matches!(
                err,
                AnalysisError::InvalidInput { field: "profile", .. }
            ));
            assert_eq!(generator.calls(), 0, "no call may be made for invalid input");
        }
    }

    #[tokio::test]
    async fn test_blank_job_description_is_invalid() {
        let (analyzer, generator) = analyzer_with(well_formed());
        let err = analyzer
            .analyze(&ProfileDocument::plain_text("Rust"), &JobDescription::new(""))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::InvalidInput { field: "job_description", .. }
        ));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_input_is_invalid() {
        let generator = Arc::new(CannedGenerator::new(well_formed()));
        let analyzer = Analyzer::new(generator).with_max_input_chars(10);
        let err = analyzer
            .analyze(
                &ProfileDocument::plain_text("Rust"),
                &JobDescription::new("Requires Rust and a lot more"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_unparsable_response_is_malformed() {
        let (analyzer, _) = analyzer_with("Matched: Python. Missing: AWS, Docker.");
        let err = analyzer
            .analyze(
                &ProfileDocument::plain_text("Python"),
                &JobDescription::new("Python, AWS"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates_unchanged() {
        let generator = Arc::new(FailingGenerator::default());
        let analyzer = Analyzer::new(generator.clone());
        let err = analyzer
            .analyze(
                &ProfileDocument::plain_text("Python"),
                &JobDescription::new("Python, AWS"),
            )
            .await
            .unwrap_err();

        match err {
            AnalysisError::ExternalService(LlmError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("expected ExternalService, got {other:?}"),
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_identical_inputs_yield_equal_reports() {
        let (analyzer, generator) = analyzer_with(well_formed());
        let profile = ProfileDocument::plain_text("Python, SQL");
        let jd = JobDescription::new("Requires Python, AWS, Docker");

        let first = analyzer.analyze(&profile, &jd).await.unwrap();
        let second = analyzer.analyze(&profile, &jd).await.unwrap();

        assert_eq!(first, second);
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[test]
    fn test_parse_rejects_overlapping_skills() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["Python", "AWS"],
            "missing_skills": ["aws"],
            "recommendations": [],
            "skill_categories": {}
        })
        .to_string();

        let err = parse_gap_response(&response).unwrap_err();
        assert!(err.to_string().contains("both matched and missing"));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["Python"],
            "recommendations": []
        })
        .to_string();

        assert!(matches!(
            parse_gap_response(&response),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_future_schema_version() {
        let response = json!({
            "schema_version": 2,
            "matched_skills": [],
            "missing_skills": [],
            "recommendations": [],
            "skill_categories": {}
        })
        .to_string();

        let err = parse_gap_response(&response).unwrap_err();
        assert!(err.to_string().contains("schema_version 2"));
    }

    #[test]
    fn test_parse_accepts_fenced_response_and_trims_entries() {
        let response = format!("```json\n{}\n```", json!({
            "schema_version": 1,
            "matched_skills": ["  Python "],
            "missing_skills": [],
            "recommendations": [" Keep going "],
            "skill_categories": {"python": "technical"}
        }));

        let report = parse_gap_response(&response).unwrap();
        assert_eq!(report.matched_skills, set(&["Python"]));
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.recommendations, vec!["Keep going"]);
        assert_eq!(
            report.skill_categories.get("Python"),
            Some(&SkillCategory::Technical)
        );
        assert!(report.is_strong_candidate());
    }

    #[test]
    fn test_parse_splits_technical_and_soft_skills() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["SQL", "Communication"],
            "missing_skills": ["Tableau", "Stakeholder management"],
            "recommendations": ["Build a Tableau dashboard"],
            "skill_categories": {
                "SQL": "technical",
                "Communication": "soft",
                "Tableau": "technical",
                "Stakeholder management": "soft"
            }
        })
        .to_string();

        let report = parse_gap_response(&response).unwrap();
        let missing_soft: Vec<_> = report
            .in_category(&report.missing_skills, SkillCategory::Soft)
            .collect();
        let matched_technical: Vec<_> = report
            .in_category(&report.matched_skills, SkillCategory::Technical)
            .collect();
        assert_eq!(missing_soft, vec!["Stakeholder management"]);
        assert_eq!(matched_technical, vec!["SQL"]);
    }

    #[test]
    fn test_parse_rejects_category_for_unlisted_skill() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["Python"],
            "missing_skills": ["AWS"],
            "recommendations": [],
            "skill_categories": {"Python": "technical", "Leadership": "soft"}
        })
        .to_string();

        let err = parse_gap_response(&response).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        assert!(err.to_string().contains("Leadership"));
    }

    #[test]
    fn test_parse_rejects_unknown_category_value() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["Python"],
            "missing_skills": [],
            "recommendations": [],
            "skill_categories": {"Python": "hard"}
        })
        .to_string();

        assert!(matches!(
            parse_gap_response(&response),
            Err(AnalysisError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_requires_skill_categories() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": ["Python"],
            "missing_skills": [],
            "recommendations": []
        })
        .to_string();

        let err = parse_gap_response(&response).unwrap_err();
        assert!(err.to_string().contains("skill_categories"));
    }

    #[test]
    fn test_parse_keeps_recommendation_order_and_duplicates() {
        let response = json!({
            "schema_version": 1,
            "matched_skills": [],
            "missing_skills": ["Go"],
            "recommendations": ["b", "a", "b"],
            "skill_categories": {}
        })
        .to_string();

        let report = parse_gap_response(&response).unwrap();
        assert_eq!(report.recommendations, vec!["b", "a", "b"]);
    }
}

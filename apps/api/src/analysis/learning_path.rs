//! Learning path ("Elevate"): course suggestions for a list of missing skills.

use serde::Deserialize;

use crate::analysis::engine::{AnalysisError, Analyzer, StructuredTask};
use crate::analysis::models::{LearningPath, LearningResource};
use crate::analysis::prompts::{render, LEARNING_PATH_TEMPLATE};
use crate::analysis::response::{check_schema_version, decode};
use crate::llm_client::prompts::{JSON_ONLY_PREAMBLE, RESPONSE_SCHEMA_VERSION};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LearningPathResponse {
    schema_version: u32,
    recommendations: Vec<LearningResource>,
}

pub struct LearningPathTask {
    skills: Vec<String>,
}

impl StructuredTask for LearningPathTask {
    type Output = LearningPath;
    const NAME: &'static str = "learning_path";

    fn prompt(&self) -> String {
        let skills = self
            .skills
            .iter()
            .map(|s| format!("- {s}"))
            .collect::<Vec<_>>()
            .join("\n");

        let schema_version = RESPONSE_SCHEMA_VERSION.to_string();

        render(
            LEARNING_PATH_TEMPLATE,
            &[
                ("preamble", JSON_ONLY_PREAMBLE),
                ("schema_version", schema_version.as_str()),
                ("skills", skills.as_str()),
            ],
        )
    }

    fn parse(&self, response: &str) -> Result<LearningPath, AnalysisError> {
        parse_learning_path(response)
    }
}

fn parse_learning_path(response: &str) -> Result<LearningPath, AnalysisError> {
    let raw: LearningPathResponse = decode(response)?;
    check_schema_version(raw.schema_version)?;

    let resources = raw
        .recommendations
        .into_iter()
        .enumerate()
        .map(|(i, r)| -> Result<LearningResource, AnalysisError> {
            let field = |name: &str, value: String| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(AnalysisError::malformed(format!(
                        "recommendations[{i}].{name} is blank"
                    )))
                } else {
                    Ok(trimmed.to_string())
                }
            };

            Ok(LearningResource {
                skill: field("skill", r.skill)?,
                platform: field("platform", r.platform)?,
                course_name: field("course_name", r.course_name)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LearningPath { resources })
}

/// Splits a comma-separated skill list, dropping blank items.
fn split_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Analyzer {
    /// Suggests learning resources for comma-separated `missing_skills`.
    pub async fn learning_path(&self, missing_skills: &str) -> Result<LearningPath, AnalysisError> {
        let text = self.validate_text("missing_skills", missing_skills)?;
        let skills = split_skills(text);
        if skills.is_empty() {
            return Err(AnalysisError::InvalidInput {
                field: "missing_skills",
                reason: "must name at least one skill".to_string(),
            });
        }

        self.run(&LearningPathTask { skills }).await
    }
}

//! Interview practice ("Ace"): questions tailored to a job description.

use serde::Deserialize;

use crate::analysis::engine::{AnalysisError, Analyzer, StructuredTask};
use crate::analysis::models::{InterviewQuestions, JobDescription};
use crate::analysis::prompts::{render, INTERVIEW_QUESTIONS_TEMPLATE};
use crate::analysis::response::{check_schema_version, clean_entries, decode};
use crate::llm_client::prompts::{JSON_ONLY_PREAMBLE, RESPONSE_SCHEMA_VERSION};

pub const QUESTION_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InterviewResponse {
    schema_version: u32,
    questions: Vec<String>,
}

pub struct InterviewQuestionsTask<'a> {
    jd_text: &'a str,
}

impl StructuredTask for InterviewQuestionsTask<'_> {
    type Output = InterviewQuestions;
    const NAME: &'static str = "interview_questions";

    fn prompt(&self) -> String {
        let schema_version = RESPONSE_SCHEMA_VERSION.to_string();
        let question_count = QUESTION_COUNT.to_string();

        render(
            INTERVIEW_QUESTIONS_TEMPLATE,
            &[
                ("preamble", JSON_ONLY_PREAMBLE),
                ("schema_version", schema_version.as_str()),
                ("question_count", question_count.as_str()),
                ("jd_text", self.jd_text),
            ],
        )
    }

    fn parse(&self, response: &str) -> Result<InterviewQuestions, AnalysisError> {
        let raw: InterviewResponse = decode(response)?;
        check_schema_version(raw.schema_version)?;

        let questions = clean_entries("questions", raw.questions)?;
        if questions.len() != QUESTION_COUNT {
            return Err(AnalysisError::malformed(format!(
                "expected {QUESTION_COUNT} questions, got {}",
                questions.len()
            )));
        }

        Ok(InterviewQuestions { questions })
    }
}

impl Analyzer {
    pub async fn interview_questions(
        &self,
        job_description: &JobDescription,
    ) -> Result<InterviewQuestions, AnalysisError> {
        let task = InterviewQuestionsTask {
            jd_text: self.validate_text("job_description", job_description.raw_text())?,
        };

        self.run(&task).await
    }
}

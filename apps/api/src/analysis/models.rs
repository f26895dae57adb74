//! Inputs and outputs of the analysis operations. Nothing here is persisted;
//! every value lives for the duration of one request.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// How the CV text reached us. Extraction itself happens upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    #[default]
    PlainText,
    PdfExtracted,
}

/// Raw text of a candidate's CV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDocument {
    raw_text: String,
    source_format: SourceFormat,
}

impl ProfileDocument {
    pub fn new(raw_text: impl Into<String>, source_format: SourceFormat) -> Self {
        Self {
            raw_text: raw_text.into(),
            source_format,
        }
    }

    #[cfg(test)]
    pub fn plain_text(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, SourceFormat::PlainText)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }
}

/// Raw text of the target role, as pasted by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription {
    raw_text: String,
}

impl JobDescription {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// Kind of skill a job description asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
}

/// Structured comparison of a CV against a job description.
///
/// `matched_skills` and `missing_skills` never share an entry (compared
/// case-insensitively). `recommendations` keeps the order the model produced.
/// Every key of `skill_categories` is spelled exactly as in one of the two sets;
/// skills the model left uncategorised have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    pub matched_skills: BTreeSet<String>,
    pub missing_skills: BTreeSet<String>,
    pub recommendations: Vec<String>,
    pub skill_categories: BTreeMap<String, SkillCategory>,
}

impl GapReport {
    /// Percentage of required skills found in the CV, 0.0 to 100.0.
    pub fn match_score(&self) -> f64 {
        let total = self.matched_skills.len() + self.missing_skills.len();
        if total == 0 {
            return 0.0;
        }
        self.matched_skills.len() as f64 / total as f64 * 100.0
    }

    pub fn is_strong_candidate(&self) -> bool {
        self.missing_skills.is_empty()
    }

    /// Skills from `skills` that the model filed under `category`.
    pub fn in_category<'a>(
        &'a self,
        skills: &'a BTreeSet<String>,
        category: SkillCategory,
    ) -> impl Iterator<Item = &'a str> + 'a {
        skills
            .iter()
            .filter(move |skill| self.skill_categories.get(*skill) == Some(&category))
            .map(String::as_str)
    }
}

/// One course or resource suggested for a missing skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearningResource {
    pub skill: String,
    pub platform: String,
    pub course_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestions {
    pub questions: Vec<String>,
}

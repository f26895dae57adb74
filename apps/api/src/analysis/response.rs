//! Strict decoding of model responses. Anything that does not match the
//! instructed schema is rejected as malformed instead of being patched up.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::de::DeserializeOwned;

use crate::analysis::engine::AnalysisError;
use crate::analysis::models::SkillCategory;
use crate::llm_client::prompts::RESPONSE_SCHEMA_VERSION;
use crate::llm_client::strip_json_fences;

/// Decodes a (possibly fenced) JSON body into `T`.
pub fn decode<T: DeserializeOwned>(response: &str) -> Result<T, AnalysisError> {
    let body = strip_json_fences(response);
    if body.is_empty() {
        return Err(AnalysisError::malformed("response is empty"));
    }

    serde_json::from_str(body).map_err(|e| {
        AnalysisError::malformed(format!("response does not match the expected schema: {e}"))
    })
}

pub fn check_schema_version(found: u32) -> Result<(), AnalysisError> {
    if found != RESPONSE_SCHEMA_VERSION {
        return Err(AnalysisError::malformed(format!(
            "unsupported schema_version {found} (expected {RESPONSE_SCHEMA_VERSION})"
        )));
    }
    Ok(())
}

/// Trims every entry; a blank entry makes the whole response malformed.
pub fn clean_entries(field: &str, entries: Vec<String>) -> Result<Vec<String>, AnalysisError> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                Err(AnalysisError::malformed(format!("{field}[{i}] is blank")))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

/// Cleans a skill list into a set. Case-insensitive duplicates collapse onto
/// the first spelling the model used.
pub fn skill_set(field: &str, entries: Vec<String>) -> Result<BTreeSet<String>, AnalysisError> {
    let mut seen = HashSet::new();
    let mut skills = BTreeSet::new();

    for skill in clean_entries(field, entries)? {
        if seen.insert(skill.to_lowercase()) {
            skills.insert(skill);
        }
    }

    Ok(skills)
}

/// Fails if any skill appears in both sets (case-insensitive).
pub fn ensure_disjoint(
    matched: &BTreeSet<String>,
    missing: &BTreeSet<String>,
) -> Result<(), AnalysisError> {
    let matched_lower: HashSet<String> = matched.iter().map(|s| s.to_lowercase()).collect();

    match missing
        .iter()
        .find(|s| matched_lower.contains(&s.to_lowercase()))
    {
        Some(skill) => Err(AnalysisError::malformed(format!(
            "skill '{skill}' is listed as both matched and missing"
        ))),
        None => Ok(()),
    }
}

/// Re-keys a skill categorisation onto the spelling used in `matched` or
/// `missing`. A key naming neither, a blank key, or two spellings of one skill
/// filed under different categories make the response malformed.
pub fn categorise(
    categories: BTreeMap<String, SkillCategory>,
    matched: &BTreeSet<String>,
    missing: &BTreeSet<String>,
) -> Result<BTreeMap<String, SkillCategory>, AnalysisError> {
    let canonical: HashMap<String, &String> = matched
        .iter()
        .chain(missing)
        .map(|skill| (skill.to_lowercase(), skill))
        .collect();

    let mut out = BTreeMap::new();
    for (skill, category) in categories {
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::malformed("skill_categories has a blank skill"));
        }

        let Some(&known) = canonical.get(&trimmed.to_lowercase()) else {
            return Err(AnalysisError::malformed(format!(
                "skill_categories names '{trimmed}', which is neither matched nor missing"
            )));
        };

        if let Some(previous) = out.insert(known.clone(), category) {
            if previous != category {
                return Err(AnalysisError::malformed(format!(
                    "skill '{known}' is categorised as both {previous:?} and {category:?}"
                )));
            }
        }
    }

    Ok(out)
}

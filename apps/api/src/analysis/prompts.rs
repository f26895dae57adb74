// All LLM prompt templates for the analysis features.
// Placeholders are `{name}` and are filled by `render`, never by chained `replace`,
// so user text that happens to contain a placeholder is inserted verbatim.

/// Gap analysis ("Benchmark").
/// Placeholders: {preamble}, {schema_version}, {cv_format_note}, {jd_text}, {cv_text}
pub const GAP_ANALYSIS_TEMPLATE: &str = r#"{preamble}

Compare the candidate CV with the job description below.
1. Identify every technical and soft skill the job description requires.
2. Decide, for each required skill, whether the CV demonstrates it.
3. Recommend concrete next steps that close the gaps.

Return a JSON object with this EXACT schema (no extra fields):
{
  "schema_version": {schema_version},
  "matched_skills": ["Python"],
  "missing_skills": ["AWS", "Docker"],
  "recommendations": ["Complete a hands-on AWS Cloud Practitioner course"],
  "skill_categories": {"Python": "technical", "AWS": "technical", "Docker": "technical"}
}

HARD RULES:
1. Only list skills the job description asks for. Use its wording for skill names.
2. A skill appears in matched_skills OR missing_skills, never both.
3. Order recommendations from most to least impactful.
4. recommendations may be an empty list when no skill is missing.
5. skill_categories maps every listed skill to "technical" or "soft", spelled as in the lists.
{cv_format_note}
JOB DESCRIPTION:
{jd_text}

CANDIDATE CV:
{cv_text}"#;

/// Appended when the CV text came out of a PDF extractor.
pub const PDF_EXTRACTED_NOTE: &str = "6. The CV text was extracted from a PDF. \
Ignore layout artifacts such as broken lines, page headers and stray bullets.\n";

/// Learning path ("Elevate").
/// Placeholders: {preamble}, {schema_version}, {skills}
pub const LEARNING_PATH_TEMPLATE: &str = r#"{preamble}

For each of the following missing skills, suggest one specific online course or resource
from platforms such as Coursera, freeCodeCamp or Google Skillshop.

MISSING SKILLS:
{skills}

Return a JSON object with this EXACT schema (no extra fields):
{
  "schema_version": {schema_version},
  "recommendations": [
    {"skill": "SQL", "platform": "Coursera", "course_name": "SQL for Data Science"}
  ]
}"#;

/// Interview practice ("Ace").
/// Placeholders: {preamble}, {schema_version}, {question_count}, {jd_text}
pub const INTERVIEW_QUESTIONS_TEMPLATE: &str = r#"{preamble}

Based on the following job description, generate {question_count} relevant interview questions
for the role. Mix technical and behavioural questions.

Return a JSON object with this EXACT schema (no extra fields):
{
  "schema_version": {schema_version},
  "questions": ["Describe a time you ..."]
}

JOB DESCRIPTION:
{jd_text}"#;

/// Substitutes `{key}` placeholders in a single left-to-right pass.
/// Braces that do not form a known placeholder are copied through unchanged.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];

        let hit = vars
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));

        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

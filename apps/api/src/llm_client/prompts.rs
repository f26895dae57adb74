// Shared prompt fragments.
// Each feature that needs LLM calls defines its own templates in analysis::prompts.
// This file contains cross-cutting prompt fragments.

/// Version of the JSON response schemas every prompt asks for.
/// Bump together with the templates and parsers when a schema changes.
pub const RESPONSE_SCHEMA_VERSION: u32 = 1;

/// Preamble that enforces JSON-only output. Gemini takes a single prompt string,
/// so this is prepended to every template instead of being sent as a system turn.
pub const JSON_ONLY_PREAMBLE: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

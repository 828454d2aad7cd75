// Shared prompt fragments.
// Each feature that calls the gateway keeps its own prompts.rs alongside it;
// only cross-cutting pieces live here.

/// Appended to every prompt whose reply goes through the JSON extractor.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return ONLY a valid JSON object. \
    DO NOT include any text outside the JSON block.";

/// Audience every career prompt is written for.
pub const AUDIENCE: &str = "B.Tech student";

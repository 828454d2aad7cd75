// AI career features: mentor chat, roadmap generation, resume analysis.
// All provider calls go through ai_gateway; structured replies go through extractor.

pub mod handlers;
pub mod mentor;
pub mod prompts;
pub mod resume;
pub mod roadmap;

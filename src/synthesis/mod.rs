//! Card synthesis: sampling, text extraction, redaction and the trial loop.
//!
//! ## Pipeline
//!
//! ```text
//! candidates ─ sample ─▶ selected ─ extract_rules_lines ─▶ pool
//! (cost, pool, selected) ─ synthesize (redacting per line) ─▶ GeneratedCard
//! ```
//!
//! None of these steps can fail; empty input gives empty output.

pub mod extract;
pub mod redact;
pub mod sampler;
pub mod synthesizer;

pub use extract::{extract_creature_types, extract_rules_lines};
pub use redact::{redact_names, Redactor, SELF_REFERENCE};
pub use sampler::{sample, shuffle};
pub use synthesizer::{generate_card, synthesize, LINE_CHANCE, PENALTY_CHANCE, POWER_SHARE};

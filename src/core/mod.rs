//! Core building blocks: random sources and configuration.
//!
//! Everything randomized in the pipeline takes a `RandomSource`, so tests
//! and reproductions can substitute their own draws.

pub mod config;
pub mod rng;

pub use config::{ForgeConfig, DEFAULT_CANDIDATE_CAP, DEFAULT_CATALOG_URL};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};

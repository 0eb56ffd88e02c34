//! # Autonomous-Vehicle Ethics Survey & Forum
//!
//! This crate holds the domain of the survey and forum service: the SQLite
//! store and its append-only operations, the questionnaire catalogue, comment
//! threading, and the generation of ethical guidelines through an external
//! text-generation provider.

pub mod constants;
pub mod errors;
pub mod export;
pub mod prompts;
pub mod providers;
pub mod questionnaire;
pub mod regulation;
pub mod thread;
pub mod types;

pub use errors::EthicsError;
pub use providers::{
    ai::{
        gemini::{GeminiProvider, GenerationParams},
        AiProvider,
    },
    db::sqlite::SqliteProvider,
};
pub use regulation::RegulationGenerator;

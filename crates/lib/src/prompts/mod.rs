//! # Prompt Templates
//!
//! Prompt templates sent to the text-generation service.

pub mod regulation;

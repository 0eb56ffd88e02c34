pub mod gemini;

use crate::errors::EthicsError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with an external text-generation service.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends a single prompt and returns the generated text.
    ///
    /// Implementations make exactly one attempt; failures are returned, never retried.
    async fn generate(&self, prompt: &str) -> Result<String, EthicsError>;
}

dyn_clone::clone_trait_object!(AiProvider);

//! Scripted registry backend for tests
//!
//! Answers lookups from a fixed table and records every handle queried, so
//! tests can assert which lookups were (and were not) issued.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{HandleForgeError, Result};
use crate::registry::{RegistryAnswer, RegistryLookup};

/// Registry double with per-handle scripted answers
pub struct ScriptedRegistry {
    answers: Mutex<HashMap<String, std::result::Result<RegistryAnswer, HandleForgeError>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fallback: RegistryAnswer,
}

impl ScriptedRegistry {
    /// Create a registry that answers `NotFound` unless scripted otherwise
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fallback: RegistryAnswer::NotFound,
        }
    }

    /// Script an answer for a handle
    pub fn with_answer(self, handle: &str, answer: RegistryAnswer) -> Self {
        self.answers.lock().insert(handle.to_string(), Ok(answer));
        self
    }

    /// Script a transport-level failure for a handle
    pub fn with_failure(self, handle: &str, error: HandleForgeError) -> Self {
        self.answers.lock().insert(handle.to_string(), Err(error));
        self
    }

    /// Change the answer given to unscripted handles
    pub fn with_fallback(mut self, answer: RegistryAnswer) -> Self {
        self.fallback = answer;
        self
    }

    /// Handles looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Shared view of the call log, usable after the registry is moved
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl Default for ScriptedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryLookup for ScriptedRegistry {
    async fn lookup(&self, handle: &str) -> Result<RegistryAnswer> {
        self.calls.lock().push(handle.to_string());
        match self.answers.lock().get(handle) {
            Some(Ok(answer)) => Ok(*answer),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(self.fallback),
        }
    }
}

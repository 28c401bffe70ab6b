//! Execution collaborator
//!
//! The wallet only decides *whether* an action may run. Carrying it out is
//! delegated to an [`Executor`], invoked once per approved transaction.

use crate::crypto::Address;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Result reported by an executor. The wallet records it but never acts on it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success,
    Failure(String),
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }
}

/// Carries out an approved action against its destination
pub trait Executor: Send + Sync {
    fn invoke(&self, destination: &Address, value: u128, payload: &[u8]) -> ExecutionOutcome;
}

/// Executor that only logs each dispatch
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingExecutor;

impl Executor for LoggingExecutor {
    fn invoke(&self, destination: &Address, value: u128, payload: &[u8]) -> ExecutionOutcome {
        log::info!(
            "Dispatching action to {} (value {}, {} payload bytes)",
            destination,
            value,
            payload.len()
        );
        ExecutionOutcome::Success
    }
}

/// A dispatch captured by [`RecordingExecutor`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub destination: Address,
    pub value: u128,
    pub payload: Vec<u8>,
}

/// Executor that records every dispatch and replies with a fixed outcome
#[derive(Debug)]
pub struct RecordingExecutor {
    outcome: ExecutionOutcome,
    invocations: Mutex<Vec<Invocation>>,
}

impl RecordingExecutor {
    /// Recorder that reports success
    pub fn new() -> Self {
        Self::with_outcome(ExecutionOutcome::Success)
    }

    pub fn with_outcome(outcome: ExecutionOutcome) -> Self {
        Self {
            outcome,
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Dispatches seen so far, oldest first
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for RecordingExecutor {
    fn invoke(&self, destination: &Address, value: u128, payload: &[u8]) -> ExecutionOutcome {
        self.invocations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Invocation {
                destination: *destination,
                value,
                payload: payload.to_vec(),
            });
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_executor() {
        let executor = RecordingExecutor::new();
        let dest = Address::new([7u8; 20]);

        assert!(executor.invoke(&dest, 5, b"call").is_success());
        assert_eq!(
            executor.invocations(),
            vec![Invocation {
                destination: dest,
                value: 5,
                payload: b"call".to_vec(),
            }]
        );
    }

    #[test]
    fn test_recording_executor_failure_outcome() {
        let executor = RecordingExecutor::with_outcome(ExecutionOutcome::Failure("reverted".into()));
        let outcome = executor.invoke(&Address::ZERO, 0, &[]);

        assert_eq!(outcome, ExecutionOutcome::Failure("reverted".to_string()));
        assert_eq!(executor.invocation_count(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&ExecutionOutcome::Failure("out of funds".into())).unwrap();
        assert_eq!(json, r#"{"status":"failure","reason":"out of funds"}"#);

        let json = serde_json::to_string(&ExecutionOutcome::Success).unwrap();
        assert_eq!(json, r#"{"status":"success"}"#);
    }
}

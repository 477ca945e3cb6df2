//! Input-keyed memoization for progress outputs.

use crate::models::{ProgressInput, ProgressOutput, ProgressPolicy};

/// Caches the most recent progress computation for one category row.
///
/// The output is recomputed only when the input or the policy changes.
#[derive(Debug, Clone, Default)]
pub struct ProgressMemo {
    policy: ProgressPolicy,
    last: Option<(ProgressInput, ProgressOutput)>,
    recomputed: bool,
}

impl ProgressMemo {
    /// Creates an empty memo for the given policy.
    pub fn new(policy: ProgressPolicy) -> Self {
        Self {
            policy,
            last: None,
            recomputed: false,
        }
    }

    /// Returns the policy outputs are computed with.
    pub fn policy(&self) -> ProgressPolicy {
        self.policy
    }

    /// Switches policy, invalidating the cache if it changed.
    pub fn set_policy(&mut self, policy: ProgressPolicy) {
        if self.policy != policy {
            self.policy = policy;
            self.last = None;
        }
    }

    /// Returns the output for `input`, computing it only if needed.
    pub fn get(&mut self, input: &ProgressInput) -> ProgressOutput {
        if let Some((cached_input, cached_output)) = &self.last {
            if cached_input == input {
                self.recomputed = false;
                return *cached_output;
            }
        }

        let output = self.policy.compute(input);
        self.last = Some((*input, output));
        self.recomputed = true;
        output
    }

    /// Returns true if the last [`get`](Self::get) had to recompute.
    pub fn last_recomputed(&self) -> bool {
        self.recomputed
    }
}

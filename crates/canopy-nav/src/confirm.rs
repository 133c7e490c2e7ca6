//! The confirmation side-channel.
//!
//! Every mutation asks for confirmation per affected node before it
//! executes. The decision point is injected into the engine as a trait
//! object, so hosts can route it to an interactive prompt, a what-if dry
//! run, or a test stub. Confirmation is synchronous: the operation blocks
//! until the callback answers, and a decline skips exactly that node.

/// Decides whether one mutation against one target may proceed.
pub trait ShouldProcess {
    /// `true` to let the mutation of `target` proceed, `false` to skip it.
    ///
    /// `action` is the operation name (e.g. `"remove-item"`), `target` the
    /// node or path being mutated.
    fn should_process(&mut self, action: &str, target: &str) -> bool;
}

/// Confirms every mutation. The default for non-interactive hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl ShouldProcess for AcceptAll {
    fn should_process(&mut self, _action: &str, _target: &str) -> bool {
        true
    }
}

/// Declines every mutation. Useful as a "what-if" dry-run decider: the
/// whole pipeline runs, but no node is touched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAll;

impl ShouldProcess for DenyAll {
    fn should_process(&mut self, _action: &str, _target: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_all_accepts() {
        assert!(AcceptAll.should_process("remove-item", "x"));
    }

    #[test]
    fn deny_all_declines() {
        assert!(!DenyAll.should_process("remove-item", "x"));
    }
}

//! Confirmation gate — no file is mutated without an explicit affirmative.
//!
//! A small state machine holding at most one pending `FixSet`. Recognized
//! tokens are exact (trimmed, case-insensitive) matches: "yes" and "apply"
//! confirm, "no" rejects. Any other message passes through to normal chat
//! routing while the pending set persists.

use crate::fixes::FixSet;

/// What the gate decided about an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The user confirmed — apply this set. State is already cleared.
    Apply(FixSet),
    /// The user rejected — nothing is mutated. State is already cleared.
    Reject,
    /// Not a gate token (or nothing pending): route the message normally.
    PassThrough,
}

/// Holds at most one pending fix proposal awaiting yes/no.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<FixSet>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Store a non-empty proposal and render the confirmation request shown
    /// to the user.
    pub fn offer(&mut self, fixes: FixSet) -> String {
        let mut lines = vec![format!(
            "I found issues in {} file(s) and prepared fixes:",
            fixes.len()
        )];
        for fix in &fixes.files {
            let digest = fix.issue_digest();
            if digest.is_empty() {
                lines.push(format!("- {}", fix.path));
            } else {
                lines.push(format!("- {}: {}", fix.path, digest));
            }
        }
        lines.push(
            "Reply \"yes\" or \"apply\" to apply the fixes, or \"no\" to discard them."
                .to_string(),
        );
        self.pending = Some(fixes);
        lines.join("\n")
    }

    /// Resolve an incoming message against the pending state.
    ///
    /// Confirm and reject both clear the state before returning; a second
    /// "no" after the state is cleared is an ordinary pass-through turn.
    pub fn decide(&mut self, text: &str) -> GateDecision {
        let token = text.trim().to_lowercase();
        let confirms = token == "yes" || token == "apply";
        let rejects = token == "no";
        if !confirms && !rejects {
            return GateDecision::PassThrough;
        }
        match self.pending.take() {
            Some(fixes) if confirms => GateDecision::Apply(fixes),
            Some(_) => GateDecision::Reject,
            None => GateDecision::PassThrough,
        }
    }

    /// Drop the pending set (a new review request supersedes it, or the
    /// session is torn down). Returns what was pending, if anything.
    pub fn supersede(&mut self) -> Option<FixSet> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

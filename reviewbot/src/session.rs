//! Per-session orchestration — one context object per open chat surface.
//!
//! The session owns the conversation history and the confirmation gate,
//! serializes message handling through a mutex (one message runs to
//! completion before the next starts), and routes each message with a fixed
//! precedence: review classification first, then gate tokens, then general
//! chat. Every error becomes a single descriptive reply turn; the session
//! stays open and usable after all of them.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::applier;
use crate::config::SessionConfig;
use crate::error::ReviewError;
use crate::fixes::FixSet;
use crate::gate::{ConfirmationGate, GateDecision};
use crate::gateway::{ModelGateway, SYSTEM_INSTRUCTION};
use crate::history::{ConversationHistory, Turn};
use crate::intent::{classify, Intent};
use crate::parser;
use crate::prompt;
use crate::snapshot;

/// Reply when the model produced no usable text.
pub const FALLBACK_REPLY: &str = "I couldn't produce a response for that. Please try again.";

const CANCELLED_REPLY: &str = "Request cancelled.";
const NO_FILES_REPLY: &str = "No supported code files found in the workspace.";
const NO_ISSUES_REPLY: &str = "No issues found. The code looks good.";
const REJECTED_REPLY: &str = "Okay, the proposed fixes were not applied.";
const SUPERSEDED_NOTICE: &str = "Note: the previously pending fixes were discarded.";

struct SessionState {
    history: ConversationHistory,
    gate: ConfirmationGate,
}

/// A single chat session bound to at most one project root.
pub struct Session {
    config: SessionConfig,
    gateway: Arc<dyn ModelGateway>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(config: SessionConfig, gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            config,
            gateway,
            state: Mutex::new(SessionState {
                history: ConversationHistory::new(),
                gate: ConfirmationGate::new(),
            }),
        }
    }

    /// Handle one user message and produce the reply turn.
    pub async fn handle(&self, text: &str) -> String {
        self.handle_with_cancel(text, CancellationToken::new())
            .await
    }

    /// Like [`Session::handle`], observing `cancel` during the model call.
    ///
    /// The state lock serializes messages: a second message cannot start a
    /// network round trip or touch history/pending state until the first
    /// has completed.
    pub async fn handle_with_cancel(&self, text: &str, cancel: CancellationToken) -> String {
        let mut state = self.state.lock().await;

        if self.config.api_key.is_none() {
            return ReviewError::Configuration.to_string();
        }

        match classify(text) {
            Intent::Review => self.run_review(&mut state, cancel).await,
            Intent::Chat => match state.gate.decide(text) {
                GateDecision::Apply(fixes) => self.apply_fixes(&fixes),
                GateDecision::Reject => REJECTED_REPLY.to_string(),
                GateDecision::PassThrough => self.run_chat(&mut state, text, cancel).await,
            },
        }
    }

    /// Tear the session down: history and pending state are cleared.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.history.clear();
        state.gate.clear();
        info!("session closed");
    }

    /// Review branch: snapshot → prompt → model → parse → gate offer.
    ///
    /// A new review request supersedes any outstanding pending fixes; the
    /// reply says so.
    async fn run_review(&self, state: &mut SessionState, cancel: CancellationToken) -> String {
        let Some(root) = self.config.root.clone() else {
            return ReviewError::NoWorkspace.to_string();
        };

        let superseded = state.gate.supersede().is_some();
        if superseded {
            info!("pending fixes superseded by new review request");
        }

        let body = self.review_body(state, &root, cancel).await;
        if superseded {
            format!("{SUPERSEDED_NOTICE}\n\n{body}")
        } else {
            body
        }
    }

    async fn review_body(
        &self,
        state: &mut SessionState,
        root: &std::path::Path,
        cancel: CancellationToken,
    ) -> String {
        let files = match snapshot::collect(root) {
            Ok(files) => files,
            Err(e) => return e.to_string(),
        };
        if files.is_empty() {
            return NO_FILES_REPLY.to_string();
        }
        info!(files = files.len(), "reviewing workspace snapshot");

        let review_turn = [Turn::user(prompt::build(&files))];
        let raw = tokio::select! {
            _ = cancel.cancelled() => return CANCELLED_REPLY.to_string(),
            result = self.gateway.generate(SYSTEM_INSTRUCTION, &review_turn) => {
                match result {
                    Ok(raw) => raw,
                    Err(e) => return e.to_string(),
                }
            }
        };

        match parser::parse(&raw) {
            Ok(fixes) if fixes.is_empty() => NO_ISSUES_REPLY.to_string(),
            Ok(fixes) => state.gate.offer(fixes),
            Err(e @ (ReviewError::NoJsonFound | ReviewError::MalformedJson(_))) => {
                // Recovered locally: show the model's own words instead of
                // failing the turn.
                warn!(error = %e, "model response was not parseable; surfacing raw text");
                raw
            }
            Err(e) => e.to_string(),
        }
    }

    /// Chat branch: bounded history + new message → model → history append.
    ///
    /// A failing turn is never appended, so an upstream error cannot corrupt
    /// the history.
    async fn run_chat(
        &self,
        state: &mut SessionState,
        text: &str,
        cancel: CancellationToken,
    ) -> String {
        let mut contents: Vec<Turn> = state.history.turns().to_vec();
        contents.push(Turn::user(text));

        let raw = tokio::select! {
            _ = cancel.cancelled() => return CANCELLED_REPLY.to_string(),
            result = self.gateway.generate(SYSTEM_INSTRUCTION, &contents) => {
                match result {
                    Ok(raw) => raw,
                    Err(e) => return e.to_string(),
                }
            }
        };

        let reply = if raw.trim().is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            raw
        };
        state.history.push_exchange(text, &reply);
        reply
    }

    /// Confirmed application. The gate already cleared the pending state,
    /// so a failure here cannot leave the session stuck.
    fn apply_fixes(&self, fixes: &FixSet) -> String {
        let Some(root) = self.config.root.as_deref() else {
            return ReviewError::NoWorkspace.to_string();
        };

        match applier::apply(fixes, root) {
            Ok(summary) => format!("Applied fixes:\n{}", summary.render()),
            Err(ReviewError::ApplyFailed {
                reason,
                committed,
                rolled_back,
            }) => {
                let mut message = format!("Could not apply the fixes: {reason}.");
                if committed.is_empty() {
                    message.push_str(" No files were changed.");
                } else {
                    message.push_str(&format!(" Committed: {}.", committed.join(", ")));
                }
                if !rolled_back.is_empty() {
                    message.push_str(&format!(" Rolled back: {}.", rolled_back.join(", ")));
                }
                message
            }
            Err(e) => format!("Could not apply the fixes: {e}"),
        }
    }

    #[cfg(test)]
    pub(crate) async fn history_len(&self) -> usize {
        self.state.lock().await.history.len()
    }

    #[cfg(test)]
    pub(crate) async fn has_pending_fixes(&self) -> bool {
        self.state.lock().await.gate.is_pending()
    }
}

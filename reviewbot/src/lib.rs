//! Conversational code-review orchestrator.
//!
//! Turns free-text chat messages into either plain conversational replies or
//! a two-phase review workflow: snapshot the workspace, ask the model for a
//! strict-JSON fix proposal, hold it behind a confirmation gate, and apply
//! it only after an explicit "yes".
//!
//! Component dependency order (leaves first):
//! - [`history`] — bounded log of prior turns
//! - [`intent`] — review-request vs. chat classification
//! - [`snapshot`] — capped, deterministic workspace collection
//! - [`prompt`] — strict-JSON review prompt rendering
//! - [`gateway`] — async capability boundary to the generation service
//! - [`parser`] — JSON fix-proposal extraction and schema validation
//! - [`gate`] — yes/no confirmation state machine
//! - [`applier`] — staged validate/stage/commit application
//! - [`session`] — per-surface context object and orchestrating loop

pub mod applier;
pub mod config;
pub mod error;
pub mod fixes;
pub mod gate;
pub mod gateway;
pub mod history;
pub mod intent;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod snapshot;
pub mod transport;

pub use config::SessionConfig;
pub use error::ReviewError;
pub use fixes::{FixSet, ProposedFix};
pub use gateway::{GeminiGateway, ModelGateway};
pub use session::Session;
pub use transport::Envelope;

//! The session between a host document and the UI panel.
//!
//! Inbound UI messages and host selection events are handled one at a time
//! by a [`Session`]; a [`SessionDriver`] feeds it from a channel and
//! supersedes an in-flight analysis as soon as a newer request arrives.

pub mod driver;
pub mod protocol;
pub mod selection;
pub mod session;
pub mod state;

pub use driver::{AnalysisGate, SessionChannels, SessionDriver};
pub use protocol::{decode_inbound, encode_outbound, InboundMessage, OutboundMessage};
pub use session::{Session, SessionEvent};
pub use state::{Phase, Tab, ViewState};

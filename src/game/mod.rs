//! Guessing rounds
//!
//! - `params`: typed per-session parameters
//! - `source`: secret sampling from channel history
//! - `session`: the synchronous round state machine
//! - `actor`: one serialized task per session
//! - `manager`: community to session routing

pub mod actor;
pub mod manager;
pub mod params;
pub mod session;
pub mod source;

pub use actor::{SessionActor, SessionClosed, SessionHandle};
pub use manager::SessionManager;
pub use params::{ParamError, ParamKind, ParamName, ParamValue, Parameters};
pub use session::{Phase, Reply, Round, Session};
pub use source::{Candidate, WordSource};

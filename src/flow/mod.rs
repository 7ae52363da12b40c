//! Request-path animation driver.
//!
//! A flow run walks [`Step::ALL`] in order, pausing after each step, and
//! awaits one unit of work once the midpoint step has been entered.

mod sequencer;
mod state;
mod step;

pub use sequencer::{FlowError, FlowPacing, FlowSequencer};
pub use state::{FlowFailure, FlowState};
pub use step::Step;

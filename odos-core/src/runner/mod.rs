//! Live mission execution
//!
//! - `state`: run state machine
//! - `session`: pose, queue and cancellation of one run
//! - `live`: scheduler-driven runner

pub mod live;
pub mod session;
pub mod state;

pub use live::{LiveRunner, RunError};
pub use session::{ActiveMotion, FrameStep, RunnerSession};
pub use state::{RunEvent, RunState};

mod controller;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{
    EVALUATION_FAILED_MESSAGE, LOAD_FAILED_MESSAGE, SessionController, SubmitOutcome,
};
pub use view::SessionSnapshot;

use exercise_core::model::Session;

/// Read-only copy of the controller state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Session,
    /// True while a load or evaluation request for the current session is pending.
    pub is_loading: bool,
}

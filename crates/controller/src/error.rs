use thiserror::Error;

/// Errors surfaced by the session driver
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The runtime task has stopped; no more input can be delivered
    #[error("game session has shut down")]
    SessionClosed,

    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: String, value: String },
}

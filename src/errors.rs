//! Client-side error taxonomy.
//!
//! Expected absences (a point lookup that finds nothing) are `Option`,
//! never an error. Errors here are either caller bugs (`InvalidInput`),
//! decode failures, transport failures, or typed rejections surfaced
//! by the on-chain program. On-chain message text is carried verbatim.

use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to decode account: {0}")]
    Decode(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// Mutation rejected without a recognized program error code.
    #[error("submission failed: {message}")]
    Submission { code: Option<u32>, message: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    GoalNotMet(String),

    #[error("{0}")]
    GoalWasMet(String),

    #[error("{0}")]
    InsufficientFunds(String),

    #[error("{0}")]
    MaxMilestones(String),

    #[error("{0}")]
    TargetNotReached(String),

    #[error("{0}")]
    RefundAlreadyClaimed(String),
}

/// Messages declared by the program for custom error codes 6000..=6023.
pub fn program_error_message(code: u32) -> Option<&'static str> {
    let msg = match code {
        6000 => "You are not authorized to perform this action",
        6001 => "Campaign is not active",
        6002 => "Campaign is still active",
        6003 => "Campaign has ended",
        6004 => "Campaign has not ended yet",
        6005 => "Funding goal was already met",
        6006 => "Funding goal was not met",
        6007 => "Withdrawal is not allowed at this time",
        6008 => "Refund has already been claimed",
        6009 => "No contribution found to refund",
        6010 => "Milestone has already been completed",
        6011 => "Milestone target amount has not been reached",
        6012 => "Maximum number of milestones (10) reached",
        6013 => "Title exceeds maximum length of 80 characters",
        6014 => "Description exceeds maximum length of 200 characters",
        6015 => "URL exceeds maximum length of 200 characters",
        6016 => "Milestone title exceeds maximum length of 100 characters",
        6017 => "Funding goal must be greater than zero",
        6018 => "Contribution amount must be greater than zero",
        6019 => "Campaign duration must be between 1 and 90 days",
        6020 => "Arithmetic overflow occurred",
        6021 => "Insufficient funds in campaign account",
        6022 => "Invalid token mint address",
        6023 => "Invalid token account",
        _ => return None,
    };
    Some(msg)
}

/// Maps a failed submission to its typed variant where one exists.
///
/// Codes without a dedicated variant stay `Submission` so the caller
/// still sees the program's own message.
pub fn map_submission_error(code: Option<u32>, message: String) -> ClientError {
    let text = code
        .and_then(program_error_message)
        .map(str::to_owned)
        .unwrap_or_else(|| message.clone());

    match code {
        Some(6000) => ClientError::Unauthorized(text),
        Some(6005) => ClientError::GoalWasMet(text),
        Some(6006) => ClientError::GoalNotMet(text),
        Some(6008) => ClientError::RefundAlreadyClaimed(text),
        Some(6011) => ClientError::TargetNotReached(text),
        Some(6012) => ClientError::MaxMilestones(text),
        Some(6021) => ClientError::InsufficientFunds(text),
        _ => ClientError::Submission { code, message: text },
    }
}

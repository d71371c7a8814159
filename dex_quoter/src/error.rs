use error_stack::{AttachmentKind, FrameKind, Report};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type QuoterResult<T> = error_stack::Result<T, Error>;

#[derive(Error, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Error {
    #[error("Token mismatch: {0}")]
    TokenMismatch(String),

    #[error("No quote candidates returned by router")]
    NoCandidates,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Arithmetic underflow")]
    ArithmeticUnderflow,

    #[error("Invalid slippage: {0}")]
    InvalidSlippage(String),

    #[error("Invalid max hops: {0}")]
    InvalidMaxHops(String),

    #[error("Invalid secondary fee: {0}")]
    InvalidSecondaryFee(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Router error")]
    RouterError,

    #[error("Models error")]
    ModelsError,
}

impl Error {
    /// Maps a models-crate failure onto the engine taxonomy so callers can match
    /// on overflow and token mismatches without digging through the report
    pub fn from_models(error: &dex_models::error::Error) -> Self {
        use dex_models::error::Error as ModelsError;
        match error {
            ModelsError::TokenMismatch(msg) => Error::TokenMismatch(msg.clone()),
            ModelsError::ArithmeticOverflow | ModelsError::DivisionByZero => {
                Error::ArithmeticOverflow
            }
            ModelsError::ArithmeticUnderflow => Error::ArithmeticUnderflow,
            ModelsError::InvalidFee(msg) => Error::InvalidSecondaryFee(msg.clone()),
            ModelsError::InvalidAddress(msg) => Error::InvalidToken(msg.clone()),
            _ => Error::ModelsError,
        }
    }
}

/// Lifts a `dex_models` result into the engine's error type, keeping the
/// original report as the source frame
pub trait ModelsResultExt<T> {
    fn into_quoter(self) -> QuoterResult<T>;
}

impl<T> ModelsResultExt<T> for dex_models::error::ModelsResult<T> {
    fn into_quoter(self) -> QuoterResult<T> {
        self.map_err(|report| {
            let context = Error::from_models(report.current_context());
            report.change_context(context)
        })
    }
}

pub trait ReportDisplayExt {
    fn format(&self) -> String;
}

impl ReportDisplayExt for Report<Error> {
    fn format(&self) -> String {
        let mut output = String::new();

        let frames = self.current_frames();

        for frame in frames.iter() {
            if let FrameKind::Attachment(AttachmentKind::Printable(attachment)) = frame.kind() {
                output.push_str(&format!(" {attachment} "));
            }
        }

        output.trim().to_string()
    }
}

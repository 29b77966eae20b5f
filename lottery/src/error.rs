use thiserror::Error;

use crate::Amount;

/// Expected failures of lottery operations.
///
/// Internal-consistency violations (a ticket number handed out twice, the ball
/// sampler running dry mid-draw) are not represented here: they panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotteryError {
    #[error("The buyer's name is expected to be a non-empty string.")]
    InvalidBuyerName,
    #[error("There is no more available ticket for the current draw.")]
    SoldOut,
    #[error("The lottery round has already been drawn.")]
    AlreadyClosed,
    #[error("The lottery round has not been drawn yet.")]
    NotDrawn,
    #[error("There is not any previous draw.")]
    NoPreviousDraw,
    #[error("The pot cannot grow beyond {max}$.", max = Amount::MAX)]
    PotOverflow,
}

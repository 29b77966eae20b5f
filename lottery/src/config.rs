use serde::{Deserialize, Serialize};

use crate::{Amount, INITIAL_POT, TICKET_PRICE};

/// Immutable parameters shared by every round of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    /// Pot of the first round.
    pub initial_pot: Amount,
    pub ticket_price: Amount,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            initial_pot: INITIAL_POT,
            ticket_price: TICKET_PRICE,
        }
    }
}

impl LotteryConfig {
    pub fn with_initial_pot(self, initial_pot: Amount) -> Self {
        Self {
            initial_pot,
            ..self
        }
    }
}

pub mod config;
pub mod error;
pub mod log;
pub mod round;
pub mod sampler;
pub mod series;

pub use config::LotteryConfig;
pub use error::LotteryError;
pub use round::{Round, Winner};
pub use sampler::{Exhausted, Sampler};
pub use series::Series;

/// A ticket or ball number, always in `1..=MAX_NUMBER`.
pub type Number = u32;

/// Currency amount, in ticket currency units.
pub type Amount = u64;

/// Largest ticket and ball number (the smallest is 1).
pub const MAX_NUMBER: usize = 50;

/// Number of balls drawn, and therefore of prizes, per round.
pub const NB_WINNERS: usize = 3;

pub const TICKET_PRICE: Amount = 10;

pub const INITIAL_POT: Amount = 200;

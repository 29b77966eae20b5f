use rand::{RngCore, SeedableRng};
use serde::Serialize;

use crate::{
    round::{DrawResult, Round, Winner},
    Amount, LotteryConfig, LotteryError, Number, NB_WINNERS,
};

/// Successive rounds of the lottery, each one starting with the pot the
/// previous one closed with.
pub struct Series<R> {
    config: LotteryConfig,
    current: Round<R>,
    previous: Option<Round<R>>,
    // 1-based number of the current round
    round_number: usize,
    rng: R,
}

impl<R> Series<R>
where
    R: RngCore + SeedableRng,
{
    pub fn new(config: LotteryConfig, mut rng: R) -> Self {
        let current = Round::new(
            &config,
            config.initial_pot,
            R::seed_from_u64(rng.next_u64()),
        );
        Self {
            config,
            current,
            previous: None,
            round_number: 1,
            rng,
        }
    }

    pub fn purchase_ticket(&mut self, buyer_name: &str) -> Result<Number, LotteryError> {
        self.current.purchase_ticket(buyer_name)
    }

    /// Draws the current round and opens the next one with the remaining pot.
    pub fn draw(&mut self) -> [Number; NB_WINNERS] {
        let balls = self
            .current
            .draw()
            .expect("the current round of a series is never closed");

        let next = Round::new(
            &self.config,
            self.current.get_pot(),
            R::seed_from_u64(self.rng.next_u64()),
        );
        let closed = std::mem::replace(&mut self.current, next);
        if let Some(result) = closed.draw_result() {
            crate::log!(
                "Draw",
                DrawLog {
                    round: self.round_number,
                    tickets_sold: closed.ticket_count(),
                    result,
                    pot: closed.get_pot(),
                }
            );
        }
        self.previous = Some(closed);
        self.round_number += 1;

        balls
    }

    pub fn generate_winners_message(&self) -> Result<String, LotteryError> {
        self.previous
            .as_ref()
            .ok_or(LotteryError::NoPreviousDraw)?
            .generate_winners_message()
    }

    /// Winners of the last drawn round.
    pub fn get_winners(&self) -> Result<&[Option<Winner>; NB_WINNERS], LotteryError> {
        self.previous
            .as_ref()
            .ok_or(LotteryError::NoPreviousDraw)?
            .get_winners()
    }

    pub fn get_pot(&self) -> Amount {
        self.current.get_pot()
    }

    pub fn is_ticket_available(&self) -> bool {
        self.current.is_ticket_available()
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn current_round(&self) -> &Round<R> {
        &self.current
    }

    pub fn previous_round(&self) -> Option<&Round<R>> {
        self.previous.as_ref()
    }

    pub fn round_number(&self) -> usize {
        self.round_number
    }
}

#[derive(Serialize)]
struct DrawLog<'a> {
    round: usize,
    tickets_sold: usize,
    #[serde(flatten)]
    result: &'a DrawResult,
    pot: Amount,
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{INITIAL_POT, MAX_NUMBER, TICKET_PRICE};

    const TEST_BUYER_NAME: &str = "TEST_BUYER_NAME";

    fn new_series(seed: u64) -> Series<ChaCha8Rng> {
        Series::new(LotteryConfig::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn test_purchase_ticket() {
        let mut series = new_series(0);
        assert_eq!(series.get_pot(), INITIAL_POT);
        let ticket = series.purchase_ticket(TEST_BUYER_NAME).unwrap();
        assert!((1..=MAX_NUMBER as Number).contains(&ticket));
        assert_eq!(series.get_pot(), INITIAL_POT + TICKET_PRICE);
    }

    #[test]
    fn test_initial_pot_override() {
        let config = LotteryConfig::default().with_initial_pot(1013);
        let series = Series::new(config, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(series.get_pot(), 1013);
        assert_eq!(series.current_round().compute_prizes(), [379, 75, 50]);
    }

    #[test]
    fn test_draw_rotates_rounds() {
        let mut series = new_series(0);
        assert!(series.previous_round().is_none());
        assert_eq!(series.round_number(), 1);

        series.purchase_ticket(TEST_BUYER_NAME).unwrap();
        let balls = series.draw();

        let previous = series.previous_round().unwrap();
        assert!(previous.is_closed());
        assert_eq!(previous.draw_result().unwrap().balls, balls);
        assert!(!series.current_round().is_closed());
        assert_eq!(series.current_round().ticket_count(), 0);
        assert_eq!(series.get_pot(), previous.get_pot());
        assert_eq!(series.round_number(), 2);
    }

    #[test]
    fn test_tickets_are_available_again_after_draw() {
        let mut series = new_series(4);
        let balls = series.draw();

        let mut tickets = Vec::new();
        while series.is_ticket_available() {
            tickets.push(series.purchase_ticket(TEST_BUYER_NAME).unwrap());
        }
        assert_eq!(tickets.len(), MAX_NUMBER);
        assert!(balls.iter().all(|ball| tickets.contains(ball)));
        assert_eq!(
            series.purchase_ticket(TEST_BUYER_NAME),
            Err(LotteryError::SoldOut)
        );
    }

    #[test]
    fn test_generate_winners_message() {
        let mut series = new_series(0);
        assert_eq!(
            series.generate_winners_message(),
            Err(LotteryError::NoPreviousDraw)
        );
        assert_eq!(series.get_winners(), Err(LotteryError::NoPreviousDraw));

        series.draw();
        let message = series.generate_winners_message().unwrap();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert_eq!(line.split('\t').count(), NB_WINNERS);
        }
        assert_eq!(series.get_winners().unwrap(), &[None, None, None]);
    }

    #[test]
    fn test_pot_is_carried_over() {
        let mut series = new_series(17);
        let mut pot = series.get_pot();
        let num_rounds = 10;
        let num_participants = 20;

        for _ in 0..num_rounds {
            for _ in 0..num_participants {
                series.purchase_ticket(TEST_BUYER_NAME).unwrap();
                pot += TICKET_PRICE;
            }
            series.draw();
            for winner in series.get_winners().unwrap().iter().flatten() {
                pot -= winner.prize();
            }
            assert_eq!(series.get_pot(), pot);
        }
        assert_eq!(series.round_number(), num_rounds + 1);
    }

    #[test]
    fn test_same_seed_same_series() {
        let play = |seed| {
            let mut series = new_series(seed);
            (0..5)
                .map(|_| {
                    for _ in 0..10 {
                        series.purchase_ticket(TEST_BUYER_NAME).unwrap();
                    }
                    (series.draw(), series.get_pot())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(play(8), play(8));
    }
}

use std::collections::hash_map::Entry;

use rand::{RngCore, SeedableRng};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    sampler::Sampler, Amount, LotteryConfig, LotteryError, Number, MAX_NUMBER, NB_WINNERS,
};

const _: () = assert!(MAX_NUMBER >= NB_WINNERS);

/// A buyer whose ticket matched a drawn ball.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Winner {
    name: String,
    prize: Amount,
}

impl Winner {
    pub fn new(name: impl Into<String>, prize: Amount) -> Self {
        Self {
            name: name.into(),
            prize,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prize(&self) -> Amount {
        self.prize
    }
}

/// Everything a draw decided. Present only once the round is closed.
#[derive(Debug, Clone, Serialize)]
pub struct DrawResult {
    pub balls: [Number; NB_WINNERS],
    /// Prizes computed from the pot before any deduction.
    pub prizes: [Amount; NB_WINNERS],
    /// `None` when nobody bought the ticket matching the ball.
    pub winners: [Option<Winner>; NB_WINNERS],
}

/// A single lottery, open for purchases until it is drawn.
pub struct Round<R> {
    pot: Amount,
    ticket_price: Amount,
    tickets: Sampler<R>,
    buyers: FxHashMap<Number, String>,
    draw: Option<DrawResult>,
    // Seeds the ball sampler, so that balls never follow the ticket sequence.
    rng: R,
}

impl<R> Round<R>
where
    R: RngCore + SeedableRng,
{
    pub fn new(config: &LotteryConfig, pot: Amount, mut rng: R) -> Self {
        let tickets = Sampler::new(R::seed_from_u64(rng.next_u64()));
        Self {
            pot,
            ticket_price: config.ticket_price,
            tickets,
            buyers: FxHashMap::default(),
            draw: None,
            rng,
        }
    }

    /// Sells a random, still available ticket to `buyer_name` and adds the
    /// ticket price to the pot.
    pub fn purchase_ticket(&mut self, buyer_name: &str) -> Result<Number, LotteryError> {
        if self.is_closed() {
            return Err(LotteryError::AlreadyClosed);
        }
        if buyer_name.trim().is_empty() {
            return Err(LotteryError::InvalidBuyerName);
        }
        let pot = self
            .pot
            .checked_add(self.ticket_price)
            .ok_or(LotteryError::PotOverflow)?;

        let ticket = self
            .tickets
            .draw_without_replacement()
            .map_err(|_| LotteryError::SoldOut)?;
        match self.buyers.entry(ticket) {
            Entry::Occupied(entry) => {
                panic!("Ticket {ticket} has already been bought by {}", entry.get())
            }
            Entry::Vacant(entry) => {
                entry.insert(buyer_name.to_owned());
            }
        }
        self.pot = pot;

        tracing::debug!("Ticket {} purchased by {}, pot: {}", ticket, buyer_name, pot);
        Ok(ticket)
    }

    /// Draws the winning balls, pays the winners out of the pot and closes
    /// the round.
    pub fn draw(&mut self) -> Result<[Number; NB_WINNERS], LotteryError> {
        if self.is_closed() {
            return Err(LotteryError::AlreadyClosed);
        }

        let prizes = self.compute_prizes();
        let mut ball_sampler = Sampler::new(R::seed_from_u64(self.rng.next_u64()));
        let mut balls = [0; NB_WINNERS];
        let mut winners: [Option<Winner>; NB_WINNERS] = Default::default();
        let mut awarded: Amount = 0;

        for i in 0..NB_WINNERS {
            let ball = ball_sampler
                .draw_without_replacement()
                .expect("the ball sampler holds at least NB_WINNERS balls");
            balls[i] = ball;
            if let Some(name) = self.buyers.get(&ball) {
                awarded += prizes[i];
                winners[i] = Some(Winner::new(name.as_str(), prizes[i]));
            }
        }

        // Prizes sum up to at most half of the pot.
        self.pot -= awarded;
        self.draw = Some(DrawResult {
            balls,
            prizes,
            winners,
        });
        Ok(balls)
    }

    /// Prizes for the current pot: 75%, 15% and 10% of half the pot, each
    /// truncated.
    pub fn compute_prizes(&self) -> [Amount; NB_WINNERS] {
        prizes_for(self.pot)
    }

    pub fn get_winners(&self) -> Result<&[Option<Winner>; NB_WINNERS], LotteryError> {
        self.draw_result()
            .map(|draw| &draw.winners)
            .ok_or(LotteryError::NotDrawn)
    }

    /// Renders the winners as two tab-separated lines:
    ///
    /// ```text
    /// 1st ball        2nd ball        3rd ball
    /// Dave: 75$       No winner: 15$  Greg: 10$
    /// ```
    pub fn generate_winners_message(&self) -> Result<String, LotteryError> {
        let draw = self.draw_result().ok_or(LotteryError::NotDrawn)?;

        let header = (1..=NB_WINNERS)
            .map(|i| format!("{} ball", ordinal(i)))
            .collect::<Vec<_>>()
            .join("\t");
        let results = draw
            .winners
            .iter()
            .zip(draw.prizes.iter())
            .map(|(winner, prize)| {
                let name = winner.as_ref().map_or("No winner", Winner::name);
                format!("{name}: {prize}$")
            })
            .collect::<Vec<_>>()
            .join("\t");

        Ok(format!("{header}\n{results}"))
    }

    pub fn get_pot(&self) -> Amount {
        self.pot
    }

    pub fn is_ticket_available(&self) -> bool {
        self.tickets.has_more()
    }

    pub fn is_closed(&self) -> bool {
        self.draw.is_some()
    }

    pub fn draw_result(&self) -> Option<&DrawResult> {
        self.draw.as_ref()
    }

    pub fn buyer_of(&self, ticket: Number) -> Option<&str> {
        self.buyers.get(&ticket).map(String::as_str)
    }

    pub fn ticket_count(&self) -> usize {
        self.buyers.len()
    }
}

// Integer division is not distributive: the order of operations is part of
// the prize definition.
fn prizes_for(pot: Amount) -> [Amount; NB_WINNERS] {
    let half = u128::from(pot / 2);
    [
        (half * 3 / 4) as Amount,
        (half * 3 / 20) as Amount,
        (half / 10) as Amount,
    ]
}

/// 1 -> "1st", 2 -> "2nd", 11 -> "11th", 22 -> "22nd"...
fn ordinal(i: usize) -> String {
    const SUFFIXES: [&str; 10] = ["th", "st", "nd", "rd", "th", "th", "th", "th", "th", "th"];
    match i % 100 {
        11..=13 => format!("{i}th"),
        _ => format!("{i}{}", SUFFIXES[i % 10]),
    }
}

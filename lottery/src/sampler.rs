use rand::Rng;
use thiserror::Error;

use crate::{Number, MAX_NUMBER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("There is no more available draw without replacement.")]
pub struct Exhausted;

/// Draws numbers from `1..=MAX_NUMBER` without replacement.
///
/// Each call performs one step of a Fisher-Yates shuffle: the drawn value is
/// swapped to the tail of the array and the active range shrinks by one, so a
/// value can never come out twice.
pub struct Sampler<R> {
    // [0, remaining) holds the undrawn values, [remaining, MAX_NUMBER) the drawn ones.
    slots: [Number; MAX_NUMBER],
    remaining: usize,
    rng: R,
}

impl<R> Sampler<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        let mut slots = [0; MAX_NUMBER];
        for (i, slot) in slots.iter_mut().enumerate() {
            // tickets and balls are 1-indexed
            *slot = i as Number + 1;
        }
        Self {
            slots,
            remaining: MAX_NUMBER,
            rng,
        }
    }

    pub fn draw_without_replacement(&mut self) -> Result<Number, Exhausted> {
        if !self.has_more() {
            return Err(Exhausted);
        }

        let idx = self.rng.gen_range(0..self.remaining);
        let value = self.slots[idx];
        self.slots.swap(idx, self.remaining - 1);
        self.remaining -= 1;

        Ok(value)
    }

    pub fn has_more(&self) -> bool {
        self.remaining > 0
    }

    /// Number of values that can still be drawn.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<R> Iterator for Sampler<R>
where
    R: Rng,
{
    type Item = Number;

    fn next(&mut self) -> Option<Self::Item> {
        self.draw_without_replacement().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Sampler<R> where R: Rng {}

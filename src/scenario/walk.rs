//! Random-walk candle synthesis
//!
//! A [`WalkProfile`] is an ordered list of legs. Each leg covers a range of
//! candle indices and owns a [`Step`] rule that turns the candle's open into
//! its close. Wicks are added on top of the body with a uniform draw bounded
//! by the profile's wick size, so every candle is well formed.

use rand::Rng;
use crate::core::types::{Candle, CANDLE_SPACING_SECS};

/// Rule for producing one candle close from its open
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// close = open + U[min, max)
    Drift { min: f64, max: f64 },

    /// Symmetric noise of `amplitude` that shrinks linearly by `shrink`
    /// (as a fraction) between the first and the last candle.
    Converging { amplitude: f64, shrink: f64 },

    /// Flat resistance `height` above the anchor price with a rising floor.
    /// Every `rally_every`-th candle rallies, the rest pull back.
    Ceiling {
        height: f64,
        rally_every: usize,
        rally: (f64, f64),
        pullback: (f64, f64),
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub until: usize, // exclusive candle index
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkProfile {
    legs: Vec<Leg>,
    tail: Step,
    wick: f64,
}

/// State visible to a step while walking
#[derive(Debug, Clone, Copy)]
struct WalkContext {
    index: usize,
    len: usize,
    anchor: f64,
    open: f64,
}

impl WalkProfile {
    /// Profile whose candles all use `tail` until legs are added
    pub fn new(tail: Step, wick: f64) -> Self {
        Self {
            legs: Vec::new(),
            tail,
            wick,
        }
    }

    /// Unbiased walk: close = open + U[-volatility, volatility)
    pub fn random_walk(volatility: f64, wick: f64) -> Self {
        Self::new(
            Step::Drift {
                min: -volatility,
                max: volatility,
            },
            wick,
        )
    }

    /// Append a leg covering every index below `until` not claimed by an earlier leg
    pub fn leg(mut self, until: usize, step: Step) -> Self {
        self.legs.push(Leg { until, step });
        self
    }

    pub fn step_for(&self, index: usize) -> &Step {
        self.legs
            .iter()
            .find(|leg| index < leg.until)
            .map(|leg| &leg.step)
            .unwrap_or(&self.tail)
    }

    /// Walk `count` candles starting at `start_price`, one every 60 seconds from `start_time`
    pub fn walk<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        start_price: f64,
        start_time: i64,
        count: usize,
    ) -> Vec<Candle> {
        let mut candles = Vec::with_capacity(count);
        let mut open = start_price;

        for index in 0..count {
            let ctx = WalkContext {
                index,
                len: count,
                anchor: start_price,
                open,
            };
            let close = self.next_close(ctx, rng);
            let high = open.max(close) + uniform(rng, 0.0, self.wick);
            let low = open.min(close) - uniform(rng, 0.0, self.wick);

            candles.push(Candle {
                time: start_time + index as i64 * CANDLE_SPACING_SECS,
                open,
                high,
                low,
                close,
            });
            open = close;
        }

        candles
    }

    fn next_close<R: Rng + ?Sized>(&self, ctx: WalkContext, rng: &mut R) -> f64 {
        match self.step_for(ctx.index) {
            Step::Drift { min, max } => ctx.open + uniform(rng, *min, *max),
            Step::Converging { amplitude, shrink } => {
                let progress = ctx.index as f64 / ctx.len.max(1) as f64;
                let width = amplitude * (1.0 - progress * shrink);
                ctx.open + uniform(rng, -width, width)
            }
            Step::Ceiling {
                height,
                rally_every,
                rally,
                pullback,
            } => {
                let ceiling = ctx.anchor + height;
                let floor = ctx.anchor + height * ctx.index as f64 / ctx.len.max(1) as f64;
                let (min, max) = if ctx.index % (*rally_every).max(1) == 0 {
                    *rally
                } else {
                    *pullback
                };
                (ctx.open + uniform(rng, min, max)).max(floor).min(ceiling)
            }
        }
    }
}

/// U[min, max), or `min` when the range is empty
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

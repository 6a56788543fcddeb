//! Last-move rule: learns whether the final move inside a window tends to
//! continue or reverse on the next tick.

use tracing::debug;

use super::{Classifier, DirectionModel, check_training_set, check_width};
use crate::domain::dataset::{Direction, Example};
use crate::domain::error::LatencyWarsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThresholdRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Momentum,
    Reversal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdModel {
    pub width: usize,
    pub regime: Regime,
    /// Used when the window has no move to read (width 1 or a flat last step).
    pub fallback: Direction,
}

fn last_move(window: &[f64]) -> Option<Direction> {
    match window {
        [.., prev, last] if last > prev => Some(Direction::Up),
        [.., prev, last] if last < prev => Some(Direction::Down),
        _ => None,
    }
}

fn flip(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
    }
}

impl Classifier for ThresholdRule {
    type Model = ThresholdModel;

    fn name(&self) -> &'static str {
        "threshold"
    }

    fn fit(&self, train: &[Example]) -> Result<ThresholdModel, LatencyWarsError> {
        let width = check_training_set(train)?;

        let ups = train.iter().filter(|e| e.label == Direction::Up).count();
        let fallback = if ups * 2 > train.len() {
            Direction::Up
        } else {
            Direction::Down
        };

        let (mut continued, mut reversed) = (0usize, 0usize);
        for example in train {
            match last_move(&example.window) {
                Some(d) if d == example.label => continued += 1,
                Some(_) => reversed += 1,
                None => {}
            }
        }
        let regime = if continued >= reversed {
            Regime::Momentum
        } else {
            Regime::Reversal
        };

        debug!(continued, reversed, ?regime, ?fallback, "fitted threshold rule");

        Ok(ThresholdModel {
            width,
            regime,
            fallback,
        })
    }
}

impl DirectionModel for ThresholdModel {
    fn predict(&self, window: &[f64]) -> Result<Direction, LatencyWarsError> {
        check_width(self.width, window)?;
        Ok(match (last_move(window), self.regime) {
            (Some(d), Regime::Momentum) => d,
            (Some(d), Regime::Reversal) => flip(d),
            (None, _) => self.fallback,
        })
    }
}

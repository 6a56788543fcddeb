//! Feature/label construction and the temporal train/test split.
//!
//! Each example pairs the `window_size` prices strictly before a reference
//! tick with the direction of the move from that tick to the next one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::LatencyWarsError;
use super::price_series::PriceSeries;

/// Binary price direction. Serialised as its label id (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    /// Up iff `next > current`. Equal prices count as Down.
    pub fn of_move(current: f64, next: f64) -> Self {
        if next > current {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn label(self) -> u8 {
        match self {
            Direction::Down => 0,
            Direction::Up => 1,
        }
    }

    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            _ => None,
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.label()
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        Direction::from_label(label).ok_or_else(|| format!("invalid direction label {label}"))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Down => write!(f, "down"),
            Direction::Up => write!(f, "up"),
        }
    }
}

/// One supervised example.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    /// Series tick the window ends just before; the label is the move
    /// from `tick` to `tick + 1`.
    pub tick: usize,
    pub window: Vec<f64>,
    pub label: Direction,
}

/// Ordered example set built from one price series.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleSet {
    pub window_size: usize,
    pub examples: Vec<Example>,
}

/// Temporal prefix/suffix partition of an [`ExampleSet`].
#[derive(Debug, Clone, Copy)]
pub struct TrainTestSplit<'a> {
    pub split_index: usize,
    pub train: &'a [Example],
    pub test: &'a [Example],
}

/// Smallest series that yields at least one example.
pub fn minimum_ticks(window_size: usize) -> usize {
    window_size + 2
}

/// Build the example set for every tick in `[window_size, len - 2]`.
pub fn build_examples(
    series: &PriceSeries,
    window_size: usize,
) -> Result<ExampleSet, LatencyWarsError> {
    if window_size == 0 {
        return Err(LatencyWarsError::invalid_config(
            "window_size",
            "window_size must be positive",
        ));
    }

    let prices = series.as_slice();
    let minimum = minimum_ticks(window_size);
    if prices.len() < minimum {
        return Err(LatencyWarsError::InsufficientData {
            ticks: prices.len(),
            minimum,
        });
    }

    let examples = (window_size..prices.len() - 1)
        .map(|tick| Example {
            tick,
            window: prices[tick - window_size..tick].to_vec(),
            label: Direction::of_move(prices[tick], prices[tick + 1]),
        })
        .collect();

    Ok(ExampleSet {
        window_size,
        examples,
    })
}

impl ExampleSet {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn labels(&self) -> Vec<Direction> {
        self.examples.iter().map(|e| e.label).collect()
    }

    /// Split at `floor(len * train_ratio)`. Train examples always precede
    /// test examples; nothing is shuffled.
    pub fn split(&self, train_ratio: f64) -> Result<TrainTestSplit<'_>, LatencyWarsError> {
        if !(train_ratio > 0.0 && train_ratio < 1.0) {
            return Err(LatencyWarsError::invalid_config(
                "train_ratio",
                format!("train_ratio must be in (0, 1), got {train_ratio}"),
            ));
        }

        let split_index = (self.examples.len() as f64 * train_ratio).floor() as usize;
        let (train, test) = self.examples.split_at(split_index);
        Ok(TrainTestSplit {
            split_index,
            train,
            test,
        })
    }
}

impl TrainTestSplit<'_> {
    /// Series tick of the first test example.
    pub fn test_start(&self, window_size: usize) -> usize {
        self.split_index + window_size
    }
}

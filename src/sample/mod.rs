use nalgebra::*;
use serde::{Serialize, Deserialize};
use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

/// Synthetic two-cluster datasets, sampled from a caller-supplied generator.
pub mod synthetic;

pub use synthetic::*;

/// Import/export of labeled samples as x1,x2,label CSV tables.
pub mod csv;

pub use self::csv::*;

/// Binary class label, carried as the sign of the classifier decision
/// function: Neg maps to -1 and Pos maps to +1. The numeric representation
/// is the one shared with the external training procedure, which reports
/// dual coefficients already multiplied by this sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {

    Neg,

    Pos

}

impl Label {

    /// Numeric sign of the label (-1.0 or 1.0).
    pub fn sign(&self) -> f64 {
        match self {
            Label::Neg => -1.0,
            Label::Pos => 1.0
        }
    }

    /// Label assigned to an evaluated decision value. Values exactly at
    /// zero resolve to the positive class.
    pub fn from_decision(val : f64) -> Self {
        if val >= 0.0 {
            Label::Pos
        } else {
            Label::Neg
        }
    }

}

impl TryFrom<f64> for Label {

    type Error = InvalidLabel;

    fn try_from(val : f64) -> Result<Self, InvalidLabel> {
        if val == -1.0 {
            Ok(Label::Neg)
        } else if val == 1.0 {
            Ok(Label::Pos)
        } else {
            Err(InvalidLabel(val))
        }
    }

}

impl fmt::Display for Label {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Neg => write!(f, "-1"),
            Label::Pos => write!(f, "1")
        }
    }

}

/// Raised when a numeric value outside {-1, 1} is informed where a class
/// label was expected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid class label {0} (expected -1 or 1)")]
pub struct InvalidLabel(pub f64);

/// A single observation: an immutable 2D point paired with its true class.
/// Training sets are ordered sequences of these pairs; the order carries no
/// meaning beyond reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSample {

    pub point : Vector2<f64>,

    pub label : Label

}

impl LabeledSample {

    pub fn new(x1 : f64, x2 : f64, label : Label) -> Self {
        Self { point : Vector2::new(x1, x2), label }
    }

}

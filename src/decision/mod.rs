use nalgebra::*;
use std::fmt;
use thiserror::Error;
use crate::fit::LinearCoefficients;
use crate::sample::Label;

// Threshold below which a weight component is treated as zero when
// classifying the line form.
const W_EPS : f64 = 1e-12;

/// Raised when the fitted weight vector has no usable direction (both
/// components numerically zero): the line-derivation formulas are
/// undefined in this case and the condition is surfaced, never
/// silently suppressed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Degenerate boundary: weight vector is zero (w1 = {w1}, w2 = {w2})")]
pub struct DegenerateBoundary {

    pub w1 : f64,

    pub w2 : f64

}

/// A separating line in drawable form. For w2 != 0 the boundary w·x = b
/// is the sloped line x2 = (b - w1 x1)/w2; when w2 == 0 no such expression
/// exists and the line is only expressible vertically as x1 = b/w1. The
/// two forms are distinguished explicitly rather than assuming the sloped
/// case away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeparatingLine {

    Sloped { slope : f64, intercept : f64 },

    Vertical { x1 : f64 }

}

impl SeparatingLine {

    /// x2 coordinate of the line at the informed x1; None for vertical
    /// lines, which have no x2 expression.
    pub fn x2_at(&self, x1 : f64) -> Option<f64> {
        match self {
            SeparatingLine::Sloped { slope, intercept } => Some(intercept + slope * x1),
            SeparatingLine::Vertical { .. } => None
        }
    }

}

/// Linear decision boundary w·x = b extracted from a fitted classifier,
/// together with the two parallel margin lines at functional offsets of
/// one unit on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearBoundary {

    pub w : Vector2<f64>,

    pub b : f64

}

impl LinearBoundary {

    pub fn new(w : Vector2<f64>, b : f64) -> Result<Self, DegenerateBoundary> {
        if w[0].abs() < W_EPS && w[1].abs() < W_EPS {
            return Err(DegenerateBoundary { w1 : w[0], w2 : w[1] });
        }
        Ok(Self { w, b })
    }

    /// Extracts (w, b) from the coefficients reported by a fitted linear
    /// model: w is the dual-weighted sum of support vectors as exported
    /// by the classifier, b its reported offset.
    pub fn from_classifier<C>(classifier : &C) -> Result<Self, DegenerateBoundary>
        where C : LinearCoefficients + ?Sized
    {
        Self::new(classifier.weights(), classifier.offset())
    }

    /// Value of the decision function w·x - b at the informed point.
    pub fn decision_value(&self, x : &Vector2<f64>) -> f64 {
        self.w.dot(x) - self.b
    }

    /// Line satisfying w·x = b + offset: the boundary itself at offset
    /// zero, the margin lines at offsets -1 and +1. All offsets share the
    /// same direction, so the emitted lines are parallel.
    pub fn line_at(&self, offset : f64) -> SeparatingLine {
        if self.w[1].abs() < W_EPS {
            SeparatingLine::Vertical { x1 : (self.b + offset) / self.w[0] }
        } else {
            SeparatingLine::Sloped {
                slope : -self.w[0] / self.w[1],
                intercept : (self.b + offset) / self.w[1]
            }
        }
    }

    /// The boundary line w·x = b.
    pub fn line(&self) -> SeparatingLine {
        self.line_at(0.0)
    }

    /// The two margin lines, at functional offsets -1 and +1 from the
    /// boundary.
    pub fn margins(&self) -> (SeparatingLine, SeparatingLine) {
        (self.line_at(-1.0), self.line_at(1.0))
    }

}

/// Realized classification error summary: agreement counts between a
/// predicted label sequence and the corresponding true labels. true_pos +
/// false_neg equals the number of positive samples, and true_neg +
/// false_pos the number of negative samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorRate {

    pub true_pos : usize,

    pub true_neg : usize,

    pub false_pos : usize,

    pub false_neg : usize

}

impl ErrorRate {

    /// Tallies predictions against true labels. The sequences must pair
    /// one-to-one.
    pub fn calculate(predicted : &[Label], truth : &[Label]) -> Result<Self, anyhow::Error> {
        if predicted.len() != truth.len() {
            return Err(anyhow::Error::msg("Mismatch between predicted and true label sequence lengths"));
        }
        let mut rate = ErrorRate::default();
        for (p, t) in predicted.iter().zip(truth.iter()) {
            match (p, t) {
                (Label::Pos, Label::Pos) => rate.true_pos += 1,
                (Label::Neg, Label::Neg) => rate.true_neg += 1,
                (Label::Pos, Label::Neg) => rate.false_pos += 1,
                (Label::Neg, Label::Pos) => rate.false_neg += 1
            }
        }
        Ok(rate)
    }

    /// Proportion of correctly classified samples.
    pub fn accuracy(&self) -> f64 {
        let n = self.true_pos + self.true_neg + self.false_pos + self.false_neg;
        if n == 0 {
            return 0.0;
        }
        (self.true_pos + self.true_neg) as f64 / n as f64
    }

}

impl fmt::Display for ErrorRate {

    fn fmt(&self, f : &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "true_pos  = {}", self.true_pos)?;
        writeln!(f, "true_neg  = {}", self.true_neg)?;
        writeln!(f, "false_pos = {}", self.false_pos)?;
        writeln!(f, "false_neg = {}", self.false_neg)?;
        write!(f, "accuracy  = {:.4}", self.accuracy())
    }

}

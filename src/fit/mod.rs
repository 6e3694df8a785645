use nalgebra::*;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::sample::*;

/// Fitted maximum-margin classifier with a linear decision function.
pub mod margin;

pub use margin::*;

/// Kernel options recognized by the external training procedure. The
/// kernel is configuration vocabulary only: no kernel function is evaluated
/// in this crate, since the decision function of the fitted model already
/// arrives reduced to its coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {

    Linear,

    Polynomial,

    Radial,

    Sigmoid

}

/// Configuration forwarded to the external training procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvcConfig {

    pub kernel : Kernel,

    /// Regularization strength; must be positive.
    pub cost : f64,

    /// Whether the trainer should center and scale features before fitting.
    pub scale : bool

}

impl SvcConfig {

    pub fn validate(&self) -> Result<(), TrainingError> {
        if !self.cost.is_finite() || self.cost <= 0.0 {
            return Err(TrainingError::InvalidCost(self.cost));
        }
        Ok(())
    }

}

impl Default for SvcConfig {

    fn default() -> Self {
        Self { kernel : Kernel::Linear, cost : 1.0, scale : false }
    }

}

/// Malformed training inputs, rejected before any fitting is attempted;
/// also covers inconsistent coefficient sets when a fitted model is
/// reconstructed from its exported pieces.
#[derive(Debug, Error)]
pub enum TrainingError {

    #[error("Empty training set")]
    EmptySample,

    #[error("Training set carries a single class (two distinct labels required)")]
    SingleClass,

    #[error("Cost must be positive and finite (got {0})")]
    InvalidCost(f64),

    #[error("Mismatched fitted coefficients: {n_coefs} dual coefficients for {n_sv} support vectors")]
    MismatchedCoefficients { n_coefs : usize, n_sv : usize }

}

/// Failure reported by the external classifier while predicting. The
/// visualization pass performs no retry and no recovery: the error
/// propagates unchanged to the caller and aborts the pass.
#[derive(Debug, Error)]
#[error("Classifier failure: {0}")]
pub struct ClassifierError(#[from] pub anyhow::Error);

/// Capability interface of a trained classifier. The training procedure
/// that produces implementors is an external collaborator; this crate only
/// consumes its output.
pub trait Classifier {

    /// Predicted class for a single query point. Each query is
    /// independent: implementors carry no cross-query state.
    fn predict(&self, x : &Vector2<f64>) -> Result<Label, ClassifierError>;

}

/// Exposed by fitted models whose decision function is linear in the
/// original feature space, so that the decision boundary is the line
/// w·x - b = 0. Nonlinear fitted models implement Classifier alone;
/// no boundary derivation is attempted for them.
pub trait LinearCoefficients : Classifier {

    /// Weight vector (w1, w2) of the decision function.
    fn weights(&self) -> Vector2<f64>;

    /// Offset b of the decision function.
    fn offset(&self) -> f64;

    /// The training samples with nonzero influence on the boundary.
    fn support_vectors(&self) -> &[LabeledSample];

}

/// The external training procedure. Implementations bind to a statistical
/// library outside this crate; the visualization pipeline only requires
/// the fitted model they return.
pub trait SvcTrainer {

    type Fitted : Classifier;

    fn fit(&self, samples : &[LabeledSample], config : &SvcConfig) -> Result<Self::Fitted, TrainingError>;

}

/// Checks any trainer performs before fitting: a valid configuration and
/// a non-empty training set holding at least two distinct labels.
pub fn validate_training_set(samples : &[LabeledSample], config : &SvcConfig) -> Result<(), TrainingError> {
    config.validate()?;
    if samples.is_empty() {
        return Err(TrainingError::EmptySample);
    }
    let first = samples[0].label;
    if samples.iter().all(|s| s.label == first ) {
        return Err(TrainingError::SingleClass);
    }
    Ok(())
}

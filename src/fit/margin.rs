use nalgebra::*;
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::io::{Read, Write};
use super::*;

/// A fitted maximum-margin classifier with a linear decision function,
/// reconstructed from the pieces exported by the external training
/// procedure: the support vectors (the training samples with nonzero
/// influence on the boundary), their signed dual coefficients (dual
/// coefficient times label sign) and the offset. The weight vector normal
/// to the separating hyperplane is the dual-weighted sum of the support
/// vector coordinates, so the decision function at a query point x is
/// w·x - rho, thresholded at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginClassifier {

    support : Vec<LabeledSample>,

    /// Signed dual coefficient paired with each support vector.
    dual_coefs : Vec<f64>,

    /// Offset of the decision function (rho).
    rho : f64

}

impl MarginClassifier {

    /// Reconstructs a fitted model from its exported dual form. Fails when
    /// the coefficient sequence does not pair one-to-one with the support
    /// vectors, or when no support vector is informed.
    pub fn from_dual(support : Vec<LabeledSample>, dual_coefs : Vec<f64>, rho : f64) -> Result<Self, TrainingError> {
        if support.is_empty() {
            return Err(TrainingError::EmptySample);
        }
        if support.len() != dual_coefs.len() {
            return Err(TrainingError::MismatchedCoefficients {
                n_coefs : dual_coefs.len(),
                n_sv : support.len()
            });
        }
        Ok(Self { support, dual_coefs, rho })
    }

    /// Value of the decision function w·x - rho at the query point.
    pub fn decision_value(&self, x : &Vector2<f64>) -> f64 {
        self.weights().dot(x) - self.rho
    }

    /// Reads a fitted model from the JSON interchange file produced by the
    /// external trainer.
    pub fn open(path : &str) -> Result<Self, anyhow::Error> {
        let mut content = String::new();
        File::open(path)?.read_to_string(&mut content)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saves the fitted model as a JSON interchange file.
    pub fn save_to_path(&self, path : &str) -> Result<(), anyhow::Error> {
        let content = serde_json::to_string_pretty(&self)?;
        File::create(path)?.write_all(content.as_bytes())?;
        Ok(())
    }

}

impl Classifier for MarginClassifier {

    fn predict(&self, x : &Vector2<f64>) -> Result<Label, ClassifierError> {
        Ok(Label::from_decision(self.decision_value(x)))
    }

}

impl LinearCoefficients for MarginClassifier {

    fn weights(&self) -> Vector2<f64> {
        self.support.iter().zip(self.dual_coefs.iter())
            .fold(Vector2::zeros(), |w, (sv, coef)| w + sv.point * *coef )
    }

    fn offset(&self) -> f64 {
        self.rho
    }

    fn support_vectors(&self) -> &[LabeledSample] {
        &self.support
    }

}

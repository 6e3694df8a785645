use nalgebra::*;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use super::*;

/// Shape of the synthetic two-cluster demonstration dataset: a zero-mean
/// Gaussian cluster for the negative class and a copy of it shifted by a
/// fixed offset for the positive class.
#[derive(Debug, Clone)]
pub struct ClusterConfig {

    /// Points drawn per class.
    pub n_per_class : usize,

    /// Standard deviation shared by both coordinates of both clusters.
    pub spread : f64,

    /// Offset added to every positive-class point.
    pub shift : Vector2<f64>

}

impl Default for ClusterConfig {

    fn default() -> Self {
        Self {
            n_per_class : 20,
            spread : 0.25,
            shift : Vector2::new(1.0, 1.0)
        }
    }

}

/// Draws the two clusters from the informed generator: first all
/// negative-class points around the origin, then all positive-class points
/// around the configured shift. The generator is passed in by the caller,
/// so a seeded generator yields the same dataset on every call.
pub fn two_clusters<R>(rng : &mut R, cfg : &ClusterConfig) -> Result<Vec<LabeledSample>, anyhow::Error>
    where R : Rng
{
    if cfg.n_per_class == 0 {
        return Err(anyhow::Error::msg("At least one point per class is required"));
    }
    let gauss = Normal::new(0.0, cfg.spread)
        .map_err(|_| anyhow::Error::msg("Cluster spread must be finite and non-negative"))?;
    let mut samples = Vec::with_capacity(2 * cfg.n_per_class);
    for _ in 0..cfg.n_per_class {
        let pt = Vector2::new(gauss.sample(rng), gauss.sample(rng));
        samples.push(LabeledSample { point : pt, label : Label::Neg });
    }
    for _ in 0..cfg.n_per_class {
        let pt = Vector2::new(gauss.sample(rng), gauss.sample(rng)) + cfg.shift;
        samples.push(LabeledSample { point : pt, label : Label::Pos });
    }
    Ok(samples)
}

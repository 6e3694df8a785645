use nalgebra::*;
use thiserror::Error;
use crate::fit::{Classifier, ClassifierError};
use crate::sample::Label;

/// Default sampling resolution per axis (105² = 11025 grid points).
pub const DEFAULT_RESOLUTION : usize = 105;

/// Rejected grid construction inputs. Both conditions fail fast; neither
/// is recoverable within a visualization pass.
#[derive(Debug, Error)]
pub enum InputError {

    #[error("Empty point sequence (the sampling grid requires at least one source point)")]
    EmptySample,

    #[error("Grid resolution must be at least 2 per axis (got {0})")]
    Resolution(usize)

}

/// n evenly spaced values covering [min, max] inclusive of both endpoints.
/// The last value is pinned to the maximum so the covered range is exact
/// regardless of accumulated rounding. A zero-width range yields n copies
/// of the shared coordinate.
fn axis_values(min : f64, max : f64, n : usize) -> Vec<f64> {
    let step = (max - min) / (n - 1) as f64;
    (0..n).map(|i| if i == n - 1 { max } else { min + step * i as f64 } ).collect()
}

/// A finite rectangular sampling of the bounding box of a point cloud at
/// uniform per-axis resolution. The grid spans exactly
/// [min x1, max x1] × [min x2, max x2] of its source points, endpoints
/// included, and stores its points in axis-1-major order: for each of the
/// n values of axis 1, all n values of axis 2. Construction is
/// deterministic, so identical inputs always yield identical grids.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {

    points : Vec<Vector2<f64>>,

    resolution : usize,

    x1_range : (f64, f64),

    x2_range : (f64, f64)

}

impl SamplingGrid {

    /// Covers the bounding box of the informed points with resolution²
    /// samples. The bounding range is computed independently per axis; an
    /// axis over which all points agree degenerates to a zero-width range
    /// and is sampled as repeated identical values.
    pub fn build<'a>(
        points : impl Iterator<Item=&'a Vector2<f64>>,
        resolution : usize
    ) -> Result<Self, InputError> {
        if resolution <= 1 {
            return Err(InputError::Resolution(resolution));
        }
        let (mut min1, mut max1) = (f64::MAX, f64::MIN);
        let (mut min2, mut max2) = (f64::MAX, f64::MIN);
        let mut n = 0;
        for p in points {
            if p[0] < min1 { min1 = p[0]; }
            if p[0] > max1 { max1 = p[0]; }
            if p[1] < min2 { min2 = p[1]; }
            if p[1] > max2 { max2 = p[1]; }
            n += 1;
        }
        if n == 0 {
            return Err(InputError::EmptySample);
        }
        let ax1 = axis_values(min1, max1, resolution);
        let ax2 = axis_values(min2, max2, resolution);
        let mut pts = Vec::with_capacity(resolution * resolution);
        for v1 in ax1.iter() {
            for v2 in ax2.iter() {
                pts.push(Vector2::new(*v1, *v2));
            }
        }
        Ok(Self {
            points : pts,
            resolution,
            x1_range : (min1, max1),
            x2_range : (min2, max2)
        })
    }

    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Per-axis resolution informed at construction.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// (min, max) of axis 1 over the source points.
    pub fn x1_range(&self) -> (f64, f64) {
        self.x1_range
    }

    /// (min, max) of axis 2 over the source points.
    pub fn x2_range(&self) -> (f64, f64) {
        self.x2_range
    }

}

/// Predicted labels in one-to-one positional correspondence with a
/// sampling grid. Derived data: rebuilt whenever the grid or the
/// classifier changes, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionField {

    labels : Vec<Label>

}

impl PredictionField {

    /// Queries the classifier once per grid point, independently and in
    /// grid order. A classifier failure aborts the pass and propagates
    /// unchanged.
    pub fn classify<C>(grid : &SamplingGrid, classifier : &C) -> Result<Self, ClassifierError>
        where C : Classifier + ?Sized
    {
        let mut labels = Vec::with_capacity(grid.len());
        for pt in grid.points() {
            labels.push(classifier.predict(pt)?);
        }
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

}

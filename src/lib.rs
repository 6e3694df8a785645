/// Labeled two-dimensional observations: binary class labels, (point, label)
/// pairs, synthetic cluster generation from a caller-supplied random number
/// generator, and CSV import/export of datasets.
pub mod sample;

/// Interface to the external classifier: training configuration vocabulary
/// (kernel, cost, scaling), the prediction and coefficient-export capability
/// traits, and the fitted maximum-margin model reconstructed from externally
/// produced support vectors and dual coefficients.
pub mod fit;

/// Rectangular sampling grids covering the bounding box of a point cloud at
/// uniform resolution, and the prediction field obtained by querying a
/// classifier once per grid point.
pub mod grid;

/// Geometry of the linear decision boundary (separating line and the two
/// margin lines at functional offsets of one unit) and realized
/// classification error rates.
pub mod decision;

/// SVG rendering of the full decision diagram: class regions, samples,
/// support vectors, boundary and margins.
pub mod plot;

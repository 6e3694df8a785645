use rand::SeedableRng;
use rand::rngs::StdRng;
use nalgebra::Vector2;
use ::margin::sample::*;
use ::margin::fit::*;
use ::margin::plot::{self, Figure};

fn main() -> Result<(), anyhow::Error> {
    let mut rng = StdRng::seed_from_u64(7);

    // Clusters separated along axis 1 only, so the fitted weight vector
    // has no axis-2 component and the boundary must be drawn in its
    // explicit vertical form x1 = b/w1.
    let cfg = ClusterConfig { shift : Vector2::new(2.0, 0.0), ..Default::default() };
    let samples = two_clusters(&mut rng, &cfg)?;

    let support = vec![
        LabeledSample::new(2.0, 0.0, Label::Pos),
        LabeledSample::new(0.0, 0.0, Label::Neg)
    ];
    let model = MarginClassifier::from_dual(support, vec![1.0, -1.0], 2.0)?;

    let svg = plot::visualize(&samples, &model, 105, &Figure::default())?;
    plot::save_svg(&svg, "vertical.svg")?;
    println!("Figure written to vertical.svg");
    Ok(())
}

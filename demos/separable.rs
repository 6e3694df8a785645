use rand::SeedableRng;
use rand::rngs::StdRng;
use ::margin::sample::*;
use ::margin::fit::*;
use ::margin::plot::{self, Figure};

fn main() -> Result<(), anyhow::Error> {
    let mut rng = StdRng::seed_from_u64(42);
    let samples = two_clusters(&mut rng, &ClusterConfig::default())?;

    // Coefficients exported by an external SVM fit over this kind of
    // dataset: two support vectors on either side of the gap, with unit
    // dual coefficients, so w = (1, 1) and the boundary is x1 + x2 = 1.
    let support = vec![
        LabeledSample::new(1.0, 1.0, Label::Pos),
        LabeledSample::new(0.0, 0.0, Label::Neg)
    ];
    let model = MarginClassifier::from_dual(support, vec![1.0, -1.0], 1.0)?;

    let svg = plot::visualize(&samples, &model, 105, &Figure::default())?;
    plot::save_svg(&svg, "separable.svg")?;
    println!("Figure written to separable.svg");
    Ok(())
}

use nalgebra::*;
use std::convert::TryFrom;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ::margin::sample::*;
use ::margin::fit::*;
use ::margin::grid::*;
use ::margin::decision::*;
use ::margin::plot::{self, Figure};

const EPS : f64 = 10E-8;

// Fitted model with w = (1, 1) and b = 1, as exported by an external
// linear SVM fit over clusters at the origin and at (1, 1).
fn fitted_model() -> MarginClassifier {
    let support = vec![
        LabeledSample::new(1.0, 1.0, Label::Pos),
        LabeledSample::new(0.0, 0.0, Label::Neg)
    ];
    MarginClassifier::from_dual(support, vec![1.0, -1.0], 1.0).unwrap()
}

#[derive(Debug)]
struct FailingClassifier;

impl Classifier for FailingClassifier {

    fn predict(&self, _x : &Vector2<f64>) -> Result<Label, ClassifierError> {
        Err(ClassifierError(anyhow::Error::msg("Prediction backend unavailable")))
    }

}

#[test]
fn grid_covers_bounding_box() {
    let pts = vec![
        Vector2::new(0.0, -1.0),
        Vector2::new(2.0, 3.0),
        Vector2::new(-1.5, 0.5)
    ];
    let grid = SamplingGrid::build(pts.iter(), 7).unwrap();
    assert!(grid.len() == 49);
    let min1 = grid.points().iter().map(|p| p[0] ).fold(f64::MAX, f64::min);
    let max1 = grid.points().iter().map(|p| p[0] ).fold(f64::MIN, f64::max);
    let min2 = grid.points().iter().map(|p| p[1] ).fold(f64::MAX, f64::min);
    let max2 = grid.points().iter().map(|p| p[1] ).fold(f64::MIN, f64::max);
    assert!((min1 - (-1.5)).abs() < EPS);
    assert!((max1 - 2.0).abs() < EPS);
    assert!((min2 - (-1.0)).abs() < EPS);
    assert!((max2 - 3.0).abs() < EPS);
}

#[test]
fn grid_is_deterministic() {
    let pts = vec![
        Vector2::new(0.3, 0.7),
        Vector2::new(-2.1, 1.9),
        Vector2::new(1.4, -0.6)
    ];
    let a = SamplingGrid::build(pts.iter(), 11).unwrap();
    let b = SamplingGrid::build(pts.iter(), 11).unwrap();
    assert_eq!(a, b);
}

#[test]
fn grid_order_is_axis1_major() {
    let pts = vec![Vector2::new(0.0, 0.0), Vector2::new(4.0, 2.0)];
    let grid = SamplingGrid::build(pts.iter(), 3).unwrap();
    let expected = vec![
        Vector2::new(0.0, 0.0), Vector2::new(0.0, 1.0), Vector2::new(0.0, 2.0),
        Vector2::new(2.0, 0.0), Vector2::new(2.0, 1.0), Vector2::new(2.0, 2.0),
        Vector2::new(4.0, 0.0), Vector2::new(4.0, 1.0), Vector2::new(4.0, 2.0)
    ];
    assert_eq!(grid.points(), &expected[..]);
}

#[test]
fn two_point_resolution_yields_corners() {
    let pts = vec![Vector2::new(-1.0, 0.0), Vector2::new(1.0, 2.0)];
    let grid = SamplingGrid::build(pts.iter(), 2).unwrap();
    let expected = vec![
        Vector2::new(-1.0, 0.0), Vector2::new(-1.0, 2.0),
        Vector2::new(1.0, 0.0), Vector2::new(1.0, 2.0)
    ];
    assert_eq!(grid.points(), &expected[..]);
}

#[test]
fn degenerate_axis_repeats_shared_coordinate() {
    let pts = vec![
        Vector2::new(1.0, 5.0),
        Vector2::new(2.0, 5.0),
        Vector2::new(3.0, 5.0)
    ];
    let grid = SamplingGrid::build(pts.iter(), 4).unwrap();
    assert!(grid.len() == 16);
    assert!(grid.points().iter().all(|p| (p[1] - 5.0).abs() < EPS ));
    let min1 = grid.points().iter().map(|p| p[0] ).fold(f64::MAX, f64::min);
    let max1 = grid.points().iter().map(|p| p[0] ).fold(f64::MIN, f64::max);
    assert!((min1 - 1.0).abs() < EPS);
    assert!((max1 - 3.0).abs() < EPS);
}

#[test]
fn grid_rejects_bad_inputs() {
    let empty : Vec<Vector2<f64>> = Vec::new();
    assert!(matches!(
        SamplingGrid::build(empty.iter(), 10),
        Err(InputError::EmptySample)
    ));
    let pts = vec![Vector2::new(0.0, 0.0)];
    assert!(matches!(
        SamplingGrid::build(pts.iter(), 1),
        Err(InputError::Resolution(1))
    ));
}

#[test]
fn field_preserves_grid_order() {
    let model = fitted_model();
    let pts = vec![Vector2::new(-0.5, -0.5), Vector2::new(1.5, 1.5)];
    let grid = SamplingGrid::build(pts.iter(), 5).unwrap();
    let field = PredictionField::classify(&grid, &model).unwrap();
    assert!(field.len() == grid.len());
    for (pt, label) in grid.points().iter().zip(field.labels().iter()) {
        assert_eq!(*label, model.predict(pt).unwrap());
    }
}

#[test]
fn classifier_failure_aborts_classification() {
    let pts = vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)];
    let grid = SamplingGrid::build(pts.iter(), 3).unwrap();
    assert!(PredictionField::classify(&grid, &FailingClassifier).is_err());
}

#[test]
fn boundary_points_satisfy_plane_equation() {
    let model = fitted_model();
    let boundary = LinearBoundary::from_classifier(&model).unwrap();
    let line = boundary.line();
    for x1 in [-2.0, -0.3, 0.0, 0.5, 1.7].iter() {
        let x2 = line.x2_at(*x1).unwrap();
        let pt = Vector2::new(*x1, x2);
        assert!((boundary.w.dot(&pt) - boundary.b).abs() < EPS);
    }
}

#[test]
fn margins_are_parallel_at_unit_offsets() {
    let model = fitted_model();
    let boundary = LinearBoundary::from_classifier(&model).unwrap();
    let (lower, upper) = boundary.margins();
    match (boundary.line(), lower, upper) {
        (
            SeparatingLine::Sloped { slope, .. },
            SeparatingLine::Sloped { slope : s_low, .. },
            SeparatingLine::Sloped { slope : s_up, .. }
        ) => {
            assert!((slope - s_low).abs() < EPS);
            assert!((slope - s_up).abs() < EPS);
        },
        _ => panic!("Expected sloped lines")
    }
    for x1 in [-1.0, 0.25, 2.0].iter() {
        let low_pt = Vector2::new(*x1, lower.x2_at(*x1).unwrap());
        let up_pt = Vector2::new(*x1, upper.x2_at(*x1).unwrap());
        assert!((boundary.decision_value(&low_pt) - (-1.0)).abs() < EPS);
        assert!((boundary.decision_value(&up_pt) - 1.0).abs() < EPS);
    }
}

#[test]
fn vertical_boundary_uses_explicit_form() {
    let support = vec![
        LabeledSample::new(2.0, 0.0, Label::Pos),
        LabeledSample::new(0.0, 0.0, Label::Neg)
    ];
    let model = MarginClassifier::from_dual(support, vec![1.0, -1.0], 2.0).unwrap();
    let boundary = LinearBoundary::from_classifier(&model).unwrap();
    match boundary.line() {
        SeparatingLine::Vertical { x1 } => assert!((x1 - 1.0).abs() < EPS),
        _ => panic!("Expected a vertical line")
    }
    match boundary.margins() {
        (SeparatingLine::Vertical { x1 : lo }, SeparatingLine::Vertical { x1 : up }) => {
            assert!((lo - 0.5).abs() < EPS);
            assert!((up - 1.5).abs() < EPS);
        },
        _ => panic!("Expected vertical margin lines")
    }
}

#[test]
fn zero_weight_vector_is_degenerate() {
    assert!(LinearBoundary::new(Vector2::zeros(), 0.3).is_err());

    // Coefficients cancelling over a shared support vector leave no
    // usable direction.
    let support = vec![
        LabeledSample::new(1.0, 1.0, Label::Pos),
        LabeledSample::new(1.0, 1.0, Label::Neg)
    ];
    let model = MarginClassifier::from_dual(support, vec![1.0, -1.0], 0.0).unwrap();
    assert!(LinearBoundary::from_classifier(&model).is_err());
}

#[test]
fn shifted_cluster_scenario() {
    let mut rng = StdRng::seed_from_u64(1);
    let samples = two_clusters(&mut rng, &ClusterConfig::default()).unwrap();
    assert!(samples.len() == 40);

    let model = fitted_model();
    let grid = SamplingGrid::build(samples.iter().map(|s| &s.point ), DEFAULT_RESOLUTION).unwrap();
    assert!(grid.len() == 11025);
    let field = PredictionField::classify(&grid, &model).unwrap();
    assert!(field.len() == 11025);

    let nearest = |target : Vector2<f64>| {
        grid.points().iter().enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - target).norm().partial_cmp(&(*b - target).norm()).unwrap()
            })
            .map(|(ix, _)| ix )
            .unwrap()
    };
    assert_eq!(field.labels()[nearest(Vector2::new(0.0, 0.0))], Label::Neg);
    assert_eq!(field.labels()[nearest(Vector2::new(1.0, 1.0))], Label::Pos);

    // The boundary separates the cluster centers.
    let boundary = LinearBoundary::from_classifier(&model).unwrap();
    assert!(boundary.decision_value(&Vector2::new(0.0, 0.0)) < 0.0);
    assert!(boundary.decision_value(&Vector2::new(1.0, 1.0)) > 0.0);
}

#[test]
fn synthetic_generation_is_reproducible() {
    let cfg = ClusterConfig::default();
    let a = two_clusters(&mut StdRng::seed_from_u64(9), &cfg).unwrap();
    let b = two_clusters(&mut StdRng::seed_from_u64(9), &cfg).unwrap();
    assert_eq!(a, b);
    assert!(a[..20].iter().all(|s| s.label == Label::Neg ));
    assert!(a[20..].iter().all(|s| s.label == Label::Pos ));
}

#[test]
fn synthetic_generation_rejects_empty_classes() {
    let cfg = ClusterConfig { n_per_class : 0, ..Default::default() };
    assert!(two_clusters(&mut StdRng::seed_from_u64(0), &cfg).is_err());
}

#[test]
fn csv_loads_labeled_samples() {
    let content = "x1,x2,label\n0.5,-1.25,1\n-0.75,2,-1\n";
    let samples = read_samples(content.as_bytes()).unwrap();
    assert!(samples.len() == 2);
    assert!((samples[0].point[0] - 0.5).abs() < EPS);
    assert!((samples[0].point[1] - (-1.25)).abs() < EPS);
    assert_eq!(samples[0].label, Label::Pos);
    assert_eq!(samples[1].label, Label::Neg);
}

#[test]
fn csv_rejects_malformed_rows() {
    let bad_label = "x1,x2,label\n0.1,0.2,3\n";
    assert!(matches!(
        read_samples(bad_label.as_bytes()),
        Err(TableError::BadLabel { row : 1, .. })
    ));
    let bad_coord = "x1,x2,label\n0.1,0.2,1\nnope,0.2,1\n";
    assert!(matches!(
        read_samples(bad_coord.as_bytes()),
        Err(TableError::BadCoordinate { row : 2, .. })
    ));
}

#[test]
fn fitted_model_roundtrips_through_json() {
    let model = fitted_model();
    let content = serde_json::to_string(&model).unwrap();
    let restored : MarginClassifier = serde_json::from_str(&content).unwrap();
    assert!((restored.weights() - model.weights()).norm() < EPS);
    assert!((restored.offset() - model.offset()).abs() < EPS);
    assert!(restored.support_vectors() == model.support_vectors());
}

#[test]
fn label_parsing() {
    assert_eq!(Label::try_from(1.0).unwrap(), Label::Pos);
    assert_eq!(Label::try_from(-1.0).unwrap(), Label::Neg);
    assert!(Label::try_from(0.0).is_err());
    assert!((Label::Pos.sign() - 1.0).abs() < EPS);
    assert!((Label::Neg.sign() + 1.0).abs() < EPS);
}

#[test]
fn error_rate_counts_confusion_table() {
    let predicted = vec![Label::Pos, Label::Pos, Label::Neg, Label::Neg, Label::Pos];
    let truth = vec![Label::Pos, Label::Neg, Label::Neg, Label::Pos, Label::Pos];
    let rate = ErrorRate::calculate(&predicted, &truth).unwrap();
    assert!(rate.true_pos == 2);
    assert!(rate.true_neg == 1);
    assert!(rate.false_pos == 1);
    assert!(rate.false_neg == 1);
    assert!((rate.accuracy() - 0.6).abs() < EPS);

    assert!(ErrorRate::calculate(&predicted[..2], &truth).is_err());
}

#[test]
fn training_set_validation() {
    let cfg = SvcConfig::default();
    assert!(matches!(
        validate_training_set(&[], &cfg),
        Err(TrainingError::EmptySample)
    ));

    let one_class = vec![
        LabeledSample::new(0.0, 0.0, Label::Pos),
        LabeledSample::new(1.0, 1.0, Label::Pos)
    ];
    assert!(matches!(
        validate_training_set(&one_class, &cfg),
        Err(TrainingError::SingleClass)
    ));

    let bad_cost = SvcConfig { cost : 0.0, ..Default::default() };
    let two_class = vec![
        LabeledSample::new(0.0, 0.0, Label::Neg),
        LabeledSample::new(1.0, 1.0, Label::Pos)
    ];
    assert!(matches!(
        validate_training_set(&two_class, &bad_cost),
        Err(TrainingError::InvalidCost(_))
    ));
    assert!(validate_training_set(&two_class, &cfg).is_ok());
}

#[test]
fn mismatched_dual_coefficients_are_rejected() {
    let support = vec![LabeledSample::new(1.0, 1.0, Label::Pos)];
    assert!(matches!(
        MarginClassifier::from_dual(support, vec![1.0, -1.0], 0.0),
        Err(TrainingError::MismatchedCoefficients { n_coefs : 2, n_sv : 1 })
    ));
    assert!(matches!(
        MarginClassifier::from_dual(Vec::new(), Vec::new(), 0.0),
        Err(TrainingError::EmptySample)
    ));
}

#[test]
fn svg_carries_all_diagram_elements() {
    let model = fitted_model();
    let samples = vec![
        LabeledSample::new(0.0, 0.0, Label::Neg),
        LabeledSample::new(1.0, 1.0, Label::Pos)
    ];
    let grid = SamplingGrid::build(samples.iter().map(|s| &s.point ), 3).unwrap();
    let field = PredictionField::classify(&grid, &model).unwrap();
    let boundary = LinearBoundary::from_classifier(&model).unwrap();
    let svg = plot::decision_plot(
        &Figure::default(),
        &grid,
        &field,
        &samples,
        model.support_vectors(),
        &boundary
    );

    // 9 field cells plus the canvas background, the clip rectangle and
    // the chart frame.
    assert!(svg.matches("<rect").count() == 12);

    // Two samples plus two support-vector ring markers.
    assert!(svg.matches("<circle").count() == 4);

    // Two dashed margin lines and one solid boundary line.
    assert!(svg.matches("<line").count() == 3);
    assert!(svg.matches("stroke-dasharray").count() == 2);
}

#[test]
fn visualize_runs_the_full_pass() {
    let mut rng = StdRng::seed_from_u64(3);
    let samples = two_clusters(&mut rng, &ClusterConfig::default()).unwrap();
    let model = fitted_model();
    let svg = plot::visualize(&samples, &model, 21, &Figure::default()).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.matches("stroke-dasharray").count() == 2);
}

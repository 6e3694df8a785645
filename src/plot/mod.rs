use std::fs::File;
use std::io::Write;
use thiserror::Error;
use crate::decision::*;
use crate::fit::{ClassifierError, LinearCoefficients};
use crate::grid::*;
use crate::sample::*;

const NEG_COLOR : &'static str = "#3b82f6";

const POS_COLOR : &'static str = "#ef4444";

const BOUNDARY_COLOR : &'static str = "#111827";

const MARGIN_COLOR : &'static str = "#6b7280";

fn class_color(label : Label) -> &'static str {
    match label {
        Label::Neg => NEG_COLOR,
        Label::Pos => POS_COLOR
    }
}

/// Any failure of the full visualization pass. Every variant is terminal:
/// there is no partial-result mode and no retry.
#[derive(Debug, Error)]
pub enum PlotError {

    #[error("{0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Classifier(#[from] ClassifierError),

    #[error("{0}")]
    Degenerate(#[from] DegenerateBoundary),

    #[error("Error writing figure: {0}")]
    Io(#[from] std::io::Error)

}

/// Pixel geometry of the output figure. The chart area is the canvas
/// minus the margin on each side; all data coordinates are mapped into it.
#[derive(Debug, Clone, Copy)]
pub struct Figure {

    pub width : u32,

    pub height : u32,

    /// Padding between the canvas edge and the chart area.
    pub margin : u32

}

impl Default for Figure {

    fn default() -> Self {
        Self { width : 640, height : 640, margin : 40 }
    }

}

impl Figure {

    fn chart_width(&self) -> f64 {
        (self.width - 2 * self.margin) as f64
    }

    fn chart_height(&self) -> f64 {
        (self.height - 2 * self.margin) as f64
    }

    // Fraction of the range covered up to v; a zero-width range maps
    // every value to the chart center.
    fn frac(v : f64, (min, max) : (f64, f64)) -> f64 {
        if (max - min).abs() < f64::EPSILON {
            0.5
        } else {
            (v - min) / (max - min)
        }
    }

    /// Maps a data point inside the grid bounding box to pixel
    /// coordinates (the SVG y axis grows downward).
    fn to_pixel(&self, grid : &SamplingGrid, x1 : f64, x2 : f64) -> (f64, f64) {
        let px = self.margin as f64 + Self::frac(x1, grid.x1_range()) * self.chart_width();
        let py = self.margin as f64 + self.chart_height()
            - Self::frac(x2, grid.x2_range()) * self.chart_height();
        (px, py)
    }

    // Pixel extent of one background cell along an axis of the informed
    // range; a degenerate axis spreads its single value over the full
    // chart extent.
    fn cell_extent(extent : f64, range : (f64, f64), resolution : usize) -> f64 {
        if (range.1 - range.0).abs() < f64::EPSILON {
            extent
        } else {
            extent / (resolution - 1) as f64
        }
    }

}

fn line_svg(fig : &Figure, grid : &SamplingGrid, line : &SeparatingLine, color : &str, dashed : bool) -> String {
    let dash = if dashed { r#" stroke-dasharray="6,4""# } else { "" };
    let ((x1, y1), (x2, y2)) = match line {
        SeparatingLine::Sloped { slope, intercept } => {
            let (lo, hi) = grid.x1_range();
            let y_lo = intercept + slope * lo;
            let y_hi = intercept + slope * hi;
            (fig.to_pixel(grid, lo, y_lo), fig.to_pixel(grid, hi, y_hi))
        },
        SeparatingLine::Vertical { x1 } => {
            let (lo, hi) = grid.x2_range();
            (fig.to_pixel(grid, *x1, lo), fig.to_pixel(grid, *x1, hi))
        }
    };
    format!(
        r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="2"{}/>"##,
        x1, y1, x2, y2, color, dash
    )
}

/// Renders the full decision diagram as an SVG document: the prediction
/// field as a colored background region (one filled cell per grid point,
/// colored by predicted label), the training samples colored by true
/// label, the support-vector subset with a distinct ring marker, the two
/// margin lines dashed and the boundary line solid. Lines are clipped to
/// the chart area. The output is consumed as a visual artifact only;
/// nothing downstream reads it back.
pub fn decision_plot(
    fig : &Figure,
    grid : &SamplingGrid,
    field : &PredictionField,
    samples : &[LabeledSample],
    support : &[LabeledSample],
    boundary : &LinearBoundary
) -> String {
    assert!(field.len() == grid.len());

    let n = grid.resolution();
    let cell_w = Figure::cell_extent(fig.chart_width(), grid.x1_range(), n);
    let cell_h = Figure::cell_extent(fig.chart_height(), grid.x2_range(), n);

    let mut cells = String::new();
    for (pt, label) in grid.points().iter().zip(field.labels().iter()) {
        let (px, py) = fig.to_pixel(grid, pt[0], pt[1]);
        cells.push_str(&format!(
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" opacity="0.18"/>"##,
            px - cell_w / 2.0, py - cell_h / 2.0, cell_w, cell_h, class_color(*label)
        ));
        cells.push('\n');
    }

    let mut points = String::new();
    for s in samples.iter() {
        let (px, py) = fig.to_pixel(grid, s.point[0], s.point[1]);
        points.push_str(&format!(
            r##"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{}" opacity="0.9"/>"##,
            px, py, class_color(s.label)
        ));
        points.push('\n');
    }
    for s in support.iter() {
        let (px, py) = fig.to_pixel(grid, s.point[0], s.point[1]);
        points.push_str(&format!(
            r##"<circle cx="{:.2}" cy="{:.2}" r="7" fill="none" stroke="{}" stroke-width="1.5"/>"##,
            px, py, BOUNDARY_COLOR
        ));
        points.push('\n');
    }

    let (lower, upper) = boundary.margins();
    let lines = format!(
        "{}\n{}\n{}",
        line_svg(fig, grid, &lower, MARGIN_COLOR, true),
        line_svg(fig, grid, &upper, MARGIN_COLOR, true),
        line_svg(fig, grid, &boundary.line(), BOUNDARY_COLOR, false)
    );

    let (m, w, h) = (fig.margin, fig.width, fig.height);
    format!(
        r##"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">
<rect x="0" y="0" width="{}" height="{}" fill="white"/>
<defs>
<clipPath id="chart"><rect x="{}" y="{}" width="{:.2}" height="{:.2}"/></clipPath>
</defs>
<g clip-path="url(#chart)">
{}{}
</g>
{}<rect x="{}" y="{}" width="{:.2}" height="{:.2}" fill="none" stroke="#e5e7eb" stroke-width="2"/>
</svg>"##,
        w, h,
        w, h,
        m, m, fig.chart_width(), fig.chart_height(),
        cells, lines,
        points,
        m, m, fig.chart_width(), fig.chart_height()
    )
}

/// The full visualization pass over a labeled dataset and a fitted linear
/// model: sampling grid over the data bounding box, one prediction per
/// grid point, boundary and margin lines from the fitted coefficients,
/// all rendered to an SVG string. Single-threaded, synchronous, one pass;
/// any failure is terminal.
pub fn visualize<C>(
    samples : &[LabeledSample],
    classifier : &C,
    resolution : usize,
    fig : &Figure
) -> Result<String, PlotError>
    where C : LinearCoefficients
{
    let grid = SamplingGrid::build(samples.iter().map(|s| &s.point ), resolution)?;
    let field = PredictionField::classify(&grid, classifier)?;
    let boundary = LinearBoundary::from_classifier(classifier)?;
    Ok(decision_plot(fig, &grid, &field, samples, classifier.support_vectors(), &boundary))
}

/// Writes rendered SVG content at the informed path.
pub fn save_svg(content : &str, path : &str) -> Result<(), PlotError> {
    let mut f = File::create(path)?;
    f.write_all(content.as_bytes())?;
    Ok(())
}

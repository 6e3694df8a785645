use structopt::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use anyhow::Context;
use ::margin::sample::*;
use ::margin::fit::*;
use ::margin::decision::*;
use ::margin::plot::{self, Figure};

/// Visualize fitted maximum-margin classifiers from the command line
#[derive(StructOpt, Debug)]
pub enum Margin {

    /// Generates a synthetic two-cluster dataset and writes it as CSV
    Simulate {

        /// Points drawn per class
        #[structopt(short, default_value = "20")]
        n : usize,

        /// Seed for the random number generator
        #[structopt(short)]
        seed : u64,

        #[structopt(short)]
        output : Option<String>

    },

    /// Renders the decision diagram for a dataset and a fitted model
    Render {

        data : String,

        #[structopt(short)]
        model : String,

        /// Grid resolution per axis
        #[structopt(short, default_value = "105")]
        resolution : usize,

        #[structopt(short)]
        output : String

    },

    /// Prints the error-rate summary of a fitted model over a dataset
    Assess {

        data : String,

        #[structopt(short)]
        model : String

    }

}

fn print_or_save(samples : &[LabeledSample], opt_path : &Option<String>) -> Result<(), anyhow::Error> {
    match opt_path {
        Some(path) => save_samples(samples, path)
            .with_context(|| format!("Could not save dataset at {}", path) ),
        None => {
            write_samples(samples, std::io::stdout())?;
            Ok(())
        }
    }
}

fn open_model(path : &str) -> Result<MarginClassifier, anyhow::Error> {
    MarginClassifier::open(path)
        .with_context(|| format!("Could not open fitted model at {}", path) )
}

fn open_data(path : &str) -> Result<Vec<LabeledSample>, anyhow::Error> {
    let samples = load_samples(path)
        .with_context(|| format!("Could not open dataset at {}", path) )?;
    Ok(samples)
}

fn main() -> Result<(), anyhow::Error> {
    match Margin::from_args() {
        Margin::Simulate { n, seed, output } => {
            let mut rng = StdRng::seed_from_u64(seed);
            let cfg = ClusterConfig { n_per_class : n, ..Default::default() };
            let samples = two_clusters(&mut rng, &cfg)?;
            print_or_save(&samples, &output)
        },
        Margin::Render { data, model, resolution, output } => {
            let samples = open_data(&data)?;
            let model = open_model(&model)?;
            let svg = plot::visualize(&samples, &model, resolution, &Figure::default())?;
            plot::save_svg(&svg, &output)
                .with_context(|| format!("Could not write figure at {}", output) )
        },
        Margin::Assess { data, model } => {
            let samples = open_data(&data)?;
            let model = open_model(&model)?;
            let mut predicted = Vec::with_capacity(samples.len());
            for s in samples.iter() {
                predicted.push(model.predict(&s.point)?);
            }
            let truth : Vec<_> = samples.iter().map(|s| s.label ).collect();
            let rate = ErrorRate::calculate(&predicted, &truth)?;
            println!("{}", rate);
            Ok(())
        }
    }
}

//! matgrad-train: fit an MLP to MNIST.

mod config;
mod trainer;

use clap::Parser;
use config::{OptimizerKind, TrainConfig};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "matgrad-train")]
#[command(about = "Train a multi-layer perceptron on MNIST")]
#[command(version)]
struct Cli {
    /// Directory holding the four MNIST IDX files
    #[arg(long, default_value = "data/mnist")]
    data_dir: PathBuf,

    /// Learning rate
    #[arg(long, default_value = "0.01")]
    lr: f64,

    /// Momentum coefficient (Nesterov only)
    #[arg(long, default_value = "0.9")]
    momentum: f64,

    /// Number of passes over the training set
    #[arg(long, default_value = "20")]
    epochs: usize,

    /// Samples per batch
    #[arg(long, default_value = "128")]
    batch_size: usize,

    /// Hidden layer widths
    #[arg(long, value_delimiter = ',', default_value = "32,16")]
    hidden: Vec<usize>,

    /// Optimizer
    #[arg(long, value_enum, default_value = "nesterov")]
    optimizer: OptimizerKind,

    /// Where the best weights are written (and read from with --resume)
    #[arg(long, default_value = "mnist_mlp.bin")]
    weights: PathBuf,

    /// Seed for weight initialisation and shuffling
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Shuffle the training set every epoch
    #[arg(long)]
    shuffle: bool,

    /// Start from the weights file instead of a fresh initialisation
    #[arg(long)]
    resume: bool,
}

impl From<Cli> for TrainConfig {
    fn from(cli: Cli) -> Self {
        TrainConfig {
            data_dir: cli.data_dir,
            learning_rate: cli.lr,
            momentum: cli.momentum,
            epochs: cli.epochs,
            batch_size: cli.batch_size,
            hidden: cli.hidden,
            optimizer: cli.optimizer,
            weights: cli.weights,
            seed: cli.seed,
            shuffle: cli.shuffle,
            resume: cli.resume,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from(Cli::parse());
    match trainer::run(&config) {
        Ok(summary) => {
            if let Some(last) = summary.validation.last() {
                info!(
                    "{} epochs run, final validation accuracy {:.2}%, best {:.2}% in {}",
                    summary.train.len(),
                    last.accuracy * 100.0,
                    summary.best_val_accuracy * 100.0,
                    config.weights.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

use clap::ValueEnum;
use matgrad_core::MatGradError;
use std::path::PathBuf;

/// Digit classes.
pub const OUTPUT_CLASSES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptimizerKind {
    /// Plain stochastic gradient descent
    Sgd,
    /// SGD with Nesterov momentum
    Nesterov,
}

/// Everything a training run needs, already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub data_dir: PathBuf,
    pub learning_rate: f64,
    pub momentum: f64,
    pub epochs: usize,
    pub batch_size: usize,
    pub hidden: Vec<usize>,
    pub optimizer: OptimizerKind,
    pub weights: PathBuf,
    pub seed: u64,
    pub shuffle: bool,
    pub resume: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            data_dir: PathBuf::from("data/mnist"),
            learning_rate: 0.01,
            momentum: 0.9,
            epochs: 20,
            batch_size: 128,
            hidden: vec![32, 16],
            optimizer: OptimizerKind::Nesterov,
            weights: PathBuf::from("mnist_mlp.bin"),
            seed: 42,
            shuffle: false,
            resume: false,
        }
    }
}

impl TrainConfig {
    /// Layer widths after the input: the hidden sizes followed by the class count.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = self.hidden.clone();
        sizes.push(OUTPUT_CLASSES);
        sizes
    }

    /// Rejects values no run could train with.
    pub fn validate(&self) -> Result<(), MatGradError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(MatGradError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(MatGradError::InvalidConfig(format!(
                "momentum must lie in [0, 1), got {}",
                self.momentum
            )));
        }
        if self.batch_size == 0 {
            return Err(MatGradError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.hidden.contains(&0) {
            return Err(MatGradError::InvalidConfig(format!(
                "hidden layer sizes must be positive, got {:?}",
                self.hidden
            )));
        }
        Ok(())
    }
}

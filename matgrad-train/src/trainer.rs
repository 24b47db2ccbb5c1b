//! The MNIST training loop.

use crate::config::{OptimizerKind, TrainConfig};
use log::{info, warn};
use matgrad_core::nn::serialization::{load_weights, save_weights};
use matgrad_core::nn::{CrossEntropyLoss, Mlp, Module};
use matgrad_core::ops::loss::softmax;
use matgrad_core::optim::{NesterovOptimizer, Optimizer, SgdOptimizer};
use matgrad_core::{Graph, MatGradError, Matrix, NodeId};
use matgrad_data::datasets::{Mnist, Split};
use matgrad_data::{DataLoader, Dataset, RandomSampler, Sampler, SequentialSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Log a progress line every this many training batches.
const LOG_EVERY: usize = 100;

/// Sample-weighted loss and accuracy over one pass of a loader.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpochStats {
    pub loss: f64,
    pub accuracy: f64,
    pub samples: usize,
}

/// Outcome of [`fit`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSummary {
    pub train: Vec<EpochStats>,
    pub validation: Vec<EpochStats>,
    pub best_val_accuracy: f64,
}

/// Loads both MNIST splits from `config.data_dir` and trains on them.
pub fn run(config: &TrainConfig) -> Result<TrainSummary, MatGradError> {
    config.validate()?;
    info!("Loading MNIST from {}", config.data_dir.display());
    let train = Mnist::load_split(&config.data_dir, Split::Train)?;
    let validation = Mnist::load_split(&config.data_dir, Split::Test)?;

    let sampler: Box<dyn Sampler> = if config.shuffle {
        Box::new(RandomSampler::new(config.seed))
    } else {
        Box::new(SequentialSampler::new())
    };
    let train_loader = DataLoader::with_sampler(train, config.batch_size, sampler)?;
    let val_loader = DataLoader::new(validation, config.batch_size)?;
    fit(config, &train_loader, &val_loader)
}

/// Builds the model described by `config` and trains it for `config.epochs`.
///
/// Weights are written to `config.weights` each time validation accuracy
/// improves. With `config.resume` they are first loaded from that file.
pub fn fit<D1, S1, D2, S2>(
    config: &TrainConfig,
    train_loader: &DataLoader<D1, S1>,
    val_loader: &DataLoader<D2, S2>,
) -> Result<TrainSummary, MatGradError>
where
    D1: Dataset,
    S1: Sampler,
    D2: Dataset,
    S2: Sampler,
{
    config.validate()?;
    let input_features = train_loader.dataset().features();
    if val_loader.dataset().features() != input_features {
        return Err(MatGradError::InvalidData(format!(
            "training samples have {} features but validation samples have {}",
            input_features,
            val_loader.dataset().features()
        )));
    }

    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let model = Mlp::new(&mut graph, input_features, &config.layer_sizes(), &mut rng)?;
    info!(
        "Model {} -> {:?}: {} parameter matrices, {} weights",
        input_features,
        config.layer_sizes(),
        model.parameters().len(),
        model.num_weights(&graph)?
    );

    let mut best_val_accuracy = 0.0;
    if config.resume {
        load_weights(&mut graph, &model, &config.weights)?;
        best_val_accuracy = evaluate(&mut graph, &model, val_loader)?.accuracy;
        info!(
            "Resumed from {} (validation accuracy {:.2}%)",
            config.weights.display(),
            best_val_accuracy * 100.0
        );
    }

    let mut optimizer = build_optimizer(config, &graph, model.parameters())?;
    let mut summary = TrainSummary {
        train: Vec::with_capacity(config.epochs),
        validation: Vec::with_capacity(config.epochs),
        best_val_accuracy,
    };

    for epoch in 1..=config.epochs {
        let train = train_epoch(&mut graph, &model, optimizer.as_mut(), train_loader, epoch)?;
        info!(
            "Epoch {} - Train Loss: {:.4}, Train Acc: {:.2}% ({} samples)",
            epoch,
            train.loss,
            train.accuracy * 100.0,
            train.samples
        );

        let validation = evaluate(&mut graph, &model, val_loader)?;
        info!("Epoch {} - Val Acc: {:.2}%", epoch, validation.accuracy * 100.0);

        if validation.accuracy > summary.best_val_accuracy {
            summary.best_val_accuracy = validation.accuracy;
            save_weights(&graph, &model, &config.weights)?;
        }
        summary.train.push(train);
        summary.validation.push(validation);
    }

    info!(
        "Training complete. Best validation accuracy: {:.2}%",
        summary.best_val_accuracy * 100.0
    );
    Ok(summary)
}

pub fn build_optimizer(
    config: &TrainConfig,
    graph: &Graph,
    params: Vec<NodeId>,
) -> Result<Box<dyn Optimizer>, MatGradError> {
    Ok(match config.optimizer {
        OptimizerKind::Sgd => Box::new(SgdOptimizer::new(params, config.learning_rate)),
        OptimizerKind::Nesterov => Box::new(NesterovOptimizer::new(
            graph,
            params,
            config.learning_rate,
            config.momentum,
        )?),
    })
}

/// One optimisation pass over `loader`.
pub fn train_epoch<D: Dataset, S: Sampler>(
    graph: &mut Graph,
    model: &Mlp,
    optimizer: &mut dyn Optimizer,
    loader: &DataLoader<D, S>,
    epoch: usize,
) -> Result<EpochStats, MatGradError> {
    let loss_fn = CrossEntropyLoss::new();
    let num_batches = loader.num_batches();
    let mut totals = Totals::default();

    for (batch_idx, batch) in loader.iter().enumerate() {
        let (features, labels) = batch?;
        graph.reset();
        let x = graph.input(features);
        let logits = model.forward(graph, x)?;
        let loss = loss_fn.calculate(graph, logits, &labels)?;

        optimizer.zero_grad(graph)?;
        graph.backward(loss)?;
        optimizer.step(graph)?;

        let batch_loss = graph.item(loss)?;
        totals.add(batch_loss, count_correct(graph.data(logits)?, &labels), labels.len());

        if (batch_idx + 1) % LOG_EVERY == 0 {
            info!(
                "Epoch {} [{}/{}] Loss: {:.4}",
                epoch,
                batch_idx + 1,
                num_batches,
                batch_loss
            );
        }
    }
    graph.reset();
    Ok(totals.finish("training"))
}

/// Loss and accuracy of `model` over `loader`, without updating anything.
pub fn evaluate<D: Dataset, S: Sampler>(
    graph: &mut Graph,
    model: &Mlp,
    loader: &DataLoader<D, S>,
) -> Result<EpochStats, MatGradError> {
    let loss_fn = CrossEntropyLoss::new();
    let mut totals = Totals::default();
    for batch in loader.iter() {
        let (features, labels) = batch?;
        graph.reset();
        let x = graph.input(features);
        let logits = model.forward(graph, x)?;
        let loss = loss_fn.calculate(graph, logits, &labels)?;
        totals.add(
            graph.item(loss)?,
            count_correct(graph.data(logits)?, &labels),
            labels.len(),
        );
    }
    graph.reset();
    Ok(totals.finish("validation"))
}

/// Number of rows whose most probable class is the label.
pub fn count_correct(logits: &Matrix, labels: &[usize]) -> usize {
    let probs = softmax(logits);
    probs
        .rows()
        .into_iter()
        .zip(labels)
        .filter(|(row, label)| argmax(row.iter().copied()) == Some(**label))
        .count()
}

/// Index of the first maximum.
fn argmax(values: impl Iterator<Item = f64>) -> Option<usize> {
    values
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

#[derive(Default)]
struct Totals {
    loss: f64,
    correct: usize,
    samples: usize,
}

impl Totals {
    fn add(&mut self, mean_loss: f64, correct: usize, samples: usize) {
        self.loss += mean_loss * samples as f64;
        self.correct += correct;
        self.samples += samples;
    }

    fn finish(self, what: &str) -> EpochStats {
        if self.samples == 0 {
            warn!("no {} samples were seen", what);
            return EpochStats::default();
        }
        EpochStats {
            loss: self.loss / self.samples as f64,
            accuracy: self.correct as f64 / self.samples as f64,
            samples: self.samples,
        }
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;

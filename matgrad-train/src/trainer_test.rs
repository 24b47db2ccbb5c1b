use super::*;
use approx::assert_relative_eq;
use matgrad_core::tensor;
use std::path::PathBuf;

/// Two well separated classes in four raw-pixel features.
#[derive(Debug)]
struct Blobs(usize);

impl Dataset for Blobs {
    fn get(&self, index: usize) -> Result<(Matrix, usize), MatGradError> {
        let label = index % 2;
        let jitter = (index % 7) as f64 * 10.0;
        let hot = if label == 0 { [255.0, 0.0] } else { [0.0, 255.0] };
        let row = tensor::from_vec(vec![hot[0], hot[1], jitter, 128.0], 1, 4)?;
        Ok((row, label))
    }

    fn len(&self) -> usize {
        self.0
    }

    fn features(&self) -> usize {
        4
    }
}

fn temp_weights(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("matgrad-train-{}-{}.bin", name, std::process::id()))
}

fn blob_config(weights: PathBuf) -> TrainConfig {
    TrainConfig {
        learning_rate: 0.1,
        epochs: 15,
        batch_size: 8,
        hidden: vec![8],
        weights,
        seed: 3,
        ..TrainConfig::default()
    }
}

#[test]
fn test_count_correct() {
    let logits = tensor::from_vec(vec![2.0, 1.0, 0.0, 0.0, 3.0, 1.0, 5.0, 5.0, 1.0], 3, 3).unwrap();
    assert_eq!(count_correct(&logits, &[0, 1, 0]), 3);
    assert_eq!(count_correct(&logits, &[1, 1, 1]), 1);
}

#[test]
fn test_argmax_takes_first_maximum() {
    assert_eq!(argmax([1.0, 3.0, 3.0].into_iter()), Some(1));
    assert_eq!(argmax(std::iter::empty()), None);
}

#[test]
fn test_fit_learns_and_saves_best_weights() {
    let weights = temp_weights("fit");
    let config = blob_config(weights.clone());
    let train = DataLoader::with_sampler(Blobs(64), config.batch_size, RandomSampler::new(1)).unwrap();
    let val = DataLoader::new(Blobs(16), config.batch_size).unwrap();

    let summary = fit(&config, &train, &val).unwrap();
    assert_eq!(summary.train.len(), config.epochs);
    assert_eq!(summary.validation.len(), config.epochs);
    assert_eq!(summary.train[0].samples, 64);

    let first = summary.train[0].loss;
    let last = summary.train[config.epochs - 1].loss;
    assert!(last < first, "loss went from {} to {}", first, last);
    assert_relative_eq!(summary.best_val_accuracy, 1.0);
    assert!(weights.exists());

    // Resuming starts from the saved weights, which already classify perfectly.
    let resumed = TrainConfig {
        resume: true,
        epochs: 1,
        ..config
    };
    let summary = fit(&resumed, &train, &val).unwrap();
    assert_relative_eq!(summary.best_val_accuracy, 1.0);
    assert!(summary.validation[0].accuracy > 0.9);

    std::fs::remove_file(&weights).unwrap();
}

#[test]
fn test_fit_with_sgd() {
    let weights = temp_weights("sgd");
    let config = TrainConfig {
        optimizer: OptimizerKind::Sgd,
        learning_rate: 0.5,
        ..blob_config(weights.clone())
    };
    let train = DataLoader::new(Blobs(32), config.batch_size).unwrap();
    let val = DataLoader::new(Blobs(8), config.batch_size).unwrap();

    let summary = fit(&config, &train, &val).unwrap();
    assert!(summary.train[config.epochs - 1].loss < summary.train[0].loss);
    let _ = std::fs::remove_file(&weights);
}

#[test]
fn test_resume_without_weights_fails() {
    let config = TrainConfig {
        resume: true,
        ..blob_config(temp_weights("missing"))
    };
    let train = DataLoader::new(Blobs(8), 4).unwrap();
    let val = DataLoader::new(Blobs(8), 4).unwrap();
    assert!(matches!(fit(&config, &train, &val), Err(MatGradError::Io(_))));
}

#[test]
fn test_feature_mismatch_rejected() {
    #[derive(Debug)]
    struct Wide;
    impl Dataset for Wide {
        fn get(&self, _index: usize) -> Result<(Matrix, usize), MatGradError> {
            Ok((tensor::zeros(1, 5), 0))
        }
        fn len(&self) -> usize {
            2
        }
        fn features(&self) -> usize {
            5
        }
    }

    let config = blob_config(temp_weights("wide"));
    let train = DataLoader::new(Blobs(8), 4).unwrap();
    let val = DataLoader::new(Wide, 4).unwrap();
    assert!(matches!(fit(&config, &train, &val), Err(MatGradError::InvalidData(_))));
}

#[test]
fn test_evaluate_does_not_touch_parameters() {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    let model = Mlp::new(&mut graph, 4, &[3, 2], &mut rng).unwrap();
    let before: Vec<Matrix> = model
        .parameters()
        .iter()
        .map(|&p| graph.data(p).unwrap().clone())
        .collect();

    let loader = DataLoader::new(Blobs(10), 4).unwrap();
    let stats = evaluate(&mut graph, &model, &loader).unwrap();
    assert_eq!(stats.samples, 10);
    assert!(stats.loss.is_finite());

    for (param, old) in model.parameters().into_iter().zip(before) {
        assert_eq!(graph.data(param).unwrap(), &old);
    }
    assert_eq!(graph.tape_len(), 0);
}

#[test]
fn test_empty_loader_gives_default_stats() {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    let model = Mlp::new(&mut graph, 4, &[2], &mut rng).unwrap();
    let loader = DataLoader::new(Blobs(0), 4).unwrap();
    assert_eq!(evaluate(&mut graph, &model, &loader).unwrap(), EpochStats::default());
}

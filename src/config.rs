//! Training configuration.

use serde::{Deserialize, Serialize};

/// Hyperparameters of the word2vec training profile.
///
/// The defaults form a curated profile. `batch_size`, `min_word_freq`,
/// `dims`, and `context_size` can be overridden through the model builder;
/// the remaining parameters are fixed and forwarded verbatim to the
/// embedding engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word2VecConfig {
    /// Number of sentences per training batch.
    pub batch_size: usize,

    /// Minimum corpus frequency for a word to enter the vocabulary.
    pub min_word_freq: usize,

    /// Embedding dimensionality.
    pub dims: usize,

    /// Context window size.
    pub context_size: usize,

    /// Subsampling threshold for frequent words.
    pub subsample: f32,

    /// Use adaptive gradients.
    pub use_adagrad: bool,

    /// Number of training iterations.
    pub epochs: usize,

    /// Initial learning rate.
    pub lr: f32,

    /// Learning rate floor.
    pub min_lr: f32,

    /// Negative samples per positive example.
    pub negative_samples: usize,
}

impl Word2VecConfig {
    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the minimum word frequency.
    pub fn with_min_word_freq(mut self, min_word_freq: usize) -> Self {
        self.min_word_freq = min_word_freq;
        self
    }

    /// Set the embedding dimensionality.
    pub fn with_dims(mut self, dims: usize) -> Self {
        self.dims = dims;
        self
    }

    /// Set the context window size.
    pub fn with_context_size(mut self, context_size: usize) -> Self {
        self.context_size = context_size;
        self
    }
}

impl Default for Word2VecConfig {
    fn default() -> Self {
        Word2VecConfig {
            batch_size: 1000,
            min_word_freq: 5,
            dims: 300,
            context_size: 5,
            subsample: 1e-5,
            use_adagrad: false,
            epochs: 30,
            lr: 0.025,
            min_lr: 0.01,
            negative_samples: 10,
        }
    }
}

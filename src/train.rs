//! Model construction and training.

use std::path::Path;

use log::info;

use crate::config::Word2VecConfig;
use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::io::WriteModel;
use crate::metadata::Metadata;
use crate::storage::NdArray;
use crate::tokenizer::TokenizerFactory;
use crate::vocab::CountedVocab;

/// Embedding training engine.
///
/// The training algorithm lives behind this trait; implementations wrap
/// an external training library. `fit` blocks until training has run to
/// completion. The vector table and vocabulary accessors return `None`
/// until a fit has completed successfully.
pub trait EmbeddingEngine {
    /// Train on the given sentences, blocking until completion.
    fn fit<I>(
        &mut self,
        sentences: I,
        tokenizer: &TokenizerFactory,
        config: &Word2VecConfig,
    ) -> Result<()>
    where
        I: Iterator<Item = Result<String>>;

    /// Get the vector table of the fitted model.
    fn storage(&self) -> Option<&NdArray>;

    /// Get the vocabulary of the fitted model.
    fn vocab(&self) -> Option<&CountedVocab>;
}

/// A configured word2vec model.
///
/// Binds a training configuration, a tokenizer factory, and an embedding
/// engine. Construct through `Word2VecBuilder`, then call `train` or
/// `train_to`.
pub struct Word2Vec<E> {
    config: Word2VecConfig,
    tokenizer: TokenizerFactory,
    engine: E,
}

impl<E> Word2Vec<E>
where
    E: EmbeddingEngine,
{
    /// Get the training configuration.
    pub fn config(&self) -> &Word2VecConfig {
        &self.config
    }

    /// Get the tokenizer factory.
    pub fn tokenizer(&self) -> &TokenizerFactory {
        &self.tokenizer
    }

    /// Train the model on the given sentences.
    ///
    /// Blocks until the engine has run training to completion; there is
    /// no progress reporting and no cancellation. Failures from the
    /// engine, including malformed training input, propagate unchanged.
    pub fn train<I>(&mut self, sentences: I) -> Result<()>
    where
        I: Iterator<Item = Result<String>>,
    {
        info!(
            "Training word2vec model: {} dims, {} epochs",
            self.config.dims, self.config.epochs
        );

        self.engine.fit(sentences, &self.tokenizer, &self.config)
    }

    /// Train the model and persist it under the given base path.
    ///
    /// Returns the trained embeddings after writing them. Nothing is
    /// written when training fails; the error propagates.
    pub fn train_to<I, P>(&mut self, sentences: I, base: P) -> Result<Embeddings<CountedVocab, NdArray>>
    where
        I: Iterator<Item = Result<String>>,
        P: AsRef<Path>,
    {
        self.train(sentences)?;

        let embeddings = self.embeddings()?;
        embeddings.write_model(base)?;

        Ok(embeddings)
    }

    /// Get a snapshot of the trained embeddings.
    ///
    /// The snapshot pairs the engine's vector table with its vocabulary
    /// and carries the training configuration as metadata. Fails with
    /// `Error::Untrained` before a successful `train` call.
    pub fn embeddings(&self) -> Result<Embeddings<CountedVocab, NdArray>> {
        let storage = self.engine.storage().ok_or(Error::Untrained)?;
        let vocab = self.engine.vocab().ok_or(Error::Untrained)?;
        let metadata = Metadata::from_config(&self.config)?;

        Ok(Embeddings::new(
            Some(metadata),
            vocab.clone(),
            storage.clone(),
        ))
    }
}

/// Builder for `Word2Vec` models.
///
/// Starts from the curated default profile; only batch size, minimum
/// word frequency, dimensionality, and context window size can be
/// overridden.
#[derive(Clone, Copy, Debug, Default)]
pub struct Word2VecBuilder {
    config: Word2VecConfig,
}

impl Word2VecBuilder {
    pub fn new() -> Self {
        Word2VecBuilder {
            config: Word2VecConfig::default(),
        }
    }

    /// Set the number of sentences per training batch.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Set the minimum corpus frequency for vocabulary words.
    pub fn min_word_freq(mut self, min_word_freq: usize) -> Self {
        self.config.min_word_freq = min_word_freq;
        self
    }

    /// Set the embedding dimensionality.
    pub fn dims(mut self, dims: usize) -> Self {
        self.config.dims = dims;
        self
    }

    /// Set the context window size.
    pub fn context_size(mut self, context_size: usize) -> Self {
        self.config.context_size = context_size;
        self
    }

    /// Assemble a model from a tokenizer factory and an engine.
    pub fn build<E>(self, tokenizer: TokenizerFactory, engine: E) -> Word2Vec<E>
    where
        E: EmbeddingEngine,
    {
        Word2Vec {
            config: self.config,
            tokenizer,
            engine,
        }
    }
}

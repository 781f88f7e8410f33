//! Prelude exports the most commonly-used types and traits.

pub use crate::algebra::{add_vectors, mean_vectors, mult_vectors};

pub use crate::config::Word2VecConfig;

pub use crate::corpus::SentenceIterator;

pub use crate::embeddings::Embeddings;

pub use crate::error::{Error, Result};

pub use crate::io::{ReadModel, WriteModel};

pub use crate::metadata::Metadata;

pub use crate::preprocess::{
    CompositePreProcessor, LowerCasePreProcessor, SentencePreProcessor, TokenPreProcessor,
};

pub use crate::similarity::WordSimilarity;

pub use crate::storage::{NdArray, Storage};

pub use crate::text::WriteText;

pub use crate::tokenizer::{
    pattern_tokenizer, whitespace_tokenizer, TokenStream, TokenizerFactory,
};

pub use crate::train::{EmbeddingEngine, Word2Vec, Word2VecBuilder};

pub use crate::vocab::{CountedVocab, Vocab};

//! Sentence and token pre-processors.
//!
//! Pre-processors transform text before or during tokenization. They come
//! in two flavors: sentence-level transforms that run over a whole input
//! sentence, and token-level transforms that run over individual tokens.
//! Both are required to be pure: the output may only depend on the input.

/// Sentence-level text transform.
pub trait SentencePreProcessor: Send + Sync {
    /// Apply the transform to a sentence.
    fn process(&self, sentence: &str) -> String;
}

/// Token-level text transform.
pub trait TokenPreProcessor: Send + Sync {
    /// Apply the transform to a token.
    fn process(&self, token: &str) -> String;
}

/// Pre-processor that lowercases its input.
///
/// Implements both the sentence-level and the token-level transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowerCasePreProcessor;

impl SentencePreProcessor for LowerCasePreProcessor {
    fn process(&self, sentence: &str) -> String {
        sentence.to_lowercase()
    }
}

impl TokenPreProcessor for LowerCasePreProcessor {
    fn process(&self, token: &str) -> String {
        token.to_lowercase()
    }
}

/// Composition of sentence pre-processors.
///
/// Applies the pre-processors in list order, each consuming the output of
/// its predecessor. An empty composition is the identity transform.
#[derive(Default)]
pub struct CompositePreProcessor {
    processors: Vec<Box<dyn SentencePreProcessor>>,
}

impl CompositePreProcessor {
    /// Construct a composite pre-processor from the given pre-processors.
    pub fn new(processors: Vec<Box<dyn SentencePreProcessor>>) -> Self {
        CompositePreProcessor { processors }
    }

    /// Append a pre-processor to the composition.
    pub fn push(&mut self, processor: Box<dyn SentencePreProcessor>) {
        self.processors.push(processor);
    }
}

impl SentencePreProcessor for CompositePreProcessor {
    fn process(&self, sentence: &str) -> String {
        self.processors
            .iter()
            .fold(sentence.to_owned(), |sentence, processor| {
                processor.process(&sentence)
            })
    }
}

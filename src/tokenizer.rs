//! Tokenizing functions, token streams, and the tokenizer factory.
//!
//! A tokenizing function segments raw text into an ordered token sequence.
//! `TokenStream` wraps the materialized sequence behind a cursor interface
//! with an optional token pre-processor. `TokenizerFactory` produces token
//! streams from raw text or from a line-based reader.

use std::io::BufRead;
use std::sync::Arc;

use regex::Regex;

use crate::error::{Error, Result};
use crate::preprocess::TokenPreProcessor;

/// Tokenizing function: segments raw text into an ordered token sequence.
pub type TokenizeFn = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Tokenizing function that splits on ASCII whitespace.
pub fn whitespace_tokenizer() -> TokenizeFn {
    Arc::new(|text: &str| text.split_whitespace().map(ToOwned::to_owned).collect())
}

/// Tokenizing function that splits on a regular expression.
///
/// Empty fragments between adjacent matches are discarded.
pub fn pattern_tokenizer(pattern: &str) -> Result<TokenizeFn> {
    let regex = Regex::new(pattern)
        .map_err(|e| Error::Format(format!("Invalid tokenizer pattern '{}': {}", pattern, e)))?;

    Ok(Arc::new(move |text: &str| {
        regex
            .split(text)
            .filter(|fragment| !fragment.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }))
}

/// Cursor over a tokenized input.
///
/// The token sequence is materialized once, at construction. The stream is
/// not restartable; re-tokenize the input to iterate again.
pub struct TokenStream {
    tokens: Vec<String>,
    cursor: usize,
    pre_processor: Option<Arc<dyn TokenPreProcessor>>,
}

impl TokenStream {
    /// Tokenize `text` with the given tokenizing function.
    pub fn new(tokenize: &TokenizeFn, text: &str) -> Self {
        TokenStream {
            tokens: tokenize(text),
            cursor: 0,
            pre_processor: None,
        }
    }

    /// Returns `true` while the cursor has not consumed the last token.
    pub fn has_more_tokens(&self) -> bool {
        self.cursor < self.tokens.len()
    }

    /// Get the number of tokens left to consume.
    pub fn count_remaining(&self) -> usize {
        self.tokens.len() - self.cursor
    }

    /// Consume and return the token at the cursor.
    ///
    /// The installed token pre-processor, if any, is applied to the returned
    /// token. Reading past the last token is a precondition violation and
    /// returns `Error::Exhausted`.
    pub fn next_token(&mut self) -> Result<String> {
        if self.cursor >= self.tokens.len() {
            return Err(Error::Exhausted {
                consumed: self.cursor,
            });
        }

        let token = match self.pre_processor.as_ref() {
            Some(pre_processor) => pre_processor.process(&self.tokens[self.cursor]),
            None => self.tokens[self.cursor].clone(),
        };
        self.cursor += 1;

        Ok(token)
    }

    /// Get the full token list without moving the cursor.
    ///
    /// The installed token pre-processor, if any, is applied to every
    /// element.
    pub fn tokens(&self) -> Vec<String> {
        match self.pre_processor.as_ref() {
            Some(pre_processor) => self
                .tokens
                .iter()
                .map(|token| pre_processor.process(token))
                .collect(),
            None => self.tokens.clone(),
        }
    }

    /// Install a token pre-processor.
    ///
    /// Applies to all tokens returned after installation; unset means
    /// identity.
    pub fn set_pre_processor(&mut self, pre_processor: Arc<dyn TokenPreProcessor>) {
        self.pre_processor = Some(pre_processor);
    }
}

/// Factory for token streams over a fixed tokenizing function.
pub struct TokenizerFactory {
    tokenize: TokenizeFn,
    default_pre_processor: Option<Arc<dyn TokenPreProcessor>>,
}

impl TokenizerFactory {
    /// Construct a factory from a tokenizing function.
    pub fn new(tokenize: TokenizeFn) -> Self {
        TokenizerFactory {
            tokenize,
            default_pre_processor: None,
        }
    }

    /// Create a token stream over raw text.
    pub fn create(&self, text: &str) -> TokenStream {
        TokenStream::new(&self.tokenize, text)
    }

    /// Create a token stream over a line-based reader.
    ///
    /// All lines are joined with a single space before tokenization.
    pub fn create_from_reader<R>(&self, reader: R) -> Result<TokenStream>
    where
        R: BufRead,
    {
        let mut joined = String::new();
        for line in reader.lines() {
            let line = line.map_err(|e| Error::read_error("Cannot read input line", e))?;
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&line);
        }

        Ok(self.create(&joined))
    }

    /// Store a default token pre-processor.
    ///
    /// The stored default is *not* installed on streams this factory
    /// creates; they start without a pre-processor. Install one per stream
    /// with `TokenStream::set_pre_processor`.
    pub fn set_default_pre_processor(&mut self, pre_processor: Arc<dyn TokenPreProcessor>) {
        self.default_pre_processor = Some(pre_processor);
    }

    /// Get the stored default token pre-processor.
    pub fn default_pre_processor(&self) -> Option<&Arc<dyn TokenPreProcessor>> {
        self.default_pre_processor.as_ref()
    }
}

//! Sentence iteration over a corpus.

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::preprocess::SentencePreProcessor;

/// Iterator over the sentences of a line-based corpus.
///
/// Yields one sentence per line. An installed sentence pre-processor is
/// applied to every yielded sentence.
pub struct SentenceIterator<R> {
    reader: R,
    pre_processor: Option<Box<dyn SentencePreProcessor>>,
}

impl<R> SentenceIterator<R>
where
    R: BufRead,
{
    /// Construct a sentence iterator over a line-based reader.
    pub fn new(reader: R) -> Self {
        SentenceIterator {
            reader,
            pre_processor: None,
        }
    }

    /// Construct a sentence iterator that pre-processes every sentence.
    pub fn with_pre_processor(reader: R, pre_processor: Box<dyn SentencePreProcessor>) -> Self {
        SentenceIterator {
            reader,
            pre_processor: Some(pre_processor),
        }
    }
}

impl<R> Iterator for SentenceIterator<R>
where
    R: BufRead,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }

                match self.pre_processor.as_ref() {
                    Some(pre_processor) => Some(Ok(pre_processor.process(&line))),
                    None => Some(Ok(line)),
                }
            }
            Err(e) => Some(Err(Error::read_error("Cannot read sentence", e))),
        }
    }
}

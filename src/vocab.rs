//! Embedding vocabularies.

use std::fmt::{self, Display};
use std::io::{Read, Seek, Write};
use std::mem::size_of;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use fnv::FnvHashMap;

use crate::error::{Error, Result};
use crate::io::{ChunkIdentifier, ReadChunk, WriteChunk};

/// Embedding vocabularies.
pub trait Vocab {
    /// Get the index of a token.
    fn idx(&self, word: &str) -> Option<usize>;

    /// Get the number of words in the vocabulary.
    fn words_len(&self) -> usize;

    /// Get the words in the vocabulary.
    fn words(&self) -> &[String];
}

/// Vocabulary with word frequencies and corpus statistics.
///
/// Stores, per word, the number of occurrences in the training corpus,
/// along with the corpus document count. Read-only once constructed; a
/// deserialized instance is attached to a freshly loaded vector table at
/// load time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountedVocab {
    words: Vec<String>,
    indices: FnvHashMap<String, usize>,
    counts: Vec<u64>,
    n_documents: u64,
}

impl CountedVocab {
    /// Construct a counted vocabulary.
    ///
    /// Words are assigned indices in the given order.
    ///
    /// Panics when there are duplicate words.
    pub fn new(items: impl Into<Vec<(String, u64)>>, n_documents: u64) -> Self {
        let items = items.into();

        let mut words = Vec::with_capacity(items.len());
        let mut counts = Vec::with_capacity(items.len());
        let mut indices = FnvHashMap::default();
        for (idx, (word, count)) in items.into_iter().enumerate() {
            indices.insert(word.clone(), idx);
            words.push(word);
            counts.push(count);
        }

        assert_eq!(
            words.len(),
            indices.len(),
            "words contained duplicate entries."
        );

        CountedVocab {
            words,
            indices,
            counts,
            n_documents,
        }
    }

    /// Get the frequency of a word.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.idx(word).map(|idx| self.counts[idx])
    }

    /// Get the per-word frequencies, in word-index order.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Get the total number of word occurrences in the corpus.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Get the number of documents in the corpus.
    pub fn n_documents(&self) -> u64 {
        self.n_documents
    }

    /// Get the `n` most frequent words with their frequencies.
    ///
    /// Words are ordered by descending frequency; words of equal frequency
    /// are ordered lexically descending.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let mut ranked = self
            .words
            .iter()
            .zip(self.counts.iter())
            .map(|(word, &count)| (word.clone(), count))
            .collect::<Vec<_>>();
        ranked.sort_unstable_by(|(word1, count1), (word2, count2)| {
            count2.cmp(count1).then(word2.cmp(word1))
        });
        ranked.truncate(n);
        ranked
    }

    /// Summarize the vocabulary.
    pub fn summary(&self) -> VocabSummary {
        VocabSummary {
            words_len: self.words_len(),
            total_count: self.total_count(),
            n_documents: self.n_documents,
            top_words: self.top_n(10),
        }
    }
}

impl Vocab for CountedVocab {
    fn idx(&self, word: &str) -> Option<usize> {
        self.indices.get(word).cloned()
    }

    fn words_len(&self) -> usize {
        self.words.len()
    }

    fn words(&self) -> &[String] {
        &self.words
    }
}

/// Corpus statistics of a vocabulary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VocabSummary {
    /// Number of distinct words.
    pub words_len: usize,

    /// Total number of word occurrences.
    pub total_count: u64,

    /// Number of documents.
    pub n_documents: u64,

    /// The ten most frequent words with their frequencies.
    pub top_words: Vec<(String, u64)>,
}

impl Display for VocabSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} words, {} tokens, {} documents",
            self.words_len, self.total_count, self.n_documents
        )?;
        for (word, count) in &self.top_words {
            writeln!(f, "{} {}", word, count)?;
        }

        Ok(())
    }
}

impl ReadChunk for CountedVocab {
    fn read_chunk<R>(read: &mut R) -> Result<Self>
    where
        R: Read + Seek,
    {
        ChunkIdentifier::ensure_chunk_type(read, ChunkIdentifier::CountedVocab)?;

        // Read and discard chunk length.
        read.read_u64::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read vocabulary chunk length", e))?;

        let n_documents = read
            .read_u64::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read document count", e))?;

        let vocab_len = read
            .read_u64::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read vocabulary length", e))?
            as usize;

        let mut items = Vec::with_capacity(vocab_len);
        for _ in 0..vocab_len {
            let word_len = read
                .read_u32::<LittleEndian>()
                .map_err(|e| Error::read_error("Cannot read token length", e))?
                as usize;
            let mut bytes = vec![0; word_len];
            read.read_exact(&mut bytes)
                .map_err(|e| Error::read_error("Cannot read token", e))?;
            let word = String::from_utf8(bytes)
                .map_err(|e| Error::Format(format!("Token contains invalid UTF-8: {}", e)))?;
            let count = read
                .read_u64::<LittleEndian>()
                .map_err(|e| Error::read_error("Cannot read token frequency", e))?;
            items.push((word, count));
        }

        Ok(CountedVocab::new(items, n_documents))
    }
}

impl WriteChunk for CountedVocab {
    fn chunk_identifier(&self) -> ChunkIdentifier {
        ChunkIdentifier::CountedVocab
    }

    fn write_chunk<W>(&self, write: &mut W) -> Result<()>
    where
        W: Write + Seek,
    {
        // Chunk size: document count (u64), vocabulary size (u64), for each
        // word: word length in bytes (u32), word bytes (variable-length),
        // frequency (u64).
        let chunk_len = size_of::<u64>()
            + size_of::<u64>()
            + self
                .words
                .iter()
                .map(|w| w.len() + size_of::<u32>() + size_of::<u64>())
                .sum::<usize>();

        write
            .write_u32::<LittleEndian>(ChunkIdentifier::CountedVocab as u32)
            .map_err(|e| Error::write_error("Cannot write vocabulary chunk identifier", e))?;
        write
            .write_u64::<LittleEndian>(chunk_len as u64)
            .map_err(|e| Error::write_error("Cannot write vocabulary chunk length", e))?;
        write
            .write_u64::<LittleEndian>(self.n_documents)
            .map_err(|e| Error::write_error("Cannot write document count", e))?;
        write
            .write_u64::<LittleEndian>(self.words.len() as u64)
            .map_err(|e| Error::write_error("Cannot write vocabulary length", e))?;

        for (word, &count) in self.words.iter().zip(self.counts.iter()) {
            write
                .write_u32::<LittleEndian>(word.len() as u32)
                .map_err(|e| Error::write_error("Cannot write token length", e))?;
            write
                .write_all(word.as_bytes())
                .map_err(|e| Error::write_error("Cannot write token", e))?;
            write
                .write_u64::<LittleEndian>(count)
                .map_err(|e| Error::write_error("Cannot write token frequency", e))?;
        }

        Ok(())
    }
}

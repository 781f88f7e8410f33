//! Word embeddings.

use std::iter::Enumerate;
use std::slice;

use ndarray::{CowArray, Ix1};

use crate::metadata::Metadata;
use crate::storage::Storage;
use crate::vocab::Vocab;

/// Word embeddings.
///
/// This data structure pairs a vocabulary with an embedding matrix and
/// optional training metadata. It is the unit of persistence: saving a
/// model writes the matrix and the vocabulary as sibling artifacts, and
/// loading reattaches the vocabulary to the matrix.
#[derive(Debug)]
pub struct Embeddings<V, S> {
    metadata: Option<Metadata>,
    vocab: V,
    storage: S,
}

impl<V, S> Embeddings<V, S>
where
    V: Vocab,
    S: Storage,
{
    /// Construct embeddings from a vocabulary and a storage.
    ///
    /// Panics when the number of vocabulary words does not match the
    /// number of embedding matrix rows.
    pub fn new(metadata: Option<Metadata>, vocab: V, storage: S) -> Self {
        assert_eq!(
            vocab.words_len(),
            storage.shape().0,
            "Vocabulary and storage are inconsistent in length."
        );

        Embeddings {
            metadata,
            vocab,
            storage,
        }
    }

    /// Get the embedding of a word.
    pub fn embedding(&self, word: &str) -> Option<CowArray<f32, Ix1>> {
        self.vocab.idx(word).map(|idx| self.storage.embedding(idx))
    }

    /// Get the embedding dimensionality.
    pub fn dims(&self) -> usize {
        self.storage.dims()
    }

    /// Get an iterator over pairs of words and the corresponding embeddings.
    pub fn iter(&self) -> Iter<S> {
        Iter {
            storage: &self.storage,
            inner: self.vocab.words().iter().enumerate(),
        }
    }
}

impl<V, S> Embeddings<V, S> {
    /// Get the metadata.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Set the metadata, returning the old metadata.
    pub fn set_metadata(&mut self, metadata: Option<Metadata>) -> Option<Metadata> {
        std::mem::replace(&mut self.metadata, metadata)
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &V {
        &self.vocab
    }

    /// Get the embedding storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Decompose the embeddings into metadata, vocabulary, and storage.
    pub fn into_parts(self) -> (Option<Metadata>, V, S) {
        (self.metadata, self.vocab, self.storage)
    }
}

impl<'a, V, S> IntoIterator for &'a Embeddings<V, S>
where
    V: Vocab,
    S: Storage,
{
    type Item = (&'a str, CowArray<'a, f32, Ix1>);
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over words and their embeddings.
pub struct Iter<'a, S> {
    storage: &'a S,
    inner: Enumerate<slice::Iter<'a, String>>,
}

impl<'a, S> Iterator for Iter<'a, S>
where
    S: Storage,
{
    type Item = (&'a str, CowArray<'a, f32, Ix1>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(idx, word)| (word.as_str(), self.storage.embedding(idx)))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::Embeddings;
    use crate::storage::NdArray;
    use crate::vocab::CountedVocab;

    fn test_embeddings() -> Embeddings<CountedVocab, NdArray> {
        let vocab = CountedVocab::new(
            vec![("one".to_owned(), 3), ("two".to_owned(), 2)],
            1,
        );
        let storage = NdArray::new(arr2(&[[1f32, 0.], [0., 1.]]));
        Embeddings::new(None, vocab, storage)
    }

    #[test]
    fn embedding_lookup() {
        let embeddings = test_embeddings();
        assert_eq!(
            embeddings.embedding("two").unwrap().view(),
            arr1(&[0f32, 1.]).view()
        );
        assert!(embeddings.embedding("three").is_none());
    }

    #[test]
    fn iterates_words_in_vocabulary_order() {
        let embeddings = test_embeddings();
        let words = embeddings.iter().map(|(word, _)| word).collect::<Vec<_>>();
        assert_eq!(words, vec!["one", "two"]);
    }

    #[test]
    #[should_panic(expected = "inconsistent")]
    fn vocab_storage_length_mismatch_panics() {
        let vocab = CountedVocab::new(vec![("one".to_owned(), 1)], 1);
        let storage = NdArray::new(arr2(&[[1f32, 0.], [0., 1.]]));
        Embeddings::new(None, vocab, storage);
    }
}

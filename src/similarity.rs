//! Traits and trait implementations for similarity queries.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ordered_float::NotNan;

use crate::embeddings::Embeddings;
use crate::storage::Storage;
use crate::util::l2_normalize;
use crate::vocab::Vocab;

/// A word with its similarity to a query word.
#[derive(Debug, Eq, PartialEq)]
pub struct WordSimilarityResult<'a> {
    similarity: NotNan<f32>,
    word: &'a str,
}

impl<'a> WordSimilarityResult<'a> {
    /// Get the word's cosine similarity to the query.
    pub fn cosine_similarity(&self) -> f32 {
        self.similarity.into_inner()
    }

    pub fn word(&self) -> &str {
        self.word
    }
}

impl<'a> Ord for WordSimilarityResult<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.similarity.cmp(&self.similarity) {
            Ordering::Equal => self.word.cmp(other.word),
            ordering => ordering,
        }
    }
}

impl<'a> PartialOrd for WordSimilarityResult<'a> {
    fn partial_cmp(&self, other: &WordSimilarityResult) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Trait for word similarity queries.
pub trait WordSimilarity {
    /// Find words that are similar to the query word.
    ///
    /// The similarity between two words is the cosine similarity of their
    /// embeddings. The query word itself is excluded from the results. At
    /// most `limit` results are returned, most similar first.
    ///
    /// Returns `None` when the query word is not in the vocabulary.
    fn word_similarity<'a>(
        &'a self,
        word: &str,
        limit: usize,
    ) -> Option<Vec<WordSimilarityResult<'a>>>;
}

impl<V, S> WordSimilarity for Embeddings<V, S>
where
    V: Vocab,
    S: Storage,
{
    fn word_similarity<'a>(
        &'a self,
        word: &str,
        limit: usize,
    ) -> Option<Vec<WordSimilarityResult<'a>>> {
        let mut query = self.embedding(word)?.into_owned();
        l2_normalize(query.view_mut());

        let mut results = BinaryHeap::with_capacity(limit);
        for (other_word, embedding) in self.iter() {
            if other_word == word {
                continue;
            }

            let mut embedding = embedding.into_owned();
            l2_normalize(embedding.view_mut());

            let similarity = match NotNan::new(query.dot(&embedding)) {
                Ok(similarity) => similarity,
                Err(_) => continue,
            };

            results.push(WordSimilarityResult {
                similarity,
                word: other_word,
            });
            if results.len() > limit {
                results.pop();
            }
        }

        Some(results.into_sorted_vec())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    use super::WordSimilarity;
    use crate::embeddings::Embeddings;
    use crate::storage::NdArray;
    use crate::vocab::CountedVocab;

    fn test_embeddings() -> Embeddings<CountedVocab, NdArray> {
        let vocab = CountedVocab::new(
            vec![
                ("north".to_owned(), 4),
                ("south".to_owned(), 3),
                ("coffee".to_owned(), 2),
            ],
            1,
        );
        let storage = NdArray::new(arr2(&[
            [1f32, 0.1, 0.],
            [2f32, 0.2, 0.],
            [0f32, 0., 1.],
        ]));
        Embeddings::new(None, vocab, storage)
    }

    #[test]
    fn parallel_vector_ranks_first() {
        let embeddings = test_embeddings();
        let results = embeddings.word_similarity("north", 2).unwrap();
        assert_eq!(results[0].word(), "south");
        assert_abs_diff_eq!(results[0].cosine_similarity(), 1f32, epsilon = 1e-6);
        assert_eq!(results[1].word(), "coffee");
    }

    #[test]
    fn query_word_is_excluded() {
        let embeddings = test_embeddings();
        let results = embeddings.word_similarity("north", 3).unwrap();
        assert!(results.iter().all(|result| result.word() != "north"));
    }

    #[test]
    fn limit_caps_result_count() {
        let embeddings = test_embeddings();
        assert_eq!(embeddings.word_similarity("north", 1).unwrap().len(), 1);
    }

    #[test]
    fn unknown_query_word_gives_none() {
        let embeddings = test_embeddings();
        assert!(embeddings.word_similarity("tea", 2).is_none());
    }
}

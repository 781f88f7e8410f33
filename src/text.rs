//! Reader and writer for the text vector format.
//!
//! In this format, each line contains a word followed by its embedding.
//! The word and the embedding vector components are separated by a space:
//!
//! *word0 component_1 component_2 ... component_n*

use std::io::{BufRead, Write};

use itertools::Itertools;
use ndarray::Array2;

use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::storage::{NdArray, Storage};
use crate::vocab::Vocab;

/// Read a vector table in text format.
///
/// Returns the words in file order and the embedding matrix with one row
/// per word. All rows must agree on dimensionality.
pub fn read_text<R>(reader: &mut R) -> Result<(Vec<String>, NdArray)>
where
    R: BufRead,
{
    let mut words = Vec::new();
    let mut data = Vec::new();
    let mut dims = None;

    loop {
        let mut buf = Vec::new();
        match reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::read_error("Cannot read line from vector file", e))?
        {
            0 => break,
            n => {
                if buf[n - 1] == b'\n' {
                    buf.pop();
                }
            }
        };

        let line = String::from_utf8(buf)
            .map_err(|e| Error::Format(format!("Token contains invalid UTF-8: {}", e)))?;

        let mut parts = line
            .split(|c: char| c.is_ascii_whitespace())
            .filter(|part| !part.is_empty());

        let word = parts
            .next()
            .ok_or_else(|| Error::Format(String::from("Spurious empty line")))?;
        words.push(word.to_owned());

        let mut row_len = 0;
        for part in parts {
            data.push(part.parse::<f32>().map_err(|e| {
                Error::Format(format!("Cannot parse vector component '{}': {}", part, e))
            })?);
            row_len += 1;
        }

        match dims {
            Some(dims) => {
                if row_len != dims {
                    return Err(Error::Format(format!(
                        "Incorrect embedding dimensionality, expected: {}, got: {}",
                        dims, row_len
                    )));
                }
            }
            None => dims = Some(row_len),
        }
    }

    let dims = dims.unwrap_or_default();
    let matrix = Array2::from_shape_vec((words.len(), dims), data).map_err(Error::Shape)?;

    Ok((words, NdArray::new(matrix)))
}

/// Method to write embeddings in text format.
pub trait WriteText<W>
where
    W: Write,
{
    /// Write the embeddings to the given writer.
    fn write_text(&self, writer: &mut W) -> Result<()>;
}

impl<W, V, S> WriteText<W> for Embeddings<V, S>
where
    W: Write,
    V: Vocab,
    S: Storage,
{
    fn write_text(&self, write: &mut W) -> Result<()> {
        for (word, embedding) in self.iter() {
            let embed_str = embedding.view().iter().map(ToString::to_string).join(" ");
            writeln!(write, "{} {}", word, embed_str)
                .map_err(|e| Error::write_error("Cannot write word embedding", e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use approx::AbsDiffEq;
    use ndarray::arr2;

    use super::{read_text, WriteText};
    use crate::embeddings::Embeddings;
    use crate::storage::NdArray;
    use crate::vocab::{CountedVocab, Vocab};

    const TEST_TABLE: &str = "sea 1 0.5\nriver -0.25 1.5\n";

    #[test]
    fn reads_words_and_matrix() {
        let (words, storage) = read_text(&mut Cursor::new(TEST_TABLE)).unwrap();
        assert_eq!(words, vec!["sea", "river"]);
        assert!(storage
            .view()
            .abs_diff_eq(&arr2(&[[1f32, 0.5], [-0.25, 1.5]]).view(), 1e-6));
    }

    #[test]
    fn fails_on_ragged_rows() {
        assert!(read_text(&mut Cursor::new("sea 1 0.5\nriver -0.25\n")).is_err());
    }

    #[test]
    fn fails_on_empty_line() {
        assert!(read_text(&mut Cursor::new("sea 1 0.5\n\n")).is_err());
    }

    #[test]
    fn fails_on_invalid_utf8() {
        let data = b"se\xe9 1.0 0.5\n".to_vec();
        assert!(read_text(&mut Cursor::new(data)).is_err());
    }

    #[test]
    fn fails_on_unparseable_component() {
        assert!(read_text(&mut Cursor::new("sea one 0.5\n")).is_err());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let (words, storage) = read_text(&mut Cursor::new("")).unwrap();
        assert!(words.is_empty());
        assert_eq!(storage.view().nrows(), 0);
    }

    #[test]
    fn write_read_roundtrip() {
        let vocab = CountedVocab::new(
            vec![("sea".to_owned(), 2), ("river".to_owned(), 1)],
            1,
        );
        let storage = NdArray::new(arr2(&[[1f32, 0.5], [-0.25, 1.5]]));
        let embeddings = Embeddings::new(None, vocab, storage);

        let mut output = Vec::new();
        embeddings.write_text(&mut output).unwrap();

        let (words, storage) = read_text(&mut Cursor::new(output)).unwrap();
        assert_eq!(words, embeddings.vocab().words());
        assert!(storage
            .view()
            .abs_diff_eq(&embeddings.storage().view(), 1e-6));
    }
}

//! Binary chunk format and two-file model persistence.
//!
//! A model is persisted as two sibling artifacts derived from the same
//! base path: `<base>.vectors`, the vector table in text format, and
//! `<base>.vocab`, a chunk-framed binary file holding the vocabulary and
//! optional training metadata. The binary file starts with a magic and a
//! format version, so mismatched or foreign files are rejected at read
//! time.

use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::embeddings::Embeddings;
use crate::error::{Error, Result};
use crate::metadata::Metadata;
use crate::storage::NdArray;
use crate::text::{read_text, WriteText};
use crate::vocab::{CountedVocab, Vocab};

const MODEL_VERSION: u32 = 0;

const MAGIC: [u8; 4] = [b'F', b't', b'V', b'c'];

/// Extension of the text vector table artifact.
pub const VECTORS_EXT: &str = "vectors";

/// Extension of the binary vocabulary artifact.
pub const VOCAB_EXT: &str = "vocab";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ChunkIdentifier {
    Header = 0,
    Metadata = 1,
    CountedVocab = 2,
}

impl ChunkIdentifier {
    pub fn try_from(identifier: u32) -> Option<Self> {
        use self::ChunkIdentifier::*;

        match identifier {
            1 => Some(Metadata),
            2 => Some(CountedVocab),
            _ => None,
        }
    }

    /// Read and ensure that the chunk has the given identifier.
    pub fn ensure_chunk_type<R>(read: &mut R, identifier: ChunkIdentifier) -> Result<()>
    where
        R: Read,
    {
        let chunk_id = read
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read chunk identifier", e))?;
        let chunk_id = ChunkIdentifier::try_from(chunk_id)
            .ok_or_else(|| Error::Format(format!("Unknown chunk identifier: {}", chunk_id)))?;
        if chunk_id != identifier {
            return Err(Error::Format(format!(
                "Invalid chunk identifier, expected: {}, got: {}",
                identifier, chunk_id
            )));
        }

        Ok(())
    }
}

impl Display for ChunkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::ChunkIdentifier::*;

        match self {
            Header => write!(f, "Header"),
            Metadata => write!(f, "Metadata"),
            CountedVocab => write!(f, "CountedVocab"),
        }
    }
}

pub trait ReadChunk
where
    Self: Sized,
{
    fn read_chunk<R>(read: &mut R) -> Result<Self>
    where
        R: Read + Seek;
}

pub trait WriteChunk {
    /// Get the identifier of a chunk.
    fn chunk_identifier(&self) -> ChunkIdentifier;

    fn write_chunk<W>(&self, write: &mut W) -> Result<()>
    where
        W: Write + Seek;
}

#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Header {
    chunk_identifiers: Vec<ChunkIdentifier>,
}

impl Header {
    pub fn new(chunk_identifiers: impl Into<Vec<ChunkIdentifier>>) -> Self {
        Header {
            chunk_identifiers: chunk_identifiers.into(),
        }
    }

    pub fn chunk_identifiers(&self) -> &[ChunkIdentifier] {
        &self.chunk_identifiers
    }
}

impl WriteChunk for Header {
    fn chunk_identifier(&self) -> ChunkIdentifier {
        ChunkIdentifier::Header
    }

    fn write_chunk<W>(&self, write: &mut W) -> Result<()>
    where
        W: Write + Seek,
    {
        write
            .write_all(&MAGIC)
            .map_err(|e| Error::write_error("Cannot write magic", e))?;
        write
            .write_u32::<LittleEndian>(MODEL_VERSION)
            .map_err(|e| Error::write_error("Cannot write model version", e))?;
        write
            .write_u32::<LittleEndian>(self.chunk_identifiers.len() as u32)
            .map_err(|e| Error::write_error("Cannot write chunk identifiers length", e))?;

        for &identifier in &self.chunk_identifiers {
            write
                .write_u32::<LittleEndian>(identifier as u32)
                .map_err(|e| Error::write_error("Cannot write chunk identifier", e))?;
        }

        Ok(())
    }
}

impl ReadChunk for Header {
    fn read_chunk<R>(read: &mut R) -> Result<Self>
    where
        R: Read + Seek,
    {
        // Magic and version ceremony.
        let mut magic = [0u8; 4];
        read.read_exact(&mut magic)
            .map_err(|e| Error::read_error("Cannot read magic", e))?;

        if magic != MAGIC {
            return Err(Error::Format(format!(
                "Expected 'FtVc' as magic, got: {}",
                String::from_utf8_lossy(&magic).into_owned()
            )));
        }

        let version = read
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read model version", e))?;
        if version != MODEL_VERSION {
            return Err(Error::Format(format!(
                "Unknown model version: {}",
                version
            )));
        }

        // Read chunk identifiers.
        let chunk_identifiers_len = read
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read chunk identifiers length", e))?
            as usize;
        let mut chunk_identifiers = Vec::with_capacity(chunk_identifiers_len);
        for _ in 0..chunk_identifiers_len {
            let identifier = read
                .read_u32::<LittleEndian>()
                .map_err(|e| Error::read_error("Cannot read chunk identifier", e))?;
            let chunk_identifier = ChunkIdentifier::try_from(identifier)
                .ok_or_else(|| Error::Format(format!("Unknown chunk identifier: {}", identifier)))?;
            chunk_identifiers.push(chunk_identifier);
        }

        Ok(Header { chunk_identifiers })
    }
}

/// Build the path of a sibling artifact: `<base>.<ext>`.
fn artifact_path(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_os_string();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Method to persist a model as two sibling artifacts.
pub trait WriteModel {
    /// Write the vector table to `<base>.vectors` and the vocabulary,
    /// with metadata when present, to `<base>.vocab`.
    fn write_model<P>(&self, base: P) -> Result<()>
    where
        P: AsRef<Path>;
}

impl WriteModel for Embeddings<CountedVocab, NdArray> {
    fn write_model<P>(&self, base: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let vectors_path = artifact_path(base.as_ref(), VECTORS_EXT);
        let file = File::create(&vectors_path).map_err(|e| {
            Error::write_error(
                format!("Cannot create vector file '{}'", vectors_path.display()),
                e,
            )
        })?;
        let mut writer = BufWriter::new(file);
        self.write_text(&mut writer)?;
        writer
            .flush()
            .map_err(|e| Error::write_error("Cannot flush vector file", e))?;

        let vocab_path = artifact_path(base.as_ref(), VOCAB_EXT);
        let file = File::create(&vocab_path).map_err(|e| {
            Error::write_error(
                format!("Cannot create vocabulary file '{}'", vocab_path.display()),
                e,
            )
        })?;
        let mut writer = BufWriter::new(file);

        let chunks = match self.metadata() {
            Some(metadata) => vec![
                metadata.chunk_identifier(),
                self.vocab().chunk_identifier(),
            ],
            None => vec![self.vocab().chunk_identifier()],
        };
        Header::new(chunks).write_chunk(&mut writer)?;

        if let Some(metadata) = self.metadata() {
            metadata.write_chunk(&mut writer)?;
        }

        self.vocab().write_chunk(&mut writer)?;
        writer
            .flush()
            .map_err(|e| Error::write_error("Cannot flush vocabulary file", e))
    }
}

/// Method to load a model from its two sibling artifacts.
pub trait ReadModel
where
    Self: Sized,
{
    /// Read the vector table from `<base>.vectors`, the vocabulary from
    /// `<base>.vocab`, and attach the vocabulary to the vector table.
    ///
    /// Both artifacts must stem from the same `write_model` call; the
    /// word lists of the two files are required to agree, order included.
    fn read_model<P>(base: P) -> Result<Self>
    where
        P: AsRef<Path>;
}

impl ReadModel for Embeddings<CountedVocab, NdArray> {
    fn read_model<P>(base: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let vectors_path = artifact_path(base.as_ref(), VECTORS_EXT);
        let file = File::open(&vectors_path).map_err(|e| {
            Error::read_error(
                format!("Cannot open vector file '{}'", vectors_path.display()),
                e,
            )
        })?;
        let (words, storage) = read_text(&mut BufReader::new(file))?;

        let vocab_path = artifact_path(base.as_ref(), VOCAB_EXT);
        let file = File::open(&vocab_path).map_err(|e| {
            Error::read_error(
                format!("Cannot open vocabulary file '{}'", vocab_path.display()),
                e,
            )
        })?;
        let (metadata, vocab) = read_vocab_chunks(&mut BufReader::new(file))?;

        if words.as_slice() != vocab.words() {
            return Err(Error::Format(format!(
                "Vector and vocabulary files disagree: {} vector rows, {} vocabulary words",
                words.len(),
                vocab.words_len()
            )));
        }

        Ok(Embeddings::new(metadata, vocab, storage))
    }
}

fn read_vocab_chunks<R>(read: &mut R) -> Result<(Option<Metadata>, CountedVocab)>
where
    R: Read + Seek,
{
    let header = Header::read_chunk(read)?;

    match header.chunk_identifiers() {
        [ChunkIdentifier::CountedVocab] => Ok((None, CountedVocab::read_chunk(read)?)),
        [ChunkIdentifier::Metadata, ChunkIdentifier::CountedVocab] => {
            let metadata = Metadata::read_chunk(read)?;
            Ok((Some(metadata), CountedVocab::read_chunk(read)?))
        }
        chunks => Err(Error::Format(format!(
            "Invalid vocabulary chunk sequence: {:?}",
            chunks
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::{Cursor, Seek, SeekFrom};

    use approx::AbsDiffEq;
    use ndarray::arr2;
    use tempfile::tempdir;

    use super::{ChunkIdentifier, Header, ReadChunk, ReadModel, WriteChunk, WriteModel};
    use crate::config::Word2VecConfig;
    use crate::embeddings::Embeddings;
    use crate::error::Error;
    use crate::metadata::Metadata;
    use crate::storage::NdArray;
    use crate::vocab::{CountedVocab, Vocab};

    fn test_model() -> Embeddings<CountedVocab, NdArray> {
        let metadata = Metadata::from_config(&Word2VecConfig::default()).unwrap();
        let vocab = CountedVocab::new(
            vec![("sea".to_owned(), 3), ("river".to_owned(), 2)],
            1,
        );
        let storage = NdArray::new(arr2(&[[1f32, 0.5], [-0.25, 1.5]]));
        Embeddings::new(Some(metadata), vocab, storage)
    }

    #[test]
    fn header_write_read_roundtrip() {
        let check_header = Header::new(vec![
            ChunkIdentifier::Metadata,
            ChunkIdentifier::CountedVocab,
        ]);
        let mut cursor = Cursor::new(Vec::new());
        check_header.write_chunk(&mut cursor).unwrap();
        cursor.seek(SeekFrom::Start(0)).unwrap();
        let header = Header::read_chunk(&mut cursor).unwrap();
        assert_eq!(header, check_header);
    }

    #[test]
    fn header_rejects_foreign_magic() {
        let mut data = Vec::new();
        Header::new(vec![ChunkIdentifier::CountedVocab])
            .write_chunk(&mut Cursor::new(&mut data))
            .unwrap();
        data[0] = b'X';

        match Header::read_chunk(&mut Cursor::new(data)) {
            Err(Error::Format(desc)) => assert!(desc.contains("magic")),
            other => panic!("Expected format error, got: {:?}", other),
        }
    }

    #[test]
    fn header_rejects_unknown_version() {
        let mut data = Vec::new();
        Header::new(vec![ChunkIdentifier::CountedVocab])
            .write_chunk(&mut Cursor::new(&mut data))
            .unwrap();
        data[4] = 0xff;

        match Header::read_chunk(&mut Cursor::new(data)) {
            Err(Error::Format(desc)) => assert!(desc.contains("version")),
            other => panic!("Expected format error, got: {:?}", other),
        }
    }

    #[test]
    fn model_write_read_roundtrip() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("model");

        let check_model = test_model();
        check_model.write_model(&base).unwrap();

        let model = Embeddings::<CountedVocab, NdArray>::read_model(&base).unwrap();
        assert_eq!(model.vocab(), check_model.vocab());
        assert_eq!(model.metadata(), check_model.metadata());
        assert!(model
            .storage()
            .view()
            .abs_diff_eq(&check_model.storage().view(), 1e-6));
    }

    #[test]
    fn write_model_produces_sibling_artifacts() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("model");

        test_model().write_model(&base).unwrap();

        assert!(dir.path().join("model.vectors").is_file());
        assert!(dir.path().join("model.vocab").is_file());
    }

    #[test]
    fn read_model_rejects_mismatched_siblings() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("model");

        test_model().write_model(&base).unwrap();

        // Replace the vector table with one over different words.
        fs::write(dir.path().join("model.vectors"), "lake 1 0.5\npond -0.25 1.5\n").unwrap();

        match Embeddings::<CountedVocab, NdArray>::read_model(&base) {
            Err(Error::Format(desc)) => assert!(desc.contains("disagree")),
            other => panic!("Expected format error, got: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn read_model_fails_on_missing_artifact() {
        let dir = tempdir().unwrap();
        assert!(Embeddings::<CountedVocab, NdArray>::read_model(dir.path().join("absent")).is_err());
    }
}

//! Model metadata.

use std::io::{Read, Seek, Write};
use std::ops::{Deref, DerefMut};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use toml::Value;

use crate::config::Word2VecConfig;
use crate::error::{Error, Result};
use crate::io::{ChunkIdentifier, ReadChunk, WriteChunk};

/// Model metadata in TOML format.
///
/// Stores the training configuration alongside the vocabulary, so that a
/// loaded model carries the hyperparameters it was trained with.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    inner: Value,
}

impl Metadata {
    /// Construct new `Metadata`.
    pub fn new(inner: Value) -> Self {
        Metadata { inner }
    }

    /// Construct metadata from a training configuration.
    pub fn from_config(config: &Word2VecConfig) -> Result<Self> {
        let inner = Value::try_from(config).map_err(|e| {
            Error::Format(format!("Cannot serialize configuration to TOML: {}", e))
        })?;

        Ok(Metadata { inner })
    }

    /// Parse the metadata back into a training configuration.
    pub fn to_config(&self) -> Result<Word2VecConfig> {
        self.inner.clone().try_into().map_err(|e| {
            Error::Format(format!("Cannot deserialize configuration from TOML: {}", e))
        })
    }
}

impl Deref for Metadata {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Metadata {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<Value> for Metadata {
    fn from(inner: Value) -> Self {
        Metadata { inner }
    }
}

impl ReadChunk for Metadata {
    fn read_chunk<R>(read: &mut R) -> Result<Self>
    where
        R: Read + Seek,
    {
        ChunkIdentifier::ensure_chunk_type(read, ChunkIdentifier::Metadata)?;

        // Read chunk length.
        let chunk_len = read
            .read_u64::<LittleEndian>()
            .map_err(|e| Error::read_error("Cannot read chunk length", e))?
            as usize;

        // Read TOML data.
        let mut buf = vec![0; chunk_len];
        read.read_exact(&mut buf)
            .map_err(|e| Error::read_error("Cannot read TOML metadata", e))?;
        let buf_str = String::from_utf8(buf)
            .map_err(|e| Error::Format(format!("TOML metadata contains invalid UTF-8: {}", e)))?;

        Ok(Metadata::new(buf_str.parse::<Value>().map_err(|e| {
            Error::Format(format!("Cannot deserialize TOML metadata: {}", e))
        })?))
    }
}

impl WriteChunk for Metadata {
    fn chunk_identifier(&self) -> ChunkIdentifier {
        ChunkIdentifier::Metadata
    }

    fn write_chunk<W>(&self, write: &mut W) -> Result<()>
    where
        W: Write + Seek,
    {
        let metadata_str = self.inner.to_string();

        write
            .write_u32::<LittleEndian>(self.chunk_identifier() as u32)
            .map_err(|e| Error::write_error("Cannot write metadata chunk identifier", e))?;
        write
            .write_u64::<LittleEndian>(metadata_str.len() as u64)
            .map_err(|e| Error::write_error("Cannot write metadata length", e))?;
        write
            .write_all(metadata_str.as_bytes())
            .map_err(|e| Error::write_error("Cannot write metadata", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Seek, SeekFrom};

    use super::Metadata;
    use crate::config::Word2VecConfig;
    use crate::io::{ReadChunk, WriteChunk};

    fn test_metadata() -> Metadata {
        Metadata::from_config(&Word2VecConfig::default()).unwrap()
    }

    #[test]
    fn metadata_write_read_roundtrip() {
        let check_metadata = test_metadata();
        let mut cursor = Cursor::new(Vec::new());
        check_metadata.write_chunk(&mut cursor).unwrap();
        cursor.seek(SeekFrom::Start(0)).unwrap();
        let metadata = Metadata::read_chunk(&mut cursor).unwrap();
        assert_eq!(metadata, check_metadata);
    }

    #[test]
    fn config_roundtrips_through_metadata() {
        let config = Word2VecConfig::default().with_dims(100).with_batch_size(500);
        let metadata = Metadata::from_config(&config).unwrap();
        assert_eq!(metadata.to_config().unwrap(), config);
    }
}

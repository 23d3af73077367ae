//! Content digest (SHA-1 hash of file bytes)
//!
//! A digest is a 40-character lowercase hexadecimal string computed from the raw
//! bytes of a file. Two files with identical content always produce the same
//! digest, which is what staging uses to decide whether a file changed.
//!
//! ## Storage
//!
//! Blobs are stored in `.jit/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::DIGEST_LENGTH;
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// Digest of a byte sequence
///
/// Doubles as the key of the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Hash a byte sequence
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Parse and validate a digest from its hexadecimal form
    ///
    /// # Returns
    ///
    /// Validated digest or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != DIGEST_LENGTH {
            anyhow::bail!("Invalid digest length: {}", id.len());
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            anyhow::bail!("Invalid digest characters: {}", id);
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Write the digest in binary format (20 bytes)
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..DIGEST_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read a digest from binary format (20 bytes)
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut buffer = [0; DIGEST_LENGTH / 2];
        reader.read_exact(&mut buffer)?;

        let hex40 = buffer
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();

        Self::try_parse(hex40)
    }

    /// Location of the blob inside the objects directory, `ab/cdef...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the digest
    pub fn to_short_digest(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

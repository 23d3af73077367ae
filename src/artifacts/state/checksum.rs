use crate::artifacts::state::CHECKSUM_SIZE;
use anyhow::anyhow;
use bytes::Bytes;
use sha1::{Digest, Sha1};

/// Trailing SHA-1 over the state body
#[derive(Debug, Default, Clone)]
pub struct Checksum {
    digest: Sha1,
}

impl Checksum {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    /// Append the checksum of everything written so far
    pub(crate) fn seal(self, body: Vec<u8>) -> Bytes {
        let checksum = self.digest.finalize();

        let mut sealed = body;
        sealed.extend_from_slice(checksum.as_slice());
        Bytes::from(sealed)
    }

    /// Split off and check the trailing checksum, returning the body
    pub(crate) fn verify(data: Bytes) -> anyhow::Result<Bytes> {
        if data.len() < CHECKSUM_SIZE {
            return Err(anyhow!("Unexpected end-of-file while reading state"));
        }

        let body = data.slice(..data.len() - CHECKSUM_SIZE);
        let expected_checksum = &data[data.len() - CHECKSUM_SIZE..];

        let mut checksum = Checksum::new();
        checksum.update(&body);
        let actual_checksum = checksum.digest.finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(body)
    }
}

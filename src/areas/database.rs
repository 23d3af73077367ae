//! Blob store
//!
//! File contents are stored once per distinct digest under
//! `.jit/objects/<2 hex>/<38 hex>`, zlib-compressed. A blob is never rewritten
//! once it exists; commits and the index refer to blobs by digest.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::content_digest::ContentDigest;
use crate::artifacts::objects::object::Packable;
use crate::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, digest: &ContentDigest) -> bool {
        self.path.join(digest.to_path()).exists()
    }

    /// Store a blob unless one with the same digest already exists
    pub fn store(&self, blob: &Blob) -> crate::errors::Result<ContentDigest> {
        let digest = blob.digest();
        let object_path = self.path.join(digest.to_path());

        if object_path.exists() {
            return Ok(digest);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, blob.serialize()?)?;
        debug!(digest = %digest.to_short_digest(), size = blob.data().len(), "stored blob");

        Ok(digest)
    }

    /// Load the blob for `digest`, checking that its content still hashes to it
    pub fn load(&self, digest: &ContentDigest) -> crate::errors::Result<Blob> {
        let object_path = self.path.join(digest.to_path());

        if !object_path.exists() {
            return Err(RepositoryError::corrupted(format!("missing blob {digest}")));
        }

        let blob = Blob::new(self.read_object(object_path)?);
        if &blob.digest() != digest {
            return Err(RepositoryError::corrupted(format!(
                "blob {digest} does not match its content"
            )));
        }

        Ok(blob)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

use anyhow::{Context, Result};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Write a string prefixed by its length as a big-endian u32
pub(crate) fn write_text<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    let length = u32::try_from(text.len()).context("text field is too long to pack")?;
    writer.write_u32::<NetworkEndian>(length)?;
    writer.write_all(text.as_bytes())?;

    Ok(())
}

pub(crate) fn read_text<R: Read>(reader: &mut R) -> Result<String> {
    let length = reader
        .read_u32::<NetworkEndian>()
        .context("unexpected end of data while reading text length")?;

    let mut buffer = vec![0; length as usize];
    reader
        .read_exact(&mut buffer)
        .context("unexpected end of data while reading text")?;

    String::from_utf8(buffer).context("text field is not valid UTF-8")
}

// paths are always stored with `/` separators so state files travel between platforms
pub(crate) fn write_path<W: Write>(writer: &mut W, path: &Path) -> Result<()> {
    let text = path
        .components()
        .map(|component| {
            component
                .as_os_str()
                .to_str()
                .with_context(|| format!("path {} is not valid UTF-8", path.display()))
        })
        .collect::<Result<Vec<_>>>()?
        .join("/");

    write_text(writer, &text)
}

pub(crate) fn read_path<R: Read>(reader: &mut R) -> Result<PathBuf> {
    let text = read_text(reader)?;
    if text.is_empty() {
        anyhow::bail!("empty path in packed data");
    }

    Ok(text.split('/').collect())
}

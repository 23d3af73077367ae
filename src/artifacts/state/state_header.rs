use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
}

impl Default for StateHeader {
    fn default() -> Self {
        StateHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
        }
    }
}

impl StateHeader {
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.marker != SIGNATURE {
            return Err(anyhow!("Invalid state file signature"));
        }

        if self.version != VERSION {
            return Err(anyhow!("Unsupported state file version: {}", self.version));
        }

        Ok(())
    }
}

impl Packable for StateHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<NetworkEndian>(self.version)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for StateHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut marker = [0u8; 4];
        reader
            .read_exact(&mut marker)
            .map_err(|_| anyhow!("Invalid header size"))?;

        let marker = String::from_utf8(marker.to_vec())
            .map_err(|_| anyhow!("Invalid marker in state header"))?;
        let version = reader.read_u32::<NetworkEndian>()?;

        Ok(StateHeader { marker, version })
    }
}

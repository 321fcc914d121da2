use std::fmt;
use std::io;

use anchor_lang::prelude::*;

use crate::errors::{ClientError, ClientResult};

/// Campaign category.
///
/// On the wire this is a borsh enum (single `u8` variant index).
/// `Unknown` exists only for the read path: an out-of-range index
/// decodes to it instead of failing the whole record, so a campaign
/// with an unrecognized category still renders. It is deliberately
/// not encodable, and [`Category::from_label`] rejects unrecognized
/// strings, so `Unknown` can never be written back to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Environment,
    Education,
    Healthcare,
    Technology,
    Community,
    Arts,
    Unknown,
}

const WIRE_VARIANTS: [Category; 6] = [
    Category::Environment,
    Category::Education,
    Category::Healthcare,
    Category::Technology,
    Category::Community,
    Category::Arts,
];

impl Category {
    pub fn from_wire_index(index: u8) -> Self {
        WIRE_VARIANTS
            .get(index as usize)
            .copied()
            .unwrap_or(Category::Unknown)
    }

    pub fn wire_index(&self) -> Option<u8> {
        WIRE_VARIANTS.iter().position(|c| c == self).map(|i| i as u8)
    }

    /// Parses a user-supplied label, case-insensitively.
    pub fn from_label(label: &str) -> ClientResult<Self> {
        match label.to_ascii_lowercase().as_str() {
            "environment" => Ok(Category::Environment),
            "education" => Ok(Category::Education),
            "healthcare" => Ok(Category::Healthcare),
            "technology" => Ok(Category::Technology),
            "community" => Ok(Category::Community),
            "arts" => Ok(Category::Arts),
            other => Err(ClientError::UnknownCategory(other.to_owned())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Environment => "Environment",
            Category::Education => "Education",
            Category::Healthcare => "Healthcare",
            Category::Technology => "Technology",
            Category::Community => "Community",
            Category::Arts => "Arts",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl AnchorSerialize for Category {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        let index = self.wire_index().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "unknown category is not encodable")
        })?;
        writer.write_all(&[index])
    }
}

impl AnchorDeserialize for Category {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let mut index = [0u8; 1];
        reader.read_exact(&mut index)?;
        Ok(Category::from_wire_index(index[0]))
    }
}

//! Binary archive of the ordered baseline.
//!
//! The byte layout is whatever `bincode` produces for the map; it is only
//! read back by the same build.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::Result;
use crate::store::OrderedIndex;

pub fn to_bytes(map: &OrderedIndex) -> Result<Vec<u8>> {
    Ok(bincode::serialize(map)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<OrderedIndex> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn save_to_file(map: &OrderedIndex, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    bincode::serialize_into(writer, map)?;
    Ok(())
}

pub fn load_from_file(path: impl AsRef<Path>) -> Result<OrderedIndex> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

//! The record-store seam: field sequences read and written by address.
//!
//! The physical database file is owned by an external store. This module
//! defines the interface the codec is used against, free functions that
//! compose the two, and an in-memory store for tests and headless use.
//!
//! The deleted flag travels asymmetrically: a read delivers it as the
//! trailing eighth raw field, while a write persists it through its own
//! call. [`save`] keeps the two writes together.

use std::collections::HashMap;
use std::io;

use crate::record::Occupancy;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no record at address {0}")]
    NotFound(u64),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Storage for occupancy records, addressed by byte offset.
///
/// Implementations own the physical layout: seeking, fixed-width padding,
/// and the leading deleted-flag byte. An address, once assigned, stays
/// stable for the life of the record.
pub trait RecordStore {
    /// Reads the ordered field strings of the record at `address`,
    /// including the deleted-flag byte as the trailing field.
    fn read_fields_at(&self, address: u64) -> Result<Vec<String>>;

    /// Writes the ordered field strings of the record at `address`.
    /// The deleted flag is not part of this sequence.
    fn write_fields_at(&mut self, address: u64, fields: &[String]) -> Result<()>;

    /// Writes the deleted-flag byte of the record at `address`.
    fn write_deleted_flag_at(&mut self, address: u64, flag: u8) -> Result<()>;
}

/// Reads and decodes the record at `address`.
pub fn load(store: &impl RecordStore, address: u64) -> Result<Occupancy> {
    let fields = store.read_fields_at(address)?;
    Ok(Occupancy::from_fields(address, &fields))
}

/// Encodes and writes a record: its seven wire fields, then its deleted
/// flag through the separate flag channel.
pub fn save(store: &mut impl RecordStore, record: &Occupancy) -> Result<()> {
    store.write_fields_at(record.address(), &record.to_wire_fields())?;
    store.write_deleted_flag_at(record.address(), record.deleted())
}

/// In-memory record store.
///
/// Tracks field sequences and deleted flags per address in `HashMap`s,
/// with none of the physical file concerns. Useful for exercising decode
/// and encode end to end without a database file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    fields: HashMap<u64, Vec<String>>,
    flags: HashMap<u64, u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn read_fields_at(&self, address: u64) -> Result<Vec<String>> {
        let mut fields = self
            .fields
            .get(&address)
            .cloned()
            .ok_or(StoreError::NotFound(address))?;
        // The flag byte rides along as the eighth raw field, the way the
        // physical reader delivers it.
        let flag = self.flags.get(&address).copied().unwrap_or(0);
        fields.push(String::from(char::from(flag)));
        Ok(fields)
    }

    fn write_fields_at(&mut self, address: u64, fields: &[String]) -> Result<()> {
        self.fields.insert(address, fields.to_vec());
        Ok(())
    }

    fn write_deleted_flag_at(&mut self, address: u64, flag: u8) -> Result<()> {
        if !self.fields.contains_key(&address) {
            return Err(StoreError::NotFound(address));
        }
        self.flags.insert(address, flag);
        Ok(())
    }
}

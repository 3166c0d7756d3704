//! Streaming archive engine — writer and reader.
//!
//! # On-disk layout
//! ```text
//! u32 slot_count
//! u32 slot[0..slot_count)   // 0 = empty, else byte offset of a record
//! record*                   // u32 data_size, u32 name_size,
//!                           // name[name_size], data[data_size]
//! ```
//!
//! # Writer
//! [`PakWriter`] makes two passes over the slot-table region and one over
//! record data: record offsets are unknowable before serialization, so a
//! zeroed placeholder table goes out first, records stream sequentially
//! while their start offsets are collected, and `finalize()` seeks back
//! and overwrites the reserved region with the real offsets.  A failure
//! anywhere leaves the output partially written and unreadable; nothing
//! is cleaned up.
//!
//! # Reader
//! [`PakReader`] loads the slot table up front, then visits occupied
//! slots in ascending slot order.  The first decode failure aborts the
//! traversal; side effects already produced by earlier slots stand.
//!
//! # Endianness
//! All integers are unsigned 32-bit little-endian regardless of host
//! byte order.  No runtime negotiation is ever performed.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{PakError, Result};
use crate::record::{self, Record};
use crate::slot_table::SlotTable;

// ── Writer ───────────────────────────────────────────────────────────────────

pub struct PakWriter<W: Write + Seek> {
    writer: W,
    capacity: u32,
    offsets: Vec<u32>,
}

impl<W: Write + Seek> PakWriter<W> {
    /// Reserve a `capacity`-slot placeholder table at offset 0.
    pub fn new(mut writer: W, capacity: u32) -> Result<Self> {
        writer.seek(SeekFrom::Start(0))?;
        SlotTable::write_placeholder(&mut writer, capacity)?;
        Ok(Self {
            writer,
            capacity,
            offsets: Vec::new(),
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn file_count(&self) -> usize {
        self.offsets.len()
    }

    /// Append one record and remember its start offset for `finalize`.
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<()> {
        if self.offsets.len() as u32 == self.capacity {
            return Err(PakError::SlotTableFull {
                capacity: self.capacity,
            });
        }
        let offset = record::encode(&mut self.writer, name, data)?;
        let offset = u32::try_from(offset).map_err(|_| PakError::SizeOverflow {
            what: "record offset",
            len: offset,
        })?;
        self.offsets.push(offset);
        Ok(())
    }

    /// Rewrite the slot table with the collected offsets.  Must be called
    /// exactly once, after the last `add_file`; slots beyond the number of
    /// records added keep their placeholder zeros.
    pub fn finalize(&mut self) -> Result<()> {
        SlotTable::rewrite(&mut self.writer, &self.offsets)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ── Reader ───────────────────────────────────────────────────────────────────

pub struct PakReader<R: Read + Seek> {
    reader: R,
    stream_len: u64,
    pub table: SlotTable,
}

impl<R: Read + Seek> PakReader<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        let table = SlotTable::read(&mut reader, stream_len)?;
        Ok(Self {
            reader,
            stream_len,
            table,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.table.len()
    }

    pub fn file_count(&self) -> usize {
        self.table.occupied().count()
    }

    /// A record can never legally start inside the slot table region.
    fn checked_offset(&self, offset: u32) -> Result<u32> {
        if u64::from(offset) < self.table.record_region_start() {
            return Err(PakError::Corrupt("slot offset points inside the slot table"));
        }
        Ok(offset)
    }

    /// The name of every occupied slot, ascending slot order.  Record data
    /// is never read on this path.
    pub fn names(&mut self) -> Result<Vec<String>> {
        let offsets: Vec<u32> = self.table.occupied().collect();
        let mut names = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let offset = self.checked_offset(offset)?;
            names.push(record::decode_name(&mut self.reader, offset, self.stream_len)?);
        }
        Ok(names)
    }

    /// Decode the full record stored at `offset`.
    pub fn read_record(&mut self, offset: u32) -> Result<Record> {
        let offset = self.checked_offset(offset)?;
        record::decode(&mut self.reader, offset, self.stream_len)
    }

    /// Decode every occupied slot in ascending slot order and hand each
    /// record to `visit`.  The first failure — decode or visitor — aborts
    /// the traversal; records already visited keep whatever side effects
    /// `visit` produced.
    pub fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, &[u8]) -> Result<()>,
    {
        let offsets: Vec<u32> = self.table.occupied().collect();
        for offset in offsets {
            let rec = self.read_record(offset)?;
            visit(&rec.name, &rec.data)?;
        }
        Ok(())
    }
}

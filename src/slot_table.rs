use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{read_u32_field, PakError, Result};

/// Slots reserved in a fresh archive even when fewer files are packed, so
/// tools that regenerate the archive later have room to grow the index
/// without relocating the record region.
pub const DEFAULT_MIN_CAPACITY: u32 = 3176;

/// A zero slot is unused. The table itself occupies file offset 0 onward,
/// so no record can legitimately start there.
pub const EMPTY_SLOT: u32 = 0;

/// The archive index: a fixed-length array of u32 record offsets stored at
/// the head of the file, preceded by its own length.
#[derive(Debug, Clone)]
pub struct SlotTable {
    pub slots: Vec<u32>,
}

impl SlotTable {
    /// Capacity policy at creation time: the configured minimum, or the
    /// exact file count once it exceeds that minimum (no extra slack).
    pub fn capacity_for(file_count: usize, min_capacity: u32) -> Result<u32> {
        let count = u32::try_from(file_count).map_err(|_| PakError::SizeOverflow {
            what: "slot count",
            len: file_count as u64,
        })?;
        Ok(count.max(min_capacity))
    }

    /// Bytes occupied by a table of `capacity` slots, count field included.
    pub fn region_len(capacity: u32) -> u64 {
        4 + 4 * u64::from(capacity)
    }

    /// First byte past the table region — the lowest offset at which a
    /// record may legally start.
    pub fn record_region_start(&self) -> u64 {
        Self::region_len(self.slots.len() as u32)
    }

    pub fn read<R: Read>(reader: &mut R, stream_len: u64) -> Result<Self> {
        let count = read_u32_field(reader, "slot count")?;
        if Self::region_len(count) > stream_len {
            return Err(PakError::Corrupt("slot table extends past end of file"));
        }
        let mut slots = Vec::with_capacity(count as usize);
        for _ in 0..count {
            slots.push(read_u32_field(reader, "slot table entry")?);
        }
        Ok(Self { slots })
    }

    /// Pass one of archive creation: the count followed by all-zero slots,
    /// overwritten by [`SlotTable::rewrite`] once record offsets are known.
    pub fn write_placeholder<W: Write>(writer: &mut W, capacity: u32) -> Result<()> {
        writer.write_u32::<LittleEndian>(capacity)?;
        writer.write_all(&vec![0u8; capacity as usize * 4])?;
        Ok(())
    }

    /// Pass two: seek back to the start of the slot array and overwrite the
    /// first `offsets.len()` slots. Slots past that keep their placeholder
    /// zeros.
    pub fn rewrite<W: Write + Seek>(writer: &mut W, offsets: &[u32]) -> Result<()> {
        writer.seek(SeekFrom::Start(4))?;
        for &offset in offsets {
            writer.write_u32::<LittleEndian>(offset)?;
        }
        Ok(())
    }

    /// Offsets of the occupied slots, ascending slot order.
    pub fn occupied(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().copied().filter(|&s| s != EMPTY_SLOT)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

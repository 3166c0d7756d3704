use byteorder::{LittleEndian, ReadBytesExt};
use std::io;
use thiserror::Error;

/// Everything that can go wrong while reading or writing a `.pak` archive.
#[derive(Error, Debug)]
pub enum PakError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A size-prefixed field declared more bytes than the file can supply,
    /// a fixed-size header came up short, or a slot offset points somewhere
    /// a record cannot legally live.
    #[error("corrupt archive: {0}")]
    Corrupt(&'static str),

    #[error("slot table full: all {capacity} slots are occupied")]
    SlotTableFull { capacity: u32 },

    #[error("{what} of {len} bytes does not fit in a 32-bit field")]
    SizeOverflow { what: &'static str, len: u64 },
}

pub type Result<T> = std::result::Result<T, PakError>;

/// `read_exact` reports truncation as `UnexpectedEof`; for this format a
/// short read of a declared field means the archive is corrupt, not that
/// the OS failed.
pub(crate) fn read_exact_field<R: io::Read>(
    reader: &mut R,
    buf: &mut [u8],
    what: &'static str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PakError::Corrupt(what),
        _ => PakError::Io(e),
    })
}

/// Little-endian u32 read with the same truncation-is-corruption policy.
pub(crate) fn read_u32_field<R: io::Read>(reader: &mut R, what: &'static str) -> Result<u32> {
    reader.read_u32::<LittleEndian>().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => PakError::Corrupt(what),
        _ => PakError::Io(e),
    })
}

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{read_exact_field, read_u32_field, PakError, Result};

/// One archived file, decoded.
///
/// On disk a record is `u32 data_size, u32 name_size, name[name_size],
/// data[data_size]` — back to back, no padding, no terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub data: Vec<u8>,
}

/// Bytes a record occupies on disk: two size fields plus both payloads.
pub fn encoded_len(name: &str, data: &[u8]) -> u64 {
    8 + name.len() as u64 + data.len() as u64
}

fn checked_u32(len: usize, what: &'static str) -> Result<u32> {
    u32::try_from(len).map_err(|_| PakError::SizeOverflow { what, len: len as u64 })
}

/// Write one record at the current stream position and return the offset
/// it started at — the value that goes into its slot.
pub fn encode<W: Write + Seek>(writer: &mut W, name: &str, data: &[u8]) -> Result<u64> {
    let offset = writer.stream_position()?;
    writer.write_u32::<LittleEndian>(checked_u32(data.len(), "record data")?)?;
    writer.write_u32::<LittleEndian>(checked_u32(name.len(), "record name")?)?;
    writer.write_all(name.as_bytes())?;
    writer.write_all(data)?;
    Ok(offset)
}

/// Seek to `offset`, read both size fields, and bounds-check the record
/// they describe against `stream_len` before anything is allocated.
fn decode_header<R: Read + Seek>(
    reader: &mut R,
    offset: u32,
    stream_len: u64,
) -> Result<(u32, u32)> {
    let offset = u64::from(offset);
    if offset + 8 > stream_len {
        return Err(PakError::Corrupt("record header past end of file"));
    }
    reader.seek(SeekFrom::Start(offset))?;
    let data_size = read_u32_field(reader, "record data size")?;
    let name_size = read_u32_field(reader, "record name size")?;
    if offset + 8 + u64::from(name_size) + u64::from(data_size) > stream_len {
        return Err(PakError::Corrupt("record extends past end of file"));
    }
    Ok((data_size, name_size))
}

fn read_name<R: Read>(reader: &mut R, name_size: u32) -> Result<String> {
    let mut name = vec![0u8; name_size as usize];
    read_exact_field(reader, &mut name, "record name")?;
    String::from_utf8(name).map_err(|_| PakError::Corrupt("record name is not valid UTF-8"))
}

/// Decode the full record stored at `offset`.
pub fn decode<R: Read + Seek>(reader: &mut R, offset: u32, stream_len: u64) -> Result<Record> {
    let (data_size, name_size) = decode_header(reader, offset, stream_len)?;
    let name = read_name(reader, name_size)?;
    let mut data = vec![0u8; data_size as usize];
    read_exact_field(reader, &mut data, "record data")?;
    Ok(Record { name, data })
}

/// Listing path: decode only the name. The data region is never read but
/// still has to fit inside the file, so a record truncated anywhere fails
/// here too.
pub fn decode_name<R: Read + Seek>(reader: &mut R, offset: u32, stream_len: u64) -> Result<String> {
    let (_, name_size) = decode_header(reader, offset, stream_len)?;
    read_name(reader, name_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn encode_reports_start_offset() {
        let mut cur = Cursor::new(Vec::new());
        cur.seek(SeekFrom::Start(20)).unwrap();
        let offset = encode(&mut cur, "a.txt", b"hi").unwrap();
        assert_eq!(offset, 20);
        assert_eq!(cur.position(), 20 + encoded_len("a.txt", b"hi"));
    }

    #[test]
    fn decode_roundtrip() {
        let mut cur = Cursor::new(Vec::new());
        let offset = encode(&mut cur, "sub/dir/file.txt", b"payload").unwrap();
        let len = cur.get_ref().len() as u64;
        let rec = decode(&mut cur, offset as u32, len).unwrap();
        assert_eq!(rec.name, "sub/dir/file.txt");
        assert_eq!(rec.data, b"payload");
        assert_eq!(
            decode_name(&mut cur, offset as u32, len).unwrap(),
            "sub/dir/file.txt"
        );
    }

    #[test]
    fn truncated_data_is_corrupt() {
        let mut cur = Cursor::new(Vec::new());
        encode(&mut cur, "a.txt", b"hello world").unwrap();
        let full = cur.get_ref().len() as u64;
        // Chop three bytes off the data region.
        let mut cur = Cursor::new(cur.into_inner());
        assert!(matches!(
            decode(&mut cur, 0, full - 3),
            Err(PakError::Corrupt(_))
        ));
        assert!(matches!(
            decode_name(&mut cur, 0, full - 3),
            Err(PakError::Corrupt(_))
        ));
    }

    #[test]
    fn non_utf8_name_is_corrupt() {
        let mut bytes = Vec::new();
        bytes.write_u32::<LittleEndian>(0).unwrap(); // data_size
        bytes.write_u32::<LittleEndian>(2).unwrap(); // name_size
        bytes.extend_from_slice(&[0xff, 0xfe]);
        let len = bytes.len() as u64;
        let mut cur = Cursor::new(bytes);
        assert!(matches!(decode(&mut cur, 0, len), Err(PakError::Corrupt(_))));
    }
}

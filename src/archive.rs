//! High-level [`Archive`] API — the primary embedding surface.
//!
//! ```no_run
//! use slotpak::archive::{Archive, PackOptions};
//!
//! // Write
//! let mut ar = Archive::create("out.pak", 1, PackOptions::default())?;
//! ar.add_file("readme.txt", b"Hello, world!")?;
//! ar.finalize()?;
//!
//! // Read
//! let mut ar = Archive::open("out.pak")?;
//! assert_eq!(ar.list()?, vec!["readme.txt".to_string()]);
//! # Ok::<(), slotpak::PakError>(())
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{PakError, Result};
use crate::io_stream::{PakReader, PakWriter};
use crate::paths::ensure_parent_dirs;
use crate::slot_table::{SlotTable, DEFAULT_MIN_CAPACITY};

// ── PackOptions ───────────────────────────────────────────────────────────────

/// Configuration for [`Archive::create`].
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Minimum slot count allocated at creation time.  Archives with fewer
    /// files keep the spare slots as zeroed slack; archives with more get
    /// exactly one slot per file.
    pub min_capacity: u32,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            min_capacity: DEFAULT_MIN_CAPACITY,
        }
    }
}

// ── ArchiveMode ───────────────────────────────────────────────────────────────

enum ArchiveMode {
    Read(PakReader<File>),
    Write(PakWriter<File>),
}

// ── Archive ───────────────────────────────────────────────────────────────────

pub struct Archive {
    path: PathBuf,
    mode: ArchiveMode,
}

impl Archive {
    // ── Constructors ─────────────────────────────────────────────────────────

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let reader = PakReader::new(File::open(&path)?)?;
        Ok(Self {
            path,
            mode: ArchiveMode::Read(reader),
        })
    }

    /// Create a fresh archive sized for `expected_files` inputs, or the
    /// configured minimum capacity, whichever is larger.  Any existing file
    /// at `path` is overwritten.
    pub fn create<P: AsRef<Path>>(
        path: P,
        expected_files: usize,
        opts: PackOptions,
    ) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let capacity = SlotTable::capacity_for(expected_files, opts.min_capacity)?;
        let writer = PakWriter::new(File::create(&path)?, capacity)?;
        Ok(Self {
            path,
            mode: ArchiveMode::Write(writer),
        })
    }

    // ── Write ─────────────────────────────────────────────────────────────────

    pub fn add_file(&mut self, name: &str, data: &[u8]) -> Result<()> {
        match &mut self.mode {
            ArchiveMode::Write(w) => w.add_file(name, data),
            ArchiveMode::Read(_) => Err(read_only()),
        }
    }

    /// Rewrite the slot table with final offsets.  Must be called once.
    pub fn finalize(&mut self) -> Result<()> {
        match &mut self.mode {
            ArchiveMode::Write(w) => w.finalize(),
            ArchiveMode::Read(_) => Err(read_only()),
        }
    }

    // ── Read ──────────────────────────────────────────────────────────────────

    /// Record names in slot order.  Data regions are never read.
    pub fn list(&mut self) -> Result<Vec<String>> {
        match &mut self.mode {
            ArchiveMode::Read(r) => r.names(),
            ArchiveMode::Write(_) => Err(write_only()),
        }
    }

    /// Visit every record in slot order with its full data.
    pub fn for_each_entry<F>(&mut self, visit: F) -> Result<()>
    where
        F: FnMut(&str, &[u8]) -> Result<()>,
    {
        match &mut self.mode {
            ArchiveMode::Read(r) => r.for_each_entry(visit),
            ArchiveMode::Write(_) => Err(write_only()),
        }
    }

    /// Extract every record under `dest`, creating parent directories as
    /// the record names require.  Slot order; files written before a later
    /// slot fails stay on disk.
    pub fn extract_to<P: AsRef<Path>>(&mut self, dest: P) -> Result<()> {
        self.extract_to_with(dest, |_| {})
    }

    /// Extraction with a callback invoked before each file is written; the
    /// CLI uses it to interleave listing with extraction per record.
    pub fn extract_to_with<P, F>(&mut self, dest: P, mut before_write: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&str),
    {
        let dest = dest.as_ref();
        self.for_each_entry(|name, data| {
            before_write(name);
            let target = dest.join(name);
            ensure_parent_dirs(&target)?;
            File::create(&target)?.write_all(data)?;
            Ok(())
        })
    }

    // ── Metadata ─────────────────────────────────────────────────────────────

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total slots in the table, occupied or not.
    pub fn slot_count(&self) -> usize {
        match &self.mode {
            ArchiveMode::Read(r) => r.slot_count(),
            ArchiveMode::Write(w) => w.capacity() as usize,
        }
    }

    /// Occupied slots only.
    pub fn file_count(&self) -> usize {
        match &self.mode {
            ArchiveMode::Read(r) => r.file_count(),
            ArchiveMode::Write(w) => w.file_count(),
        }
    }
}

fn read_only() -> PakError {
    PakError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "archive is read-only",
    ))
}

fn write_only() -> PakError {
    PakError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        "archive is write-only",
    ))
}

pub mod archive;
pub mod error;
pub mod io_stream;
pub mod paths;
pub mod record;
pub mod slot_table;

pub use archive::{Archive, PackOptions};
pub use error::{PakError, Result};
pub use io_stream::{PakReader, PakWriter};
pub use record::Record;
pub use slot_table::{SlotTable, DEFAULT_MIN_CAPACITY};

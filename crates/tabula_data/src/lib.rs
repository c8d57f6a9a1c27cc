pub mod error;
pub mod format;
pub mod sector;
pub mod session;
pub mod source;

pub use error::DataError;
pub use sector::{
    CellFormat, ColumnSpec, FilterSpec, ID_FIELD, Sector, SectorSchema,
};
pub use session::{SESSION_FILE, Session, SessionStore, project_dirs};
pub use source::{JsonDirSource, MockSource, RecordSource};

use tabula_data::{DataError, Sector};
use tabula_list::DynRecord;

/// What the list view's callbacks report back to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// A row was activated; carries the record's identifier
    RowOpened(String),
    SelectionChanged(usize),
    PageChanged(usize),
}

/// Everything that reaches the main loop from outside the key handler
#[derive(Debug)]
pub enum AppEvent {
    List(ListEvent),
    Loaded {
        request: u64,
        sector: Sector,
        result: Result<Vec<DynRecord>, DataError>,
    },
}

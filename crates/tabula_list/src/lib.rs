pub mod column;
pub mod filter;
pub mod list_view;
pub mod paginate;
pub mod record;
pub mod selection;
pub mod sort;
pub mod value;

pub use column::{CellRenderer, ColumnDescriptor, Columns};
pub use filter::{
    FilterDescriptor, FilterOption, FilterValue, filter, matches_search,
};
pub use list_view::{HeaderCell, ListPage, ListRow, ListView};
pub use paginate::{Page, PageMarker, Pagination, page_window, paginate};
pub use record::{DynRecord, KeyExtractor, Record, field_key};
pub use selection::SelectionTracker;
pub use sort::{SortDirection, SortSpec, sort};
pub use value::Value;

/// Page size used when the caller does not choose one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the pager when the caller does not choose any
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

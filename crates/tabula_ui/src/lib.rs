pub mod handlers;
pub mod widgets;

pub use handlers::{ListNavigation, handle_search_filter_input};
pub use widgets::*;

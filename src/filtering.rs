use tracing::debug;

use crate::app::App;

impl App<'_> {
    /// Apply the search box's query to the list
    pub fn apply_search(&mut self) {
        let query = self.search_filter.query().to_string();
        self.apply_search_query(&query);
    }

    /// Empty the search box and show every record again
    pub fn clear_search(&mut self) {
        self.search_filter.cancel();
        self.apply_search_query("");
    }

    fn apply_search_query(&mut self, query: &str) {
        self.list.set_search(query);
        self.clamp_cursor();
    }

    /// Moves the filter focus along the filter bar, wrapping back to no
    /// focus after the last filter
    pub fn focus_next_filter(&mut self) {
        let count = self.list.filters().len();
        self.focused_filter = match self.focused_filter {
            _ if count == 0 => None,
            None => Some(0),
            Some(idx) if idx + 1 < count => Some(idx + 1),
            Some(_) => None,
        };
        if let Some(filter) =
            self.focused_filter.and_then(|idx| self.list.filters().get(idx))
        {
            self.status_line.set_message(format!(
                "{}: v to change, f for the next filter",
                filter.name
            ));
        }
    }

    /// Advances the focused filter to its next option, focusing the first
    /// filter when none is
    pub fn cycle_focused_filter(&mut self) {
        if self.list.filters().is_empty() {
            self.status_line.set_message("This sector has no filters");
            return;
        }
        let idx = *self.focused_filter.get_or_insert(0);
        self.list.cycle_filter(idx);
        if let Some(filter) = self.list.filters().get(idx) {
            debug!(filter = %filter.name, value = %filter.value(), "filter set");
            self.status_line
                .set_message(format!("{}: {}", filter.name, filter.label()));
        }
        self.clamp_cursor();
    }

    /// Puts every filter back to "All"
    pub fn clear_filters(&mut self) {
        self.list.reset_filters();
        self.focused_filter = None;
        self.status_line.set_message("Filters cleared");
        self.clamp_cursor();
    }
}

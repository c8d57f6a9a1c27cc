use tracing::debug;

use crate::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS,
    column::Columns,
    filter::{FilterDescriptor, FilterValue, filter},
    paginate::{PageMarker, Pagination, paginate},
    record::{KeyExtractor, Record},
    selection::SelectionTracker,
    sort::{SortDirection, SortSpec, sort},
};

type RowClickFn<R> = Box<dyn FnMut(&R) + Send>;
type SelectionChangeFn = Box<dyn FnMut(&[String]) + Send>;
type PageChangeFn = Box<dyn FnMut(usize) + Send>;

/// Header of one column as the pager-side UI needs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    /// Direction when this column is the active sort key
    pub sort: Option<SortDirection>,
}

impl HeaderCell {
    /// `▲`/`▼` on the sorted column, `⇅` on other sortable columns
    #[must_use]
    pub const fn indicator(&self) -> &'static str {
        match self.sort {
            Some(direction) => direction.indicator(),
            None if self.sortable => "⇅",
            None => "",
        }
    }
}

/// One rendered row of the current page
#[derive(Debug)]
pub struct ListRow<'a, R> {
    pub id: String,
    pub record: &'a R,
    pub cells: Vec<String>,
    pub selected: bool,
}

/// Everything a renderer needs for one frame of the list
#[derive(Debug)]
pub struct ListPage<'a, R> {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<ListRow<'a, R>>,
    pub pagination: Pagination,
    pub page_window: Vec<PageMarker>,
    pub filters: &'a [FilterDescriptor],
    pub search: &'a str,
    pub page_size_options: &'a [usize],
    pub loading: bool,
    pub all_visible_selected: bool,
    pub all_matching_selected: bool,
    pub selected_matching: usize,
    pub selected_total: usize,
}

impl<R> ListPage<'_, R> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pagination.is_empty()
    }
}

/// A searchable, filterable, sortable, paginated and selectable list of
/// records.
///
/// Rendering always runs filter, then sort, then paginate, so page counts
/// and ranges describe the filtered set.
pub struct ListView<R> {
    records: Vec<R>,
    columns: Columns<R>,
    key_extractor: KeyExtractor<R>,
    search_fields: Vec<String>,
    search: String,
    filters: Vec<FilterDescriptor>,
    sort: Option<SortSpec>,
    current_page: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
    selection: SelectionTracker,
    loading: bool,
    on_row_click: Option<RowClickFn<R>>,
    on_selection_change: Option<SelectionChangeFn>,
    on_page_change: Option<PageChangeFn>,
}

impl<R> std::fmt::Debug for ListView<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("records", &self.records.len())
            .field("columns", &self.columns.len())
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("current_page", &self.current_page)
            .field("page_size", &self.page_size)
            .field("selection", &self.selection)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<R: Record> ListView<R> {
    /// Creates a list over `records`. Search covers every column until
    /// [`ListView::with_search_fields`] narrows it.
    pub fn new(
        records: Vec<R>,
        columns: impl Into<Columns<R>>,
        key_extractor: KeyExtractor<R>,
    ) -> Self {
        let columns = columns.into();
        let search_fields =
            columns.iter().map(|column| column.key.clone()).collect();
        Self {
            records,
            columns,
            key_extractor,
            search_fields,
            search: String::new(),
            filters: Vec::new(),
            sort: None,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            selection: SelectionTracker::new(),
            loading: false,
            on_row_click: None,
            on_selection_change: None,
            on_page_change: None,
        }
    }

    #[must_use]
    pub fn with_search_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FilterDescriptor>) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        debug_assert!(page_size >= 1, "page size must be at least 1");
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        let mut options: Vec<usize> =
            options.into_iter().filter(|size| *size >= 1).collect();
        options.sort_unstable();
        options.dedup();
        if !options.is_empty() {
            self.page_size_options = options;
        }
        self
    }

    pub fn on_row_click(&mut self, f: impl FnMut(&R) + Send + 'static) {
        self.on_row_click = Some(Box::new(f));
    }

    pub fn on_selection_change(
        &mut self,
        f: impl FnMut(&[String]) + Send + 'static,
    ) {
        self.on_selection_change = Some(Box::new(f));
    }

    pub fn on_page_change(&mut self, f: impl FnMut(usize) + Send + 'static) {
        self.on_page_change = Some(Box::new(f));
    }

    // Accessors

    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub const fn columns(&self) -> &Columns<R> {
        &self.columns
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterDescriptor] {
        &self.filters
    }

    #[must_use]
    pub const fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Identifier of `record` according to the key extractor
    pub fn key_of(&self, record: &R) -> String {
        (self.key_extractor)(record)
    }

    // Pipeline

    /// Filtered then sorted records
    #[must_use]
    pub fn matching(&self) -> Vec<&R> {
        let filtered = filter(
            &self.records,
            &self.search,
            &self.search_fields,
            &self.filters,
        );
        sort(&filtered, self.sort.as_ref())
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.match_count(), self.page_size, self.current_page)
    }

    fn match_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| {
                crate::filter::matches_search(
                    *record,
                    &self.search,
                    &self.search_fields,
                ) && self.filters.iter().all(|f| f.matches(*record))
            })
            .count()
    }

    /// Records on the current page
    #[must_use]
    pub fn visible(&self) -> Vec<&R> {
        let matching = self.matching();
        paginate(&matching, self.page_size, self.current_page)
            .items
            .to_vec()
    }

    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.visible().into_iter().map(|r| self.key_of(r)).collect()
    }

    #[must_use]
    pub fn matching_ids(&self) -> Vec<String> {
        self.matching().into_iter().map(|r| self.key_of(r)).collect()
    }

    /// Builds the frame for the current state
    #[must_use]
    pub fn view(&self) -> ListPage<'_, R> {
        let matching = self.matching();
        let page = paginate(&matching, self.page_size, self.current_page);

        let headers = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                header: column.header.clone(),
                sortable: column.sortable,
                sort: self
                    .sort
                    .as_ref()
                    .filter(|spec| spec.key == column.key)
                    .map(|spec| spec.direction),
            })
            .collect();

        let rows: Vec<ListRow<'_, R>> = page
            .items
            .iter()
            .map(|record| {
                let id = self.key_of(record);
                ListRow {
                    selected: self.selection.is_selected(&id),
                    id,
                    record: *record,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| column.render(record))
                        .collect(),
                }
            })
            .collect();

        let visible_ids: Vec<&str> =
            rows.iter().map(|row| row.id.as_str()).collect();
        let matching_ids: Vec<String> =
            matching.iter().map(|record| self.key_of(record)).collect();

        ListPage {
            headers,
            all_visible_selected: self.selection.is_all_selected(&visible_ids),
            all_matching_selected: self
                .selection
                .is_all_selected(&matching_ids),
            selected_matching: self.selection.selected_in(&matching_ids).len(),
            selected_total: self.selection.len(),
            rows,
            pagination: page.pagination,
            page_window: page.pagination.window(),
            filters: &self.filters,
            search: &self.search,
            page_size_options: &self.page_size_options,
            loading: self.loading,
        }
    }

    // Transitions

    /// Changes the search term; a new term starts again from page 1
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search {
            return;
        }
        debug!(search = %term, "search changed");
        self.search = term;
        self.go_to_page(1);
    }

    /// Sets the value of the filter called `name`. Unknown filters and
    /// disallowed values are ignored. Returns whether anything changed.
    pub fn set_filter(&mut self, name: &str, value: FilterValue) -> bool {
        let Some(descriptor) =
            self.filters.iter_mut().find(|filter| filter.name == name)
        else {
            return false;
        };
        if descriptor.value() == &value || !descriptor.set(value) {
            return false;
        }
        debug!(filter = name, value = %descriptor.value(), "filter changed");
        self.go_to_page(1);
        true
    }

    /// Advances the filter at `index` to its next option
    pub fn cycle_filter(&mut self, index: usize) {
        let Some(descriptor) = self.filters.get_mut(index) else {
            return;
        };
        descriptor.cycle();
        debug!(
            filter = %descriptor.name,
            value = %descriptor.value(),
            "filter cycled"
        );
        self.go_to_page(1);
    }

    pub fn reset_filters(&mut self) {
        if !self.filters.iter().any(FilterDescriptor::is_active) {
            return;
        }
        self.filters.iter_mut().for_each(FilterDescriptor::reset);
        debug!("filters reset");
        self.go_to_page(1);
    }

    /// Sets or removes the sort. The page and selection are kept.
    pub fn set_sort(&mut self, spec: Option<SortSpec>) {
        if let Some(spec) = &spec
            && !self.columns.get(&spec.key).is_some_and(|c| c.sortable)
        {
            return;
        }
        debug!(sort = ?spec, "sort changed");
        self.sort = spec;
    }

    /// Header click: the active key flips direction, another sortable key
    /// becomes the ascending sort key
    pub fn toggle_sort(&mut self, key: &str) {
        let next = match &self.sort {
            Some(spec) if spec.key == key => SortSpec {
                key: spec.key.clone(),
                direction: spec.direction.reversed(),
            },
            Some(_) | None => SortSpec::ascending(key),
        };
        self.set_sort(Some(next));
    }

    /// Moves to `page`, clamped into range. The selection is kept.
    pub fn set_page(&mut self, page: usize) {
        self.go_to_page(page);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(usize::MAX);
    }

    /// Changes the page size and returns to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        debug_assert!(page_size >= 1, "page size must be at least 1");
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return;
        }
        debug!(page_size, "page size changed");
        self.page_size = page_size;
        self.go_to_page(1);
    }

    /// Steps through the page size options, wrapping at either end
    pub fn cycle_page_size(&mut self, forward: bool) {
        let options = &self.page_size_options;
        let Some(last) = options.last().copied() else {
            return;
        };
        let next = if forward {
            options
                .iter()
                .copied()
                .find(|size| *size > self.page_size)
                .or_else(|| options.first().copied())
        } else {
            options
                .iter()
                .rev()
                .copied()
                .find(|size| *size < self.page_size)
                .or(Some(last))
        };
        if let Some(size) = next {
            self.set_page_size(size);
        }
    }

    pub fn toggle_selection(&mut self, id: &str) {
        self.selection.toggle(id);
        self.selection_changed();
    }

    /// Header checkbox for the current page
    pub fn select_all_visible(&mut self) {
        let ids = self.visible_ids();
        if self.selection.select_all(&ids) {
            self.selection_changed();
        }
    }

    /// Select every record matching the current search and filters
    pub fn select_all_matching(&mut self) {
        let ids = self.matching_ids();
        if self.selection.select_all(&ids) {
            self.selection_changed();
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.selection_changed();
    }

    /// Row click on the `index`-th row of the current page
    pub fn activate_row(&mut self, index: usize) -> bool {
        let matching = filter(
            &self.records,
            &self.search,
            &self.search_fields,
            &self.filters,
        );
        let sorted = sort(&matching, self.sort.as_ref());
        let page = paginate(&sorted, self.page_size, self.current_page);
        let Some(record) = page.items.get(index).copied() else {
            return false;
        };
        if let Some(on_row_click) = self.on_row_click.as_mut() {
            on_row_click(record);
        }
        true
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Swaps in a new record source and returns every piece of view
    /// state to its initial value. Filter options are rebuilt from the
    /// distinct values of the new records.
    pub fn replace_records(&mut self, records: Vec<R>) {
        debug!(count = records.len(), "records replaced");
        self.records = records;
        self.search.clear();
        self.filters = self
            .filters
            .iter()
            .map(|f| {
                FilterDescriptor::from_records(&f.name, &f.field, &self.records)
            })
            .collect();
        self.sort = None;
        self.go_to_page(1);
        if !self.selection.is_empty() {
            self.selection.clear();
            self.selection_changed();
        }
    }

    fn go_to_page(&mut self, requested: usize) {
        let page = Pagination::new(self.match_count(), self.page_size, requested)
            .current_page;
        if page == self.current_page {
            return;
        }
        debug!(from = self.current_page, to = page, "page changed");
        self.current_page = page;
        if let Some(on_page_change) = self.on_page_change.as_mut() {
            on_page_change(page);
        }
    }

    fn selection_changed(&mut self) {
        let ids = self.selection.selected_ids();
        debug!(selected = ids.len(), "selection changed");
        if let Some(on_selection_change) = self.on_selection_change.as_mut() {
            on_selection_change(&ids);
        }
    }
}

use std::{collections::HashSet, fmt, sync::Arc};

use crate::record::Record;

/// Custom cell formatting for one column
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Describes how one field of a record is labeled and rendered
pub struct ColumnDescriptor<R> {
    pub key: String,
    pub header: String,
    pub renderer: Option<CellRenderer<R>>,
    pub sortable: bool,
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("renderer", &self.renderer.is_some())
            .field("sortable", &self.sortable)
            .finish()
    }
}

impl<R: Record> ColumnDescriptor<R> {
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            renderer: None,
            sortable: false,
        }
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn with_renderer(
        mut self,
        renderer: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Cell text for `record`, through the custom renderer when present
    pub fn render(&self, record: &R) -> String {
        self.renderer.as_ref().map_or_else(
            || record.field(&self.key).to_string(),
            |render| render(record),
        )
    }
}

/// The column set of one list view, with unique keys
pub struct Columns<R> {
    columns: Vec<ColumnDescriptor<R>>,
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}

impl<R> Columns<R> {
    /// Builds the column set. A repeated key is a caller bug: debug builds
    /// panic, release builds keep the first column with that key.
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor<R>>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(columns.len());
        for column in columns {
            if seen.insert(column.key.clone()) {
                unique.push(column);
            } else {
                debug_assert!(false, "duplicate column key `{}`", column.key);
                tracing::warn!(key = %column.key, "dropping duplicate column");
            }
        }
        Self { columns: unique }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ColumnDescriptor<R>> {
        self.columns.iter().find(|column| column.key == key)
    }

    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.key == key)
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&ColumnDescriptor<R>> {
        self.columns.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor<R>> {
        self.columns.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<R> From<Vec<ColumnDescriptor<R>>> for Columns<R> {
    fn from(columns: Vec<ColumnDescriptor<R>>) -> Self {
        Self::new(columns)
    }
}

impl<'a, R> IntoIterator for &'a Columns<R> {
    type Item = &'a ColumnDescriptor<R>;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

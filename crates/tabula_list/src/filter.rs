use std::{collections::BTreeSet, fmt};

use crate::record::Record;

/// Current value of a filter: no constraint, or one allowed option
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum FilterValue {
    #[default]
    All,
    Is(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Is(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A discrete exact-match constraint on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    pub name: String,
    pub field: String,
    value: FilterValue,
    pub options: Vec<FilterOption>,
}

impl FilterDescriptor {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            value: FilterValue::All,
            options,
        }
    }

    /// Builds a filter whose options are the distinct values of `field`
    pub fn from_records<R: Record>(
        name: impl Into<String>,
        field: impl Into<String>,
        records: &[R],
    ) -> Self {
        let field = field.into();
        let options = records
            .iter()
            .map(|record| record.field(&field))
            .filter(|value| !value.is_null())
            .map(|value| value.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|value| FilterOption::new(value.clone(), value))
            .collect();
        Self::new(name, field, options)
    }

    #[must_use]
    pub const fn value(&self) -> &FilterValue {
        &self.value
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.value, FilterValue::Is(_))
    }

    /// Label of the current value, `All` for the sentinel
    #[must_use]
    pub fn label(&self) -> &str {
        match &self.value {
            FilterValue::All => "All",
            FilterValue::Is(value) => self
                .options
                .iter()
                .find(|option| &option.value == value)
                .map_or(value.as_str(), |option| option.label.as_str()),
        }
    }

    /// Sets the current value. Values outside the allowed options are
    /// rejected and leave the filter unchanged.
    pub fn set(&mut self, value: FilterValue) -> bool {
        let allowed = match &value {
            FilterValue::All => true,
            FilterValue::Is(v) => {
                self.options.iter().any(|option| &option.value == v)
            }
        };
        if allowed {
            self.value = value;
        }
        allowed
    }

    /// Steps `All -> first option -> ... -> last option -> All`
    pub fn cycle(&mut self) {
        let next = match &self.value {
            FilterValue::All => self.options.first(),
            FilterValue::Is(current) => self
                .options
                .iter()
                .position(|option| &option.value == current)
                .and_then(|idx| self.options.get(idx + 1)),
        };
        self.value = next
            .map_or(FilterValue::All, |option| {
                FilterValue::Is(option.value.clone())
            });
    }

    pub fn reset(&mut self) {
        self.value = FilterValue::All;
    }

    /// Whether `record` satisfies this filter. Absent fields never match
    /// an active filter.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match &self.value {
            FilterValue::All => true,
            FilterValue::Is(expected) => {
                let actual = record.field(&self.field);
                !actual.is_null() && actual.to_string() == *expected
            }
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// Only the empty term matches every record; whitespace is significant.
pub fn matches_search<R: Record>(
    record: &R,
    term: &str,
    fields: &[String],
) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    fields
        .iter()
        .any(|field| record.field(field).to_folded().contains(&term))
}

/// Returns the records matching the search term and every active filter,
/// in input order.
pub fn filter<'a, R: Record>(
    records: &'a [R],
    search: &str,
    search_fields: &[String],
    filters: &[FilterDescriptor],
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|record| matches_search(*record, search, search_fields))
        .filter(|record| filters.iter().all(|f| f.matches(*record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynRecord;

    fn people() -> Vec<DynRecord> {
        vec![
            DynRecord::new()
                .with("name", "John Smith")
                .with("dept", "Sales")
                .with("email", "js@corp.io"),
            DynRecord::new()
                .with("name", "Jon Snow")
                .with("dept", "Ops")
                .with("email", "snow@corp.io"),
            DynRecord::new()
                .with("name", "Alice Johnson")
                .with("dept", "Sales"),
        ]
    }

    fn names(records: &[&DynRecord]) -> Vec<String> {
        records.iter().map(|r| r.field("name").to_string()).collect()
    }

    fn dept_filter(records: &[DynRecord]) -> FilterDescriptor {
        FilterDescriptor::from_records("Department", "dept", records)
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = people();
        let found = filter(&records, "john", &["name".to_string()], &[]);
        assert_eq!(names(&found), ["John Smith", "Alice Johnson"]);
    }

    #[test]
    fn test_search_restricted_to_fields() {
        let records = people();
        let by_name = filter(&records, "corp", &["name".to_string()], &[]);
        assert!(by_name.is_empty());
        let by_email = filter(&records, "CORP", &["email".to_string()], &[]);
        assert_eq!(names(&by_email), ["John Smith", "Jon Snow"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let records = people();
        assert_eq!(filter(&records, "", &[], &[]).len(), 3);
    }

    #[test]
    fn test_search_whitespace_is_part_of_the_term() {
        let records = people();
        let fields = ["name".to_string()];
        assert!(filter(&records, "   ", &fields, &[]).is_empty());
        let leading = filter(&records, " john", &fields, &[]);
        assert_eq!(names(&leading), ["Alice Johnson"]);
    }

    #[test]
    fn test_filters_and_search_combine_with_and() {
        let records = people();
        let mut dept = dept_filter(&records);
        assert!(dept.set(FilterValue::Is("Sales".to_string())));
        let found = filter(
            &records,
            "smith",
            &["name".to_string()],
            std::slice::from_ref(&dept),
        );
        assert_eq!(names(&found), ["John Smith"]);
    }

    #[test]
    fn test_all_sentinel_contributes_no_constraint() {
        let records = people();
        let dept = dept_filter(&records);
        assert!(!dept.is_active());
        assert_eq!(filter(&records, "", &[], &[dept]).len(), 3);
    }

    #[test]
    fn test_missing_field_never_matches_active_filter() {
        let records = people();
        let mut email = FilterDescriptor::new(
            "Email",
            "email",
            vec![FilterOption::new("", "(blank)")],
        );
        assert!(email.set(FilterValue::Is(String::new())));
        assert!(filter(&records, "", &[], &[email]).is_empty());
    }

    #[test]
    fn test_set_rejects_unknown_option() {
        let records = people();
        let mut dept = dept_filter(&records);
        assert!(!dept.set(FilterValue::Is("Legal".to_string())));
        assert_eq!(dept.value(), &FilterValue::All);
    }

    #[test]
    fn test_cycle_wraps_back_to_all() {
        let records = people();
        let mut dept = dept_filter(&records);
        dept.cycle();
        assert_eq!(dept.label(), "Ops");
        dept.cycle();
        assert_eq!(dept.label(), "Sales");
        dept.cycle();
        assert_eq!(dept.value(), &FilterValue::All);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = people();
        let fields = ["name".to_string(), "email".to_string()];
        let mut dept = dept_filter(&records);
        dept.set(FilterValue::Is("Sales".to_string()));
        let filters = [dept];
        for term in ["", "jo", "snow", "corp", "zzz"] {
            let once = filter(&records, term, &fields, &filters);
            let twice = filter(&once, term, &fields, &filters);
            let twice: Vec<&DynRecord> = twice.into_iter().copied().collect();
            assert_eq!(once, twice, "term {term:?}");
        }
    }
}

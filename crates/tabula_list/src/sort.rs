use std::cmp::Ordering;

use crate::{record::Record, value::Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header indicator for a column sorted in this direction
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sort key plus direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// How the values of one column are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareMode {
    Numeric,
    Chronological,
    Lexical,
}

/// Precomputed per-record sort key
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Date(chrono::NaiveDateTime),
    Text(String),
}

impl SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Missing, _) => Ordering::Less,
            (_, Self::Missing) => Ordering::Greater,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // A column is keyed in a single mode, so mixed pairs only
            // arise from misuse; order them by kind to stay total.
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

fn compare_mode(values: &[Value]) -> CompareMode {
    let mut present = values.iter().filter(|v| !v.is_null()).peekable();
    if present.peek().is_none() {
        return CompareMode::Lexical;
    }
    let present: Vec<&Value> = present.collect();
    if present.iter().all(|v| v.as_number().is_some()) {
        CompareMode::Numeric
    } else if present.iter().all(|v| v.as_date().is_some()) {
        CompareMode::Chronological
    } else {
        CompareMode::Lexical
    }
}

fn sort_key(value: &Value, mode: CompareMode) -> SortKey {
    if value.is_null() {
        return SortKey::Missing;
    }
    match mode {
        CompareMode::Numeric => {
            value.as_number().map_or(SortKey::Missing, SortKey::Number)
        }
        CompareMode::Chronological => {
            value.as_date().map_or(SortKey::Missing, SortKey::Date)
        }
        CompareMode::Lexical => SortKey::Text(value.to_folded()),
    }
}

/// Returns `records` ordered by `spec`, leaving the input untouched.
///
/// Values are compared numerically when every present value of the key
/// is a number, chronologically when every one is date-like, and as
/// case-insensitive strings otherwise. Absent values sort first in
/// ascending order. The sort is stable in both directions; `None` keeps
/// input order.
pub fn sort<'a, R: Record>(
    records: &[&'a R],
    spec: Option<&SortSpec>,
) -> Vec<&'a R> {
    let Some(spec) = spec else {
        return records.to_vec();
    };

    let values: Vec<Value> =
        records.iter().map(|record| record.field(&spec.key)).collect();
    let mode = compare_mode(&values);

    let mut keyed: Vec<(SortKey, &'a R)> = values
        .iter()
        .map(|value| sort_key(value, mode))
        .zip(records.iter().copied())
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match spec.direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => a.cmp(b).reverse(),
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynRecord;

    fn ids(records: &[&DynRecord]) -> Vec<String> {
        records.iter().map(|r| r.field("id").to_string()).collect()
    }

    fn rows(data: &[(&str, Value)]) -> Vec<DynRecord> {
        data.iter()
            .map(|(id, v)| DynRecord::new().with("id", *id).with("k", v.clone()))
            .collect()
    }

    #[test]
    fn test_direction_reverses_and_shows_its_arrow() {
        assert_eq!(SortDirection::default(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.reversed(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.reversed(), SortDirection::Ascending);
        assert_eq!(SortDirection::Ascending.indicator(), "▲");
        assert_eq!(SortDirection::Descending.indicator(), "▼");
    }

    #[test]
    fn test_none_is_a_no_op() {
        let records = rows(&[("a", 3.0.into()), ("b", 1.0.into())]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        assert_eq!(ids(&sort(&refs, None)), ["a", "b"]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let records =
            rows(&[("a", 10.0.into()), ("b", 9.0.into()), ("c", 100.0.into())]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let records = rows(&[
            ("a", "2024-02-01".into()),
            ("b", "2023-12-31T23:00:00Z".into()),
            ("c", "2024-01-15 08:00".into()),
        ]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&sorted), ["b", "c", "a"]);
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        let records = rows(&[
            ("a", "banana".into()),
            ("b", "Apple".into()),
            ("c", "cherry".into()),
        ]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn test_mixed_column_falls_back_to_lexical() {
        let records = rows(&[
            ("a", 10.0.into()),
            ("b", "5".into()),
            ("c", 9.0.into()),
        ]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&sorted), ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_values_sort_first() {
        let records = vec![
            DynRecord::new().with("id", "a").with("k", 2.0),
            DynRecord::new().with("id", "b"),
            DynRecord::new().with("id", "c").with("k", 1.0),
        ];
        let refs: Vec<&DynRecord> = records.iter().collect();
        let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&sorted), ["b", "c", "a"]);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let records = rows(&[("a", 2.0.into()), ("b", 1.0.into())]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let _ = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&refs), ["a", "b"]);
    }

    #[test]
    fn test_stable_for_equal_keys_in_both_directions() {
        let records = rows(&[
            ("a", "x".into()),
            ("b", "y".into()),
            ("c", "X".into()),
            ("d", "y".into()),
            ("e", "x".into()),
        ]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let asc = sort(&refs, Some(&SortSpec::ascending("k")));
        assert_eq!(ids(&asc), ["a", "c", "e", "b", "d"]);
        let desc = sort(&refs, Some(&SortSpec::descending("k")));
        assert_eq!(ids(&desc), ["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_stable_for_every_permutation_of_ties() {
        let base = [("p", 1.0), ("q", 1.0), ("r", 1.0), ("s", 0.0)];
        let orders = [
            [0, 1, 2, 3],
            [0, 2, 1, 3],
            [1, 0, 2, 3],
            [1, 2, 0, 3],
            [2, 0, 1, 3],
            [2, 1, 0, 3],
        ];
        for order in orders {
            let records: Vec<DynRecord> = order
                .iter()
                .filter_map(|&i| base.get(i))
                .map(|(id, k)| DynRecord::new().with("id", *id).with("k", *k))
                .collect();
            let refs: Vec<&DynRecord> = records.iter().collect();
            let tied: Vec<String> = ids(&refs)
                .into_iter()
                .filter(|id| id != "s")
                .collect();
            let sorted = sort(&refs, Some(&SortSpec::ascending("k")));
            let sorted_ids = ids(&sorted);
            assert_eq!(sorted_ids.first().map(String::as_str), Some("s"));
            assert_eq!(sorted_ids.get(1..), Some(tied.as_slice()));
        }
    }

    #[test]
    fn test_descending_reverses_ascending_without_ties() {
        let records = rows(&[
            ("a", 3.0.into()),
            ("b", 1.0.into()),
            ("c", 4.0.into()),
            ("d", 2.0.into()),
        ]);
        let refs: Vec<&DynRecord> = records.iter().collect();
        let mut asc = sort(&refs, Some(&SortSpec::ascending("k")));
        let desc = sort(&refs, Some(&SortSpec::descending("k")));
        asc.reverse();
        assert_eq!(asc, desc);
    }
}

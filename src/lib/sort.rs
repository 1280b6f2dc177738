use std::cmp::Ordering;

use clap::ValueEnum;

use super::models::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction recorded after a click under the legacy toggle.
    pub fn next(self) -> SortDirection {
        match self {
            SortDirection::Unsorted | SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Direction applied by a click under the conventional toggle.
    pub fn cycle(self) -> SortDirection {
        match self {
            SortDirection::Unsorted | SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Unsorted => "unsorted",
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

/// How a header click advances that column's direction.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleMode {
    /// The recorded direction is the one just applied.
    #[default]
    Conventional,
    /// Sort with the recorded direction, then record its successor.
    Legacy,
}

impl ToggleMode {
    /// Returns `(applied, recorded)` for a click on a column currently in
    /// `current`.
    pub fn click(self, current: SortDirection) -> (SortDirection, SortDirection) {
        match self {
            ToggleMode::Conventional => {
                let applied = current.cycle();
                (applied, applied)
            }
            ToggleMode::Legacy => (current, current.next()),
        }
    }
}

/// Stable in-place sort on one column. `Unsorted` sorts ascending.
///
/// [`Cell::compare`](super::models::Cell::compare) is not a total order once
/// numbers and non-numeric text share a column, so this uses a merge sort that
/// tolerates an inconsistent comparator instead of `slice::sort_by`.
pub fn sort_rows(rows: &mut [Row], key: &str, direction: SortDirection) {
    let compare = |a: &Row, b: &Row| {
        let ordering = match (a.get(key), b.get(key)) {
            (Some(a), Some(b)) => a.compare(&b),
            _ => Ordering::Equal,
        };
        match direction {
            SortDirection::Unsorted | SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    };
    merge_sort(rows, &compare);
}

fn merge_sort<T, F>(items: &mut [T], compare: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid], compare);
    merge_sort(&mut items[mid..], compare);
    if compare(&items[mid - 1], &items[mid]) != Ordering::Greater {
        return;
    }

    // Writes at `k` never overtake the unread right half at `j`.
    let left = items[..mid].to_vec();
    let (mut i, mut j, mut k) = (0, mid, 0);
    while i < left.len() && j < items.len() {
        if compare(&items[j], &left[i]) == Ordering::Less {
            items.swap(k, j);
            j += 1;
        } else {
            items[k] = left[i].clone();
            i += 1;
        }
        k += 1;
    }
    for item in &left[i..] {
        items[k] = item.clone();
        k += 1;
    }
}

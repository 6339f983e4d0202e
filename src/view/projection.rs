//! Projection of the record store onto the displayed page.
//!
//! The projection paginates first and sorts second: the page is cut from the
//! store in canonical order, then only that slice is ordered by the sort key.
//! Changing the sort key therefore never changes which records are on the
//! current page, only their order within it.
//!
//! # Comparison rules
//!
//! - Both values parse as finite numbers: numeric comparison
//! - Otherwise: case-insensitive text comparison
//! - Descending reverses the comparator result
//! - Equal keys keep their slice order

use super::params::{SortDirection, SortKey, ViewParams};
use crate::domain::record::{Column, Record};
use std::cmp::Ordering;

/// The displayed subset of the store plus the pagination facts the read model
/// needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Records on the current page, sorted.
    pub rows: Vec<Record>,

    /// Page index after clamping against the record count.
    pub page_index: usize,

    /// Number of pages; zero when the store is empty.
    pub page_count: usize,

    /// Number of records in the store.
    pub total_count: usize,
}

/// Computes the displayed page for `records` under `params`.
///
/// # Examples
///
/// ```
/// use catalog_grid::domain::Record;
/// use catalog_grid::view::{project, SortDirection, ViewParams};
/// use catalog_grid::domain::Column;
///
/// let records = vec![
///     Record::new(1, "B", 10.0, "", ""),
///     Record::new(2, "A", 5.0, "", ""),
/// ];
/// let params = ViewParams::default();
///
/// let page = project(&records, &params);
/// let ids: Vec<u64> = page.rows.iter().map(|r| r.id.0).collect();
/// assert_eq!(ids, vec![2, 1]);
///
/// let params = params.with_sort(Column::Title, SortDirection::Descending);
/// let ids: Vec<u64> = project(&records, &params).rows.iter().map(|r| r.id.0).collect();
/// assert_eq!(ids, vec![1, 2]);
/// ```
#[must_use]
pub fn project(records: &[Record], params: &ViewParams) -> Projection {
    let _span = tracing::trace_span!("project",
        total = records.len(),
        page_index = params.page_index(),
        page_size = params.page_size(),
        sort_key = %params.sort_key(),
        sort_direction = %params.sort_direction()
    )
    .entered();

    let total_count = records.len();
    let page_size = params.page_size().max(1);
    let page_count = total_count.div_ceil(page_size);
    let page_index = params.page_index().min(page_count.saturating_sub(1));

    let start = (page_index * page_size).min(total_count);
    let end = start.saturating_add(page_size).min(total_count);

    let mut rows = records[start..end].to_vec();
    sort_slice(&mut rows, params.sort_key(), params.sort_direction());

    tracing::trace!(rows = rows.len(), page_index, page_count, "projection computed");

    Projection {
        rows,
        page_index,
        page_count,
        total_count,
    }
}

/// Sorts `rows` in place by `key`, keeping equal rows in their current order.
///
/// Each row's sort value is computed once. The comparator is not a total order
/// across columns that mix numeric and non-numeric text, so this runs a stable
/// bottom-up merge sort over row positions, which stays well defined for any
/// comparator.
pub fn sort_slice(rows: &mut [Record], key: SortKey, direction: SortDirection) {
    if rows.len() < 2 {
        return;
    }

    let values: Vec<SortValue> = rows.iter().map(|r| SortValue::of(r, key)).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    merge_sort_by(&mut order, |a, b| values[a].compare(&values[b], direction));
    apply_permutation(rows, order);
}

/// Compares two records by `key` in the given direction.
#[must_use]
pub fn compare(a: &Record, b: &Record, key: SortKey, direction: SortDirection) -> Ordering {
    SortValue::of(a, key).compare(&SortValue::of(b, key), direction)
}

/// Precomputed comparison key of one record.
struct SortValue {
    number: Option<f64>,
    text: String,
}

impl SortValue {
    fn of(record: &Record, key: SortKey) -> Self {
        Self {
            number: numeric_value(record, key),
            text: record.field_text(key).to_lowercase(),
        }
    }

    fn compare(&self, other: &Self, direction: SortDirection) -> Ordering {
        let ordering = match (self.number, other.number) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => self.text.cmp(&other.text),
        };

        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Stable bottom-up merge sort of `order` under `cmp`.
fn merge_sort_by<F>(order: &mut Vec<usize>, mut cmp: F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = order.len();
    let mut buffer = vec![0; len];
    let mut width = 1;

    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut out) = (start, mid, start);

            while left < mid && right < end {
                // Left wins ties.
                if cmp(order[right], order[left]) == Ordering::Less {
                    buffer[out] = order[right];
                    right += 1;
                } else {
                    buffer[out] = order[left];
                    left += 1;
                }
                out += 1;
            }

            let rest = mid - left;
            buffer[out..out + rest].copy_from_slice(&order[left..mid]);
            out += rest;
            buffer[out..end].copy_from_slice(&order[right..end]);

            start = end;
        }

        std::mem::swap(order, &mut buffer);
        width *= 2;
    }
}

/// Reorders `rows` so that position `i` holds the row previously at
/// `order[i]`, following permutation cycles with swaps.
fn apply_permutation(rows: &mut [Record], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut target = start;
        loop {
            let source = order[target];
            order[target] = target;
            if source == start {
                break;
            }
            rows.swap(target, source);
            target = source;
        }
    }
}

fn numeric_value(record: &Record, key: SortKey) -> Option<f64> {
    match key {
        Column::Price => Some(record.price).filter(|p| p.is_finite()),
        Column::Title => parse_number(&record.title),
        Column::Category => parse_number(&record.category),
        Column::Brand => parse_number(&record.brand),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

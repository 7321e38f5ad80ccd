use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::ListError;
use crate::record::{Record, Value};
use crate::schema::{FieldKind, ListSchema};

/// Value selected for one filter dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    /// The "all" sentinel: the dimension is inactive.
    All,
    /// Field must equal the value.
    Equals(Value),
    /// Field (or any element of a tag list) must be one of the selected tags.
    /// An empty set hides every record.
    AnyOf(BTreeSet<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Parse `asc`/`desc`, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Sort descriptor for the visible list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    pub direction: SortDirection,
}

/// Everything the visible list is derived from, apart from the collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub filters: BTreeMap<String, FilterValue>,
    pub sort: Option<SortDescriptor>,
}

impl ListQuery {
    /// Check every filter and the sort key against the schema.
    pub fn validate(&self, schema: &ListSchema) -> Result<(), ListError> {
        for key in self.filters.keys() {
            schema.filterable(key)?;
        }
        if let Some(sort) = &self.sort {
            schema.sortable(&sort.field)?;
        }
        Ok(())
    }
}

/// Derive the visible list: search, then every filter (AND), then a stable sort.
///
/// Pure: the result depends only on the arguments.
pub fn derive_visible<'a, R: Record>(
    records: &'a [R],
    schema: &ListSchema,
    query: &ListQuery,
) -> Vec<&'a R> {
    let needle = query.search.to_lowercase();

    let filtered = records.iter().filter(|r| {
        matches_search(*r, schema, &needle)
            && query.filters.iter().all(|(key, value)| {
                let kind = schema.field(key).map(|f| f.kind).unwrap_or(FieldKind::Text);
                matches_filter(r.field(key).as_ref(), kind, value)
            })
    });

    match &query.sort {
        None => filtered.collect(),
        Some(sort) => {
            let mut keyed: Vec<(Option<Value>, &R)> =
                filtered.map(|r| (r.field(&sort.field), r)).collect();
            // `sort_by` is stable, so ties keep collection order in both directions.
            keyed.sort_by(|(a, _), (b, _)| {
                let ord = compare_optional(a.as_ref(), b.as_ref());
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
            keyed.into_iter().map(|(_, r)| r).collect()
        }
    }
}

/// Empty `needle` matches everything. Expects a lowercased needle.
fn matches_search<R: Record>(record: &R, schema: &ListSchema, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    schema.searchable_fields().any(|def| match record.field(&def.name) {
        Some(Value::List(items)) => items
            .iter()
            .any(|v| v.display().to_lowercase().contains(needle)),
        Some(v) => v.display().to_lowercase().contains(needle),
        None => false,
    })
}

fn matches_filter(field: Option<&Value>, kind: FieldKind, filter: &FilterValue) -> bool {
    match filter {
        FilterValue::All => true,
        FilterValue::Equals(expected) => match field {
            None => false,
            Some(actual) => values_equal(actual, expected, kind),
        },
        FilterValue::AnyOf(selected) => match field {
            None => false,
            Some(Value::List(items)) => items.iter().any(|v| selected.contains(&v.display())),
            Some(v) => selected.contains(&v.display()),
        },
    }
}

fn values_equal(actual: &Value, expected: &Value, kind: FieldKind) -> bool {
    match (kind, actual) {
        (FieldKind::Status, _) => actual.display().eq_ignore_ascii_case(&expected.display()),
        (FieldKind::Tags, Value::List(items)) => items.iter().any(|v| v == expected),
        (FieldKind::Number, _) => numbers_equal(actual, expected),
        _ => actual == expected,
    }
}

fn compare_optional(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn type_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Timestamp(_) => 3,
        Value::Text(_) => 4,
        Value::List(_) => 5,
    }
}

/// Numeric equality for filters: `72` equals `72.0`, NaN equals nothing.
fn numbers_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => {
            !y.is_nan() && cmp_int_float(*x, *y) == Ordering::Equal
        }
        (Value::Float(x), Value::Float(y)) => x == y,
        _ => compare_values(a, b) == Ordering::Equal,
    }
}

/// Exact comparison of an integer with a float, without rounding through `f64`.
///
/// NaN lies outside every number on the side of its sign bit, where
/// `f64::total_cmp` puts it.
fn cmp_int_float(x: i64, y: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if y.is_nan() {
        return if y.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if y >= TWO_POW_63 {
        return Ordering::Less;
    }
    if y < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = y.trunc();
    let fraction = y - whole;
    x.cmp(&(whole as i64)).then(if fraction > 0.0 {
        Ordering::Less
    } else if fraction < 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

/// Total order over field values.
///
/// Text compares by bytes (locale-naive), numbers numerically, timestamps
/// chronologically. Values of different types order by type, `Null` first.
/// Floats follow `f64::total_cmp`; an integer sorts just before a float of
/// the same value.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Int(x), Value::Float(y)) => cmp_int_float(*x, *y).then(Ordering::Less),
        (Value::Float(x), Value::Int(y)) => cmp_int_float(*y, *x).reverse().then(Ordering::Greater),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::List(_), Value::List(_)) => a.display().cmp(&b.display()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

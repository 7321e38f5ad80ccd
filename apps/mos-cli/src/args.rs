//! Command-line arguments and their conversion into list queries.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use mos_core::{FieldKind, FilterValue, SortDirection, Value};
use mos_pages::Page;

#[derive(Parser, Debug)]
#[command(name = "mos", version, about = "List a Marketing OS page")]
pub struct Cli {
    /// Page to list: drafts, signals, executions, tokens, audit, errors, entities, guardrails
    #[arg(value_parser = parse_page)]
    pub page: Page,

    /// Case-insensitive text search over the page's searchable columns
    #[arg(long)]
    pub search: Option<String>,

    /// Filter as key=value; a comma-separated value keeps any of the tags
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort as key or key:desc
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<(String, Option<SortDirection>)>,

    /// Keep collection order instead of the page's default sort
    #[arg(long, conflicts_with = "sort")]
    pub unsorted: bool,

    /// 1-based page of rows to show
    #[arg(long = "page", default_value_t = 1)]
    pub page_number: usize,

    /// Apply a status to every visible record before listing
    #[arg(long)]
    pub bulk: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to the standard location)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_page(input: &str) -> Result<Page, String> {
    Page::parse(input).ok_or_else(|| {
        let slugs: Vec<&str> = Page::all().iter().map(|p| p.slug()).collect();
        format!("unknown page '{}', expected one of: {}", input, slugs.join(", "))
    })
}

fn parse_filter(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", input)),
    }
}

fn parse_sort(input: &str) -> Result<(String, Option<SortDirection>), String> {
    match input.split_once(':') {
        None => Ok((input.trim().to_string(), None)),
        Some((key, dir)) => {
            let direction = SortDirection::parse(dir)
                .ok_or_else(|| format!("unknown sort direction '{}'", dir))?;
            Ok((key.trim().to_string(), Some(direction)))
        }
    }
}

/// Turn a raw command-line value into a filter for a field of `kind`.
pub fn filter_value(kind: FieldKind, raw: &str) -> FilterValue {
    if raw.contains(',') {
        let tags: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        return FilterValue::AnyOf(tags);
    }
    let value = match kind {
        FieldKind::Number => raw
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| raw.parse::<f64>().map(Value::Float))
            .unwrap_or_else(|_| Value::from(raw)),
        _ => Value::from(raw),
    };
    FilterValue::Equals(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("status=Pending", Ok(("status".into(), "Pending".into())))]
    #[case(" channel = email ", Ok(("channel".into(), "email".into())))]
    #[case("status", Err(()))]
    #[case("=x", Err(()))]
    fn filters(#[case] input: &str, #[case] expected: Result<(String, String), ()>) {
        assert_eq!(parse_filter(input).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("score", ("score", None))]
    #[case("score:desc", ("score", Some(SortDirection::Desc)))]
    #[case("name:ASC", ("name", Some(SortDirection::Asc)))]
    fn sorts(#[case] input: &str, #[case] expected: (&str, Option<SortDirection>)) {
        let (key, dir) = parse_sort(input).unwrap();
        assert_eq!((key.as_str(), dir), expected);
    }

    #[test]
    fn bad_sort_direction() {
        assert!(parse_sort("score:sideways").is_err());
    }

    #[test]
    fn typed_filter_values() {
        assert_eq!(
            filter_value(FieldKind::Number, "72"),
            FilterValue::Equals(Value::Int(72))
        );
        assert_eq!(
            filter_value(FieldKind::Number, "72.5"),
            FilterValue::Equals(Value::Float(72.5))
        );
        assert_eq!(
            filter_value(FieldKind::Status, "Pending"),
            FilterValue::Equals(Value::from("Pending"))
        );
        assert_eq!(
            filter_value(FieldKind::Tags, "read, write"),
            FilterValue::AnyOf(["read".to_string(), "write".to_string()].into_iter().collect())
        );
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "mos", "signals", "--filter", "signal_type=engagement", "--sort", "score:desc", "--json",
        ])
        .unwrap();
        assert_eq!(cli.page, Page::Signals);
        assert_eq!(cli.filters.len(), 1);
        assert!(cli.json);
        assert!(Cli::try_parse_from(["mos", "dashboard"]).is_err());
        assert!(Cli::try_parse_from(["mos", "drafts", "--unsorted", "--sort", "title"]).is_err());
    }
}

//! Page registry and the trait every page record implements.

use mos_core::{BadgeTone, ListError, ListSchema, Record, RecordList, Value};
use serde::{Deserialize, Serialize};

/// The list pages of the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Drafts,
    Signals,
    Executions,
    Tokens,
    Audit,
    Errors,
    Entities,
    Guardrails,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[
            Page::Drafts,
            Page::Signals,
            Page::Executions,
            Page::Tokens,
            Page::Audit,
            Page::Errors,
            Page::Entities,
            Page::Guardrails,
        ]
    }

    /// Slug used on the command line and as the list schema name.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Drafts => "drafts",
            Page::Signals => "signals",
            Page::Executions => "executions",
            Page::Tokens => "tokens",
            Page::Audit => "audit",
            Page::Errors => "errors",
            Page::Entities => "entities",
            Page::Guardrails => "guardrails",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Drafts => "Content Drafts",
            Page::Signals => "Growth Signal Mapper",
            Page::Executions => "Signal Execution Log",
            Page::Tokens => "API Tokens",
            Page::Audit => "Audit Log",
            Page::Errors => "Error Log",
            Page::Entities => "Entity Sync",
            Page::Guardrails => "Guardrails",
        }
    }

    pub fn parse(input: &str) -> Option<Page> {
        let input = input.trim().to_ascii_lowercase();
        Page::all().iter().copied().find(|p| p.slug() == input)
    }
}

/// A record type that backs one page.
pub trait PageRecord: Record + Serialize + Send + Sync + 'static {
    const PAGE: Page;

    fn schema() -> ListSchema;

    /// Mock collection the page mounts with.
    fn seed() -> Vec<Self>;

    /// Columns shown in table output, in order.
    fn columns() -> &'static [&'static str];

    /// Parse a status label into this page's status type, if it has one.
    fn parse_status(_label: &str) -> Option<Self::Status> {
        None
    }

    /// A list over the seed collection.
    fn seeded_list() -> Result<RecordList<Self>, ListError> {
        RecordList::new(Self::schema(), Self::seed())
    }

    /// Badge tone for a column holding a status-like value.
    fn badge(&self, _column: &str) -> Option<BadgeTone> {
        None
    }

    /// Cell text for a column.
    fn cell(&self, column: &str) -> String {
        self.field(column).map(|v| cell_text(&v)).unwrap_or_default()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Timestamp(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        Value::Float(x) => format!("{:.1}", x),
        other => other.display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("drafts", Some(Page::Drafts))]
    #[case("SIGNALS", Some(Page::Signals))]
    #[case(" guardrails ", Some(Page::Guardrails))]
    #[case("dashboard", None)]
    fn parse_page(#[case] input: &str, #[case] expected: Option<Page>) {
        assert_eq!(Page::parse(input), expected);
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<&str> = Page::all().iter().map(|p| p.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), Page::all().len());
    }

    #[test]
    fn cell_formats_timestamps_and_floats() {
        let t = crate::severity::at(2024, 6, 1, 9, 30);
        assert_eq!(cell_text(&Value::Timestamp(t)), "2024-06-01 09:30");
        assert_eq!(cell_text(&Value::Float(72.26)), "72.3");
        assert_eq!(cell_text(&Value::Null), "");
    }
}

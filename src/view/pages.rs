//! Page renderers
//!
//! Pure functions from a store snapshot (plus whatever the user has typed)
//! to a renderer-independent page description. Nothing is cached: every
//! call rebuilds the page from the store it is given.

use serde::{Deserialize, Serialize};

use crate::record::{Field, Record, RecordDraft};
use crate::store::Store;
use crate::view::router::Page;

/// Dataset label passed to the chart collaborator
pub const CHART_DATASET_LABEL: &str = "Cleanings";

/// Column headings of the Logs table
pub const LOG_COLUMNS: [&str; 6] = ["Name", "Serial", "Item", "Date", "Cleaned By", "Inspection"];

/// What the user has typed that isn't in the store yet
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInput {
    /// Current contents of the search box
    pub search_term: String,
    /// Current contents of the Add form
    pub draft: RecordDraft,
}

/// One rendered page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "page", rename_all = "lowercase")]
pub enum View {
    Search(SearchView),
    Add(AddView),
    Logs(LogsView),
    Chart(ChartView),
}

impl View {
    pub fn page(&self) -> Page {
        match self {
            View::Search(_) => Page::Search,
            View::Add(_) => Page::Add,
            View::Logs(_) => Page::Logs,
            View::Chart(_) => Page::Chart,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchView {
    pub title: String,
    pub term: String,
    pub hits: Vec<SearchHit>,
}

/// A search result card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub name: String,
    pub serial: String,
    pub item: String,
    pub cleaned_by: String,
    pub date: String,
}

impl From<&Record> for SearchHit {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            serial: record.serial.clone(),
            item: record.item.clone(),
            cleaned_by: record.cleaned_by.clone(),
            date: record.date.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddView {
    pub title: String,
    pub fields: Vec<FormField>,
    pub inspection: bool,
    /// Required fields still blank
    pub missing: Vec<Field>,
    /// False while any required field is blank; front ends disable Save
    pub can_submit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormField {
    pub field: Field,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogsView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<LogRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogRow {
    pub name: String,
    pub serial: String,
    pub item: String,
    pub date: String,
    pub cleaned_by: String,
    pub inspection: bool,
    pub inspection_glyph: String,
}

impl From<&Record> for LogRow {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            serial: record.serial.clone(),
            item: record.item.clone(),
            date: record.date.clone(),
            cleaned_by: record.cleaned_by.clone(),
            inspection: record.inspection,
            inspection_glyph: record.inspection_glyph().to_string(),
        }
    }
}

/// Bar chart input: parallel labels and values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// Render `page` from the store and the current input
pub fn render(page: Page, store: &Store, input: &PageInput) -> View {
    match page {
        Page::Search => View::Search(search_page(store, &input.search_term)),
        Page::Add => View::Add(add_page(&input.draft)),
        Page::Logs => View::Logs(logs_page(store)),
        Page::Chart => View::Chart(chart_page(store)),
    }
}

pub fn search_page(store: &Store, term: &str) -> SearchView {
    SearchView {
        title: Page::Search.title().to_string(),
        term: term.to_string(),
        hits: store.search(term).map(SearchHit::from).collect(),
    }
}

pub fn add_page(draft: &RecordDraft) -> AddView {
    let missing = draft.missing_fields();
    AddView {
        title: Page::Add.title().to_string(),
        fields: Field::all()
            .iter()
            .map(|field| FormField {
                field: *field,
                label: field.label().to_string(),
                value: draft.get(*field).to_string(),
            })
            .collect(),
        inspection: draft.inspection,
        can_submit: missing.is_empty(),
        missing,
    }
}

pub fn logs_page(store: &Store) -> LogsView {
    LogsView {
        title: Page::Logs.title().to_string(),
        columns: LOG_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: store.all().map(LogRow::from).collect(),
    }
}

pub fn chart_page(store: &Store) -> ChartView {
    let tally = store.count_by(|record| record.name.clone());
    ChartView {
        title: Page::Chart.title().to_string(),
        dataset_label: CHART_DATASET_LABEL.to_string(),
        labels: tally.keys().cloned().collect(),
        values: tally.counts().collect(),
    }
}

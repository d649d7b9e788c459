//! Views
//!
//! - **router**: which page is showing
//! - **pages**: pure page renderers, store snapshot in, [`View`] out
//! - **text**: terminal rendering of a [`View`], with a swappable bar chart
//!
//! The HTTP API serves the same [`View`] values as JSON, so a browser
//! front end and the terminal share one rendering contract.

pub mod pages;
pub mod router;
pub mod text;

pub use pages::{
    add_page, chart_page, logs_page, render, search_page, AddView, ChartView, FormField, LogRow,
    LogsView, PageInput, SearchHit, SearchView, View, CHART_DATASET_LABEL, LOG_COLUMNS,
};
pub use router::{Page, Router, UnknownPage};
pub use text::{AsciiBarChart, BarChart, TextRenderer};

//! Terminal rendering
//!
//! Turns a [`View`] into plain text. Chart drawing is delegated to a
//! [`BarChart`] collaborator that only ever sees labels and values.

use crate::notify::Notification;
use crate::view::pages::{AddView, ChartView, LogsView, SearchView, View};

/// Draws a bar chart from parallel labels and values
pub trait BarChart {
    fn draw(&self, dataset_label: &str, labels: &[String], values: &[usize]) -> String;
}

/// Horizontal bar chart made of block characters
#[derive(Debug, Clone)]
pub struct AsciiBarChart {
    /// Width of the longest bar
    pub width: usize,
    pub bar: char,
}

impl Default for AsciiBarChart {
    fn default() -> Self {
        Self { width: 40, bar: '█' }
    }
}

impl BarChart for AsciiBarChart {
    fn draw(&self, dataset_label: &str, labels: &[String], values: &[usize]) -> String {
        if labels.is_empty() {
            return "No data to chart yet.\n".to_string();
        }

        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        // Axis starts at zero
        let max = values.iter().copied().max().unwrap_or(0).max(1);

        let mut out = String::new();
        out.push_str(&format!("{}\n", dataset_label));
        for (label, value) in labels.iter().zip(values) {
            let len = (value * self.width).div_ceil(max);
            let bar: String = std::iter::repeat(self.bar).take(len).collect();
            out.push_str(&format!("{:<width$} | {} {}\n", label, bar, value, width = label_width));
        }
        out
    }
}

/// Plain-text page renderer
pub struct TextRenderer<C: BarChart = AsciiBarChart> {
    chart: C,
}

impl Default for TextRenderer<AsciiBarChart> {
    fn default() -> Self {
        Self::new(AsciiBarChart::default())
    }
}

impl<C: BarChart> TextRenderer<C> {
    pub fn new(chart: C) -> Self {
        Self { chart }
    }

    pub fn render(&self, view: &View) -> String {
        match view {
            View::Search(v) => self.search_text(v),
            View::Add(v) => self.add_text(v),
            View::Logs(v) => self.logs_text(v),
            View::Chart(v) => self.chart_text(v),
        }
    }

    /// Notification area, oldest first
    pub fn notifications(&self, notes: &[Notification]) -> String {
        notes.iter().map(|n| format!("  {}\n", n)).collect()
    }

    fn search_text(&self, view: &SearchView) -> String {
        let mut out = heading(&view.title);
        out.push_str(&format!("Search by name or serial number: {}\n", view.term));
        if view.hits.is_empty() {
            out.push_str("  (no matching records)\n");
        }
        for hit in &view.hits {
            out.push_str(&format!("  {} — {}\n", hit.name, hit.item));
            out.push_str(&format!("    Cleaned by {} on {}\n", hit.cleaned_by, hit.date));
        }
        out
    }

    fn add_text(&self, view: &AddView) -> String {
        let mut out = heading(&view.title);
        for field in &view.fields {
            out.push_str(&format!("  {:<26} {}\n", format!("{}:", field.label), field.value));
        }
        let checkbox = if view.inspection { "x" } else { " " };
        out.push_str(&format!("  [{}] Advanced Inspection Completed\n", checkbox));
        if !view.can_submit {
            let missing: Vec<String> = view.missing.iter().map(|f| f.label().to_string()).collect();
            out.push_str(&format!("  Save disabled, still needed: {}\n", missing.join(", ")));
        }
        out
    }

    fn logs_text(&self, view: &LogsView) -> String {
        let mut rows: Vec<[String; 6]> = Vec::with_capacity(view.rows.len() + 1);
        rows.push([0usize, 1, 2, 3, 4, 5].map(|i| view.columns.get(i).cloned().unwrap_or_default()));
        for row in &view.rows {
            rows.push([
                row.name.clone(),
                row.serial.clone(),
                row.item.clone(),
                row.date.clone(),
                row.cleaned_by.clone(),
                row.inspection_glyph.clone(),
            ]);
        }

        let mut widths = [0usize; 6];
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = heading(&view.title);
        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = w))
                .collect();
            out.push_str(&format!("  {}\n", line.join("  ").trim_end()));
        }
        out
    }

    fn chart_text(&self, view: &ChartView) -> String {
        let mut out = heading(&view.title);
        out.push_str(&self.chart.draw(&view.dataset_label, &view.labels, &view.values));
        out
    }
}

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Record, RecordDraft};
    use crate::store::Store;
    use crate::view::pages::{add_page, chart_page, logs_page, search_page};

    /// Records what the renderer hands to the chart
    struct CapturingChart;

    impl BarChart for CapturingChart {
        fn draw(&self, dataset_label: &str, labels: &[String], values: &[usize]) -> String {
            format!("{}:{:?}:{:?}", dataset_label, labels, values)
        }
    }

    fn store() -> Store {
        Store::from_records(vec![
            Record::new("Jane Doe", "1234", "Helmet", "Jane Doe").inspection(true),
            Record::new("Al", "77", "Boots", "Jane Doe"),
            Record::new("Jane Doe", "1234", "Coat", "Al"),
        ])
    }

    #[test]
    fn test_chart_delegates_labels_and_values() {
        let renderer = TextRenderer::new(CapturingChart);
        let text = renderer.render(&View::Chart(chart_page(&store())));

        assert!(text.starts_with("Cleaning Frequency\n"));
        assert!(text.contains(r#"Cleanings:["Jane Doe", "Al"]:[2, 1]"#));
    }

    #[test]
    fn test_ascii_bars_scale_to_largest_value() {
        let chart = AsciiBarChart { width: 10, bar: '#' };
        let text = chart.draw("Cleanings", &["A".to_string(), "B".to_string()], &[4, 2]);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "A | ########## 4");
        assert_eq!(lines[2], "B | ##### 2");
    }

    #[test]
    fn test_empty_chart_message() {
        let chart = AsciiBarChart::default();
        assert_eq!(chart.draw("Cleanings", &[], &[]), "No data to chart yet.\n");
    }

    #[test]
    fn test_logs_table_has_header_and_rows() {
        let text = TextRenderer::new(AsciiBarChart::default()).render(&View::Logs(logs_page(&store())));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "All Logs");
        assert!(lines[2].trim_start().starts_with("Name"));
        assert!(lines[3].contains("Helmet") && lines[3].ends_with("✅"));
        assert!(lines[4].contains("Boots") && lines[4].ends_with("❌"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_search_and_add_text() {
        let renderer = TextRenderer::new(AsciiBarChart::default());

        let text = renderer.render(&View::Search(search_page(&store(), "zzz")));
        assert!(text.contains("(no matching records)"));

        let text = renderer.render(&View::Search(search_page(&store(), "al")));
        assert!(text.contains("Al — Boots"));
        assert!(text.contains("Cleaned by Jane Doe on"));

        let text = renderer.render(&View::Add(add_page(&RecordDraft::default())));
        assert!(text.contains("Save disabled"));
        assert!(text.contains("Firefighter Name"));
    }

    #[test]
    fn test_add_form_lines() {
        let draft = RecordDraft {
            name: "Jane Doe".to_string(),
            serial: "1234".to_string(),
            item: "Helmet".to_string(),
            cleaned_by: "Sam".to_string(),
            inspection: true,
        };
        let text = TextRenderer::new(AsciiBarChart::default()).render(&View::Add(add_page(&draft)));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Add Cleaning Record");
        assert!(lines[2].ends_with(" Jane Doe"));
        assert_eq!(lines[6], "  [x] Advanced Inspection Completed");
        assert_eq!(lines.len(), 7);
    }
}

//! Plain-text table rendering

use tfd::{DisplayReport, Table};

/// Space between side-by-side tables
const GUTTER: &str = "    ";

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Render one table as lines of equal width
pub fn render_table(table: &Table) -> Vec<String> {
    let columns = table
        .headers
        .len()
        .max(table.rows.iter().map(Vec::len).max().unwrap_or(0));

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.headers).chain(&table.rows) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(text_width(cell));
        }
    }

    let format_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header = format_row(table.headers.as_slice());
    let width = text_width(&header).max(text_width(&table.title));

    let mut lines = Vec::with_capacity(table.rows.len() + 3);
    lines.push(format!("{:^width$}", table.title, width = width));
    lines.push(pad(&header, width));
    lines.push("-".repeat(width));
    for row in &table.rows {
        lines.push(pad(&format_row(row.as_slice()), width));
    }

    lines
}

/// Render all tables of a report next to each other
pub fn render_report(report: &DisplayReport) -> String {
    let blocks: Vec<Vec<String>> = report.tables.iter().map(render_table).collect();
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.first().map(|l| text_width(l)).unwrap_or(0))
        .collect();
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    for i in 0..height {
        let line = blocks
            .iter()
            .zip(&widths)
            .map(|(block, w)| match block.get(i) {
                Some(l) => l.clone(),
                None => " ".repeat(*w),
            })
            .collect::<Vec<_>>()
            .join(GUTTER);
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

//! Table rendering for terminal output

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Render a table with a header row
pub fn render<H, R>(headers: H, rows: impl IntoIterator<Item = R>) -> String
where
    H: IntoIterator,
    H::Item: Into<String>,
    R: IntoIterator,
    R::Item: Into<String>,
{
    let mut builder = Builder::default();
    builder.push_record(headers.into_iter().map(Into::<String>::into));
    for row in rows {
        builder.push_record(row.into_iter().map(Into::<String>::into));
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Render label/value pairs as a two-column table with right-aligned values
pub fn render_pairs<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> String
where
    L: Into<String>,
    V: Into<String>,
{
    let mut builder = Builder::default();
    for (label, value) in pairs {
        let label: String = label.into();
        let value: String = value.into();
        builder.push_record([label, value]);
    }
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::one(1)).with(Alignment::right()));
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_cells() {
        let out = render(["A", "B"], vec![vec!["1", "2"], vec!["3", "4"]]);
        assert!(out.contains('A'));
        assert!(out.contains('4'));
        assert!(out.lines().count() >= 4);
    }

    #[test]
    fn test_render_pairs() {
        let out = render_pairs([("mean", "2.50".to_string()), ("n", "4".to_string())]);
        assert!(out.contains("mean"));
        assert!(out.contains("2.50"));
        // Values are right-aligned within their column
        assert!(out.contains("    4 │"));
    }
}

//! Markdown formatter producing GitHub-style pipe tables

use itertools::Itertools;

use crate::application::cells::{dial_string, PLACEHOLDER};
use crate::domain::View;

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format a view as Markdown blocks separated by blank lines.
    pub fn format(&self, view: &View) -> String {
        let mut blocks = Vec::new();
        self.collect(view, &mut blocks);
        blocks.join("\n\n")
    }

    fn collect(&self, view: &View, blocks: &mut Vec<String>) {
        match view {
            View::Empty => {}
            // Alignment has no Markdown equivalent; children are emitted in order.
            View::Stack { children, .. } => {
                for child in children {
                    self.collect(child, blocks);
                }
            }
            View::Heading { text } => blocks.push(format!("## {text}")),
            View::Field { label, value } => blocks.push(format!("**{label}:** {value}")),
            View::List { items } => {
                if !items.is_empty() {
                    blocks.push(items.iter().map(|item| format!("- {item}")).join("\n"));
                }
            }
            View::Table { headers, rows } => blocks.push(self.table(headers, rows)),
            inline => blocks.push(self.inline(inline)),
        }
    }

    fn inline(&self, view: &View) -> String {
        match view {
            View::Empty | View::Table { .. } => PLACEHOLDER.to_string(),
            View::Heading { text } | View::Text { text } => escape_cell(text),
            View::Field { label, value } => format!("{}: {}", escape_cell(label), escape_cell(value)),
            View::Link { label, url } => {
                format!("[{}]({})", escape_cell(label), escape_target(url))
            }
            View::Phone { number } => format!("[{}](tel:{})", number, dial_string(number)),
            View::List { items } => escape_cell(&items.join(", ")),
            View::Stack { children, .. } => children.iter().map(|c| self.inline(c)).join(" "),
        }
    }

    fn table(&self, headers: &[String], rows: &[Vec<View>]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 2);
        lines.push(row_line(headers.iter().map(|h| escape_cell(h))));
        lines.push(row_line(headers.iter().map(|_| "---".to_string())));
        for row in rows {
            lines.push(row_line(row.iter().map(|cell| self.inline(cell))));
        }
        lines.join("\n")
    }
}

fn row_line(mut cells: impl Iterator<Item = String>) -> String {
    format!("| {} |", cells.join(" | "))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Percent-encode the characters that would end a link target or a table cell.
fn escape_target(url: &str) -> String {
    url.replace('|', "%7C")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_view_when_formatting_then_empty_string() {
        assert_eq!(MarkdownFormatter.format(&View::centered(View::Empty)), "");
    }

    #[test]
    fn given_table_when_formatting_then_emits_pipe_table() {
        let view = View::centered(View::stack(vec![
            View::heading("Adana"),
            View::Table {
                headers: vec!["Name".into(), "Phone".into(), "Source".into()],
                rows: vec![vec![
                    View::text("Okul | Salon"),
                    View::phone("0532 123"),
                    View::link("Source", "https://x.org"),
                ]],
            },
        ]));

        let expected = [
            "## Adana",
            "",
            "| Name | Phone | Source |",
            "| --- | --- | --- |",
            "| Okul \\| Salon | [0532 123](tel:0532123) | [Source](https://x.org) |",
        ]
        .join("\n");
        assert_eq!(MarkdownFormatter.format(&view), expected);
    }

    #[test]
    fn given_link_with_pipe_and_parens_when_formatting_table_then_target_is_encoded() {
        let view = View::Table {
            headers: vec!["Name".into(), "Source".into()],
            rows: vec![vec![
                View::text("Okul"),
                View::link("Source", "https://x.org/?q=a|b&p=(1)"),
            ]],
        };

        let out = MarkdownFormatter.format(&view);

        let row = out.lines().last().unwrap();
        assert_eq!(row, "| Okul | [Source](https://x.org/?q=a%7Cb&p=%281%29) |");
        assert_eq!(row.matches(" | ").count(), 1);
    }

    #[test]
    fn given_fields_and_list_when_formatting_then_blocks_are_separated() {
        let view = View::stack(vec![
            View::field("SMS", "DEPREM"),
            View::List {
                items: vec!["Stadyum".into(), "Meydan".into()],
            },
        ]);
        assert_eq!(
            MarkdownFormatter.format(&view),
            "**SMS:** DEPREM\n\n- Stadyum\n- Meydan"
        );
    }
}

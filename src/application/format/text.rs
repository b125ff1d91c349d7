//! Terminal text formatter
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically when color is on.

use colored::{ColoredString, Colorize};
use itertools::Itertools;
use unicode_width::UnicodeWidthStr;

use crate::domain::{Align, View};

/// One output line, kept both plain (for width math) and styled.
#[derive(Debug, Clone)]
struct Line {
    plain: String,
    styled: String,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            styled: text.clone(),
            plain: text,
        }
    }
}

/// Terminal columns occupied by `s` (wide CJK glyphs count as two).
fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

#[derive(Debug, Clone)]
pub struct TextFormatter {
    width: usize,
    color: bool,
}

impl TextFormatter {
    pub fn new(width: usize, color: bool) -> Self {
        Self { width, color }
    }

    pub fn format(&self, view: &View) -> String {
        let mut out = Vec::new();
        self.collect(view, Align::Start, &mut out);
        out.into_iter()
            .map(|line| line.trim_end().to_string())
            .join("\n")
    }

    fn collect(&self, view: &View, align: Align, out: &mut Vec<String>) {
        match view {
            View::Empty => {}
            View::Stack {
                align: own,
                children,
            } => {
                // Centering is inherited by everything below a centered stack.
                let align = if *own == Align::Center { Align::Center } else { align };
                for (i, child) in children.iter().enumerate() {
                    if i > 0 && (is_block(child) || is_block(&children[i - 1])) {
                        out.push(String::new());
                    }
                    self.collect(child, align, out);
                }
            }
            View::List { items } => {
                for item in items {
                    self.push(out, align, Line::plain(format!("• {item}")));
                }
            }
            View::Table { headers, rows } => {
                let lines = self.table_lines(headers, rows);
                // One pad for the whole table so columns stay aligned when centered.
                let widest = lines.iter().map(|l| display_width(&l.plain)).max().unwrap_or(0);
                let pad = self.pad_for(align, widest);
                for line in lines {
                    out.push(format!("{}{}", " ".repeat(pad), line.styled));
                }
            }
            inline => {
                let line = self.inline(inline);
                self.push(out, align, line);
            }
        }
    }

    fn pad_for(&self, align: Align, width: usize) -> usize {
        match align {
            Align::Start => 0,
            Align::Center => self.width.saturating_sub(width) / 2,
        }
    }

    fn push(&self, out: &mut Vec<String>, align: Align, line: Line) {
        let pad = self.pad_for(align, display_width(&line.plain));
        out.push(format!("{}{}", " ".repeat(pad), line.styled));
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn inline(&self, view: &View) -> Line {
        match view {
            View::Empty | View::Table { .. } => Line::plain(""),
            View::Heading { text } => Line {
                plain: text.clone(),
                styled: self.paint(text, |s| s.cyan().bold()),
            },
            View::Text { text } => Line::plain(text.as_str()),
            View::Field { label, value } => Line {
                plain: format!("{label}: {value}"),
                styled: format!("{}: {}", self.paint(label, |s| s.bold()), value),
            },
            View::Link { label, url } if label == url => Line {
                plain: url.clone(),
                styled: self.paint(url, |s| s.blue().underline()),
            },
            View::Link { label, url } => Line {
                plain: format!("{label} <{url}>"),
                styled: format!(
                    "{} <{}>",
                    self.paint(label, |s| s.underline()),
                    self.paint(url, |s| s.blue())
                ),
            },
            View::Phone { number } => Line {
                plain: number.clone(),
                styled: self.paint(number, |s| s.green()),
            },
            View::List { items } => Line::plain(items.join(", ")),
            View::Stack { children, .. } => {
                let parts: Vec<Line> = children.iter().map(|c| self.inline(c)).collect();
                Line {
                    plain: parts.iter().map(|l| l.plain.as_str()).join(" "),
                    styled: parts.iter().map(|l| l.styled.as_str()).join(" "),
                }
            }
        }
    }

    fn table_lines(&self, headers: &[String], rows: &[Vec<View>]) -> Vec<Line> {
        let cells: Vec<Vec<Line>> = rows
            .iter()
            .map(|row| row.iter().map(|cell| self.inline(cell)).collect())
            .collect();

        let columns = cells
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for (i, header) in headers.iter().enumerate() {
            widths[i] = widths[i].max(display_width(header));
        }
        for row in &cells {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(display_width(&cell.plain));
            }
        }

        let header_cells: Vec<Line> = headers
            .iter()
            .map(|h| Line {
                plain: h.clone(),
                styled: self.paint(h, |s| s.bold()),
            })
            .collect();

        let mut lines = vec![join_padded(&header_cells, &widths)];
        lines.push(Line::plain(
            widths.iter().map(|w| "─".repeat(*w)).join("  "),
        ));
        lines.extend(cells.iter().map(|row| join_padded(row, &widths)));
        lines
    }
}

fn is_block(view: &View) -> bool {
    matches!(view, View::Stack { .. } | View::Table { .. } | View::List { .. })
}

fn join_padded(cells: &[Line], widths: &[usize]) -> Line {
    let mut plain = Vec::with_capacity(cells.len());
    let mut styled = Vec::with_capacity(cells.len());
    for (cell, width) in cells.iter().zip(widths) {
        let fill = " ".repeat(width.saturating_sub(display_width(&cell.plain)));
        plain.push(format!("{}{}", cell.plain, fill));
        styled.push(format!("{}{}", cell.styled, fill));
    }
    Line {
        plain: plain.join("  ").trim_end().to_string(),
        styled: styled.join("  "),
    }
}

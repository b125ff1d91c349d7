//! Presentational view tree produced by the renderer
//!
//! A `View` describes what to show, not how. Formatters in the application
//! layer turn it into terminal text, Markdown, or JSON.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a stack's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Nothing to show.
    Empty,
    /// Children stacked vertically.
    Stack { align: Align, children: Vec<View> },
    Heading { text: String },
    Text { text: String },
    /// Labelled value, e.g. `Branch: Ankara`.
    Field { label: String, value: String },
    Link { label: String, url: String },
    /// Dialable phone number.
    Phone { number: String },
    List { items: Vec<String> },
    /// Rows hold inline views (text, links, phones).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<View>>,
    },
}

impl View {
    /// Wrap a view in a centered vertical stack.
    pub fn centered(inner: View) -> Self {
        View::Stack {
            align: Align::Center,
            children: vec![inner],
        }
    }

    pub fn stack(children: Vec<View>) -> Self {
        View::Stack {
            align: Align::Start,
            children,
        }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        View::Heading { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        View::Text { text: text.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        View::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        View::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn phone(number: impl Into<String>) -> Self {
        View::Phone {
            number: number.into(),
        }
    }

    /// True when the view, after unwrapping stacks, shows nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            View::Empty => true,
            View::Stack { children, .. } => children.iter().all(View::is_blank),
            _ => false,
        }
    }
}

//! Render the typed data leaves of a donation and help guide tree.
//!
//! A guide is a tree of question nodes and data leaves. Each data leaf
//! carries a payload tagged by `dataType`; [`domain::render_data`] selects
//! the leaf view registered for the tag and produces a [`domain::View`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

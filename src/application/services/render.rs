//! Render service
//!
//! Loads tree-node documents and renders data leaves into the configured
//! output format.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::format::{MarkdownFormatter, OutputFormat, TextFormatter};
use crate::application::leaves::StandardLeaves;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{render_data, DataNode, TreeNode, View};
use crate::infrastructure::traits::FileSystem;

/// Service for loading guide documents and rendering their data leaves.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
    leaves: StandardLeaves,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        let leaves = StandardLeaves::new(settings.labels.clone());
        Self {
            fs,
            settings,
            leaves,
        }
    }

    /// Read and parse a tree-node document from disk.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<TreeNode> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        self.parse_document(&content, &path.display().to_string())
    }

    /// Parse a tree-node document. `origin` names the source in errors.
    pub fn parse_document(&self, content: &str, origin: &str) -> ApplicationResult<TreeNode> {
        let node: TreeNode =
            serde_json::from_str(content).map_err(|e| ApplicationError::InvalidDocument {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        debug!("parse_document: origin={} type={}", origin, node.kind());
        Ok(node)
    }

    /// Render a node. Only data leaves can be rendered; questions need a
    /// selection first.
    pub fn render_node(&self, node: &TreeNode) -> ApplicationResult<View> {
        match node {
            TreeNode::Data(data) => Ok(self.render_data_node(data)),
            TreeNode::Question(question) => {
                Err(ApplicationError::NotADataNode(question.text.clone()))
            }
        }
    }

    /// Render a data leaf with the standard leaf views.
    pub fn render_data_node(&self, node: &DataNode) -> View {
        if self.settings.warn_unknown_tags && !node.data.is_recognized() {
            warn!(
                "no view registered for dataType {:?}, rendering nothing",
                node.data.tag().unwrap_or("<missing>")
            );
        }
        render_data(node, &self.leaves)
    }

    /// Format a rendered view.
    pub fn format(&self, view: &View, format: OutputFormat) -> ApplicationResult<String> {
        match format {
            OutputFormat::Text => {
                Ok(TextFormatter::new(self.settings.width, self.settings.color).format(view))
            }
            OutputFormat::Markdown => Ok(MarkdownFormatter.format(view)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(view).map_err(|e| ApplicationError::OperationFailed {
                    context: "serialize view".to_string(),
                    source: Box::new(e),
                })
            }
        }
    }

    /// Parse, render and format a document in one step.
    #[instrument(level = "debug", skip(self, content))]
    pub fn render_document(
        &self,
        content: &str,
        origin: &str,
        format: OutputFormat,
    ) -> ApplicationResult<String> {
        let node = self.parse_document(content, origin)?;
        let view = self.render_node(&node)?;
        self.format(&view, format)
    }
}

//! The end-to-end compile pipeline.

use crate::error::CompileError;
use crate::expand::{expand, ExpandOptions};
use crate::session::Session;
use std::path::Path;
use tack_common::InternalError;
use tack_config::{resolve_content_files, TackConfig};
use tack_css::AstNode;
use tack_diagnostics::DiagnosticSink;
use tack_extract::{ChangedContent, HandlerRegistry};
use tack_generate::{ConfigResolver, RuleResolver};
use tack_source::{FileId, SourceDb};

/// The collaborators a compile runs with: how candidates become rules,
/// how content is read, and which content to scan.
pub struct Pipeline {
    /// Rule synthesis.
    pub resolver: Box<dyn RuleResolver>,
    /// Per-extension content handlers.
    pub handlers: HandlerRegistry,
    /// Content scanned on the next compile.
    pub content: Vec<ChangedContent>,
    /// Expansion tuning.
    pub options: ExpandOptions,
}

impl Pipeline {
    /// Creates a pipeline with the default handlers and no content.
    pub fn new(resolver: Box<dyn RuleResolver>) -> Self {
        Self {
            resolver,
            handlers: HandlerRegistry::new(),
            content: Vec::new(),
            options: ExpandOptions::default(),
        }
    }

    /// Builds a pipeline from a loaded configuration.
    ///
    /// `[content]` file patterns are resolved against `root`, usually the
    /// directory holding `tack.toml`. Inline `[[content.raw]]` blobs are
    /// scanned as well.
    pub fn from_config(config: &TackConfig, root: &Path) -> Result<Self, CompileError> {
        let resolver = ConfigResolver::new(config)?;
        let mut content: Vec<ChangedContent> = config
            .content
            .raw
            .iter()
            .map(|raw| ChangedContent::inline(raw.content.as_str(), raw.extension.as_str()))
            .collect();
        content.extend(
            resolve_content_files(&config.content, root)?
                .into_iter()
                .map(ChangedContent::file),
        );
        tracing::debug!(items = content.len(), "content resolved");

        Ok(Self {
            resolver: Box::new(resolver),
            handlers: HandlerRegistry::from_config(&config.content),
            content,
            options: ExpandOptions::from(&config.options),
        })
    }

    /// Replaces the content scanned on the next compile.
    pub fn with_content(mut self, content: Vec<ChangedContent>) -> Self {
        self.content = content;
        self
    }
}

/// Compiles one stylesheet: parse, normalize directives, expand.
///
/// Warnings land in `sink`; the first fatal error aborts the pass and no
/// output is produced. The session's caches carry over to the next call.
pub async fn compile(
    source_db: &SourceDb,
    file: FileId,
    pipeline: &Pipeline,
    session: &mut Session,
    sink: &DiagnosticSink,
) -> Result<Vec<AstNode>, CompileError> {
    let source = source_db
        .try_get_file(file)
        .ok_or_else(|| InternalError::new(format!("no source for file id {}", file.as_raw())))?;

    let mut ast = tack_css::parse(&source.content, file)?;
    let registry = tack_directives::normalize(&mut ast, sink)?;
    tracing::debug!(
        file = %source.path.display(),
        layers = ?registry.tailwind,
        apply_sites = registry.apply.len(),
        "directives normalized"
    );

    expand(
        &mut ast,
        &pipeline.content,
        &pipeline.handlers,
        pipeline.resolver.as_ref(),
        session,
        sink,
        pipeline.options,
    )
    .await?;
    Ok(ast)
}

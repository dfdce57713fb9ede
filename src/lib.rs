//! A CommonMark-compatible Markdown parser and HTML renderer.
//!
//! ```
//! assert_eq!(cm_engine::render("Hello *world*"), "<p>Hello <em>world</em></p>\n");
//! ```
//!
//! The pipeline is three pure stages: [`parse`] builds a [`nodes::Document`]
//! from raw Markdown, the inline phase resolves each text-bearing leaf's
//! raw buffer into [`nodes::Inline`] nodes, and [`render_ast`] walks the
//! resulting tree to HTML. [`render`] runs the whole pipeline in one call.
//! GFM extensions, HTML sanitization beyond CommonMark's own raw-HTML
//! policy, syntax highlighting, source positions, and incremental reparse
//! are out of scope.

mod block;
mod ctype;
mod html;
mod inline;
pub mod nodes;
pub mod plugins;
mod refdef;
mod scanners;
mod strings;

#[cfg(test)]
mod tests;

use nodes::Document;
use plugins::Plugins;
use std::fmt;

/// Options accepted by [`parse`]/[`render`]. Currently has no fields but
/// exists as the extension point a future non-default rendering mode (such
/// as a stricter URL-escaping policy) would hang off, mirroring the shape
/// comrak's `Options` struct takes at a much larger scope.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {}

/// Returned by [`parse_checked`] when the input's container nesting exceeds
/// the parser's nesting depth cap. The partially-built document up to the
/// point the limit was hit is still available via [`LimitError::partial`].
#[derive(Debug)]
pub struct LimitError {
    partial: Document,
}

impl LimitError {
    /// The document as parsed up to the point the nesting limit was hit;
    /// containers beyond the limit are silently absent, never malformed.
    pub fn partial(&self) -> &Document {
        &self.partial
    }

    pub fn into_partial(self) -> Document {
        self.partial
    }
}

impl fmt::Display for LimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nesting depth exceeded {} open containers",
            block::MAX_NESTING_DEPTH
        )
    }
}

impl std::error::Error for LimitError {}

/// Parses `markdown` into a [`Document`], running both the block and inline
/// phases. Never fails: on pathological nesting, later containers are
/// silently dropped rather than the call returning an error (spec.md §5/§7
/// "fails safe"). Use [`parse_checked`] to be notified when that happens.
pub fn parse(markdown: &str) -> Document {
    let mut document = block::parse_blocks(markdown);
    inline::run_inline_phase(&mut document);
    document
}

/// Like [`parse`], but reports [`LimitError`] if the nesting depth cap
/// (spec.md §5) was hit anywhere in the input.
pub fn parse_checked(markdown: &str) -> Result<Document, LimitError> {
    let (mut document, truncated) = block::parse_blocks_checked(markdown);
    inline::run_inline_phase(&mut document);
    if truncated {
        Err(LimitError { partial: document })
    } else {
        Ok(document)
    }
}

/// Parses `markdown` and renders it straight to HTML — the common case.
pub fn render(markdown: &str) -> String {
    render_with_options(markdown, &RenderOptions::default())
}

/// Like [`render`], threading through [`RenderOptions`].
pub fn render_with_options(markdown: &str, options: &RenderOptions) -> String {
    let _ = options;
    let document = parse(markdown);
    render_ast(&document)
}

/// Renders an already-parsed [`Document`] to HTML. Callers that need to
/// inspect or transform the AST between parsing and rendering should call
/// [`parse`] then this function directly, rather than [`render`].
pub fn render_ast(document: &Document) -> String {
    html::render(document)
}

/// Runs `parse` → registered transform hooks → `render_ast` → registered
/// post-process hooks, per spec.md §6's optional plugin surface.
pub fn render_with_plugins(markdown: &str, plugins: &Plugins) -> String {
    let document = parse(markdown);
    let document = plugins.apply_transforms(document);
    let html = render_ast(&document);
    plugins.apply_post_processes(html)
}

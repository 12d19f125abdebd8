//! Ruby source parsing on top of tree-sitter.
//!
//! Produces one [`ParsedSource`] per file, carrying the tree together with
//! the source text and the root-relative path the detectors report against.
//! A tree containing error or missing nodes is rejected as a whole; partial
//! trees are never handed to the detector pipeline.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// A successfully parsed Ruby file.
pub struct ParsedSource {
    /// Path relative to the scan root, forward-slash separated.
    pub path: String,
    /// Full source text the tree was parsed from.
    pub source: String,
    tree: Tree,
}

impl ParsedSource {
    /// Root node of the syntax tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text as bytes, for `Node::utf8_text` lookups.
    pub fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}

/// Per-file parse failure. Non-fatal: the traverser records it and moves on.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message}")]
    Syntax { message: String },

    #[error("{source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Language(#[from] tree_sitter::LanguageError),
}

impl ParseError {
    /// Stable kind name used verbatim in formatted parse-error entries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "SyntaxError",
            ParseError::Read { .. } => "ReadError",
            ParseError::Language(_) => "LanguageError",
        }
    }
}

/// Reusable parser configured with the Ruby grammar.
pub struct RubyParser {
    parser: Parser,
}

impl RubyParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_ruby::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Read and parse the file at `rel_path` under `root`.
    pub fn parse_file(&mut self, root: &Path, rel_path: &str) -> Result<ParsedSource, ParseError> {
        let source = fs::read_to_string(root.join(rel_path))
            .map_err(|source| ParseError::Read { source })?;
        self.parse_source(rel_path, source)
    }

    /// Parse already-loaded source text, tagging the tree with `rel_path`.
    pub fn parse_source(
        &mut self,
        rel_path: &str,
        source: String,
    ) -> Result<ParsedSource, ParseError> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| ParseError::Syntax {
                message: "parser produced no tree".to_string(),
            })?;

        if tree.root_node().has_error() {
            return Err(syntax_error(&tree, &source));
        }

        Ok(ParsedSource {
            path: rel_path.to_string(),
            source,
            tree,
        })
    }
}

fn syntax_error(tree: &Tree, source: &str) -> ParseError {
    let message = match first_error_node(tree.root_node()) {
        Some(node) => {
            let line = node.start_position().row + 1;
            if node.is_missing() {
                format!("missing {} near line {}", node.kind(), line)
            } else {
                let snippet: String = node
                    .utf8_text(source.as_bytes())
                    .unwrap_or("")
                    .chars()
                    .take(40)
                    .collect();
                format!("unexpected token near line {}: {:?}", line, snippet)
            }
        }
        None => "invalid syntax".to_string(),
    };
    ParseError::Syntax { message }
}

/// Earliest error or missing node in the tree, in source order. Subtrees
/// without errors are pruned via `Node::has_error`.
fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            for i in (0..node.child_count()).rev() {
                if let Some(child) = node.child(i) {
                    stack.push(child);
                }
            }
        }
    }
    None
}

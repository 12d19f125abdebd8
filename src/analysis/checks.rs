//! Built-in speedup checks.
//!
//! Each check matches one specific AST shape with a well-known faster
//! alternative, and reports the 1-based lines where the shape occurs.
//! Checks only look at the tree and source text; they never touch the
//! filesystem.

use tree_sitter::Node;

use super::ast::{
    arguments, for_each_node, has_block, line, method_name, receiver, single_char_string,
};
use crate::parser::ParsedSource;

/// A single, independently toggleable detector rule.
pub trait SpeedupCheck {
    /// Identifier used in the `speedups` config key.
    fn id(&self) -> &'static str;

    /// Human-readable advice shown in the report.
    fn explanation(&self) -> &'static str;

    /// Lines on which the idiom occurs.
    fn scan(&self, source: &ParsedSource) -> Vec<usize>;
}

/// All built-in checks, in reporting order.
pub fn builtin_checks() -> Vec<Box<dyn SpeedupCheck>> {
    vec![
        Box::new(ForLoopVsEach),
        Box::new(KeysEachVsEachKey),
        Box::new(ShuffleFirstVsSample),
        Box::new(SelectFirstVsDetect),
        Box::new(SelectLastVsReverseDetect),
        Box::new(GsubVsTr),
        Box::new(FetchWithArgumentVsBlock),
        Box::new(ModuleEval),
    ]
}

/// Collect the lines of every node satisfying `predicate`.
fn matching_lines(source: &ParsedSource, predicate: impl Fn(Node<'_>) -> bool) -> Vec<usize> {
    let mut lines = Vec::new();
    for_each_node(source.root(), &mut |node| {
        if predicate(node) {
            lines.push(line(node));
        }
    });
    lines.sort_unstable();
    lines
}

/// Whether `node` is a call of `outer` whose receiver is a call of `inner`.
fn chained_call(node: Node<'_>, src: &[u8], inner: &str, outer: &str) -> bool {
    method_name(node, src) == Some(outer)
        && receiver(node).is_some_and(|recv| method_name(recv, src) == Some(inner))
}

pub struct ForLoopVsEach;

impl SpeedupCheck for ForLoopVsEach {
    fn id(&self) -> &'static str {
        "for_loop_vs_each"
    }

    fn explanation(&self) -> &'static str {
        "Iterating with a for loop is slower than each."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| node.kind() == "for")
    }
}

pub struct KeysEachVsEachKey;

impl SpeedupCheck for KeysEachVsEachKey {
    fn id(&self) -> &'static str {
        "keys_each_vs_each_key"
    }

    fn explanation(&self) -> &'static str {
        "Calling keys.each allocates an array; each_key does not."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            chained_call(node, source.bytes(), "keys", "each")
        })
    }
}

pub struct ShuffleFirstVsSample;

impl SpeedupCheck for ShuffleFirstVsSample {
    fn id(&self) -> &'static str {
        "shuffle_first_vs_sample"
    }

    fn explanation(&self) -> &'static str {
        "shuffle.first is slower than sample."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            chained_call(node, source.bytes(), "shuffle", "first")
        })
    }
}

pub struct SelectFirstVsDetect;

impl SpeedupCheck for SelectFirstVsDetect {
    fn id(&self) -> &'static str {
        "select_first_vs_detect"
    }

    fn explanation(&self) -> &'static str {
        "select followed by first scans the whole collection; detect stops early."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            chained_call(node, source.bytes(), "select", "first")
                && receiver(node).is_some_and(has_block)
        })
    }
}

pub struct SelectLastVsReverseDetect;

impl SpeedupCheck for SelectLastVsReverseDetect {
    fn id(&self) -> &'static str {
        "select_last_vs_reverse_detect"
    }

    fn explanation(&self) -> &'static str {
        "select followed by last is slower than reverse_each.detect."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            chained_call(node, source.bytes(), "select", "last")
                && receiver(node).is_some_and(has_block)
        })
    }
}

pub struct GsubVsTr;

impl SpeedupCheck for GsubVsTr {
    fn id(&self) -> &'static str {
        "gsub_vs_tr"
    }

    fn explanation(&self) -> &'static str {
        "gsub with single-character strings is slower than tr."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            if method_name(node, source.bytes()) != Some("gsub") {
                return false;
            }
            let args = arguments(node);
            args.len() == 2
                && args
                    .iter()
                    .all(|arg| single_char_string(*arg, source.bytes()))
        })
    }
}

pub struct FetchWithArgumentVsBlock;

impl SpeedupCheck for FetchWithArgumentVsBlock {
    fn id(&self) -> &'static str {
        "fetch_with_argument_vs_block"
    }

    fn explanation(&self) -> &'static str {
        "fetch with a default argument evaluates the default eagerly; prefer a block."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            method_name(node, source.bytes()) == Some("fetch")
                && arguments(node).len() == 2
                && !has_block(node)
        })
    }
}

pub struct ModuleEval;

impl SpeedupCheck for ModuleEval {
    fn id(&self) -> &'static str {
        "module_eval"
    }

    fn explanation(&self) -> &'static str {
        "module_eval with a string is slower than define_method."
    }

    fn scan(&self, source: &ParsedSource) -> Vec<usize> {
        matching_lines(source, |node| {
            matches!(
                method_name(node, source.bytes()),
                Some("module_eval") | Some("class_eval")
            ) && arguments(node)
                .first()
                .is_some_and(|arg| arg.kind() == "string")
        })
    }
}

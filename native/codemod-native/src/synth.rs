//! Replacement expressions for icons stored as plain values.
//!
//! `{ name: Add24 }` would lose its size once `Add24` becomes `Add`, so the
//! value is wrapped in a ref-forwarding component that passes `size` along.

use crate::options::PrintOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synthesis {
    /// Capitalized binding, rendered as a JSX element.
    Tag,
    /// Lowercase binding, which JSX would treat as an intrinsic element;
    /// rendered through `React.createElement`.
    Callable,
}

impl Synthesis {
    pub fn for_binding(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_lowercase() => Synthesis::Callable,
            _ => Synthesis::Tag,
        }
    }
}

/// Builds the wrapper expression for `binding` at `size`.
///
/// `indent` is the leading whitespace of the line holding the property; the
/// multi-line object of the callable form is indented one level past it.
pub fn synthesize(binding: &str, size: u32, indent: &str, print: &PrintOptions) -> String {
    match Synthesis::for_binding(binding) {
        Synthesis::Tag => format!(
            "React.forwardRef((props, ref) => <{binding} ref={{ref}} size={{{size}}} {{...props}} />)"
        ),
        Synthesis::Callable => {
            let inner = format!("{indent}  ");
            let trailing = if print.trailing_comma { "," } else { "" };
            format!(
                "(props) => React.forwardRef((props, ref) => React.createElement({binding}, {{\n\
                 {inner}ref,\n\
                 {inner}size: {size},\n\
                 {inner}...props{trailing}\n\
                 {indent}}}))"
            )
        }
    }
}

/// Leading whitespace of the line containing byte offset `at`.
pub fn line_indent(source: &str, at: u32) -> &str {
    let at = (at as usize).min(source.len());
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    let line = &source[line_start..];
    let width = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..width]
}

//! CSS fragment generators for theming and responsive layout.
//!
//! Fragments use CSS nesting: `&` stands for the selector of the rule the
//! fragment is embedded in, so callers place the output inside a component's
//! rule block. Nothing here touches I/O.

mod base_styles;
mod breakpoints;
mod theme;

pub use base_styles::{BaseStyleTokens, ColorPalette, base_styles};
pub use breakpoints::{Breakpoint, BreakpointError, at_breakpoint, until_breakpoint};
pub use theme::{
    DARK_THEME_CLASS, LIGHT_THEME_CLASS, ONLY_IN_DARK_THEME_CLASS, ONLY_IN_LIGHT_THEME_CLASS,
    Theme, in_dark_theme, in_light_theme, in_root_dark_theme, in_root_light_theme,
    only_in_dark_theme, only_in_light_theme,
};

/// Wrap `body` in `selector { ... }`, indenting each body line by two spaces.
pub(crate) fn block(selector: &str, body: &str) -> String {
    let mut out = String::with_capacity(selector.len() + body.len() + 8);
    out.push_str(selector);
    out.push_str(" {\n");
    for line in body.trim().lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_indents_nested_lines() {
        assert_eq!(
            block(".a", "color: red;\n.b {\n  margin: 0;\n}"),
            ".a {\n  color: red;\n  .b {\n    margin: 0;\n  }\n}"
        );
    }

    #[test]
    fn block_keeps_blank_lines_unindented() {
        assert_eq!(block("x", "a;\n\nb;"), "x {\n  a;\n\n  b;\n}");
    }
}

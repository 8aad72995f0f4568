//! Light/dark theme scoping.
//!
//! A rule applies in a theme when the OS preference asks for it and the page
//! has not explicitly opted into the other theme, or when the page carries the
//! explicit theme class.

use super::block;

pub const LIGHT_THEME_CLASS: &str = "__theme-light";
pub const DARK_THEME_CLASS: &str = "__theme-dark";
/// Elements with this class are hidden unless the light theme is active.
pub const ONLY_IN_LIGHT_THEME_CLASS: &str = "only-in-light-theme";
/// Elements with this class are hidden unless the dark theme is active.
pub const ONLY_IN_DARK_THEME_CLASS: &str = "only-in-dark-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn scheme(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Light => LIGHT_THEME_CLASS,
            Self::Dark => DARK_THEME_CLASS,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

fn media(theme: Theme, body: &str) -> String {
    block(
        &format!("@media (prefers-color-scheme: {})", theme.scheme()),
        body,
    )
}

/// Scope `css` to `theme` for a component rule.
fn in_theme(theme: Theme, css: &str) -> String {
    let excluded = format!("&&:not(.{} &&)", theme.opposite().class());
    [
        media(theme, &block(&excluded, css)),
        block(&format!("&.{}", theme.class()), css),
        // `&&` raises specificity above the component's own base rule.
        block(&format!(".{} &&", theme.class()), css),
    ]
    .join("\n\n")
}

/// Scope `css` to `theme` at the document root.
fn in_root_theme(theme: Theme, css: &str) -> String {
    [
        media(theme, css),
        block(&format!(".{}", theme.class()), css),
    ]
    .join("\n\n")
}

pub fn in_light_theme(css: &str) -> String {
    in_theme(Theme::Light, css)
}

pub fn in_dark_theme(css: &str) -> String {
    in_theme(Theme::Dark, css)
}

pub fn in_root_light_theme(css: &str) -> String {
    in_root_theme(Theme::Light, css)
}

pub fn in_root_dark_theme(css: &str) -> String {
    in_root_theme(Theme::Dark, css)
}

/// Rule showing `.only-in-light-theme` elements only under the light theme.
pub fn only_in_light_theme() -> String {
    block(
        &format!(".{ONLY_IN_LIGHT_THEME_CLASS}"),
        &format!("display: none;\n\n{}", in_light_theme("display: block;")),
    )
}

/// Rule showing `.only-in-dark-theme` elements only under the dark theme.
pub fn only_in_dark_theme() -> String {
    block(
        &format!(".{ONLY_IN_DARK_THEME_CLASS}"),
        &format!("display: none;\n\n{}", in_dark_theme("display: block;")),
    )
}

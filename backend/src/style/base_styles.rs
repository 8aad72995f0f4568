//! Global stylesheet served to every page.

use super::block;
use super::theme::{
    ONLY_IN_DARK_THEME_CLASS, ONLY_IN_LIGHT_THEME_CLASS, in_dark_theme, in_light_theme,
    in_root_dark_theme, in_root_light_theme,
};

/// One `--<name>: <value>` custom property per entry, keyed without the dashes.
pub type ColorPalette = Vec<(String, String)>;

fn palette(entries: &[(&str, &str)]) -> ColorPalette {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect()
}

/// Design tokens substituted into the base stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseStyleTokens {
    pub body_font: String,
    pub body_text: String,
    pub background: String,
    /// Colour variables declared on `:root`; also the light theme values.
    pub light_colors: ColorPalette,
    /// Overrides applied on `:root` under the dark theme.
    pub dark_colors: ColorPalette,
}

impl Default for BaseStyleTokens {
    fn default() -> Self {
        Self {
            body_font: "400 1rem/1.5 system-ui, sans-serif".to_owned(),
            body_text: "var(--color-body-text)".to_owned(),
            background: "var(--color-background)".to_owned(),
            light_colors: palette(&[
                ("color-body-text", "#1f2328"),
                ("color-background", "#ffffff"),
            ]),
            dark_colors: palette(&[
                ("color-body-text", "#e6edf3"),
                ("color-background", "#0d1117"),
            ]),
        }
    }
}

fn declarations(colors: &[(String, String)]) -> String {
    colors
        .iter()
        .map(|(name, value)| format!("--{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `:root` colour variables, the box-sizing reset, body typography and the
/// theme-only visibility classes.
pub fn base_styles(tokens: &BaseStyleTokens) -> String {
    let light = declarations(&tokens.light_colors);
    let root = block(
        ":root",
        &[
            light.clone(),
            in_root_light_theme(&light),
            in_root_dark_theme(&declarations(&tokens.dark_colors)),
        ]
        .join("\n\n"),
    );
    let reset = block("*,\n*::before,\n*::after", "box-sizing: border-box;");
    let body = block(
        "body",
        &format!(
            "font: {};\ncolor: {};\nbackground: {};\nmargin: 0;",
            tokens.body_font, tokens.body_text, tokens.background
        ),
    );
    let dark_only = block(
        &format!(".{ONLY_IN_DARK_THEME_CLASS}"),
        &in_light_theme("display: none;"),
    );
    let light_only = block(
        &format!(".{ONLY_IN_LIGHT_THEME_CLASS}"),
        &in_dark_theme("display: none;"),
    );

    let mut sheet = [root, reset, body, dark_only, light_only].join("\n\n");
    sheet.push('\n');
    sheet
}

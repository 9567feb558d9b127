use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sitegen_theme::{
    render_themes, resolve_all, resolve_theme, HexColor, Scope, ThemeDocument, ThemeError,
    ThemeLoader, ThemeSet,
};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixtures() -> ThemeSet {
    ThemeLoader::new(fixtures().join("themes"))
        .with_default_theme(fixtures().join("theme.toml"))
        .load()
        .expect("fixture themes load")
}

fn fg(themes: &ThemeSet, name: &str, scope: Scope) -> String {
    let theme = resolve_theme(name, themes).unwrap();
    theme.get(scope).fg.as_ref().map(HexColor::to_string).unwrap()
}

#[test]
fn loads_fixture_directory_without_denylisted_themes() {
    let themes = load_fixtures();
    assert_eq!(
        themes.names(),
        vec![
            "catppuccin_frappe",
            "catppuccin_frappe_contrast",
            "catppuccin_mocha",
            "theme",
        ]
    );
}

#[test]
fn mocha_resolves_direct_and_fallback_scopes() {
    let themes = resolve_all(&load_fixtures()).unwrap();

    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::Keyword), "#cba6f7");
    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::Variable), "#cdd6f4");
    // No `constant.numeric`: borrows `constant`.
    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::ConstantNumeric), "#fab387");
    // No `type.builtin`: borrows `type`.
    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::TypeBuiltin), "#f9e2af");
    // No `punctuation.delimiter`: borrows `punctuation`.
    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::PunctuationDelimiter), "#9399b2");

    let mocha = resolve_theme("catppuccin_mocha", &themes).unwrap();
    assert_eq!(mocha.background().as_str(), "#1e1e2e");
    assert_eq!(
        mocha.get(Scope::CursorlinePrimary).bg.as_ref().map(HexColor::as_str),
        Some("#2a2b3c")
    );
    assert_eq!(
        mocha.get(Scope::Ruler).bg.as_ref().map(HexColor::as_str),
        Some("#313244")
    );
}

#[test]
fn inherited_theme_uses_its_own_palette() {
    let themes = resolve_all(&load_fixtures()).unwrap();

    // Scopes come from mocha, palette entries from frappe.
    assert_eq!(fg(&themes, "catppuccin_frappe", Scope::Keyword), "#ca9ee6");
    assert_eq!(fg(&themes, "catppuccin_frappe", Scope::Variable), "#c6d0f5");
    // Palette entries frappe does not override still come from mocha.
    assert_eq!(fg(&themes, "catppuccin_frappe", Scope::StringLiteral), "#a6e3a1");

    let frappe = resolve_theme("catppuccin_frappe", &themes).unwrap();
    assert_eq!(frappe.background().as_str(), "#303446");

    // The parent is untouched by its child's palette.
    assert_eq!(fg(&themes, "catppuccin_mocha", Scope::Keyword), "#cba6f7");
}

#[test]
fn two_level_inheritance_reaches_the_grandparent() {
    let themes = resolve_all(&load_fixtures()).unwrap();

    assert_eq!(fg(&themes, "catppuccin_frappe_contrast", Scope::Comment), "#a6adc8");
    assert_eq!(fg(&themes, "catppuccin_frappe_contrast", Scope::LineNr), "#7f849c");
    // From mocha, two levels up, through frappe's palette.
    assert_eq!(fg(&themes, "catppuccin_frappe_contrast", Scope::Keyword), "#ca9ee6");
}

#[test]
fn renders_requested_themes_in_order() {
    let themes = load_fixtures();
    let html = render_themes(&themes, &["catppuccin_mocha", "theme"]).unwrap();

    let mocha = html.find("data-theme=\"catppuccin_mocha\"").unwrap();
    let default = html.find("data-theme=\"theme\"").unwrap();
    assert!(mocha < default);
    assert_eq!(html.matches("<div class=\"theme-sample\"").count(), 2);

    for part in html.split("color:").skip(1) {
        let value: String = part.chars().take_while(|c| *c != ';').collect();
        assert!(HexColor::parse(&value).is_some(), "bad color `{value}`");
    }
}

#[test]
fn rendering_is_deterministic() {
    let themes = load_fixtures();
    let first = render_themes(&themes, &["catppuccin_frappe"]).unwrap();
    let second = render_themes(&themes, &["catppuccin_frappe"]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn rendering_an_unknown_theme_fails() {
    let themes = load_fixtures();
    let err = render_themes(&themes, &["solarized"]).unwrap_err();
    assert!(matches!(err, ThemeError::UnknownTheme { name } if name == "solarized"));
}

#[test]
fn background_and_keyword_only_theme() {
    let mut themes = ThemeSet::new();
    themes.insert(
        "tiny",
        ThemeDocument::from_toml_str(
            r##"
"ui.background" = { bg = "#111111", fg = "#eeeeee" }
"keyword" = "#ff0000"

[palette]
"##,
        )
        .unwrap(),
    );

    assert_eq!(fg(&themes, "tiny", Scope::Variable), "#eeeeee");
    assert_eq!(fg(&themes, "tiny", Scope::Keyword), "#ff0000");
    assert_eq!(fg(&themes, "tiny", Scope::Function), "#eeeeee");
    assert_eq!(fg(&themes, "tiny", Scope::FunctionMacro), "#eeeeee");
}

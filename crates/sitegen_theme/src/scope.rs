//! Semantic scopes and their fallback chains
//!
//! Themes rarely define every scope the sample snippet needs. Each missing
//! scope borrows from another one, walking a fixed chain that ends at the
//! background pair (`ui.background`). Chains are walked lazily: a scope with
//! its own value never evaluates its fallback, unless its own pair lacks a
//! foreground, in which case only the foreground is borrowed.

use tracing::debug;

use crate::color::{HexColor, Style};
use crate::error::{Channel, Result, ThemeError};
use crate::palette::ThemeStyles;

/// Scopes consumed by the snippet renderer.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Scope {
    // Syntax
    Variable,
    Function,
    FunctionMacro,
    Keyword,
    Constant,
    ConstantNumeric,
    Type,
    TypeBuiltin,
    StringLiteral,
    Operator,
    Punctuation,
    PunctuationDelimiter,
    Comment,

    // Editor chrome
    Background,
    Highlight,
    Cursorline,
    CursorlinePrimary,
    Cursor,
    LineNr,
    LineNrSelected,
    Statusline,

    // Virtual text
    Virtual,
    InlayHint,
    IndentGuide,
    Ruler,
}

/// Where a scope looks when the theme does not define it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fallback {
    /// Background foreground only.
    Foreground,
    /// Whole background pair.
    Background,
    Scope(Scope),
    /// Empty pair.
    Nothing,
}

impl Scope {
    /// Every scope, in declaration order.
    pub const ALL: [Scope; 25] = [
        Scope::Variable,
        Scope::Function,
        Scope::FunctionMacro,
        Scope::Keyword,
        Scope::Constant,
        Scope::ConstantNumeric,
        Scope::Type,
        Scope::TypeBuiltin,
        Scope::StringLiteral,
        Scope::Operator,
        Scope::Punctuation,
        Scope::PunctuationDelimiter,
        Scope::Comment,
        Scope::Background,
        Scope::Highlight,
        Scope::Cursorline,
        Scope::CursorlinePrimary,
        Scope::Cursor,
        Scope::LineNr,
        Scope::LineNrSelected,
        Scope::Statusline,
        Scope::Virtual,
        Scope::InlayHint,
        Scope::IndentGuide,
        Scope::Ruler,
    ];

    /// Scope name as written in theme files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Function => "function",
            Self::FunctionMacro => "function.macro",
            Self::Keyword => "keyword",
            Self::Constant => "constant",
            Self::ConstantNumeric => "constant.numeric",
            Self::Type => "type",
            Self::TypeBuiltin => "type.builtin",
            Self::StringLiteral => "string",
            Self::Operator => "operator",
            Self::Punctuation => "punctuation",
            Self::PunctuationDelimiter => "punctuation.delimiter",
            Self::Comment => "comment",
            Self::Background => "ui.background",
            Self::Highlight => "ui.highlight",
            Self::Cursorline => "ui.cursorline",
            Self::CursorlinePrimary => "ui.cursorline.primary",
            Self::Cursor => "ui.cursor",
            Self::LineNr => "ui.linenr",
            Self::LineNrSelected => "ui.linenr.selected",
            Self::Statusline => "ui.statusline",
            Self::Virtual => "ui.virtual",
            Self::InlayHint => "ui.virtual.inlay-hint",
            Self::IndentGuide => "ui.virtual.indent-guide",
            Self::Ruler => "ui.virtual.ruler",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.name() == name)
    }

    fn fallback(self) -> Fallback {
        match self {
            Self::Variable
            | Self::Operator
            | Self::Punctuation
            | Self::Comment
            | Self::LineNr
            | Self::InlayHint
            | Self::Cursor => Fallback::Foreground,
            Self::Function | Self::Keyword | Self::Constant | Self::Type | Self::StringLiteral => {
                Fallback::Scope(Self::Variable)
            }
            Self::FunctionMacro => Fallback::Scope(Self::Function),
            Self::ConstantNumeric => Fallback::Scope(Self::Constant),
            Self::TypeBuiltin => Fallback::Scope(Self::Type),
            Self::PunctuationDelimiter => Fallback::Scope(Self::Punctuation),
            Self::Highlight => Fallback::Background,
            Self::Cursorline | Self::LineNrSelected => Fallback::Scope(Self::Highlight),
            Self::CursorlinePrimary => Fallback::Scope(Self::Cursorline),
            Self::IndentGuide | Self::Virtual => Fallback::Scope(Self::InlayHint),
            Self::Ruler => Fallback::Scope(Self::IndentGuide),
            Self::Background | Self::Statusline => Fallback::Nothing,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A theme with every [`Scope`] resolved to literal colors.
///
/// Every scope except [`Scope::Statusline`] carries a foreground; the
/// background pair is always complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTheme {
    name: String,
    foreground: HexColor,
    background: HexColor,
    styles: Vec<Style>,
}

impl ResolvedTheme {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, scope: Scope) -> &Style {
        &self.styles[scope.index()]
    }

    /// Foreground of `ui.background`.
    pub fn foreground(&self) -> &HexColor {
        &self.foreground
    }

    /// Background of `ui.background`.
    pub fn background(&self) -> &HexColor {
        &self.background
    }

    pub fn iter(&self) -> impl Iterator<Item = (Scope, &Style)> {
        Scope::ALL.into_iter().zip(&self.styles)
    }
}

struct Resolver<'a> {
    styles: &'a ThemeStyles,
    background: Style,
}

impl Resolver<'_> {
    fn own(&self, scope: Scope) -> Option<&Style> {
        self.styles.get(scope.name()).filter(|style| !style.is_empty())
    }

    fn resolve(&self, scope: Scope) -> Style {
        match scope {
            Scope::Background => self.background.clone(),
            Scope::Statusline => match self.styles.get(scope.name()) {
                None => Style::default(),
                Some(own) => Style {
                    fg: own.fg.clone().or_else(|| self.background.fg.clone()),
                    bg: own.bg.clone().or_else(|| self.background.bg.clone()),
                },
            },
            _ => match self.own(scope) {
                Some(own) if own.fg.is_some() => own.clone(),
                Some(own) => Style {
                    fg: self.fallback(scope).fg,
                    bg: own.bg.clone(),
                },
                None => self.fallback(scope),
            },
        }
    }

    fn fallback(&self, scope: Scope) -> Style {
        match scope.fallback() {
            Fallback::Foreground => Style {
                fg: self.background.fg.clone(),
                bg: None,
            },
            Fallback::Background => self.background.clone(),
            Fallback::Scope(next) => self.resolve(next),
            Fallback::Nothing => Style::default(),
        }
    }
}

/// Resolve every [`Scope`] of one palette-normalized theme.
///
/// `ui.background` must provide a background color; its foreground may come
/// from `ui.text` instead.
pub fn resolve_scopes(theme: &str, styles: &ThemeStyles) -> Result<ResolvedTheme> {
    let missing = |channel| ThemeError::MissingColor {
        theme: theme.to_string(),
        scope: Scope::Background.name().to_string(),
        channel,
    };

    let own = styles.get(Scope::Background.name());
    let background = own
        .and_then(|style| style.bg.clone())
        .ok_or_else(|| missing(Channel::Background))?;
    let foreground = own
        .and_then(|style| style.fg.clone())
        .or_else(|| styles.get("ui.text").and_then(|style| style.fg.clone()))
        .ok_or_else(|| missing(Channel::Foreground))?;

    let resolver = Resolver {
        styles,
        background: Style {
            fg: Some(foreground.clone()),
            bg: Some(background.clone()),
        },
    };
    let resolved: Vec<Style> = Scope::ALL
        .into_iter()
        .map(|scope| resolver.resolve(scope))
        .collect();

    debug!(
        "Resolved {} scopes for theme `{}` ({} defined directly)",
        resolved.len(),
        theme,
        Scope::ALL
            .iter()
            .filter(|scope| resolver.own(**scope).is_some())
            .count()
    );

    Ok(ResolvedTheme {
        name: theme.to_string(),
        foreground,
        background,
        styles: resolved,
    })
}

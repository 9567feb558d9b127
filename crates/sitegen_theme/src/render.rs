//! HTML code-sample snippet for a resolved theme
//!
//! The sample is a fixed 11-line Rust function drawn the way the editor
//! would draw it: line-number gutter, syntax colors, a highlighted cursor
//! line with a block cursor, an inlay hint, an indent guide, whitespace
//! markers, a ruler column and a status line. Every color comes from the
//! resolved theme; the markup uses inline styles only so the snippet can be
//! pasted into any page.

use std::fmt::{self, Display, Formatter};

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::color::HexColor;
use crate::scope::{ResolvedTheme, Scope};

/// Column (0-based, after the gutter) where the ruler is drawn.
pub const RULER_COLUMN: usize = 52;

/// 0-based index of the line holding the cursor.
const CURSOR_LINE: usize = 8;

const STATUSLINE_MODE: &str = "NOR";
const STATUSLINE_FILE: &str = "src/total.rs";
const STATUSLINE_POSITION: &str = "9:27";

#[derive(Clone, Copy, Debug)]
enum Piece {
    /// Text in a scope's colors.
    Styled(Scope, &'static str),
    /// Text in the surrounding line colors.
    Plain(&'static str),
    /// Block cursor over a single character.
    Cursor(&'static str),
}

impl Piece {
    fn text(self) -> &'static str {
        match self {
            Self::Styled(_, text) | Self::Plain(text) | Self::Cursor(text) => text,
        }
    }
}

use Piece::{Cursor, Plain, Styled};

const SAMPLE: [&[Piece]; 11] = [
    &[
        Styled(Scope::Keyword, "use"),
        Plain(" "),
        Styled(Scope::Variable, "std"),
        Styled(Scope::PunctuationDelimiter, "::"),
        Styled(Scope::Variable, "fmt"),
        Styled(Scope::PunctuationDelimiter, "::"),
        Styled(Scope::Type, "Display"),
        Styled(Scope::PunctuationDelimiter, ";"),
        Styled(Scope::Virtual, "··"),
    ],
    &[],
    &[Styled(Scope::Comment, "/// Sum every value below the limit.")],
    &[
        Styled(Scope::Keyword, "fn"),
        Plain(" "),
        Styled(Scope::Function, "total"),
        Styled(Scope::Punctuation, "("),
        Styled(Scope::Variable, "values"),
        Styled(Scope::PunctuationDelimiter, ":"),
        Plain(" "),
        Styled(Scope::Operator, "&"),
        Styled(Scope::Punctuation, "["),
        Styled(Scope::TypeBuiltin, "u32"),
        Styled(Scope::Punctuation, "]"),
        Styled(Scope::PunctuationDelimiter, ","),
        Plain(" "),
        Styled(Scope::Variable, "limit"),
        Styled(Scope::PunctuationDelimiter, ":"),
        Plain(" "),
        Styled(Scope::TypeBuiltin, "u32"),
        Styled(Scope::Punctuation, ")"),
        Plain(" "),
        Styled(Scope::Operator, "->"),
        Plain(" "),
        Styled(Scope::TypeBuiltin, "u32"),
        Plain(" "),
        Styled(Scope::Punctuation, "{"),
    ],
    &[
        Plain("    "),
        Styled(Scope::Keyword, "let"),
        Plain(" "),
        Styled(Scope::Keyword, "mut"),
        Plain(" "),
        Styled(Scope::Variable, "sum"),
        Styled(Scope::InlayHint, ": u32"),
        Plain(" "),
        Styled(Scope::Operator, "="),
        Plain(" "),
        Styled(Scope::ConstantNumeric, "0"),
        Styled(Scope::PunctuationDelimiter, ";"),
    ],
    &[
        Plain("    "),
        Styled(Scope::Keyword, "for"),
        Plain(" "),
        Styled(Scope::Variable, "value"),
        Plain(" "),
        Styled(Scope::Keyword, "in"),
        Plain(" "),
        Styled(Scope::Variable, "values"),
        Plain(" "),
        Styled(Scope::Punctuation, "{"),
    ],
    &[
        Plain("    "),
        Styled(Scope::IndentGuide, "│"),
        Plain("   "),
        Styled(Scope::Keyword, "if"),
        Plain(" "),
        Styled(Scope::Operator, "*"),
        Styled(Scope::Variable, "value"),
        Plain(" "),
        Styled(Scope::Operator, "<"),
        Plain(" "),
        Styled(Scope::Variable, "limit"),
        Plain(" "),
        Styled(Scope::Punctuation, "{"),
        Plain(" "),
        Styled(Scope::Variable, "sum"),
        Plain(" "),
        Styled(Scope::Operator, "+="),
        Plain(" "),
        Styled(Scope::Operator, "*"),
        Styled(Scope::Variable, "value"),
        Styled(Scope::PunctuationDelimiter, ";"),
        Plain(" "),
        Styled(Scope::Punctuation, "}"),
    ],
    &[Plain("    "), Styled(Scope::Punctuation, "}")],
    &[
        Plain("    "),
        Styled(Scope::FunctionMacro, "println!"),
        Styled(Scope::Punctuation, "("),
        Styled(Scope::StringLiteral, "\"total: {}\""),
        Styled(Scope::PunctuationDelimiter, ","),
        Plain(" "),
        Cursor("s"),
        Styled(Scope::Variable, "um"),
        Styled(Scope::Punctuation, ")"),
        Styled(Scope::PunctuationDelimiter, ";"),
    ],
    &[
        Plain("    "),
        Styled(Scope::Variable, "sum"),
        Styled(Scope::PunctuationDelimiter, "."),
        Styled(Scope::Function, "min"),
        Styled(Scope::Punctuation, "("),
        Styled(Scope::TypeBuiltin, "u32"),
        Styled(Scope::PunctuationDelimiter, "::"),
        Styled(Scope::Constant, "MAX"),
        Styled(Scope::Punctuation, ")"),
    ],
    &[Styled(Scope::Punctuation, "}")],
];

/// Number of lines in the sample.
pub const SAMPLE_LINES: usize = SAMPLE.len();

/// Inline `style` attribute for a color pair; empty when both are unset.
struct StyleAttr<'a> {
    fg: Option<&'a HexColor>,
    bg: Option<&'a HexColor>,
}

impl Display for StyleAttr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.fg.is_none() && self.bg.is_none() {
            return Ok(());
        }
        f.write_str(" style=\"")?;
        if let Some(fg) = self.fg {
            write!(f, "color:{fg};")?;
        }
        if let Some(bg) = self.bg {
            write!(f, "background-color:{bg};")?;
        }
        f.write_str("\"")
    }
}

/// Displays as the HTML snippet for one theme.
pub struct Snippet<'a> {
    theme: &'a ResolvedTheme,
}

impl<'a> Snippet<'a> {
    pub fn new(theme: &'a ResolvedTheme) -> Self {
        Self { theme }
    }

    fn attr(&self, scope: Scope) -> StyleAttr<'a> {
        let style = self.theme.get(scope);
        StyleAttr {
            fg: style.fg.as_ref(),
            bg: style.bg.as_ref(),
        }
    }

    fn cursor_attr(&self) -> StyleAttr<'a> {
        let cursor = self.theme.get(Scope::Cursor);
        match &cursor.bg {
            Some(bg) => StyleAttr {
                fg: cursor.fg.as_ref(),
                bg: Some(bg),
            },
            None => StyleAttr {
                fg: Some(self.theme.background()),
                bg: cursor.fg.as_ref(),
            },
        }
    }

    fn ruler_attr(&self) -> StyleAttr<'a> {
        let ruler = self.theme.get(Scope::Ruler);
        StyleAttr {
            fg: None,
            bg: ruler.bg.as_ref().or(ruler.fg.as_ref()),
        }
    }

    fn write_line(&self, f: &mut Formatter<'_>, index: usize, pieces: &[Piece]) -> fmt::Result {
        let selected = index == CURSOR_LINE;
        let (line_attr, number_attr) = if selected {
            let cursorline = self.theme.get(Scope::CursorlinePrimary);
            (
                StyleAttr {
                    fg: None,
                    bg: cursorline.bg.as_ref(),
                },
                self.attr(Scope::LineNrSelected),
            )
        } else {
            (StyleAttr { fg: None, bg: None }, self.attr(Scope::LineNr))
        };

        write!(f, "<span class=\"line\"{line_attr}>")?;
        write!(f, "<span{number_attr}>{:>3} </span>", index + 1)?;

        let mut width = 0;
        for piece in pieces {
            let text = encode_text(piece.text());
            match *piece {
                Styled(scope, _) => write!(f, "<span{}>{text}</span>", self.attr(scope))?,
                Plain(_) => f.write_str(&text)?,
                Cursor(_) => write!(f, "<span{}>{text}</span>", self.cursor_attr())?,
            }
            width += piece.text().chars().count();
        }

        if width < RULER_COLUMN {
            write!(
                f,
                "{:pad$}<span{}> </span>",
                "",
                self.ruler_attr(),
                pad = RULER_COLUMN - width
            )?;
        }

        f.write_str("</span>\n")
    }

    fn write_statusline(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<div class=\"statusline\"{}> {STATUSLINE_MODE}   {STATUSLINE_FILE}{:>pad$} </div>",
            self.attr(Scope::Statusline),
            STATUSLINE_POSITION,
            pad = RULER_COLUMN - STATUSLINE_FILE.len() - STATUSLINE_MODE.len(),
        )
    }
}

impl Display for Snippet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "<div class=\"theme-sample\" data-theme=\"{}\">",
            encode_double_quoted_attribute(self.theme.name())
        )?;
        write!(
            f,
            "<pre{}><code>",
            StyleAttr {
                fg: Some(self.theme.foreground()),
                bg: Some(self.theme.background()),
            }
        )?;
        for (index, pieces) in SAMPLE.iter().enumerate() {
            self.write_line(f, index, pieces)?;
        }
        f.write_str("</code></pre>\n")?;
        self.write_statusline(f)?;
        f.write_str("</div>\n")
    }
}

/// Render the snippet for one resolved theme.
pub fn render_snippet(theme: &ResolvedTheme) -> String {
    Snippet::new(theme).to_string()
}

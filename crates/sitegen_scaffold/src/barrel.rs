//! Barrel module rendering
//!
//! A barrel imports every sibling file of a directory and exports them as one
//! object keyed by file name without extension:
//!
//! ```js
//! import a from "./a.png";
//! import b from "./b.png";
//!
//! export default {
//!   a,
//!   b,
//! };
//! ```

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::error::{Result, ScaffoldError};

pub const HEADER: &str = "// Generated by sitegen. Do not edit.";

/// Words that cannot be used as an import binding.
const RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// One imported file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrelEntry {
    /// Export key: the file name without its extension.
    pub name: String,
    /// Identifier the file is imported as.
    pub binding: String,
    /// File name relative to the barrel.
    pub file_name: String,
}

impl BarrelEntry {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let name = module_name(&file_name).to_string();
        let binding = binding_for(&name);
        Self {
            name,
            binding,
            file_name,
        }
    }
}

/// The generated index for one directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Barrel {
    entries: Vec<BarrelEntry>,
}

impl Barrel {
    /// Build a barrel from file names, keeping their order.
    ///
    /// Fails when two files map to the same export name or binding
    /// (`shot.png` and `shot.webp`).
    pub fn from_files<I, S>(dir: &Path, file_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<BarrelEntry> = Vec::new();
        for file_name in file_names {
            let entry = BarrelEntry::new(file_name);
            if let Some(existing) = entries
                .iter()
                .find(|e| e.name == entry.name || e.binding == entry.binding)
            {
                return Err(ScaffoldError::DuplicateName {
                    dir: dir.to_path_buf(),
                    name: entry.binding,
                    first: existing.file_name.clone(),
                    second: entry.file_name,
                });
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[BarrelEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Barrel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for entry in &self.entries {
            writeln!(
                f,
                "import {} from \"./{}\";",
                entry.binding,
                escape_js(&entry.file_name)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "export default {{")?;
        for entry in &self.entries {
            if entry.name == entry.binding {
                writeln!(f, "  {},", entry.binding)?;
            } else if is_identifier(&entry.name) {
                writeln!(f, "  {}: {},", entry.name, entry.binding)?;
            } else {
                writeln!(f, "  \"{}\": {},", escape_js(&entry.name), entry.binding)?;
            }
        }
        writeln!(f, "}};")
    }
}

/// File name with its last extension stripped. Dotfiles keep their name.
pub fn module_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}

/// A valid, non-reserved JavaScript identifier derived from `name`.
pub fn binding_for(name: &str) -> String {
    let mut binding: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();

    if binding.is_empty() || binding.starts_with(|c: char| c.is_ascii_digit()) {
        binding.insert(0, '_');
    }
    if RESERVED.contains(&binding.as_str()) {
        binding.push('_');
    }
    binding
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn escape_js(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_imports_and_mapping() {
        let barrel = Barrel::from_files(Path::new("shots"), ["a.png", "b.png"]).unwrap();
        assert_eq!(
            barrel.render(),
            "// Generated by sitegen. Do not edit.\n\
             import a from \"./a.png\";\n\
             import b from \"./b.png\";\n\
             \n\
             export default {\n\
             \x20\x20a,\n\
             \x20\x20b,\n\
             };\n"
        );
    }

    #[test]
    fn non_identifier_names_are_quoted() {
        let barrel =
            Barrel::from_files(Path::new("shots"), ["picker-dark.png", "2x.png", "default.png"])
                .unwrap();
        let out = barrel.render();

        assert!(out.contains("import picker_dark from \"./picker-dark.png\";"));
        assert!(out.contains("  \"picker-dark\": picker_dark,"));
        assert!(out.contains("import _2x from \"./2x.png\";"));
        assert!(out.contains("  \"2x\": _2x,"));
        assert!(out.contains("import default_ from \"./default.png\";"));
        assert!(out.contains("  default: default_,"));
    }

    #[test]
    fn module_name_strips_last_extension() {
        assert_eq!(module_name("shot.png"), "shot");
        assert_eq!(module_name("shot.min.svg"), "shot.min");
        assert_eq!(module_name("README"), "README");
        assert_eq!(module_name(".hidden"), ".hidden");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Barrel::from_files(Path::new("shots"), ["shot.png", "shot.webp"]).unwrap_err();
        match err {
            ScaffoldError::DuplicateName { first, second, .. } => {
                assert_eq!(first, "shot.png");
                assert_eq!(second, "shot.webp");
            }
            other => panic!("expected duplicate name, got {other:?}"),
        }
    }

    #[test]
    fn colliding_bindings_are_rejected() {
        assert!(Barrel::from_files(Path::new("shots"), ["a-b.png", "a_b.png"]).is_err());
    }
}

//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as batched diagnostics whose structure changes
//! between releases. We only depend on their `Debug` rendering and pull out
//! the pieces worth showing: a kind, a message, the offending file, and a hint.

use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
}

impl ExtractedDiagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file: None,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Diagnostic kind (mirrors the Rolldown event kinds we care about).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingExport,
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    InvalidOption,
    Plugin,
    UnsupportedStylesheet,
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiagnosticKind::MissingExport => "MissingExport",
            DiagnosticKind::ParseError => "ParseError",
            DiagnosticKind::UnresolvedEntry => "UnresolvedEntry",
            DiagnosticKind::UnresolvedImport => "UnresolvedImport",
            DiagnosticKind::InvalidOption => "InvalidOption",
            DiagnosticKind::Plugin => "Plugin",
            DiagnosticKind::UnsupportedStylesheet => "UnsupportedStylesheet",
            DiagnosticKind::Other => "Error",
        };
        f.write_str(name)
    }
}

/// Extract diagnostics from a Rolldown error value.
pub fn extract_from_rolldown_error(error: &dyn std::fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    // Batched errors render as repeated `BuildDiagnostic { .. }` blocks
    let parts: Vec<&str> = error_str
        .split("BuildDiagnostic")
        .skip(1)
        .map(str::trim)
        .filter(|part| part.len() > 2)
        .collect();

    if !parts.is_empty() {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

fn extract_single(text: &str) -> ExtractedDiagnostic {
    let kind = classify(text);
    let help = match kind {
        DiagnosticKind::UnresolvedImport => Some(
            "Install the missing package or add it to `dependencies`/`peerDependencies` to keep it external"
                .to_string(),
        ),
        DiagnosticKind::UnresolvedEntry => {
            Some("Check the entry path and the `components/*/index.*` files".to_string())
        }
        DiagnosticKind::ParseError => {
            Some("Fix the syntax error reported above and rebuild".to_string())
        }
        DiagnosticKind::UnsupportedStylesheet => {
            Some("Convert the stylesheet to `.css` or `.scss`".to_string())
        }
        _ => None,
    };

    ExtractedDiagnostic {
        kind,
        message: extract_message(text).unwrap_or_else(|| text.to_string()),
        file: extract_file_path(text),
        help,
    }
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("Unsupported stylesheet") {
        DiagnosticKind::UnsupportedStylesheet
    } else if text.contains("MissingExport") {
        DiagnosticKind::MissingExport
    } else if text.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport") || text.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("Parse") || text.contains("Syntax") || text.contains("Expected") {
        DiagnosticKind::ParseError
    } else if text.contains("InvalidOption") {
        DiagnosticKind::InvalidOption
    } else if text.contains("Plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    }
}

/// Pull the first `message: "..."` field out of a `Debug` rendering.
fn extract_message(text: &str) -> Option<String> {
    let start = text.find("message: \"")? + "message: \"".len();
    let rest = &text[start..];

    let mut out = String::new();
    let mut escaped = false;
    for c in rest.chars() {
        match (escaped, c) {
            (true, 'n') => {
                out.push('\n');
                escaped = false;
            }
            (true, other) => {
                out.push(other);
                escaped = false;
            }
            (false, '\\') => escaped = true,
            (false, '"') => return Some(out),
            (false, other) => out.push(other),
        }
    }
    None
}

/// Find the first path-looking token ending in a script or style extension.
fn extract_file_path(text: &str) -> Option<String> {
    const EXTENSIONS: &[&str] = &[
        ".tsx", ".ts", ".jsx", ".js", ".mjs", ".cjs", ".css", ".scss", ".less",
    ];

    text.split(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '(' | ')'))
        .find(|token| {
            EXTENSIONS.iter().any(|ext| token.ends_with(ext)) && token.contains('/')
        })
        .map(str::to_string)
}

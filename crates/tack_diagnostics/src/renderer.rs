//! Diagnostic rendering.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use tack_source::SourceDb;

/// Formats a diagnostic for output.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// error[E201]: `@layer components` is used but no matching `@tailwind components` directive is present.
///   --> app.css:3:1
///    |
///  3 | @layer components {
///    | ^^^^^^^^^^^^^^^^^
///    = help: add `@tailwind components;` to the stylesheet
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        let header_color = match diag.severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note | Severity::Help => "1;36",
        };
        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(&header, header_color),
            diag.message
        ));

        if let Some(file) = source_db.try_get_file(diag.primary_span.file) {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_content = file.line_text(diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            // Multi-line spans are underlined to the end of the first line.
            let line_rest = line_content.len().saturating_sub(col as usize - 1);
            let span_len = (diag.primary_span.len() as usize).clamp(1, line_rest.max(1));
            let carets = self.paint(&"^".repeat(span_len), header_color);
            let col_padding = " ".repeat((col as usize).saturating_sub(1));

            let primary_msg = diag
                .labels
                .first()
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();

            out.push_str(&format!("{padding} | {col_padding}{carets}{primary_msg}\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        if let Some(fix) = &diag.fix {
            out.push_str(&format!("   = fix: {}\n", fix.message));
        }

        out
    }
}

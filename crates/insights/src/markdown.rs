//! Markdown serialization of the suggestions document.
//!
//! The downstream document exporter depends on this exact shape:
//! a top-level title heading, one `##` heading per suggestion prefixed
//! with its severity icon, a bolded issue line, and a bulleted action
//! list. Do not change the layout without updating the exporter.

use crate::suggestions::Suggestion;

/// Render the suggestion list as a markdown document.
pub fn suggestions_document(title: &str, suggestions: &[Suggestion]) -> String {
    let mut doc = format!("# {}\n", title);
    for suggestion in suggestions {
        doc.push_str(&format!(
            "\n## {} {}\n\n**Issue:** {}\n\n**Actions:**\n",
            suggestion.severity.icon(),
            suggestion.title,
            suggestion.issue
        ));
        for action in &suggestion.actions {
            doc.push_str(&format!("- {}\n", action));
        }
    }
    doc
}

//! Rendering knowledge entries into displayable answers.

use helpbot_types::knowledge::KnowledgeEntry;

/// Render an entry as the answer text shown in the conversation.
///
/// `Titled` entries become `<strong>{title}</strong><br>{content}`; content
/// markup is passed through unescaped. `PlainText` is returned verbatim. A
/// titled entry missing its title or content renders only the part present.
pub fn render_entry(entry: &KnowledgeEntry) -> String {
    match entry {
        KnowledgeEntry::PlainText(text) => text.clone(),
        KnowledgeEntry::Titled { title, content } => match (title.is_empty(), content.is_empty()) {
            (false, false) => format!("<strong>{title}</strong><br>{content}"),
            (false, true) => format!("<strong>{title}</strong>"),
            (true, _) => content.clone(),
        },
    }
}

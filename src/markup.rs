//! HTML fragment builders for the narrative log and the side panels.
//!
//! Every piece of text that reaches the page goes through `escape_html` here;
//! the `document` module only inserts what these functions return.

use crate::config::{DisplayStyle, DisplayTable};
use crate::inbound::ListEntry;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Split narrative text into paragraphs.
///
/// The backend encodes line breaks as the two characters `\` `n`; real
/// newlines are accepted too. Trailing blank paragraphs are dropped, so blank
/// text yields no paragraphs at all.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = text
        .split("\\n")
        .flat_map(|chunk| chunk.split('\n'))
        .map(|p| p.strip_suffix('\r').unwrap_or(p))
        .collect();
    while parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts
}

/// Visual template of a narrative entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrativeCategory {
    #[default]
    Normal,
    PlayerCommand,
    CommandResponse,
    System,
    Important,
}

impl NarrativeCategory {
    /// Unknown names fall back to `Normal`.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "player_command" => NarrativeCategory::PlayerCommand,
            "command_response" => NarrativeCategory::CommandResponse,
            "system" => NarrativeCategory::System,
            "important" => NarrativeCategory::Important,
            _ => NarrativeCategory::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NarrativeCategory::Normal => "normal",
            NarrativeCategory::PlayerCommand => "player_command",
            NarrativeCategory::CommandResponse => "command_response",
            NarrativeCategory::System => "system",
            NarrativeCategory::Important => "important",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NarrativeCategory::Normal => "",
            NarrativeCategory::PlayerCommand => "›",
            NarrativeCategory::CommandResponse => "↳",
            NarrativeCategory::System => "⚙",
            NarrativeCategory::Important => "★",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            NarrativeCategory::Normal => "#e0e0e0",
            NarrativeCategory::PlayerCommand => "#8ecae6",
            NarrativeCategory::CommandResponse => "#cdb4db",
            NarrativeCategory::System => "#adb5bd",
            NarrativeCategory::Important => "#ffd166",
        }
    }
}

/// One narrative log block: icon plus one `<p>` per paragraph.
pub fn narrative_block(text: &str, category: NarrativeCategory) -> String {
    let mut html = format!(
        "<div class=\"narrative-entry narrative-{}\" style=\"color: {}\">",
        category.as_str(),
        category.color()
    );
    if !category.icon().is_empty() {
        html.push_str(&format!(
            "<span class=\"narrative-icon\">{}</span>",
            category.icon()
        ));
    }
    for paragraph in split_paragraphs(text) {
        html.push_str("<p>");
        html.push_str(&escape_html(paragraph));
        html.push_str("</p>");
    }
    html.push_str("</div>");
    html
}

/// Per-panel presentation of a list (inventory or skills).
#[derive(Debug, Clone, Copy)]
pub struct ListKind {
    pub item_class: &'static str,
    pub placeholder: &'static str,
    pub fallback_icon: &'static str,
    pub fallback_color: &'static str,
    pub malformed_label: &'static str,
}

pub const INVENTORY_LIST: ListKind = ListKind {
    item_class: "inventory-item",
    placeholder: "Empty",
    fallback_icon: "📦",
    fallback_color: "#dddddd",
    malformed_label: "(unreadable item)",
};

pub const SKILLS_LIST: ListKind = ListKind {
    item_class: "skill-item",
    placeholder: "No skills",
    fallback_icon: "📜",
    fallback_color: "#dddddd",
    malformed_label: "(unreadable skill)",
};

fn list_item(class: &str, style: &DisplayStyle, label: &str) -> String {
    format!(
        "<li class=\"{}\" style=\"color: {}\"><span class=\"entry-icon\">{}</span> {}</li>",
        class,
        escape_html(&style.color),
        escape_html(&style.icon),
        escape_html(label)
    )
}

/// The full replacement content of a list container.
pub fn list_items(entries: &[ListEntry], table: &DisplayTable, kind: &ListKind) -> String {
    if entries.is_empty() {
        return format!(
            "<li class=\"empty-placeholder\">{}</li>",
            escape_html(kind.placeholder)
        );
    }
    let fallback = DisplayStyle::new(kind.fallback_icon, kind.fallback_color);
    entries
        .iter()
        .map(|entry| match entry {
            ListEntry::Name(name) => {
                let style = table.resolve(name).unwrap_or(&fallback);
                list_item(kind.item_class, style, name)
            }
            ListEntry::Malformed => list_item(
                &format!("{} malformed-entry", kind.item_class),
                &fallback,
                kind.malformed_label,
            ),
        })
        .collect()
}

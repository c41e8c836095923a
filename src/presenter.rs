//! Presentation updater: the four render operations the backend invokes.
//!
//! None of these return anything to the caller. A missing element is
//! reported on the console and the rest of the update still goes through.

use crate::config::DisplayTable;
use crate::console;
use crate::document::{ids, Document, DomError};
use crate::inbound::ListEntry;
use crate::markup::{self, ListKind, NarrativeCategory, INVENTORY_LIST, SKILLS_LIST};
use crate::vitals::{format_amount, PlayerStatus};

pub struct Presenter<D> {
    document: D,
    items: DisplayTable,
    skills: DisplayTable,
}

fn report(operation: &str, result: Result<(), DomError>) {
    if let Err(e) = result {
        console::warn(&format!("{operation}: {e}"));
    }
}

impl<D: Document> Presenter<D> {
    pub fn new(document: D, items: DisplayTable, skills: DisplayTable) -> Self {
        Self {
            document,
            items,
            skills,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Append one entry to the narrative log and schedule a scroll to the
    /// bottom once layout has settled.
    pub fn show_narrative_line(&self, text: &str, category: NarrativeCategory) {
        let result = self.append_narrative(text, category);
        report("show_narrative_line", result);
    }

    fn append_narrative(&self, text: &str, category: NarrativeCategory) -> Result<(), DomError> {
        let block = markup::narrative_block(text, category);
        self.document.append_html(ids::NARRATIVE, &block)?;
        self.document.scroll_to_bottom_after_layout(ids::NARRATIVE)
    }

    pub fn show_player_status(&self, status: &PlayerStatus) {
        let doc = &self.document;
        let fields = [
            (ids::PLAYER_NAME, status.name.clone()),
            (ids::PLAYER_HP, format_amount(status.hp)),
            (ids::PLAYER_MAX_HP, format_amount(status.max_hp)),
            (ids::PLAYER_MP, format_amount(status.mp)),
            (ids::PLAYER_MAX_MP, format_amount(status.max_mp)),
            (ids::PLAYER_LOCATION, status.location.clone()),
        ];
        for (id, text) in &fields {
            report("show_player_status", doc.set_text(id, text));
        }

        let hp_class = format!("bar {}", status.hp_tier().css_class());
        report(
            "show_player_status",
            doc.set_bar(ids::HP_BAR, status.hp_fill(), &hp_class),
        );
        report(
            "show_player_status",
            doc.set_bar(ids::MP_BAR, status.mp_fill(), "bar bar-mana"),
        );
    }

    pub fn show_inventory(&self, entries: &[ListEntry]) {
        self.show_list(ids::INVENTORY, entries, &self.items, &INVENTORY_LIST, "show_inventory");
    }

    pub fn show_skills(&self, entries: &[ListEntry]) {
        self.show_list(ids::SKILLS, entries, &self.skills, &SKILLS_LIST, "show_skills");
    }

    fn show_list(
        &self,
        id: &str,
        entries: &[ListEntry],
        table: &DisplayTable,
        kind: &ListKind,
        operation: &str,
    ) {
        let html = markup::list_items(entries, table, kind);
        report(operation, self.document.replace_html(id, &html));
    }
}

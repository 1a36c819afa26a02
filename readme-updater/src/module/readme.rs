//! README document assembly

use chrono::{DateTime, Utc};

use readme_common::template::{render, Bindings};

/// Placed between card references when there is more than one.
pub const CARD_SEPARATOR: &str = "\n<br/>\n";

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M UTC";

pub struct DocumentAssembler {
    template: String,
}

impl DocumentAssembler {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Fill the document template with the card references, in order, and the
    /// generation time.
    ///
    /// `extra_sections` are bound as additional placeholders.
    pub fn assemble(&self, card_refs: &[String], extra_sections: &Bindings, now: DateTime<Utc>) -> String {
        let mut bindings = extra_sections.clone();
        bindings.insert("repo_cards", card_refs.join(CARD_SEPARATOR));
        bindings.insert("updated_time", format_timestamp(now));

        render(&self.template, &bindings)
    }
}

pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

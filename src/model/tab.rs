// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::NoteId;
use super::note::Note;

const MAX_DERIVED_TITLE_CHARS: usize = 50;

/// A working copy of an open note's editable fields.
///
/// The tab may diverge from the stored [`Note`] until the next save; when a
/// note that is already open is opened again, the live tab wins over the
/// stored note because it may hold unsaved edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    id: NoteId,
    title: String,
    content: String,
}

impl Tab {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id().clone(),
            title: note.title().to_owned(),
            content: note.content().to_owned(),
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// First line of the content, trimmed and truncated to 50 chars.
    ///
    /// Returns `Some` only when the result is non-empty and differs from the
    /// current title; the caller re-renders but does not save.
    pub fn derived_title(&self) -> Option<String> {
        let first_line = self.content.lines().next().unwrap_or("").trim();
        if first_line.is_empty() {
            return None;
        }
        let title: String = first_line.chars().take(MAX_DERIVED_TITLE_CHARS).collect();
        if title == self.title {
            return None;
        }
        Some(title)
    }
}

#[cfg(test)]
mod tests {
    use super::Tab;
    use crate::model::{default_folder_id, Note, NoteId};

    fn tab_with_content(content: &str) -> Tab {
        let note = Note::new(
            NoteId::new("note-1").expect("note id"),
            "Untitled Note",
            content,
            default_folder_id(),
            None,
            0,
            0,
        );
        Tab::from_note(&note)
    }

    #[test]
    fn derived_title_takes_first_line() {
        let tab = tab_with_content("Hello\nworld");
        assert_eq!(tab.derived_title().as_deref(), Some("Hello"));
    }

    #[test]
    fn derived_title_trims_and_truncates() {
        let long = "x".repeat(80);
        let tab = tab_with_content(&format!("  {long}  \nmore"));
        let title = tab.derived_title().expect("derived title");
        assert_eq!(title.chars().count(), 50);
        assert!(title.chars().all(|c| c == 'x'));
    }

    #[test]
    fn derived_title_is_none_for_blank_first_line() {
        let tab = tab_with_content("   \nbody");
        assert_eq!(tab.derived_title(), None);
    }

    #[test]
    fn derived_title_is_none_when_unchanged() {
        let mut tab = tab_with_content("Hello");
        tab.set_title("Hello");
        assert_eq!(tab.derived_title(), None);
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{FolderId, NoteId};
use super::note::{default_folder_id, Folder, Note};
use super::tab::Tab;

/// The in-memory session the TUI runs against: the canonical note/folder
/// collections plus the tab registry.
///
/// Collections are kept in the order the backend returned them (and in open
/// order for tabs); callers never re-sort. Tab invariants maintained here:
/// at most one tab per note id, a tab exists iff the note is open, and at
/// most one tab is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    open_tabs: Vec<Tab>,
    active_tab_id: Option<NoteId>,
    current_folder_id: FolderId,
}

/// Result of closing a tab, including which neighbor (if any) should become
/// active when the closed tab was the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    NotOpen,
    Closed {
        was_active: bool,
        next_active: Option<NoteId>,
    },
}

impl Session {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            folders: Vec::new(),
            open_tabs: Vec::new(),
            active_tab_id: None,
            current_folder_id: default_folder_id(),
        }
    }

    /// Replaces both collections with a fresh bulk load from the backend.
    pub fn replace_collections(&mut self, notes: Vec<Note>, folders: Vec<Folder>) {
        self.notes = notes;
        self.folders = folders;
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn note(&self, note_id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id() == note_id)
    }

    pub fn note_mut(&mut self, note_id: &NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id() == note_id)
    }

    pub fn folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id() == folder_id)
    }

    /// Top-level notes (no parent) of a folder, in store order.
    pub fn notes_in<'a>(&'a self, folder_id: &'a FolderId) -> impl Iterator<Item = &'a Note> {
        self.notes
            .iter()
            .filter(move |note| note.folder_id() == folder_id && note.parent_id().is_none())
    }

    /// Direct children of a note, in store order. Nesting is one level deep;
    /// this is never called recursively.
    pub fn children_of<'a>(&'a self, note_id: &'a NoteId) -> impl Iterator<Item = &'a Note> {
        self.notes
            .iter()
            .filter(move |note| note.parent_id() == Some(note_id))
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn remove_note(&mut self, note_id: &NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id() == note_id)?;
        Some(self.notes.remove(index))
    }

    pub fn add_folder(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    /// Removes a folder from the collection. The default folder is never
    /// removable; notes are not cascade-deleted and keep their folder id.
    /// If the removed folder was the current one, browsing falls back to the
    /// default folder.
    pub fn remove_folder(&mut self, folder_id: &FolderId) -> bool {
        if folder_id.as_str() == super::note::DEFAULT_FOLDER_ID {
            return false;
        }
        let Some(index) = self.folders.iter().position(|folder| folder.id() == folder_id) else {
            return false;
        };
        self.folders.remove(index);
        if &self.current_folder_id == folder_id {
            self.current_folder_id = default_folder_id();
        }
        true
    }

    pub fn current_folder_id(&self) -> &FolderId {
        &self.current_folder_id
    }

    pub fn set_current_folder(&mut self, folder_id: FolderId) {
        self.current_folder_id = folder_id;
    }

    pub fn open_tabs(&self) -> &[Tab] {
        &self.open_tabs
    }

    pub fn tab(&self, note_id: &NoteId) -> Option<&Tab> {
        self.open_tabs.iter().find(|tab| tab.id() == note_id)
    }

    pub fn tab_mut(&mut self, note_id: &NoteId) -> Option<&mut Tab> {
        self.open_tabs.iter_mut().find(|tab| tab.id() == note_id)
    }

    pub fn has_tab(&self, note_id: &NoteId) -> bool {
        self.tab(note_id).is_some()
    }

    /// Appends a tab for the note to the open sequence by copying its current
    /// fields. Returns `false` without touching anything when the note does
    /// not exist or is already open (re-opening must not duplicate and must
    /// not reload over unsaved tab edits).
    pub fn open_tab(&mut self, note_id: &NoteId) -> bool {
        if self.has_tab(note_id) {
            return false;
        }
        let Some(note) = self.note(note_id) else {
            return false;
        };
        let tab = Tab::from_note(note);
        self.open_tabs.push(tab);
        true
    }

    pub fn active_tab_id(&self) -> Option<&NoteId> {
        self.active_tab_id.as_ref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let note_id = self.active_tab_id.as_ref()?;
        self.open_tabs.iter().find(|tab| tab.id() == note_id)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let note_id = self.active_tab_id.clone()?;
        self.open_tabs.iter_mut().find(|tab| tab.id() == &note_id)
    }

    /// Sets the active tab. Activating a note without a tab clears the
    /// active id instead of pointing it at nothing.
    pub fn set_active(&mut self, note_id: Option<NoteId>) {
        self.active_tab_id = match note_id {
            Some(note_id) if self.has_tab(&note_id) => Some(note_id),
            _ => None,
        };
    }

    /// Removes the tab from the open sequence. When the closed tab was the
    /// active one, the active id is cleared and the deterministic neighbor is
    /// reported: index `max(0, closed_index - 1)` of the post-removal
    /// sequence, or none when no tabs remain.
    pub fn close_tab(&mut self, note_id: &NoteId) -> CloseOutcome {
        let Some(index) = self.open_tabs.iter().position(|tab| tab.id() == note_id) else {
            return CloseOutcome::NotOpen;
        };
        self.open_tabs.remove(index);

        let was_active = self.active_tab_id.as_ref() == Some(note_id);
        let next_active = if was_active {
            self.active_tab_id = None;
            if self.open_tabs.is_empty() {
                None
            } else {
                let neighbor = index.saturating_sub(1).min(self.open_tabs.len() - 1);
                Some(self.open_tabs[neighbor].id().clone())
            }
        } else {
            None
        };

        CloseOutcome::Closed {
            was_active,
            next_active,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

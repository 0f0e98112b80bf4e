// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session orchestration.
//!
//! Every user intention funnels through [`Orchestrator::dispatch`] as an
//! [`Action`], and every timer fires through [`Orchestrator::tick`]. The
//! orchestrator owns the session, the save/search timers and the save status;
//! backend failures never escape it. They degrade into the status indicator
//! or a transient notice while the in-memory state stays editable.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crate::model::{CloseOutcome, Folder, FolderId, IdMinter, Note, NoteId, Session};
use crate::persist::{
    DebounceSlot, IntervalTimer, SaveStatus, EDIT_AUTOSAVE_DELAY, INTERVAL_AUTOSAVE_PERIOD,
    SEARCH_DEBOUNCE_DELAY,
};
use crate::store::Backend;

const NOTICE_DURATION: Duration = Duration::from_secs(4);

const UNTITLED_TITLE: &str = "Untitled Note";

/// A user intention, as raised by the TUI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    OpenNote(NoteId),
    SwitchTab(NoteId),
    CloseTab(NoteId),
    NewNote,
    NewFolder { name: String },
    DeleteNote(NoteId),
    DeleteFolder(FolderId),
    BrowseFolder(FolderId),
    EditContent(String),
    EditorBlurred,
    Save,
    SearchInput(String),
}

/// What the sidebar shows: the folder tree, a flat result list, or the empty
/// result state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    Tree,
    Results(Vec<Note>),
    NoResults,
}

/// A transient status-line message with an expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SaveMode {
    /// User-requested save: runs the full saving/saved-flash indicator cycle.
    Explicit,
    /// Timer or switch-away save: settles the indicator without a flash.
    Silent,
}

pub struct Orchestrator<B: Backend> {
    backend: B,
    session: Session,
    minter: IdMinter,
    status: SaveStatus,
    notice: Option<Notice>,
    sidebar: SidebarView,
    edit_autosave: DebounceSlot,
    search_debounce: DebounceSlot,
    pending_query: String,
    interval_autosave: IntervalTimer,
}

impl<B: Backend> Orchestrator<B> {
    pub fn new(backend: B, now: Instant) -> Self {
        Self {
            backend,
            session: Session::new(),
            minter: IdMinter::new(),
            status: SaveStatus::new(),
            notice: None,
            sidebar: SidebarView::Tree,
            edit_autosave: DebounceSlot::new(),
            search_debounce: DebounceSlot::new(),
            pending_query: String::new(),
            interval_autosave: IntervalTimer::new(now, INTERVAL_AUTOSAVE_PERIOD),
        }
    }

    /// Bulk-loads both collections and establishes the startup tab: the first
    /// stored note becomes the active tab, or a fresh note is created when
    /// the store is empty. A failed load leaves an empty but fully usable
    /// session behind a notice.
    pub fn load(&mut self, now: Instant) {
        let folders = match self.backend.load_folders() {
            Ok(folders) => folders,
            Err(err) => {
                self.set_notice(format!("Could not load folders: {err}"), now);
                return;
            }
        };
        let notes = match self.backend.load_notes() {
            Ok(notes) => notes,
            Err(err) => {
                self.session.replace_collections(Vec::new(), folders);
                self.set_notice(format!("Could not load notes: {err}"), now);
                return;
            }
        };
        self.session.replace_collections(notes, folders);

        match self.session.notes().first().map(|note| note.id().clone()) {
            Some(first) => {
                self.session.open_tab(&first);
                self.session.set_active(Some(first));
            }
            None => self.dispatch(Action::NewNote, now),
        }
    }

    pub fn dispatch(&mut self, action: Action, now: Instant) {
        match action {
            Action::OpenNote(note_id) => self.open_note(&note_id, now),
            Action::SwitchTab(note_id) => self.switch_tab(&note_id, now),
            Action::CloseTab(note_id) => self.close_tab(&note_id, now),
            Action::NewNote => self.new_note(now),
            Action::NewFolder { name } => self.new_folder(name, now),
            Action::DeleteNote(note_id) => self.delete_note(&note_id, now),
            Action::DeleteFolder(folder_id) => self.delete_folder(&folder_id, now),
            Action::BrowseFolder(folder_id) => self.browse_folder(folder_id),
            Action::EditContent(content) => self.edit_content(content, now),
            Action::EditorBlurred => self.editor_blurred(),
            Action::Save => self.save_active(SaveMode::Explicit, now),
            Action::SearchInput(query) => self.search_input(query, now),
        }
    }

    /// Drives every deadline. Call once per event-loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.status.tick(now);
        if self.edit_autosave.take_due(now) {
            self.save_active(SaveMode::Silent, now);
        }
        if self.interval_autosave.take_due(now) {
            self.save_active(SaveMode::Silent, now);
        }
        if self.search_debounce.take_due(now) {
            self.perform_search(now);
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &SaveStatus {
        &self.status
    }

    pub fn sidebar(&self) -> &SidebarView {
        &self.sidebar
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notice(&self, now: Instant) -> Option<&str> {
        match &self.notice {
            Some(notice) if now < notice.expires_at => Some(&notice.message),
            _ => None,
        }
    }

    fn open_note(&mut self, note_id: &NoteId, now: Instant) {
        if self.session.note(note_id).is_none() {
            return;
        }
        if self.session.active_tab_id() == Some(note_id) {
            return;
        }
        self.save_active(SaveMode::Silent, now);
        self.session.open_tab(note_id);
        self.session.set_active(Some(note_id.clone()));
    }

    fn switch_tab(&mut self, note_id: &NoteId, now: Instant) {
        if !self.session.has_tab(note_id) || self.session.active_tab_id() == Some(note_id) {
            return;
        }
        // The outgoing tab's edits are flushed before focus moves.
        self.save_active(SaveMode::Silent, now);
        self.session.set_active(Some(note_id.clone()));
    }

    fn close_tab(&mut self, note_id: &NoteId, now: Instant) {
        if self.session.active_tab_id() == Some(note_id) {
            self.save_active(SaveMode::Silent, now);
        }
        if let CloseOutcome::Closed {
            was_active: true,
            next_active,
        } = self.session.close_tab(note_id)
        {
            // The neighbor activates without a save; it was not edited.
            self.session.set_active(next_active);
        }
    }

    fn new_note(&mut self, now: Instant) {
        let millis = now_millis();
        let note_id = self.minter.note_id(millis);
        let note = Note::new(
            note_id.clone(),
            UNTITLED_TITLE,
            "",
            self.session.current_folder_id().clone(),
            None,
            millis,
            millis,
        );

        // The note is persisted before it enters the session; a failed
        // create leaves no phantom note behind.
        self.status.begin_saving();
        if let Err(err) = self.backend.save_note(&note) {
            self.status.error();
            self.set_notice(format!("Could not create note: {err}"), now);
            return;
        }
        self.status.saved_flash(now);

        self.save_active(SaveMode::Silent, now);
        self.session.add_note(note);
        self.session.open_tab(&note_id);
        self.session.set_active(Some(note_id));
    }

    fn new_folder(&mut self, name: String, now: Instant) {
        let name = name.trim().to_owned();
        if name.is_empty() {
            return;
        }
        let folder_id = self.minter.folder_id(now_millis());
        self.session.add_folder(Folder::new(folder_id, name, None));
        self.persist_folders(now);
    }

    fn delete_note(&mut self, note_id: &NoteId, now: Instant) {
        // Backend first: when the delete fails the note stays everywhere.
        if let Err(err) = self.backend.delete_note(note_id) {
            self.set_notice(format!("Could not delete note: {err}"), now);
            return;
        }

        if let CloseOutcome::Closed {
            was_active: true,
            next_active,
        } = self.session.close_tab(note_id)
        {
            // Only the active tab can own the pending edit autosave.
            self.edit_autosave.cancel();
            self.session.set_active(next_active);
        }
        self.session.remove_note(note_id);
    }

    fn delete_folder(&mut self, folder_id: &FolderId, now: Instant) {
        if !self.session.remove_folder(folder_id) {
            return;
        }
        self.persist_folders(now);
    }

    fn browse_folder(&mut self, folder_id: FolderId) {
        if self.session.folder(&folder_id).is_none() {
            return;
        }
        self.session.set_current_folder(folder_id);
        self.sidebar = SidebarView::Tree;
        self.search_debounce.cancel();
        self.pending_query.clear();
    }

    fn edit_content(&mut self, content: String, now: Instant) {
        let Some(tab) = self.session.active_tab_mut() else {
            return;
        };
        tab.set_content(content);
        self.status.begin_saving();
        self.edit_autosave.schedule(now, EDIT_AUTOSAVE_DELAY);
    }

    /// Title derivation on blur: re-title the working copy from its first
    /// content line, without saving.
    fn editor_blurred(&mut self) {
        let Some(tab) = self.session.active_tab_mut() else {
            return;
        };
        if let Some(title) = tab.derived_title() {
            tab.set_title(title);
        }
    }

    fn search_input(&mut self, query: String, now: Instant) {
        // The empty query reverts to the tree through the same debounce, so
        // a cleared box cannot be outrun by a stale in-flight query.
        self.pending_query = query;
        self.search_debounce.schedule(now, SEARCH_DEBOUNCE_DELAY);
    }

    fn perform_search(&mut self, now: Instant) {
        if self.pending_query.trim().is_empty() {
            self.sidebar = SidebarView::Tree;
            return;
        }
        match self.backend.search_notes(&self.pending_query) {
            Ok(notes) if notes.is_empty() => self.sidebar = SidebarView::NoResults,
            Ok(notes) => self.sidebar = SidebarView::Results(notes),
            Err(err) => {
                // The sidebar keeps whatever it was showing.
                self.set_notice(format!("Search failed: {err}"), now);
            }
        }
    }

    fn save_active(&mut self, mode: SaveMode, now: Instant) {
        self.edit_autosave.cancel();
        let Some(tab) = self.session.active_tab() else {
            return;
        };
        let note_id = tab.id().clone();
        let title = tab.title().to_owned();
        let content = tab.content().to_owned();

        let Some(note) = self.session.note_mut(&note_id) else {
            return;
        };
        note.apply_working_copy(&title, &content, now_millis());
        let snapshot = note.clone();

        if mode == SaveMode::Explicit {
            self.status.begin_saving();
        }
        match self.backend.save_note(&snapshot) {
            Ok(()) => match mode {
                SaveMode::Explicit => self.status.saved_flash(now),
                SaveMode::Silent => self.status.saved_quiet(),
            },
            Err(err) => {
                // The tab keeps its edits; only the indicator reports.
                self.status.error();
                if mode == SaveMode::Explicit {
                    self.set_notice(format!("Could not save note: {err}"), now);
                }
            }
        }
    }

    fn persist_folders(&mut self, now: Instant) {
        // Folder edits are optimistic: memory is already updated and a failed
        // write only surfaces a notice.
        if let Err(err) = self.backend.save_folders(self.session.folders()) {
            self.set_notice(format!("Could not save folders: {err}"), now);
        }
    }

    fn set_notice(&mut self, message: String, now: Instant) {
        self.notice = Some(Notice {
            message,
            expires_at: now + NOTICE_DURATION,
        });
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

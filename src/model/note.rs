// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{FolderId, NoteId};

/// Id of the distinguished folder that always exists and is never deletable.
pub const DEFAULT_FOLDER_ID: &str = "default";

pub fn default_folder_id() -> FolderId {
    FolderId::new_unchecked(DEFAULT_FOLDER_ID)
}

/// A persisted note. `content` is an opaque blob as far as the session layer
/// is concerned; only the title derivation in [`super::Tab`] ever looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    folder_id: FolderId,
    parent_id: Option<NoteId>,
    created_at: i64,
    updated_at: i64,
}

impl Note {
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        folder_id: FolderId,
        parent_id: Option<NoteId>,
        created_at: i64,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            folder_id,
            parent_id,
            created_at,
            updated_at,
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

    pub fn folder_id(&self) -> &FolderId {
        &self.folder_id
    }

    pub fn parent_id(&self) -> Option<&NoteId> {
        self.parent_id.as_ref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Copies a tab's working fields back into the note and refreshes
    /// `updated_at`. This is the only mutation a save performs.
    pub fn apply_working_copy(&mut self, title: &str, content: &str, updated_at: i64) {
        self.title = title.to_owned();
        self.content = content.to_owned();
        self.updated_at = updated_at;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    id: FolderId,
    name: String,
    parent_id: Option<FolderId>,
}

impl Folder {
    pub fn new(id: FolderId, name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }

    pub fn id(&self) -> &FolderId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&FolderId> {
        self.parent_id.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.id.as_str() == DEFAULT_FOLDER_ID
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for notes and folders.
//!
//! [`Backend`] is the contract the session layer consumes; [`ScratchDir`] is
//! the plain-files implementation (one frontmatter markdown file per note
//! plus a `folders.json`).

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::model::{Folder, Note, NoteId};

pub mod scratch_dir;

pub use scratch_dir::ScratchDir;

/// The persistent-store contract.
///
/// Bulk reads happen once at startup; `save_note` is an idempotent upsert
/// keyed by the note id; `save_folders` is always a full-collection replace;
/// `delete_note` succeeds when the note is already absent; `search_notes`
/// returns an empty list, not an error, for no matches.
pub trait Backend {
    fn load_folders(&self) -> Result<Vec<Folder>, StoreError>;
    fn load_notes(&self) -> Result<Vec<Note>, StoreError>;
    fn save_note(&self, note: &Note) -> Result<(), StoreError>;
    fn save_folders(&self, folders: &[Folder]) -> Result<(), StoreError>;
    fn delete_note(&self, note_id: &NoteId) -> Result<(), StoreError>;
    fn search_notes(&self, query: &str) -> Result<Vec<Note>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

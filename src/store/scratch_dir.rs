// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{default_folder_id, Folder, FolderId, Note, NoteId};

use super::{Backend, StoreError};

const FOLDERS_FILENAME: &str = "folders.json";
const NOTES_DIRNAME: &str = "notes";
const FRONTMATTER_SEPARATOR: &str = "---\n\n";

/// Plain-files store rooted at a scratch directory (default `~/.scratchpad`).
///
/// Notes live under `<root>/notes/<id>.md` as a `key: value` frontmatter
/// header followed by the opaque content; folders live in a single
/// `<root>/folders.json`. Writes go through a temp file plus rename so a
/// crashed write never leaves a half-written note behind.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".scratchpad")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIRNAME)
    }

    pub fn folders_path(&self) -> PathBuf {
        self.root.join(FOLDERS_FILENAME)
    }

    fn note_path(&self, note_id: &NoteId) -> PathBuf {
        self.notes_dir().join(format!("{note_id}.md"))
    }
}

impl Backend for ScratchDir {
    fn load_folders(&self) -> Result<Vec<Folder>, StoreError> {
        let path = self.folders_path();
        if !path.exists() {
            // First run: bootstrap the default folder so it exists on disk
            // before anything references it.
            let defaults = vec![Folder::new(default_folder_id(), "Notes", None)];
            self.save_folders(&defaults)?;
            return Ok(defaults);
        }

        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<FolderRecord> =
            serde_json::from_str(&contents).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
        Ok(records
            .into_iter()
            .filter_map(FolderRecord::into_folder)
            .collect())
    }

    fn load_notes(&self) -> Result<Vec<Note>, StoreError> {
        let dir = self.notes_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };

        let mut notes = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            match path.extension() {
                Some(ext) if ext == "md" => {}
                _ => continue,
            }
            // Unparseable files are skipped, not fatal: one corrupt note must
            // not take the whole collection down.
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            if let Some(note) = parse_note(&contents) {
                notes.push(note);
            }
        }

        // Readdir order is platform-dependent; the store's answer is the
        // display order, so it has to be stable.
        notes.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(notes)
    }

    fn save_note(&self, note: &Note) -> Result<(), StoreError> {
        let path = self.note_path(note.id());
        write_atomic(&path, format_note(note).as_bytes())
    }

    fn save_folders(&self, folders: &[Folder]) -> Result<(), StoreError> {
        let path = self.folders_path();
        let records: Vec<FolderRecord> = folders.iter().map(FolderRecord::from_folder).collect();
        let json = serde_json::to_string_pretty(&records).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, json.as_bytes())
    }

    fn delete_note(&self, note_id: &NoteId) -> Result<(), StoreError> {
        let path = self.note_path(note_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // Already gone is success: delete is idempotent.
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn search_notes(&self, query: &str) -> Result<Vec<Note>, StoreError> {
        let needle = query.to_lowercase();
        let notes = self.load_notes()?;
        Ok(notes
            .into_iter()
            .filter(|note| {
                note.title().to_lowercase().contains(&needle)
                    || note.content().to_lowercase().contains(&needle)
            })
            .collect())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FolderRecord {
    id: String,
    name: String,
    parent_id: Option<String>,
}

impl FolderRecord {
    fn from_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id().to_string(),
            name: folder.name().to_owned(),
            parent_id: folder.parent_id().map(ToString::to_string),
        }
    }

    fn into_folder(self) -> Option<Folder> {
        let id = FolderId::new(self.id).ok()?;
        let parent_id = self.parent_id.and_then(|parent| FolderId::new(parent).ok());
        Some(Folder::new(id, self.name, parent_id))
    }
}

/// Serializes a note into the frontmatter file format:
///
/// ```text
/// ---
/// id: <id>
/// title: <title>
/// folder: <folder id>
/// parent_id: <id or null>
/// created_at: <millis>
/// updated_at: <millis>
/// ---
///
/// <content>
/// ```
fn format_note(note: &Note) -> String {
    format!(
        "---\nid: {}\ntitle: {}\nfolder: {}\nparent_id: {}\ncreated_at: {}\nupdated_at: {}\n---\n\n{}",
        note.id(),
        note.title(),
        note.folder_id(),
        note.parent_id().map_or_else(|| "null".to_owned(), ToString::to_string),
        note.created_at(),
        note.updated_at(),
        note.content(),
    )
}

fn parse_note(contents: &str) -> Option<Note> {
    let (header, body) = contents.split_once(FRONTMATTER_SEPARATOR)?;
    let header = header.strip_prefix("---\n").unwrap_or(header);

    let mut id = None;
    let mut title = String::new();
    let mut folder_id = default_folder_id();
    let mut parent_id = None;
    let mut created_at = 0i64;
    let mut updated_at = 0i64;

    for line in header.lines() {
        let Some((key, value)) = line.split_once(": ") else {
            continue;
        };
        match key {
            "id" => id = NoteId::new(value).ok(),
            "title" => title = value.to_owned(),
            "folder" => {
                if let Ok(parsed) = FolderId::new(value) {
                    folder_id = parsed;
                }
            }
            "parent_id" => {
                if value != "null" {
                    parent_id = NoteId::new(value).ok();
                }
            }
            "created_at" => created_at = value.parse().unwrap_or(0),
            "updated_at" => updated_at = value.parse().unwrap_or(0),
            _ => {}
        }
    }

    Some(Note::new(
        id?,
        title,
        body,
        folder_id,
        parent_id,
        created_at,
        updated_at,
    ))
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    let mut tmp_name = path
        .file_name()
        .map_or_else(Default::default, |name| name.to_os_string());
    tmp_name.push(".tmp");
    let tmp_path = parent.join(tmp_name);

    fs::write(&tmp_path, contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;
    fs::rename(&tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests;

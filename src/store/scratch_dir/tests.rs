// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{format_note, parse_note, ScratchDir};
use crate::model::{default_folder_id, Folder, FolderId, Note, NoteId, DEFAULT_FOLDER_ID};
use crate::store::Backend;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("naiad-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct ScratchDirTestCtx {
    _tmp: TempDir,
    store: ScratchDir,
}

impl ScratchDirTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let store = ScratchDir::new(tmp.path().join("scratchpad"));
        Self { _tmp: tmp, store }
    }
}

#[fixture]
fn ctx() -> ScratchDirTestCtx {
    ScratchDirTestCtx::new("scratch-dir")
}

fn note(id: &str, title: &str, content: &str, created_at: i64) -> Note {
    Note::new(
        NoteId::new(id).expect("note id"),
        title,
        content,
        default_folder_id(),
        None,
        created_at,
        created_at,
    )
}

#[rstest]
fn load_folders_bootstraps_the_default_folder(ctx: ScratchDirTestCtx) {
    let folders = ctx.store.load_folders().expect("load folders");
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].id().as_str(), DEFAULT_FOLDER_ID);
    assert_eq!(folders[0].name(), "Notes");
    assert!(ctx.store.folders_path().is_file());

    // A second load reads the persisted file, not the bootstrap path.
    let again = ctx.store.load_folders().expect("load folders again");
    assert_eq!(again, folders);
}

#[rstest]
fn save_folders_replaces_the_whole_collection(ctx: ScratchDirTestCtx) {
    let work = Folder::new(FolderId::new("folder-1").expect("folder id"), "Work", None);
    let folders = vec![Folder::new(default_folder_id(), "Notes", None), work];
    ctx.store.save_folders(&folders).expect("save folders");

    let loaded = ctx.store.load_folders().expect("load folders");
    assert_eq!(loaded, folders);

    ctx.store.save_folders(&folders[..1]).expect("save fewer");
    let loaded = ctx.store.load_folders().expect("load folders");
    assert_eq!(loaded.len(), 1);
}

#[rstest]
fn note_round_trips_through_the_frontmatter_format(ctx: ScratchDirTestCtx) {
    let original = Note::new(
        NoteId::new("note-1700000000000").expect("note id"),
        "Hello",
        "Hello\nworld\n\n---\n\nnot a header",
        FolderId::new("folder-9").expect("folder id"),
        Some(NoteId::new("note-1").expect("parent id")),
        1_700_000_000_000,
        1_700_000_000_500,
    );
    ctx.store.save_note(&original).expect("save note");

    let loaded = ctx.store.load_notes().expect("load notes");
    assert_eq!(loaded, vec![original]);
}

#[rstest]
fn save_note_is_an_upsert_keyed_by_id(ctx: ScratchDirTestCtx) {
    let first = note("note-1", "Untitled Note", "", 100);
    ctx.store.save_note(&first).expect("save note");

    let mut second = first.clone();
    second.apply_working_copy("Hello", "Hello body", 200);
    ctx.store.save_note(&second).expect("save updated note");

    let loaded = ctx.store.load_notes().expect("load notes");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title(), "Hello");
    assert_eq!(loaded[0].content(), "Hello body");
    assert_eq!(loaded[0].updated_at(), 200);
}

#[rstest]
fn load_notes_orders_by_creation_time(ctx: ScratchDirTestCtx) {
    ctx.store.save_note(&note("note-b", "B", "", 300)).expect("save");
    ctx.store.save_note(&note("note-a", "A", "", 100)).expect("save");
    ctx.store.save_note(&note("note-c", "C", "", 200)).expect("save");

    let loaded = ctx.store.load_notes().expect("load notes");
    let titles: Vec<&str> = loaded.iter().map(Note::title).collect();
    assert_eq!(titles, vec!["A", "C", "B"]);
}

#[rstest]
fn load_notes_skips_files_that_do_not_parse(ctx: ScratchDirTestCtx) {
    ctx.store.save_note(&note("note-1", "Kept", "", 100)).expect("save");
    std::fs::write(ctx.store.notes_dir().join("garbage.md"), "no frontmatter here").unwrap();
    std::fs::write(ctx.store.notes_dir().join("ignored.txt"), "wrong extension").unwrap();

    let loaded = ctx.store.load_notes().expect("load notes");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title(), "Kept");
}

#[rstest]
fn load_notes_on_a_fresh_dir_is_empty(ctx: ScratchDirTestCtx) {
    assert_eq!(ctx.store.load_notes().expect("load notes"), Vec::new());
}

#[rstest]
fn delete_note_is_idempotent(ctx: ScratchDirTestCtx) {
    let target = note("note-1", "Gone", "", 100);
    ctx.store.save_note(&target).expect("save");

    let id = NoteId::new("note-1").expect("note id");
    ctx.store.delete_note(&id).expect("delete");
    assert!(ctx.store.load_notes().expect("load notes").is_empty());

    // Deleting again must not error.
    ctx.store.delete_note(&id).expect("delete absent");
}

#[rstest]
fn search_matches_title_and_content_case_insensitively(ctx: ScratchDirTestCtx) {
    ctx.store
        .save_note(&note("note-1", "Groceries", "milk and EGGS", 100))
        .expect("save");
    ctx.store
        .save_note(&note("note-2", "Meeting notes", "agenda", 200))
        .expect("save");

    let by_title = ctx.store.search_notes("grocer").expect("search");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id().as_str(), "note-1");

    let by_content = ctx.store.search_notes("eggs").expect("search");
    assert_eq!(by_content.len(), 1);

    let none = ctx.store.search_notes("no such text").expect("search");
    assert!(none.is_empty());
}

#[test]
fn format_and_parse_are_inverse_for_null_parent() {
    let original = note("note-42", "Untitled Note", "body text", 7);
    let parsed = parse_note(&format_note(&original)).expect("parse");
    assert_eq!(parsed, original);
}

#[test]
fn parse_rejects_headerless_files() {
    assert_eq!(parse_note("just some markdown"), None);
    assert_eq!(parse_note(""), None);
}

#[test]
fn parse_defaults_missing_folder_to_default() {
    let contents = "---\nid: note-1\ntitle: T\nparent_id: null\ncreated_at: 1\nupdated_at: 2\n---\n\nbody";
    let parsed = parse_note(contents).expect("parse");
    assert_eq!(parsed.folder_id(), &default_folder_id());
}

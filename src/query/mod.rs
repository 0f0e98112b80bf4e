// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only projections of a session for rendering.
//!
//! The sidebar tree is recomputed from the session on every draw; nothing
//! here caches or mutates.

use crate::model::{Folder, Note, Session};

/// One row of the sidebar tree, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeItem<'a> {
    Folder { folder: &'a Folder, current: bool },
    Note { note: &'a Note, nested: bool },
}

impl TreeItem<'_> {
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Note { nested: true, .. })
    }
}

/// Projects the session into sidebar rows: every folder in store order, each
/// followed by its top-level notes, each followed by its direct children.
/// Nesting is one level deep. The browsed folder only carries the marker.
pub fn tree_items(session: &Session) -> Vec<TreeItem<'_>> {
    let mut items = Vec::new();
    for folder in session.folders() {
        let current = folder.id() == session.current_folder_id();
        items.push(TreeItem::Folder { folder, current });
        for note in session.notes_in(folder.id()) {
            items.push(TreeItem::Note {
                note,
                nested: false,
            });
            for child in session.children_of(note.id()) {
                items.push(TreeItem::Note {
                    note: child,
                    nested: true,
                });
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::{tree_items, TreeItem};
    use crate::model::{default_folder_id, Folder, FolderId, Note, NoteId, Session};

    fn note(id: &str, folder: &FolderId, parent: Option<&str>) -> Note {
        Note::new(
            NoteId::new(id).expect("note id"),
            format!("Title {id}"),
            "",
            folder.clone(),
            parent.map(|p| NoteId::new(p).expect("parent id")),
            0,
            0,
        )
    }

    fn labels(items: &[TreeItem<'_>]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                TreeItem::Folder { folder, current } => {
                    format!("folder:{}{}", folder.id(), if *current { "*" } else { "" })
                }
                TreeItem::Note { note, nested } => {
                    format!("note:{}{}", note.id(), if *nested { ">" } else { "" })
                }
            })
            .collect()
    }

    #[test]
    fn lists_every_folder_with_its_notes_in_store_order() {
        let mut session = Session::new();
        let work = FolderId::new("folder-1").expect("folder id");
        session.replace_collections(
            vec![
                note("note-1", &default_folder_id(), None),
                note("note-2", &work, None),
                note("note-3", &default_folder_id(), None),
            ],
            vec![
                Folder::new(default_folder_id(), "Notes", None),
                Folder::new(work, "Work", None),
            ],
        );

        let items = tree_items(&session);
        assert_eq!(
            labels(&items),
            vec![
                "folder:default*",
                "note:note-1",
                "note:note-3",
                "folder:folder-1",
                "note:note-2"
            ]
        );
    }

    #[test]
    fn children_follow_their_parent_nested() {
        let mut session = Session::new();
        session.replace_collections(
            vec![
                note("note-1", &default_folder_id(), None),
                note("note-2", &default_folder_id(), Some("note-1")),
                note("note-3", &default_folder_id(), None),
            ],
            vec![Folder::new(default_folder_id(), "Notes", None)],
        );

        let items = tree_items(&session);
        assert_eq!(
            labels(&items),
            vec![
                "folder:default*",
                "note:note-1",
                "note:note-2>",
                "note:note-3"
            ]
        );
        assert!(items[2].is_nested());
    }

    #[test]
    fn browsing_another_folder_only_moves_the_current_marker() {
        let mut session = Session::new();
        let work = FolderId::new("folder-1").expect("folder id");
        session.replace_collections(
            vec![
                note("note-1", &work, None),
                note("note-2", &default_folder_id(), None),
            ],
            vec![
                Folder::new(default_folder_id(), "Notes", None),
                Folder::new(work.clone(), "Work", None),
            ],
        );
        session.set_current_folder(work);

        let items = tree_items(&session);
        assert_eq!(
            labels(&items),
            vec![
                "folder:default",
                "note:note-2",
                "folder:folder-1*",
                "note:note-1"
            ]
        );
    }
}

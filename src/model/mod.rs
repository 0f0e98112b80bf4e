// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A session holds the canonical note/folder collections and the tab
//! registry (working copies of open notes, one of which may be active).

pub mod ids;
pub mod note;
pub mod session;
pub mod tab;

pub use ids::{FolderId, Id, IdError, IdMinter, NoteId};
pub use note::{default_folder_id, Folder, Note, DEFAULT_FOLDER_ID};
pub use session::{CloseOutcome, Session};
pub use tab::Tab;

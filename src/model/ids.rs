// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier used across the model and the storage backend.
///
/// This is intentionally std-only and does not enforce a UUID format; it only
/// enforces that the id is a non-empty *path segment* (i.e. contains no `/`),
/// because note ids become file stems like `<id>.md` in the scratch dir.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_segment(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Constructor for ids the crate mints itself (`note-<millis>`,
    /// `folder-<millis>`, the default folder). Callers must pass a valid
    /// segment; the invariant is checked in debug builds.
    pub(crate) fn new_unchecked(value: impl Into<String>) -> Self {
        let value = value.into();
        debug_assert!(validate_id_segment(&value).is_ok());
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteIdTag {}
pub type NoteId = Id<NoteIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FolderIdTag {}
pub type FolderId = Id<FolderIdTag>;

/// Mints fresh `note-<millis>` / `folder-<millis>` ids from wall-clock
/// milliseconds.
///
/// Two ids minted within the same millisecond would collide, so the minter
/// remembers the last timestamp it used and bumps forward when needed; the
/// timestamp component is therefore strictly increasing per minter.
#[derive(Debug, Clone, Default)]
pub struct IdMinter {
    last_millis: i64,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_id(&mut self, now_millis: i64) -> NoteId {
        let millis = self.next_millis(now_millis);
        NoteId::new_unchecked(format!("note-{millis}"))
    }

    pub fn folder_id(&mut self, now_millis: i64) -> FolderId {
        let millis = self.next_millis(now_millis);
        FolderId::new_unchecked(format!("folder-{millis}"))
    }

    fn next_millis(&mut self, now_millis: i64) -> i64 {
        self.last_millis = now_millis.max(self.last_millis + 1);
        self.last_millis
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdError, IdMinter};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        let result: Result<Id<()>, _> = Id::new("a/b");
        assert_eq!(result, Err(IdError::ContainsSlash));
    }

    #[test]
    fn minter_never_repeats_within_one_millisecond() {
        let mut minter = IdMinter::new();
        let a = minter.note_id(1_700_000_000_000);
        let b = minter.note_id(1_700_000_000_000);
        let c = minter.note_id(1_700_000_000_000);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(b.as_str(), "note-1700000000001");
    }

    #[test]
    fn minter_follows_the_clock_when_it_moves() {
        let mut minter = IdMinter::new();
        let _ = minter.folder_id(100);
        let later = minter.folder_id(5_000);
        assert_eq!(later.as_str(), "folder-5000");
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Naiad — a terminal-first tabbed scratchpad for folder-organized notes.
//!
//! The session layer ([`ops`]) is fully testable without a terminal; [`tui`]
//! is a thin shell over it.

pub mod model;
pub mod ops;
pub mod persist;
pub mod query;
pub mod store;
pub mod tui;

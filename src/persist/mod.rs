// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence scheduling primitives.
//!
//! Timers are explicit single-slot deadlines driven by the event loop tick
//! rather than background threads: scheduling cancels the outstanding
//! deadline, so a superseded timer can never fire a stale write. Everything
//! here is pure over `Instant` values and tested without sleeping.

use std::time::{Duration, Instant};

/// Autosave fires after this much input inactivity on the active tab.
pub const EDIT_AUTOSAVE_DELAY: Duration = Duration::from_secs(2);

/// Unconditional safety-net save of whatever tab is active.
pub const INTERVAL_AUTOSAVE_PERIOD: Duration = Duration::from_secs(5);

/// Search queries are debounced from the last keystroke.
pub const SEARCH_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// How long the transient "Saved ✓" flash stays before reverting to the
/// steady saved indicator.
pub const SAVED_FLASH_DURATION: Duration = Duration::from_secs(2);

/// A single-slot debounce deadline.
///
/// There is at most one pending deadline per slot; `schedule` is
/// cancel-then-schedule by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebounceSlot {
    deadline: Option<Instant>,
}

impl DebounceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clears and reports a due deadline. Returns `false` while the slot is
    /// empty or not yet due.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A repeating deadline that advances by its period each time it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Duration,
    next: Instant,
}

impl IntervalTimer {
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        // Rescheduled relative to now, not the missed deadline; a stalled
        // loop must not cause a burst of catch-up fires.
        self.next = now + self.period;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    SavedFlash,
    Saved,
    Error,
}

/// The save status indicator.
///
/// Explicit saves run `saving → saved ✓ → saved`; silent saves settle a
/// pending `saving` to steady `saved` without the flash. Failures park the
/// indicator on `error` until the next save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveStatus {
    state: SaveState,
    flash_until: Option<Instant>,
}

impl SaveStatus {
    pub fn new() -> Self {
        Self {
            state: SaveState::Idle,
            flash_until: None,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn begin_saving(&mut self) {
        self.state = SaveState::Saving;
        self.flash_until = None;
    }

    /// Success of a status-visible save: flash, then revert on tick.
    pub fn saved_flash(&mut self, now: Instant) {
        self.state = SaveState::SavedFlash;
        self.flash_until = Some(now + SAVED_FLASH_DURATION);
    }

    /// Success of a silent save: settle a pending `saving` without a flash.
    pub fn saved_quiet(&mut self) {
        if self.state == SaveState::Saving {
            self.state = SaveState::Saved;
        }
    }

    pub fn error(&mut self) {
        self.state = SaveState::Error;
        self.flash_until = None;
    }

    pub fn tick(&mut self, now: Instant) {
        if self.state == SaveState::SavedFlash
            && self.flash_until.is_some_and(|until| now >= until)
        {
            self.state = SaveState::Saved;
            self.flash_until = None;
        }
    }

    pub fn label(&self) -> &'static str {
        match self.state {
            SaveState::Idle => "",
            SaveState::Saving => "Saving...",
            SaveState::SavedFlash => "Saved ✓",
            SaveState::Saved => "Saved",
            SaveState::Error => "Error!",
        }
    }
}

impl Default for SaveStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{
        DebounceSlot, IntervalTimer, SaveState, SaveStatus, EDIT_AUTOSAVE_DELAY,
        SAVED_FLASH_DURATION,
    };

    #[test]
    fn slot_fires_once_at_its_deadline() {
        let start = Instant::now();
        let mut slot = DebounceSlot::new();
        slot.schedule(start, EDIT_AUTOSAVE_DELAY);

        assert!(!slot.take_due(start + Duration::from_millis(1_999)));
        assert!(slot.take_due(start + Duration::from_secs(2)));
        assert!(!slot.take_due(start + Duration::from_secs(10)));
    }

    #[test]
    fn rescheduling_supersedes_the_pending_deadline() {
        let start = Instant::now();
        let mut slot = DebounceSlot::new();
        slot.schedule(start, EDIT_AUTOSAVE_DELAY);
        slot.schedule(start + Duration::from_secs(1), EDIT_AUTOSAVE_DELAY);

        // The first deadline must not fire.
        assert!(!slot.take_due(start + Duration::from_secs(2)));
        assert!(slot.take_due(start + Duration::from_secs(3)));
    }

    #[test]
    fn cancel_empties_the_slot() {
        let start = Instant::now();
        let mut slot = DebounceSlot::new();
        slot.schedule(start, EDIT_AUTOSAVE_DELAY);
        slot.cancel();
        assert!(!slot.is_scheduled());
        assert!(!slot.take_due(start + Duration::from_secs(60)));
    }

    #[test]
    fn interval_advances_relative_to_now() {
        let start = Instant::now();
        let mut interval = IntervalTimer::new(start, Duration::from_secs(5));

        assert!(!interval.take_due(start + Duration::from_secs(4)));
        assert!(interval.take_due(start + Duration::from_secs(5)));
        // A late tick reschedules from the tick, not the missed deadline.
        assert!(!interval.take_due(start + Duration::from_secs(9)));
        assert!(interval.take_due(start + Duration::from_secs(10)));
    }

    #[test]
    fn explicit_save_flash_reverts_to_steady_saved() {
        let start = Instant::now();
        let mut status = SaveStatus::new();
        status.begin_saving();
        status.saved_flash(start);
        assert_eq!(status.state(), SaveState::SavedFlash);
        assert_eq!(status.label(), "Saved ✓");

        status.tick(start + Duration::from_millis(100));
        assert_eq!(status.state(), SaveState::SavedFlash);

        status.tick(start + SAVED_FLASH_DURATION);
        assert_eq!(status.state(), SaveState::Saved);
        assert_eq!(status.label(), "Saved");
    }

    #[test]
    fn quiet_save_settles_only_a_pending_saving() {
        let mut status = SaveStatus::new();
        status.saved_quiet();
        assert_eq!(status.state(), SaveState::Idle);

        status.begin_saving();
        status.saved_quiet();
        assert_eq!(status.state(), SaveState::Saved);
    }

    #[test]
    fn error_sticks_until_the_next_attempt() {
        let start = Instant::now();
        let mut status = SaveStatus::new();
        status.begin_saving();
        status.error();
        status.tick(start + Duration::from_secs(60));
        assert_eq!(status.state(), SaveState::Error);
        assert_eq!(status.label(), "Error!");

        status.begin_saving();
        assert_eq!(status.state(), SaveState::Saving);
    }
}

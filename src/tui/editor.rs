// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Naiad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Naiad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// A line-based edit buffer with a cursor.
///
/// Columns are measured in chars, not bytes; every mutation keeps the cursor
/// on a valid position. The buffer always holds at least one (possibly
/// empty) line so `content` round-trips through `from_content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }

    pub fn from_content(content: &str) -> Self {
        let lines = content.split('\n').map(str::to_owned).collect::<Vec<_>>();
        Self {
            lines,
            row: 0,
            col: 0,
        }
    }

    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = byte_index(&self.lines[self.row], self.col);
        self.lines[self.row].insert(idx, ch);
        self.col += 1;
    }

    pub fn insert_newline(&mut self) {
        let idx = byte_index(&self.lines[self.row], self.col);
        let rest = self.lines[self.row].split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Deletes the char before the cursor, joining with the previous line at
    /// a line start.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let idx = byte_index(&self.lines[self.row], self.col - 1);
            self.lines[self.row].remove(idx);
            self.col -= 1;
            return;
        }
        if self.row == 0 {
            return;
        }
        let current = self.lines.remove(self.row);
        self.row -= 1;
        self.col = char_count(&self.lines[self.row]);
        self.lines[self.row].push_str(&current);
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = char_count(&self.lines[self.row]);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < char_count(&self.lines[self.row]) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(char_count(&self.lines[self.row]));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(char_count(&self.lines[self.row]));
        }
    }

    pub fn move_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.col = char_count(&self.lines[self.row]);
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

fn char_count(line: &str) -> usize {
    line.chars().count()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(idx, _)| idx)
}

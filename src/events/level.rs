// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity level for log events.
///
/// Levels are totally ordered: `Verbose < Debug < Information < Warning <
/// Error < Fatal`. Configuration refers to levels by name; parsing is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Verbose,
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl Level {
    /// All levels in ascending severity order.
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Canonical name of the level as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            Level::Verbose => 0,
            Level::Debug => 1,
            Level::Information => 2,
            Level::Warning => 3,
            Level::Error => 4,
            Level::Fatal => 5,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Verbose,
            1 => Level::Debug,
            2 => Level::Information,
            3 => Level::Warning,
            4 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    pub literal: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a recognized level name", self.literal)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseLevelError {
                literal: s.to_string(),
            })
    }
}

/// An atomically readable and writable minimum-level cell.
///
/// The reload path stores a new level while the emit path reads concurrently;
/// neither side takes a lock. This is the only mutable state a built pipeline
/// carries for level control.
#[derive(Debug)]
pub struct LevelSwitch {
    minimum: AtomicU8,
}

impl LevelSwitch {
    pub fn new(level: Level) -> Self {
        Self {
            minimum: AtomicU8::new(level.as_u8()),
        }
    }

    /// Current minimum level.
    pub fn minimum(&self) -> Level {
        Level::from_u8(self.minimum.load(Ordering::Relaxed))
    }

    /// Replace the minimum level. Visible to subsequent `minimum()` calls.
    pub fn set(&self, level: Level) {
        self.minimum.store(level.as_u8(), Ordering::Relaxed);
    }
}

//! Severity levels and level filters

use std::fmt;

/// Severity of a log event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Panic,
    Fatal,
}

impl Level {
    /// Every level, least severe first
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Panic,
        Self::Fatal,
    ];

    /// Name used in rendered log lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of levels a destination accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelSet(u8);

impl LevelSet {
    /// info, warning, error, panic, fatal
    pub const ALL: Self = Self::of(&Level::ALL);

    /// error, panic, fatal
    pub const SEVERE: Self = Self::of(&[Level::Error, Level::Panic, Level::Fatal]);

    /// Build a set from a list of levels
    pub const fn of(levels: &[Level]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < levels.len() {
            mask |= levels[i].bit();
            i += 1;
        }
        Self(mask)
    }

    pub const fn contains(self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }
}

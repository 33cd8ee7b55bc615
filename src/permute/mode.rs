//! Permutation modes and their names.

use std::fmt;
use std::str::FromStr;

use crate::errors::RenameError;

/// How destination names are mapped onto source names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermutationMode {
    /// Content of f(i+1) moves to f(i); f1 wraps around to fN.
    #[default]
    RotateLeft,
    /// Content of f(i) moves to f(i+1); fN wraps around to f1.
    RotateRight,
    /// Adjacent pairs exchange content.
    Swap,
    /// Mirror: f(i) exchanges content with f(N+1-i).
    Flip,
}

impl PermutationMode {
    /// Parse a mode name or short alias (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rotate-left" | "rotate_left" | "left" | "rl" | "l" => Some(PermutationMode::RotateLeft),
            "rotate-right" | "rotate_right" | "right" | "rr" | "r" => {
                Some(PermutationMode::RotateRight)
            }
            "swap" | "s" => Some(PermutationMode::Swap),
            "flip" | "flip-even" | "flip_even" | "f" => Some(PermutationMode::Flip),
            _ => None,
        }
    }

    /// Pairwise modes only work on an even number of files.
    pub fn requires_even(self) -> bool {
        matches!(self, PermutationMode::Swap | PermutationMode::Flip)
    }
}

impl fmt::Display for PermutationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PermutationMode::RotateLeft => "rotate-left",
            PermutationMode::RotateRight => "rotate-right",
            PermutationMode::Swap => "swap",
            PermutationMode::Flip => "flip",
        };
        f.write_str(s)
    }
}

impl FromStr for PermutationMode {
    type Err = RenameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            RenameError::invalid(format!(
                "unknown mode '{s}' (expected rotate-left, rotate-right, swap, flip or flip-even)"
            ))
        })
    }
}

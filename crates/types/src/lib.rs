//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (board engine, runtime, stores, renderers).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 8x8 grid:
//!
//! - **Width**: 8 columns (indexed 0-7)
//! - **Height**: 8 rows (indexed 0-7)
//! - **Linear index**: `row * 8 + col`, 0..64
//!
//! # Session Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MOVE_BUDGET` | 30 | Moves per session before an automatic commit |
//! | `POINTS_PER_CELL` | 50 | Score for each matched cell |
//! | `FLX_DIVISOR` | 10 | FLX award is `floor(score / 10)` |
//! | `MAX_SUBMITTED_SCORE` | 10 000 | Largest score a store accepts on save |
//!
//! # Timing
//!
//! - `SETTLE_MS`: 300ms pause between a swap (or cascade pass) and the next scan
//! - `POPUP_TTL_MS`: 1000ms lifetime of a score popup
//!
//! # Examples
//!
//! ```
//! use flx_match_types::{Color, GRID_WIDTH, CELL_COUNT};
//!
//! let color = Color::from_str("purple").unwrap();
//! assert_eq!(color, Color::Purple);
//! assert_eq!(Color::from_char('P'), Some(Color::Purple));
//! assert_eq!(color.as_char(), 'P');
//!
//! assert_eq!(GRID_WIDTH, 8);
//! assert_eq!(CELL_COUNT, 64);
//! ```

/// Grid width in cells (8 columns)
pub const GRID_WIDTH: usize = 8;

/// Grid height in cells (8 rows)
pub const GRID_HEIGHT: usize = 8;

/// Total number of cells on the grid
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

/// Minimum run length that counts as a match
pub const MATCH_LENGTH: usize = 3;

/// Moves granted per session
pub const MOVE_BUDGET: u32 = 30;

/// Points awarded for every matched cell
pub const POINTS_PER_CELL: u32 = 50;

/// FLX points are awarded as `floor(score / FLX_DIVISOR)` on save
pub const FLX_DIVISOR: u64 = 10;

/// Upper bound on a score submitted for saving
pub const MAX_SUBMITTED_SCORE: u32 = 10_000;

/// Pause between a swap (or cascade pass) and the next match scan
pub const SETTLE_MS: u64 = 300;

/// Lifetime of a score popup
pub const POPUP_TTL_MS: u32 = 1000;

/// Maximum popups kept at once; the oldest is dropped first
pub const MAX_POPUPS: usize = 8;

/// Stable numeric player identifier supplied by the hosting chat platform
pub type PlayerId = u64;

/// Tile colors (six variants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    /// Number of colors in the palette
    pub const COUNT: usize = 6;

    /// All colors in palette order
    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    /// Color at a palette index, wrapping around the palette
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Palette index (0-5)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use flx_match_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("ORANGE"), Some(Color::Orange));
    /// assert_eq!(Color::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "purple" => Some(Color::Purple),
            "orange" => Some(Color::Orange),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Orange => "orange",
        }
    }

    /// Parse the single-letter form used by board layouts (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Color::Red),
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'P' => Some(Color::Purple),
            'O' => Some(Color::Orange),
            _ => None,
        }
    }

    /// Single uppercase letter
    pub fn as_char(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Purple => 'P',
            Color::Orange => 'O',
        }
    }
}

/// A cell holds exactly one color; there are no empty cells
pub type Cell = Color;

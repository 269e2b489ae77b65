//! RNG module - color sources for board generation and refills
//!
//! Every cell color is drawn independently and uniformly from the six-color
//! palette. [`SimpleRng`] is a seeded LCG so that games are reproducible;
//! [`ScriptedColors`] replays a fixed sequence for crafted scenarios.

use crate::types::Color;

/// Anything that can hand out cell colors
pub trait ColorSource {
    fn next_color(&mut self) -> Color;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

impl ColorSource for SimpleRng {
    fn next_color(&mut self) -> Color {
        Color::from_index(self.next_range(Color::COUNT as u32) as usize)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of colors, starting over when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedColors {
    colors: Vec<Color>,
    cursor: usize,
}

impl ScriptedColors {
    /// An empty script falls back to red for every draw.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors, cursor: 0 }
    }

    /// Parse a script from color letters, ignoring whitespace and unknown characters
    pub fn from_letters(letters: &str) -> Self {
        Self::new(letters.chars().filter_map(Color::from_char).collect())
    }

    /// Number of colors handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::Red;
        }
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor += 1;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        // Different seeds should eventually diverge
        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_rng_covers_palette() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [0u32; Color::COUNT];
        for _ in 0..600 {
            seen[rng.next_color().index()] += 1;
        }
        for (i, count) in seen.iter().enumerate() {
            assert!(*count > 50, "color {} drawn only {} times", i, count);
        }
    }

    #[test]
    fn test_scripted_colors_cycle() {
        let mut script = ScriptedColors::from_letters("R G b");
        assert_eq!(script.next_color(), Color::Red);
        assert_eq!(script.next_color(), Color::Green);
        assert_eq!(script.next_color(), Color::Blue);
        assert_eq!(script.next_color(), Color::Red);
        assert_eq!(script.drawn(), 4);

        let mut empty = ScriptedColors::new(Vec::new());
        assert_eq!(empty.next_color(), Color::Red);
    }
}

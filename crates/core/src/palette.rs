//! Palette - the ordered set of colors a board draws from.

use crate::error::GridError;
use crate::types::TokenColor;

/// A validated, duplicate-free, ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<TokenColor>,
}

impl Palette {
    /// Build a palette, dropping duplicates while keeping first-seen order.
    ///
    /// At least two distinct colors are required: board setup recolors a
    /// cell to something different from its current color.
    pub fn new(colors: impl IntoIterator<Item = TokenColor>) -> Result<Self, GridError> {
        let mut out: Vec<TokenColor> = Vec::new();
        for c in colors {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        if out.len() < 2 {
            return Err(GridError::InvalidPalette {
                distinct: out.len(),
            });
        }
        Ok(Self { colors: out })
    }

    /// Parse a comma separated list of color names, e.g. `"red,blue,green"`.
    pub fn parse(list: &str) -> Option<Self> {
        let mut colors = Vec::new();
        for part in list.split(',').filter(|p| !p.trim().is_empty()) {
            colors.push(TokenColor::from_str(part)?);
        }
        Self::new(colors).ok()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`. Callers pass indices below [`Palette::len`].
    pub fn color(&self, index: usize) -> TokenColor {
        self.colors[index % self.colors.len()]
    }

    /// Position of `color`, if present.
    pub fn index_of(&self, color: TokenColor) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    pub fn contains(&self, color: TokenColor) -> bool {
        self.colors.contains(&color)
    }

    pub fn colors(&self) -> &[TokenColor] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: TokenColor::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_has_six_colors() {
        let p = Palette::default();
        assert_eq!(p.len(), 6);
        assert_eq!(p.color(0), TokenColor::Red);
        assert_eq!(p.color(5), TokenColor::Cyan);
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let p = Palette::new([TokenColor::Red, TokenColor::Blue, TokenColor::Red]).unwrap();
        assert_eq!(p.colors(), &[TokenColor::Red, TokenColor::Blue]);
    }

    #[test]
    fn test_single_color_is_rejected() {
        let err = Palette::new([TokenColor::Red, TokenColor::Red]).unwrap_err();
        assert_eq!(err, GridError::InvalidPalette { distinct: 1 });
    }

    #[test]
    fn test_parse_list() {
        let p = Palette::parse("red, Blue ,g").unwrap();
        assert_eq!(
            p.colors(),
            &[TokenColor::Red, TokenColor::Blue, TokenColor::Green]
        );
        assert!(Palette::parse("red,purple").is_none());
        assert!(Palette::parse("red").is_none());
    }
}

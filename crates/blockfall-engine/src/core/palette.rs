use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed, ordered list of the colors cells can be drawn with.
///
/// Board cells and pieces store an index into this list rather than a color.
/// Index `0` means "unfilled" and is never drawn as a filled cell; pieces are
/// colored with one of the remaining indices (see [`ColorIndex`]).
///
/// # Example
///
/// ```
/// use blockfall_engine::{ColorIndex, Palette, Rgb};
///
/// let palette = Palette::DEFAULT;
/// assert_eq!(palette.empty(), Rgb(0, 0, 0));
///
/// let purple = ColorIndex::new(1).unwrap();
/// assert_eq!(palette.color(purple), Rgb(120, 37, 179));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: [Rgb; Palette::LEN],
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Palette {
    /// Number of entries, including the "unfilled" entry at index 0.
    pub const LEN: usize = 7;

    pub const DEFAULT: Self = Self::new([
        Rgb(0, 0, 0),
        Rgb(120, 37, 179),
        Rgb(100, 179, 179),
        Rgb(80, 34, 22),
        Rgb(80, 134, 22),
        Rgb(180, 34, 22),
        Rgb(180, 34, 122),
    ]);

    #[must_use]
    pub const fn new(colors: [Rgb; Self::LEN]) -> Self {
        Self { colors }
    }

    /// Color reserved for empty cells.
    #[must_use]
    pub const fn empty(&self) -> Rgb {
        self.colors[0]
    }

    #[must_use]
    pub const fn color(&self, index: ColorIndex) -> Rgb {
        self.colors[index.0 as usize]
    }

    /// Looks up the color of a raw board cell value.
    ///
    /// Returns `None` for empty cells and for values outside the palette.
    #[must_use]
    pub fn cell_color(&self, cell: u8) -> Option<Rgb> {
        ColorIndex::new(cell).map(|index| self.color(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }
}

/// Index of a fillable palette entry, always in `1..Palette::LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorIndex(u8);

impl ColorIndex {
    /// Returns `None` for `0` (the "unfilled" entry) and out-of-range values.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index == 0 || index as usize >= Palette::LEN {
            None
        } else {
            Some(Self(index))
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Distribution<ColorIndex> for StandardUniform {
    #[expect(clippy::cast_possible_truncation)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorIndex {
        ColorIndex(rng.random_range(1..Palette::LEN) as u8)
    }
}

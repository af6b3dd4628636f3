use crate::color_space::Oklab;
use crate::PaletteError;
use fractalsky_core::packed_color::OPAQUE;
use serde::{Deserialize, Serialize};

/// A circular palette of packed colors.
///
/// Storage holds `len() + 1` entries with the last equal to the first, so
/// `entry(id + 1)` is valid for every `id < len()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Palette {
    entries: Vec<u32>,
}

impl Palette {
    /// Build a palette from `colors`, forcing every entry opaque.
    pub fn new(colors: &[u32]) -> Result<Self, PaletteError> {
        let first = *colors.first().ok_or(PaletteError::Empty)?;
        let mut entries = Vec::with_capacity(colors.len() + 1);
        entries.extend(colors.iter().map(|c| c | OPAQUE));
        entries.push(first | OPAQUE);
        Ok(Self { entries })
    }

    /// Number of distinct colors, excluding the wraparound entry.
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn entry(&self, index: usize) -> u32 {
        self.entries[index]
    }

    /// The distinct colors.
    pub fn colors(&self) -> &[u32] {
        &self.entries[..self.len()]
    }

    /// All stored entries, including the wraparound duplicate.
    pub fn as_slice(&self) -> &[u32] {
        &self.entries
    }

    /// Dense palette interpolating every adjacent pair (including last to first)
    /// in Oklab space. Each segment contributes `steps` samples, endpoints included.
    pub fn expand_oklab(&self, steps: usize) -> Result<Palette, PaletteError> {
        if steps < 2 {
            return Err(PaletteError::InvalidSteps(steps));
        }
        let last_step = (steps - 1) as f64;
        let mut dense = Vec::with_capacity(self.len() * steps);
        for pair in self.entries.windows(2) {
            let from = Oklab::from_packed(pair[0]);
            let to = Oklab::from_packed(pair[1]);
            dense.extend((0..steps).map(|j| from.lerp(to, j as f64 / last_step).to_packed()));
        }
        log::debug!(
            "expanded {} colors to {} in Oklab space",
            self.len(),
            dense.len()
        );
        Palette::new(&dense)
    }
}

impl TryFrom<Vec<u32>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<u32>) -> Result<Self, Self::Error> {
        Palette::new(&colors)
    }
}

impl From<Palette> for Vec<u32> {
    fn from(palette: Palette) -> Self {
        palette.colors().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appends_wraparound_entry() {
        let palette = Palette::new(&[0x00ff_0000, 0x0000_ff00]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.as_slice(), &[0xffff_0000, 0xff00_ff00, 0xffff_0000]);
        assert_eq!(palette.entry(2), palette.entry(0));
    }

    #[test]
    fn single_color_palette_wraps_onto_itself() {
        let palette = Palette::new(&[0x123456]).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.entry(1), 0xff12_3456);
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::new(&[]), Err(PaletteError::Empty));
    }

    #[test]
    fn oklab_expansion_keeps_segment_endpoints() {
        let palette = Palette::new(&[0xff00_0000, 0xffff_ffff]).unwrap();
        let dense = palette.expand_oklab(5).unwrap();
        assert_eq!(dense.len(), 10);
        assert_eq!(dense.entry(0), 0xff00_0000);
        assert_eq!(dense.entry(4), 0xffff_ffff);
        assert_eq!(dense.entry(5), 0xffff_ffff);
        assert_eq!(dense.entry(9), 0xff00_0000);
    }

    #[test]
    fn oklab_expansion_needs_two_steps() {
        let palette = Palette::new(&[0, 1]).unwrap();
        assert_eq!(palette.expand_oklab(1), Err(PaletteError::InvalidSteps(1)));
    }

    #[test]
    fn serializes_as_distinct_colors() {
        let palette = Palette::new(&[0x010203, 0xff04_0506]).unwrap();
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, "[4278256131,4278453510]");
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }
}

//! Registries for the fractal families, shading modes, and palette render modes.

use serde::{Deserialize, Serialize};

/// Escape-time map family. Discriminants are the wire ids used by hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalFamily {
    Mandelbrot = 1,
    Multibrot3 = 2,
    Multibrot4 = 3,
    Multibrot5 = 4,
    Multibrot6 = 5,
    Multibrot7 = 6,
    BurningShip = 7,
    BurningShip3 = 8,
    BurningShip4 = 9,
    Celtic = 10,
    Perpendicular = 11,
    Buffalo = 12,
    Tricorn = 13,
    HybridShip = 14,
    HybridShip3 = 15,
    HybridShip4 = 16,
}

impl FractalFamily {
    pub const ALL: [FractalFamily; 16] = [
        FractalFamily::Mandelbrot,
        FractalFamily::Multibrot3,
        FractalFamily::Multibrot4,
        FractalFamily::Multibrot5,
        FractalFamily::Multibrot6,
        FractalFamily::Multibrot7,
        FractalFamily::BurningShip,
        FractalFamily::BurningShip3,
        FractalFamily::BurningShip4,
        FractalFamily::Celtic,
        FractalFamily::Perpendicular,
        FractalFamily::Buffalo,
        FractalFamily::Tricorn,
        FractalFamily::HybridShip,
        FractalFamily::HybridShip3,
        FractalFamily::HybridShip4,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    /// Look up a family by its positive wire id.
    pub fn from_id(id: i32) -> Option<Self> {
        if (1..=16).contains(&id) {
            Some(Self::ALL[(id - 1) as usize])
        } else {
            None
        }
    }

    /// Zero-based position in [`FractalFamily::ALL`], used to index dispatch tables.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FractalFamily::Mandelbrot => "Mandelbrot",
            FractalFamily::Multibrot3 => "Multibrot 3",
            FractalFamily::Multibrot4 => "Multibrot 4",
            FractalFamily::Multibrot5 => "Multibrot 5",
            FractalFamily::Multibrot6 => "Multibrot 6",
            FractalFamily::Multibrot7 => "Multibrot 7",
            FractalFamily::BurningShip => "Burning Ship",
            FractalFamily::BurningShip3 => "Burning Ship 3",
            FractalFamily::BurningShip4 => "Burning Ship 4",
            FractalFamily::Celtic => "Celtic",
            FractalFamily::Perpendicular => "Perpendicular",
            FractalFamily::Buffalo => "Buffalo",
            FractalFamily::Tricorn => "Tricorn",
            FractalFamily::HybridShip => "Hybrid Ship",
            FractalFamily::HybridShip3 => "Hybrid Ship 3",
            FractalFamily::HybridShip4 => "Hybrid Ship 4",
        }
    }

    /// Polynomial degree of the underlying map.
    pub fn degree(self) -> u32 {
        match self {
            FractalFamily::Multibrot3 | FractalFamily::BurningShip3 | FractalFamily::HybridShip3 => 3,
            FractalFamily::Multibrot4 | FractalFamily::BurningShip4 | FractalFamily::HybridShip4 => 4,
            FractalFamily::Multibrot5 => 5,
            FractalFamily::Multibrot6 => 6,
            FractalFamily::Multibrot7 => 7,
            _ => 2,
        }
    }

    /// Next family in registry order, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Shift applied to the default view so the interesting region is centred.
    pub fn home_offset(self) -> (f64, f64) {
        match self {
            FractalFamily::Mandelbrot | FractalFamily::Celtic | FractalFamily::HybridShip => {
                (0.75, 0.0)
            }
            FractalFamily::BurningShip => (0.5, -0.4),
            FractalFamily::Perpendicular | FractalFamily::Buffalo | FractalFamily::Tricorn => {
                (0.5, 0.0)
            }
            FractalFamily::BurningShip3 => (0.2, 0.25),
            _ => (0.0, 0.0),
        }
    }
}

/// How escape direction darkens the final color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShadingMode {
    #[default]
    None = 0,
    Shadow = 1,
    InvertedShadow = 2,
    Stripes = 3,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 4] = [
        ShadingMode::None,
        ShadingMode::Shadow,
        ShadingMode::InvertedShadow,
        ShadingMode::Stripes,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ShadingMode::None => "Default",
            ShadingMode::Shadow => "Shadow",
            ShadingMode::InvertedShadow => "Inverted Shadow",
            ShadingMode::Stripes => "Stripes",
        }
    }

    /// Darken amount in `[0, 1]` for a stored shading intensity.
    pub fn darken_amount(self, shade: f32) -> f32 {
        match self {
            ShadingMode::None => 0.0,
            ShadingMode::Shadow | ShadingMode::Stripes => shade,
            ShadingMode::InvertedShadow => 1.0 - shade,
        }
    }
}

/// Palette banding policy applied inside each palette segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Smooth = 0,
    Layered = 1,
    Banded = 2,
    Ribbon = 3,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::Smooth,
        RenderMode::Layered,
        RenderMode::Banded,
        RenderMode::Ribbon,
    ];

    pub fn id(self) -> i32 {
        self as i32
    }

    /// Unknown ids render as [`RenderMode::Smooth`].
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => RenderMode::Layered,
            2 => RenderMode::Banded,
            3 => RenderMode::Ribbon,
            _ => RenderMode::Smooth,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RenderMode::Smooth => "Smooth",
            RenderMode::Layered => "Layered",
            RenderMode::Banded => "Banded",
            RenderMode::Ribbon => "Ribbon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_registry() {
        for family in FractalFamily::ALL {
            assert_eq!(FractalFamily::from_id(family.id()), Some(family));
        }
        assert_eq!(FractalFamily::from_id(0), None);
        assert_eq!(FractalFamily::from_id(17), None);
        assert_eq!(FractalFamily::from_id(-1), None);
    }

    #[test]
    fn next_wraps_to_first_family() {
        assert_eq!(FractalFamily::HybridShip4.next(), FractalFamily::Mandelbrot);
        assert_eq!(FractalFamily::Mandelbrot.next(), FractalFamily::Multibrot3);
    }

    #[test]
    fn degrees_follow_family_polynomials() {
        assert_eq!(FractalFamily::Mandelbrot.degree(), 2);
        assert_eq!(FractalFamily::Multibrot7.degree(), 7);
        assert_eq!(FractalFamily::HybridShip4.degree(), 4);
        assert_eq!(FractalFamily::Buffalo.degree(), 2);
    }

    #[test]
    fn inverted_shadow_flips_darken_amount() {
        assert_eq!(ShadingMode::None.darken_amount(0.3), 0.0);
        assert_eq!(ShadingMode::Shadow.darken_amount(0.3), 0.3);
        assert_eq!(ShadingMode::Stripes.darken_amount(0.3), 0.3);
        assert!((ShadingMode::InvertedShadow.darken_amount(0.3) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn unknown_render_mode_falls_back_to_smooth() {
        assert_eq!(RenderMode::from_id(9), RenderMode::Smooth);
        assert_eq!(RenderMode::from_id(-2), RenderMode::Smooth);
        assert_eq!(ShadingMode::from_id(4), None);
        assert_eq!(ShadingMode::from_id(-1), None);
    }
}

//! Built-in palettes and parsing of user-supplied palette text.

use crate::{Palette, PaletteError};
use fractalsky_core::packed_color::{pack_rgb, OPAQUE};
use serde::{Deserialize, Serialize};

/// Longest palette text accepted, in tokens.
pub const MAX_PALETTE_TOKENS: usize = 25_000;

/// A palette together with the color used for pixels that never escape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePreset {
    pub name: String,
    pub palette: Palette,
    pub interior: u32,
}

const SPECTRUM: [u32; 18] = [
    0x0a0aa0, 0x3232ff, 0x00c8ff, 0x00b43c, 0xdcb428, 0x7d643c, 0xdcc8c8, 0xc864aa, 0x820a8c,
    0x7d00b9, 0x375ff5, 0x14a0e6, 0x5fe1dc, 0x8ce1c8, 0x9bc87d, 0xf08750, 0xe650aa, 0xa564f0,
];

const EMBER: [u32; 11] = [
    0xc8c8ff, 0x4cdbff, 0x0692d7, 0x122c91, 0x371663, 0x600d39, 0x8a030f, 0xbf2600, 0xfb6200,
    0xffc9a6, 0x000000,
];

impl PalettePreset {
    fn build(name: &str, colors: &[u32], interior: u32) -> Result<Self, PaletteError> {
        Ok(Self {
            name: name.to_string(),
            palette: Palette::new(colors)?,
            interior: interior | OPAQUE,
        })
    }

    /// Factory default palettes built into the binary.
    pub fn factory_defaults() -> Vec<PalettePreset> {
        [
            ("Spectrum", &SPECTRUM[..], 0xff00_0000),
            ("Ember", &EMBER[..], 0xff00_0000),
        ]
        .into_iter()
        .filter_map(|(name, colors, interior)| Self::build(name, colors, interior).ok())
        .collect()
    }

    /// Case-insensitive lookup among the factory defaults.
    pub fn by_name(name: &str) -> Result<Self, PaletteError> {
        Self::factory_defaults()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| PaletteError::UnknownPreset(name.to_string()))
    }

    /// Parse whitespace-separated color tokens. The last token is the interior
    /// color, the rest form the palette.
    ///
    /// Tokens are `#rrggbb`, `rrggbb`, `#rgb`, `rgb` or decimal `r,g,b`.
    pub fn parse(text: &str) -> Result<Self, PaletteError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() > MAX_PALETTE_TOKENS {
            return Err(PaletteError::TooManyColors(tokens.len()));
        }
        let colors = tokens
            .iter()
            .enumerate()
            .map(|(position, token)| {
                parse_color(token).ok_or_else(|| PaletteError::InvalidToken {
                    position,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let Some((interior, palette)) = colors.split_last() else {
            return Err(PaletteError::TooFewColors(0));
        };
        if palette.is_empty() {
            return Err(PaletteError::TooFewColors(colors.len()));
        }
        Self::build("Custom", palette, *interior)
    }
}

fn parse_color(token: &str) -> Option<u32> {
    if token.contains(',') {
        let channels = token
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok().map(u32::from))
            .collect::<Option<Vec<_>>>()?;
        return match channels.as_slice() {
            [r, g, b] => Some(pack_rgb(*r, *g, *b)),
            _ => None,
        };
    }

    let hex = token.strip_prefix('#').unwrap_or(token);
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16))
        .collect::<Option<Vec<_>>>()?;
    match digits.as_slice() {
        [r1, r0, g1, g0, b1, b0] => Some(pack_rgb(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        [r, g, b] => Some(pack_rgb(r * 17, g * 17, b * 17)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_defaults_are_opaque_and_wrapped() {
        let presets = PalettePreset::factory_defaults();
        assert_eq!(presets.len(), 2);
        let spectrum = &presets[0];
        assert_eq!(spectrum.palette.len(), 18);
        assert_eq!(spectrum.palette.entry(18), spectrum.palette.entry(0));
        assert!(spectrum.palette.as_slice().iter().all(|c| c >> 24 == 0xff));
        assert_eq!(presets[1].palette.len(), 11);
    }

    #[test]
    fn lookup_by_name_ignores_case() {
        assert_eq!(PalettePreset::by_name("ember").unwrap().name, "Ember");
        assert_eq!(
            PalettePreset::by_name("nope"),
            Err(PaletteError::UnknownPreset("nope".to_string()))
        );
    }

    #[test]
    fn parse_accepts_all_token_forms() {
        let preset = PalettePreset::parse("#ff0000 00ff00 #00f 10,20,30 fff").unwrap();
        assert_eq!(
            preset.palette.colors(),
            &[
                pack_rgb(255, 0, 0),
                pack_rgb(0, 255, 0),
                pack_rgb(0, 0, 255),
                pack_rgb(10, 20, 30)
            ]
        );
        assert_eq!(preset.interior, 0xffff_ffff);
    }

    #[test]
    fn hex_puts_red_in_low_byte() {
        assert_eq!(parse_color("#102030"), Some(0xff30_2010));
        assert_eq!(parse_color("ABC"), Some(pack_rgb(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn parse_needs_two_colors() {
        assert_eq!(
            PalettePreset::parse("#123456"),
            Err(PaletteError::TooFewColors(1))
        );
        assert_eq!(PalettePreset::parse("   "), Err(PaletteError::TooFewColors(0)));
    }

    #[test]
    fn parse_reports_token_position_and_size_limit() {
        assert_eq!(
            PalettePreset::parse("fff 000 #12 000"),
            Err(PaletteError::InvalidToken {
                position: 2,
                token: "#12".to_string()
            })
        );
        let huge = "000 ".repeat(MAX_PALETTE_TOKENS + 1);
        assert_eq!(
            PalettePreset::parse(&huge),
            Err(PaletteError::TooManyColors(MAX_PALETTE_TOKENS + 1))
        );
    }

    #[test]
    fn parse_rejects_bad_tokens() {
        for bad in ["#12345", "zzzzzz", "1,2", "1,2,300", "1,,3"] {
            assert_eq!(
                PalettePreset::parse(&format!("{bad} #000000")),
                Err(PaletteError::InvalidToken {
                    position: 0,
                    token: bad.to_string()
                }),
                "{bad} should be rejected"
            );
        }
    }
}

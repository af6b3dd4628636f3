//! Packed 32-bit colors.
//!
//! Layout: red in the low byte, green at bits 8..16, blue at bits 16..24,
//! alpha in the high byte. This is the byte order of an RGBA canvas buffer
//! read as little-endian `u32` words.

pub const OPAQUE: u32 = 0xff00_0000;

#[inline]
pub fn red(color: u32) -> u32 {
    color & 0xff
}

#[inline]
pub fn green(color: u32) -> u32 {
    (color >> 8) & 0xff
}

#[inline]
pub fn blue(color: u32) -> u32 {
    (color >> 16) & 0xff
}

/// Pack three channel values into an opaque color.
#[inline]
pub fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r & 0xff) | ((g & 0xff) << 8) | ((b & 0xff) << 16) | OPAQUE
}

/// Blend `start` toward `end` by `alpha / 256` per channel. The result is opaque.
#[inline]
pub fn mix(start: u32, end: u32, alpha: u8) -> u32 {
    let a = u32::from(alpha);
    let rev = 255 - a;
    let channel = |s: u32, e: u32| (s * rev + e * a) >> 8;
    pack_rgb(
        channel(red(start), red(end)),
        channel(green(start), green(end)),
        channel(blue(start), blue(end)),
    )
}

/// Blend toward black by `amount / 256`. An amount of zero returns `color` untouched.
#[inline]
pub fn darken(color: u32, amount: u8) -> u32 {
    if amount == 0 {
        return color;
    }
    let keep = 255 - u32::from(amount);
    pack_rgb(
        (red(color) * keep) >> 8,
        (green(color) * keep) >> 8,
        (blue(color) * keep) >> 8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_in_canvas_order() {
        let c = 0x80_30_20_10;
        assert_eq!(red(c), 0x10);
        assert_eq!(green(c), 0x20);
        assert_eq!(blue(c), 0x30);
    }

    #[test]
    fn mix_halfway_between_two_primaries() {
        // alpha 128: start keeps 127/256, end gets 128/256
        let mixed = mix(0xffff_0000, 0xff00_ff00, 128);
        assert_eq!(mixed, 0xff7e_7f00);
    }

    #[test]
    fn mix_forces_opaque_alpha() {
        assert_eq!(mix(0x0000_0000, 0x0000_0000, 10) & OPAQUE, OPAQUE);
    }

    #[test]
    fn darken_zero_is_identity() {
        // alpha byte preserved as well
        assert_eq!(darken(0x1234_5678, 0), 0x1234_5678);
    }

    #[test]
    fn darken_scales_channels() {
        assert_eq!(darken(0xffff_ffff, 255), 0xff00_0000);
        assert_eq!(darken(0xff80_8080, 128), pack_rgb(63, 63, 63));
    }
}

use crate::color::Rgba;
use std::io::{self, Write};

/// Size in bytes of the channel mask block
pub const CHANNEL_MASKS_SIZE: usize = 12;

/// Per-channel bit masks describing a 32-bit `BI_BITFIELDS` pixel word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMasks {
    /// Red channel mask
    pub red: u32,
    /// Green channel mask
    pub green: u32,
    /// Blue channel mask
    pub blue: u32,
}

/// The only mask layout this crate writes: `0x00RRGGBB`
pub const CHANNEL_MASKS: ChannelMasks = ChannelMasks {
    red: Rgba::R_MASK,
    green: Rgba::G_MASK,
    blue: Rgba::B_MASK,
};

impl ChannelMasks {
    /// Returns the masks as they are laid out on the wire (red, green, blue; little-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CHANNEL_MASKS_SIZE] {
        let mut out = [0; CHANNEL_MASKS_SIZE];
        for (chunk, mask) in out.chunks_exact_mut(4).zip([self.red, self.green, self.blue]) {
            chunk.copy_from_slice(&mask.to_le_bytes());
        }
        out
    }
}

/// Writes the [`CHANNEL_MASKS`] block that follows a header in `BI_BITFIELDS` bitmaps
///
/// # Errors
///
/// Propagates any error of the underlying writer
pub fn write_channel_masks(w: &mut impl Write) -> io::Result<()> {
    w.write_all(&CHANNEL_MASKS.to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_block_is_little_endian_rgb() {
        let mut buf = Vec::new();
        write_channel_masks(&mut buf).unwrap();
        assert_eq!(
            buf,
            [0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn masks_do_not_overlap() {
        let ChannelMasks { red, green, blue } = CHANNEL_MASKS;
        assert_eq!(red & green, 0);
        assert_eq!(green & blue, 0);
        assert_eq!((red | green | blue) & Rgba::A_MASK, 0);
    }
}

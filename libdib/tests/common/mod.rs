#![allow(dead_code)]

use libdib::{NamedColor, RasterBuffer};

pub const DEMO_WIDTH: usize = 12;
pub const DEMO_HEIGHT: usize = 10;

pub const LEFT: NamedColor = NamedColor::Yellow;
pub const RIGHT: NamedColor = NamedColor::Blue;
pub const TOP: NamedColor = NamedColor::Red;
pub const BOTTOM: NamedColor = NamedColor::Green;

/// 12x10 white raster with a colored border on each side
pub fn bordered_raster() -> anyhow::Result<RasterBuffer> {
    let mut raster = RasterBuffer::new(DEMO_WIDTH, DEMO_HEIGHT, NamedColor::White.rgba())?;
    let (x9, y9) = (DEMO_WIDTH - 1, DEMO_HEIGHT - 1);
    for y in 1..y9 {
        raster.set(y, 0, LEFT.rgba())?;
        raster.set(y, x9, RIGHT.rgba())?;
    }
    raster.fill_row(0, TOP.rgba())?;
    raster.fill_row(y9, BOTTOM.rgba())?;
    Ok(raster)
}

/// Header fields read back from an encoded DIB
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedHeader {
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub clr_used: u32,
    pub clr_important: u32,
    /// red, green, blue, alpha masks; only present in V5 headers
    pub masks: Option<[u32; 4]>,
    pub cs_type: Option<u32>,
    pub intent: Option<u32>,
}

fn u16_at(buf: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([buf[offset], buf[offset + 1]])
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().expect("4 bytes"))
}

fn i32_at(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(buf[offset..offset + 4].try_into().expect("4 bytes"))
}

/// Reads the `BITMAPINFOHEADER` fields, and the V5 extras if the header says it has them
pub fn decode_header(buf: &[u8]) -> DecodedHeader {
    let size = u32_at(buf, 0);
    let v5 = size == 124;
    DecodedHeader {
        size,
        width: i32_at(buf, 4),
        height: i32_at(buf, 8),
        planes: u16_at(buf, 12),
        bit_count: u16_at(buf, 14),
        compression: u32_at(buf, 16),
        size_image: u32_at(buf, 20),
        x_pels_per_meter: i32_at(buf, 24),
        y_pels_per_meter: i32_at(buf, 28),
        clr_used: u32_at(buf, 32),
        clr_important: u32_at(buf, 36),
        masks: v5.then(|| [u32_at(buf, 40), u32_at(buf, 44), u32_at(buf, 48), u32_at(buf, 52)]),
        cs_type: v5.then(|| u32_at(buf, 56)),
        intent: v5.then(|| u32_at(buf, 108)),
    }
}

/// Reads a 12-byte channel mask block at `offset`
pub fn decode_masks(buf: &[u8], offset: usize) -> [u32; 3] {
    [
        u32_at(buf, offset),
        u32_at(buf, offset + 4),
        u32_at(buf, offset + 8),
    ]
}

/// Serializes one logical row the way it is kept in memory
pub fn row_bytes(raster: &RasterBuffer, y: usize) -> anyhow::Result<Vec<u8>> {
    Ok(raster
        .scan_line(y)?
        .iter()
        .flat_map(|p| p.to_bytes())
        .collect())
}

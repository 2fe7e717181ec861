//! Pixel mode names derived from the directory layout.
//!
//! Names follow the conventions common to imaging libraries: `1`, `L`, `LA`,
//! `I;16`, `I;16B`, `I;16S`, `I`, `F`, `P`, `RGB`, `RGBA`, `RGBa`, `RGBX`,
//! `CMYK`, `YCbCr`, `LAB`.

use tiff::tags::ByteOrder;

use crate::error::{Result, TiffError};

pub const WHITE_IS_ZERO: i64 = 0;
pub const BLACK_IS_ZERO: i64 = 1;
pub const RGB: i64 = 2;
pub const PALETTE: i64 = 3;
pub const SEPARATED: i64 = 5;
pub const YCBCR: i64 = 6;
pub const CIELAB: i64 = 8;
pub const ICCLAB: i64 = 9;

const FORMAT_UINT: i64 = 1;
const FORMAT_INT: i64 = 2;
const FORMAT_FLOAT: i64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub photometric: i64,
    pub samples_per_pixel: i64,
    pub bits_per_sample: Vec<i64>,
    pub sample_format: i64,
    pub extra_samples: Vec<i64>,
    pub byte_order: ByteOrder,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            photometric: WHITE_IS_ZERO,
            samples_per_pixel: 1,
            bits_per_sample: vec![1],
            sample_format: FORMAT_UINT,
            extra_samples: Vec::new(),
            byte_order: ByteOrder::LittleEndian,
        }
    }
}

impl Layout {
    pub fn mode(&self) -> Result<&'static str> {
        let bits = self.bits_per_sample.first().copied().unwrap_or(1);
        if self.bits_per_sample.iter().any(|b| *b != bits) {
            return Err(self.unsupported());
        }
        let spp = self.samples_per_pixel;
        let mode = match (self.photometric, spp, bits) {
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 1, 1) => "1",
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 1, 2 | 4 | 8) => "L",
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 2, 8) => "LA",
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 1, 16) => match (self.sample_format, self.byte_order) {
                (FORMAT_INT, _) => "I;16S",
                (_, ByteOrder::LittleEndian) => "I;16",
                (_, ByteOrder::BigEndian) => "I;16B",
            },
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 1, 32) => match self.sample_format {
                FORMAT_FLOAT => "F",
                _ => "I",
            },
            (WHITE_IS_ZERO | BLACK_IS_ZERO, 1, 64) if self.sample_format == FORMAT_FLOAT => "F",
            (RGB, 3, 8 | 16) => "RGB",
            (RGB, 4.., 8 | 16) => match self.extra_samples.first() {
                Some(0) => "RGBX",
                Some(1) => "RGBa",
                _ => "RGBA",
            },
            (PALETTE, 1, 1 | 2 | 4 | 8) => "P",
            (SEPARATED, 4.., 8 | 16) => "CMYK",
            (YCBCR, 3, 8) => "YCbCr",
            (CIELAB | ICCLAB, 1, 8) => "L",
            (CIELAB | ICCLAB, 3, 8) => "LAB",
            _ => return Err(self.unsupported()),
        };
        Ok(mode)
    }

    fn unsupported(&self) -> TiffError {
        TiffError::Mode(format!(
            "photometric {} with {} samples of {:?} bits",
            self.photometric, self.samples_per_pixel, self.bits_per_sample
        ))
    }
}

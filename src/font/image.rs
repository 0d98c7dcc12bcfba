//! Font atlas images and pixel format normalization.
//!
//! Style files store the atlas as 2-channel gray+alpha. Callers may hand in
//! an atlas in any of the toolkit's uncompressed pixel formats;
//! [`Image::to_gray_alpha`] converts it before encoding. The conversion is
//! deterministic, so tests can compare a decoded atlas against the
//! normalized input.

use crate::common::error::{Error, Result};
use zerocopy::{F32, FromBytes, LE, U16};

/// Pixel layouts, numbered as in the toolkit's `PixelFormat` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 8 bit gray, no alpha
    Grayscale = 1,
    /// 8 bit gray + 8 bit alpha
    GrayAlpha = 2,
    /// 16 bpp packed, no alpha
    R5G6B5 = 3,
    /// 24 bpp
    R8G8B8 = 4,
    /// 16 bpp packed, 1 bit alpha
    R5G5B5A1 = 5,
    /// 16 bpp packed
    R4G4B4A4 = 6,
    /// 32 bpp
    R8G8B8A8 = 7,
    /// 32 bit float, single channel
    R32 = 8,
    /// 3 x 32 bit float
    R32G32B32 = 9,
    /// 4 x 32 bit float
    R32G32B32A32 = 10,
}

impl PixelFormat {
    /// Map the numeric id stored in a style file.
    ///
    /// Half-float and GPU-compressed formats are not accepted: the atlas of a
    /// style font is always stored uncompressed.
    pub fn from_raw(raw: u32) -> Result<Self> {
        Ok(match raw {
            1 => Self::Grayscale,
            2 => Self::GrayAlpha,
            3 => Self::R5G6B5,
            4 => Self::R8G8B8,
            5 => Self::R5G5B5A1,
            6 => Self::R4G4B4A4,
            7 => Self::R8G8B8A8,
            8 => Self::R32,
            9 => Self::R32G32B32,
            10 => Self::R32G32B32A32,
            other => {
                return Err(Error::Unsupported(format!("pixel format {}", other)));
            },
        })
    }

    #[inline]
    pub const fn as_raw(self) -> u32 {
        self as u32
    }

    /// Size of one pixel in bytes.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::GrayAlpha | Self::R5G6B5 | Self::R5G5B5A1 | Self::R4G4B4A4 => 2,
            Self::R8G8B8 => 3,
            Self::R8G8B8A8 | Self::R32 => 4,
            Self::R32G32B32 => 12,
            Self::R32G32B32A32 => 16,
        }
    }
}

/// An uncompressed bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Tightly packed rows, top to bottom
    pub data: Vec<u8>,
}

impl Image {
    /// Create an image, checking that `data` holds exactly
    /// `width * height` pixels of `format`.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let image = Self {
            width,
            height,
            format,
            data,
        };
        image.validate()?;
        Ok(image)
    }

    /// Expected byte length of the pixel data, `None` if it does not fit in
    /// a `usize`.
    pub fn byte_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.format.bytes_per_pixel())
    }

    fn validate(&self) -> Result<()> {
        let expected = self.byte_len().ok_or_else(|| {
            Error::Format(format!(
                "image dimensions overflow: {}x{} {:?}",
                self.width, self.height, self.format
            ))
        })?;
        if self.data.len() != expected {
            return Err(Error::Format(format!(
                "{}x{} {:?} image needs {} bytes, got {}",
                self.width,
                self.height,
                self.format,
                expected,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Convert to 2-channel gray+alpha.
    ///
    /// Color is reduced with luma weights (0.299, 0.587, 0.114), truncating
    /// to 8 bits; formats without alpha become fully opaque. Gray+alpha
    /// input is returned unchanged.
    pub fn to_gray_alpha(&self) -> Result<Image> {
        self.validate()?;
        if self.format == PixelFormat::GrayAlpha {
            return Ok(self.clone());
        }

        let bpp = self.format.bytes_per_pixel();
        let mut out = Vec::with_capacity(self.data.len() / bpp * 2);
        for pixel in self.data.chunks_exact(bpp) {
            let (gray, alpha) = match self.format {
                PixelFormat::Grayscale => (pixel[0], 255),
                PixelFormat::GrayAlpha => (pixel[0], pixel[1]),
                _ => {
                    let [r, g, b, a] = rgba8(self.format, pixel);
                    (luma(r, g, b), a)
                },
            };
            out.push(gray);
            out.push(alpha);
        }

        Ok(Image {
            width: self.width,
            height: self.height,
            format: PixelFormat::GrayAlpha,
            data: out,
        })
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114) as u8
}

#[inline]
fn unit_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Expand a `bits`-wide channel to 8 bits.
#[inline]
fn expand(value: u16, bits: u32) -> u8 {
    let max = (1u32 << bits) - 1;
    ((value as u32 * 255) / max) as u8
}

/// Decode one color pixel to RGBA8. Gray formats are handled by the caller.
fn rgba8(format: PixelFormat, pixel: &[u8]) -> [u8; 4] {
    let packed = || U16::<LE>::read_from_bytes(&pixel[..2]).map(|v| v.get()).unwrap_or(0);
    let float = |i: usize| {
        F32::<LE>::read_from_bytes(&pixel[i * 4..i * 4 + 4])
            .map(|v| v.get())
            .unwrap_or(0.0)
    };

    match format {
        PixelFormat::R5G6B5 => {
            let p = packed();
            [expand(p >> 11, 5), expand((p >> 5) & 0x3F, 6), expand(p & 0x1F, 5), 255]
        },
        PixelFormat::R5G5B5A1 => {
            let p = packed();
            [
                expand(p >> 11, 5),
                expand((p >> 6) & 0x1F, 5),
                expand((p >> 1) & 0x1F, 5),
                if p & 1 == 1 { 255 } else { 0 },
            ]
        },
        PixelFormat::R4G4B4A4 => {
            let p = packed();
            [
                expand(p >> 12, 4),
                expand((p >> 8) & 0xF, 4),
                expand((p >> 4) & 0xF, 4),
                expand(p & 0xF, 4),
            ]
        },
        PixelFormat::R8G8B8 => [pixel[0], pixel[1], pixel[2], 255],
        PixelFormat::R8G8B8A8 => [pixel[0], pixel[1], pixel[2], pixel[3]],
        PixelFormat::R32 => {
            let v = unit_to_u8(float(0));
            [v, v, v, 255]
        },
        PixelFormat::R32G32B32 => [
            unit_to_u8(float(0)),
            unit_to_u8(float(1)),
            unit_to_u8(float(2)),
            255,
        ],
        PixelFormat::R32G32B32A32 => [
            unit_to_u8(float(0)),
            unit_to_u8(float(1)),
            unit_to_u8(float(2)),
            unit_to_u8(float(3)),
        ],
        PixelFormat::Grayscale | PixelFormat::GrayAlpha => [pixel[0], pixel[0], pixel[0], 255],
    }
}

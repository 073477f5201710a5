use crate::color::{to_cmyk, Cmyk, Rgb};
use crate::error::{Error, Result};
use image::{DynamicImage, GenericImageView, RgbImage};
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::ops::Add;

/// Mean toner coverage per channel, 0.0 meaning none and 1.0 full coverage on
/// every pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub cyan: f64,
    pub magenta: f64,
    pub yellow: f64,
    pub black: f64,
}

impl Usage {
    pub fn fractions(&self) -> [f64; 4] {
        [self.cyan, self.magenta, self.yellow, self.black]
    }
}

/// Integer percentage sums over a set of pixels. Partial sums of disjoint
/// pixel sets combine with `+`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelSums {
    pub c: u64,
    pub m: u64,
    pub y: u64,
    pub k: u64,
    pub pixels: u64,
}

impl ChannelSums {
    fn push(self, cmyk: Cmyk) -> Self {
        ChannelSums {
            c: self.c + cmyk.c as u64,
            m: self.m + cmyk.m as u64,
            y: self.y + cmyk.y as u64,
            k: self.k + cmyk.k as u64,
            pixels: self.pixels + 1,
        }
    }

    pub fn usage(&self) -> Result<Usage> {
        if self.pixels == 0 {
            return Err(Error::EmptyImage);
        }

        let n = self.pixels as f64;
        let fraction = |sum: u64| sum as f64 / n / 100.0;

        Ok(Usage {
            cyan: fraction(self.c),
            magenta: fraction(self.m),
            yellow: fraction(self.y),
            black: fraction(self.k),
        })
    }
}

impl Add for ChannelSums {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        ChannelSums {
            c: self.c + other.c,
            m: self.m + other.m,
            y: self.y + other.y,
            k: self.k + other.k,
            pixels: self.pixels + other.pixels,
        }
    }
}

fn sum_row(row: &[u8]) -> ChannelSums {
    row.chunks_exact(3).fold(ChannelSums::default(), |sums, px| {
        sums.push(to_cmyk(px[0], px[1], px[2]))
    })
}

#[cfg(feature = "parallel")]
fn sum_rows(data: &[u8], stride: usize) -> ChannelSums {
    data.par_chunks_exact(stride)
        .map(sum_row)
        .reduce(ChannelSums::default, Add::add)
}

#[cfg(not(feature = "parallel"))]
fn sum_rows(data: &[u8], stride: usize) -> ChannelSums {
    data.chunks_exact(stride)
        .map(sum_row)
        .fold(ChannelSums::default(), Add::add)
}

/// Sum the CMYK percentages of every pixel of an 8-bit RGB image.
pub fn channel_sums(img: &RgbImage) -> Result<ChannelSums> {
    let (width, height) = img.dimensions();

    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let sums = sum_rows(img.as_raw(), width as usize * 3);
    debug!("Channel sums for {}x{} pixels: {:?}", width, height, sums);

    Ok(sums)
}

pub fn rgb_usage(img: &RgbImage) -> Result<Usage> {
    channel_sums(img)?.usage()
}

/// Toner usage of an image in any colour mode. Alpha is dropped, grayscale is
/// expanded to equal RGB channels and deeper samples are narrowed to 8 bits.
pub fn toner_usage(img: &DynamicImage) -> Result<Usage> {
    let (width, height) = img.dimensions();

    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    match img {
        DynamicImage::ImageRgb8(rgb) => rgb_usage(rgb),
        other => {
            debug!("Converting {:?} image to RGB", other.color());
            rgb_usage(&other.to_rgb8())
        }
    }
}

/// Toner usage of an interleaved RGB sample buffer that did not come from a
/// decoder, so every sample is range checked.
pub fn raw_usage(width: u32, height: u32, samples: &[i32]) -> Result<Usage> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(Error::DimensionMismatch {
            expected: usize::MAX,
            actual: samples.len(),
        })?;

    if samples.len() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: samples.len(),
        });
    }

    let mut data = Vec::with_capacity(expected);

    for px in samples.chunks_exact(3) {
        let Rgb(r, g, b) = Rgb::try_from([px[0], px[1], px[2]])?;
        data.extend_from_slice(&[r, g, b]);
    }

    let img = RgbImage::from_raw(width, height, data).ok_or(Error::DimensionMismatch {
        expected,
        actual: samples.len(),
    })?;

    rgb_usage(&img)
}

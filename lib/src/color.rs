use crate::error::{Error, Result};
use serde::Serialize;
use std::convert::TryFrom;

/// Toner intensities of a single pixel in percent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cmyk {
    pub c: u8,
    pub m: u8,
    pub y: u8,
    pub k: u8,
}

impl Cmyk {
    pub const BLACK: Cmyk = Cmyk::new(0, 0, 0, 100);

    pub const fn new(c: u8, m: u8, y: u8, k: u8) -> Self {
        Cmyk { c, m, y, k }
    }

    /// Channels in cyan, magenta, yellow, black order.
    pub fn channels(&self) -> [u8; 4] {
        [self.c, self.m, self.y, self.k]
    }
}

/// A validated 8-bit RGB triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

fn channel(value: i32) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::InvalidChannelValue { value })
}

impl TryFrom<[i32; 3]> for Rgb {
    type Error = Error;

    fn try_from(rgb: [i32; 3]) -> Result<Self> {
        Ok(Rgb(channel(rgb[0])?, channel(rgb[1])?, channel(rgb[2])?))
    }
}

// Ties go to the even neighbour, so 12.5 becomes 12 and 13.5 becomes 14.
fn percent(value: f64) -> u8 {
    (value * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

pub fn to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    if r == 0 && g == 0 && b == 0 {
        return Cmyk::BLACK;
    }

    let max = r.max(g.max(b)) as f64 / 255.0;
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let black = 1.0 - max;
    let white = 1.0 - black;

    if white == 0.0 {
        return Cmyk::BLACK;
    }

    Cmyk::new(
        percent((1.0 - r - black) / white),
        percent((1.0 - g - black) / white),
        percent((1.0 - b - black) / white),
        percent(black),
    )
}

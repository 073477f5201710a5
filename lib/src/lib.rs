pub mod color;
pub mod cost;
pub mod error;
pub mod usage;

pub use cost::{Costs, Estimate};
pub use error::{Error, Result};
pub use usage::Usage;

use image::GenericImageView;
use log::{debug, info};
use std::fs;
use std::path;

/// Largest encoded image accepted by [`load_image`] and [`decode_image`].
pub const MAX_IMAGE_BYTES: u64 = 32 * 1024 * 1024;

fn check_size(size: u64) -> Result<()> {
    if size > MAX_IMAGE_BYTES {
        return Err(Error::ImageTooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }

    Ok(())
}

/// Decode an encoded raster image, guessing the format from its contents.
pub fn decode_image(data: &[u8]) -> Result<image::DynamicImage> {
    check_size(data.len() as u64)?;

    let img = image::load_from_memory(data)?;
    let (width, height) = img.dimensions();
    debug!("Decoded {}x{} {:?} image", width, height, img.color());

    Ok(img)
}

pub fn load_image(filename: &path::Path) -> Result<image::DynamicImage> {
    check_size(fs::metadata(filename)?.len())?;
    decode_image(&fs::read(filename)?)
}

/// Estimate what printing `img` costs given the price of full coverage per
/// toner channel.
pub fn compute_cost(img: &image::DynamicImage, costs: &Costs) -> Result<Estimate> {
    // Fail before touching pixels; `cost::estimate` validates again on its own.
    costs.validate()?;

    let usage = usage::toner_usage(img)?;
    let estimate = cost::estimate(usage, costs)?;
    info!(
        "Usage C={:.4} M={:.4} Y={:.4} K={:.4}, total cost {}",
        usage.cyan, usage.magenta, usage.yellow, usage.black, estimate.total_cost
    );

    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    #[test]
    fn red_and_black_scenario() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 0]));

        let estimate = compute_cost(
            &DynamicImage::ImageRgb8(img),
            &Costs::new(1.0, 2.0, 3.0, 4.0),
        )
        .unwrap();

        assert_eq!(estimate.usage.fractions(), [0.0, 0.5, 0.5, 0.5]);
        assert_eq!(estimate.total_cost, 4.5);
    }

    #[test]
    fn invalid_costs_fail_before_empty_image() {
        let result = compute_cost(
            &DynamicImage::new_rgb8(0, 0),
            &Costs::new(f64::INFINITY, 0.0, 0.0, 0.0),
        );

        assert!(matches!(result, Err(Error::InvalidCostValue { .. })));
    }

    #[test]
    fn oversized_input_is_refused() {
        assert!(check_size(MAX_IMAGE_BYTES).is_ok());
        assert!(matches!(
            check_size(MAX_IMAGE_BYTES + 1),
            Err(Error::ImageTooLarge { .. })
        ));
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(Error::Decode(_))
        ));
    }
}

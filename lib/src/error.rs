/// Everything that can go wrong while estimating the toner cost of an image.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("image has no pixels")]
    EmptyImage,

    #[error("channel value {value} is outside 0..=255")]
    InvalidChannelValue { value: i32 },

    #[error("expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{channel} cost {value} is not a finite number")]
    InvalidCostValue { channel: &'static str, value: f64 },

    #[error("image is {size} bytes, limit is {limit} bytes")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

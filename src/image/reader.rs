use super::{Dimension, ImageShape, PixelBuffer};
use crate::Result;

pub mod container;
mod padder;
pub mod raw;

/// A displayable image together with the shape it was decoded with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub pixels: PixelBuffer,
    pub shape: ImageShape,
}

pub trait ImageReader {
    /// Decode for display. `requested` carries the user supplied shape; readers
    /// that know their own size report it through [`Decoded::shape`].
    fn read_image(&self, requested: &ImageShape, free: Dimension) -> Result<Decoded>;
}

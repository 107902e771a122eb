//! 8-bit RGBA pixel buffers.

use crate::error::{CoreError, CoreResult};

/// Interleaved RGBA8 image buffer.
///
/// Pixel data is stored row-major as `[R, G, B, A, R, G, B, A, ...]`.
/// A source buffer is immutable once loaded; filtered buffers are
/// produced fresh by [`crate::filter::remap`] on every recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded RGBA bytes, validating dimensions and length.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyBuffer { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CoreError::PixelDataMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_validates_length() {
        let ok = PixelBuffer::from_rgba(2, 2, vec![0; 16]);
        assert!(ok.is_ok());
        assert_eq!(ok.unwrap().pixel_count(), 4);

        assert_eq!(
            PixelBuffer::from_rgba(2, 2, vec![0; 10]).unwrap_err(),
            CoreError::PixelDataMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 10,
            }
        );
    }

    #[test]
    fn from_rgba_rejects_zero_dimensions() {
        assert_eq!(
            PixelBuffer::from_rgba(0, 4, Vec::new()).unwrap_err(),
            CoreError::EmptyBuffer {
                width: 0,
                height: 4
            }
        );
        assert!(PixelBuffer::from_rgba(4, 0, Vec::new()).is_err());
    }
}

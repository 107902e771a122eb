//! LUT-based per-channel pixel remapping.

use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::lut::Lut;
use crate::pixel_buf::PixelBuffer;

/// Remap every pixel of `source` through the per-channel tables.
///
/// Red, green and blue pass through their channel's table; alpha is
/// carried over untouched. The source is left intact so later curve
/// edits re-filter from the same original.
pub fn remap(
    source: &PixelBuffer,
    lut_r: &Lut,
    lut_g: &Lut,
    lut_b: &Lut,
) -> CoreResult<PixelBuffer> {
    if source.width == 0 || source.height == 0 {
        return Err(CoreError::EmptyBuffer {
            width: source.width,
            height: source.height,
        });
    }

    let mut data = Vec::with_capacity(source.data.len());
    for pixel in source.data.chunks_exact(4) {
        data.push(lut_r.map(pixel[0]));
        data.push(lut_g.map(pixel[1]));
        data.push(lut_b.map(pixel[2]));
        data.push(pixel[3]);
    }

    debug!(
        width = source.width,
        height = source.height,
        "remapped frame"
    );
    PixelBuffer::from_rgba(source.width, source.height, data)
}

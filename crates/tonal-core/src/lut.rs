//! 256-entry lookup tables derived from a curve snapshot.

use std::fmt;

use crate::curve::{CurveModel, quantize};
use crate::error::{CoreError, CoreResult};

/// Number of entries in a channel lookup table, one per 8-bit level.
pub const LUT_SIZE: usize = 256;

/// Precomputed map from input level to output level for one channel.
///
/// Derived data: always rebuilt wholesale from a [`CurveModel`]
/// snapshot, never mutated in place.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Lut([u8; LUT_SIZE]);

impl Lut {
    /// The pass-through table: `lut[v] == v`.
    pub fn identity() -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (v, entry) in table.iter_mut().enumerate() {
            *entry = v as u8;
        }
        Self(table)
    }

    /// Sample `model` at every integer level, rounded and clamped.
    ///
    /// Costs O(256 * n) curve evaluations, cheap enough to rebuild all
    /// three channels on every recompute tick.
    pub fn from_curve(model: &CurveModel) -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (v, entry) in table.iter_mut().enumerate() {
            *entry = quantize(model.evaluate(v as f64));
        }
        Self(table)
    }

    /// Output level for input `level`.
    #[inline]
    pub fn map(&self, level: u8) -> u8 {
        self.0[level as usize]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Lut {
    type Error = CoreError;

    fn try_from(values: &[u8]) -> CoreResult<Self> {
        let table: [u8; LUT_SIZE] = values
            .try_into()
            .map_err(|_| CoreError::InvalidLutSize(values.len()))?;
        Ok(Self(table))
    }
}

impl fmt::Debug for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lut([{}, ..., {}])", self.0[0], self.0[LUT_SIZE - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_every_level_to_itself() {
        let lut = Lut::identity();
        assert_eq!(lut.as_slice().len(), LUT_SIZE);
        for v in 0..=255u8 {
            assert_eq!(lut.map(v), v);
        }
    }

    #[test]
    fn identity_curve_builds_identity_table() {
        let model = CurveModel::new(6).unwrap();
        let lut = Lut::from_curve(&model);
        assert_eq!(lut, Lut::identity());
    }

    #[test]
    fn edited_curve_lands_in_table() {
        let mut model = CurveModel::new(4).unwrap();
        model.set_y(1, 200).unwrap();
        let lut = Lut::from_curve(&model);
        assert_eq!(lut.map(85), 200);
        assert_eq!(lut.map(0), 0);
        assert_eq!(lut.map(255), 255);
    }

    #[test]
    fn overshooting_curve_stays_in_range() {
        // A zigzag drives the interpolant far outside [0, 255] between
        // points; the table entries are quantized samples, so every one
        // of them must match round-then-clamp of the raw evaluation.
        let mut model = CurveModel::new(8).unwrap();
        for i in 0..8 {
            model.set_y(i, if i % 2 == 0 { 0 } else { 255 }).unwrap();
        }
        let lut = Lut::from_curve(&model);
        for v in 0..=255u16 {
            assert_eq!(lut.map(v as u8), quantize(model.evaluate(f64::from(v))));
        }
    }

    #[test]
    fn flat_curves() {
        let mut model = CurveModel::new(4).unwrap();
        for i in 0..4 {
            model.set_y(i, 0).unwrap();
        }
        let lut = Lut::from_curve(&model);
        assert!(lut.as_slice().iter().all(|&v| v == 0));

        for i in 0..4 {
            model.set_y(i, 255).unwrap();
        }
        let lut = Lut::from_curve(&model);
        assert!(lut.as_slice().iter().all(|&v| v == 255));
    }

    #[test]
    fn try_from_checks_length() {
        let short = vec![0u8; 255];
        assert_eq!(
            Lut::try_from(short.as_slice()).unwrap_err(),
            CoreError::InvalidLutSize(255)
        );

        let long = vec![0u8; 257];
        assert!(Lut::try_from(long.as_slice()).is_err());

        let exact: Vec<u8> = (0u8..=255).collect();
        let lut = Lut::try_from(exact.as_slice()).unwrap();
        assert_eq!(lut, Lut::identity());
    }
}

//! Parametric tone curve driven by a small set of fixed-x control points.

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Minimum number of control points a curve can be built with.
pub const MIN_POINTS: usize = 4;
/// Maximum number of control points a curve can be built with.
pub const MAX_POINTS: usize = 8;

type Listener = Box<dyn Fn()>;

/// A tone-reproduction curve for one color channel.
///
/// The curve is defined by `n` control points whose x positions are
/// fixed at construction (evenly spaced over `[0, 255]`, strictly
/// increasing) and whose y values the user edits. Evaluation is the
/// unique degree-(n-1) polynomial through all points in Lagrange form,
/// computed directly from the basis formula so a mutated y value is
/// reflected immediately without any cached coefficients.
///
/// The model owns its change notifications: every successful mutation
/// invokes each subscribed listener. When consumers react is up to
/// them (see [`crate::throttle::RecomputeGate`]).
pub struct CurveModel {
    xs: Vec<u8>,
    ys: Vec<u8>,
    listeners: Vec<Listener>,
}

impl CurveModel {
    /// Build an identity curve with `points` control points.
    pub fn new(points: usize) -> CoreResult<Self> {
        if !(MIN_POINTS..=MAX_POINTS).contains(&points) {
            return Err(CoreError::InvalidPointCount(points));
        }
        let xs: Vec<u8> = (0..points)
            .map(|i| (i as f64 * 255.0 / (points - 1) as f64).round() as u8)
            .collect();
        let ys = xs.clone();
        Ok(Self {
            xs,
            ys,
            listeners: Vec::new(),
        })
    }

    pub fn point_count(&self) -> usize {
        self.xs.len()
    }

    /// Fixed x position of control point `index`.
    pub fn x(&self, index: usize) -> CoreResult<u8> {
        self.check_index(index)?;
        Ok(self.xs[index])
    }

    /// Current y value of control point `index`.
    pub fn y(&self, index: usize) -> CoreResult<u8> {
        self.check_index(index)?;
        Ok(self.ys[index])
    }

    /// Iterate `(x, y)` pairs in index order.
    pub fn points(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.xs.iter().zip(self.ys.iter()).map(|(&x, &y)| (x, y))
    }

    /// Set the y value of control point `index`, clamped to `[0, 255]`.
    ///
    /// Edits that make the curve non-monotonic are accepted; the curve
    /// may overshoot between points and consumers quantize as needed.
    pub fn set_y(&mut self, index: usize, value: i32) -> CoreResult<()> {
        self.check_index(index)?;
        self.ys[index] = value.clamp(0, 255) as u8;
        self.notify();
        Ok(())
    }

    /// Restore the identity mapping: `y[i] = x[i]` for every point.
    pub fn reset_to_identity(&mut self) {
        self.ys.copy_from_slice(&self.xs);
        self.notify();
    }

    /// Register a listener invoked after every successful mutation.
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Evaluate the interpolated curve at `x`.
    ///
    /// `P(x) = sum_i y[i] * prod_{j != i} (x - x[j]) / (x[i] - x[j])`
    ///
    /// The same formula serves integer sample points and continuous
    /// inputs. The result is unclamped and may leave `[0, 255]` between
    /// control points; [`quantize`] turns it into a pixel-safe level.
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.xs.len() {
            let xi = f64::from(self.xs[i]);
            let mut basis = 1.0;
            for j in 0..self.xs.len() {
                if j == i {
                    continue;
                }
                let xj = f64::from(self.xs[j]);
                basis *= (x - xj) / (xi - xj);
            }
            sum += f64::from(self.ys[i]) * basis;
        }
        sum
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }

    fn check_index(&self, index: usize) -> CoreResult<()> {
        if index >= self.xs.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                count: self.xs.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for CurveModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveModel")
            .field("xs", &self.xs)
            .field("ys", &self.ys)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Round-then-clamp a raw curve sample to a pixel-safe level.
pub fn quantize(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

//! Utility functions and types used accross the library
use crate::Scalar;

/// Default distance between two consecutive values of the curve parameter
pub const DEFAULT_STEP: Scalar = 0.001;

/// Iterator over curve parameter values `t` in `0.0..=1.0`
///
/// Values are derived from the sample index instead of accumulating `step`, so
/// both `0.0` and `1.0` are always produced exactly. With the default step this
/// yields 1001 values.
#[derive(Debug, Clone)]
pub struct ParamSweep {
    index: usize,
    count: usize,
}

impl ParamSweep {
    /// Create sweep with the given step, `step` is expected to be in `(0.0, 1.0]`
    pub fn new(step: Scalar) -> Self {
        let intervals = (1.0 / step).round().max(1.0) as usize;
        Self {
            index: 0,
            count: intervals,
        }
    }

    /// Number of intervals, number of produced values is one more
    pub fn intervals(&self) -> usize {
        self.count
    }
}

impl Default for ParamSweep {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

impl Iterator for ParamSweep {
    type Item = Scalar;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index > self.count {
            return None;
        }
        let t = self.index as Scalar / self.count as Scalar;
        self.index += 1;
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_add(1).saturating_sub(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for ParamSweep {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(($v0 - $v1).abs() < $crate::EPSILON, "{} != {}", $v0, $v1);
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!(($v0 - $v1).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }

    #[test]
    fn test_param_sweep() {
        let ts: Vec<_> = ParamSweep::default().collect();
        assert_eq!(ts.len(), 1001);
        assert_eq!(ts[0], 0.0);
        assert_eq!(ts[1000], 1.0);
        assert_approx_eq!(ts[500], 0.5);
        assert!(ts.windows(2).all(|w| w[0] < w[1]));

        let ts: Vec<_> = ParamSweep::new(0.25).collect();
        assert_eq!(ts, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let sweep = ParamSweep::new(1.0);
        assert_eq!(sweep.len(), 2);
    }
}

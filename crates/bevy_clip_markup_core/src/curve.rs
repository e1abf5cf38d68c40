use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

/// A single key in a [`FloatCurve`]
#[derive(Debug, Reflect, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-constant float curve keyed by time
///
/// Keys are kept sorted by time. Sampling uses step semantics: the value of
/// the latest key at or before the queried time.
#[derive(Debug, Reflect, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatCurve {
    pub keys: Vec<CurveKey>,
}

impl FloatCurve {
    pub fn from_keys(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut curve = Self::default();
        for (time, value) in keys {
            curve.add_key(time, value);
        }
        curve
    }

    /// Adds a key to the curve
    ///
    /// This operation is O(n) on the number of existing keys in the curve.
    pub fn add_key(&mut self, time: f32, value: f32) {
        // The keys are sorted by time
        for i in 0..self.keys.len() {
            if self.keys[i].time > time {
                self.keys.insert(i, CurveKey { time, value });
                return;
            }
        }
        self.keys.push(CurveKey { time, value })
    }

    /// Value of the curve at the given time
    ///
    /// Times before the first key take the first key's value. An empty curve
    /// samples to zero.
    pub fn sample(&self, time: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        let mut value = first.value;
        for key in &self.keys {
            if key.time > time {
                break;
            }
            value = key.value;
        }
        value
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurveKey> {
        self.keys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_key_keeps_keys_sorted() {
        let mut curve = FloatCurve::default();
        curve.add_key(0.5, 1.0);
        curve.add_key(0.1, -1.0);
        curve.add_key(0.3, 2.0);

        let times: Vec<f32> = curve.iter().map(|key| key.time).collect();
        assert_eq!(times, vec![0.1, 0.3, 0.5]);
    }

    #[test]
    fn sample_is_piecewise_constant() {
        let curve = FloatCurve::from_keys([(0.0, -1.0), (0.5, 1.0)]);

        assert_eq!(curve.sample(0.0), -1.0);
        assert_eq!(curve.sample(0.25), -1.0);
        assert_eq!(curve.sample(0.5), 1.0);
        assert_eq!(curve.sample(2.0), 1.0);
    }

    #[test]
    fn sample_before_first_key_returns_first_value() {
        let curve = FloatCurve::from_keys([(1.0, 3.0)]);
        assert_eq!(curve.sample(0.0), 3.0);
    }

    #[test]
    fn sample_empty_curve_returns_zero() {
        let curve = FloatCurve::default();
        assert_eq!(curve.sample(0.7), 0.0);
    }
}

//! Simulation cell and particle types.

use crate::error::ConfigError;

/// Axis names in `x, y, z` order, used in error messages.
pub const AXIS_NAMES: [&str; 3] = ["x", "y", "z"];

/// An axis-aligned orthorhombic simulation cell.
///
/// Described by its lower corner and edge lengths. Every length is finite
/// and strictly positive; this is checked once in [`SpatialBox::new`] and
/// the box is immutable afterwards.
///
/// # Examples
///
/// ```
/// use memkmc_core::SpatialBox;
///
/// let b = SpatialBox::from_bounds([-4.0, 0.0, 0.0], [4.0, 8.0, 8.0]).unwrap();
/// assert_eq!(b.length(), [8.0, 8.0, 8.0]);
/// assert_eq!(b.hi(), [4.0, 8.0, 8.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialBox {
    origin: [f64; 3],
    length: [f64; 3],
}

impl SpatialBox {
    /// Create a box from its lower corner and edge lengths.
    pub fn new(origin: [f64; 3], length: [f64; 3]) -> Result<Self, ConfigError> {
        for axis in 0..3 {
            if !origin[axis].is_finite() {
                return Err(ConfigError::InvalidBoxOrigin {
                    axis: AXIS_NAMES[axis],
                    value: origin[axis],
                });
            }
            if !length[axis].is_finite() || length[axis] <= 0.0 {
                return Err(ConfigError::InvalidBoxLength {
                    axis: AXIS_NAMES[axis],
                    value: length[axis],
                });
            }
        }
        Ok(Self { origin, length })
    }

    /// Create a box from `lo`/`hi` bounds as found in structure files.
    pub fn from_bounds(lo: [f64; 3], hi: [f64; 3]) -> Result<Self, ConfigError> {
        Self::new(lo, [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]])
    }

    /// Lower corner.
    pub fn origin(&self) -> [f64; 3] {
        self.origin
    }

    /// Edge lengths.
    pub fn length(&self) -> [f64; 3] {
        self.length
    }

    /// Upper corner (`origin + length`).
    pub fn hi(&self) -> [f64; 3] {
        [
            self.origin[0] + self.length[0],
            self.origin[1] + self.length[1],
            self.origin[2] + self.length[2],
        ]
    }

    /// Cell volume.
    pub fn volume(&self) -> f64 {
        self.length[0] * self.length[1] * self.length[2]
    }
}

/// A single atom: its integer type and Cartesian position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Type ID as written by the structure file.
    pub type_id: i32,
    /// Position in the same units as the box.
    pub position: [f64; 3],
}

impl Particle {
    /// Convenience constructor.
    pub fn new(type_id: i32, position: [f64; 3]) -> Self {
        Self { type_id, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_length() {
        let err = SpatialBox::new([0.0; 3], [1.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBoxLength {
                axis: "y",
                value: 0.0
            }
        );
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(matches!(
            SpatialBox::from_bounds([0.0, 0.0, 5.0], [1.0, 1.0, 2.0]),
            Err(ConfigError::InvalidBoxLength { axis: "z", .. })
        ));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(SpatialBox::new([f64::NAN, 0.0, 0.0], [1.0; 3]).is_err());
        assert!(SpatialBox::new([0.0; 3], [f64::INFINITY, 1.0, 1.0]).is_err());
    }

    #[test]
    fn volume_and_bounds() {
        let b = SpatialBox::new([1.0, 2.0, 3.0], [2.0, 3.0, 4.0]).unwrap();
        assert_eq!(b.volume(), 24.0);
        assert_eq!(b.hi(), [3.0, 5.0, 7.0]);
        assert_eq!(b.origin(), [1.0, 2.0, 3.0]);
    }
}

//! 3D point and point cloud types.

/// A 3D point in sensor coordinates.
///
/// Values are carried through recording and replay untouched, including
/// NaN and infinities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
    /// Z coordinate
    pub z: f32,
}

impl Point3D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Raw IEEE-754 bit patterns of (x, y, z).
    #[inline]
    pub fn to_bits(&self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }

    /// Rebuild a point from raw bit patterns.
    #[inline]
    pub fn from_bits(bits: [u32; 3]) -> Self {
        Self {
            x: f32::from_bits(bits[0]),
            y: f32::from_bits(bits[1]),
            z: f32::from_bits(bits[2]),
        }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Point3D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance from the sensor origin.
    #[inline]
    pub fn norm(&self) -> f32 {
        self.distance_squared(&Point3D::default()).sqrt()
    }
}

impl From<[f32; 3]> for Point3D {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f32, f32, f32)> for Point3D {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

/// An ordered point cloud as captured.
pub type PointCloud = Vec<Point3D>;

//! 3D vector math for node positions, velocities and forces

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A 3D vector (position, velocity or force)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// The origin / zero vector
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Create a new vector
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Squared length (avoids sqrt)
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Length (magnitude) of this vector
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance to another point
    pub fn distance(&self, other: Vec3) -> f32 {
        (other - *self).length()
    }

    /// Component-wise clamp into `[min, max]`
    pub fn clamp(&self, min: Vec3, max: Vec3) -> Vec3 {
        Vec3::new(
            self.x.clamp(min.x, max.x),
            self.y.clamp(min.y, max.y),
            self.z.clamp(min.z, max.z),
        )
    }

    /// Replace NaN components with zero; infinities are left for a clamp
    pub fn nan_to_zero(self) -> Vec3 {
        let fix = |c: f32| if c.is_nan() { 0.0 } else { c };
        Vec3::new(fix(self.x), fix(self.y), fix(self.z))
    }

    /// True when every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an array (GPU buffer layout)
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_of_pythagorean_triple() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.length_squared(), 49.0);
        assert_eq!(v.length(), 7.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        let b = Vec3::new(4.0, 5.0, 1.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn clamp_limits_each_axis() {
        let v = Vec3::new(-20.0, 5.0, 99.0);
        let clamped = v.clamp(Vec3::splat(-10.0), Vec3::splat(10.0));
        assert_eq!(clamped, Vec3::new(-10.0, 5.0, 10.0));
    }

    #[test]
    fn arithmetic_operators() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v += Vec3::splat(1.0);
        assert_eq!(v, Vec3::new(2.0, 3.0, 4.0));
        v -= Vec3::new(2.0, 0.0, 0.0);
        v *= 2.0;
        assert_eq!(v, Vec3::new(0.0, 6.0, 8.0));
        assert_eq!(v / 2.0, Vec3::new(0.0, 3.0, 4.0));
        assert_eq!(-v, Vec3::new(0.0, -6.0, -8.0));
    }

    #[test]
    fn nan_components_become_zero() {
        let v = Vec3::new(f32::NAN, f32::INFINITY, -2.0).nan_to_zero();
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, f32::INFINITY);
        assert_eq!(v.z, -2.0);
        assert_eq!(v.clamp(Vec3::splat(-1.0), Vec3::splat(1.0)), Vec3::new(0.0, 1.0, -1.0));
    }

    #[test]
    fn non_finite_detected() {
        assert!(Vec3::ZERO.is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, f32::INFINITY, 0.0).is_finite());
    }
}

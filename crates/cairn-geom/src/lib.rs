//! Integer block-space vectors shared by the world crates.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Absolute block coordinate. `z` is the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };
    pub const UP: IVec3 = IVec3 { x: 0, y: 0, z: 1 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Floor division on every axis.
    #[inline]
    pub fn div_euclid(self, d: i32) -> IVec3 {
        IVec3::new(self.x.div_euclid(d), self.y.div_euclid(d), self.z.div_euclid(d))
    }

    /// Non-negative remainder on every axis.
    #[inline]
    pub fn rem_euclid(self, d: i32) -> IVec3 {
        IVec3::new(self.x.rem_euclid(d), self.y.rem_euclid(d), self.z.rem_euclid(d))
    }

    #[inline]
    pub fn dot(self, rhs: IVec3) -> i64 {
        i64::from(self.x) * i64::from(rhs.x)
            + i64::from(self.y) * i64::from(rhs.y)
            + i64::from(self.z) * i64::from(rhs.z)
    }

    #[inline]
    pub fn length_sq(self) -> i64 {
        self.dot(self)
    }

    #[inline]
    /// Squared distance, saturating at `i64::MAX` for points near opposite
    /// corners of the coordinate space.
    pub fn distance_sq(self, other: IVec3) -> i64 {
        let d = |a: i32, b: i32| {
            let v = i128::from(a) - i128::from(b);
            v * v
        };
        let sum = d(self.x, other.x) + d(self.y, other.y) + d(self.z, other.z);
        i64::try_from(sum).unwrap_or(i64::MAX)
    }
}

impl Add for IVec3 {
    type Output = IVec3;
    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for IVec3 {
    #[inline]
    fn add_assign(&mut self, rhs: IVec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for IVec3 {
    type Output = IVec3;
    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for IVec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: IVec3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl Mul<i32> for IVec3 {
    type Output = IVec3;
    #[inline]
    fn mul(self, rhs: i32) -> IVec3 {
        IVec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for IVec3 {
    type Output = IVec3;
    #[inline]
    fn neg(self) -> IVec3 {
        IVec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<IVec3> for (i32, i32, i32) {
    fn from(value: IVec3) -> Self {
        (value.x, value.y, value.z)
    }
}

impl From<[i32; 3]> for IVec3 {
    fn from(value: [i32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

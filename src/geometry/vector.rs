//! Minimal `[f64; 3]` arithmetic used by the geometric kernels.

pub type Vec3 = [f64; 3];

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm_sq(a: Vec3) -> f64 {
    dot(a, a)
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    norm_sq(a).sqrt()
}

/// `a · (b × c)`.
#[inline]
pub fn triple(a: Vec3, b: Vec3, c: Vec3) -> f64 {
    dot(a, cross(b, c))
}

#[inline]
pub fn is_finite(a: Vec3) -> bool {
    a.iter().all(|x| x.is_finite())
}

pub const NAN3: Vec3 = [f64::NAN; 3];

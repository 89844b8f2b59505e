use crate::{foundation::core::Point3, patch::device::Device};

/// Axis-aligned 3D bounding box over device positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Bounds3 {
    pub min: Point3,
    pub size: Point3,
}

impl Bounds3 {
    pub fn new(min: Point3, size: Point3) -> Self {
        Self { min, size }
    }

    /// A box in the XY plane.
    pub fn flat(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self::new(
            Point3::new(min_x, min_y, 0.0),
            Point3::new(width, height, 0.0),
        )
    }

    /// Tightest box around every device, or `None` for an empty patch.
    pub fn of_devices(devices: &[Device]) -> Option<Self> {
        let first = devices.first()?.point();
        let (mut lo, mut hi) = (first, first);
        for p in devices.iter().skip(1).map(Device::point) {
            lo = Point3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z));
            hi = Point3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z));
        }
        Some(Self::new(
            lo,
            Point3::new(hi.x - lo.x, hi.y - lo.y, hi.z - lo.z),
        ))
    }

    pub fn max(&self) -> Point3 {
        Point3::new(
            self.min.x + self.size.x,
            self.min.y + self.size.y,
            self.min.z + self.size.z,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.size.x < 0.0 || self.size.y < 0.0 || self.size.z < 0.0
    }

    /// Inclusive on every face. An empty box contains nothing.
    pub fn contains(&self, p: Point3) -> bool {
        if self.is_empty() {
            return false;
        }
        let max = self.max();
        (self.min.x..=max.x).contains(&p.x)
            && (self.min.y..=max.y).contains(&p.y)
            && (self.min.z..=max.z).contains(&p.z)
    }

    /// Position of `p` within the box, each axis mapped to `[0, 1]`. Degenerate
    /// axes map to 0.
    pub fn normalize(&self, p: Point3) -> Point3 {
        fn axis(v: f64, min: f64, size: f64) -> f64 {
            if size <= 0.0 {
                0.0
            } else {
                ((v - min) / size).clamp(0.0, 1.0)
            }
        }
        Point3::new(
            axis(p.x, self.min.x, self.size.x),
            axis(p.y, self.min.y, self.size.y),
            axis(p.z, self.min.z, self.size.z),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/bounds.rs"]
mod tests;

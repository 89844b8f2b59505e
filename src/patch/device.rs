use crate::foundation::{
    core::Point3,
    error::{LumaError, LumaResult},
};

/// An addressed, positioned output target. Identity is the address.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Device {
    address: u32,
    group: i32,
    point: Point3,
}

impl Device {
    pub fn new(address: u32, group: i32, point: Point3) -> Self {
        Self {
            address,
            group,
            point,
        }
    }

    /// Build a device from a 1-, 2- or 3-dimensional point. Missing `y`/`z`
    /// default to 0.
    pub fn from_point(address: u32, group: i32, point: &[f64]) -> LumaResult<Self> {
        let point = match *point {
            [x] => Point3::new(x, 0.0, 0.0),
            [x, y] => Point3::new(x, y, 0.0),
            [x, y, z] => Point3::new(x, y, z),
            _ => {
                return Err(LumaError::patch(format!(
                    "device {address}: {}-dimensional points are not supported",
                    point.len()
                )));
            }
        };
        Ok(Self::new(address, group, point))
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn group(&self) -> i32 {
        self.group
    }

    pub fn point(&self) -> Point3 {
        self.point
    }
}

/// One record of a patch sheet, as exported by the layout tool:
///
/// ```json
/// { "point": [-111, 92.34, -78.21], "group": 0, "address": 57 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PatchElement {
    pub point: Vec<f64>,
    #[serde(default)]
    pub group: i32,
    pub address: u32,
}

impl PatchElement {
    pub fn to_device(&self) -> LumaResult<Device> {
        if let Some(bad) = self.point.iter().find(|v| !v.is_finite()) {
            return Err(LumaError::patch(format!(
                "device {}: point coordinate {bad} is not finite",
                self.address
            )));
        }
        Device::from_point(self.address, self.group, &self.point)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/device.rs"]
mod tests;

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        error::{LumaError, LumaResult},
        pixel::Pixel,
    },
    patch::{
        bounds::Bounds3,
        device::{Device, PatchElement},
    },
};

/// Parse a JSON patch sheet (an array of [`PatchElement`]s) into devices.
pub fn parse_patch_sheet(json: &str) -> LumaResult<Vec<Device>> {
    let elements: Vec<PatchElement> = serde_json::from_str(json)?;
    elements.iter().map(PatchElement::to_device).collect()
}

#[tracing::instrument]
pub fn load_patch_sheet(path: &Path) -> LumaResult<Vec<Device>> {
    let f = File::open(path).with_context(|| format!("open patch sheet '{}'", path.display()))?;
    let elements: Vec<PatchElement> = serde_json::from_reader(BufReader::new(f))?;
    let devices = elements
        .iter()
        .map(PatchElement::to_device)
        .collect::<LumaResult<Vec<_>>>()?;
    tracing::debug!(count = devices.len(), "loaded patch sheet");
    Ok(devices)
}

/// One routed output sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DeviceColor {
    pub address: u32,
    pub group: i32,
    pub color: Pixel,
}

/// The mapping from frame-buffer slot to device. Slot `i` of every pixel
/// buffer drives `devices()[i]`.
#[derive(Clone, Debug)]
pub struct Patch {
    devices: Vec<Device>,
    bounds: Option<Bounds3>,
}

impl Patch {
    pub fn new(devices: Vec<Device>) -> LumaResult<Self> {
        let mut seen = HashSet::with_capacity(devices.len());
        for d in &devices {
            if !seen.insert(d.address()) {
                return Err(LumaError::patch(format!(
                    "device address {} is patched more than once",
                    d.address()
                )));
            }
        }
        let bounds = Bounds3::of_devices(&devices);
        Ok(Self { devices, bounds })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds3> {
        self.bounds
    }

    /// Fan a finished frame out to device addresses, in patch order.
    pub fn route(&self, pixels: &[Pixel]) -> LumaResult<Vec<DeviceColor>> {
        if pixels.len() != self.devices.len() {
            return Err(LumaError::config(format!(
                "frame has {} pixels but {} devices are patched",
                pixels.len(),
                self.devices.len()
            )));
        }
        Ok(self
            .devices
            .iter()
            .zip(pixels)
            .map(|(d, &color)| DeviceColor {
                address: d.address(),
                group: d.group(),
                color,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/map.rs"]
mod tests;

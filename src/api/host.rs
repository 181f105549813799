use indexmap::IndexMap;

use crate::render::SurfaceHandle;

/// Capabilities detected by the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformCapabilities {
    /// Drawing control of a surface can be moved to another thread.
    pub offscreen_transfer: bool,
    /// Memory can be shared between the coordinator and the render worker.
    pub shared_memory: bool,
    pub device_pixel_ratio: f64,
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self {
            offscreen_transfer: true,
            shared_memory: true,
            device_pixel_ratio: 1.0,
        }
    }
}

impl PlatformCapabilities {
    #[must_use]
    pub fn with_offscreen_transfer(mut self, available: bool) -> Self {
        self.offscreen_transfer = available;
        self
    }

    #[must_use]
    pub fn with_shared_memory(mut self, available: bool) -> Self {
        self.shared_memory = available;
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }
}

/// Registry of surfaces addressable by id, plus the host's capabilities.
///
/// A ladder takes its surface out of the host when it initializes, so each
/// surface can be bound to at most one ladder.
#[derive(Default)]
pub struct SurfaceHost {
    capabilities: PlatformCapabilities,
    surfaces: IndexMap<String, Box<dyn SurfaceHandle>>,
}

impl SurfaceHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: PlatformCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn capabilities(&self) -> PlatformCapabilities {
        self.capabilities
    }

    /// Registers `surface` under `id`, returning any surface it replaced.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        surface: impl SurfaceHandle + 'static,
    ) -> Option<Box<dyn SurfaceHandle>> {
        self.surfaces.insert(id.into(), Box::new(surface))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.surfaces.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn SurfaceHandle> {
        self.surfaces.get(id).map(|surface| surface.as_ref())
    }

    /// Removes the surface so its drawing rights can be moved elsewhere.
    pub fn take(&mut self, id: &str) -> Option<Box<dyn SurfaceHandle>> {
        self.surfaces.shift_remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }
}

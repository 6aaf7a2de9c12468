#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;
use vigil_events::{EventBus, RegistryEvent};

use crate::{
    error::{RegistryError, RegistryResult},
    traits::CameraRegistry,
    types::{Camera, CameraId, CameraStatus, NewCamera},
};

/// In-memory camera registry.
///
/// Backs tests and single-process deployments. Insertion order is
/// preserved for `list`.
pub struct MemoryRegistry {
    cameras: RwLock<Vec<Camera>>,
    next_id: AtomicU64,
    bus: Option<EventBus>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cameras: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            bus: None,
        }
    }

    /// Publish registry events on the given bus.
    #[must_use]
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    fn publish(&self, event: RegistryEvent) {
        if let Some(bus) = &self.bus {
            bus.publish(event);
        }
    }

    fn validate(camera: &NewCamera) -> RegistryResult<()> {
        if camera.name.trim().is_empty() {
            return Err(RegistryError::Invalid("name must not be empty".into()));
        }
        if camera.url.trim().is_empty() {
            return Err(RegistryError::Invalid("url must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRegistry for MemoryRegistry {
    fn add(&self, camera: NewCamera) -> RegistryResult<Camera> {
        Self::validate(&camera)?;

        let id = CameraId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = Camera {
            id,
            name: camera.name,
            url: camera.url,
            api_link: camera.api_link,
            status: CameraStatus::Active,
        };
        self.cameras.write().push(record.clone());

        debug!(id = id.0, name = %record.name, "camera added");
        self.publish(RegistryEvent::CameraAdded {
            id: id.0,
            name: record.name.clone(),
        });
        Ok(record)
    }

    fn get(&self, id: CameraId) -> RegistryResult<Camera> {
        self.cameras
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RegistryError::NotFound(id))
    }

    fn list(&self) -> Vec<Camera> {
        self.cameras.read().clone()
    }

    fn remove(&self, id: CameraId) -> RegistryResult<()> {
        let mut cameras = self.cameras.write();
        let before = cameras.len();
        cameras.retain(|c| c.id != id);
        if cameras.len() == before {
            return Err(RegistryError::NotFound(id));
        }
        drop(cameras);

        debug!(id = id.0, "camera removed");
        self.publish(RegistryEvent::CameraRemoved { id: id.0 });
        Ok(())
    }

    fn set_status(&self, id: CameraId, status: CameraStatus) -> RegistryResult<()> {
        let mut cameras = self.cameras.write();
        let camera = cameras
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RegistryError::NotFound(id))?;
        camera.status = status;
        drop(cameras);

        self.publish(RegistryEvent::StatusChanged {
            id: id.0,
            active: status.is_active(),
        });
        Ok(())
    }
}

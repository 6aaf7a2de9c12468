#![forbid(unsafe_code)]

/// Events emitted by the camera registry.
#[derive(Clone, Debug)]
pub enum RegistryEvent {
    /// A camera record was created.
    CameraAdded { id: u64, name: String },
    /// A camera record was deleted.
    CameraRemoved { id: u64 },
    /// A camera's status flag changed.
    StatusChanged { id: u64, active: bool },
}

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use url::Url;

/// Registry-assigned camera identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraId(pub u64);

/// Whether a camera is currently monitored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    #[default]
    Active,
    Inactive,
}

impl CameraStatus {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A registered camera source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub id: CameraId,
    /// Operator-facing display name.
    pub name: String,
    /// Stream URL; the only field the preview layer reads. Kept as the
    /// raw operator input; classification happens at preview time.
    pub url: String,
    /// Optional detection-API endpoint linked to this camera.
    pub api_link: Option<Url>,
    pub status: CameraStatus,
}

/// Fields for creating a camera record; the registry assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCamera {
    pub name: String,
    pub url: String,
    pub api_link: Option<Url>,
}

impl NewCamera {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            api_link: None,
        }
    }

    /// Link a detection-API endpoint.
    #[must_use]
    pub fn with_api_link(mut self, api_link: Url) -> Self {
        self.api_link = Some(api_link);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_serializes_with_lowercase_status() {
        let camera = Camera {
            id: CameraId(7),
            name: "Hall".to_string(),
            url: "rtsp://192.168.1.100:554/stream".to_string(),
            api_link: None,
            status: CameraStatus::Inactive,
        };
        let json = serde_json::to_string(&camera).unwrap();
        assert!(json.contains("\"status\":\"inactive\""));

        let back: Camera = serde_json::from_str(&json).unwrap();
        assert_eq!(back, camera);
    }
}

//! Region requests as handed in by callers.

use beacons_common::Region;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Loosely-typed region request, validated into a [`Region`].
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRequest {
    pub identifier: String,
    pub uuid: String,
    #[serde(default)]
    pub major: Option<u16>,
    #[serde(default)]
    pub minor: Option<u16>,
}

impl RegionRequest {
    pub fn new(identifier: impl Into<String>, uuid: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            uuid: uuid.into(),
            major: None,
            minor: None,
        }
    }

    pub fn with_major(mut self, major: u16) -> Self {
        self.major = Some(major);
        self
    }

    pub fn with_minor(mut self, minor: u16) -> Self {
        self.minor = Some(minor);
        self
    }
}

impl TryFrom<RegionRequest> for Region {
    type Error = Error;

    fn try_from(request: RegionRequest) -> Result<Self> {
        if request.identifier.trim().is_empty() {
            return Err(Error::InvalidRegion("identifier must not be empty".to_string()));
        }
        let uuid = Uuid::parse_str(request.uuid.trim()).map_err(|e| {
            Error::InvalidRegion(format!("{}: bad uuid {:?}: {}", request.identifier, request.uuid, e))
        })?;

        Ok(Region {
            identifier: request.identifier,
            uuid: uuid.hyphenated().to_string(),
            major: request.major,
            minor: request.minor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_is_lower_cased() {
        let request = RegionRequest::new("lobby", "E2C56DB5-DFFB-48D2-B060-D0F5A71096E0").with_major(7);
        let region = Region::try_from(request).unwrap();
        assert_eq!(region.uuid, "e2c56db5-dffb-48d2-b060-d0f5a71096e0");
        assert_eq!(region.major, Some(7));
        assert_eq!(region.minor, None);
    }

    #[test]
    fn test_major_and_minor_carried_over() {
        let request = RegionRequest::new("desk-12", "b9407f30-f5f8-466e-aff9-25556b57fe6d")
            .with_major(4)
            .with_minor(12);
        let region = Region::try_from(request).unwrap();
        assert_eq!(region.major, Some(4));
        assert_eq!(region.minor, Some(12));
        assert_eq!(
            region.to_string(),
            "desk-12 [uuid=b9407f30-f5f8-466e-aff9-25556b57fe6d major=4 minor=12]"
        );
    }

    #[test]
    fn test_invalid_requests_rejected() {
        let empty_id = RegionRequest::new(" ", Uuid::new_v4().to_string());
        assert!(matches!(Region::try_from(empty_id), Err(Error::InvalidRegion(_))));

        let bad_uuid = RegionRequest::new("lobby", "not-a-uuid");
        let err = Region::try_from(bad_uuid).unwrap_err();
        assert!(err.to_string().contains("lobby"));
    }

    #[test]
    fn test_request_deserializes_without_major_minor() {
        let request: RegionRequest = serde_json::from_str(
            r#"{"identifier": "lobby", "uuid": "e2c56db5-dffb-48d2-b060-d0f5a71096e0"}"#,
        )
        .unwrap();
        assert!(request.major.is_none());
        assert!(request.minor.is_none());
    }
}

//! The Platform resource: a named, typed traffic-management platform.
//!
//! Wire names are fixed by the service and do not all follow the Rust field
//! names (`intendedUse`, `privateArchetype`). `PlatformOpts` and `Platform`
//! are separate types; only the latter carries the server-assigned id.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::service::{Resource, ResourceId, ResourceService};

/// Collection path of the Platform API, relative to the base URL.
pub const PLATFORM_BASE_PATH: &str = "v2/config/platforms.json";

/// Free-form JSON object, as the service models categories and probe settings.
pub type JsonObject = Map<String, Value>;

/// Settings sent when creating or updating a platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformOpts {
    pub name: String,
    pub display_name: String,
    pub category: Option<JsonObject>,
    pub radar_config: Option<JsonObject>,
    pub sonar_config: Option<JsonObject>,
    #[serde(rename = "intendedUse")]
    pub description: String,
    pub enabled: bool,
    pub openmix_enabled: bool,
    #[serde(rename = "privateArchetype")]
    pub is_private: bool,
    pub openmix_visible: bool,
    pub public_provider_archetype_id: i64,
}

/// A platform as stored by the service. `id` must be present in every
/// response; the remaining fields default when the service omits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: ResourceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: Option<JsonObject>,
    #[serde(default)]
    pub radar_config: Option<JsonObject>,
    #[serde(default)]
    pub sonar_config: Option<JsonObject>,
    #[serde(default, rename = "intendedUse")]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub openmix_enabled: bool,
    #[serde(default, rename = "privateArchetype")]
    pub is_private: bool,
    #[serde(default)]
    pub openmix_visible: bool,
    #[serde(default)]
    pub public_provider_archetype_id: i64,
}

impl Platform {
    /// The writable fields of this platform, ready for a read-modify-write
    /// `update`.
    pub fn to_opts(&self) -> PlatformOpts {
        PlatformOpts {
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            category: self.category.clone(),
            radar_config: self.radar_config.clone(),
            sonar_config: self.sonar_config.clone(),
            description: self.description.clone(),
            enabled: self.enabled,
            openmix_enabled: self.openmix_enabled,
            is_private: self.is_private,
            openmix_visible: self.openmix_visible,
            public_provider_archetype_id: self.public_provider_archetype_id,
        }
    }
}

impl Resource for Platform {
    type Opts = PlatformOpts;
    const BASE_PATH: &'static str = PLATFORM_BASE_PATH;
    const KIND: &'static str = "platform";
}

/// CRUD service for platforms.
pub type PlatformService<'c> = ResourceService<'c, Platform>;

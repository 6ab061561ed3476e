//! Module health and introspection.
//!
//! Pure queries with no side effects, safe to call at process start for
//! readiness checks.

use chrono::Utc;
use serde::Serialize;

use crate::profiles::Profile;

/// Version string exposed to collaborators
pub const MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Profiles this layer can validate against
pub const SUPPORTED_PROFILES: [Profile; 2] = [Profile::CaCore, Profile::UsCore];

/// Resource types this layer converts and validates
pub const SUPPORTED_RESOURCES: [&str; 3] = ["Patient", "Encounter", "Observation"];

/// Process-wide interop configuration, fixed at initialization.
///
/// Injected where testability matters rather than read from a global.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InteropConfig {
    pub fhir_version: &'static str,
    pub default_profile: Profile,
    pub strict_validation: bool,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            fhir_version: "4.0.1",
            default_profile: Profile::CaCore,
            strict_validation: true,
        }
    }
}

/// Introspection snapshot returned by [`module_info`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    pub version: &'static str,
    pub status: &'static str,
    pub supported_profiles: Vec<Profile>,
    pub supported_resources: Vec<&'static str>,
    pub config: InteropConfig,
    pub timestamp: String,
}

/// Whether the interop layer is ready to serve conversions.
pub fn is_ready() -> bool {
    !SUPPORTED_PROFILES.is_empty() && !SUPPORTED_RESOURCES.is_empty()
}

/// Describe the module: version, status, supported profiles and resources.
pub fn module_info() -> ModuleInfo {
    ModuleInfo {
        version: MODULE_VERSION,
        status: if is_ready() { "ready" } else { "unavailable" },
        supported_profiles: SUPPORTED_PROFILES.to_vec(),
        supported_resources: SUPPORTED_RESOURCES.to_vec(),
        config: InteropConfig::default(),
        timestamp: Utc::now().to_rfc3339(),
    }
}

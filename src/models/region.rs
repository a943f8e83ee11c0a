use serde::{Deserialize, Serialize};

/// Region capabilities the create flow cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Vlans,
    Vpcs,
    DiskEncryption,
    GpuLinodes,
    BareMetal,
}

impl Capability {
    /// Capability name as reported by the regions endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Vlans => "Vlans",
            Capability::Vpcs => "VPCs",
            Capability::DiskEncryption => "Disk Encryption",
            Capability::GpuLinodes => "GPU Linodes",
            Capability::BareMetal => "Bare Metal",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroupLimits {
    #[serde(default)]
    pub maximum_pgs_per_customer: Option<u32>,
    #[serde(default)]
    pub maximum_linodes_per_pg: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_group_limits: Option<PlacementGroupLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// Country codes grouped under Europe for agreement purposes.
const EU_COUNTRIES: &[&str] = &["de", "es", "fr", "gb", "it", "nl", "se", "uk"];

impl Region {
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.iter().any(|c| c == capability.as_str())
    }

    pub fn is_eu(&self) -> bool {
        EU_COUNTRIES.contains(&self.country.to_lowercase().as_str())
    }
}

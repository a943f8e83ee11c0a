use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementGroupType {
    #[serde(rename = "affinity:local")]
    AffinityLocal,
    #[serde(rename = "anti_affinity:local")]
    AntiAffinityLocal,
}

impl PlacementGroupType {
    pub fn display_label(&self) -> &'static str {
        match self {
            PlacementGroupType::AffinityLocal => "Affinity",
            PlacementGroupType::AntiAffinityLocal => "Anti-affinity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroupMember {
    pub linode_id: u64,
    #[serde(default)]
    pub is_compliant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementGroup {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub region: String,
    pub placement_group_type: PlacementGroupType,
    #[serde(default)]
    pub members: Vec<PlacementGroupMember>,
}

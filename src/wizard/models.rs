use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ApiError, PlacementGroup, StackScript, TypeClass, UserDefinedField};

/// Which source the new instance is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreateType {
    #[default]
    FromImage,
    FromApp,
    FromStackScript,
    FromBackup,
    FromLinode,
}

impl CreateType {
    /// Flows where a pre-selected image would be wrong and is cleared on entry.
    pub fn is_non_image(&self) -> bool {
        matches!(
            self,
            CreateType::FromStackScript | CreateType::FromBackup | CreateType::FromLinode
        )
    }

    /// Whether the request body carries `image`.
    pub fn sends_image(&self) -> bool {
        matches!(
            self,
            CreateType::FromImage | CreateType::FromApp | CreateType::FromStackScript
        )
    }

    pub fn analytics_action(&self) -> &'static str {
        match self {
            CreateType::FromImage => "image",
            CreateType::FromApp => "one-click",
            CreateType::FromStackScript => "stackscript",
            CreateType::FromBackup => "backup",
            CreateType::FromLinode => "clone",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl From<&str> for Tag {
    fn from(label: &str) -> Self {
        Tag {
            label: label.to_string(),
            value: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanSelection {
    pub label: String,
    pub ipam_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VpcSelection {
    pub vpc_id: Option<u64>,
    pub subnet_id: Option<u64>,
    /// Explicit VPC IPv4, only used when `autoassign_ipv4` is off.
    pub ipv4: String,
    pub autoassign_ipv4: bool,
    pub assign_public_ipv4: bool,
    pub additional_ipv4_ranges: Vec<String>,
}

impl Default for VpcSelection {
    fn default() -> Self {
        VpcSelection {
            vpc_id: None,
            subnet_id: None,
            ipv4: String::new(),
            autoassign_ipv4: true,
            assign_public_ipv4: false,
            additional_ipv4_ranges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackScriptSelection {
    pub id: u64,
    /// Label as shown to the user, with " Cluster" for cluster apps.
    pub label: String,
    pub username: String,
    pub images: Vec<String>,
    pub user_defined_fields: Vec<UserDefinedField>,
}

/// Transient state of the submit button and its surrounding notices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionState {
    pub errors: Option<Vec<ApiError>>,
    pub form_is_submitting: bool,
    pub signed_agreement: bool,
    pub show_gdpr_checkbox: bool,
    pub checked_firewall_authorization: bool,
    pub show_firewall_authorization: bool,
    pub show_api_awareness_modal: bool,
}

/// The in-progress, not yet submitted instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationDraft {
    pub create_type: CreateType,
    /// Explicit label; `None` means the label is derived.
    pub custom_label: Option<String>,
    pub region: Option<String>,
    pub type_id: Option<String>,
    pub image: Option<String>,
    pub backup_id: Option<u64>,
    pub linode_id: Option<u64>,
    pub stackscript: Option<StackScriptSelection>,
    pub udfs: BTreeMap<String, String>,
    pub selected_disk_size: Option<u64>,
    pub root_pass: String,
    pub authorized_users: Vec<String>,
    pub backups_enabled: bool,
    pub private_ip: bool,
    pub disk_encryption: bool,
    pub firewall_id: Option<u64>,
    pub vlan: VlanSelection,
    pub vpc: VpcSelection,
    pub placement_group: Option<PlacementGroup>,
    pub tags: Vec<Tag>,
    pub user_data: Option<String>,
    pub disabled_classes: Vec<TypeClass>,
    pub submission: SubmissionState,
}

impl Default for CreationDraft {
    fn default() -> Self {
        CreationDraft {
            create_type: CreateType::default(),
            custom_label: None,
            region: None,
            type_id: None,
            image: None,
            backup_id: None,
            linode_id: None,
            stackscript: None,
            udfs: BTreeMap::new(),
            selected_disk_size: None,
            root_pass: String::new(),
            authorized_users: Vec::new(),
            backups_enabled: false,
            private_ip: false,
            disk_encryption: true,
            firewall_id: None,
            vlan: VlanSelection::default(),
            vpc: VpcSelection::default(),
            placement_group: None,
            tags: Vec::new(),
            user_data: None,
            disabled_classes: Vec::new(),
            submission: SubmissionState::default(),
        }
    }
}

/// A single user interaction against the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum DraftUpdate {
    SetCreateType(CreateType),
    SetLabel(String),
    SetRegion(String),
    SetType(String),
    SetImage(Option<String>),
    SetBackup(u64),
    SetLinode(u64),
    SetStackScript(StackScript),
    SetUdfs(BTreeMap<String, String>),
    SetPassword(String),
    SetAuthorizedUsers(Vec<String>),
    SetTags(Vec<String>),
    SetUserData(String),
    SetFirewall(Option<u64>),
    SetPlacementGroup(Option<PlacementGroup>),
    SetVlan(VlanSelection),
    SetVpc(Option<u64>),
    SetSubnet(Option<u64>),
    SetVpcIpv4(String),
    SetVpcIpv4Ranges(Vec<String>),
    ToggleAutoassignIpv4,
    ToggleAssignPublicIpv4,
    ToggleBackups,
    TogglePrivateIp,
    ToggleDiskEncryption,
    ToggleAgreement,
    ToggleFirewallAuthorization,
    Reset,
}

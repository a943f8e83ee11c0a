use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfacePurpose {
    Public,
    Vlan,
    Vpc,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_1_1: Option<String>,
}

/// One entry of the `interfaces` list of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfacePayload {
    pub purpose: InterfacePurpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipam_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Config>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_ranges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl InterfacePayload {
    /// The default public interface: empty label and IPAM address.
    pub fn public() -> Self {
        InterfacePayload {
            purpose: InterfacePurpose::Public,
            label: Some(String::new()),
            ipam_address: Some(String::new()),
            subnet_id: None,
            vpc_id: None,
            ipv4: None,
            ip_ranges: None,
            primary: None,
        }
    }

    /// A VLAN attachment. The IPAM address is sent as given, empty or not.
    pub fn vlan(label: impl Into<String>, ipam_address: impl Into<String>) -> Self {
        InterfacePayload {
            purpose: InterfacePurpose::Vlan,
            label: Some(label.into()),
            ipam_address: Some(ipam_address.into()),
            subnet_id: None,
            vpc_id: None,
            ipv4: None,
            ip_ranges: None,
            primary: None,
        }
    }

    pub fn vpc(
        vpc_id: u64,
        subnet_id: Option<u64>,
        ipv4: Ipv4Config,
        ip_ranges: Vec<String>,
    ) -> Self {
        InterfacePayload {
            purpose: InterfacePurpose::Vpc,
            label: None,
            ipam_address: None,
            subnet_id,
            vpc_id: Some(vpc_id),
            ipv4: Some(ipv4),
            ip_ranges: Some(ip_ranges),
            primary: Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionStatus {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementGroupPayload {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Base64 encoded cloud-init user data.
    pub user_data: String,
}

/// Body of `POST /linode/instances` and `POST /linode/instances/{id}/clone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLinodeRequest {
    pub label: String,
    pub region: String,
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stackscript_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stackscript_data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_pass: Option<String>,
    #[serde(default)]
    pub authorized_users: Vec<String>,
    #[serde(default)]
    pub backups_enabled: bool,
    #[serde(default)]
    pub private_ip: bool,
    pub booted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<InterfacePayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_group: Option<PlacementGroupPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_encryption: Option<EncryptionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub tags: Vec<String>,
}

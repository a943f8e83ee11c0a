use base64::prelude::*;

use crate::models::{
    CreateLinodeRequest, Capability, EncryptionStatus, FeatureFlags, InterfacePayload,
    InterfacePurpose, Ipv4Config, Metadata, PlacementGroupPayload, Region,
};
use super::models::{CreateType, CreationDraft};

fn vpc_interface(draft: &CreationDraft, vpc_id: u64) -> InterfacePayload {
    let vpc = &draft.vpc;
    let ipv4 = Ipv4Config {
        vpc: if vpc.autoassign_ipv4 {
            None
        } else {
            Some(vpc.ipv4.clone())
        },
        nat_1_1: vpc.assign_public_ipv4.then(|| "any".to_string()),
    };
    let ranges = vpc
        .additional_ipv4_ranges
        .iter()
        .filter(|r| !r.trim().is_empty())
        .cloned()
        .collect();
    InterfacePayload::vpc(vpc_id, vpc.subnet_id, ipv4, ranges)
}

/// Build the ordered `interfaces` list, or `None` when nothing but the
/// implicit public interface would be sent.
fn build_interfaces(draft: &CreationDraft, region: Option<&Region>) -> Option<Vec<InterfacePayload>> {
    let supports = |cap| region.map(|r| r.supports(cap)).unwrap_or(false);
    let mut interfaces = Vec::new();

    if supports(Capability::Vpcs) {
        if let Some(vpc_id) = draft.vpc.vpc_id {
            interfaces.insert(0, vpc_interface(draft, vpc_id));
        }
    }

    if supports(Capability::Vlans) && draft.image.is_some() && !draft.vlan.label.is_empty() {
        interfaces.push(InterfacePayload::vlan(
            draft.vlan.label.clone(),
            draft.vlan.ipam_address.clone(),
        ));
    }

    if interfaces.is_empty() {
        return None;
    }

    let vpc_assigned = interfaces.iter().any(|i| i.purpose == InterfacePurpose::Vpc);
    let vlan_assigned = interfaces.iter().any(|i| i.purpose == InterfacePurpose::Vlan);

    // VLAN only: public goes first. VPC (with or without VLAN) and private IP:
    // public goes last.
    if !vpc_assigned && vlan_assigned {
        interfaces.insert(0, InterfacePayload::public());
    } else if vpc_assigned && draft.private_ip {
        interfaces.push(InterfacePayload::public());
    }

    Some(interfaces)
}

/// Map the draft onto the exact body the create endpoint expects.
///
/// `region` is the catalog entry for `draft.region`, if one was found. The
/// assembler never fails; a draft missing required fields yields a body with
/// empty fields for schema validation to reject.
pub fn assemble_payload(
    draft: &CreationDraft,
    label: String,
    region: Option<&Region>,
    flags: &FeatureFlags,
) -> CreateLinodeRequest {
    let create_type = draft.create_type;

    let disk_encryption = (flags.disk_encryption
        && region.map(|r| r.supports(Capability::DiskEncryption)).unwrap_or(false))
    .then_some(if draft.disk_encryption {
        EncryptionStatus::Enabled
    } else {
        EncryptionStatus::Disabled
    });

    let stackscript_id = match create_type {
        CreateType::FromApp | CreateType::FromStackScript => {
            draft.stackscript.as_ref().map(|s| s.id)
        }
        _ => None,
    };
    let stackscript_data = stackscript_id
        .filter(|_| !draft.udfs.is_empty())
        .map(|_| draft.udfs.clone());

    let metadata = draft
        .user_data
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| Metadata {
            user_data: BASE64_STANDARD.encode(d.as_bytes()),
        });

    CreateLinodeRequest {
        label,
        region: draft.region.clone().unwrap_or_default(),
        type_id: draft.type_id.clone().unwrap_or_default(),
        image: if create_type.sends_image() {
            draft.image.clone()
        } else {
            None
        },
        backup_id: if create_type == CreateType::FromBackup {
            draft.backup_id
        } else {
            None
        },
        stackscript_id,
        stackscript_data,
        root_pass: Some(draft.root_pass.clone()).filter(|p| !p.is_empty()),
        authorized_users: draft.authorized_users.clone(),
        backups_enabled: draft.backups_enabled,
        private_ip: draft.private_ip,
        booted: true,
        interfaces: build_interfaces(draft, region),
        placement_group: draft
            .placement_group
            .as_ref()
            .map(|g| PlacementGroupPayload { id: g.id }),
        firewall_id: draft.firewall_id,
        disk_encryption,
        metadata,
        tags: draft.tags.iter().map(|t| t.label.clone()).collect(),
    }
}

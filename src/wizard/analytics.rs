use serde::Serialize;

use crate::models::{CreateLinodeRequest, Linode};
use super::models::CreateType;

/// The creation event reported once an instance request is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateEvent {
    pub action: &'static str,
    pub label: String,
    /// Tab the form was submitted from ("OS" for public distribution images).
    pub form_create_type: String,
    pub secure_vm_compliant: Option<bool>,
    pub linode_powered_off: Option<bool>,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn payload_label(create_type: CreateType, payload: &CreateLinodeRequest) -> String {
    match create_type {
        CreateType::FromApp | CreateType::FromStackScript => {
            payload.stackscript_id.map(|id| id.to_string()).unwrap_or_default()
        }
        CreateType::FromBackup => payload.backup_id.map(|id| id.to_string()).unwrap_or_default(),
        CreateType::FromImage => payload.image.clone().unwrap_or_default(),
        CreateType::FromLinode => payload.type_id.clone(),
    }
}

impl CreateEvent {
    pub fn new(
        create_type: CreateType,
        payload: &CreateLinodeRequest,
        stackscript_label: Option<&str>,
        clone_source: Option<&Linode>,
        secure_vm_notices: bool,
    ) -> Self {
        let action = create_type.analytics_action();
        let is_distribution = payload
            .image
            .as_deref()
            .map(|i| i.starts_with("linode/"))
            .unwrap_or(false);
        let form_create_type = if is_distribution {
            "OS".to_string()
        } else {
            capitalize(action)
        };
        let label = match stackscript_label.filter(|l| !l.is_empty()) {
            Some(l) => l.to_string(),
            None => payload_label(create_type, payload),
        };
        let linode_powered_off = match (create_type, clone_source) {
            (CreateType::FromLinode, Some(source)) => Some(source.status == "offline"),
            _ => None,
        };
        CreateEvent {
            action,
            label,
            form_create_type,
            secure_vm_compliant: secure_vm_notices.then(|| payload.firewall_id.is_some()),
            linode_powered_off,
        }
    }

    pub fn emit(&self) {
        tracing::info!(
            target: "analytics",
            action = self.action,
            label = %self.label,
            form_create_type = %self.form_create_type,
            secure_vm_compliant = ?self.secure_vm_compliant,
            linode_powered_off = ?self.linode_powered_off,
            "Create Linode"
        );
    }
}

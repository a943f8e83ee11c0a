use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::utils::{parse_optional_id, parse_query_string};
use crate::wizard::{CreateContext, CreateForm, CreateType, CreationDraft};

/// Image pre-selected on mount unless the Images tab is opened.
pub const DEFAULT_IMAGE: &str = "linode/debian11";

/// Tabs addressable through the `type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CreateTab {
    #[default]
    #[serde(rename = "OS")]
    Os,
    #[serde(rename = "One-Click")]
    OneClick,
    StackScripts,
    Images,
    Backups,
    #[serde(rename = "Clone Linode")]
    CloneLinode,
}

impl CreateTab {
    pub fn parse(raw: &str) -> Option<CreateTab> {
        match raw.trim() {
            "OS" => Some(CreateTab::Os),
            "One-Click" => Some(CreateTab::OneClick),
            "StackScripts" => Some(CreateTab::StackScripts),
            "Images" => Some(CreateTab::Images),
            "Backups" => Some(CreateTab::Backups),
            "Clone Linode" => Some(CreateTab::CloneLinode),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreateTab::Os => "OS",
            CreateTab::OneClick => "One-Click",
            CreateTab::StackScripts => "StackScripts",
            CreateTab::Images => "Images",
            CreateTab::Backups => "Backups",
            CreateTab::CloneLinode => "Clone Linode",
        }
    }

    pub fn create_type(&self) -> CreateType {
        match self {
            CreateTab::Os | CreateTab::Images => CreateType::FromImage,
            CreateTab::OneClick => CreateType::FromApp,
            CreateTab::StackScripts => CreateType::FromStackScript,
            CreateTab::Backups => CreateType::FromBackup,
            CreateTab::CloneLinode => CreateType::FromLinode,
        }
    }
}

/// Parameters a link into the wizard may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateQuery {
    /// `None` when `type` is absent or unrecognised; the OS tab is used.
    pub tab: Option<CreateTab>,
    pub image_id: Option<String>,
    pub region_id: Option<String>,
    pub type_id: Option<String>,
    pub linode_id: Option<u64>,
    pub backup_id: Option<u64>,
}

fn non_empty(query: &HashMap<String, String>, key: &str) -> Option<String> {
    query
        .get(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn parse_create_query(query: &HashMap<String, String>) -> CreateQuery {
    CreateQuery {
        tab: query.get("type").and_then(|t| CreateTab::parse(t)),
        image_id: non_empty(query, "imageID"),
        region_id: non_empty(query, "regionID"),
        type_id: non_empty(query, "typeID"),
        linode_id: parse_optional_id(query.get("linodeID").map(String::as_str)),
        backup_id: parse_optional_id(query.get("backupID").map(String::as_str)),
    }
}

/// Parse a link into the wizard: a full URL, a path with a query, or just
/// the query string.
pub fn parse_create_link(link: &str) -> CreateQuery {
    let raw = match link.split_once('?') {
        Some((_, query)) => query,
        None if link.contains('=') => link,
        None => "",
    };
    parse_create_query(&parse_query_string(raw))
}

/// The draft a freshly mounted wizard starts from.
pub fn seed_draft(query: &CreateQuery) -> CreationDraft {
    let tab = query.tab.unwrap_or_default();
    let create_type = tab.create_type();
    let image = match &query.image_id {
        Some(id) => Some(id.clone()),
        None if tab != CreateTab::Images => Some(DEFAULT_IMAGE.to_string()),
        None => None,
    };
    CreationDraft {
        create_type,
        image: image.filter(|_| !create_type.is_non_image()),
        region: query.region_id.clone(),
        type_id: query.type_id.clone(),
        linode_id: query.linode_id,
        backup_id: query.backup_id,
        ..CreationDraft::default()
    }
}

pub fn seed_form(query: &CreateQuery, context: CreateContext) -> CreateForm {
    let form = CreateForm::new(seed_draft(query), context);
    tracing::debug!(
        tab = query.tab.unwrap_or_default().as_str(),
        region = ?form.draft().region,
        "Seeded create form"
    );
    form
}

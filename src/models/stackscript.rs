use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDefinedField {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackScript {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub user_defined_fields: Vec<UserDefinedField>,
}

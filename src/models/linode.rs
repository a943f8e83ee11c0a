use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeClass {
    Nanode,
    Standard,
    Dedicated,
    Highmem,
    Premium,
    Gpu,
    Metal,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinodeType {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub class: TypeClass,
    #[serde(default)]
    pub disk: u64,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub vcpus: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinodeSpecs {
    #[serde(default)]
    pub disk: u64,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub vcpus: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Linode {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "type", default)]
    pub type_id: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub specs: LinodeSpecs,
}

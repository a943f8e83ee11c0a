use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl Image {
    /// Name fragment used when deriving a default label: the vendor for
    /// public images, the label for private ones.
    pub fn label_fragment(&self) -> &str {
        if self.is_public {
            self.vendor.as_deref().unwrap_or("")
        } else {
            &self.label
        }
    }

    pub fn supports_cloud_init(&self) -> bool {
        self.capabilities.iter().any(|c| c == "cloud-init")
    }
}

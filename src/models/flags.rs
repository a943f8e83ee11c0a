use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Send `disk_encryption` for regions that support it.
    pub disk_encryption: bool,
    /// Require a firewall or an explicit acknowledgement before creating.
    pub secure_vm_notices: bool,
}

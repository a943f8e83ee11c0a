#![allow(dead_code)]

use std::sync::Mutex;

use lcm::api::ApiCallError;
use lcm::models::{
    ApiError, CreateLinodeRequest, FeatureFlags, Image, Linode, LinodeSpecs, Region,
};
use lcm::services::CreateBackend;
use lcm::wizard::{CreateContext, CreateForm, CreateType, CreationDraft};

pub fn region(id: &str, country: &str, capabilities: &[&str]) -> Region {
    Region {
        id: id.to_string(),
        label: id.to_string(),
        country: country.to_string(),
        capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
        ..Region::default()
    }
}

pub fn debian() -> Image {
    Image {
        id: "linode/debian11".to_string(),
        label: "Debian 11".to_string(),
        vendor: Some("Debian".to_string()),
        is_public: true,
        capabilities: vec!["cloud-init".to_string()],
    }
}

pub fn linode(id: u64, label: &str, region: &str) -> Linode {
    Linode {
        id,
        label: label.to_string(),
        region: region.to_string(),
        type_id: Some("g6-standard-1".to_string()),
        image: Some("linode/debian11".to_string()),
        status: "running".to_string(),
        specs: LinodeSpecs {
            disk: 51200,
            memory: 2048,
            vcpus: 1,
        },
    }
}

/// A catalog with one fully capable US region and one bare EU region.
pub fn context() -> CreateContext {
    CreateContext {
        regions: vec![
            region(
                "us-east",
                "us",
                &["Linodes", "Vlans", "VPCs", "Disk Encryption", "GPU Linodes", "Placement Group"],
            ),
            region("eu-west", "gb", &["Linodes"]),
        ],
        images: vec![debian()],
        linodes: vec![linode(7, "web-1", "us-east")],
        ..CreateContext::default()
    }
}

/// A FromImage draft that passes every gate once a region is chosen.
pub fn ready_form(context: CreateContext) -> CreateForm {
    let draft = CreationDraft {
        create_type: CreateType::FromImage,
        image: Some("linode/debian11".to_string()),
        type_id: Some("g6-nanode-1".to_string()),
        root_pass: "Sup3r-secret".to_string(),
        ..CreationDraft::default()
    };
    let mut form = CreateForm::new(draft, context);
    form.set_region("us-east".to_string());
    form
}

pub fn flags(disk_encryption: bool, secure_vm_notices: bool) -> FeatureFlags {
    FeatureFlags {
        disk_encryption,
        secure_vm_notices,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(CreateLinodeRequest),
    Clone(u64, CreateLinodeRequest),
    SignAgreement,
}

pub enum MockResponse {
    Created(Linode),
    Rejected(Vec<ApiError>),
    Status(u16),
}

/// Records every call and answers create/clone with a canned response.
pub struct MockBackend {
    pub calls: Mutex<Vec<Call>>,
    pub response: MockResponse,
}

impl MockBackend {
    pub fn new(response: MockResponse) -> Self {
        MockBackend {
            calls: Mutex::new(Vec::new()),
            response,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<Linode, ApiCallError> {
        match &self.response {
            MockResponse::Created(l) => Ok(l.clone()),
            MockResponse::Rejected(errors) => Err(ApiCallError::Api(errors.clone())),
            MockResponse::Status(code) => Err(ApiCallError::Status(*code)),
        }
    }
}

impl CreateBackend for MockBackend {
    async fn create_linode(&self, payload: &CreateLinodeRequest) -> Result<Linode, ApiCallError> {
        self.calls.lock().unwrap().push(Call::Create(payload.clone()));
        self.answer()
    }

    async fn clone_linode(
        &self,
        source_linode_id: u64,
        payload: &CreateLinodeRequest,
    ) -> Result<Linode, ApiCallError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Clone(source_linode_id, payload.clone()));
        self.answer()
    }

    async fn sign_agreement(&self) -> Result<(), ApiCallError> {
        self.calls.lock().unwrap().push(Call::SignAgreement);
        Ok(())
    }
}

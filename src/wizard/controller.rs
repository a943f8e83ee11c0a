use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::ApiCallError;
use crate::models::{
    AccountAgreements, ApiError, Capability, CreateLinodeRequest, FeatureFlags, Image, Linode,
    LinodeType, Profile, Region, StackScript, TypeClass,
};
use super::analytics::CreateEvent;
use super::errors::SubmitError;
use super::label::derive_default_label;
use super::models::{
    CreateType, CreationDraft, DraftUpdate, StackScriptSelection, Tag, VlanSelection,
};
use super::payload::assemble_payload;
use super::schema::validate_create_request;
use super::validation::{is_valid_vpc_ipv4, placement_group_capacity_error, PasswordValidator};

/// Read-only catalog snapshots and account state the form consults.
#[derive(Debug, Clone, Default)]
pub struct CreateContext {
    pub regions: Vec<Region>,
    pub images: Vec<Image>,
    pub types: Vec<LinodeType>,
    pub linodes: Vec<Linode>,
    pub flags: FeatureFlags,
    pub profile: Profile,
    pub agreements: AccountAgreements,
}

impl CreateContext {
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn linode(&self, id: u64) -> Option<&Linode> {
        self.linodes.iter().find(|l| l.id == id)
    }
}

static NEXT_FORM_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one in-flight request: the form that started it and which of
/// that form's attempts it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    form_id: u64,
    attempt: u64,
}

/// Everything needed to send one create or clone request, captured when
/// submission starts so later draft edits cannot change it.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    pub ticket: SubmitTicket,
    pub payload: CreateLinodeRequest,
    /// Set for clone flows; the request goes to the clone endpoint.
    pub clone_source: Option<u64>,
    pub signed_agreement: bool,
    pub event: CreateEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitGate {
    /// Local or schema validation failed; nothing is sent.
    Rejected(Vec<ApiError>),
    /// The firewall acknowledgement banner is now showing; nothing is sent.
    AwaitingFirewallAcknowledgement,
    Ready(Box<SubmitRequest>),
}

fn disabled_classes(region: Option<&Region>) -> Vec<TypeClass> {
    let supports = |cap| region.map(|r| r.supports(cap)).unwrap_or(false);
    let mut classes = Vec::new();
    if !supports(Capability::GpuLinodes) {
        classes.push(TypeClass::Gpu);
    }
    if !supports(Capability::BareMetal) {
        classes.push(TypeClass::Metal);
    }
    classes
}

/// Owner of the creation draft. Every mutation goes through a setter here.
#[derive(Debug, Clone)]
pub struct CreateForm {
    id: u64,
    attempts: u64,
    in_flight: Option<SubmitTicket>,
    draft: CreationDraft,
    context: CreateContext,
}

impl CreateForm {
    pub fn new(draft: CreationDraft, context: CreateContext) -> Self {
        let mut form = CreateForm {
            id: NEXT_FORM_ID.fetch_add(1, Ordering::Relaxed),
            attempts: 0,
            in_flight: None,
            draft,
            context,
        };
        if let Some(region) = form.draft.region.clone() {
            form.refresh_region_state(&region);
        }
        form
    }

    pub fn draft(&self) -> &CreationDraft {
        &self.draft
    }

    pub fn context(&self) -> &CreateContext {
        &self.context
    }

    pub fn into_draft(self) -> CreationDraft {
        self.draft
    }

    fn selected_region(&self) -> Option<&Region> {
        self.draft.region.as_deref().and_then(|id| self.context.region(id))
    }

    fn refresh_region_state(&mut self, region_id: &str) {
        let region = self.context.region(region_id);
        self.draft.disabled_classes = disabled_classes(region);
        self.draft.submission.show_gdpr_checkbox = !self.context.profile.restricted
            && region.map(|r| r.is_eu()).unwrap_or(false)
            && !self.context.agreements.eu_model;
    }

    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::SetCreateType(t) => self.set_create_type(t),
            DraftUpdate::SetLabel(l) => self.update_label(l),
            DraftUpdate::SetRegion(r) => self.set_region(r),
            DraftUpdate::SetType(t) => self.set_type(t),
            DraftUpdate::SetImage(i) => self.set_image(i),
            DraftUpdate::SetBackup(id) => self.set_backup(id),
            DraftUpdate::SetLinode(id) => self.set_linode(id),
            DraftUpdate::SetStackScript(s) => self.set_stackscript(s),
            DraftUpdate::SetUdfs(u) => self.draft.udfs = u,
            DraftUpdate::SetPassword(p) => self.draft.root_pass = p,
            DraftUpdate::SetAuthorizedUsers(u) => self.draft.authorized_users = u,
            DraftUpdate::SetTags(t) => self.set_tags(t),
            DraftUpdate::SetUserData(d) => self.draft.user_data = Some(d),
            DraftUpdate::SetFirewall(f) => self.draft.firewall_id = f,
            DraftUpdate::SetPlacementGroup(g) => self.draft.placement_group = g,
            DraftUpdate::SetVlan(v) => self.set_vlan(v),
            DraftUpdate::SetVpc(v) => self.set_vpc(v),
            DraftUpdate::SetSubnet(s) => self.set_subnet(s),
            DraftUpdate::SetVpcIpv4(ip) => self.draft.vpc.ipv4 = ip,
            DraftUpdate::SetVpcIpv4Ranges(r) => self.draft.vpc.additional_ipv4_ranges = r,
            DraftUpdate::ToggleAutoassignIpv4 => self.toggle_autoassign_ipv4(),
            DraftUpdate::ToggleAssignPublicIpv4 => {
                self.draft.vpc.assign_public_ipv4 = !self.draft.vpc.assign_public_ipv4
            }
            DraftUpdate::ToggleBackups => {
                self.draft.backups_enabled = !self.draft.backups_enabled
            }
            DraftUpdate::TogglePrivateIp => self.draft.private_ip = !self.draft.private_ip,
            DraftUpdate::ToggleDiskEncryption => {
                self.draft.disk_encryption = !self.draft.disk_encryption
            }
            DraftUpdate::ToggleAgreement => {
                self.draft.submission.signed_agreement = !self.draft.submission.signed_agreement
            }
            DraftUpdate::ToggleFirewallAuthorization => {
                let s = &mut self.draft.submission;
                s.checked_firewall_authorization = !s.checked_firewall_authorization;
            }
            DraftUpdate::Reset => self.reset(),
        }
    }

    /// Switch tabs. Entering a flow where an image makes no sense drops it.
    pub fn set_create_type(&mut self, create_type: CreateType) {
        let previous = self.draft.create_type;
        if previous != create_type && create_type.is_non_image() {
            self.draft.image = None;
        }
        self.draft.create_type = create_type;
    }

    /// An empty label hands control back to label derivation.
    pub fn update_label(&mut self, label: String) {
        self.draft.custom_label = if label.is_empty() { None } else { Some(label) };
    }

    pub fn set_region(&mut self, region_id: String) {
        self.refresh_region_state(&region_id);
        let d = &mut self.draft;
        d.region = Some(region_id);
        d.placement_group = None;
        d.vpc.vpc_id = None;
        d.vpc.subnet_id = None;
        d.vpc.ipv4.clear();
    }

    /// Bare metal cannot take VLANs or backups.
    pub fn set_type(&mut self, type_id: String) {
        if type_id.contains("metal") {
            self.draft.vlan = VlanSelection::default();
            self.draft.backups_enabled = false;
        }
        self.draft.type_id = Some(type_id);
    }

    /// Clearing the image also clears the VLAN, which needs an image.
    pub fn set_image(&mut self, image: Option<String>) {
        if image.is_none() {
            self.draft.vlan = VlanSelection::default();
        }
        self.draft.image = image;
    }

    pub fn set_backup(&mut self, backup_id: u64) {
        self.draft.backup_id = Some(backup_id);
    }

    /// Pick a clone (or backup) source. The plan is reset and the region
    /// follows the source instance.
    pub fn set_linode(&mut self, linode_id: u64) {
        if self.draft.linode_id == Some(linode_id) {
            return;
        }
        let source = self.context.linode(linode_id);
        let disk_size = source.map(|l| l.specs.disk);
        let region = source.map(|l| l.region.clone()).filter(|r| !r.is_empty());
        let d = &mut self.draft;
        d.backup_id = None;
        d.selected_disk_size = disk_size;
        d.linode_id = Some(linode_id);
        d.type_id = None;
        if let Some(region) = region {
            self.refresh_region_state(&region);
            self.draft.region = Some(region);
        }
    }

    /// Select a StackScript or Marketplace app. Its compatible images replace
    /// the current image, auto-selecting one when only one is offered.
    pub fn set_stackscript(&mut self, stackscript: StackScript) {
        let defaults: BTreeMap<String, String> = stackscript
            .user_defined_fields
            .iter()
            .filter_map(|f| f.default.clone().map(|v| (f.name.clone(), v)))
            .collect();
        let label = if defaults.contains_key("cluster_size") {
            format!("{} Cluster", stackscript.label)
        } else {
            stackscript.label.clone()
        };
        let d = &mut self.draft;
        d.image = if stackscript.images.len() == 1 {
            stackscript.images.first().cloned()
        } else {
            None
        };
        d.submission.errors = None;
        d.udfs = defaults;
        d.stackscript = Some(StackScriptSelection {
            id: stackscript.id,
            label,
            username: stackscript.username,
            images: stackscript.images,
            user_defined_fields: stackscript.user_defined_fields,
        });
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.draft.tags = tags.iter().map(|t| Tag::from(t.as_str())).collect();
    }

    pub fn set_vlan(&mut self, vlan: VlanSelection) {
        self.draft.vlan = vlan;
    }

    /// Subnet and address only reset when the VPC actually changes.
    pub fn set_vpc(&mut self, vpc_id: Option<u64>) {
        if vpc_id != self.draft.vpc.vpc_id {
            let vpc = &mut self.draft.vpc;
            vpc.subnet_id = None;
            vpc.vpc_id = vpc_id;
            vpc.ipv4.clear();
        }
    }

    pub fn set_subnet(&mut self, subnet_id: Option<u64>) {
        if let Some(errors) = self.draft.submission.errors.as_mut() {
            errors.retain(|e| e.field.as_deref() != Some("interfaces[0].subnet_id"));
        }
        self.draft.vpc.subnet_id = subnet_id;
    }

    pub fn toggle_autoassign_ipv4(&mut self) {
        let vpc = &mut self.draft.vpc;
        if vpc.autoassign_ipv4 {
            vpc.ipv4.clear();
        }
        vpc.autoassign_ipv4 = !vpc.autoassign_ipv4;
    }

    /// Back to defaults. The active tab is kept, and so is the in-flight
    /// marker: a request already sent still owns the form.
    pub fn reset(&mut self) {
        let create_type = self.draft.create_type;
        let mut draft = CreationDraft {
            create_type,
            ..CreationDraft::default()
        };
        draft.submission.form_is_submitting = self.in_flight.is_some();
        self.draft = draft;
    }

    /// The label that will be sent: the user's own, or one derived from the
    /// current selections and made unique against existing instances.
    pub fn label(&self) -> String {
        if let Some(custom) = &self.draft.custom_label {
            return custom.clone();
        }
        let d = &self.draft;
        let mut source = String::new();
        let mut location = String::new();
        let mut suffix = "";

        // One-click apps all run on the same distribution; naming them adds nothing.
        if d.create_type != CreateType::FromApp {
            if let Some(script) = d.stackscript.as_ref().filter(|s| !s.label.is_empty()) {
                source = script.label.clone();
            } else if let Some(image) = d.image.as_deref().and_then(|id| self.context.image(id)) {
                source = image.label_fragment().to_string();
            }
        }
        if let Some(region) = self.selected_region() {
            location = region.id.clone();
        }
        match d.create_type {
            CreateType::FromLinode => {
                if let Some(src) = d.linode_id.and_then(|id| self.context.linode(id)) {
                    source = src.label.clone();
                }
                location = "clone".to_string();
            }
            CreateType::FromBackup => suffix = "backup",
            _ => {}
        }

        let existing: Vec<&str> = self.context.linodes.iter().map(|l| l.label.as_str()).collect();
        derive_default_label(&[source.as_str(), location.as_str(), suffix], &existing)
    }

    /// Whether user data can be offered: the chosen image, or the image of
    /// the clone source, must support cloud-init.
    pub fn user_data_supported(&self) -> bool {
        let supports = |id: &str| {
            self.context
                .image(id)
                .map(|i| i.supports_cloud_init())
                .unwrap_or(false)
        };
        let from_image = self.draft.image.as_deref().map(supports).unwrap_or(false);
        let from_source = self
            .draft
            .linode_id
            .and_then(|id| self.context.linode(id))
            .and_then(|l| l.image.as_deref())
            .map(supports)
            .unwrap_or(false);
        from_image || from_source
    }

    pub fn payload(&self) -> CreateLinodeRequest {
        assemble_payload(&self.draft, self.label(), self.selected_region(), &self.context.flags)
    }

    /// Validate the payload without sending it, as the "create using command
    /// line" view does.
    pub fn check_validation(&mut self) -> Result<CreateLinodeRequest, Vec<ApiError>> {
        let payload = self.payload();
        match validate_create_request(&payload, self.draft.create_type) {
            Ok(()) => {
                self.draft.submission.errors = None;
                self.draft.submission.show_api_awareness_modal = true;
                Ok(payload)
            }
            Err(errors) => {
                self.draft.submission.errors = Some(errors.clone());
                self.draft.submission.form_is_submitting = false;
                Err(errors)
            }
        }
    }

    fn source_selection_error(&self) -> Option<ApiError> {
        let d = &self.draft;
        match d.create_type {
            CreateType::FromLinode if d.linode_id.is_none() => Some(ApiError::field(
                "linode_id",
                "You must select a Linode to clone from",
            )),
            CreateType::FromBackup if d.backup_id.is_none() => {
                Some(ApiError::field("backup_id", "You must select a Backup."))
            }
            CreateType::FromStackScript if d.stackscript.is_none() => Some(ApiError::field(
                "stackscript_id",
                "You must select a StackScript.",
            )),
            CreateType::FromApp if d.stackscript.is_none() => Some(ApiError::field(
                "stackscript_id",
                "You must select a Marketplace App.",
            )),
            _ => None,
        }
    }

    /// Local checks in their fixed order; the first failure is returned.
    fn local_validation_error(&self, validator: &dyn PasswordValidator) -> Option<ApiError> {
        let d = &self.draft;

        if !d.root_pass.is_empty() {
            if let Some(reason) = validator.validate(&d.root_pass) {
                return Some(ApiError::field("root_pass", reason));
            }
        }

        if let Some(group) = &d.placement_group {
            if let Some(reason) = placement_group_capacity_error(group, self.selected_region()) {
                return Some(ApiError::field("placement_group", reason));
            }
        }

        if d.vpc.vpc_id.is_some() && !d.vpc.autoassign_ipv4 && !is_valid_vpc_ipv4(&d.vpc.ipv4) {
            return Some(ApiError::field(
                "ipv4.vpc",
                "Must be a valid IPv4 address, e.g. 192.168.2.0",
            ));
        }

        self.source_selection_error()
    }

    fn firewall_acknowledgement_required(&self) -> bool {
        self.context.flags.secure_vm_notices
            && self.draft.firewall_id.is_none()
            && !self.draft.submission.checked_firewall_authorization
    }

    /// Run the pre-flight gates and, when they pass, mark the form as
    /// submitting and hand back a snapshot of the request to send.
    pub fn begin_submit(
        &mut self,
        validator: &dyn PasswordValidator,
    ) -> Result<SubmitGate, SubmitError> {
        if self.in_flight.is_some() || self.draft.submission.form_is_submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        if let Some(error) = self.local_validation_error(validator) {
            tracing::debug!(field = ?error.field, reason = %error.reason, "Create form rejected locally");
            self.draft.submission.errors = Some(vec![error.clone()]);
            return Ok(SubmitGate::Rejected(vec![error]));
        }

        if self.firewall_acknowledgement_required() {
            self.draft.submission.show_firewall_authorization = true;
            return Ok(SubmitGate::AwaitingFirewallAcknowledgement);
        }

        let payload = self.payload();
        if let Err(errors) = validate_create_request(&payload, self.draft.create_type) {
            self.draft.submission.errors = Some(errors.clone());
            return Ok(SubmitGate::Rejected(errors));
        }

        let clone_source = match self.draft.create_type {
            CreateType::FromLinode => self.draft.linode_id,
            _ => None,
        };
        let event = CreateEvent::new(
            self.draft.create_type,
            &payload,
            self.draft.stackscript.as_ref().map(|s| s.label.as_str()),
            clone_source.and_then(|id| self.context.linode(id)),
            self.context.flags.secure_vm_notices,
        );

        self.attempts += 1;
        let ticket = SubmitTicket {
            form_id: self.id,
            attempt: self.attempts,
        };
        self.in_flight = Some(ticket);
        self.draft.submission.errors = None;
        self.draft.submission.form_is_submitting = true;
        Ok(SubmitGate::Ready(Box::new(SubmitRequest {
            ticket,
            payload,
            clone_source,
            signed_agreement: self.draft.submission.signed_agreement,
            event,
        })))
    }

    /// Record the outcome of a request started with [`begin_submit`].
    /// The submitting flag is cleared either way; a success discards the draft.
    ///
    /// A result whose ticket is not this form's in-flight request (the form
    /// was replaced, or the ticket is stale) is passed through untouched.
    ///
    /// [`begin_submit`]: CreateForm::begin_submit
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<Linode, ApiCallError>,
    ) -> Result<Linode, Vec<ApiError>> {
        if self.in_flight != Some(ticket) {
            tracing::debug!(?ticket, "Submit result belongs to another form; draft left as is");
            return result.map_err(ApiCallError::into_api_errors);
        }
        self.in_flight = None;
        self.draft.submission.form_is_submitting = false;
        match result {
            Ok(linode) => {
                self.reset();
                Ok(linode)
            }
            Err(err) => {
                let errors = err.into_api_errors();
                self.draft.submission.errors = Some(errors.clone());
                Err(errors)
            }
        }
    }
}

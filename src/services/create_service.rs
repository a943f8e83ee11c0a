use std::future::Future;

use serde::Serialize;

use crate::api::{self, ApiCallError};
use crate::models::{ApiError, CreateLinodeRequest, FeatureFlags, Linode};
use crate::wizard::{CreateContext, CreateForm, PasswordValidator, SubmitError, SubmitGate, SubmitRequest};

/// The remote side of a submission.
pub trait CreateBackend: Send + Sync {
    fn create_linode(
        &self,
        payload: &CreateLinodeRequest,
    ) -> impl Future<Output = Result<Linode, ApiCallError>> + Send;

    fn clone_linode(
        &self,
        source_linode_id: u64,
        payload: &CreateLinodeRequest,
    ) -> impl Future<Output = Result<Linode, ApiCallError>> + Send;

    fn sign_agreement(&self) -> impl Future<Output = Result<(), ApiCallError>> + Send;

    /// Nudge whatever watches account events after a create was accepted.
    fn check_for_new_events(&self) {}
}

/// [`CreateBackend`] talking to the real API.
#[derive(Clone)]
pub struct LinodeApiBackend {
    pub client: reqwest::Client,
    pub api_base_url: String,
    pub api_token: String,
}

impl CreateBackend for LinodeApiBackend {
    async fn create_linode(&self, payload: &CreateLinodeRequest) -> Result<Linode, ApiCallError> {
        api::create_linode(&self.client, &self.api_base_url, &self.api_token, payload).await
    }

    async fn clone_linode(
        &self,
        source_linode_id: u64,
        payload: &CreateLinodeRequest,
    ) -> Result<Linode, ApiCallError> {
        api::clone_linode(&self.client, &self.api_base_url, &self.api_token, source_linode_id, payload).await
    }

    async fn sign_agreement(&self) -> Result<(), ApiCallError> {
        api::sign_agreement(&self.client, &self.api_base_url, &self.api_token).await
    }

    fn check_for_new_events(&self) {
        tracing::debug!("Event polling reset after create");
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Created {
        linode: Linode,
        /// Where the browser goes next: the new instance's detail view.
        redirect: String,
        notice: String,
    },
    Rejected {
        errors: Vec<ApiError>,
    },
    AwaitingFirewallAcknowledgement,
}

/// Send the captured request to the create or clone endpoint.
pub async fn dispatch<B: CreateBackend>(
    backend: &B,
    request: &SubmitRequest,
) -> Result<Linode, ApiCallError> {
    match request.clone_source {
        Some(source) => backend.clone_linode(source, &request.payload).await,
        None => backend.create_linode(&request.payload).await,
    }
}

/// Follow-up work once the API accepted the request. A failed agreement
/// signature is logged and does not undo the create.
pub async fn after_create<B: CreateBackend>(
    backend: &B,
    request: &SubmitRequest,
    linode: Linode,
) -> SubmitOutcome {
    if request.signed_agreement {
        if let Err(e) = backend.sign_agreement().await {
            tracing::warn!(error = %e, "Failed to record EU agreement signature");
        }
    }

    request.event.emit();
    backend.check_for_new_events();

    tracing::info!(id = linode.id, label = %linode.label, "Linode created");
    SubmitOutcome::Created {
        notice: format!("Your Linode {} is being created.", linode.label),
        redirect: format!("/linodes/{}", linode.id),
        linode,
    }
}

/// Run the whole submission against `form`: gates, request, and bookkeeping.
///
/// Returns `Err` only when a submission is already in flight.
pub async fn submit<B: CreateBackend>(
    backend: &B,
    form: &mut CreateForm,
    validator: &dyn PasswordValidator,
) -> Result<SubmitOutcome, SubmitError> {
    let request = match form.begin_submit(validator)? {
        SubmitGate::Rejected(errors) => return Ok(SubmitOutcome::Rejected { errors }),
        SubmitGate::AwaitingFirewallAcknowledgement => {
            return Ok(SubmitOutcome::AwaitingFirewallAcknowledgement)
        }
        SubmitGate::Ready(request) => request,
    };

    let result = dispatch(backend, &request).await;
    match form.finish_submit(request.ticket, result) {
        Ok(linode) => Ok(after_create(backend, &request, linode).await),
        Err(errors) => Ok(SubmitOutcome::Rejected { errors }),
    }
}

/// Fetch the catalogs the form needs. Profile and agreements are optional
/// extras; if they fail the form treats the user as unrestricted and unsigned.
pub async fn load_create_context(
    client: &reqwest::Client,
    api_base_url: &str,
    api_token: &str,
    flags: FeatureFlags,
) -> Result<CreateContext, ApiCallError> {
    let (regions, images, types, linodes) = tokio::try_join!(
        api::load_regions(client, api_base_url, api_token),
        api::load_images(client, api_base_url, api_token),
        api::load_types(client, api_base_url, api_token),
        api::load_linodes(client, api_base_url, api_token),
    )?;

    let profile = api::load_profile(client, api_base_url, api_token)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load profile");
            Default::default()
        });
    let agreements = api::load_agreements(client, api_base_url, api_token)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load account agreements");
            Default::default()
        });

    Ok(CreateContext {
        regions,
        images,
        types,
        linodes,
        flags,
        profile,
        agreements,
    })
}

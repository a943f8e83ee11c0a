mod common;

use lcm::api::ApiCallError;
use lcm::models::{ApiError, PlacementGroup, PlacementGroupLimits, PlacementGroupMember, PlacementGroupType};
use lcm::services::{submit, SubmitOutcome};
use lcm::wizard::{
    CharacterClassPolicy, CreateForm, CreateType, CreationDraft, DraftUpdate, ErrorMap,
    SubmitError, SubmitGate, CREATE_ERROR_FIELDS, DEFAULT_ERROR_MESSAGE,
};

use common::{context, flags, linode, ready_form, Call, MockBackend, MockResponse};

fn created() -> MockBackend {
    MockBackend::new(MockResponse::Created(linode(99, "debian-us-east", "us-east")))
}

#[tokio::test]
async fn test_clone_without_source_is_rejected_locally() {
    let backend = created();
    let mut form = CreateForm::new(
        CreationDraft {
            create_type: CreateType::FromLinode,
            region: Some("us-east".to_string()),
            type_id: Some("g6-standard-2".to_string()),
            ..CreationDraft::default()
        },
        context(),
    );

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            errors: vec![ApiError::field("linode_id", "You must select a Linode to clone from")],
        }
    );
    assert!(backend.calls().is_empty());
    assert!(!form.draft().submission.form_is_submitting);
}

#[tokio::test]
async fn test_missing_source_messages_per_flow() {
    let cases = [
        (CreateType::FromBackup, "backup_id", "You must select a Backup."),
        (CreateType::FromStackScript, "stackscript_id", "You must select a StackScript."),
        (CreateType::FromApp, "stackscript_id", "You must select a Marketplace App."),
    ];
    for (create_type, field, reason) in cases {
        let backend = created();
        let mut form = ready_form(context());
        form.set_create_type(create_type);

        let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                errors: vec![ApiError::field(field, reason)]
            }
        );
        assert!(backend.calls().is_empty());
    }
}

#[tokio::test]
async fn test_successful_create_resets_draft() {
    let backend = created();
    let mut form = ready_form(context());
    form.set_tags(vec!["prod".to_string()]);

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Created { linode, redirect, notice } => {
            assert_eq!(linode.id, 99);
            assert_eq!(redirect, "/linodes/99");
            assert_eq!(notice, "Your Linode debian-us-east is being created.");
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Create(payload) => {
            assert_eq!(payload.label, "debian-us-east");
            assert_eq!(payload.region, "us-east");
            assert_eq!(payload.root_pass.as_deref(), Some("Sup3r-secret"));
            assert_eq!(payload.tags, vec!["prod".to_string()]);
        }
        other => panic!("unexpected call {:?}", other),
    }
    assert!(form.draft().tags.is_empty());
    assert!(!form.draft().submission.form_is_submitting);
}

#[tokio::test]
async fn test_clone_goes_to_clone_endpoint() {
    let backend = created();
    let mut form = CreateForm::new(
        CreationDraft {
            create_type: CreateType::FromLinode,
            type_id: Some("g6-standard-2".to_string()),
            ..CreationDraft::default()
        },
        context(),
    );
    form.set_linode(7);
    form.set_type("g6-standard-2".to_string());

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));

    match &backend.calls()[0] {
        Call::Clone(source, payload) => {
            assert_eq!(*source, 7);
            assert_eq!(payload.label, "web-1-clone");
            assert_eq!(payload.image, None);
            assert_eq!(payload.root_pass, None);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_signed_agreement_is_recorded_after_create() {
    let backend = created();
    let mut form = ready_form(context());
    form.apply(DraftUpdate::ToggleAgreement);

    submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], Call::SignAgreement);
}

#[tokio::test]
async fn test_api_errors_pass_through_and_map_to_fields() {
    let errors = vec![
        ApiError::field("region", "Region is not available."),
        ApiError::field("disk_size", "Too small."),
        ApiError::general("Account limit reached."),
    ];
    let backend = MockBackend::new(MockResponse::Rejected(errors.clone()));
    let mut form = ready_form(context());

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected { errors: errors.clone() });
    assert_eq!(form.draft().submission.errors.as_ref(), Some(&errors));
    assert!(!form.draft().submission.form_is_submitting);
    // Nothing was discarded on failure.
    assert_eq!(form.draft().region.as_deref(), Some("us-east"));

    let map = ErrorMap::from_errors(CREATE_ERROR_FIELDS, &errors);
    assert_eq!(map.get("region"), Some("Region is not available."));
    assert_eq!(map.get("disk_size"), None);
    assert_eq!(map.none.as_deref(), Some("Account limit reached."));
}

#[tokio::test]
async fn test_transport_failure_becomes_default_error() {
    let backend = MockBackend::new(MockResponse::Status(500));
    let mut form = ready_form(context());

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            errors: vec![ApiError::general(DEFAULT_ERROR_MESSAGE)]
        }
    );
    assert!(!form.draft().submission.form_is_submitting);
}

#[tokio::test]
async fn test_firewall_acknowledgement_gate() {
    let backend = created();
    let mut ctx = context();
    ctx.flags = flags(false, true);
    let mut form = ready_form(ctx);

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::AwaitingFirewallAcknowledgement);
    assert!(form.draft().submission.show_firewall_authorization);
    assert!(form.draft().submission.errors.is_none());
    assert!(backend.calls().is_empty());

    form.apply(DraftUpdate::ToggleFirewallAuthorization);
    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));
}

#[tokio::test]
async fn test_firewall_selection_skips_gate() {
    let backend = created();
    let mut ctx = context();
    ctx.flags = flags(false, true);
    let mut form = ready_form(ctx);
    form.apply(DraftUpdate::SetFirewall(Some(3)));

    let outcome = submit(&backend, &mut form, &CharacterClassPolicy::default())
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Created { .. }));
}

#[test]
fn test_weak_password_blocks_before_other_checks() {
    let mut form = ready_form(context());
    form.apply(DraftUpdate::SetPassword("short".to_string()));
    form.set_create_type(CreateType::FromBackup);

    let gate = form.begin_submit(&CharacterClassPolicy::default()).unwrap();
    match gate {
        SubmitGate::Rejected(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field.as_deref(), Some("root_pass"));
            assert_eq!(errors[0].reason, "Password must be between 7 and 128 characters.");
        }
        other => panic!("unexpected gate {:?}", other),
    }
}

#[test]
fn test_full_placement_group_is_rejected() {
    let mut ctx = context();
    ctx.regions[0].placement_group_limits = Some(PlacementGroupLimits {
        maximum_pgs_per_customer: Some(10),
        maximum_linodes_per_pg: Some(1),
    });
    let mut form = ready_form(ctx);
    form.apply(DraftUpdate::SetPlacementGroup(Some(PlacementGroup {
        id: 5,
        label: "pg-east".to_string(),
        region: "us-east".to_string(),
        placement_group_type: PlacementGroupType::AffinityLocal,
        members: vec![PlacementGroupMember {
            linode_id: 7,
            is_compliant: true,
        }],
    })));

    let gate = form.begin_submit(&CharacterClassPolicy::default()).unwrap();
    assert_eq!(
        gate,
        SubmitGate::Rejected(vec![ApiError::field(
            "placement_group",
            "pg-east (Affinity) doesn't have any capacity for this Linode."
        )])
    );
}

#[test]
fn test_invalid_vpc_ipv4_is_rejected() {
    let mut form = ready_form(context());
    form.set_vpc(Some(11));
    form.set_subnet(Some(22));
    form.toggle_autoassign_ipv4();
    form.apply(DraftUpdate::SetVpcIpv4("10.0.0".to_string()));

    let gate = form.begin_submit(&CharacterClassPolicy::default()).unwrap();
    assert_eq!(
        gate,
        SubmitGate::Rejected(vec![ApiError::field(
            "ipv4.vpc",
            "Must be a valid IPv4 address, e.g. 192.168.2.0"
        )])
    );
}

#[test]
fn test_schema_errors_are_collected() {
    let mut form = CreateForm::new(
        CreationDraft {
            image: Some("linode/debian11".to_string()),
            ..CreationDraft::default()
        },
        context(),
    );

    let gate = form.begin_submit(&CharacterClassPolicy::default()).unwrap();
    let SubmitGate::Rejected(errors) = gate else {
        panic!("expected rejection");
    };
    let fields: Vec<_> = errors.iter().filter_map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, vec!["region", "type", "root_pass"]);
    assert!(!form.draft().submission.form_is_submitting);
}

#[test]
fn test_second_submit_while_in_flight_is_refused() {
    let mut form = ready_form(context());
    let gate = form.begin_submit(&CharacterClassPolicy::default()).unwrap();
    assert!(matches!(gate, SubmitGate::Ready(_)));
    assert!(form.draft().submission.form_is_submitting);

    assert_eq!(
        form.begin_submit(&CharacterClassPolicy::default()),
        Err(SubmitError::AlreadySubmitting)
    );
}

#[test]
fn test_reset_while_in_flight_keeps_submit_locked() {
    let mut form = ready_form(context());
    let SubmitGate::Ready(request) = form.begin_submit(&CharacterClassPolicy::default()).unwrap() else {
        panic!("expected ready");
    };

    form.apply(DraftUpdate::Reset);
    assert!(form.draft().submission.form_is_submitting);
    form.set_create_type(CreateType::FromImage);
    form.set_image(Some("linode/debian11".to_string()));
    form.set_type("g6-nanode-1".to_string());
    form.apply(DraftUpdate::SetPassword("Sup3r-secret".to_string()));
    form.set_region("us-east".to_string());
    assert_eq!(
        form.begin_submit(&CharacterClassPolicy::default()),
        Err(SubmitError::AlreadySubmitting)
    );

    let created = form.finish_submit(request.ticket, Ok(linode(99, "debian-us-east", "us-east")));
    assert!(created.is_ok());
    assert!(!form.draft().submission.form_is_submitting);
    assert!(matches!(
        form.begin_submit(&CharacterClassPolicy::default()),
        Ok(SubmitGate::Rejected(_))
    ));
}

#[test]
fn test_late_result_leaves_replacement_form_alone() {
    let mut old = ready_form(context());
    let SubmitGate::Ready(request) = old.begin_submit(&CharacterClassPolicy::default()).unwrap() else {
        panic!("expected ready");
    };

    let mut fresh = ready_form(context());
    fresh.apply(DraftUpdate::SetLabel("my-new-box".to_string()));
    let created = fresh.finish_submit(request.ticket, Ok(linode(99, "debian-us-east", "us-east")));
    assert_eq!(created.map(|l| l.id), Ok(99));
    assert_eq!(fresh.draft().custom_label.as_deref(), Some("my-new-box"));
    assert_eq!(fresh.label(), "my-new-box");

    let failed = fresh.finish_submit(request.ticket, Err(ApiCallError::Status(500)));
    assert_eq!(failed.unwrap_err()[0].reason, DEFAULT_ERROR_MESSAGE);
    assert_eq!(fresh.draft().submission.errors, None);
    assert!(old.draft().submission.form_is_submitting);
}

#[test]
fn test_ticket_is_spent_after_finish() {
    let mut form = ready_form(context());
    let SubmitGate::Ready(request) = form.begin_submit(&CharacterClassPolicy::default()).unwrap() else {
        panic!("expected ready");
    };
    let _ = form.finish_submit(request.ticket, Err(ApiCallError::Status(500)));
    assert!(form.draft().submission.errors.is_some());

    form.apply(DraftUpdate::SetTags(vec!["prod".to_string()]));
    let _ = form.finish_submit(request.ticket, Ok(linode(99, "debian-us-east", "us-east")));
    assert_eq!(form.draft().tags.len(), 1);
}

#[test]
fn test_check_validation_shows_api_awareness() {
    let mut form = ready_form(context());
    let payload = form.check_validation().unwrap();
    assert_eq!(payload.label, "debian-us-east");
    assert!(form.draft().submission.show_api_awareness_modal);
    assert!(!form.draft().submission.form_is_submitting);

    form.set_region(String::new());
    assert!(form.check_validation().is_err());
}

#[test]
fn test_creation_event_fields() {
    let mut ctx = context();
    ctx.flags = flags(false, true);
    let mut form = ready_form(ctx);
    form.apply(DraftUpdate::SetFirewall(Some(3)));

    let SubmitGate::Ready(request) = form.begin_submit(&CharacterClassPolicy::default()).unwrap() else {
        panic!("expected ready");
    };
    assert_eq!(request.event.action, "image");
    assert_eq!(request.event.form_create_type, "OS");
    assert_eq!(request.event.label, "linode/debian11");
    assert_eq!(request.event.secure_vm_compliant, Some(true));
    assert_eq!(request.clone_source, None);
}

//! End-to-end access scenarios: requests flow through the gate and, when
//! allowed, into the CRUD service, the same shape a routing layer drives.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use packlist_access::{
    AccessIdentity, AccessRequest, EDIT_TOKEN_PARAM, Method, PUBLIC_LINK_DENY_REASON,
};
use packlist_gateway::AccessGate;
use packlist_integration_tests::{onboarding_draft, service_with_files};

#[test]
fn scenario_table_from_the_permission_model() {
    let gate = AccessGate::new();

    // Public link: viewing is fine at any depth.
    assert!(
        gate.check(&AccessRequest::new(Method::Get, "/checklists/public/abc/categories"))
            .is_ok()
    );

    // Public link: file upload is the one permitted POST.
    assert!(
        gate.check(&AccessRequest::new(
            Method::Post,
            "/checklists/public/abc/items/5/uploads/"
        ))
        .is_ok()
    );

    // Edit-scoped mutation passes unconditionally.
    assert!(
        gate.check(
            &AccessRequest::new(Method::Put, "/checklists/edit/xyz/categories/5")
                .with_query_param(EDIT_TOKEN_PARAM, "xyz")
        )
        .is_ok()
    );

    // ID-addressed mutation with a token in the query passes.
    assert!(
        gate.check(
            &AccessRequest::new(Method::Put, "/categories/5").with_query_string("edit_token=xyz")
        )
        .is_ok()
    );

    // ID-addressed mutation with no query string is refused, naming the
    // missing parameter in the JSON body.
    let denied = gate
        .check(&AccessRequest::new(Method::Delete, "/items/7"))
        .unwrap_err();
    assert_eq!(denied.status(), 403);
    let body: serde_json::Value = serde_json::from_str(&denied.to_json()).unwrap();
    assert!(
        body["detail"].as_str().unwrap().contains("edit_token"),
        "body was: {body}"
    );

    // Checklist creation needs no token; it's how tokens come to exist.
    assert!(gate.check(&AccessRequest::new(Method::Post, "/checklists/")).is_ok());
}

#[tokio::test]
async fn create_flow_through_the_gate() {
    let (service, _files) = service_with_files();
    let gate = AccessGate::new();

    let request = AccessRequest::new(Method::Post, "/checklists/");
    let created = gate
        .dispatch(request, |_request, _identity| {
            let service = service.clone();
            async move { service.create(onboarding_draft()).await }
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.categories.len(), 2);
    assert!(service.get(created.id).await.is_ok());
}

#[tokio::test]
async fn denied_mutation_never_touches_the_store() {
    let (service, _files) = service_with_files();
    let gate = AccessGate::new();
    let checklist = service.create(onboarding_draft()).await.unwrap();
    let item_id = checklist.categories[0].items[0].id;

    let calls = Arc::new(AtomicUsize::new(0));
    let request = AccessRequest::new(Method::Delete, "/items/7");
    let result = gate
        .dispatch(request, |_request, _identity| {
            let service = service.clone();
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                service.delete_item(item_id).await
            }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    // The item is still there: no side effects happened for the denied request.
    assert!(service.list_uploads(item_id).await.is_ok());
}

#[tokio::test]
async fn public_holder_can_upload_but_not_restructure() {
    let (service, _files) = service_with_files();
    let gate = AccessGate::new();
    let checklist = service.create(onboarding_draft()).await.unwrap();
    let item_id = checklist.categories[0].items[0].id;
    let public_link = checklist.public_link.as_str();

    // Upload through the public link.
    let upload_path = format!("/checklists/public/{public_link}/items/{item_id}/uploads/");
    let uploaded = gate
        .dispatch(
            AccessRequest::new(Method::Post, upload_path),
            |_request, _identity| {
                let service = service.clone();
                async move {
                    service
                        .upload_file(item_id, "passport.pdf", b"bytes", Some("carol".to_string()))
                        .await
                }
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(uploaded.uploader.as_deref(), Some("carol"));

    // Structural deletion through the public link is refused at the gate.
    let delete_path = format!("/checklists/public/{public_link}/items/{item_id}");
    let denied = gate
        .check(&AccessRequest::new(Method::Delete, delete_path))
        .unwrap_err();
    assert_eq!(denied.detail(), PUBLIC_LINK_DENY_REASON);
}

#[tokio::test]
async fn handler_layer_verifies_token_ownership() {
    // The gate checks presence only; a handler following the layering
    // contract rejects a token that doesn't own the target.
    let (service, _files) = service_with_files();
    let gate = AccessGate::new();
    let ours = service.create(onboarding_draft()).await.unwrap();
    let theirs = service
        .create(packlist_core::ChecklistDraft::new("Someone else's"))
        .await
        .unwrap();

    let request = AccessRequest::new(Method::Put, format!("/checklists/{}", ours.id.0))
        .with_query_param(EDIT_TOKEN_PARAM, theirs.edit_token.as_str());
    let identity = gate.check(&request).unwrap();
    assert_eq!(identity, AccessIdentity::EditToken);

    let verification = service.verify_edit_token(ours.id, &theirs.edit_token).await;
    assert!(verification.is_err());

    service
        .verify_edit_token(ours.id, &ours.edit_token)
        .await
        .unwrap();
}

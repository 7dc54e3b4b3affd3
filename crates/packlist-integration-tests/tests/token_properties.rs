//! Share-token properties: uniqueness at scale and clone freshness.

use std::collections::HashSet;

use packlist_access::{issue_distinct_pair, issue_token};
use packlist_integration_tests::{onboarding_draft, service_with_files};

#[test]
fn ten_thousand_issuances_never_collide() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(issue_token()), "token collision");
    }
}

#[test]
fn pairs_are_always_distinct() {
    for _ in 0..1_000 {
        let (public_link, edit_token) = issue_distinct_pair();
        assert_ne!(public_link, edit_token);
    }
}

#[tokio::test]
async fn checklists_never_share_tokens() {
    let (service, _files) = service_with_files();
    let mut seen = HashSet::new();
    for _ in 0..50 {
        let checklist = service.create(onboarding_draft()).await.unwrap();
        assert!(seen.insert(checklist.public_link.clone()));
        assert!(seen.insert(checklist.edit_token.clone()));
    }
}

#[tokio::test]
async fn clone_mints_tokens_unrelated_to_the_source() {
    let (service, _files) = service_with_files();
    let source = service.create(onboarding_draft()).await.unwrap();
    let clone = service.clone_checklist(source.id, None).await.unwrap();

    assert_ne!(clone.public_link, source.public_link);
    assert_ne!(clone.edit_token, source.edit_token);
    assert_ne!(clone.public_link, source.edit_token);
    assert_ne!(clone.edit_token, source.public_link);

    // Both checklists stay reachable through their own tokens.
    assert_eq!(
        service.get_by_public_link(&source.public_link).await.unwrap().id,
        source.id
    );
    assert_eq!(
        service.get_by_public_link(&clone.public_link).await.unwrap().id,
        clone.id
    );
}

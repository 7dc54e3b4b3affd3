//! Cascade-delete behavior across the service and file store.

use packlist_core::CategoryPatch;
use packlist_integration_tests::{onboarding_draft, service_with_files};
use packlist_store::{upload_key, FileStore};

#[tokio::test]
async fn deleting_a_checklist_removes_every_stored_file() {
    let (service, files) = service_with_files();
    let checklist = service.create(onboarding_draft()).await.unwrap();

    let passport_item = checklist.categories[0].items[0].id;
    let certificates_item = checklist.categories[0].items[1].id;
    let offer_item = checklist.categories[1].items[0].id;

    service
        .upload_file(passport_item, "passport.pdf", b"a", None)
        .await
        .unwrap();
    service
        .upload_file(certificates_item, "degree.pdf", b"b", None)
        .await
        .unwrap();
    service
        .upload_file(certificates_item, "award.pdf", b"c", None)
        .await
        .unwrap();
    service
        .upload_file(offer_item, "offer.pdf", b"d", None)
        .await
        .unwrap();

    let keys = [
        upload_key(passport_item, "passport.pdf"),
        upload_key(certificates_item, "degree.pdf"),
        upload_key(certificates_item, "award.pdf"),
        upload_key(offer_item, "offer.pdf"),
    ];
    for key in &keys {
        assert!(files.exists(key).await, "{key} should exist before delete");
    }

    service.delete(checklist.id).await.unwrap();

    for key in &keys {
        assert!(!files.exists(key).await, "{key} should be gone after delete");
    }
}

#[tokio::test]
async fn deleting_a_category_only_cascades_to_its_own_subtree() {
    let (service, files) = service_with_files();
    let checklist = service.create(onboarding_draft()).await.unwrap();

    let identity_category = checklist.categories[0].id;
    let passport_item = checklist.categories[0].items[0].id;
    let offer_item = checklist.categories[1].items[0].id;

    service
        .upload_file(passport_item, "passport.pdf", b"a", None)
        .await
        .unwrap();
    service
        .upload_file(offer_item, "offer.pdf", b"b", None)
        .await
        .unwrap();

    service.delete_category(identity_category).await.unwrap();

    assert!(!files.exists(&upload_key(passport_item, "passport.pdf")).await);
    assert!(files.exists(&upload_key(offer_item, "offer.pdf")).await);

    let remaining = service.get(checklist.id).await.unwrap();
    assert_eq!(remaining.categories.len(), 1);
    assert_eq!(remaining.categories[0].name, "Contracts");
}

#[tokio::test]
async fn replacing_items_on_update_cleans_their_files() {
    let (service, files) = service_with_files();
    let checklist = service.create(onboarding_draft()).await.unwrap();

    let identity_category = checklist.categories[0].id;
    let passport_item = checklist.categories[0].items[0].id;
    service
        .upload_file(passport_item, "passport.pdf", b"a", None)
        .await
        .unwrap();

    service
        .update_category(
            identity_category,
            CategoryPatch {
                name: "Identity".to_string(),
                items: Some(Vec::new()),
            },
        )
        .await
        .unwrap();

    assert!(!files.exists(&upload_key(passport_item, "passport.pdf")).await);
    let updated = service.get(checklist.id).await.unwrap();
    assert!(updated.categories[0].items.is_empty());
}

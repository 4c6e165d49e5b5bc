//! Tests for the contact service.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ports::MockContactRepository;
use crate::domain::{ErrorCode, ValidationErrorKind};

fn make_service(repo: MockContactRepository) -> ContactService<MockContactRepository> {
    ContactService::new(Arc::new(repo))
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .expect("valid timestamp")
}

fn contact(id: u64, details: ContactDetails) -> Contact {
    let id = ContactId::new(id).expect("non-zero id");
    Contact::new(id, details, epoch(), epoch())
}

fn valid_details() -> ContactDetails {
    ContactDetails::new("100", "Ana Pérez", "ana@gmail.com", "9611234567")
}

#[tokio::test]
async fn list_contacts_delegates_to_find_all() {
    let stored = vec![contact(1, valid_details()), contact(2, valid_details())];
    let expected = stored.clone();
    let mut repo = MockContactRepository::new();
    repo.expect_find_all().times(1).return_once(move || Ok(stored));

    let contacts = make_service(repo).list_contacts().await.expect("list succeeds");
    assert_eq!(contacts, expected);
}

#[rstest]
#[case(
    ContactRepositoryError::not_found(ContactId::FIRST),
    ErrorCode::NotFound
)]
#[case(
    ContactRepositoryError::connection("store offline"),
    ErrorCode::ServiceUnavailable
)]
#[case(ContactRepositoryError::query("lock poisoned"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_errors_map_to_domain_codes(
    #[case] error: ContactRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockContactRepository::new();
    repo.expect_find_by_id()
        .with(eq(ContactId::FIRST))
        .times(1)
        .return_once(move |_| Err(error));

    let err = make_service(repo)
        .get_contact(ContactId::FIRST)
        .await
        .expect_err("lookup fails");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn search_resolves_field_name_before_delegating() {
    let found = vec![contact(3, valid_details())];
    let expected = found.clone();
    let mut repo = MockContactRepository::new();
    repo.expect_search()
        .withf(|field, value| *field == ContactField::Name && value == "an")
        .times(1)
        .return_once(move |_, _| Ok(found));

    let contacts = make_service(repo)
        .search_contacts("name", "an")
        .await
        .expect("search succeeds");
    assert_eq!(contacts, expected);
}

#[tokio::test]
async fn search_with_unknown_field_is_empty_without_touching_store() {
    let mut repo = MockContactRepository::new();
    repo.expect_search().never();

    let contacts = make_service(repo)
        .search_contacts("address", "main street")
        .await
        .expect("search succeeds");
    assert!(contacts.is_empty());
}

#[tokio::test]
async fn validate_contacts_pairs_each_contact_with_its_own_errors() {
    let bad_phone = ContactDetails {
        phone: "5512345678".to_owned(),
        ..valid_details()
    };
    let bad_key = ContactDetails {
        client_key: String::new(),
        ..valid_details()
    };
    let stored = vec![
        contact(1, valid_details()),
        contact(2, bad_phone),
        contact(3, bad_key),
    ];
    let mut repo = MockContactRepository::new();
    repo.expect_find_all().times(1).return_once(move || Ok(stored));

    let results = make_service(repo)
        .validate_contacts()
        .await
        .expect("validation succeeds");

    assert_eq!(results.len(), 3);
    let summary: Vec<_> = results
        .iter()
        .map(|result| {
            (
                result.contact().id().get(),
                result.errors().iter().map(|e| e.kind).collect::<Vec<_>>(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, vec![]),
            (2, vec![ValidationErrorKind::InvalidAreaCode]),
            (3, vec![ValidationErrorKind::Required]),
        ]
    );
    assert!(results[0].is_valid());
    assert!(!results[1].is_valid());
}

#[tokio::test]
async fn validate_contacts_propagates_store_failures() {
    let mut repo = MockContactRepository::new();
    repo.expect_find_all()
        .times(1)
        .return_once(|| Err(ContactRepositoryError::connection("down")));

    let err = make_service(repo)
        .validate_contacts()
        .await
        .expect_err("store failure");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn update_contact_surfaces_not_found() {
    let id = ContactId::new(99).expect("non-zero id");
    let mut repo = MockContactRepository::new();
    repo.expect_update()
        .withf(move |candidate, _| *candidate == id)
        .times(1)
        .return_once(move |_, _| Err(ContactRepositoryError::not_found(id)));

    let err = make_service(repo)
        .update_contact(id, valid_details())
        .await
        .expect_err("missing contact");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.details(), Some(&serde_json::json!({ "id": 99 })));
}

#[tokio::test]
async fn save_batch_forwards_contacts_in_order() {
    let batch: Vec<NewContact> = ["1", "2"]
        .into_iter()
        .map(|key| {
            NewContact::from(ContactDetails {
                client_key: key.to_owned(),
                ..valid_details()
            })
        })
        .collect();
    let expected_keys = vec!["1".to_owned(), "2".to_owned()];
    let mut repo = MockContactRepository::new();
    repo.expect_insert_batch()
        .withf(move |contacts| {
            contacts
                .iter()
                .map(|c| c.details.client_key.clone())
                .eq(expected_keys.iter().cloned())
        })
        .times(1)
        .return_once(|contacts| {
            Ok(contacts
                .into_iter()
                .zip(1..)
                .map(|(new, id)| contact(id, new.details))
                .collect())
        });

    let saved = make_service(repo).save_batch(batch).await.expect("batch saved");
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].details().client_key, "2");
}

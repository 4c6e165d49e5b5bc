//! End-to-end behaviour of the contacts API over the in-memory store.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use contacts_backend::TraceId;
use contacts_backend::inbound::spreadsheet::{XLSX_CONTENT_TYPE, read_contacts};
use support::{contacts_app, upload_request, workbook};

const ROWS: [[&str; 4]; 4] = [
    ["100", "Ana Pérez", "ana@gmail.com", "961 123 4567"],
    ["101", "Luis Gómez", "luis@fake.com", "961-123-456"],
    ["10a", "O'Brien J.", "obrien@outlook.com", "(994) 123-4567"],
    ["103", "María López", "maria@yahoo.com", "5551234567"],
];

#[actix_web::test]
async fn imported_workbook_flows_through_every_endpoint() {
    let app = test::init_service(contacts_app(50)).await;

    // Import
    let res = test::call_service(&app, upload_request(&workbook(&ROWS)).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["count"], json!(4));

    // List with pagination
    let req = test::TestRequest::get()
        .uri("/api/v1/contacts?page=2&pageSize=3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["name"], json!("María López"));
    assert_eq!(
        body["pagination"],
        json!({"page": 2, "pageSize": 3, "totalItems": 4, "totalPages": 2})
    );
    assert!(body["links"]["prev"].is_string());

    // Phone normalisation happened on import
    let req = test::TestRequest::get().uri("/api/v1/contacts/3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["phone"], json!("9941234567"));

    // Validation
    let req = test::TestRequest::get()
        .uri("/api/v1/contacts/validate")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let verdicts: Vec<_> = body["data"]
        .as_array()
        .expect("data")
        .iter()
        .map(|item| item["isValid"].as_bool().expect("isValid"))
        .collect();
    assert_eq!(verdicts, [true, false, false, false]);
    let luis_kinds: Vec<_> = body["data"][1]["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .map(|error| error["type"].as_str().expect("type").to_owned())
        .collect();
    assert_eq!(luis_kinds, ["INVALID_DOMAIN", "INVALID_LENGTH"]);
    assert_eq!(body["data"][2]["errors"][0]["field"], json!("client_key"));
    assert_eq!(body["data"][3]["errors"][0]["type"], json!("INVALID_AREA_CODE"));

    // Fix the invalid contact, then confirm through search
    let req = test::TestRequest::put()
        .uri("/api/v1/contacts/2")
        .set_json(json!({
            "clientKey": "101",
            "name": "Luis Gómez",
            "email": "luis@gmail.com",
            "phone": "9611234560"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/contacts/search?field=email&value=GMAIL")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<_> = body["data"]
        .as_array()
        .expect("data")
        .iter()
        .map(|item| item["id"].as_u64().expect("id"))
        .collect();
    assert_eq!(ids, [1, 2]);

    // Export and read back
    let req = test::TestRequest::get()
        .uri("/api/v1/contacts/download")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some(XLSX_CONTENT_TYPE)
    );
    let bytes = test::read_body(res).await;
    let sheet = read_contacts(&bytes, 100).expect("export reads back");
    assert_eq!(sheet.contacts.len(), 4);
    assert_eq!(sheet.contacts[1].email, "luis@gmail.com");
}

#[actix_web::test]
async fn import_cap_limits_stored_contacts() {
    let app = test::init_service(contacts_app(2)).await;

    let res = test::call_service(&app, upload_request(&workbook(&ROWS)).to_request()).await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["count"], json!(2));

    let req = test::TestRequest::get().uri("/api/v1/contacts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["totalItems"], json!(2));
}

#[actix_web::test]
async fn repeated_imports_keep_assigning_fresh_ids() {
    let app = test::init_service(contacts_app(50)).await;
    let rows = &ROWS[..1];

    for _ in 0..2 {
        let res = test::call_service(&app, upload_request(&workbook(rows)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/v1/contacts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], json!(1));
    assert_eq!(body["data"][1]["id"], json!(2));
}

#[rstest]
#[case("/api/v1/contacts/99", StatusCode::NOT_FOUND, "not_found")]
#[case("/api/v1/contacts/0", StatusCode::BAD_REQUEST, "invalid_request")]
#[case("/api/v1/contacts/download", StatusCode::BAD_REQUEST, "invalid_request")]
#[case("/api/v1/contacts/search?field=name", StatusCode::BAD_REQUEST, "invalid_request")]
#[actix_web::test]
async fn failures_share_one_envelope_with_trace_id(
    #[case] uri: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = test::init_service(contacts_app(50)).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), status);
    let header = res
        .headers()
        .get("trace-id")
        .and_then(|v| v.to_str().ok())
        .expect("trace-id header")
        .to_owned();
    header.parse::<TraceId>().expect("trace id is a UUID");

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!(code));
    assert_eq!(body["traceId"], json!(header));
    assert!(body["message"].is_string());
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_probes_report_ok(#[case] uri: &str) {
    let app = test::init_service(contacts_app(50)).await;

    let req = test::TestRequest::get().uri(uri).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

//! Tests for `CertificateController` session behaviour: state transitions,
//! form clearing, runtime base URL changes, and duplicate-submission handling.

use std::sync::Arc;
use std::time::Duration;

use certverify_client::{CertApiError, CertificateController, ClientConfig};
use certverify_core::{CertificateForm, FailureKind, FormField, OperationState, ViewField};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_controller(mock_server: &MockServer) -> CertificateController {
    let config = ClientConfig::local_mock(&mock_server.uri()).unwrap();
    CertificateController::new(&config).unwrap()
}

fn fill_form(controller: &CertificateController) {
    controller.set_form_field(FormField::Id, "  X1 ");
    controller.set_form_field(FormField::Name, " Bob");
    controller.set_form_field(FormField::Cgpa, "3.5 ");
}

/// Poll until `check` holds, giving up after two seconds.
async fn wait_until(check: impl Fn() -> bool) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn successful_lookup_settles_with_view() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/SUST-2020-0001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "SUST-2020-0001",
            "studentName": "Jane Doe",
            "issuedAt": "2020-09-15"
        })))
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    controller.set_lookup_input(" SUST-2020-0001 ");
    controller.submit_lookup().await.unwrap();

    let state = controller.lookup_state();
    let cert = state.success().expect("lookup should have succeeded");
    assert_eq!(cert.view.display(ViewField::Name), "Jane Doe");
    assert_eq!(cert.view.display(ViewField::IssueDate), "2020-09-15");
    // Input is kept for resubmission.
    assert_eq!(controller.lookup_input(), " SUST-2020-0001 ");
}

#[tokio::test]
async fn failed_lookup_replaces_previous_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/X1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "X1" })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/certificates/GONE"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    controller.lookup("X1").await.unwrap();
    assert!(controller.lookup_state().success().is_some());

    controller.lookup("GONE").await.unwrap_err();
    match controller.lookup_state() {
        OperationState::Failed(failure) => {
            assert_eq!(failure.message, "Not found");
            assert_eq!(failure.kind, FailureKind::Remote { status: 404 });
        }
        other => panic!("expected Failed, got: {other:?}"),
    }
}

#[tokio::test]
async fn successful_registration_clears_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/certificates"))
        .and(header("authorization", "Bearer admin"))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"status":"created"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    controller.set_token(Some(" admin ".into()));
    fill_form(&controller);

    let message = controller.submit_registration().await.unwrap();
    assert_eq!(message, r#"{"status":"created"}"#);
    assert_eq!(controller.form(), CertificateForm::default());
    assert_eq!(
        controller.registration_state().success().map(String::as_str),
        Some(r#"{"status":"created"}"#)
    );

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["id"], "X1");
    assert_eq!(body["name"], "Bob");
    assert_eq!(body["cgpa"], "3.5");
    assert_eq!(body["organization"], "");
}

#[tokio::test]
async fn failed_registration_keeps_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("ledger write failed"))
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    fill_form(&controller);
    let before = controller.form();

    let err = controller.submit_registration().await.unwrap_err();
    assert_eq!(err.to_string(), "ledger write failed");
    assert_eq!(controller.form(), before);
    assert_eq!(
        controller.registration_state().failure().map(|f| f.kind),
        Some(FailureKind::Remote { status: 500 })
    );
}

#[tokio::test]
async fn registration_validation_failure_keeps_form_and_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    controller.set_form_field(FormField::Name, "Bob");

    let err = controller.submit_registration().await.unwrap_err();
    assert_eq!(err.to_string(), "'id' and 'name' are required.");
    assert_eq!(controller.form().name, "Bob");
    assert_eq!(
        controller.registration_state().failure().map(|f| f.kind),
        Some(FailureKind::Validation)
    );
}

#[tokio::test]
async fn unreachable_service_settles_as_network_failure() {
    let config = ClientConfig::local_mock("http://127.0.0.1:1").unwrap();
    let controller = CertificateController::new(&config).unwrap();
    fill_form(&controller);

    controller.submit_registration().await.unwrap_err();
    assert_eq!(
        controller.registration_state().failure().map(|f| f.kind),
        Some(FailureKind::Network)
    );
    assert!(!controller.form().is_empty());
}

#[tokio::test]
async fn api_base_change_applies_to_next_submission() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "X1" })))
        .expect(0)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "X1" })))
        .expect(1)
        .mount(&second)
        .await;

    let controller = test_controller(&first);
    controller.set_api_base(&format!("{}/", second.uri())).unwrap();
    controller.lookup("X1").await.unwrap();
}

#[tokio::test]
async fn duplicate_lookup_while_pending_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "SLOW" }))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = Arc::new(test_controller(&mock_server));
    controller.set_lookup_input("SLOW");

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_lookup().await })
    };
    wait_until(|| controller.lookup_state().is_pending()).await;

    let err = controller.submit_lookup().await.unwrap_err();
    assert!(matches!(err, CertApiError::Busy { operation: "lookup" }));
    assert!(controller.lookup_state().is_pending());

    in_flight.await.unwrap().unwrap();
    assert_eq!(
        controller
            .lookup_state()
            .success()
            .map(|c| c.view.display(ViewField::Id).to_string()),
        Some("SLOW".to_string())
    );
}

#[tokio::test]
async fn lookup_and_registration_are_tracked_independently() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "X1" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = Arc::new(test_controller(&mock_server));
    controller.set_lookup_input("X1");
    fill_form(&controller);

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_lookup().await })
    };
    wait_until(|| controller.lookup_state().is_pending()).await;

    controller.submit_registration().await.unwrap();
    in_flight.await.unwrap().unwrap();
}

#[tokio::test]
async fn dropped_lookup_is_cancelled_and_resubmission_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/certificates/SLOW"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "SLOW" }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1..=2)
        .mount(&mock_server)
        .await;

    let controller = test_controller(&mock_server);
    controller.set_lookup_input("SLOW");

    let timed_out = tokio::time::timeout(Duration::from_millis(50), controller.submit_lookup())
        .await
        .is_err();
    assert!(timed_out);
    assert_eq!(
        controller.lookup_state().failure().map(|f| f.kind),
        Some(FailureKind::Cancelled)
    );

    controller.submit_lookup().await.unwrap();
    assert!(controller.lookup_state().success().is_some());
}

#[tokio::test]
async fn aborted_registration_keeps_form_and_frees_the_operation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let controller = Arc::new(test_controller(&mock_server));
    fill_form(&controller);
    let before = controller.form();

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_registration().await })
    };
    wait_until(|| controller.registration_state().is_pending()).await;
    in_flight.abort();
    assert!(in_flight.await.unwrap_err().is_cancelled());

    assert_eq!(
        controller.registration_state().failure().map(|f| f.kind),
        Some(FailureKind::Cancelled)
    );
    assert_eq!(controller.form(), before);
}

#[tokio::test]
async fn duplicate_registration_while_pending_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/certificates"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = Arc::new(test_controller(&mock_server));
    fill_form(&controller);
    let before = controller.form();

    let in_flight = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.submit_registration().await })
    };
    wait_until(|| controller.registration_state().is_pending()).await;

    let err = controller.submit_registration().await.unwrap_err();
    assert!(matches!(
        err,
        CertApiError::Busy {
            operation: "registration"
        }
    ));
    assert!(controller.registration_state().is_pending());
    assert_eq!(controller.form(), before);

    in_flight.await.unwrap().unwrap();
    assert!(controller.form().is_empty());
}

//! External payment flow against a mock API server

mod common;

use common::*;
use mockito::{Matcher, Server};
use rust_decimal::Decimal;
use serde_json::json;
use yandex_money::{
    ExternalPayment, InstanceIdResponse, PaymentOptions, ProcessPaymentResponse,
    YandexMoneyError, STATUS_EXT_AUTH_REQUIRED,
};

const CLIENT_ID: &str = "1B2A2C0B1B3C7A8D9F";
const INSTANCE_ID: &str = "BA8C0C2B1C7A9FAB3C";

async fn mock_instance_id(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/instance-id")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Exact(format!("client_id={}", CLIENT_ID)))
        .with_status(200)
        .with_body(json!({"status": "success", "instance_id": INSTANCE_ID}).to_string())
        .create_async()
        .await
}

fn p2p_request() -> PaymentOptions {
    PaymentOptions::p2p("410011161616877", Decimal::new(1, 2))
        .with_comment("test payment comment")
        .with_label("testPayment")
}

#[tokio::test]
async fn test_external_payment_flow_through_wallet() {
    let mut server = Server::new_async().await;
    let instance_mock = mock_instance_id(&mut server).await;
    let request_mock = server
        .mock("POST", "/api/request-external-payment")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("instance_id".to_string(), INSTANCE_ID.to_string()),
            Matcher::UrlEncoded("pattern_id".to_string(), "p2p".to_string()),
            Matcher::UrlEncoded("amount_due".to_string(), "0.01".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({"status": "success", "request_id": "ext-req-1"}).to_string())
        .create_async()
        .await;
    let process_mock = server
        .mock("POST", "/api/process-external-payment")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("instance_id".to_string(), INSTANCE_ID.to_string()),
            Matcher::UrlEncoded("request_id".to_string(), "ext-req-1".to_string()),
            Matcher::UrlEncoded(
                "ext_auth_success_uri".to_string(),
                "http://localhost:8000".to_string(),
            ),
            Matcher::UrlEncoded(
                "ext_auth_fail_uri".to_string(),
                "http://localhost:8000".to_string(),
            ),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "status": "ext_auth_required",
                "acs_uri": "https://demomoney.yandex.ru/cardauth",
                "acs_params": {"cps_context_id": "ctx", "paymentType": "FC"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let wallet = anonymous_wallet(&server);

    let instance: InstanceIdResponse = wallet
        .get_instance_id(CLIENT_ID)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(instance.status, "success");
    let instance_id = instance.instance_id.unwrap();

    let requested = wallet
        .request_external_payment(&instance_id, &p2p_request())
        .await
        .unwrap();
    assert_eq!(requested.api_status(), Some("success"));
    let request_id = requested.payload["request_id"].as_str().unwrap().to_string();

    let processed = wallet
        .process_external_payment(
            &instance_id,
            &PaymentOptions::process(request_id)
                .with_ext_auth_uris("http://localhost:8000", "http://localhost:8000"),
        )
        .await
        .unwrap();

    assert_eq!(processed.api_status(), Some(STATUS_EXT_AUTH_REQUIRED));
    let processed: ProcessPaymentResponse = processed.json().unwrap();
    assert!(processed.acs_uri.is_some());

    instance_mock.assert_async().await;
    request_mock.assert_async().await;
    process_mock.assert_async().await;
}

#[tokio::test]
async fn test_register_binds_instance_id() {
    let mut server = Server::new_async().await;
    let instance_mock = mock_instance_id(&mut server).await;
    let request_mock = server
        .mock("POST", "/api/request-external-payment")
        .match_body(Matcher::UrlEncoded(
            "instance_id".to_string(),
            INSTANCE_ID.to_string(),
        ))
        .with_status(200)
        .with_body(json!({"status": "success", "request_id": "r"}).to_string())
        .create_async()
        .await;

    let payment = ExternalPayment::register(CLIENT_ID, test_transport(&server))
        .await
        .unwrap();
    assert_eq!(payment.instance_id(), INSTANCE_ID);

    let response = payment.request(&p2p_request()).await.unwrap();
    assert_eq!(response.payload["request_id"], "r");

    instance_mock.assert_async().await;
    request_mock.assert_async().await;
}

#[tokio::test]
async fn test_register_refused() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/instance-id")
        .with_status(200)
        .with_body(json!({"status": "refused", "error": "illegal_param_client_id"}).to_string())
        .create_async()
        .await;

    let err = ExternalPayment::register("bad", test_transport(&server))
        .await
        .unwrap_err();

    match err {
        YandexMoneyError::Refused { error } => assert_eq!(error, "illegal_param_client_id"),
        other => panic!("expected Refused, got {other:?}"),
    }
}

#[tokio::test]
async fn test_register_empty_body_is_refused() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/instance-id")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let transport = test_transport(&server);
    assert!(transport.config().lenient_json);

    let err = ExternalPayment::register(CLIENT_ID, transport)
        .await
        .unwrap_err();

    assert!(
        matches!(err, YandexMoneyError::Refused { .. }),
        "expected Refused, got {err:?}"
    );
}

#[tokio::test]
async fn test_bound_instance_process() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/process-external-payment")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("instance_id".to_string(), "iid".to_string()),
            Matcher::UrlEncoded("request_id".to_string(), "r".to_string()),
        ]))
        .with_status(200)
        .with_body(json!({"status": "in_progress", "next_retry": 5000}).to_string())
        .create_async()
        .await;

    let payment = ExternalPayment::new("iid", test_config(&server)).unwrap();
    let response = payment
        .process(&PaymentOptions::process("r"))
        .await
        .unwrap();

    assert_eq!(response.api_status(), Some("in_progress"));
    mock.assert_async().await;
}

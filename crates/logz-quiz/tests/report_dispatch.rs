//! Report dispatch through the public dispatcher and its HTTP router, with an
//! in-memory mailer standing in for the SMTP relay.

mod common {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use logz_quiz::report::{MailError, Mailer, OutgoingMail};

    /// Records every message; fails sends whose recipients match `fail_for`.
    #[derive(Default)]
    pub(super) struct MemoryMailer {
        sent: Mutex<Vec<OutgoingMail>>,
        fail_for: Vec<String>,
    }

    impl MemoryMailer {
        pub(super) fn failing_for(recipients: &[&str]) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail_for: recipients.iter().map(|r| r.to_string()).collect(),
            }
        }

        pub(super) fn sent(&self) -> Vec<OutgoingMail> {
            self.sent.lock().expect("mailer mutex poisoned").clone()
        }
    }

    #[async_trait]
    impl Mailer for MemoryMailer {
        async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
            if mail.to.iter().any(|to| self.fail_for.contains(to)) {
                return Err(MailError::Transport("relay refused recipient".to_string()));
            }
            self.sent.lock().expect("mailer mutex poisoned").push(mail);
            Ok(())
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::MemoryMailer;
use logz_quiz::quiz::ReportSink;
use logz_quiz::report::{
    report_router, DispatchError, InternalCopy, ReportBand, ReportDispatcher, ReportRequest,
    ReportTemplate, SEND_FAILURE_MESSAGE,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const INTERNAL: &str = "comercial@logz.example";

fn request() -> ReportRequest {
    serde_json::from_value(json!({
        "name": "  Ana Souza ",
        "email": " ana@example.com ",
        "company": "Usinagem Ltda",
        "role": "Comprador",
        "score": 85,
        "efficiencyGain": 17,
        "economyPotential": 63000,
        "answers": [
            {"questionId": 3, "questionType": "identification", "question": "Gasto mensal?", "answer": "Acima de R$ 35 mil", "optionValue": 30, "monthlySpend": 35000},
            {"questionId": 4, "question": "", "answer": "sem pergunta"}
        ]
    }))
    .expect("payload parses")
}

fn dispatcher(mailer: MemoryMailer, internal: &[&str]) -> (Arc<MemoryMailer>, ReportDispatcher<MemoryMailer>) {
    let mailer = Arc::new(mailer);
    let recipients = internal.iter().map(|r| r.to_string()).collect();
    (mailer.clone(), ReportDispatcher::new(mailer, recipients))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn post(body: impl Into<Body>) -> Request<Body> {
    Request::post("/api/send-report")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

#[tokio::test]
async fn sends_user_report_and_internal_summary() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::default(), &[INTERNAL]);

    let receipt = dispatcher.dispatch(request()).await.expect("dispatch succeeds");

    assert_eq!(receipt.score_on_10, 8.5);
    assert_eq!(receipt.score_percentage, 85.0);
    assert_eq!(receipt.template, ReportTemplate::Purchasing);
    assert_eq!(receipt.band, ReportBand::Structured);
    assert_eq!(receipt.internal_copy, InternalCopy::Sent);

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);

    let user = &sent[0];
    assert_eq!(user.to, vec!["ana@example.com".to_string()]);
    assert_eq!(user.subject, "Diagnóstico Log Z • Compras | Nota 8.5/10");
    assert!(user.html.contains("Olá Ana Souza,"));
    assert!(!user.disable_default_bcc);

    let internal = &sent[1];
    assert_eq!(internal.to, vec![INTERNAL.to_string()]);
    assert_eq!(internal.subject, "Novo diagnostico concluido | Ana Souza");
    assert!(internal.disable_default_bcc);
    assert!(internal.html.contains("Gasto mensal?"));
    assert!(!internal.html.contains("sem pergunta"));
}

#[tokio::test]
async fn skips_internal_copy_without_recipients() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::default(), &[]);

    let receipt = dispatcher.dispatch(request()).await.expect("dispatch succeeds");

    assert_eq!(receipt.internal_copy, InternalCopy::Skipped);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn internal_copy_failure_does_not_fail_dispatch() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::failing_for(&[INTERNAL]), &[INTERNAL]);

    let receipt = dispatcher.dispatch(request()).await.expect("user send decides");

    assert_eq!(receipt.internal_copy, InternalCopy::Failed);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn user_send_failure_fails_dispatch_and_skips_summary() {
    let (mailer, dispatcher) =
        dispatcher(MemoryMailer::failing_for(&["ana@example.com"]), &[INTERNAL]);

    let err = dispatcher.dispatch(request()).await.expect_err("send fails");

    assert!(matches!(err, DispatchError::Mail(_)));
    assert_eq!(err.user_message(), SEND_FAILURE_MESSAGE);
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn blank_email_is_rejected_without_mail() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::default(), &[INTERNAL]);
    let mut payload = request();
    payload.email = Some("   ".to_string());

    let err = dispatcher.dispatch(payload).await.expect_err("validation fails");

    assert!(matches!(err, DispatchError::MissingEmail));
    assert!(err.is_validation());
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn percentage_fallback_and_default_template() {
    let (_, dispatcher) = dispatcher(MemoryMailer::default(), &[]);
    let payload = ReportRequest {
        name: Some("Rui".to_string()),
        email: Some("rui@example.com".to_string()),
        role: Some("Gerente".to_string()),
        score: Some(7.2),
        ..ReportRequest::default()
    };

    let receipt = dispatcher.dispatch(payload).await.expect("dispatch succeeds");

    assert_eq!(receipt.score_on_10, 7.2);
    assert_eq!(receipt.score_percentage, 72.0);
    assert_eq!(receipt.template, ReportTemplate::DEFAULT);
}

#[tokio::test]
async fn sink_reports_user_facing_message() {
    let (_, dispatcher) = dispatcher(MemoryMailer::default(), &[]);
    let payload = ReportRequest {
        email: Some("rui@example.com".to_string()),
        ..ReportRequest::default()
    };

    let message = dispatcher.submit(payload).await.expect_err("name missing");
    assert_eq!(message, "Nome é obrigatório.");
}

#[tokio::test]
async fn route_returns_ok_on_success() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::default(), &[]);
    let router = report_router(Arc::new(dispatcher));

    let body = serde_json::to_vec(&request()).expect("payload serializes");
    let response = router.oneshot(post(body)).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "ok": true }));
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn route_maps_validation_and_send_errors() {
    let (_, dispatcher) = dispatcher(MemoryMailer::failing_for(&["ana@example.com"]), &[]);
    let router = report_router(Arc::new(dispatcher));

    let response = router
        .clone()
        .oneshot(post(json!({ "name": "Ana" }).to_string()))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json_body(response).await["message"],
        "E-mail é obrigatório."
    );

    let response = router
        .oneshot(post(json!({ "name": "Ana", "email": "ana@example.com" }).to_string()))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json_body(response).await["message"], SEND_FAILURE_MESSAGE);
}

#[tokio::test]
async fn route_rejects_malformed_json() {
    let (mailer, dispatcher) = dispatcher(MemoryMailer::default(), &[]);
    let router = report_router(Arc::new(dispatcher));

    let response = router.oneshot(post("{not json")).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json_body(response).await["message"].is_string());
    assert!(mailer.sent().is_empty());
}

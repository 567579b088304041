//! Result-page submission: contact details in, report request out, with the
//! booking link handled as a best-effort side effect.

use async_trait::async_trait;
use tracing::{info, warn};

use super::flow::{ContactDetails, FlowError, QuizSession};
use crate::report::request::ReportRequest;

pub const FALLBACK_FAILURE_MESSAGE: &str = "Não foi possível enviar o relatório. Tente novamente.";

/// Where finished quiz payloads are delivered.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Returns a user-facing message on failure.
    async fn submit(&self, request: ReportRequest) -> Result<(), String>;
}

/// Opens the consultation booking page. Failures are absorbed by callers.
pub trait BookingLauncher {
    /// Returns whether the page could be opened.
    fn open(&mut self, url: &str) -> bool;
    fn close(&mut self);
    fn is_open(&self) -> bool;
}

/// Submit the session's report.
///
/// The booking page is opened before the request goes out, closed again if
/// the send fails and reopened after a success if it is no longer open.
pub async fn send_report<S, B>(
    session: &mut QuizSession,
    contact: &ContactDetails,
    sink: &S,
    booking: &mut B,
    booking_url: &str,
) -> Result<(), FlowError>
where
    S: ReportSink + ?Sized,
    B: BookingLauncher + ?Sized,
{
    let request = session.prepare_submission(contact)?;

    if !booking.open(booking_url) {
        warn!(url = booking_url, "booking page could not be opened");
    }

    let outcome = sink.submit(request).await.map_err(|message| {
        if message.trim().is_empty() {
            FALLBACK_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    });

    match &outcome {
        Ok(()) => {
            if !booking.is_open() {
                booking.open(booking_url);
            }
            info!(role = session.role_label(), "report submitted");
        }
        Err(message) => {
            if booking.is_open() {
                booking.close();
            }
            warn!(error = %message, "report submission failed");
        }
    }

    session.complete_submission(outcome.clone());
    outcome.map_err(FlowError::SendFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::flow::SubmissionStatus;
    use std::sync::Mutex;

    struct RecordingSink {
        requests: Mutex<Vec<ReportRequest>>,
        failure: Option<String>,
    }

    impl RecordingSink {
        fn new(failure: Option<&str>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                failure: failure.map(str::to_string),
            }
        }
    }

    #[async_trait]
    impl ReportSink for RecordingSink {
        async fn submit(&self, request: ReportRequest) -> Result<(), String> {
            self.requests.lock().expect("sink mutex").push(request);
            match &self.failure {
                Some(message) => Err(message.clone()),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct FakeBooking {
        open: bool,
        opened: usize,
        closed: usize,
        blocked: bool,
    }

    impl BookingLauncher for FakeBooking {
        fn open(&mut self, _url: &str) -> bool {
            self.opened += 1;
            self.open = !self.blocked;
            self.open
        }

        fn close(&mut self) {
            self.closed += 1;
            self.open = false;
        }

        fn is_open(&self) -> bool {
            self.open
        }
    }

    fn finished_session() -> QuizSession {
        let mut session = QuizSession::default();
        session.begin().expect("begin");
        session.submit_name("Ana").expect("name");
        session.submit_role("Comprador").expect("role");
        while session.current_question().is_some() {
            session.answer(0).expect("answer");
        }
        session.finish_computing().expect("finish");
        session
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            company: "Usinagem Ltda".to_string(),
        }
    }

    #[tokio::test]
    async fn success_keeps_booking_open() {
        let mut session = finished_session();
        let sink = RecordingSink::new(None);
        let mut booking = FakeBooking::default();

        send_report(&mut session, &contact(), &sink, &mut booking, "https://book")
            .await
            .expect("submission succeeds");

        assert!(booking.is_open());
        assert_eq!(booking.opened, 1);
        assert_eq!(session.submission(), &SubmissionStatus::Sent);
        let requests = sink.requests.lock().expect("sink mutex");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].economy_potential, Some(63_000.0));
    }

    #[tokio::test]
    async fn failure_closes_booking_and_surfaces_message() {
        let mut session = finished_session();
        let sink = RecordingSink::new(Some("E-mail é obrigatório."));
        let mut booking = FakeBooking::default();

        let err = send_report(&mut session, &contact(), &sink, &mut booking, "https://book")
            .await
            .expect_err("submission fails");

        assert_eq!(err, FlowError::SendFailed("E-mail é obrigatório.".to_string()));
        assert!(!booking.is_open());
        assert_eq!(booking.closed, 1);
        assert!(matches!(session.submission(), SubmissionStatus::Failed(_)));
    }

    #[tokio::test]
    async fn blank_failure_message_uses_fallback() {
        let mut session = finished_session();
        let sink = RecordingSink::new(Some(" "));
        let mut booking = FakeBooking::default();

        let err = send_report(&mut session, &contact(), &sink, &mut booking, "https://book")
            .await
            .expect_err("submission fails");
        assert_eq!(err.to_string(), FALLBACK_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn blocked_booking_is_retried_after_success() {
        let mut session = finished_session();
        let sink = RecordingSink::new(None);
        let mut booking = FakeBooking {
            blocked: true,
            ..FakeBooking::default()
        };

        send_report(&mut session, &contact(), &sink, &mut booking, "https://book")
            .await
            .expect("booking failure does not fail the send");
        assert_eq!(booking.opened, 2);
    }

    #[tokio::test]
    async fn missing_contact_sends_nothing() {
        let mut session = finished_session();
        let sink = RecordingSink::new(None);
        let mut booking = FakeBooking::default();

        let err = send_report(
            &mut session,
            &ContactDetails::default(),
            &sink,
            &mut booking,
            "https://book",
        )
        .await
        .expect_err("validation fails");

        assert_eq!(err, FlowError::MissingContactDetails);
        assert_eq!(booking.opened, 0);
        assert!(sink.requests.lock().expect("sink mutex").is_empty());
    }
}

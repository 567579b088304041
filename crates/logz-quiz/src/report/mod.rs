//! Emailed diagnostic report: payload normalization, role templates, SMTP
//! delivery and the HTTP endpoint that triggers it.

pub mod band;
pub mod dispatcher;
pub mod format;
pub mod mailer;
pub mod request;
pub mod router;
pub mod summary;
pub mod template;

pub use band::ReportBand;
pub use dispatcher::{
    DispatchError, DispatchReceipt, InternalCopy, ReportDispatcher, SEND_FAILURE_MESSAGE,
};
pub use mailer::{ConfiguredMailer, MailError, Mailer, OutgoingMail, SmtpMailer};
pub use request::{normalize_answers, normalize_score, AnswerEntry, ReportRequest};
pub use router::{report_router, SEND_REPORT_PATH};
pub use summary::InternalSummary;
pub use template::{RenderedReport, ReportTemplate};

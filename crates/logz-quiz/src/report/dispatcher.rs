use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use super::band::ReportBand;
use super::mailer::{MailError, Mailer, OutgoingMail};
use super::request::{normalize_answers, normalize_score, ReportRequest};
use super::summary::InternalSummary;
use super::template::ReportTemplate;
use crate::quiz::submission::ReportSink;

pub const SEND_FAILURE_MESSAGE: &str =
    "Não foi possível enviar o e-mail. Tente novamente mais tarde.";

/// What happened to the copy for the internal distribution list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalCopy {
    Skipped,
    Sent,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchReceipt {
    pub template: ReportTemplate,
    pub band: ReportBand,
    pub score_on_10: f64,
    pub score_percentage: f64,
    pub internal_copy: InternalCopy,
    pub dispatched_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Nome é obrigatório.")]
    MissingName,
    #[error("E-mail é obrigatório.")]
    MissingEmail,
    #[error(transparent)]
    Mail(#[from] MailError),
}

impl DispatchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingName | Self::MissingEmail)
    }

    /// Message safe to show the end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Mail(_) => SEND_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Renders and mails the diagnostic report.
///
/// The user-facing send decides the outcome; the internal copy is best effort.
pub struct ReportDispatcher<M> {
    mailer: Arc<M>,
    internal_recipients: Vec<String>,
}

impl<M> ReportDispatcher<M>
where
    M: Mailer + 'static,
{
    pub fn new(mailer: Arc<M>, internal_recipients: Vec<String>) -> Self {
        Self {
            mailer,
            internal_recipients,
        }
    }

    pub fn mailer(&self) -> &Arc<M> {
        &self.mailer
    }

    pub async fn dispatch(&self, request: ReportRequest) -> Result<DispatchReceipt, DispatchError> {
        let name = trimmed(request.name.as_deref()).ok_or(DispatchError::MissingName)?;
        let email = trimmed(request.email.as_deref()).ok_or(DispatchError::MissingEmail)?;
        let company = trimmed(request.company.as_deref()).unwrap_or_default();
        let role = request.role.clone().unwrap_or_default();

        let score_on_10 = normalize_score(request.score.or(request.score_percentage));
        let score_percentage = request
            .score_percentage
            .unwrap_or_else(|| (score_on_10 * 10.0).clamp(0.0, 100.0));

        let template = ReportTemplate::resolve(Some(role.as_str()));
        let report = template.render(&name, score_on_10);

        self.mailer
            .send(OutgoingMail::html(
                vec![email.clone()],
                report.subject,
                report.html,
            ))
            .await
            .map_err(|err| {
                error!(error = %err, template = ?template, "report send failed");
                DispatchError::from(err)
            })?;

        let summary = InternalSummary {
            name,
            email,
            company,
            role,
            score_on_10,
            score_percentage,
            efficiency_gain: request.efficiency_gain,
            economy_potential: request.economy_potential,
            answers: normalize_answers(request.answers.as_ref()),
        };

        let internal_copy = self.send_internal_copy(&summary).await;

        info!(
            template = ?template,
            internal_copy = ?internal_copy,
            summary = %summary.log_line(),
            "diagnostic report sent"
        );

        Ok(DispatchReceipt {
            template,
            band: ReportBand::from_score(score_on_10),
            score_on_10,
            score_percentage,
            internal_copy,
            dispatched_at: Utc::now(),
        })
    }

    async fn send_internal_copy(&self, summary: &InternalSummary) -> InternalCopy {
        if self.internal_recipients.is_empty() {
            return InternalCopy::Skipped;
        }

        let mut mail = OutgoingMail::html(
            self.internal_recipients.clone(),
            summary.subject(),
            summary.render_html(),
        );
        mail.disable_default_bcc = true;

        match self.mailer.send(mail).await {
            Ok(()) => InternalCopy::Sent,
            Err(err) => {
                error!(
                    error = %err,
                    recipients = self.internal_recipients.len(),
                    "internal report copy failed"
                );
                InternalCopy::Failed
            }
        }
    }
}

#[async_trait]
impl<M> ReportSink for ReportDispatcher<M>
where
    M: Mailer + 'static,
{
    async fn submit(&self, request: ReportRequest) -> Result<(), String> {
        self.dispatch(request)
            .await
            .map(|_| ())
            .map_err(|err| err.user_message())
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

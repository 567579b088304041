use std::fmt::Write as _;

use super::format::{
    escape_html, format_decimal, format_integer, format_optional_currency,
    format_optional_decimal,
};
use super::request::AnswerEntry;

const NOT_INFORMED: &str = "Nao informado";

/// Everything the internal distribution list receives about one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalSummary {
    pub name: String,
    pub email: String,
    pub company: String,
    pub role: String,
    pub score_on_10: f64,
    pub score_percentage: f64,
    pub efficiency_gain: Option<f64>,
    pub economy_potential: Option<f64>,
    pub answers: Vec<AnswerEntry>,
}

impl InternalSummary {
    pub fn subject(&self) -> String {
        format!("Novo diagnostico concluido | {}", self.name)
    }

    /// Plain-text digest written to the log after a successful send.
    pub fn log_line(&self) -> String {
        [
            format!("Nome: {}", self.name),
            format!("Empresa: {}", or_not_informed(&self.company)),
            format!("Cargo: {}", self.role),
            format!("E-mail: {}", self.email),
            format!("Nota (0-10): {:.1}", self.score_on_10),
            format!("Nota (%): {:.1}%", self.score_percentage),
        ]
        .join("\n")
    }

    pub fn render_html(&self) -> String {
        let participant = [
            ("Nome", escape_html(&self.name)),
            ("Empresa", escape_html(or_not_informed(&self.company))),
            ("Cargo", escape_html(or_not_informed(&self.role))),
            ("E-mail", escape_html(&self.email)),
        ];
        let indicators = [
            ("Nota (0-10)", format_decimal(self.score_on_10)),
            (
                "Nota (%)",
                format_optional_decimal(Some(self.score_percentage), "%"),
            ),
            (
                "Ganho de eficiencia estimado",
                format_optional_decimal(self.efficiency_gain, "%"),
            ),
            (
                "Potencial de economia",
                format_optional_currency(self.economy_potential),
            ),
        ];

        let mut html = String::from(
            r#"<!DOCTYPE html><html lang="pt-BR"><head><meta charset="UTF-8" /><title>Diagnostico Log Z - Novo resultado</title></head><body style="background-color:#f8fafc;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;margin:0;padding:24px;"><div style="max-width:640px;margin:0 auto;background:#ffffff;border-radius:16px;border:1px solid #e2e8f0;padding:32px;"><h2 style="margin:0 0 8px;color:#0f172a;">Novo diagnostico concluido</h2><p style="margin:0 0 24px;color:#475569;line-height:1.6;">Um participante finalizou o quiz na landing page. Veja abaixo os dados e as respostas registradas.</p>"#,
        );

        html.push_str(r#"<h3 style="margin:24px 0 12px;color:#0f172a;">Dados do participante</h3>"#);
        push_label_table(&mut html, &participant);
        html.push_str(r#"<h3 style="margin:32px 0 12px;color:#0f172a;">Indicadores calculados</h3>"#);
        push_label_table(&mut html, &indicators);

        html.push_str(
            r#"<h3 style="margin:32px 0 12px;color:#0f172a;">Respostas</h3><table style="width:100%;border-collapse:collapse;font-size:14px;"><thead><tr><th style="text-align:left;padding:12px;">#</th><th style="text-align:left;padding:12px;">Pergunta</th><th style="text-align:left;padding:12px;">Resposta</th><th style="text-align:center;padding:12px;">Valor</th><th style="text-align:right;padding:12px;">Consumo estimado</th></tr></thead><tbody>"#,
        );
        if self.answers.is_empty() {
            html.push_str(
                r#"<tr><td colspan="5" style="padding:16px;color:#64748b;text-align:center;">Nenhuma resposta registrada.</td></tr>"#,
            );
        }
        for (index, answer) in self.answers.iter().enumerate() {
            let type_label = answer
                .question_type
                .as_deref()
                .map(|kind| {
                    format!(
                        r#" <span style="color:#64748b;font-size:12px;">({})</span>"#,
                        escape_html(kind)
                    )
                })
                .unwrap_or_default();
            let option_value = answer
                .option_value
                .map(format_integer)
                .unwrap_or_else(|| "-".to_string());

            let _ = write!(
                html,
                r#"<tr><td style="padding:12px;color:#475569;">{}</td><td style="padding:12px;font-weight:600;">{}{}</td><td style="padding:12px;">{}</td><td style="padding:12px;text-align:center;">{}</td><td style="padding:12px;text-align:right;">{}</td></tr>"#,
                index + 1,
                escape_html(&answer.question),
                type_label,
                escape_html(&answer.answer),
                option_value,
                format_optional_currency(answer.monthly_spend),
            );
        }
        html.push_str(
            r#"</tbody></table><p style="margin:32px 0 0;color:#94a3b8;font-size:12px;text-align:center;">Enviado automaticamente pelo formulario da LOG Z.</p></div></body></html>"#,
        );

        html
    }
}

fn or_not_informed(value: &str) -> &str {
    if value.is_empty() {
        NOT_INFORMED
    } else {
        value
    }
}

fn push_label_table(html: &mut String, rows: &[(&str, String)]) {
    html.push_str(r#"<table style="width:100%;border-collapse:collapse;"><tbody>"#);
    for (label, value) in rows {
        let _ = write!(
            html,
            r#"<tr><td style="padding:8px 0;color:#64748b;font-size:13px;">{label}</td><td style="padding:8px 0;color:#0f172a;font-weight:600;">{value}</td></tr>"#
        );
    }
    html.push_str("</tbody></table>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(answers: Vec<AnswerEntry>) -> InternalSummary {
        InternalSummary {
            name: "Ana <Compras>".to_string(),
            email: "ana@example.com".to_string(),
            company: String::new(),
            role: "Comprador".to_string(),
            score_on_10: 6.3,
            score_percentage: 62.5,
            efficiency_gain: Some(13.0),
            economy_potential: Some(63_000.0),
            answers,
        }
    }

    #[test]
    fn renders_indicators_in_brazilian_format() {
        let html = summary(Vec::new()).render_html();
        assert!(html.contains("R$\u{a0}63.000,00"));
        assert!(html.contains("62,5%"));
        assert!(html.contains("13,0%"));
        assert!(html.contains("Nenhuma resposta registrada."));
        assert!(html.contains("Ana &lt;Compras&gt;"));
        assert!(html.contains(NOT_INFORMED));
    }

    #[test]
    fn renders_answer_rows() {
        let html = summary(vec![AnswerEntry {
            question_id: 3,
            question_type: Some("identification".to_string()),
            question: "Gasto mensal?".to_string(),
            answer: "A partir de R$ 35.000,00/mês".to_string(),
            option_value: Some(30.0),
            monthly_spend: Some(35_000.0),
        }])
        .render_html();

        assert!(html.contains("Gasto mensal?"));
        assert!(html.contains(r#"text-align:center;">30</td>"#));
        assert!(html.contains("(identification)"));
        assert!(html.contains("R$\u{a0}35.000,00"));
        assert!(!html.contains("Nenhuma resposta registrada."));
    }

    #[test]
    fn subject_and_log_line_name_the_participant() {
        let summary = summary(Vec::new());
        assert_eq!(summary.subject(), "Novo diagnostico concluido | Ana <Compras>");
        assert!(summary.log_line().contains("Nota (%): 62.5%"));
        assert!(summary.log_line().contains("Empresa: Nao informado"));
    }
}

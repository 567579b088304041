use serde::Serialize;

use super::band::ReportBand;
use super::format::{escape_html, format_decimal};
use crate::quiz::Role;

/// Role-specific report flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    Purchasing,
    Executive,
    Machining,
}

/// Subject and HTML body ready to be mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub subject: String,
    pub html: String,
}

struct Section {
    title: &'static str,
    body: &'static str,
}

impl ReportTemplate {
    pub const DEFAULT: Self = Self::Machining;

    /// Exact role labels pick their template; anything else gets [`Self::DEFAULT`].
    pub fn resolve(role: Option<&str>) -> Self {
        match role {
            Some(label) if label == Role::Buyer.label() => Self::Purchasing,
            Some(label) if label == Role::Director.label() => Self::Executive,
            Some(label) if label == Role::MachiningSupervisor.label() => Self::Machining,
            _ => Self::DEFAULT,
        }
    }

    pub const fn subject_prefix(self) -> &'static str {
        match self {
            Self::Purchasing => "Diagnóstico Log Z • Compras",
            Self::Executive => "Diagnóstico Log Z • Diretoria",
            Self::Machining => "Diagnóstico Log Z • Usinagem",
        }
    }

    pub fn subject(self, score_on_10: f64) -> String {
        format!("{} | Nota {:.1}/10", self.subject_prefix(), score_on_10)
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Purchasing => "💼 Diagnóstico Log Z — Compras",
            Self::Executive => "🧠 Diagnóstico Log Z — Diretoria",
            Self::Machining => "⚙️ Diagnóstico Log Z — Usinagem",
        }
    }

    const fn intro(self) -> &'static str {
        match self {
            Self::Purchasing => {
                "Abaixo está seu diagnóstico de compras com foco em previsibilidade, negociação e custo."
            }
            Self::Executive => {
                "Abaixo está seu diagnóstico executivo com foco em previsibilidade, custo e maturidade de gestão."
            }
            Self::Machining => {
                "Abaixo está seu diagnóstico operacional com foco em disponibilidade, controle e produtividade."
            }
        }
    }

    fn sections(self, band: ReportBand) -> [Section; 3] {
        let (scenario, next_steps) = match (self, band) {
            (Self::Purchasing, ReportBand::Critical) => (
                "O setor de compras ainda opera de forma reativa, com reposições feitas por urgência ou hábito, sem base sólida em dados de consumo e estoque.",
                "Integre consumo, estoque e requisições em um histórico confiável para planejar reposições com antecedência e eliminar compras não planejadas.",
            ),
            (Self::Purchasing, ReportBand::Structured) => (
                "Há boa organização e controle, mas ainda com atualizações manuais e pouca visibilidade consolidada sobre estoque e fornecedores.",
                "Padronize indicadores, automatize relatórios e avalie fornecedores com base em dados reais para reduzir compras desnecessárias.",
            ),
            (Self::Purchasing, ReportBand::Excellence) => (
                "Compras apresenta maturidade e decisões baseadas em dados, com bom alinhamento entre as áreas.",
                "Fortaleça a integração com a produção e avalie fornecedores pelo custo total para elevar as margens de negociação.",
            ),
            (Self::Executive, ReportBand::Critical) => (
                "A gestão de usinagem carece de integração entre setores e de informações confiáveis, e a diretoria perde previsibilidade sobre o custo das ferramentas.",
                "Estruture uma base de dados conectando estoque, compras e produção e comece a medir indicadores reais de consumo.",
            ),
            (Self::Executive, ReportBand::Structured) => (
                "Existem controles e indicadores, mas a consolidação ainda depende de esforço manual e chega com atraso à diretoria.",
                "Unifique os indicadores de custo por operação e centro de custo para decidir com dados atualizados.",
            ),
            (Self::Executive, ReportBand::Excellence) => (
                "A diretoria acompanha custo e eficiência com dados confiáveis e processos maduros.",
                "Use análises preditivas e comparativas para transformar a eficiência atual em vantagem competitiva.",
            ),
            (Self::Machining, ReportBand::Critical) => (
                "O controle de ferramentas é manual ou disperso, gerando paradas de máquina, buscas demoradas e desperdícios evitáveis.",
                "Registre entradas e saídas por operador e máquina e defina pontos de reposição para as ferramentas críticas.",
            ),
            (Self::Machining, ReportBand::Structured) => (
                "O setor já possui controle, mas ainda há gargalos na disponibilidade das ferramentas e pouca integração com compras.",
                "Automatize reposições e acompanhe consumo e estoque em tempo real para reduzir trocas e esperas.",
            ),
            (Self::Machining, ReportBand::Excellence) => (
                "O setor opera de forma eficiente, com rastreabilidade e disponibilidade de ferramentas bem resolvidas.",
                "Mantenha o padrão e use o histórico de consumo para otimizar vida útil e parâmetros de corte.",
            ),
        };

        let help = match self {
            Self::Purchasing => {
                "A Log Z conecta compras à produção em tempo real, com alertas e relatórios de consumo que aumentam o poder de negociação."
            }
            Self::Executive => {
                "A Log Z transforma o controle de ferramentas em indicadores visuais, dando à diretoria previsibilidade financeira e decisões baseadas em fatos."
            }
            Self::Machining => {
                "A Log Z digitaliza o almoxarifado e a rastreabilidade por máquina, transformando o controle manual em um processo ágil e confiável."
            }
        };

        [
            Section {
                title: "Cenário identificado",
                body: scenario,
            },
            Section {
                title: "Oportunidades e próximos passos",
                body: next_steps,
            },
            Section {
                title: "Como a Log Z pode ajudar",
                body: help,
            },
        ]
    }

    /// Render the user-facing report for `name` at the given 0-10 score.
    pub fn render(self, name: &str, score_on_10: f64) -> RenderedReport {
        let band = ReportBand::from_score(score_on_10);
        let sections: String = self
            .sections(band)
            .iter()
            .map(|section| {
                format!(
                    r#"<div style="margin-top:20px;"><h3 style="margin:0 0 8px;color:#0f172a;">{}</h3><p style="margin:0;color:#334155;">{}</p></div>"#,
                    section.title, section.body
                )
            })
            .collect();

        let html = format!(
            r#"<!DOCTYPE html><div style="font-family:Arial,sans-serif;font-size:14px;line-height:1.5;color:#111;background:#f8fafc;padding:24px;"><div style="max-width:640px;margin:0 auto;background:#ffffff;border-radius:12px;padding:32px;"><h2 style="margin:0 0 12px;">{title}</h2><p>Olá {name},</p><p>{intro}</p><p style="background:#f1f5f9;border-radius:8px;padding:12px;"><b>Sua pontuação:</b> {score} / 10</p><p style="color:#0369a1;"><b>Faixa de nota:</b> {range} | {headline}</p>{sections}<hr style="border:none;border-top:1px solid #e2e8f0;margin:24px 0;"/><p style="color:#64748b;font-size:12px;">Log Z • Visibilidade de custo real por operação e por centro de custo</p></div></div>"#,
            title = self.title(),
            name = escape_html(name),
            intro = self.intro(),
            score = format_decimal(score_on_10),
            range = band.range_label(),
            headline = band.headline(),
        );

        RenderedReport {
            subject: self.subject(score_on_10),
            html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_pick_their_template() {
        assert_eq!(
            ReportTemplate::resolve(Some("Comprador")),
            ReportTemplate::Purchasing
        );
        assert_eq!(
            ReportTemplate::resolve(Some("Diretor")),
            ReportTemplate::Executive
        );
        assert_eq!(
            ReportTemplate::resolve(Some("Supervisor/Gerente de usinagem")),
            ReportTemplate::Machining
        );
    }

    #[test]
    fn unknown_or_missing_roles_use_default() {
        assert_eq!(ReportTemplate::resolve(Some("Outros")), ReportTemplate::DEFAULT);
        assert_eq!(ReportTemplate::resolve(Some("")), ReportTemplate::DEFAULT);
        assert_eq!(ReportTemplate::resolve(None), ReportTemplate::DEFAULT);
    }

    #[test]
    fn subject_carries_one_decimal_score() {
        assert_eq!(
            ReportTemplate::Purchasing.subject(8.5),
            "Diagnóstico Log Z • Compras | Nota 8.5/10"
        );
        assert_eq!(
            ReportTemplate::Executive.subject(10.0),
            "Diagnóstico Log Z • Diretoria | Nota 10.0/10"
        );
    }

    #[test]
    fn body_embeds_escaped_name_score_and_band() {
        let report = ReportTemplate::Machining.render("Zé <Operações>", 7.2);
        assert!(report.html.contains("Olá Zé &lt;Operações&gt;,"));
        assert!(report.html.contains("7,2 / 10"));
        assert!(report.html.contains(ReportBand::Structured.headline()));
        assert!(report.subject.ends_with("Nota 7.2/10"));
    }

    #[test]
    fn band_changes_the_rendered_copy() {
        let low = ReportTemplate::Executive.render("Ana", 3.0);
        let high = ReportTemplate::Executive.render("Ana", 9.5);
        assert!(low.html.contains(ReportBand::Critical.range_label()));
        assert!(high.html.contains(ReportBand::Excellence.headline()));
        assert_ne!(low.html, high.html);
    }
}

use serde::Serialize;

use super::domain::RoleCategory;

/// Four-step classification shown on the live result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyTier {
    Critical,
    High,
    Moderate,
    Low,
}

impl UrgencyTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::High, Self::Moderate, Self::Low]
    }

    /// Half-open bands of 25 points; each boundary belongs to the upper band.
    pub fn classify(percentage: f64) -> Self {
        if percentage >= 75.0 {
            Self::Low
        } else if percentage >= 50.0 {
            Self::Moderate
        } else if percentage >= 25.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRÍTICO",
            Self::High => "ALTO",
            Self::Moderate => "MODERADO",
            Self::Low => "BAIXO",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical => "#ef4444",
            Self::High => "#f59e0b",
            Self::Moderate => "#3b82f6",
            Self::Low => "#10b981",
        }
    }
}

pub fn classify(percentage: f64) -> UrgencyTier {
    UrgencyTier::classify(percentage)
}

pub fn tier_message(tier: UrgencyTier, category: RoleCategory) -> &'static str {
    match (category, tier) {
        (RoleCategory::Director, UrgencyTier::Critical) => {
            "Você está deixando de economizar todos os meses. A operação está drenando recursos que poderiam virar lucro."
        }
        (RoleCategory::Director, UrgencyTier::High) => {
            "O potencial de ganho é expressivo. Pequenas melhorias de gestão podem gerar economias significativas no curto prazo."
        }
        (RoleCategory::Director, UrgencyTier::Moderate) => {
            "Há espaço para evoluir a eficiência e reduzir custos operacionais sem grandes investimentos."
        }
        (RoleCategory::Director, UrgencyTier::Low) => {
            "Sua operação demonstra boa eficiência. Continue acompanhando indicadores e consolidando resultados sustentáveis."
        }
        (RoleCategory::Machining, UrgencyTier::Critical) => {
            "Você perde horas de trabalho por falta de gestão das ferramentas. Isso está impactando diretamente a produtividade das máquinas e da equipe."
        }
        (RoleCategory::Machining, UrgencyTier::High) => {
            "Há muito tempo sendo perdido em trocas e buscas de ferramentas. Com uma organização melhor, o rendimento do setor pode aumentar rapidamente."
        }
        (RoleCategory::Machining, UrgencyTier::Moderate) => {
            "O processo de usinagem está funcional, mas ainda há gargalos no controle e disponibilidade das ferramentas."
        }
        (RoleCategory::Machining, UrgencyTier::Low) => {
            "Seu setor está operando de forma eficiente. Mantenha o padrão e registre sempre as movimentações para evitar retrocessos."
        }
        (RoleCategory::Purchasing, UrgencyTier::Critical) => {
            "Seu gasto com ferramentas pode ser reduzido imediatamente. Há compras desnecessárias acontecendo agora, é hora de agir e retomar o controle dos custos."
        }
        (RoleCategory::Purchasing, UrgencyTier::High) => {
            "Você tem um grande potencial de economia. Pequenos ajustes nos pedidos e reposições já trariam resultados financeiros visíveis."
        }
        (RoleCategory::Purchasing, UrgencyTier::Moderate) => {
            "Há oportunidades claras de negociação e planejamento de estoque que podem melhorar sua eficiência de compra."
        }
        (RoleCategory::Purchasing, UrgencyTier::Low) => {
            "Sua gestão de compras está bem estruturada. Continue monitorando o consumo para manter a eficiência e evitar desperdícios futuros."
        }
    }
}

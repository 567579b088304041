//! Static question catalogue, one five-question set per role bucket.

use super::domain::{Question, QuestionKind, QuestionOption, Role, RoleCategory};

/// Question whose options carry a monthly spend magnitude.
pub const SPEND_QUESTION_ID: u8 = 3;

#[derive(Debug)]
pub struct QuestionSet {
    pub category: RoleCategory,
    pub questions: &'static [Question],
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    /// Position of the spend question in this set, if the set has one.
    pub fn spend_question_index(&self) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == SPEND_QUESTION_ID)
    }
}

pub fn question_set(role: Role) -> &'static QuestionSet {
    match role {
        Role::MachiningSupervisor => &SUPERVISOR_SET,
        Role::Buyer => &BUYER_SET,
        Role::Director | Role::Other => &DIRECTOR_SET,
    }
}

const fn opt(text: &'static str, value: u8, icon: &'static str) -> QuestionOption {
    QuestionOption {
        text,
        icon,
        value,
        monthly_spend: None,
    }
}

const fn spend(text: &'static str, value: u8, icon: &'static str, amount: u32) -> QuestionOption {
    QuestionOption {
        text,
        icon,
        value,
        monthly_spend: Some(amount),
    }
}

const SPEND_QUESTION: Question = Question {
    id: SPEND_QUESTION_ID,
    kind: QuestionKind::Identification,
    prompt: "Você sabe quanto a sua empresa consome, em média, por mês em ferramentas de corte?",
    description: "Informe a faixa de gasto que melhor representa sua operação.",
    options: [
        spend("A partir de R$ 35.000,00/mês", 30, "💵", 35_000),
        spend("R$ 15.000,00 a R$ 35.000,00/mês", 25, "💸", 25_000),
        spend("R$ 8.000,00 a R$ 20.000,00/mês", 20, "📈", 14_000),
        spend("R$ 3.000,00 a R$ 10.000,00/mês", 15, "📝", 6_500),
    ],
};

static DIRECTOR_QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        kind: QuestionKind::Identification,
        prompt: "Como a direção acompanha os indicadores de custo e eficiência da usinagem?",
        description: "Escolha como esses indicadores são acompanhados hoje.",
        options: [
            opt("Dashboards e relatórios atualizados com base em dados reais", 5, "📈"),
            opt("Acompanhamos mensalmente com base em planilhas internas", 15, "📃"),
            opt("Recebemos informações parciais dos setores de compras e produção", 25, "📂"),
            opt("Não há acompanhamento estruturado de indicadores", 30, "⚠️"),
        ],
    },
    Question {
        id: 2,
        kind: QuestionKind::Hope,
        prompt: "Qual é a principal prioridade da sua gestão em relação ao uso e consumo de ferramentas de corte?",
        description: "Mostre qual objetivo estratégico está guiando as decisões da diretoria.",
        options: [
            opt("Reduzir custos e desperdícios", 30, "💰"),
            opt("Disponibilidade e produtividade da produção", 25, "⚙️"),
            opt("Rastreabilidade e previsibilidade de consumo", 20, "📦"),
            opt("Integrar estoque e compras para decisões mais rápidas", 15, "🔁"),
        ],
    },
    SPEND_QUESTION,
    Question {
        id: 4,
        kind: QuestionKind::Pain,
        prompt: "Como funciona hoje o processo de compras de ferramentas de corte na sua empresa?",
        description: "Indique como as decisões de compra são tomadas atualmente.",
        options: [
            opt("Baseado em relatórios e previsões de consumo", 5, "📉"),
            opt("Compras por estoque mínimo definido", 15, "📎"),
            opt("Cotações pontuais conforme a necessidade", 25, "📞"),
            opt("Compras emergenciais indicadas pelos operadores", 30, "🆘"),
        ],
    },
    Question {
        id: 5,
        kind: QuestionKind::Solution,
        prompt: "Quais fatores mais influenciam a escolha de fornecedores ou marcas de ferramentas?",
        description: "Mostre o que pesa mais nas negociações com fornecedores atualmente.",
        options: [
            opt("Desempenho técnico e durabilidade", 10, "🛡️"),
            opt("Rapidez e confiabilidade na entrega", 20, "🚚"),
            opt("Suporte técnico e histórico de parceria", 15, "🤝"),
            opt("Menor preço no curto prazo", 30, "💸"),
        ],
    },
];

static SUPERVISOR_QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        kind: QuestionKind::Identification,
        prompt: "Como é feito o controle de entradas e saídas das ferramentas atualmente?",
        description: "Selecione a opção que melhor descreve o controle do almoxarifado.",
        options: [
            opt("Controle automatizado e atualizado em tempo real", 5, "🖥️"),
            opt("Temos um sistema, mas sem integração com a produção", 15, "🔄"),
            opt("Pelo almoxarifado, mas sem registro detalhado", 25, "📦"),
            opt("Manualmente (em planilhas ou cadernos)", 30, "✏️"),
        ],
    },
    Question {
        id: 2,
        kind: QuestionKind::Hope,
        prompt: "O que você espera de um gerenciador de ferramentas?",
        description: "Aponte a funcionalidade que traria maior impacto imediato.",
        options: [
            opt("Controle e rastreabilidade por operador/máquina", 30, "🔧"),
            opt("Automatizar reposições e pedidos de compra", 25, "🤖"),
            opt("Acompanhar consumo e estoque em tempo real", 20, "👀"),
            opt("Reduzir o desperdício e o custo mensal", 15, "♻️"),
        ],
    },
    SPEND_QUESTION,
    Question {
        id: 4,
        kind: QuestionKind::Pain,
        prompt: "Quantas máquinas estão em operação atualmente?",
        description: "Selecione a faixa que representa o tamanho da sua operação.",
        options: [
            opt("Mais de 20 máquinas", 30, "🏭"),
            opt("De 15 a 20 máquinas", 25, "⚙️"),
            opt("De 10 a 15 máquinas", 20, "🔧"),
            opt("Menos de 10 máquinas", 10, "🛠️"),
        ],
    },
    Question {
        id: 5,
        kind: QuestionKind::Solution,
        prompt: "Você possui um setor de usinagem na sua indústria?",
        description: "Entenda em que estágio está a estrutura de usinagem da empresa.",
        options: [
            opt("Sim, com produção interna", 30, "🏢"),
            opt("Sim, mas terceirizamos parte do processo", 20, "🤝"),
            opt("Não, apenas compramos peças usinadas", 10, "🛒"),
            opt("Estamos avaliando implantar um setor de usinagem", 15, "🚀"),
        ],
    },
];

static BUYER_QUESTIONS: [Question; 5] = [
    Question {
        id: 1,
        kind: QuestionKind::Identification,
        prompt: "A equipe de compras tem acesso a históricos de consumo e custos das ferramentas?",
        description: "Mostre o nível de visibilidade que o time de compras possui hoje.",
        options: [
            opt("Sim, temos dados completos e atualizados", 5, "📚"),
            opt("Temos sistema, mas sem integração com a produção", 15, "🔗"),
            opt("Temos informações parciais em planilhas", 25, "📄"),
            opt("Não, compramos sem esse nível de detalhe", 30, "🙈"),
        ],
    },
    Question {
        id: 2,
        kind: QuestionKind::Pain,
        prompt: "Como funciona o processo de compra de ferramentas de corte?",
        description: "Explique como a necessidade de reposição é identificada atualmente.",
        options: [
            opt("Utilizamos relatórios ou sistemas para prever necessidade", 5, "📅"),
            opt("Temos um planejamento de consumo mensal", 15, "🖩"),
            opt("Compramos conforme o estoque mínimo definido", 25, "📦"),
            opt("Só compramos quando o operador informa que acabou", 30, "⏰"),
        ],
    },
    SPEND_QUESTION,
    Question {
        id: 4,
        kind: QuestionKind::Solution,
        prompt: "Qual o fator determinante para escolha do fornecedor ou marca da ferramenta?",
        description: "Mostre o que tem mais peso na decisão final de compra.",
        options: [
            opt("Histórico de parceria / suporte técnico", 15, "🤝"),
            opt("Durabilidade e desempenho técnico", 10, "🛠️"),
            opt("Rapidez na entrega", 20, "⚡️"),
            opt("Preço mais baixo", 30, "💰"),
        ],
    },
    Question {
        id: 5,
        kind: QuestionKind::Pain,
        prompt: "Com que frequência ocorrem faltas ou excessos de estoque?",
        description: "Avalie a previsibilidade atual das compras e do estoque.",
        options: [
            opt("Nunca, o estoque é sempre suficiente", 5, "✅"),
            opt("Raramente, temos controle razoável", 15, "🙂"),
            opt("Às vezes, principalmente com ferramentas críticas", 25, "⚠️"),
            opt("Frequentemente, isso atrasa a produção", 30, "❌"),
        ],
    },
];

static DIRECTOR_SET: QuestionSet = QuestionSet {
    category: RoleCategory::Director,
    questions: &DIRECTOR_QUESTIONS,
};

static SUPERVISOR_SET: QuestionSet = QuestionSet {
    category: RoleCategory::Machining,
    questions: &SUPERVISOR_QUESTIONS,
};

static BUYER_SET: QuestionSet = QuestionSet {
    category: RoleCategory::Purchasing,
    questions: &BUYER_QUESTIONS,
};

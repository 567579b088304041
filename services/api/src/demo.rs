use crate::infra::PrintedBookingLink;
use clap::Args;
use logz_quiz::config::AppConfig;
use logz_quiz::error::AppError;
use logz_quiz::quiz::{send_report, ComputingProgress, ContactDetails, QuizResult, QuizSession};
use logz_quiz::report::format::{format_brl, format_decimal};
use logz_quiz::report::{ConfiguredMailer, ReportDispatcher};
use logz_quiz::telemetry;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Role as shown in the role picker, e.g. "Comprador".
    #[arg(long)]
    pub(crate) role: String,
    /// Option position chosen for each question, comma-separated (e.g. 0,1,2,3,0).
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) answers: Vec<usize>,
    /// Visitor name used in the greeting and the report.
    #[arg(long, default_value = "Visitante")]
    pub(crate) name: String,
    /// Address that receives the report when --send is given.
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// Company name required by the report form.
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Mail the report through the configured SMTP relay.
    #[arg(long)]
    pub(crate) send: bool,
    /// Replay the analysis progress bar in real time.
    #[arg(long)]
    pub(crate) animate: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut session = QuizSession::default();

    session.begin()?;
    session.submit_name(&args.name)?;
    session.submit_role(&args.role)?;

    println!("Diagnóstico Log Z");
    println!("  Participante: {}", session.name());
    println!("  Cargo: {} ({} perguntas)", session.role_label(), session.questions().len());

    for position in &args.answers {
        let question = session.current_question();
        let progress = session.question_progress();
        session.answer(*position)?;
        if let Some(question) = question {
            let chosen = question
                .option(*position)
                .map(|option| format!("{} {}", option.icon, option.text))
                .unwrap_or_default();
            println!("\n  [{:>3.0}%] {}", progress, question.prompt);
            println!("    -> {chosen}");
        }
    }

    loop {
        let progress = session.tick_computing()?;
        if args.animate {
            tokio::time::sleep(ComputingProgress::TICK_INTERVAL).await;
            if progress.percent() % 30 == 0 {
                println!("  {:>3}% {}", progress.percent(), progress.message());
            }
        }
        if progress.is_complete() {
            break;
        }
    }
    if args.animate {
        tokio::time::sleep(ComputingProgress::SETTLE_DELAY).await;
    }
    session.finish_computing()?;

    let result = session.result()?;
    render_result(&result);

    if !args.send {
        println!("\nAgende sua consultoria: {}", config.booking_url);
        return Ok(());
    }

    telemetry::init(&config.telemetry, config.environment)?;
    let contact = ContactDetails {
        name: args.name,
        email: args.email.unwrap_or_default(),
        company: args.company.unwrap_or_default(),
    };
    let mailer = Arc::new(ConfiguredMailer::from_config(&config.mail)?);
    let dispatcher = ReportDispatcher::new(mailer, config.mail.internal_recipients.clone());
    let mut booking = PrintedBookingLink::default();

    println!("\nEnviando relatório...");
    send_report(
        &mut session,
        &contact,
        &dispatcher,
        &mut booking,
        &config.booking_url,
    )
    .await?;
    println!("  Relatório enviado para {}", contact.email.trim());

    Ok(())
}

fn render_result(result: &QuizResult) {
    println!("\nResultado");
    println!(
        "  Índice de urgência: {}% ({} / 10)",
        format_decimal(result.percentage),
        format_decimal(result.score_on_10)
    );
    println!("  Nível: {} [{}]", result.label, result.color);
    println!("  {}", result.message);
    println!(
        "  Potencial de economia anual: {}",
        format_brl(result.estimate.economic_potential as f64)
    );
    println!("  Ganho de eficiência estimado: {}%", result.estimate.efficiency_gain);
    match result.monthly_spend {
        Some(spend) => println!("  Base: gasto mensal de {}", format_brl(f64::from(spend))),
        None => println!("  Base: estimativa proporcional ao índice"),
    }

    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("\n  Resultado (JSON):\n{}", json),
        Err(err) => println!("\n  Resultado (JSON) indisponível: {}", err),
    }
}

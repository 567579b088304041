use logz_quiz::quiz::BookingLauncher;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Terminal stand-in for the booking window: prints the link instead of opening it.
#[derive(Debug, Default)]
pub(crate) struct PrintedBookingLink {
    shown: bool,
}

impl BookingLauncher for PrintedBookingLink {
    fn open(&mut self, url: &str) -> bool {
        if !self.shown {
            println!("  Agende sua consultoria: {url}");
        }
        self.shown = true;
        true
    }

    fn close(&mut self) {
        if self.shown {
            println!("  Agendamento cancelado: o relatório não foi enviado.");
        }
        self.shown = false;
    }

    fn is_open(&self) -> bool {
        self.shown
    }
}

use serde::Serialize;

/// Three-band maturity classification used by the emailed report (0-10 scale).
///
/// Independent of the live page's [`UrgencyTier`](crate::quiz::UrgencyTier):
/// different scale, different boundaries, different band count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportBand {
    Critical,
    Structured,
    Excellence,
}

impl ReportBand {
    pub const fn ordered() -> [Self; 3] {
        [Self::Critical, Self::Structured, Self::Excellence]
    }

    pub fn from_score(score_on_10: f64) -> Self {
        if score_on_10 <= 5.0 {
            Self::Critical
        } else if score_on_10 <= 9.0 {
            Self::Structured
        } else {
            Self::Excellence
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Critical => "0 – 5",
            Self::Structured => "5,1 – 9",
            Self::Excellence => "9,1 – 10",
        }
    }

    pub const fn headline(self) -> &'static str {
        match self {
            Self::Critical => "Gestão com oportunidades críticas de melhoria",
            Self::Structured => "Gestão estruturada, mas com pontos de evolução",
            Self::Excellence => "Gestão de excelência e foco em performance contínua",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(ReportBand::from_score(0.0), ReportBand::Critical);
        assert_eq!(ReportBand::from_score(5.0), ReportBand::Critical);
        assert_eq!(ReportBand::from_score(5.1), ReportBand::Structured);
        assert_eq!(ReportBand::from_score(9.0), ReportBand::Structured);
        assert_eq!(ReportBand::from_score(9.1), ReportBand::Excellence);
        assert_eq!(ReportBand::from_score(10.0), ReportBand::Excellence);
    }
}

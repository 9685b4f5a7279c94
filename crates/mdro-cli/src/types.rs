use std::path::PathBuf;

use mdro_model::{Alert, AlertLevel, ForecastPoint, PeriodKey};
use mdro_report::{
    AccuracySummary, ClassTwoReport, CorrelationMatrix, CountTable, OrganismCount,
    SpecimenOrganismCount, SusceptibilitySummary, YearAccuracy, YearOrganismCount,
};
use mdro_transform::PreprocessStats;

#[derive(Debug)]
pub struct PreprocessResult {
    pub files_loaded: Vec<PathBuf>,
    pub files_skipped: Vec<(PathBuf, String)>,
    pub stats: PreprocessStats,
    pub output: PathBuf,
    pub stats_output: Option<PathBuf>,
}

/// Rows read from an isolate table and how many were unusable.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsolateInput {
    pub isolates: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct SentinelResult {
    pub input: IsolateInput,
    pub table: CountTable,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct ClassTwoResult {
    pub input: IsolateInput,
    pub report: ClassTwoReport,
    pub output: PathBuf,
    pub monthly_output: PathBuf,
}

#[derive(Debug)]
pub struct OrganismsResult {
    pub input: IsolateInput,
    pub organisms: Vec<OrganismCount>,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct SpecimensResult {
    pub input: IsolateInput,
    pub counts: Vec<SpecimenOrganismCount>,
    pub totals: Vec<YearOrganismCount>,
    pub output: PathBuf,
    pub totals_output: PathBuf,
}

#[derive(Debug)]
pub struct SusceptibilityResult {
    pub input: IsolateInput,
    pub summary: SusceptibilitySummary,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct AlertsResult {
    pub points: Vec<ForecastPoint>,
    pub alerts: Vec<Alert>,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct LevelResult {
    pub level: AlertLevel,
    /// Month the level was evaluated at; `None` when the hospital table is empty.
    pub month: Option<PeriodKey>,
    pub hospital_alert: bool,
    pub community_alert: bool,
}

#[derive(Debug)]
pub struct AccuracyResult {
    pub years: Vec<YearAccuracy>,
    pub mean: Option<AccuracySummary>,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CorrelationResult {
    pub matrix: CorrelationMatrix,
    pub output: Option<PathBuf>,
}

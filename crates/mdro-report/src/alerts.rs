//! Outbreak alerts from forecast tables and the combined alert level.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use mdro_model::{Alert, AlertLevel, ForecastPoint, PeriodKey};

/// Points whose observed count exceeds the forecast upper bound, in input order.
pub fn detect_alerts(points: &[ForecastPoint]) -> Vec<Alert> {
    points
        .iter()
        .filter_map(|point| match (point.observed, point.upper) {
            (Some(observed), Some(upper)) if observed > upper => Some(Alert {
                period: point.period,
                observed,
                upper,
            }),
            _ => None,
        })
        .collect()
}

/// Overwrite each point's alert flag with the upper-bound comparison.
pub fn annotate_alerts(points: &mut [ForecastPoint]) {
    for point in points.iter_mut() {
        point.alert = Some(point.exceeds_upper());
    }
}

pub fn alert_message(alert: &Alert) -> String {
    format!(
        "Alert: {} - observed {:.1} > upper {:.1}",
        alert.period, alert.observed, alert.upper
    )
}

/// True when the series has a point at `period` and that point alerts.
pub fn alert_at(points: &[ForecastPoint], period: PeriodKey) -> bool {
    points
        .iter()
        .find(|point| point.period == period)
        .is_some_and(ForecastPoint::is_alert)
}

/// Combine hospital and community alerts into a five-step level.
///
/// Two consecutive hospital alerts in the most recent periods raise the
/// alarm regardless of `current`. Otherwise the level depends on which
/// series alert at `current`, which defaults to the latest hospital period.
pub fn alert_level(
    hospital: &[ForecastPoint],
    community: &[ForecastPoint],
    current: Option<PeriodKey>,
) -> AlertLevel {
    let mut recent: Vec<&ForecastPoint> = hospital.iter().collect();
    recent.sort_by(|a, b| b.period.cmp(&a.period));
    if recent.len() >= 2 && recent.iter().take(2).all(|point| point.is_alert()) {
        return AlertLevel::Alarm;
    }
    let Some(current) = current.or_else(|| recent.first().map(|point| point.period)) else {
        return AlertLevel::Stable;
    };
    match (alert_at(hospital, current), alert_at(community, current)) {
        (true, true) => AlertLevel::CautionElevated,
        (true, false) => AlertLevel::CautionMinor,
        (false, true) => AlertLevel::Watch,
        (false, false) => AlertLevel::Stable,
    }
}

/// Forecast table with its alert column, in the usual `ds`/`y`/`yhat` layout.
pub fn forecast_frame(points: &[ForecastPoint]) -> PolarsResult<DataFrame> {
    let periods: Vec<String> = points
        .iter()
        .map(|point| {
            point
                .period
                .start_date()
                .map_or_else(|| point.period.to_string(), |date| date.to_string())
        })
        .collect();
    let values = |f: fn(&ForecastPoint) -> Option<f64>| -> Vec<Option<f64>> {
        points.iter().map(f).collect()
    };
    let alerts: Vec<bool> = points.iter().map(ForecastPoint::is_alert).collect();
    DataFrame::new(vec![
        Series::new("ds".into(), periods).into_column(),
        Series::new("y".into(), values(|point| point.observed)).into_column(),
        Series::new("yhat".into(), values(|point| point.expected)).into_column(),
        Series::new("yhat_lower".into(), values(|point| point.lower)).into_column(),
        Series::new("yhat_upper".into(), values(|point| point.upper)).into_column(),
        Series::new("alert".into(), alerts).into_column(),
    ])
}

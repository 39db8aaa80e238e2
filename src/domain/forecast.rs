use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate};

use super::errors::DomainError;
use super::ports::SalesModel;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DAYS_PER_WEEK: u32 = 7;

/// Model point estimate for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub yhat: f64,
}

/// Parse a `YYYY-MM-DD` date. The year is exactly four digits; chrono's
/// signed extended years (`+262142-...`) are rejected.
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    if bytes.len() < 5 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return Err(DomainError::invalid_date());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| DomainError::invalid_date())
}

/// Monday of the ISO week containing `anchor`.
pub fn week_start(anchor: NaiveDate) -> Result<NaiveDate, DomainError> {
    anchor
        .checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))
        .ok_or_else(DomainError::invalid_date)
}

/// Round a sales total to cents for presentation.
pub fn round_sales(total: f64) -> f64 {
    (total * 100.0).round() / 100.0
}

/// Turns dates and date ranges into summed model predictions.
#[derive(Clone)]
pub struct SalesForecaster {
    model: Arc<dyn SalesModel>,
}

impl SalesForecaster {
    pub fn new(model: Arc<dyn SalesModel>) -> Self {
        Self { model }
    }

    /// `num_days` consecutive dates starting at `start`, inclusive.
    pub fn date_range(start: NaiveDate, num_days: u32) -> Result<Vec<NaiveDate>, DomainError> {
        if num_days == 0 {
            return Err(DomainError::Validation(
                "Forecast range must cover at least one day".to_string(),
            ));
        }
        let dates: Vec<NaiveDate> = start.iter_days().take(num_days as usize).collect();
        if dates.len() != num_days as usize {
            return Err(DomainError::Validation(
                "Forecast range runs past the last representable date".to_string(),
            ));
        }
        Ok(dates)
    }

    /// Total predicted sales over `num_days` days from `start`, unrounded.
    pub fn forecast_range(&self, start: NaiveDate, num_days: u32) -> Result<f64, DomainError> {
        let dates = Self::date_range(start, num_days)?;
        let predictions = self.model.predict(&dates)?;

        if predictions.len() != dates.len() {
            return Err(DomainError::Computation(format!(
                "model returned {} estimates for {} dates",
                predictions.len(),
                dates.len()
            )));
        }

        let mut total = 0.0_f64;
        for prediction in &predictions {
            if !prediction.yhat.is_finite() {
                return Err(DomainError::Computation(format!(
                    "model produced a non-finite estimate for {}",
                    prediction.date
                )));
            }
            total += prediction.yhat;
        }

        log::debug!(
            "forecast {} day(s) from {}: total {}",
            num_days,
            start,
            total
        );
        Ok(total)
    }

    /// Total predicted sales for the Monday-to-Sunday week containing `anchor`.
    pub fn forecast_week(&self, anchor: NaiveDate) -> Result<f64, DomainError> {
        self.forecast_range(week_start(anchor)?, DAYS_PER_WEEK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    /// Predicts `100 + day-of-month` and remembers every date it was asked for.
    #[derive(Default)]
    struct RecordingModel {
        calls: Mutex<Vec<Vec<NaiveDate>>>,
    }

    impl SalesModel for RecordingModel {
        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<DailyForecast>, DomainError> {
            self.calls
                .lock()
                .expect("lock poisoned")
                .push(dates.to_vec());
            Ok(dates
                .iter()
                .map(|&date| DailyForecast {
                    date,
                    yhat: 100.0 + f64::from(date.day()),
                })
                .collect())
        }
    }

    struct ShortModel;

    impl SalesModel for ShortModel {
        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<DailyForecast>, DomainError> {
            Ok(dates
                .iter()
                .skip(1)
                .map(|&date| DailyForecast { date, yhat: 1.0 })
                .collect())
        }
    }

    struct NanModel;

    impl SalesModel for NanModel {
        fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<DailyForecast>, DomainError> {
            Ok(dates
                .iter()
                .map(|&date| DailyForecast {
                    date,
                    yhat: f64::NAN,
                })
                .collect())
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn range_sums_one_estimate_per_day() {
        let model = Arc::new(RecordingModel::default());
        let forecaster = SalesForecaster::new(model.clone());

        let total = forecaster
            .forecast_range(ymd(2024, 6, 1), 7)
            .expect("forecast");

        // days 1..=7
        assert_eq!(total, 700.0 + 28.0);
        let calls = model.calls.lock().expect("lock poisoned");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 7);
        assert_eq!(calls[0][0], ymd(2024, 6, 1));
        assert_eq!(calls[0][6], ymd(2024, 6, 7));
    }

    #[test]
    fn range_crosses_month_boundaries() {
        let dates = SalesForecaster::date_range(ymd(2024, 2, 27), 4).expect("range");
        assert_eq!(
            dates,
            vec![
                ymd(2024, 2, 27),
                ymd(2024, 2, 28),
                ymd(2024, 2, 29),
                ymd(2024, 3, 1)
            ]
        );
    }

    #[test]
    fn zero_day_range_is_rejected() {
        let forecaster = SalesForecaster::new(Arc::new(RecordingModel::default()));
        assert!(matches!(
            forecaster.forecast_range(ymd(2024, 6, 1), 0),
            Err(DomainError::Validation(_))
        ));
    }

    #[rstest]
    #[case(ymd(2024, 6, 10))]
    #[case(ymd(2024, 6, 12))]
    #[case(ymd(2024, 6, 14))]
    #[case(ymd(2024, 6, 16))]
    fn week_spans_monday_to_sunday(#[case] anchor: NaiveDate) {
        let model = Arc::new(RecordingModel::default());
        let forecaster = SalesForecaster::new(model.clone());

        forecaster.forecast_week(anchor).expect("forecast");

        let calls = model.calls.lock().expect("lock poisoned");
        let first = *calls[0].first().expect("non-empty");
        let last = *calls[0].last().expect("non-empty");
        assert_eq!(first, ymd(2024, 6, 10));
        assert_eq!(last, ymd(2024, 6, 16));
        assert_eq!(calls[0].len(), 7);
    }

    #[test]
    fn week_can_start_in_the_previous_year() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(ymd(2025, 1, 1)).expect("in range"), ymd(2024, 12, 30));
    }

    #[test]
    fn missing_estimates_are_a_computation_error() {
        let forecaster = SalesForecaster::new(Arc::new(ShortModel));
        assert!(matches!(
            forecaster.forecast_range(ymd(2024, 6, 1), 7),
            Err(DomainError::Computation(_))
        ));
    }

    #[test]
    fn non_finite_estimates_are_a_computation_error() {
        let forecaster = SalesForecaster::new(Arc::new(NanModel));
        assert!(matches!(
            forecaster.forecast_week(ymd(2024, 6, 12)),
            Err(DomainError::Computation(_))
        ));
    }

    #[rstest]
    #[case("2024/13/40")]
    #[case("2024-13-01")]
    #[case("2024-02-30")]
    #[case("12-06-2024")]
    #[case("")]
    #[case("+262142-12-31")]
    #[case("-0001-01-01")]
    #[case("20240-01-01")]
    fn malformed_dates_fail_validation(#[case] raw: &str) {
        assert!(matches!(parse_date(raw), Err(DomainError::Validation(_))));
    }

    #[test]
    fn week_before_the_first_representable_monday_is_invalid() {
        // NaiveDate::MIN is not a Monday, so its week starts out of range.
        assert!(NaiveDate::MIN.weekday() != chrono::Weekday::Mon);
        assert!(matches!(
            week_start(NaiveDate::MIN),
            Err(DomainError::Validation(_))
        ));

        let forecaster = SalesForecaster::new(Arc::new(RecordingModel::default()));
        assert!(matches!(
            forecaster.forecast_week(NaiveDate::MIN),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-06-12").expect("valid"), ymd(2024, 6, 12));
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_sales(1234.5678), 1234.57);
        assert_eq!(round_sales(10.0), 10.0);
        assert_eq!(round_sales(-3.14159), -3.14);
    }
}

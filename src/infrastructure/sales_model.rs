//! File-backed sales model.
//!
//! The artifact is a JSON document describing an additive decomposition
//! fitted offline:
//!
//! ```text
//! yhat(d) = trend(d) + weekly[weekday(d)] + yearly(d) + holiday(d)
//! ```
//!
//! `trend` is piecewise linear around an anchor date, `weekly` holds seven
//! Monday-first offsets, `yearly` is an optional Fourier series and
//! `holidays` lists one-off additive effects.

use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::forecast::DailyForecast;
use crate::domain::ports::SalesModel;

const DEFAULT_YEAR_DAYS: f64 = 365.25;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("cannot read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
struct Changepoint {
    date: NaiveDate,
    slope_delta: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct Trend {
    anchor: NaiveDate,
    intercept: f64,
    slope: f64,
    #[serde(default)]
    changepoints: Vec<Changepoint>,
}

#[derive(Debug, Clone, Deserialize)]
struct Yearly {
    #[serde(default = "default_year_days")]
    period_days: f64,
    coefficients: Vec<[f64; 2]>,
}

fn default_year_days() -> f64 {
    DEFAULT_YEAR_DAYS
}

#[derive(Debug, Clone, Deserialize)]
struct HolidayEffect {
    date: NaiveDate,
    effect: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdditiveSalesModel {
    trend: Trend,
    weekly: Vec<f64>,
    #[serde(default)]
    yearly: Option<Yearly>,
    #[serde(default)]
    holidays: Vec<HolidayEffect>,
}

impl AdditiveSalesModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json(&raw)?;
        log::info!("loaded sales model from {}", path.display());
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.weekly.len() != 7 {
            return Err(ModelLoadError::Invalid(format!(
                "weekly needs 7 coefficients, got {}",
                self.weekly.len()
            )));
        }

        let mut numbers = vec![self.trend.intercept, self.trend.slope];
        numbers.extend(self.trend.changepoints.iter().map(|c| c.slope_delta));
        numbers.extend(self.weekly.iter().copied());
        numbers.extend(self.holidays.iter().map(|h| h.effect));
        if let Some(yearly) = &self.yearly {
            if !(yearly.period_days.is_finite() && yearly.period_days > 0.0) {
                return Err(ModelLoadError::Invalid(
                    "yearly.period_days must be positive".to_string(),
                ));
            }
            numbers.extend(yearly.coefficients.iter().flatten().copied());
        }
        if numbers.iter().any(|n| !n.is_finite()) {
            return Err(ModelLoadError::Invalid(
                "every coefficient must be a finite number".to_string(),
            ));
        }
        Ok(())
    }

    fn trend_at(&self, date: NaiveDate) -> f64 {
        let t = days_between(self.trend.anchor, date);
        let bends: f64 = self
            .trend
            .changepoints
            .iter()
            .filter(|c| date > c.date)
            .map(|c| c.slope_delta * days_between(c.date, date))
            .sum();
        self.trend.intercept + self.trend.slope * t + bends
    }

    fn yearly_at(&self, date: NaiveDate) -> f64 {
        let Some(yearly) = &self.yearly else {
            return 0.0;
        };
        let t = days_between(self.trend.anchor, date);
        yearly
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, [a, b])| {
                let angle = TAU * (i + 1) as f64 * t / yearly.period_days;
                a * angle.cos() + b * angle.sin()
            })
            .sum()
    }

    fn holiday_at(&self, date: NaiveDate) -> f64 {
        self.holidays
            .iter()
            .filter(|h| h.date == date)
            .map(|h| h.effect)
            .sum()
    }

    pub fn point_estimate(&self, date: NaiveDate) -> f64 {
        let weekday = date.weekday().num_days_from_monday() as usize;
        self.trend_at(date) + self.weekly[weekday] + self.yearly_at(date) + self.holiday_at(date)
    }
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}

impl SalesModel for AdditiveSalesModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<DailyForecast>, DomainError> {
        dates
            .iter()
            .map(|&date| {
                let yhat = self.point_estimate(date);
                if yhat.is_finite() {
                    Ok(DailyForecast { date, yhat })
                } else {
                    Err(DomainError::Computation(format!(
                        "no finite estimate for {}",
                        date
                    )))
                }
            })
            .collect()
    }
}

//! Wind generation series returned by the API.

use crate::date_range::Selection;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Parses a datetime as sent by the wind API.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC), or a bare
/// `YYYY-MM-DD` (UTC midnight).
pub fn parse_api_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(format!("Unrecognised datetime '{}'", s))
}

fn deserialize_api_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_api_datetime(&raw).map_err(serde::de::Error::custom)
}

/// A single half-hourly measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(deserialize_with = "deserialize_api_datetime")]
    pub timestamp: DateTime<Utc>,
    /// Generated wind power in megawatts.
    pub wind_mw: f64,
}

/// The samples returned for one selection, kept together with that selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedSeries {
    pub selection: Selection,
    pub samples: Vec<Sample>,
}

impl FetchedSeries {
    pub fn new(selection: Selection, samples: Vec<Sample>) -> Self {
        Self { selection, samples }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::from_samples(&self.samples)
    }

    /// Chart points as (seconds since the first sample, MW).
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let Some(first) = self.samples.first() else {
            return Vec::new();
        };
        self.samples
            .iter()
            .map(|s| {
                let offset = (s.timestamp - first.timestamp).num_seconds() as f64;
                (offset, s.wind_mw)
            })
            .collect()
    }
}

/// Aggregate figures shown beside the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub min_mw: f64,
    pub max_mw: f64,
    pub mean_mw: f64,
    pub peak_at: DateTime<Utc>,
    pub first_at: DateTime<Utc>,
    pub last_at: DateTime<Utc>,
}

impl SeriesSummary {
    pub fn from_samples(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;
        let mut min_mw = f64::INFINITY;
        let mut peak = first;
        let mut total = 0.0;
        for sample in samples {
            min_mw = min_mw.min(sample.wind_mw);
            if sample.wind_mw > peak.wind_mw {
                peak = sample;
            }
            total += sample.wind_mw;
        }
        Some(Self {
            count: samples.len(),
            min_mw,
            max_mw: peak.wind_mw,
            mean_mw: total / samples.len() as f64,
            peak_at: peak.timestamp,
            first_at: first.timestamp,
            last_at: last.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(h: u32, m: u32, mw: f64) -> Sample {
        Sample {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap(),
            wind_mw: mw,
        }
    }

    #[test]
    fn test_parse_api_datetime_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 9, 20, 0, 30, 0).unwrap();
        assert_eq!(parse_api_datetime("2020-09-20T00:30:00Z"), Ok(expected));
        assert_eq!(parse_api_datetime("2020-09-20T01:30:00+01:00"), Ok(expected));
        assert_eq!(parse_api_datetime("2020-09-20T00:30:00"), Ok(expected));
        assert_eq!(parse_api_datetime("2020-09-20 00:30:00"), Ok(expected));
        assert_eq!(
            parse_api_datetime("2020-09-20"),
            Ok(Utc.with_ymd_and_hms(2020, 9, 20, 0, 0, 0).unwrap())
        );
        assert!(parse_api_datetime("yesterday").is_err());
    }

    #[test]
    fn test_sample_deserializes_from_api_record() {
        let samples: Vec<Sample> = serde_json::from_str(
            r#"[{"timestamp": "2024-01-01T00:00:00", "wind_mw": 812.5},
                {"timestamp": "2024-01-01T00:30:00Z", "wind_mw": 790}]"#,
        )
        .unwrap();
        assert_eq!(samples, vec![sample(0, 0, 812.5), sample(0, 30, 790.0)]);
    }

    #[test]
    fn test_sample_rejects_bad_timestamp() {
        let result: Result<Sample, _> =
            serde_json::from_str(r#"{"timestamp": "soon", "wind_mw": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_summary() {
        let samples = vec![sample(0, 0, 10.0), sample(0, 30, 40.0), sample(1, 0, 25.0)];
        let summary = SeriesSummary::from_samples(&samples).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min_mw, 10.0);
        assert_eq!(summary.max_mw, 40.0);
        assert_eq!(summary.mean_mw, 25.0);
        assert_eq!(summary.peak_at, samples[1].timestamp);
        assert_eq!(summary.first_at, samples[0].timestamp);
        assert_eq!(summary.last_at, samples[2].timestamp);

        assert!(SeriesSummary::from_samples(&[]).is_none());
    }
}

//! Sample instant reconstruction
//!
//! A provider block only carries `(start, end, interval)`. The instants are
//! rebuilt here so they line up 1:1 with every value column of the block.

use chrono::{DateTime, Duration, Utc};

use crate::error::{SeriesError, SeriesResult};
use crate::models::{SeriesVariable, TimeSeriesBlock};

/// Number of samples in `[start, end)` at the given interval
pub fn sample_count(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
) -> SeriesResult<usize> {
    let step = interval.num_seconds();
    if step <= 0 || interval != Duration::seconds(step) {
        return Err(SeriesError::MalformedBlock(format!(
            "interval must be a positive whole number of seconds, got {}",
            interval
        )));
    }

    let span = (end - start).num_seconds();
    if span < 0 {
        return Err(SeriesError::MalformedBlock(format!(
            "end {} precedes start {}",
            end, start
        )));
    }
    if span % step != 0 {
        return Err(SeriesError::MalformedBlock(format!(
            "span of {}s is not a multiple of the {}s interval",
            span, step
        )));
    }

    usize::try_from(span / step)
        .map_err(|_| SeriesError::MalformedBlock(format!("{} samples do not fit", span / step)))
}

/// Expand a block into its ordered sample instants
pub fn reconstruct<V: SeriesVariable>(
    block: &TimeSeriesBlock<V>,
) -> SeriesResult<Vec<DateTime<Utc>>> {
    instants(block.start, block.end, block.interval)
}

/// Instants `start + i * interval` for every `i` in `[0, count)`
pub fn instants(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    interval: Duration,
) -> SeriesResult<Vec<DateTime<Utc>>> {
    let count = sample_count(start, end, interval)?;
    let mut instants = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        instants.push(current);
        current += interval;
    }
    Ok(instants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyVariable;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_reconstruct_week_of_days() {
        let block: TimeSeriesBlock<DailyVariable> =
            TimeSeriesBlock::new(at(2024, 7, 15, 0), at(2024, 7, 22, 0), Duration::days(1));

        let instants = reconstruct(&block).unwrap();

        assert_eq!(instants.len(), 7);
        assert_eq!(instants[0], at(2024, 7, 15, 0));
        assert_eq!(instants[6], at(2024, 7, 21, 0));
        assert!(!instants.contains(&block.end));
    }

    #[test]
    fn test_reconstruct_hourly() {
        let instants = instants(at(2024, 7, 15, 0), at(2024, 7, 16, 0), Duration::hours(1)).unwrap();
        assert_eq!(instants.len(), 24);
        assert_eq!(instants[23], at(2024, 7, 15, 23));
    }

    #[test]
    fn test_empty_span_yields_no_instants() {
        let instants = instants(at(2024, 7, 15, 0), at(2024, 7, 15, 0), Duration::days(1)).unwrap();
        assert!(instants.is_empty());
    }

    #[test]
    fn test_uneven_span_is_malformed() {
        let result = instants(at(2024, 7, 15, 0), at(2024, 7, 15, 5), Duration::hours(2));
        assert!(matches!(result, Err(SeriesError::MalformedBlock(_))));
    }

    #[test]
    fn test_reversed_span_is_malformed() {
        let result = instants(at(2024, 7, 16, 0), at(2024, 7, 15, 0), Duration::hours(1));
        assert!(matches!(result, Err(SeriesError::MalformedBlock(_))));
    }

    #[test]
    fn test_zero_interval_is_malformed() {
        let result = instants(at(2024, 7, 15, 0), at(2024, 7, 16, 0), Duration::zero());
        assert!(matches!(result, Err(SeriesError::MalformedBlock(_))));
    }

    #[test]
    fn test_block_validate_detects_short_column() {
        let block = TimeSeriesBlock::new(at(2024, 7, 15, 0), at(2024, 7, 18, 0), Duration::days(1))
            .with_variable(DailyVariable::TemperatureMax, vec![20.0, 21.0, 22.0])
            .with_variable(DailyVariable::TemperatureMin, vec![10.0, 11.0]);

        assert_eq!(
            block.validate(),
            Err(SeriesError::LengthMismatch {
                column: "temperature_2m_min".to_string(),
                expected: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_block_values_by_key() {
        let block = TimeSeriesBlock::new(at(2024, 7, 15, 0), at(2024, 7, 16, 0), Duration::days(1))
            .with_variable(DailyVariable::PrecipitationSum, vec![1.5])
            .with_variable(DailyVariable::TemperatureMax, vec![25.0]);

        assert_eq!(block.values(DailyVariable::TemperatureMax).unwrap(), &[25.0]);
        assert_eq!(
            block.values(DailyVariable::WeatherCode),
            Err(SeriesError::MissingVariable("weathercode".to_string()))
        );
    }
}

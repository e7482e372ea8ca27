//! Property tests for the time-series pipeline
//!
//! - Reconstruction: instant count, spacing and half-open end
//! - Record building: one record per instant, order kept
//! - Solar yield: linear in the hours of sunshine
//! - Weekly classification: threshold on rainy days

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::{
    build_daily_records, build_hourly_records, calculate_solar_energy, reconstruct, summarize,
    DailyColumns, DailyVariable, HourlyVariable, SeriesError, SolarModel, TimeSeriesBlock,
    WeekClassification,
};

fn start_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    // 2000-01-01 .. 2040-01-01, whole seconds
    (946_684_800i64..2_208_988_800i64).prop_map(|ts| Utc.timestamp_opt(ts, 0).unwrap())
}

fn interval_strategy() -> impl Strategy<Value = Duration> {
    prop_oneof![
        Just(Duration::hours(1)),
        Just(Duration::hours(3)),
        Just(Duration::days(1)),
        (1i64..86_400).prop_map(Duration::seconds),
    ]
}

proptest! {
    #[test]
    fn prop_reconstruct_is_uniform_and_half_open(
        start in start_strategy(),
        interval in interval_strategy(),
        count in 0usize..400,
    ) {
        let end = start + interval * count as i32;
        let block = TimeSeriesBlock::<HourlyVariable>::new(start, end, interval);

        let instants = reconstruct(&block).unwrap();

        prop_assert_eq!(instants.len(), count);
        for (i, instant) in instants.iter().enumerate() {
            prop_assert_eq!(*instant, start + interval * i as i32);
            prop_assert!(*instant < end);
        }
        for pair in instants.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn prop_uneven_span_is_malformed(
        start in start_strategy(),
        steps in 1i64..100,
        remainder in 1i64..3600,
    ) {
        let interval = Duration::hours(1);
        let end = start + Duration::seconds(steps * 3600 + remainder);
        let block = TimeSeriesBlock::<HourlyVariable>::new(start, end, interval);

        prop_assert!(matches!(reconstruct(&block), Err(SeriesError::MalformedBlock(_))));
    }

    #[test]
    fn prop_daily_records_follow_instants(
        start in start_strategy(),
        rows in prop::collection::vec(
            (-40.0f64..50.0, -50.0f64..40.0, 0.0f64..86_400.0, 0.0f64..80.0),
            0..30,
        ),
    ) {
        let interval = Duration::days(1);
        let end = start + interval * rows.len() as i32;
        let instants = reconstruct(&TimeSeriesBlock::<DailyVariable>::new(start, end, interval)).unwrap();

        let max_temp: Vec<f64> = rows.iter().map(|r| r.0).collect();
        let min_temp: Vec<f64> = rows.iter().map(|r| r.1).collect();
        let sunshine: Vec<f64> = rows.iter().map(|r| r.2).collect();
        let precipitation: Vec<f64> = rows.iter().map(|r| r.3).collect();
        let columns = DailyColumns {
            max_temp: &max_temp,
            min_temp: &min_temp,
            sunshine_duration: &sunshine,
            precipitation_sum: &precipitation,
            weather_code: None,
        };

        let records = build_daily_records(&instants, &columns, &SolarModel::default()).unwrap();

        prop_assert_eq!(records.len(), rows.len());
        for (i, record) in records.iter().enumerate() {
            prop_assert_eq!(record.date, instants[i].date_naive());
            prop_assert_eq!(record.max_temp, max_temp[i]);
            prop_assert_eq!(record.min_temp, min_temp[i]);
            prop_assert_eq!(record.sunshine_hours, sunshine[i] / 3600.0);
            prop_assert!(record.weather_icon.is_none());
        }
    }

    #[test]
    fn prop_short_column_is_rejected(
        start in start_strategy(),
        len in 1usize..200,
    ) {
        let interval = Duration::hours(1);
        let end = start + interval * len as i32;
        let instants = reconstruct(&TimeSeriesBlock::<HourlyVariable>::new(start, end, interval)).unwrap();
        let pressure = vec![1013.0; len - 1];

        let is_length_mismatch = matches!(
            build_hourly_records(&instants, &pressure),
            Err(SeriesError::LengthMismatch { .. })
        );
        prop_assert!(is_length_mismatch);
    }

    #[test]
    fn prop_default_yield_is_half_the_hours(hours in 0.0f64..24.0) {
        let energy = calculate_solar_energy(hours, &SolarModel::default());
        prop_assert_eq!(energy, 0.5 * hours);
    }

    #[test]
    fn prop_yield_scales_with_capacity(
        hours in 0.0f64..24.0,
        capacity in 0.1f64..100.0,
        efficiency in 0.01f64..1.0,
    ) {
        let model = SolarModel {
            power_capacity_kw: capacity,
            efficiency,
            ..SolarModel::default()
        };
        let energy = calculate_solar_energy(hours, &model);

        prop_assert!(energy >= 0.0);
        prop_assert!(energy <= capacity * hours + 1e-9);
    }

    #[test]
    fn prop_week_classification_threshold(rainy in 0usize..=7) {
        let now = Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        let interval = Duration::days(1);
        let instants = reconstruct(
            &TimeSeriesBlock::<DailyVariable>::new(start, start + interval * 7, interval),
        ).unwrap();

        let temps = vec![20.0; 7];
        let sunshine = vec![3600.0; 7];
        let precipitation: Vec<f64> = (0..7).map(|d| if d < rainy { 1.0 } else { 0.0 }).collect();
        let columns = DailyColumns {
            max_temp: &temps,
            min_temp: &temps,
            sunshine_duration: &sunshine,
            precipitation_sum: &precipitation,
            weather_code: None,
        };
        let model = SolarModel::default();
        let daily = build_daily_records(&instants, &columns, &model).unwrap();
        let hourly_instants = reconstruct(
            &TimeSeriesBlock::<HourlyVariable>::new(start, start + Duration::hours(24), Duration::hours(1)),
        ).unwrap();
        let hourly = build_hourly_records(&hourly_instants, &[1000.0; 24]).unwrap();

        let summary = summarize(&daily, &hourly, now, &model).unwrap();

        let expected = if rainy >= model.rainy_day_threshold {
            WeekClassification::RainyWeek
        } else {
            WeekClassification::DryWeek
        };
        prop_assert_eq!(summary.weather_summary, expected);
        prop_assert_eq!(summary.avg_pressure, 1000.0);
    }
}

//! The fixed Arctic climate dataset, 1925–2050.
//!
//! Six year-indexed records spanning a century of observation and
//! projection. The sequence is chronological and index-aligned with
//! chart rendering, so its length and order never change.

use serde::{Deserialize, Serialize};

/// One historical or projected data point for a given year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u16,
    /// Sea ice extent in millions of km².
    pub ice_area_mkm2: f64,
    /// Temperature anomaly in °C relative to the baseline period.
    pub temp_anomaly_c: f64,
    /// Estimated polar bear population.
    pub bear_population: u32,
    /// Regional energy consumption in TWh.
    pub energy_twh: f64,
    /// Human population in millions.
    pub population_millions: f64,
}

/// Number of records in the dataset.
pub const RECORD_COUNT: usize = 6;

/// Year selected when the session starts or a lookup falls through.
pub const DEFAULT_YEAR: u16 = 2025;

/// The full dataset, chronological.
pub const RECORDS: [YearRecord; RECORD_COUNT] = [
    YearRecord {
        year: 1925,
        ice_area_mkm2: 14.8,
        temp_anomaly_c: -0.2,
        bear_population: 25000,
        energy_twh: 5.2,
        population_millions: 2.8,
    },
    YearRecord {
        year: 1950,
        ice_area_mkm2: 14.5,
        temp_anomaly_c: -0.1,
        bear_population: 24500,
        energy_twh: 6.8,
        population_millions: 3.1,
    },
    YearRecord {
        year: 1975,
        ice_area_mkm2: 14.2,
        temp_anomaly_c: 0.0,
        bear_population: 24000,
        energy_twh: 8.4,
        population_millions: 3.5,
    },
    YearRecord {
        year: 2000,
        ice_area_mkm2: 13.1,
        temp_anomaly_c: 0.4,
        bear_population: 23000,
        energy_twh: 10.2,
        population_millions: 3.8,
    },
    YearRecord {
        year: 2025,
        ice_area_mkm2: 11.8,
        temp_anomaly_c: 1.1,
        bear_population: 22000,
        energy_twh: 12.4,
        population_millions: 4.0,
    },
    YearRecord {
        year: 2050,
        ice_area_mkm2: 9.2,
        temp_anomaly_c: 2.0,
        bear_population: 18000,
        energy_twh: 15.6,
        population_millions: 4.3,
    },
];

/// Whether a year is one of the six dataset years.
pub fn is_dataset_year(year: u16) -> bool {
    RECORDS.iter().any(|r| r.year == year)
}

/// All dataset years in chronological order.
pub fn years() -> [u16; RECORD_COUNT] {
    RECORDS.map(|r| r.year)
}

/// Look up the record for a year.
///
/// Falls back to the [`DEFAULT_YEAR`] entry when the year is not part
/// of the dataset, so callers always get a record to display.
pub fn record_for_year(year: u16) -> &'static YearRecord {
    RECORDS
        .iter()
        .find(|r| r.year == year)
        .unwrap_or(&RECORDS[4])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_chronological() {
        for pair in RECORDS.windows(2) {
            assert!(pair[0].year < pair[1].year);
        }
    }

    #[test]
    fn record_count_fixed() {
        assert_eq!(RECORDS.len(), RECORD_COUNT);
        assert_eq!(years().len(), RECORD_COUNT);
    }

    #[test]
    fn lookup_exact_year() {
        let r = record_for_year(2000);
        assert_eq!(r.year, 2000);
        assert!((r.temp_anomaly_c - 0.4).abs() < f64::EPSILON);
        assert_eq!(r.bear_population, 23000);
    }

    #[test]
    fn lookup_unknown_year_falls_back_to_2025() {
        let r = record_for_year(1999);
        assert_eq!(r.year, DEFAULT_YEAR);
        assert!((r.energy_twh - 12.4).abs() < f64::EPSILON);
    }

    #[test]
    fn dataset_year_membership() {
        assert!(is_dataset_year(1925));
        assert!(is_dataset_year(2050));
        assert!(!is_dataset_year(2024));
    }

    #[test]
    fn trends_are_monotonic() {
        // Ice shrinks, temperature and energy climb across the century.
        for pair in RECORDS.windows(2) {
            assert!(pair[1].ice_area_mkm2 < pair[0].ice_area_mkm2);
            assert!(pair[1].temp_anomaly_c >= pair[0].temp_anomaly_c);
            assert!(pair[1].energy_twh > pair[0].energy_twh);
        }
    }
}

//! Role-specific display metrics and chart series.
//!
//! Pure derivation over the fixed dataset: each role highlights one
//! field of a [`YearRecord`], formatted with its units and a static
//! trend annotation. With no role selected the ice-area metric is shown.

use serde::Serialize;

use crate::climate::{YearRecord, RECORDS};
use crate::role::Role;

/// A display metric for the map panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleMetric {
    /// What the number measures.
    pub label: &'static str,
    /// Formatted value with units.
    pub value: String,
    /// Per-role trend annotation. A fixed string, not derived from data.
    pub trend: &'static str,
}

/// Derive the role-highlighted metric for one record.
pub fn derive_metric(role: Option<Role>, record: &YearRecord) -> RoleMetric {
    match role {
        Some(Role::Climatologist) => RoleMetric {
            label: "Температура",
            value: format!(
                "{}{}°C",
                if record.temp_anomaly_c > 0.0 { "+" } else { "" },
                record.temp_anomaly_c
            ),
            trend: "+0.08°C/год",
        },
        Some(Role::Biologist) => RoleMetric {
            label: "Популяция медведей",
            value: format!("~{:.1}k", f64::from(record.bear_population) / 1000.0),
            trend: "-2.5%/год",
        },
        Some(Role::Engineer) => RoleMetric {
            label: "Энергопотребление",
            value: format!("{} ТВт·ч", record.energy_twh),
            trend: "+3.1%/год",
        },
        Some(Role::Journalist) => RoleMetric {
            label: "Жителей Арктики",
            value: format!("{} млн", record.population_millions),
            trend: "+0.5%/год",
        },
        None => RoleMetric {
            label: "Площадь льда",
            value: format!("{} млн км²", record.ice_area_mkm2),
            trend: "-3.2%/год",
        },
    }
}

/// Map the dataset to the numeric series charted for a role.
///
/// Temperature is offset by +2 so the bars stay positive; bear counts
/// are scaled to thousands. Length always equals the record count.
pub fn derive_series(role: Option<Role>, records: &[YearRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| match role {
            Some(Role::Climatologist) => r.temp_anomaly_c + 2.0,
            Some(Role::Biologist) => f64::from(r.bear_population) / 1000.0,
            Some(Role::Engineer) => r.energy_twh,
            Some(Role::Journalist) => r.population_millions,
            None => r.ice_area_mkm2,
        })
        .collect()
}

/// Largest value in a series, used to normalize bar heights.
pub fn series_max(series: &[f64]) -> f64 {
    series.iter().copied().fold(0.0, f64::max)
}

/// Ice-area decline since the first record, as a percentage.
pub fn ice_decline_percent(record: &YearRecord) -> f64 {
    let baseline = RECORDS[0].ice_area_mkm2;
    (baseline - record.ice_area_mkm2) / baseline * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::record_for_year;

    #[test]
    fn metric_reflects_role_field() {
        let r2025 = record_for_year(2025);
        assert_eq!(
            derive_metric(Some(Role::Engineer), r2025).value,
            "12.4 ТВт·ч"
        );
        assert_eq!(
            derive_metric(Some(Role::Biologist), r2025).value,
            "~22.0k"
        );
        assert_eq!(
            derive_metric(Some(Role::Journalist), r2025).value,
            "4 млн"
        );
    }

    #[test]
    fn temperature_sign_formatting() {
        assert_eq!(
            derive_metric(Some(Role::Climatologist), record_for_year(2025)).value,
            "+1.1°C"
        );
        assert_eq!(
            derive_metric(Some(Role::Climatologist), record_for_year(1925)).value,
            "-0.2°C"
        );
        // Zero carries no sign.
        assert_eq!(
            derive_metric(Some(Role::Climatologist), record_for_year(1975)).value,
            "0°C"
        );
    }

    #[test]
    fn no_role_shows_ice_area() {
        let m = derive_metric(None, record_for_year(1925));
        assert_eq!(m.label, "Площадь льда");
        assert_eq!(m.value, "14.8 млн км²");
    }

    #[test]
    fn metric_defined_for_all_role_year_combos() {
        for record in &RECORDS {
            for role in Role::ALL {
                let m = derive_metric(Some(role), record);
                assert!(!m.label.is_empty());
                assert!(!m.value.is_empty());
                assert!(!m.trend.is_empty());
            }
        }
    }

    #[test]
    fn series_length_matches_dataset() {
        for role in Role::ALL {
            assert_eq!(derive_series(Some(role), &RECORDS).len(), RECORDS.len());
        }
        assert_eq!(derive_series(None, &RECORDS).len(), RECORDS.len());
    }

    #[test]
    fn temperature_series_is_offset() {
        let series = derive_series(Some(Role::Climatologist), &RECORDS);
        // 1925 anomaly is -0.2, displayed as 1.8.
        assert!((series[0] - 1.8).abs() < 1e-9);
        assert!((series[5] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn bear_series_in_thousands() {
        let series = derive_series(Some(Role::Biologist), &RECORDS);
        assert!((series[3] - 23.0).abs() < 1e-9);
    }

    #[test]
    fn series_max_picks_largest() {
        let series = derive_series(Some(Role::Engineer), &RECORDS);
        assert!((series_max(&series) - 15.6).abs() < 1e-9);
    }

    #[test]
    fn ice_decline_from_baseline() {
        // 14.8 → 11.8 is roughly a 20% loss.
        let pct = ice_decline_percent(record_for_year(2025));
        assert!(pct > 20.0 && pct < 20.5);
        assert!(ice_decline_percent(record_for_year(1925)).abs() < 1e-9);
    }
}

//! Chart series derived from a snapshot.
//!
//! The weekly and monthly series are synthetic: the snapshot carries no usage
//! history, so they are produced by jittering a fraction of the total limit.
//! They are always flagged `illustrative` and can be left out entirely.

use chrono::NaiveDate;
use models::{ClaimOrder, Snapshot};
use rand::Rng;
use serde::Serialize;

pub const MONTHLY_PERIODS: usize = 6;
pub const WEEKLY_PERIODS: usize = 4;
pub const MONTHLY_DIVISOR: f64 = 10.0;
pub const WEEKLY_DIVISOR: f64 = 20.0;
pub const JITTER_MIN: f64 = 0.8;
pub const JITTER_MAX: f64 = 1.2;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimPoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// One point per claim. `Chronological` sorts by date; ties keep payload order.
pub fn claim_points(snapshot: &Snapshot, order: ClaimOrder) -> Vec<ClaimPoint> {
    let mut points: Vec<ClaimPoint> = snapshot
        .claims()
        .map(|claim| ClaimPoint {
            date: claim.claim_date,
            amount: claim.claim_amount,
        })
        .collect();
    if order == ClaimOrder::Chronological {
        points.sort_by_key(|p| p.date);
    }
    points
}

pub fn daily_series(points: &[ClaimPoint]) -> Vec<f64> {
    points.iter().map(|p| p.amount).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticSeries {
    /// Always true; carried into the output so consumers can label the chart.
    pub illustrative: bool,
    pub base: f64,
    pub values: Vec<f64>,
}

fn jittered<R: Rng + ?Sized>(base: f64, periods: usize, rng: &mut R) -> SyntheticSeries {
    let values = (0..periods)
        .map(|_| base * rng.gen_range(JITTER_MIN..JITTER_MAX))
        .collect();
    SyntheticSeries {
        illustrative: true,
        base,
        values,
    }
}

pub fn monthly_series<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> SyntheticSeries {
    jittered(
        snapshot.total_limit_allocated / MONTHLY_DIVISOR,
        MONTHLY_PERIODS,
        rng,
    )
}

pub fn weekly_series<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> SyntheticSeries {
    jittered(
        snapshot.total_limit_allocated / WEEKLY_DIVISOR,
        WEEKLY_PERIODS,
        rng,
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

pub fn daily_chart(points: &[ClaimPoint]) -> Vec<ChartPoint> {
    points
        .iter()
        .map(|p| ChartPoint {
            name: p.date.format("%b %-d").to_string(),
            value: p.amount,
        })
        .collect()
}

pub fn weekly_chart(series: &SyntheticSeries) -> Vec<ChartPoint> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| ChartPoint {
            name: format!("Week {}", i + 1),
            value: *v,
        })
        .collect()
}

pub fn monthly_chart(series: &SyntheticSeries) -> Vec<ChartPoint> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| ChartPoint {
            name: MONTH_LABELS[i % MONTH_LABELS.len()].to_string(),
            value: *v,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{fallback_snapshot, Claim, ClaimStatus};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn out_of_order_snapshot() -> Snapshot {
        let mut snapshot = fallback_snapshot();
        snapshot.claims_data.shift_insert(
            0,
            "claim_0".to_string(),
            Claim {
                claim_id: "C99999".to_string(),
                claim_amount: 50000.0,
                claim_date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
                claim_status: ClaimStatus::Other("Rejected".to_string()),
            },
        );
        snapshot
    }

    #[test]
    fn test_fallback_daily_series() {
        let snapshot = fallback_snapshot();
        let unsorted = claim_points(&snapshot, ClaimOrder::AsReceived);
        let sorted = claim_points(&snapshot, ClaimOrder::Chronological);
        assert_eq!(daily_series(&unsorted), vec![20000.0, 35000.0, 15000.0]);
        assert_eq!(daily_series(&sorted), vec![20000.0, 35000.0, 15000.0]);
    }

    #[test]
    fn test_claim_points_match_claims() {
        let snapshot = out_of_order_snapshot();
        let points = claim_points(&snapshot, ClaimOrder::AsReceived);
        assert_eq!(points.len(), snapshot.claims_data.len());
        for (point, claim) in points.iter().zip(snapshot.claims()) {
            assert_eq!(point.date, claim.claim_date);
            assert_eq!(point.amount, claim.claim_amount);
        }
    }

    #[test]
    fn test_chronological_order_sorts_by_date() {
        let snapshot = out_of_order_snapshot();
        // claim_0 arrives first but is the latest claim.
        let as_received = daily_series(&claim_points(&snapshot, ClaimOrder::AsReceived));
        assert_eq!(as_received, vec![50000.0, 20000.0, 35000.0, 15000.0]);

        let sorted = claim_points(&snapshot, ClaimOrder::Chronological);
        assert_eq!(daily_series(&sorted), vec![20000.0, 35000.0, 15000.0, 50000.0]);
        assert!(sorted.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_synthetic_series_lengths_and_bounds() {
        let snapshot = fallback_snapshot();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let monthly = monthly_series(&snapshot, &mut rng);
            let weekly = weekly_series(&snapshot, &mut rng);
            assert_eq!(monthly.values.len(), 6);
            assert_eq!(weekly.values.len(), 4);
            assert!(monthly.illustrative && weekly.illustrative);

            let monthly_base = 1_000_000.0 / 10.0;
            let weekly_base = 1_000_000.0 / 20.0;
            assert_eq!(monthly.base, monthly_base);
            assert_eq!(weekly.base, weekly_base);
            for v in &monthly.values {
                assert!(*v >= 0.8 * monthly_base && *v < 1.2 * monthly_base, "{v}");
            }
            for v in &weekly.values {
                assert!(*v >= 0.8 * weekly_base && *v < 1.2 * weekly_base, "{v}");
            }
        }
    }

    #[test]
    fn test_synthetic_series_scale_with_limit() {
        let mut snapshot = fallback_snapshot();
        snapshot.total_limit_allocated = 2_500_000.0;
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..50 {
            let monthly = monthly_series(&snapshot, &mut rng);
            let weekly = weekly_series(&snapshot, &mut rng);
            assert_eq!(monthly.base, 250_000.0);
            assert_eq!(weekly.base, 125_000.0);
            assert!(monthly.values.iter().all(|v| *v >= 200_000.0 && *v < 300_000.0));
            assert!(weekly.values.iter().all(|v| *v >= 100_000.0 && *v < 150_000.0));
        }
    }

    #[test]
    fn test_synthetic_series_zero_limit() {
        let mut snapshot = fallback_snapshot();
        snapshot.total_limit_allocated = 0.0;
        let mut rng = StdRng::seed_from_u64(5);

        let monthly = monthly_series(&snapshot, &mut rng);
        let weekly = weekly_series(&snapshot, &mut rng);
        assert_eq!(monthly.base, 0.0);
        assert_eq!(weekly.base, 0.0);
        assert_eq!(monthly.values, vec![0.0; 6]);
        assert_eq!(weekly.values, vec![0.0; 4]);
    }

    #[test]
    fn test_synthetic_series_reproducible_with_seed() {
        let snapshot = fallback_snapshot();
        let a = monthly_series(&snapshot, &mut StdRng::seed_from_u64(7));
        let b = monthly_series(&snapshot, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_chart_labels() {
        let snapshot = fallback_snapshot();
        let points = claim_points(&snapshot, ClaimOrder::Chronological);
        let daily: Vec<String> = daily_chart(&points).into_iter().map(|p| p.name).collect();
        assert_eq!(daily, vec!["Jan 15", "Feb 10", "Mar 20"]);

        let mut rng = StdRng::seed_from_u64(1);
        let weekly = weekly_chart(&weekly_series(&snapshot, &mut rng));
        assert_eq!(weekly[0].name, "Week 1");
        assert_eq!(weekly[3].name, "Week 4");

        let monthly = monthly_chart(&monthly_series(&snapshot, &mut rng));
        let names: Vec<&str> = monthly.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
    }
}

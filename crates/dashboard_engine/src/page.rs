use chrono::Local;
use models::{ClaimOrder, FallbackPolicy, Session, Settings, Snapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use snapshot_client::{LoadOutcome, Notification, SnapshotSourceKind};

use crate::breakdown::{financial_breakdown, utilization_breakdown, Breakdown};
use crate::format::{format_currency, format_date};
use crate::series::{
    claim_points, daily_chart, monthly_chart, monthly_series, weekly_chart, weekly_series,
    ChartPoint,
};

pub const BRAND: &str = "HealthCred";
pub const FAILED_MESSAGE: &str = "Failed to load dashboard data";

/// How a page is assembled. Built from `Settings`, then adjusted by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    pub fallback: FallbackPolicy,
    pub claim_order: ClaimOrder,
    pub show_illustrative_series: bool,
    /// Fixed seed for the synthetic series; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DashboardOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fallback: settings.fallback,
            claim_order: settings.claim_order,
            show_illustrative_series: settings.show_illustrative_series,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageMetadata {
    pub generated_at: String,
    pub source: SnapshotSourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Navbar {
    pub brand: String,
    pub session: Session,
    pub actions: Vec<String>,
}

impl Navbar {
    pub fn for_session(session: &Session) -> Self {
        let actions = match session {
            Session::Anonymous => vec!["Login", "Sign Up"],
            Session::Authenticated { .. } => vec!["Profile", "Settings", "Log out"],
        };
        Self {
            brand: BRAND.to_string(),
            session: session.clone(),
            actions: actions.into_iter().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub description: String,
    pub trend: Trend,
}

fn card(title: &str, amount: f64, description: String, trend: f64, is_positive: bool) -> StatCard {
    StatCard {
        title: title.to_string(),
        value: format_currency(amount),
        description,
        trend: Trend {
            value: trend,
            is_positive,
        },
    }
}

pub fn stat_cards(snapshot: &Snapshot) -> Vec<StatCard> {
    vec![
        card(
            "Total Limit",
            snapshot.total_limit_allocated,
            "Total allocated credit limit".to_string(),
            snapshot.current_limit_utilised_percentage,
            false,
        ),
        card(
            "Utilized Credit",
            snapshot.current_limit_utilised,
            "Current limit utilized".to_string(),
            snapshot.current_limit_utilised_percentage,
            true,
        ),
        card(
            "Available Funds",
            snapshot.current_unutilised_funds,
            "Remaining credit available".to_string(),
            snapshot.current_unutilised_funds_percentage,
            true,
        ),
        card(
            "Next Repayment",
            snapshot.amount_to_be_repaid_on_upcoming_date,
            format!("Due on {}", format_date(snapshot.upcoming_repayment_date)),
            0.0,
            false,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimRow {
    pub claim_id: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub tone: StatusTone,
}

/// Table rows in payload order.
pub fn claim_rows(snapshot: &Snapshot) -> Vec<ClaimRow> {
    snapshot
        .claims()
        .map(|claim| ClaimRow {
            claim_id: claim.claim_id.clone(),
            date: format_date(claim.claim_date),
            amount: format_currency(claim.claim_amount),
            status: claim.claim_status.to_string(),
            tone: if claim.claim_status.is_paid() {
                StatusTone::Success
            } else {
                StatusTone::Warning
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailItem {
    pub label: String,
    pub value: String,
}

pub fn repayment_details(snapshot: &Snapshot) -> Vec<DetailItem> {
    [
        ("Repayment Tenure", snapshot.repayment_tenure.clone()),
        (
            "Upcoming Repayment",
            format_date(snapshot.upcoming_repayment_date),
        ),
        (
            "Amount Repaid to Date",
            format_currency(snapshot.amount_repaid_to_date),
        ),
        ("Total Due", format_currency(snapshot.total_due)),
        (
            "Interest Paid",
            format_currency(snapshot.interest_paid_on_borrowed_amt_to_date),
        ),
        (
            "Subvention Per Claim",
            format_currency(snapshot.subvention_per_claim),
        ),
    ]
    .into_iter()
    .map(|(label, value)| DetailItem {
        label: label.to_string(),
        value,
    })
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageTab {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub illustrative: bool,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageChart {
    pub title: String,
    pub description: String,
    pub default_tab: UsageTab,
    pub daily: ChartSeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<ChartSeries>,
}

impl UsageChart {
    pub fn tabs(&self) -> Vec<UsageTab> {
        let mut tabs = vec![UsageTab::Daily];
        if self.weekly.is_some() {
            tabs.push(UsageTab::Weekly);
        }
        if self.monthly.is_some() {
            tabs.push(UsageTab::Monthly);
        }
        tabs
    }

    pub fn series(&self, tab: UsageTab) -> Option<&ChartSeries> {
        match tab {
            UsageTab::Daily => Some(&self.daily),
            UsageTab::Weekly => self.weekly.as_ref(),
            UsageTab::Monthly => self.monthly.as_ref(),
        }
    }
}

pub fn usage_chart<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    options: &DashboardOptions,
    rng: &mut R,
) -> UsageChart {
    let points = claim_points(snapshot, options.claim_order);
    let daily = ChartSeries {
        illustrative: false,
        points: daily_chart(&points),
    };

    let (weekly, monthly) = if options.show_illustrative_series {
        let weekly = weekly_series(snapshot, rng);
        let monthly = monthly_series(snapshot, rng);
        (
            Some(ChartSeries {
                illustrative: weekly.illustrative,
                points: weekly_chart(&weekly),
            }),
            Some(ChartSeries {
                illustrative: monthly.illustrative,
                points: monthly_chart(&monthly),
            }),
        )
    } else {
        (None, None)
    };

    UsageChart {
        title: "Claims Activity".to_string(),
        description: "Claim amounts over time".to_string(),
        default_tab: UsageTab::Daily,
        daily,
        weekly,
        monthly,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub metadata: PageMetadata,
    pub navbar: Navbar,
    pub header: Header,
    pub cards: Vec<StatCard>,
    pub usage_chart: UsageChart,
    pub claims: Vec<ClaimRow>,
    pub utilization: Breakdown,
    pub financial: Breakdown,
    pub repayment_details: Vec<DetailItem>,
    pub notifications: Vec<Notification>,
    pub snapshot: Snapshot,
}

pub fn build_page<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    metadata: PageMetadata,
    session: &Session,
    notifications: Vec<Notification>,
    options: &DashboardOptions,
    rng: &mut R,
) -> DashboardPage {
    DashboardPage {
        metadata,
        navbar: Navbar::for_session(session),
        header: Header {
            title: format!("{} Dashboard", snapshot.hospital_name),
            subtitle: format!("UHID: {}", snapshot.claimbook_uhid),
        },
        cards: stat_cards(snapshot),
        usage_chart: usage_chart(snapshot, options, rng),
        claims: claim_rows(snapshot),
        utilization: utilization_breakdown(snapshot),
        financial: financial_breakdown(snapshot),
        repayment_details: repayment_details(snapshot),
        notifications,
        snapshot: snapshot.clone(),
    }
}

/// What a surface renders once loading has resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    Ready(Box<DashboardPage>),
    Failed {
        message: String,
        error: String,
        retry: bool,
        notifications: Vec<Notification>,
    },
}

impl DashboardState {
    pub fn page(&self) -> Option<&DashboardPage> {
        match self {
            DashboardState::Ready(page) => Some(page),
            DashboardState::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DashboardState::Failed { .. })
    }
}

/// Turns a load outcome into the state to render.
pub fn dashboard_state(
    outcome: &LoadOutcome,
    session: &Session,
    notifications: Vec<Notification>,
    options: &DashboardOptions,
) -> DashboardState {
    let load_error = outcome.error().map(|e| e.to_string());
    match outcome.snapshot() {
        Some(snapshot) => {
            let metadata = PageMetadata {
                generated_at: Local::now().to_rfc3339(),
                source: outcome.source(),
                load_error,
            };
            let mut rng = match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            DashboardState::Ready(Box::new(build_page(
                snapshot,
                metadata,
                session,
                notifications,
                options,
                &mut rng,
            )))
        }
        None => DashboardState::Failed {
            message: FAILED_MESSAGE.to_string(),
            error: load_error.unwrap_or_default(),
            retry: true,
            notifications,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::fallback_snapshot;
    use snapshot_client::LoadError;

    fn seeded() -> DashboardOptions {
        DashboardOptions {
            seed: Some(11),
            ..DashboardOptions::default()
        }
    }

    #[test]
    fn test_stat_cards_for_fallback() {
        let cards = stat_cards(&fallback_snapshot());
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["₹1,000,000", "₹600,000", "₹400,000", "₹30,000"]);
        assert_eq!(cards[0].trend, Trend { value: 60.0, is_positive: false });
        assert_eq!(cards[2].trend.value, 40.0);
        assert_eq!(cards[3].description, "Due on 8/1/2024");
    }

    #[test]
    fn test_claim_rows_tones() {
        let rows = claim_rows(&fallback_snapshot());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].claim_id, "C12345");
        assert_eq!(rows[0].amount, "₹20,000");
        assert_eq!(rows[0].date, "1/15/2024");
        assert_eq!(rows[0].tone, StatusTone::Success);
        assert_eq!(rows[1].status, "Pending");
        assert_eq!(rows[1].tone, StatusTone::Warning);
    }

    const TEN_CLAIM_KEYS_PAYLOAD: &str = r#"{
        "hospital_name": "City Clinic",
        "claimbook_uhid": "UHID000010",
        "total_limit_allocated": 500000,
        "subvention_per_claim": 5000,
        "repayment_tenure": "12 months",
        "current_limit_utilised_percentage": 50,
        "current_unutilised_funds_percentage": 50,
        "current_limit_utilised": 250000,
        "current_unutilised_funds": 250000,
        "bill_amount_discounted_to_date": 100000,
        "amount_repaid_to_date": 50000,
        "interest_paid_on_borrowed_amt_to_date": 1000,
        "upcoming_repayment_date": "2024-09-01T00:00:00Z",
        "disbursals_amount": 40000,
        "repayments_amount": 30000,
        "total_interest_amount": 500,
        "total_due": 60000,
        "amount_to_be_repaid_on_upcoming_date": 10000,
        "claims_data": {
            "claim_9": {"claim_id": "A", "claim_amount": 900, "claim_date": "2024-06-09", "claim_status": "Paid"},
            "claim_10": {"claim_id": "B", "claim_amount": 1000, "claim_date": "2024-06-10", "claim_status": "Pending"}
        }
    }"#;

    #[test]
    fn test_claim_rows_follow_payload_order() {
        let snapshot: Snapshot = serde_json::from_str(TEN_CLAIM_KEYS_PAYLOAD).unwrap();
        let ids: Vec<String> = claim_rows(&snapshot).into_iter().map(|r| r.claim_id).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(format_date(snapshot.upcoming_repayment_date), "9/1/2024");

        let state = dashboard_state(
            &LoadOutcome::Fetched(snapshot),
            &Session::Anonymous,
            vec![],
            &seeded(),
        );
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["claims"][0]["claim_id"], "A");
        let keys: Vec<&String> = json["snapshot"]["claims_data"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, vec!["claim_9", "claim_10"]);
    }

    #[test]
    fn test_repayment_details() {
        let details = repayment_details(&fallback_snapshot());
        assert_eq!(details[0].value, "24 months");
        assert_eq!(details[3], DetailItem { label: "Total Due".into(), value: "₹120,000".into() });
        assert_eq!(details[5].value, "₹10,000");
    }

    #[test]
    fn test_navbar_follows_session() {
        let anon = Navbar::for_session(&Session::Anonymous);
        assert_eq!(anon.brand, "HealthCred");
        assert_eq!(anon.actions, vec!["Login", "Sign Up"]);

        let user = Navbar::for_session(&Session::authenticated("Asha"));
        assert!(user.actions.contains(&"Log out".to_string()));
    }

    #[test]
    fn test_illustrative_series_can_be_omitted() {
        let options = DashboardOptions {
            show_illustrative_series: false,
            ..seeded()
        };
        let chart = usage_chart(&fallback_snapshot(), &options, &mut StdRng::seed_from_u64(0));
        assert_eq!(chart.tabs(), vec![UsageTab::Daily]);
        assert!(chart.series(UsageTab::Weekly).is_none());
        assert!(!chart.daily.illustrative);
    }

    #[test]
    fn test_usage_chart_marks_synthetic_tabs() {
        let chart = usage_chart(&fallback_snapshot(), &seeded(), &mut StdRng::seed_from_u64(0));
        assert_eq!(chart.tabs(), vec![UsageTab::Daily, UsageTab::Weekly, UsageTab::Monthly]);
        assert!(chart.series(UsageTab::Weekly).unwrap().illustrative);
        assert_eq!(chart.series(UsageTab::Monthly).unwrap().points.len(), 6);
    }

    #[test]
    fn test_fallback_outcome_builds_ready_page() {
        let outcome = LoadOutcome::Fallback {
            snapshot: fallback_snapshot(),
            error: LoadError::Unavailable("offline".into()),
        };
        let state = dashboard_state(
            &outcome,
            &Session::Anonymous,
            vec![Notification::warning(models::FALLBACK_NOTICE)],
            &seeded(),
        );

        let page = state.page().expect("fallback renders a page");
        assert_eq!(page.header.title, "General Hospital Dashboard");
        assert_eq!(page.header.subtitle, "UHID: UHID123456");
        assert_eq!(page.metadata.source, SnapshotSourceKind::Sample);
        assert!(page.metadata.load_error.as_deref().unwrap().contains("offline"));
        assert_eq!(page.notifications.len(), 1);
    }

    #[test]
    fn test_unavailable_outcome_builds_failed_state() {
        let outcome = LoadOutcome::Unavailable {
            error: LoadError::Unavailable("down".into()),
        };
        let state = dashboard_state(&outcome, &Session::Anonymous, vec![], &seeded());

        assert!(state.is_failed());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], FAILED_MESSAGE);
        assert_eq!(json["retry"], true);
    }

    #[test]
    fn test_ready_state_serializes_with_tag() {
        let outcome = LoadOutcome::Fetched(fallback_snapshot());
        let state = dashboard_state(&outcome, &Session::Anonymous, vec![], &seeded());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["metadata"]["source"], "live");
        assert!(json["metadata"].get("load_error").is_none());
        assert_eq!(json["financial"]["slices"][2]["value"], 2000.0);
    }
}

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{Claim, ClaimStatus, Snapshot};

/// Message shown to the user when the sample snapshot stands in for live data.
pub const FALLBACK_NOTICE: &str = "Failed to fetch data. Using sample data instead.";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
	// Literal dates below are all valid calendar days.
	NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn claim(id: &str, amount: f64, claim_date: NaiveDate, status: ClaimStatus) -> Claim {
	Claim {
		claim_id: id.to_string(),
		claim_amount: amount,
		claim_date,
		claim_status: status,
	}
}

/// The fixed sample snapshot used when the live fetch fails.
pub fn fallback_snapshot() -> Snapshot {
	let mut claims_data = IndexMap::new();
	claims_data.insert(
		"claim_1".to_string(),
		claim("C12345", 20000.0, date(2024, 1, 15), ClaimStatus::Paid),
	);
	claims_data.insert(
		"claim_2".to_string(),
		claim("C12346", 35000.0, date(2024, 2, 10), ClaimStatus::Pending),
	);
	claims_data.insert(
		"claim_3".to_string(),
		claim("C12347", 15000.0, date(2024, 3, 20), ClaimStatus::Paid),
	);

	Snapshot {
		hospital_name: "General Hospital".to_string(),
		claimbook_uhid: "UHID123456".to_string(),
		total_limit_allocated: 1_000_000.0,
		subvention_per_claim: 10_000.0,
		repayment_tenure: "24 months".to_string(),
		current_limit_utilised_percentage: 60.0,
		current_unutilised_funds_percentage: 40.0,
		current_limit_utilised: 600_000.0,
		current_unutilised_funds: 400_000.0,
		bill_amount_discounted_to_date: 300_000.0,
		amount_repaid_to_date: 150_000.0,
		interest_paid_on_borrowed_amt_to_date: 5_000.0,
		upcoming_repayment_date: date(2024, 8, 1),
		disbursals_amount: 100_000.0,
		repayments_amount: 80_000.0,
		total_interest_amount: 2_000.0,
		total_due: 120_000.0,
		amount_to_be_repaid_on_upcoming_date: 30_000.0,
		claims_data,
	}
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

mod fallback;

pub use fallback::{fallback_snapshot, FALLBACK_NOTICE};

/// Endpoint the hosted mock serves the claimbook snapshot from.
pub const DEFAULT_API_URL: &str =
	"https://15734573-beec-42a6-9f83-e25fb78af6f2.mock.pstmn.io/hcassigment";

// Settings models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
	/// Substitute the sample snapshot and warn the user.
	#[default]
	#[serde(alias = "sample")]
	UseSample,
	/// Report the failure and render nothing.
	Surface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOrder {
	#[default]
	Chronological,
	AsReceived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub settings_version: u32,
	pub api_url: String,
	pub timeout_secs: Option<u64>,
	pub fallback: FallbackPolicy,
	pub claim_order: ClaimOrder,
	pub show_illustrative_series: bool,
	pub server: ServerSettings,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			settings_version: 1,
			api_url: DEFAULT_API_URL.to_string(),
			timeout_secs: None,
			fallback: FallbackPolicy::default(),
			claim_order: ClaimOrder::default(),
			show_illustrative_series: true,
			server: ServerSettings::default(),
		}
	}
}

// Snapshot models
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimStatus {
	Paid,
	Pending,
	Other(String),
}

impl ClaimStatus {
	pub fn as_str(&self) -> &str {
		match self {
			ClaimStatus::Paid => "Paid",
			ClaimStatus::Pending => "Pending",
			ClaimStatus::Other(raw) => raw,
		}
	}

	pub fn is_paid(&self) -> bool {
		matches!(self, ClaimStatus::Paid)
	}
}

impl From<String> for ClaimStatus {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"Paid" => ClaimStatus::Paid,
			"Pending" => ClaimStatus::Pending,
			_ => ClaimStatus::Other(raw),
		}
	}
}

impl From<ClaimStatus> for String {
	fn from(status: ClaimStatus) -> Self {
		match status {
			ClaimStatus::Other(raw) => raw,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for ClaimStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// A bare date is the usual form, but timestamps keep their calendar date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
	let raw = raw.trim();
	NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|ts| ts.date_naive()))
		.or_else(|| {
			NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
				.ok()
				.map(|ts| ts.date())
		})
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
	pub claim_id: String,
	pub claim_amount: f64,
	#[serde(deserialize_with = "deserialize_date")]
	pub claim_date: NaiveDate,
	pub claim_status: ClaimStatus,
}

/// One hospital's credit and claims figures at fetch time.
///
/// Field names match the remote payload. The two percentages come from the
/// source as-is and are not guaranteed to add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	pub hospital_name: String,
	pub claimbook_uhid: String,
	pub total_limit_allocated: f64,
	pub subvention_per_claim: f64,
	pub repayment_tenure: String,
	pub current_limit_utilised_percentage: f64,
	pub current_unutilised_funds_percentage: f64,
	pub current_limit_utilised: f64,
	pub current_unutilised_funds: f64,
	pub bill_amount_discounted_to_date: f64,
	pub amount_repaid_to_date: f64,
	pub interest_paid_on_borrowed_amt_to_date: f64,
	#[serde(deserialize_with = "deserialize_date")]
	pub upcoming_repayment_date: NaiveDate,
	pub disbursals_amount: f64,
	pub repayments_amount: f64,
	pub total_interest_amount: f64,
	pub total_due: f64,
	pub amount_to_be_repaid_on_upcoming_date: f64,
	/// Keyed by the source's internal claim key, kept in payload order.
	pub claims_data: IndexMap<String, Claim>,
}

impl Snapshot {
	pub fn claims(&self) -> impl Iterator<Item = &Claim> {
		self.claims_data.values()
	}
}

// Session model
/// Who is looking at the dashboard. Supplied by the caller; nothing in the
/// workspace verifies credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Session {
	#[default]
	Anonymous,
	Authenticated { display_name: String },
}

impl Session {
	pub fn authenticated(display_name: impl Into<String>) -> Self {
		Session::Authenticated {
			display_name: display_name.into(),
		}
	}

	pub fn display_name(&self) -> Option<&str> {
		match self {
			Session::Anonymous => None,
			Session::Authenticated { display_name } => Some(display_name),
		}
	}
}

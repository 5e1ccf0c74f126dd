use models::Snapshot;
use serde::Serialize;

use crate::format::{format_currency, format_percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceUnit {
    Percent,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub value: f64,
}

impl Slice {
    fn new(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    /// Whole-percent share of `total`, as printed next to the pie slice.
    pub fn share_of(&self, total: f64) -> i64 {
        if total == 0.0 {
            0
        } else {
            (self.value / total * 100.0).round() as i64
        }
    }
}

/// Input for one pie chart. Values are used as given, never renormalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub title: String,
    pub description: String,
    pub unit: SliceUnit,
    pub slices: Vec<Slice>,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// `"<name> (<share>%)"` for each slice.
    pub fn labels(&self) -> Vec<String> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| format!("{} ({}%)", s.name, s.share_of(total)))
            .collect()
    }

    /// Tooltip text for a slice value.
    pub fn format_value(&self, value: f64) -> String {
        match self.unit {
            SliceUnit::Percent => format_percent(value),
            SliceUnit::Currency => format_currency(value),
        }
    }
}

pub fn utilization_breakdown(snapshot: &Snapshot) -> Breakdown {
    Breakdown {
        title: "Credit Utilization".to_string(),
        description: "Allocated vs Available".to_string(),
        unit: SliceUnit::Percent,
        slices: vec![
            Slice::new("Utilized", snapshot.current_limit_utilised_percentage),
            Slice::new("Available", snapshot.current_unutilised_funds_percentage),
        ],
    }
}

pub fn financial_breakdown(snapshot: &Snapshot) -> Breakdown {
    Breakdown {
        title: "Financial Distribution".to_string(),
        description: "Disbursals, Repayments, Interest".to_string(),
        unit: SliceUnit::Currency,
        slices: vec![
            Slice::new("Disbursals", snapshot.disbursals_amount),
            Slice::new("Repayments", snapshot.repayments_amount),
            Slice::new("Interest", snapshot.total_interest_amount),
        ],
    }
}

use std::fmt::Write;

use crate::breakdown::Breakdown;
use crate::format::{format_currency, format_percent};
use crate::page::{ChartSeries, DashboardPage, DashboardState, UsageTab};

fn tab_name(tab: UsageTab) -> &'static str {
    match tab {
        UsageTab::Daily => "Daily",
        UsageTab::Weekly => "Weekly",
        UsageTab::Monthly => "Monthly",
    }
}

fn write_series(out: &mut String, tab: UsageTab, series: &ChartSeries) {
    let marker = if series.illustrative {
        " (illustrative, not real usage)"
    } else {
        ""
    };
    let _ = writeln!(out, "  {}{marker}", tab_name(tab));
    for point in &series.points {
        let _ = writeln!(out, "    {:<8} {}", point.name, format_currency(point.value));
    }
}

fn write_breakdown(out: &mut String, breakdown: &Breakdown) {
    let _ = writeln!(out, "\n{} ({})", breakdown.title, breakdown.description);
    for (slice, label) in breakdown.slices.iter().zip(breakdown.labels()) {
        let _ = writeln!(out, "  {:<22} {}", label, breakdown.format_value(slice.value));
    }
}

pub fn render_page(page: &DashboardPage) -> String {
    let mut out = String::new();

    let user = page.navbar.session.display_name().unwrap_or("not signed in");
    let _ = writeln!(out, "{} [{}] {}", page.navbar.brand, user, page.navbar.actions.join(" | "));
    for note in &page.notifications {
        let _ = writeln!(out, "! {}", note.message);
    }

    let _ = writeln!(out, "\n{}", page.header.title);
    let _ = writeln!(out, "{}", page.header.subtitle);

    let _ = writeln!(out);
    for card in &page.cards {
        let _ = writeln!(
            out,
            "{:<16} {:>14}  {} ({})",
            card.title,
            card.value,
            card.description,
            format_percent(card.trend.value)
        );
    }

    let _ = writeln!(out, "\n{}", page.usage_chart.title);
    for tab in page.usage_chart.tabs() {
        if let Some(series) = page.usage_chart.series(tab) {
            write_series(&mut out, tab, series);
        }
    }

    let _ = writeln!(out, "\nRecent Claims");
    let _ = writeln!(out, "  {:<10} {:<11} {:>12}  Status", "Claim ID", "Date", "Amount");
    for row in &page.claims {
        let _ = writeln!(
            out,
            "  {:<10} {:<11} {:>12}  {}",
            row.claim_id, row.date, row.amount, row.status
        );
    }

    write_breakdown(&mut out, &page.utilization);
    write_breakdown(&mut out, &page.financial);

    let _ = writeln!(out, "\nRepayment Details");
    for item in &page.repayment_details {
        let _ = writeln!(out, "  {:<22} {}", item.label, item.value);
    }

    out
}

pub fn render_state(state: &DashboardState) -> String {
    match state {
        DashboardState::Ready(page) => render_page(page),
        DashboardState::Failed { message, error, .. } => {
            format!("{message}\n  cause: {error}\n  Retry: run the command again.\n")
        }
    }
}

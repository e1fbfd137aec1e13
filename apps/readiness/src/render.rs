//! # Text Rendering
//!
//! Plain-text rendering of the dashboard views for the terminal.
//!
//! Every function returns a `String` so the CLI decides where it goes.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use readiness_core::{
    AssessedPackage, BlockingItem, CardView, ExecutiveSummary, MaterialClass, ReadinessStatus,
    TimelineRow,
};

/// Width of the progress bars, in characters.
const BAR_WIDTH: usize = 20;

// =============================================================================
// FORMATTING HELPERS
// =============================================================================

/// Format a source date for display (`Mar 4, 2024`).
///
/// Accepts `YYYY-MM-DD`, RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS`;
/// anything else is shown as given, and an empty value as `TBD`.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "TBD".to_string();
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|d| d.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|d| d.date())
        });

    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Fixed-width bar, `percent` filled.
pub fn bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled)
    )
}

fn class_marker(class: MaterialClass) -> char {
    match class {
        MaterialClass::OnSite => '+',
        MaterialClass::InTransit => '~',
        MaterialClass::NotReady => 'x',
    }
}

fn status_label(status: ReadinessStatus) -> &'static str {
    match status {
        ReadinessStatus::Ready => "READY TO START",
        ReadinessStatus::Partial => "PARTIAL MATERIALS",
        ReadinessStatus::Blocked => "BLOCKED",
    }
}

fn critical_suffix(is_critical: bool) -> &'static str {
    if is_critical { " [critical path]" } else { "" }
}

fn blocking_line(item: &BlockingItem) -> String {
    match &item.eta {
        Some(eta) => format!("{} (ETA: {})", item.description, format_date(eta)),
        None => format!("{} (not scheduled)", item.description),
    }
}

// =============================================================================
// CARD VIEW
// =============================================================================

/// Render one work package card.
pub fn render_card(card: &CardView) -> String {
    let r = &card.readiness;
    let mut out = String::new();

    out.push_str(&format!("{} - {}\n", card.name, status_label(r.status)));
    out.push_str(&format!(
        "  {}{} | {} - {}\n",
        card.discipline,
        critical_suffix(card.is_critical),
        format_date(&card.schedule.start),
        format_date(&card.schedule.finish)
    ));
    out.push_str(&format!(
        "  Material readiness {} {:>3}%\n",
        bar(card.readiness_percent),
        card.readiness_percent
    ));
    out.push_str(&format!(
        "  On site: {}  In transit: {}  Missing: {}\n",
        r.on_site, r.in_transit, r.not_ready
    ));
    out.push_str(&format!("  Required materials ({}):\n", card.materials.len()));
    for m in &card.materials {
        let detail = match m.class {
            MaterialClass::OnSite => "On Site".to_string(),
            _ => {
                let status = m.status.as_deref().unwrap_or("No status");
                match &m.eta {
                    Some(eta) => format!("{} - ETA: {}", status, format_date(eta)),
                    None => status.to_string(),
                }
            }
        };
        out.push_str(&format!(
            "    {} {} [{}]\n",
            class_marker(m.class),
            m.description,
            detail
        ));
    }

    if !card.missing().is_empty() {
        out.push_str("  Missing items:\n");
        for item in card.missing() {
            out.push_str(&format!("    - {}\n", blocking_line(item)));
        }
    }
    out
}

/// Render every card, separated by blank lines.
pub fn render_cards(cards: &[CardView]) -> String {
    if cards.is_empty() {
        return "No work packages.\n".to_string();
    }
    cards
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TIMELINE VIEW
// =============================================================================

/// Render the readiness timeline, one row per package.
pub fn render_timeline(rows: &[TimelineRow]) -> String {
    let mut out = String::new();
    out.push_str("Material Readiness Timeline\n");
    out.push_str("===========================\n");

    for row in rows {
        let indicators: String = row.indicators.iter().map(|c| class_marker(*c)).collect();
        out.push('\n');
        out.push_str(&format!(
            "{}{}  ({})\n",
            row.name,
            critical_suffix(row.is_critical),
            row.discipline
        ));
        out.push_str(&format!(
            "  {} - {}\n",
            format_date(&row.schedule.start),
            format_date(&row.schedule.finish)
        ));
        out.push_str(&format!(
            "  Progress {} {:>3}%   Materials {}  {:>3}% ready ({})\n",
            bar(row.progress_percent),
            row.progress_percent,
            if indicators.is_empty() { "-".to_string() } else { indicators },
            row.readiness_percent,
            row.status
        ));
    }
    out
}

// =============================================================================
// EXECUTIVE VIEW
// =============================================================================

/// Render the executive traffic-light summary.
pub fn render_executive(summary: &ExecutiveSummary) -> String {
    let mut out = String::new();
    out.push_str("Executive Summary\n");
    out.push_str("=================\n");
    out.push_str(&format!(
        "Ready: {}   Partial: {}   Blocked: {}\n",
        summary.counts.ready, summary.counts.partial, summary.counts.blocked
    ));
    out.push('\n');

    for line in &summary.lines {
        out.push_str(&format!(
            "[{:<6}] {:>3}%  {}\n",
            line.light.to_string(),
            line.readiness_percent,
            line.name
        ));
        out.push_str(&format!(
            "          {} | Start: {}{}\n",
            line.headline,
            format_date(&line.scheduled_start),
            critical_suffix(line.is_critical)
        ));
    }
    out
}

// =============================================================================
// SINGLE PACKAGE
// =============================================================================

/// Render one package's readiness detail.
pub fn render_package(assessed: &AssessedPackage) -> String {
    let mut out = render_card(&assessed.card());
    let r = &assessed.readiness;
    out.push_str(&format!(
        "  Can start: {}  (score {}/{})\n",
        if r.can_start { "yes" } else { "no" },
        r.score.on_site(),
        r.score.total()
    ));
    out
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::{Dashboard, Material, WorkPackage};

    fn dashboard() -> Dashboard {
        let mut pkg = WorkPackage::new(
            "Fire Sprinklers",
            vec![
                Material::on_site("Mains"),
                Material::awaiting("Heads", "In Transit").with_eta("2024-03-04"),
                Material::awaiting("Valves", "Not RTS"),
            ],
        );
        pkg.discipline = "Fire Protection".to_string();
        pkg.scheduled_start = "2024-03-11".to_string();
        pkg.scheduled_finish = "2024-04-05T08:00:00Z".to_string();
        pkg.progress_percent = 15;
        pkg.is_critical = true;
        Dashboard::assess(vec![pkg])
    }

    #[test]
    fn format_date_variants() {
        assert_eq!(format_date("2024-03-04"), "Mar 4, 2024");
        assert_eq!(format_date("2024-04-05T08:00:00Z"), "Apr 5, 2024");
        assert_eq!(format_date("2024-04-05T08:00:00"), "Apr 5, 2024");
        assert_eq!(format_date("next week"), "next week");
        assert_eq!(format_date(""), "TBD");
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(50).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn card_shows_missing_items() {
        let text = render_cards(&dashboard().cards());
        assert!(text.contains("Fire Sprinklers - BLOCKED"));
        assert!(text.contains("[critical path]"));
        assert!(text.contains("Heads (ETA: Mar 4, 2024)"));
        assert!(text.contains("Valves (not scheduled)"));
        assert!(text.contains("On site: 1  In transit: 1  Missing: 1"));
    }

    #[test]
    fn timeline_shows_indicators() {
        let text = render_timeline(&dashboard().timeline());
        assert!(text.contains("+~x"));
        assert!(text.contains("33% ready (blocked)"));
    }

    #[test]
    fn executive_shows_counts_and_headline() {
        let text = render_executive(&dashboard().executive_summary());
        assert!(text.contains("Ready: 0   Partial: 0   Blocked: 1"));
        assert!(text.contains("[RED   ]"));
        assert!(text.contains("Blocked - 1 materials missing"));
    }

    #[test]
    fn package_detail_layout() {
        let dashboard = dashboard();
        let text = render_package(&dashboard.packages()[0]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Fire Sprinklers - BLOCKED");
        assert_eq!(
            lines[1],
            "  Fire Protection [critical path] | Mar 11, 2024 - Apr 5, 2024"
        );
        assert_eq!(lines.last().copied(), Some("  Can start: no  (score 1/3)"));
        assert!(text.ends_with(")\n"));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn empty_cards() {
        assert_eq!(render_cards(&[]), "No work packages.\n");
    }
}

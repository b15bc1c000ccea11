//! Inline SVG charts for the HTML dashboard
//!
//! Every chart is a self-contained `<svg>` string with no scripts or
//! external assets, so the report renders offline.

use crate::models::{CommitDay, HealthBand, HealthScore};
use std::f64::consts::PI;

/// Score at which the gauge draws its threshold marker
const GAUGE_MARKER: f64 = 90.0;

const GAUGE_CX: f64 = 110.0;
const GAUGE_CY: f64 = 110.0;
const GAUGE_R: f64 = 90.0;

const TIMELINE_WIDTH: f64 = 640.0;
const TIMELINE_HEIGHT: f64 = 180.0;
const TIMELINE_PAD: f64 = 32.0;

pub(super) fn band_color(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Excellent => "#10b981",
        HealthBand::Good => "#22c55e",
        HealthBand::Fair => "#eab308",
        HealthBand::Poor => "#f97316",
        HealthBand::Critical => "#ef4444",
    }
}

/// Point on the gauge arc for a score in [0, 100]
fn gauge_point(score: f64, radius: f64) -> (f64, f64) {
    let theta = PI * (1.0 - score.clamp(0.0, 100.0) / 100.0);
    (
        GAUGE_CX + radius * theta.cos(),
        GAUGE_CY - radius * theta.sin(),
    )
}

/// Semicircular gauge for the overall score
pub(super) fn gauge(score: f64, band: HealthBand) -> String {
    let (sx, sy) = gauge_point(0.0, GAUGE_R);
    let (ex, ey) = gauge_point(100.0, GAUGE_R);
    let mut svg = format!(
        r##"<svg class="chart gauge" viewBox="0 0 220 130" role="img" aria-label="Overall score {score:.1}">
    <path d="M {sx:.1} {sy:.1} A {r} {r} 0 0 1 {ex:.1} {ey:.1}" fill="none" stroke="#e2e8f0" stroke-width="18" stroke-linecap="round"/>
"##,
        r = GAUGE_R
    );

    if score > 0.0 {
        let (vx, vy) = gauge_point(score, GAUGE_R);
        svg.push_str(&format!(
            r#"    <path class="gauge-value" d="M {sx:.1} {sy:.1} A {r} {r} 0 0 1 {vx:.1} {vy:.1}" fill="none" stroke="{color}" stroke-width="18" stroke-linecap="round"/>
"#,
            r = GAUGE_R,
            color = band_color(band)
        ));
    }

    let (ix, iy) = gauge_point(GAUGE_MARKER, GAUGE_R - 14.0);
    let (ox, oy) = gauge_point(GAUGE_MARKER, GAUGE_R + 14.0);
    svg.push_str(&format!(
        r##"    <line class="gauge-marker" x1="{ix:.1}" y1="{iy:.1}" x2="{ox:.1}" y2="{oy:.1}" stroke="#1e293b" stroke-width="2"/>
    <text x="{cx}" y="{ty}" text-anchor="middle" font-size="34" font-weight="bold" fill="#1e293b">{score:.1}</text>
    <text x="{cx}" y="{ly}" text-anchor="middle" font-size="13" fill="{color}">{band}</text>
</svg>
"##,
        cx = GAUGE_CX,
        ty = GAUGE_CY - 12.0,
        ly = GAUGE_CY + 12.0,
        color = band_color(band),
    ));
    svg
}

/// Four-axis radar of the sub-scores (Activity up, then clockwise)
pub(super) fn radar(score: &HealthScore) -> String {
    const CX: f64 = 130.0;
    const CY: f64 = 120.0;
    const R: f64 = 80.0;

    let categories = score.categories();
    let point = |axis: usize, value: f64| {
        let angle = -PI / 2.0 + axis as f64 * PI / 2.0;
        let dist = R * value.clamp(0.0, 100.0) / 100.0;
        (CX + dist * angle.cos(), CY + dist * angle.sin())
    };
    let polygon = |values: &[f64]| {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let (x, y) = point(i, *v);
                format!("{x:.1},{y:.1}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut svg = String::from(
        r#"<svg class="chart radar" viewBox="0 0 260 240" role="img" aria-label="Category scores">
"#,
    );
    for ring in [25.0, 50.0, 75.0, 100.0] {
        svg.push_str(&format!(
            r##"    <polygon points="{}" fill="none" stroke="#e2e8f0" stroke-width="1"/>
"##,
            polygon(&[ring; 4])
        ));
    }
    for (i, (name, _)) in categories.iter().enumerate() {
        let (x, y) = point(i, 100.0);
        let (lx, ly) = point(i, 122.0);
        let anchor = match i {
            1 => "start",
            3 => "end",
            _ => "middle",
        };
        svg.push_str(&format!(
            r##"    <line x1="{CX}" y1="{CY}" x2="{x:.1}" y2="{y:.1}" stroke="#e2e8f0" stroke-width="1"/>
    <text x="{lx:.1}" y="{ly:.1}" text-anchor="{anchor}" dominant-baseline="middle" font-size="11" fill="#64748b">{name}</text>
"##
        ));
    }
    let values: Vec<f64> = categories.iter().map(|(_, v)| *v).collect();
    svg.push_str(&format!(
        r##"    <polygon class="radar-value" points="{}" fill="rgba(99,102,241,0.25)" stroke="#6366f1" stroke-width="2"/>
</svg>
"##,
        polygon(&values)
    ));
    svg
}

/// Horizontal bars for the sub-scores
pub(super) fn score_bars(score: &HealthScore) -> String {
    const ROW: f64 = 34.0;
    const LABEL_W: f64 = 100.0;
    const BAR_W: f64 = 220.0;

    let categories = score.categories();
    let height = ROW * categories.len() as f64;
    let mut svg = format!(
        r#"<svg class="chart bars" viewBox="0 0 380 {height}" role="img" aria-label="Category score bars">
"#
    );
    for (i, (name, value)) in categories.iter().enumerate() {
        let y = i as f64 * ROW + 8.0;
        let width = BAR_W * value.clamp(0.0, 100.0) / 100.0;
        svg.push_str(&format!(
            r##"    <text x="0" y="{ty:.1}" font-size="12" fill="#64748b">{name}</text>
    <rect x="{LABEL_W}" y="{y:.1}" width="{BAR_W}" height="14" rx="4" fill="#e2e8f0"/>
    <rect x="{LABEL_W}" y="{y:.1}" width="{width:.1}" height="14" rx="4" fill="{color}"/>
    <text x="{vx}" y="{ty:.1}" font-size="12" fill="#1e293b">{value:.1}</text>
"##,
            ty = y + 11.0,
            vx = LABEL_W + BAR_W + 8.0,
            color = bar_color(*value)
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

fn bar_color(score: f64) -> &'static str {
    if score >= 80.0 {
        "#10b981"
    } else if score >= 60.0 {
        "#f59e0b"
    } else {
        "#ef4444"
    }
}

/// Area line chart of daily commits, or a placeholder without data
pub(super) fn commit_timeline(days: &[CommitDay]) -> String {
    let max = days.iter().map(|d| d.commits).max().unwrap_or(0);
    if max == 0 {
        return r#"<div class="chart-placeholder">No commit data available</div>
"#
        .to_string();
    }

    let plot_w = TIMELINE_WIDTH - 2.0 * TIMELINE_PAD;
    let plot_h = TIMELINE_HEIGHT - 2.0 * TIMELINE_PAD;
    let baseline = TIMELINE_HEIGHT - TIMELINE_PAD;
    let step = if days.len() > 1 {
        plot_w / (days.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<(f64, f64)> = days
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let x = if days.len() > 1 {
                TIMELINE_PAD + i as f64 * step
            } else {
                TIMELINE_WIDTH / 2.0
            };
            let y = baseline - plot_h * f64::from(d.commits) / f64::from(max);
            (x, y)
        })
        .collect();

    let line = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");
    let (first_x, _) = points[0];
    let (last_x, _) = points[points.len() - 1];
    let area = format!(
        "M {first_x:.1},{baseline:.1} L {} L {last_x:.1},{baseline:.1} Z",
        points
            .iter()
            .map(|(x, y)| format!("{x:.1},{y:.1}"))
            .collect::<Vec<_>>()
            .join(" L ")
    );

    let first_date = days[0].date.format("%b %d");
    let last_date = days[days.len() - 1].date.format("%b %d");

    format!(
        r##"<svg class="chart timeline" viewBox="0 0 {TIMELINE_WIDTH} {TIMELINE_HEIGHT}" role="img" aria-label="Daily commits, last {n} days">
    <line x1="{TIMELINE_PAD}" y1="{baseline:.1}" x2="{right:.1}" y2="{baseline:.1}" stroke="#e2e8f0" stroke-width="1"/>
    <path class="timeline-area" d="{area}" fill="rgba(99,102,241,0.15)" stroke="none"/>
    <polyline class="timeline-line" points="{line}" fill="none" stroke="#6366f1" stroke-width="2"/>
    <text x="{TIMELINE_PAD}" y="{label_y:.1}" font-size="11" fill="#64748b">{first_date}</text>
    <text x="{right:.1}" y="{label_y:.1}" text-anchor="end" font-size="11" fill="#64748b">{last_date}</text>
    <text x="{TIMELINE_PAD}" y="{max_y:.1}" font-size="11" fill="#64748b">{max} max/day</text>
</svg>
"##,
        n = days.len(),
        right = TIMELINE_WIDTH - TIMELINE_PAD,
        label_y = baseline + 18.0,
        max_y = TIMELINE_PAD - 10.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn days(counts: &[u32]) -> Vec<CommitDay> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, c)| CommitDay {
                date: start + chrono::Duration::days(i as i64),
                commits: *c,
            })
            .collect()
    }

    fn score(values: [f64; 4]) -> HealthScore {
        HealthScore {
            activity: values[0],
            popularity: values[1],
            community: values[2],
            maintenance: values[3],
            overall: values.iter().sum::<f64>() / 4.0,
        }
    }

    #[test]
    fn test_gauge_uses_band_color_and_marker() {
        let svg = gauge(95.0, HealthBand::Excellent);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(band_color(HealthBand::Excellent)));
        assert!(svg.contains("gauge-marker"));
        assert!(svg.contains("95.0"));
    }

    #[test]
    fn test_gauge_zero_has_no_value_arc() {
        let svg = gauge(0.0, HealthBand::Critical);
        assert!(!svg.contains("gauge-value"));
        assert!(svg.contains("gauge-marker"));
    }

    #[test]
    fn test_gauge_point_endpoints() {
        let (x0, y0) = gauge_point(0.0, GAUGE_R);
        let (x1, y1) = gauge_point(100.0, GAUGE_R);
        let (xm, ym) = gauge_point(50.0, GAUGE_R);
        assert!((x0 - (GAUGE_CX - GAUGE_R)).abs() < 1e-9);
        assert!((y0 - GAUGE_CY).abs() < 1e-9);
        assert!((x1 - (GAUGE_CX + GAUGE_R)).abs() < 1e-9);
        assert!((y1 - GAUGE_CY).abs() < 1e-9);
        assert!((xm - GAUGE_CX).abs() < 1e-9);
        assert!((ym - (GAUGE_CY - GAUGE_R)).abs() < 1e-9);
    }

    #[test]
    fn test_radar_labels_every_category() {
        let svg = radar(&score([100.0, 50.0, 0.0, 75.0]));
        for name in ["Activity", "Popularity", "Community", "Maintenance"] {
            assert!(svg.contains(name), "missing {name}");
        }
        // 4 grid rings plus the value polygon
        assert_eq!(svg.matches("<polygon").count(), 5);
    }

    #[test]
    fn test_score_bars_one_row_per_category() {
        let svg = score_bars(&score([100.0, 0.0, 60.0, 85.0]));
        assert_eq!(svg.matches("<rect").count(), 8);
        assert!(svg.contains(r#"width="220.0""#));
        assert!(svg.contains(r#"width="0.0""#));
    }

    #[test]
    fn test_timeline_placeholder_without_commits() {
        assert!(commit_timeline(&[]).contains("No commit data available"));
        assert!(commit_timeline(&days(&[0, 0, 0])).contains("No commit data available"));
    }

    #[test]
    fn test_timeline_plots_every_day() {
        let svg = commit_timeline(&days(&[0, 2, 4, 1]));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("4 max/day"));
        assert!(svg.contains("Jun 01"));
        assert!(svg.contains("Jun 04"));
        let points = svg
            .split("points=\"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap();
        assert_eq!(points.split(' ').count(), 4);
    }

    #[test]
    fn test_timeline_single_day() {
        let svg = commit_timeline(&days(&[3]));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("320.0,"));
    }
}

//! # Pie Geometry
//!
//! Turns an ordered list of `(value, color)` shares into SVG slice paths.
//!
//! Slices start at 12 o'clock and advance clockwise in input order; the angle of each
//! slice depends on the cumulative sum of everything before it, so reordering the
//! input changes the output. Each path moves to the center, lines to the start point,
//! arcs to the end point and closes. The large-arc flag is set when a slice covers more
//! than half of the total; the sweep flag is always 1.
//!
//! Degenerate input never produces NaN: a zero (or non-finite) total yields no slices,
//! and zero-valued entries are skipped without disturbing the cumulative angle.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Values at or below this are treated as empty slices
const EPSILON: f64 = 1e-9;

/// One input share
#[derive(Debug, Clone, PartialEq)]
pub struct PieEntry {
    pub label: String,
    pub value: f64,
    pub color: String,
}

impl PieEntry {
    pub fn new(label: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
        }
    }
}

/// Chart dimensions and labelling rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Minimum share (0–1, exclusive) a slice needs to carry a label
    pub label_threshold: f64,
    /// Label distance from the center as a fraction of the radius
    pub label_radius_ratio: f64,
}

impl Default for PieGeometry {
    fn default() -> Self {
        Self {
            cx: 100.0,
            cy: 100.0,
            radius: 80.0,
            label_threshold: 0.10,
            label_radius_ratio: 0.7,
        }
    }
}

impl PieGeometry {
    /// Square viewBox that contains the whole chart
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", fmt_num(self.cx * 2.0), fmt_num(self.cy * 2.0))
    }

    fn point(&self, angle: f64, radius: f64) -> (f64, f64) {
        (
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        )
    }
}

/// Centered percentage label for a slice
#[derive(Debug, Clone, PartialEq)]
pub struct SliceLabel {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// One rendered slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub color: String,
    pub value: f64,
    /// Fraction of the total, 0–1
    pub share: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc: bool,
    /// SVG path `d` attribute
    pub path: String,
    pub label_anchor: Option<SliceLabel>,
}

impl PieSlice {
    /// Angular size of the slice in radians
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Computes one slice per non-empty entry, in input order.
pub fn pie_slices(entries: &[PieEntry], geometry: &PieGeometry) -> Vec<PieSlice> {
    let total: f64 = entries
        .iter()
        .map(|entry| entry.value)
        .filter(|value| value.is_finite() && *value > 0.0)
        .sum();
    if !total.is_finite() || total <= EPSILON {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    let mut slices = Vec::with_capacity(entries.len());

    for entry in entries {
        let value = if entry.value.is_finite() { entry.value } else { 0.0 };
        if value <= EPSILON {
            continue;
        }

        let start_angle = (cumulative / total) * TAU - FRAC_PI_2;
        let end_angle = ((cumulative + value) / total) * TAU - FRAC_PI_2;
        cumulative += value;

        let share = value / total;
        let large_arc = share > 0.5;
        let path = slice_path(geometry, start_angle, end_angle, large_arc);

        let label_anchor = (share > geometry.label_threshold).then(|| {
            let mid = (start_angle + end_angle) / 2.0;
            let (x, y) = geometry.point(mid, geometry.radius * geometry.label_radius_ratio);
            SliceLabel {
                x,
                y,
                text: format!("{}%", (share * 100.0).round()),
            }
        });

        slices.push(PieSlice {
            label: entry.label.clone(),
            color: entry.color.clone(),
            value,
            share,
            start_angle,
            end_angle,
            large_arc,
            path,
            label_anchor,
        });
    }

    slices
}

fn slice_path(geometry: &PieGeometry, start_angle: f64, end_angle: f64, large_arc: bool) -> String {
    let r = fmt_num(geometry.radius);
    let (cx, cy) = (fmt_num(geometry.cx), fmt_num(geometry.cy));
    let (x1, y1) = geometry.point(start_angle, geometry.radius);

    // An arc whose endpoints coincide draws nothing, so a full circle is two half arcs.
    if end_angle - start_angle >= TAU - EPSILON {
        let (xm, ym) = geometry.point(start_angle + TAU / 2.0, geometry.radius);
        return format!(
            "M {cx} {cy} L {x1} {y1} A {r} {r} 0 1 1 {xm} {ym} A {r} {r} 0 1 1 {x1} {y1} Z",
            x1 = fmt_num(x1),
            y1 = fmt_num(y1),
            xm = fmt_num(xm),
            ym = fmt_num(ym),
        );
    }

    let (x2, y2) = geometry.point(end_angle, geometry.radius);
    format!(
        "M {cx} {cy} L {x1} {y1} A {r} {r} 0 {flag} 1 {x2} {y2} Z",
        x1 = fmt_num(x1),
        y1 = fmt_num(y1),
        x2 = fmt_num(x2),
        y2 = fmt_num(y2),
        flag = u8::from(large_arc),
    )
}

/// Fixed three-decimal formatting with trailing zeros trimmed
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn entries(values: &[f64]) -> Vec<PieEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, value)| PieEntry::new(format!("slice {i}"), *value, "#000"))
            .collect()
    }

    #[test]
    fn test_spans_sum_to_full_circle() {
        let slices = pie_slices(&entries(&[3.0, 1.5, 7.25, 0.25]), &PieGeometry::default());
        let total: f64 = slices.iter().map(PieSlice::span).sum();
        assert!((total - TAU).abs() < TOLERANCE);
    }

    #[test]
    fn test_first_slice_starts_at_twelve_oclock() {
        let slices = pie_slices(&entries(&[1.0, 1.0]), &PieGeometry::default());
        assert!((slices[0].start_angle + FRAC_PI_2).abs() < TOLERANCE);
        assert!(slices[0].path.starts_with("M 100 100 L 100 20 A 80 80 0 0 1 100 180 Z"));
    }

    #[test]
    fn test_order_is_preserved() {
        let input = vec![
            PieEntry::new("b", 2.0, "#222"),
            PieEntry::new("a", 1.0, "#111"),
            PieEntry::new("c", 3.0, "#333"),
        ];
        let slices = pie_slices(&input, &PieGeometry::default());
        let labels: Vec<_> = slices.iter().map(|slice| slice.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c"]);
        for pair in slices.windows(2) {
            assert!((pair[0].end_angle - pair[1].start_angle).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_single_entry_spans_full_circle() {
        let slices = pie_slices(&entries(&[42.0]), &PieGeometry::default());
        assert_eq!(slices.len(), 1);
        assert!((slices[0].span() - TAU).abs() < TOLERANCE);
        assert!(slices[0].large_arc);
        assert_eq!(slices[0].path.matches(" A ").count(), 2);
        assert!(!slices[0].path.contains("NaN"));
    }

    #[test]
    fn test_all_zero_input_yields_nothing() {
        assert!(pie_slices(&entries(&[0.0, 0.0, 0.0]), &PieGeometry::default()).is_empty());
        assert!(pie_slices(&[], &PieGeometry::default()).is_empty());
        assert!(pie_slices(&entries(&[f64::NAN]), &PieGeometry::default()).is_empty());
    }

    #[test]
    fn test_zero_slices_are_skipped() {
        let slices = pie_slices(&entries(&[1.0, 0.0, 1.0]), &PieGeometry::default());
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[1].label, "slice 2");
        assert!((slices[1].start_angle - FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn test_large_arc_only_above_half() {
        let slices = pie_slices(&entries(&[50.0, 50.0]), &PieGeometry::default());
        assert!(slices.iter().all(|slice| !slice.large_arc));

        let slices = pie_slices(&entries(&[51.0, 49.0]), &PieGeometry::default());
        assert!(slices[0].large_arc);
        assert!(!slices[1].large_arc);
        assert!(slices[0].path.contains(" 0 1 1 "));
    }

    #[test]
    fn test_labels_above_threshold() {
        let slices = pie_slices(&entries(&[5.0, 10.0, 85.0]), &PieGeometry::default());
        assert!(slices[0].label_anchor.is_none());
        assert!(slices[1].label_anchor.is_none());

        let label = slices[2].label_anchor.as_ref().unwrap();
        assert_eq!(label.text, "85%");
        let geometry = PieGeometry::default();
        let distance = ((label.x - geometry.cx).powi(2) + (label.y - geometry.cy).powi(2)).sqrt();
        assert!((distance - geometry.radius * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_view_box() {
        assert_eq!(PieGeometry::default().view_box(), "0 0 200 200");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(fmt_num(20.0), "20");
        assert_eq!(fmt_num(-0.0000001), "0");
        assert_eq!(fmt_num(12.3456), "12.346");
    }
}

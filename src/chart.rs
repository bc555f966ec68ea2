// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line/area chart geometry for a daily spending series, plus a standalone
//! SVG rendering of it.

use crate::models::DailySpending;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const TICK_DAYS: [usize; 5] = [1, 7, 14, 21, 28];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartArea {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Default for ChartArea {
    fn default() -> Self {
        Self {
            width: 920.0,
            height: 280.0,
            padding: Padding {
                top: 20.0,
                right: 20.0,
                bottom: 40.0,
                left: 20.0,
            },
        }
    }
}

impl ChartArea {
    pub fn chart_width(&self) -> f64 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn chart_height(&self) -> f64 {
        self.height - self.padding.top - self.padding.bottom
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.padding.bottom
    }

    /// x of the `index`-th of `len` evenly spaced points. A lone point sits
    /// at the left edge.
    pub fn x_at(&self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return self.padding.left;
        }
        index as f64 / (len - 1) as f64 * self.chart_width() + self.padding.left
    }

    /// y of `amount` with `max` at the top and zero on the baseline.
    pub fn y_at(&self, amount: f64, max: f64) -> f64 {
        let h = self.chart_height();
        h - amount / max * h + self.padding.top
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub x: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingChart {
    pub area: ChartArea,
    pub max_amount: f64,
    pub points: Vec<ChartPoint>,
    pub line_path: String,
    pub area_path: String,
    pub labels: Vec<AxisLabel>,
}

pub fn build(data: &[DailySpending], area: &ChartArea) -> SpendingChart {
    let len = data.len();
    let max_amount = data
        .iter()
        .filter_map(|d| d.amount.to_f64())
        .fold(1.0_f64, f64::max);

    let points: Vec<ChartPoint> = data
        .iter()
        .enumerate()
        .map(|(i, d)| ChartPoint {
            x: area.x_at(i, len),
            y: area.y_at(d.amount.to_f64().unwrap_or(0.0), max_amount),
            date: d.date,
            amount: d.amount,
        })
        .collect();

    let line_path = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {},{}", if i == 0 { 'M' } else { 'L' }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");

    let area_path = match (points.first(), points.last()) {
        (Some(first), Some(last)) => format!(
            "{} L {},{} L {},{} Z",
            line_path,
            last.x,
            area.baseline(),
            first.x,
            area.baseline()
        ),
        _ => String::new(),
    };

    SpendingChart {
        area: *area,
        max_amount,
        labels: axis_labels(data, area),
        points,
        line_path,
        area_path,
    }
}

/// Ticks on days 1, 7, 14, 21, 28 and the month's last day, skipping any
/// beyond the series.
pub fn axis_labels(data: &[DailySpending], area: &ChartArea) -> Vec<AxisLabel> {
    let len = data.len();
    let Some(first) = data.first() else {
        return Vec::new();
    };
    let last_day = crate::utils::days_in_month(first.date.year(), first.date.month()) as usize;

    let mut days: Vec<usize> = TICK_DAYS.to_vec();
    if !days.contains(&last_day) {
        days.push(last_day);
    }
    days.into_iter()
        .filter(|day| *day <= len)
        .map(|day| {
            let index = day - 1;
            AxisLabel {
                x: area.x_at(index, len),
                label: format!("{} {}", data[index].date.format("%b"), data[index].date.day()),
            }
        })
        .collect()
}

/// Standalone SVG document: gradient area, line, point markers, baseline and
/// tick labels.
pub fn render_svg(chart: &SpendingChart) -> String {
    let a = &chart.area;
    let mut lines = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = a.width,
        h = a.height
    )];
    lines.push(
        r#"  <defs>
    <linearGradient id="chartGradient" x1="0" y1="0" x2="0" y2="1">
      <stop offset="0%" stop-color="rgb(34, 197, 94)" stop-opacity="0.3"/>
      <stop offset="100%" stop-color="rgb(34, 197, 94)" stop-opacity="0.05"/>
    </linearGradient>
  </defs>"#
            .to_string(),
    );
    if !chart.points.is_empty() {
        lines.push(format!(
            r#"  <path d="{}" fill="url(#chartGradient)"/>"#,
            chart.area_path
        ));
        lines.push(format!(
            r#"  <path d="{}" fill="none" stroke="rgb(34, 197, 94)" stroke-width="3" stroke-linecap="round" stroke-linejoin="round"/>"#,
            chart.line_path
        ));
        lines.extend(chart.points.iter().map(|p| {
            format!(
                r#"  <circle cx="{}" cy="{}" r="4" fill="rgb(34, 197, 94)"><title>{} {}</title></circle>"#,
                p.x,
                p.y,
                p.date,
                p.amount.round_dp(2)
            )
        }));
    }
    lines.push(format!(
        r#"  <line x1="{}" y1="{b}" x2="{}" y2="{b}" stroke="rgba(0,0,0,0.1)" stroke-width="1"/>"#,
        a.padding.left,
        a.width - a.padding.right,
        b = a.baseline()
    ));
    lines.extend(chart.labels.iter().map(|l| {
        format!(
            r#"  <text x="{}" y="{}" text-anchor="middle" font-size="12" fill="rgba(0,0,0,0.5)">{}</text>"#,
            l.x,
            a.baseline() + 20.0,
            l.label
        )
    }));
    lines.push("</svg>\n".to_string());
    lines.join("\n")
}

//! Report sinks: SVG bar charts and JSON exports

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use match_logic::{ReportSink, RunSummary, ScoreReport};

use crate::config::OutputFormat;

const CHART_HEIGHT: u32 = 360;
const BAR_WIDTH: u32 = 40;
const BAR_GAP: u32 = 16;
const MARGIN: u32 = 48;

/// Renders each report as a bar chart at `<out_dir>/scores_<n>.svg`
pub struct SvgChartSink {
    out_dir: PathBuf,
}

impl SvgChartSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }
}

impl ReportSink for SvgChartSink {
    type Error = anyhow::Error;

    fn emit(&mut self, report: &ScoreReport) -> Result<()> {
        let path = self.out_dir.join(format!("{}.svg", report.identifier()));
        std::fs::write(&path, render_svg(report))
            .with_context(|| format!("writing chart {}", path.display()))?;
        info!("chart written to {}", path.display());
        Ok(())
    }
}

/// Writes each report as pretty JSON at `<out_dir>/scores_<n>.json`
pub struct JsonReportSink {
    out_dir: PathBuf,
}

impl JsonReportSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }
}

impl ReportSink for JsonReportSink {
    type Error = anyhow::Error;

    fn emit(&mut self, report: &ScoreReport) -> Result<()> {
        let path = self.out_dir.join(format!("{}.json", report.identifier()));
        let json = serde_json::to_string_pretty(report).context("serializing score report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!("report written to {}", path.display());
        Ok(())
    }
}

/// Fans one report out to several sinks
pub struct MultiSink {
    sinks: Vec<Box<dyn ReportSink<Error = anyhow::Error>>>,
}

impl MultiSink {
    pub fn for_format(format: OutputFormat, out_dir: &Path) -> Self {
        let mut sinks: Vec<Box<dyn ReportSink<Error = anyhow::Error>>> = Vec::new();
        if matches!(format, OutputFormat::Svg | OutputFormat::Both) {
            sinks.push(Box::new(SvgChartSink::new(out_dir)));
        }
        if matches!(format, OutputFormat::Json | OutputFormat::Both) {
            sinks.push(Box::new(JsonReportSink::new(out_dir)));
        }
        Self { sinks }
    }
}

impl ReportSink for MultiSink {
    type Error = anyhow::Error;

    fn emit(&mut self, report: &ScoreReport) -> Result<()> {
        for sink in &mut self.sinks {
            sink.emit(report)?;
        }
        Ok(())
    }
}

/// Write every match of a pass to `<out_dir>/matches_<n>.json`
pub fn write_summary(out_dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    let path = out_dir.join(format!("matches_{}.json", summary.iteration));
    let json = serde_json::to_string_pretty(summary).context("serializing run summary")?;
    std::fs::write(&path, json)
        .with_context(|| format!("writing run summary {}", path.display()))?;
    Ok(path)
}

/// Labelled bar chart, bars in report order
pub fn render_svg(report: &ScoreReport) -> String {
    let bars = report.entries.len() as u32;
    let width = MARGIN * 2 + bars * (BAR_WIDTH + BAR_GAP);
    let height = CHART_HEIGHT + MARGIN * 2;
    let baseline = MARGIN + CHART_HEIGHT;
    let max = report.entries.iter().map(|e| e.score).max().unwrap_or(0).max(1);

    let mut svg = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-family="sans-serif" font-size="14" text-anchor="middle">{}</text>"#,
        width / 2,
        MARGIN / 2,
        escape(&report.identifier())
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="black"/>"#,
        width - MARGIN
    );

    for (i, entry) in report.entries.iter().enumerate() {
        let bar_height = (entry.score as f64 / max as f64 * CHART_HEIGHT as f64).round() as u32;
        let x = MARGIN + i as u32 * (BAR_WIDTH + BAR_GAP) + BAR_GAP / 2;
        let y = baseline - bar_height;
        let centre = x + BAR_WIDTH / 2;
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{BAR_WIDTH}" height="{bar_height}" fill="{}"/>"#,
            entry.color
        );
        let _ = writeln!(
            svg,
            r#"<text x="{centre}" y="{}" font-family="sans-serif" font-size="11" text-anchor="middle">{}</text>"#,
            y.saturating_sub(4),
            entry.score
        );
        let _ = writeln!(
            svg,
            r#"<text x="{centre}" y="{}" font-family="sans-serif" font-size="11" text-anchor="middle">{}</text>"#,
            baseline + 16,
            escape(&entry.name)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

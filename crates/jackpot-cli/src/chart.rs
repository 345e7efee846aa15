//! 비교 차트 이미지 생성 모듈.
//!
//! 회차별 로또 누적 수익률과 같은 금액을 지수에 투자했을 때의 수익률을
//! 하나의 선 차트로 그려 이미지 파일로 저장합니다.
//!
//! # 레이아웃
//!
//! - 6 × 4 인치 캔버스 (픽셀 크기 = 인치 × DPI)
//! - y축 고정 범위 [-100, 100], 0% 점선 기준선
//! - 제목에 최근 추첨일, 범례에 각 시리즈의 최신 값
//!
//! 글꼴과 선 두께는 포인트 단위로 정의하고 DPI에 맞춰 픽셀로 변환합니다.

use std::ops::Range;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use jackpot_core::{image_extension, ComparisonTable, DecimalExt, Percentage};
use plotters::prelude::*;
use plotters::style::{FontStyle, TRANSPARENT};
use tracing::debug;

/// 차트 제목 접두어.
const TITLE_PREFIX: &str = "Porukkaloton tilanne";
const X_LABEL: &str = "Lottokierros";
const Y_LABEL: &str = "Voittoprosentti (%)";
const LOTTERY_LABEL: &str = "Porukkalotto";
const INDEX_LABEL: &str = "OMX Helsinki";

/// 범례 위치 (차트 오른쪽 아래).
const LEGEND_POSITION: SeriesLabelPosition = SeriesLabelPosition::LowerRight;

/// 1인치 = 72포인트.
const POINTS_PER_INCH: f64 = 72.0;

/// 차트 생성 설정
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 캔버스 너비 (인치)
    pub width_in: u32,
    /// 캔버스 높이 (인치)
    pub height_in: u32,
    /// 배경색
    pub background_color: RGBColor,
    /// 로또 수익률 선 색상
    pub lottery_color: RGBColor,
    /// 지수 수익률 선 색상
    pub index_color: RGBColor,
    /// y축 범위 (%)
    pub y_range: Range<f64>,
    /// 기본 글꼴 크기 (pt)
    pub font_pt: f64,
    /// 제목 글꼴 크기 (pt)
    pub title_pt: f64,
    /// 선 두께 (pt)
    pub line_pt: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 6,
            height_in: 4,
            background_color: WHITE,
            lottery_color: RGBColor(31, 119, 180),
            index_color: RGBColor(255, 127, 14),
            y_range: -100.0..100.0,
            font_pt: 10.0,
            title_pt: 12.0,
            line_pt: 1.5,
        }
    }
}

/// 로또/지수 비교 차트 생성기
pub struct ComparisonChartGenerator {
    config: ChartConfig,
}

impl Default for ComparisonChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ComparisonChartGenerator {
    /// 기본 설정으로 생성
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }

    /// 출력 이미지 픽셀 크기.
    pub fn canvas_size(&self, dpi: u32) -> (u32, u32) {
        (self.config.width_in * dpi, self.config.height_in * dpi)
    }

    /// 비교 차트를 그려 `output_path`에 저장합니다.
    ///
    /// 형식은 확장자(png, jpg, bmp)로 결정되며 기존 파일은 덮어씁니다.
    pub fn render(&self, table: &ComparisonTable, dpi: u32, output_path: &Path) -> Result<()> {
        if table.is_empty() {
            bail!("차트를 그릴 회차 데이터가 없습니다");
        }
        if dpi == 0 {
            bail!("DPI는 0보다 커야 합니다");
        }
        if image_extension(output_path).is_none() {
            bail!("지원하지 않는 이미지 형식: {}", output_path.display());
        }

        let (width, height) = self.canvas_size(dpi);
        debug!(width, height, dpi, path = %output_path.display(), "차트 렌더링");

        let px = |pt: f64| points_to_pixels(pt, dpi);
        let font = ("sans-serif", px(self.config.font_pt)).into_font();
        let bold = font.clone().style(FontStyle::Bold);
        let title_font = ("sans-serif", px(self.config.title_pt))
            .into_font()
            .style(FontStyle::Bold);
        let line_width = px(self.config.line_pt);

        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        root.fill(&self.config.background_color)?;

        let x_range = round_axis_range(table.len());
        let y_range = self.config.y_range.clone();

        let mut chart = ChartBuilder::on(&root)
            .caption(chart_title(table.latest_date()), title_font)
            .margin(px(8.0))
            .x_label_area_size(px(30.0))
            .y_label_area_size(px(40.0))
            .build_cartesian_2d(x_range.clone(), y_range)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style(bold.clone())
            .label_style(font.clone())
            .x_label_formatter(&|v| format!("{:.0}", v))
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()?;

        // 0% 기준선 (점선 효과 - 짧은 세그먼트 반복)
        let zero_style = BLACK.stroke_width(px(1.0));
        for segment in dotted_segments(&x_range, 0.0, 80) {
            chart.draw_series(LineSeries::new(segment, zero_style))?;
        }

        let [lottery_label, index_label] = legend_labels(table);
        let series = [
            (table.lottery_returns(), self.config.lottery_color, lottery_label),
            (table.index_returns(), self.config.index_color, index_label),
        ];

        for (values, color, label) in series {
            let style = color.stroke_width(line_width);
            for segment in series_segments(&values) {
                chart.draw_series(LineSeries::new(segment, style))?;
            }

            // 범례 항목 (데이터가 없어도 표시)
            let legend_len = px(20.0) as i32;
            chart
                .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), style))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], style));
        }

        chart
            .configure_series_labels()
            .position(LEGEND_POSITION)
            .background_style(TRANSPARENT)
            .border_style(TRANSPARENT)
            .label_font(font)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// 포인트 크기를 DPI 기준 픽셀로 변환 (최소 1px).
pub fn points_to_pixels(points: f64, dpi: u32) -> u32 {
    ((points * dpi as f64 / POINTS_PER_INCH).round() as u32).max(1)
}

/// 차트 제목 (예: "Porukkaloton tilanne 06.01.2024").
pub fn chart_title(latest: Option<NaiveDate>) -> String {
    match latest {
        Some(date) => format!("{} {}", TITLE_PREFIX, date.format("%d.%m.%Y")),
        None => TITLE_PREFIX.to_string(),
    }
}

/// 범례 문자열 [로또, 지수].
///
/// 지수는 값이 있는 마지막 회차를 사용합니다.
pub fn legend_labels(table: &ComparisonTable) -> [String; 2] {
    [
        format!("{} {}%", LOTTERY_LABEL, format_legend_value(table.latest_lottery_return())),
        format!("{} {}%", INDEX_LABEL, format_legend_value(table.latest_index_return())),
    ]
}

fn format_legend_value(value: Option<Percentage>) -> String {
    value
        .map(|v| v.to_signed_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// 회차별 값을 연속 구간으로 분리합니다.
///
/// `None`인 회차에서 선이 끊기며, 값을 보간하지 않습니다.
pub fn series_segments(values: &[Option<Percentage>]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (round, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((round as f64, v.to_f64_lossy())),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// 회차 축 범위 (양끝 5% 여백).
pub fn round_axis_range(rounds: usize) -> Range<f64> {
    if rounds <= 1 {
        return -0.5..0.5;
    }
    let last = (rounds - 1) as f64;
    let pad = last * 0.05;
    -pad..last + pad
}

/// 수평 점선을 짧은 선분 목록으로 변환합니다.
fn dotted_segments(x_range: &Range<f64>, y: f64, segment_count: usize) -> Vec<Vec<(f64, f64)>> {
    let width = (x_range.end - x_range.start) / segment_count as f64;
    (0..segment_count)
        .step_by(2)
        .map(|i| {
            let x_start = x_range.start + width * i as f64;
            vec![(x_start, y), (x_start + width, y)]
        })
        .collect()
}

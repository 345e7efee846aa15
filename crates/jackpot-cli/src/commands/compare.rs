//! 로또 풀 vs 지수 비교 명령.
//!
//! 로또 결과 로드 → 지수 종가 조회 → 비교 테이블 계산 → 차트 저장 순서로
//! 실행합니다. 어느 단계든 실패하면 즉시 중단합니다.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use jackpot_core::{build_comparison, ComparisonConfig, ComparisonTable, MarketDataProvider};
use jackpot_data::load_lottery_rounds;
use tracing::{debug, info};

use crate::chart::{legend_labels, ComparisonChartGenerator};

/// 비교 테이블 생성 (로드, 조회, 계산).
pub async fn load_comparison(
    config: &ComparisonConfig,
    provider: &dyn MarketDataProvider,
) -> Result<ComparisonTable> {
    info!("Retrieving lottery data...");
    let rounds = load_lottery_rounds(&config.input_path).with_context(|| {
        format!("Failed to load lottery data: {}", config.input_path.display())
    })?;

    // 로더가 날짜순 정렬을 보장
    let start_date = rounds
        .first()
        .map(|r| r.date)
        .context("Lottery data has no rounds")?;

    info!("Retrieving market data...");
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!(
        "Fetching {} from {}...",
        config.ticker,
        provider.source_name()
    ));
    pb.enable_steady_tick(Duration::from_millis(100));

    let fetched = provider.daily_closes(&config.ticker, start_date).await;
    match &fetched {
        Ok(observations) => pb.finish_with_message(format!(
            "Downloaded {} closes from {}",
            observations.len(),
            provider.source_name()
        )),
        Err(_) => pb.abandon_with_message(format!("Failed to fetch {}", config.ticker)),
    }
    let observations = fetched.with_context(|| {
        format!(
            "Failed to retrieve market data for {} since {}",
            config.ticker, start_date
        )
    })?;

    info!("Processing data...");
    let table = build_comparison(&rounds, &observations)?;
    debug!(rounds = table.len(), unmatched = table.unmatched_count(), "Comparison ready");

    Ok(table)
}

/// 비교 실행 후 차트를 저장하고 요약을 반환합니다.
pub async fn run_comparison(
    config: &ComparisonConfig,
    provider: &dyn MarketDataProvider,
) -> Result<ComparisonSummary> {
    let table = load_comparison(config, provider).await?;

    info!("Plotting data...");
    ComparisonChartGenerator::new()
        .render(&table, config.dpi, &config.output_path)
        .with_context(|| format!("Failed to write chart: {}", config.output_path.display()))?;

    info!("Saved chart to {}", config.output_path.display());
    Ok(ComparisonSummary::new(&table, &config.output_path))
}

/// 실행 결과 요약.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSummary {
    pub rounds: usize,
    pub unmatched: usize,
    pub latest_date: Option<NaiveDate>,
    pub lottery_label: String,
    pub index_label: String,
    pub output_path: PathBuf,
}

impl ComparisonSummary {
    pub fn new(table: &ComparisonTable, output_path: &Path) -> Self {
        let [lottery_label, index_label] = legend_labels(table);
        Self {
            rounds: table.len(),
            unmatched: table.unmatched_count(),
            latest_date: table.latest_date(),
            lottery_label,
            index_label,
            output_path: output_path.to_path_buf(),
        }
    }
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rounds: {}", self.rounds)?;
        if self.unmatched > 0 {
            write!(f, " ({} without index data)", self.unmatched)?;
        }
        writeln!(f)?;
        if let Some(date) = self.latest_date {
            writeln!(f, "Latest round: {}", date.format("%d.%m.%Y"))?;
        }
        writeln!(f, "{}", self.lottery_label)?;
        writeln!(f, "{}", self.index_label)?;
        write!(f, "Chart: {}", self.output_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackpot_core::{MarketObservation, StaticMarketProvider};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_path(extension: &str) -> PathBuf {
        let n = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "jackpot-compare-{}-{}.{}",
            std::process::id(),
            n,
            extension
        ))
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn provider() -> StaticMarketProvider {
        StaticMarketProvider::new(vec![
            MarketObservation::new(date(8), dec!(100)),
            MarketObservation::new(date(15), dec!(110)),
            MarketObservation::new(date(22), dec!(105)),
        ])
    }

    #[tokio::test]
    async fn test_load_comparison() {
        let input = temp_path("csv");
        std::fs::write(
            &input,
            "date,price,win\n2024-01-06,10,0\n2024-01-13,10,25\n2024-01-20,10,5\n",
        )
        .unwrap();
        let config = ComparisonConfig::default().with_input(&input);

        let table = load_comparison(&config, &provider()).await.unwrap();
        std::fs::remove_file(&input).ok();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.lottery_returns(),
            vec![Some(dec!(-100.0)), Some(dec!(25.0)), Some(dec!(0.0))]
        );
        assert_eq!(table.unmatched_count(), 0);
    }

    #[tokio::test]
    async fn test_load_comparison_missing_input() {
        let config = ComparisonConfig::default().with_input(temp_path("xlsx"));
        let err = load_comparison(&config, &provider()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to load lottery data"));
    }

    #[tokio::test]
    async fn test_load_comparison_no_market_data() {
        let input = temp_path("csv");
        std::fs::write(&input, "date,price,win\n2024-02-03,10,0\n").unwrap();
        let config = ComparisonConfig::default().with_input(&input);

        let err = load_comparison(&config, &provider()).await.unwrap_err();
        std::fs::remove_file(&input).ok();

        assert!(err.to_string().contains("Failed to retrieve market data"));
    }

    #[test]
    fn test_summary_display() {
        let summary = ComparisonSummary {
            rounds: 3,
            unmatched: 1,
            latest_date: Some(date(20)),
            lottery_label: "Porukkalotto 0.0%".to_string(),
            index_label: "OMX Helsinki +5.0%".to_string(),
            output_path: PathBuf::from("kimppalotto.png"),
        };
        let text = summary.to_string();

        assert!(text.starts_with("Rounds: 3 (1 without index data)"));
        assert!(text.contains("Latest round: 20.01.2024"));
        assert!(text.contains("OMX Helsinki +5.0%"));
        assert!(text.ends_with("Chart: kimppalotto.png"));
    }
}

//! 비교 파이프라인 통합 테스트.
//!
//! 공개 API만 사용합니다:
//! - load_comparison()
//! - run_comparison()
//! - ComparisonSummary

use std::path::PathBuf;

use chrono::NaiveDate;
use jackpot_cli::{load_comparison, run_comparison, ComparisonSummary};
use jackpot_core::{ComparisonConfig, MarketObservation, StaticMarketProvider};
use rust_decimal_macros::dec;

// ============================================================================
// 테스트 헬퍼 함수
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 테스트용 로또 결과 CSV 작성.
fn write_lottery_csv(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "jackpot-pipeline-{}-{}.csv",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// 토요일 추첨 다음 월요일에 종가가 있는 평일 시세.
fn weekday_provider() -> StaticMarketProvider {
    let mut observations = Vec::new();
    let closes = [
        (date(2024, 1, 8), dec!(100)),
        (date(2024, 1, 9), dec!(101)),
        (date(2024, 1, 15), dec!(110)),
        (date(2024, 1, 16), dec!(108)),
        (date(2024, 1, 22), dec!(105)),
    ];
    for (d, close) in closes {
        observations.push(MarketObservation::new(d, close));
    }
    StaticMarketProvider::new(observations)
}

// ============================================================================
// 시나리오
// ============================================================================

#[tokio::test]
async fn test_three_saturday_rounds() {
    // 입력 순서가 뒤섞여 있어도 날짜순으로 처리
    let input = write_lottery_csv(
        "three",
        "Date,Price,Win\n13.1.2024,10,25\n2024-01-06,10,0\n2024-01-20,10,5\n",
    );
    let config = ComparisonConfig::default().with_input(&input);

    let table = load_comparison(&config, &weekday_provider()).await.unwrap();
    std::fs::remove_file(&input).ok();

    let rows = table.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|r| r.round).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        rows.iter().map(|r| r.trading_date).collect::<Vec<_>>(),
        vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
    );
    assert_eq!(
        rows.iter().map(|r| r.cumulative_spend).collect::<Vec<_>>(),
        vec![dec!(10), dec!(20), dec!(30)]
    );
    assert_eq!(
        rows.iter().map(|r| r.cumulative_win).collect::<Vec<_>>(),
        vec![dec!(0), dec!(25), dec!(30)]
    );
    assert_eq!(
        table.lottery_returns(),
        vec![Some(dec!(-100.0)), Some(dec!(25.0)), Some(dec!(0.0))]
    );
    assert_eq!(
        table.index_returns(),
        vec![Some(dec!(0.0)), Some(dec!(5.0)), Some(dec!(0.2))]
    );
}

#[tokio::test]
async fn test_round_after_last_trading_day() {
    let input = write_lottery_csv(
        "tail",
        "date,price,win\n2024-01-06,10,0\n2024-01-13,10,25\n2024-01-20,10,5\n2024-01-27,10,0\n",
    );
    let config = ComparisonConfig::default().with_input(&input);

    let table = load_comparison(&config, &weekday_provider()).await.unwrap();
    std::fs::remove_file(&input).ok();

    let last = table.latest().unwrap();
    assert_eq!(last.trading_date, date(2024, 1, 27));
    assert_eq!(last.close, None);
    assert_eq!(last.index_return_pct, None);
    assert_eq!(last.lottery_return_pct, Some(dec!(-25.0)));
    assert_eq!(table.unmatched_count(), 1);

    let summary = ComparisonSummary::new(&table, &config.output_path);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(summary.latest_date, Some(date(2024, 1, 27)));
    assert_eq!(summary.lottery_label, "Porukkalotto -25.0%");
    assert_eq!(summary.index_label, "OMX Helsinki +0.2%");
}

#[tokio::test]
async fn test_missing_win_column_is_fatal() {
    let input = write_lottery_csv("nowin", "date,price\n2024-01-06,10\n");
    let config = ComparisonConfig::default().with_input(&input);

    let result = load_comparison(&config, &weekday_provider()).await;
    std::fs::remove_file(&input).ok();

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("Missing column: win"));
}

#[tokio::test]
async fn test_run_comparison_writes_chart() {
    let input = write_lottery_csv(
        "render",
        "date,price,win\n2024-01-06,10,0\n2024-01-13,10,25\n2024-01-20,10,5\n",
    );
    let output = std::env::temp_dir().join(format!("jackpot-pipeline-{}.png", std::process::id()));
    let config = ComparisonConfig::default()
        .with_input(&input)
        .with_output(&output)
        .with_dpi(50);

    let summary = run_comparison(&config, &weekday_provider()).await.unwrap();
    std::fs::remove_file(&input).ok();

    let dimensions = image::image_dimensions(&output).unwrap();
    std::fs::remove_file(&output).ok();

    assert_eq!(summary.rounds, 3);
    assert_eq!(summary.output_path, output);
    // 6 × 4 인치, 50 DPI
    assert_eq!(dimensions, (300, 200));
}

//! 로또 풀 vs 지수 비교 CLI.
//!
//! `data/data.xlsx`의 로또 결과와 OMX Helsinki 25 종가를 비교한 차트를
//! 이미지로 저장합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 기본값 (300 DPI, kimppalotto.png)
//! jackpot
//!
//! # 해상도와 파일명 지정
//! jackpot -d 150 -o tilanne.jpg
//!
//! # JSON 로그
//! LOG_FORMAT=json RUST_LOG=debug jackpot
//! ```

use anyhow::Context;
use clap::Parser;
use jackpot_cli::run_comparison;
use jackpot_core::{
    init_logging, ComparisonConfig, LogConfig, DEFAULT_DPI, DEFAULT_OUTPUT_PATH, MAX_DPI, MIN_DPI,
};
use jackpot_data::YahooMarketProvider;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jackpot")]
#[command(about = "로또 풀 수익률과 OMX Helsinki 25 지수 투자 수익률 비교 차트", long_about = None)]
#[command(version)]
struct Cli {
    /// 출력 이미지 DPI (허용 범위 10-2400)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DPI,
        value_parser = clap::value_parser!(u32).range(MIN_DPI as i64..=MAX_DPI as i64)
    )]
    dpi: u32,

    /// 출력 이미지 파일명 (png, jpg, bmp)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging(LogConfig::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let cli = Cli::parse();

    let config = ComparisonConfig::default()
        .with_dpi(cli.dpi)
        .with_output(cli.output);
    config.validate().context("Invalid arguments")?;

    info!(
        input = %config.input_path.display(),
        ticker = %config.ticker,
        dpi = config.dpi,
        output = %config.output_path.display(),
        "Starting comparison"
    );

    let provider = YahooMarketProvider::new()?;

    match run_comparison(&config, &provider).await {
        Ok(summary) => {
            println!("\n{}", summary);
            println!("Script complete!");
            Ok(())
        }
        Err(e) => {
            error!("Comparison failed: {:#}", e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["jackpot"]).unwrap();
        assert_eq!(cli.dpi, DEFAULT_DPI);
        assert_eq!(cli.output, "kimppalotto.png");
    }

    #[test]
    fn test_cli_dpi_range() {
        assert!(Cli::try_parse_from(["jackpot", "-d", "5"]).is_err());
        assert!(Cli::try_parse_from(["jackpot", "-d", "0"]).is_err());
        assert!(Cli::try_parse_from(["jackpot", "--dpi", "3000"]).is_err());

        let cli = Cli::try_parse_from(["jackpot", "-d", "2400", "-o", "tilanne.jpg"]).unwrap();
        assert_eq!(cli.dpi, 2400);
        assert_eq!(cli.output, "tilanne.jpg");
    }

    #[test]
    fn test_cli_dpi_help_mentions_range() {
        let help = <Cli as clap::CommandFactory>::command().render_long_help().to_string();
        assert!(help.contains("10-2400"));
    }
}

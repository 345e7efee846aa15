//! 실행 설정.
//!
//! 입력 파일과 지수 심볼은 고정값이며, DPI와 출력 파일명만
//! 명령줄에서 변경할 수 있습니다.

use std::path::{Path, PathBuf};

/// 기본 입력 파일 경로.
pub const DEFAULT_INPUT_PATH: &str = "data/data.xlsx";
/// 기본 비교 지수 (OMX Helsinki 25).
pub const DEFAULT_TICKER: &str = "^OMXH25";
/// 기본 출력 DPI.
pub const DEFAULT_DPI: u32 = 300;
/// 기본 출력 파일명.
pub const DEFAULT_OUTPUT_PATH: &str = "kimppalotto.png";

/// 허용 DPI 범위.
pub const MIN_DPI: u32 = 10;
pub const MAX_DPI: u32 = 2400;

/// 지원하는 출력 이미지 확장자.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// 비교 실행 설정.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonConfig {
    /// 로또 회차 파일
    pub input_path: PathBuf,
    /// 비교 지수 심볼
    pub ticker: String,
    /// 출력 이미지 DPI
    pub dpi: u32,
    /// 출력 이미지 경로
    pub output_path: PathBuf,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            ticker: DEFAULT_TICKER.to_string(),
            dpi: DEFAULT_DPI,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl ComparisonConfig {
    /// DPI를 설정합니다.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// 출력 경로를 설정합니다.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output_path = output.into();
        self
    }

    /// 입력 경로를 설정합니다.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input_path = input.into();
        self
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(MIN_DPI..=MAX_DPI).contains(&self.dpi) {
            return Err(ConfigValidationError::InvalidValue(format!(
                "dpi must be between {} and {} (got {})",
                MIN_DPI, MAX_DPI, self.dpi
            )));
        }

        if self.ticker.trim().is_empty() {
            return Err(ConfigValidationError::MissingField("ticker".into()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingField("output".into()));
        }

        if image_extension(&self.output_path).is_none() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "unsupported output format: {} (expected one of {})",
                self.output_path.display(),
                SUPPORTED_IMAGE_EXTENSIONS.join(", ")
            )));
        }

        Ok(())
    }
}

/// 지원하는 이미지 확장자를 소문자로 반환합니다.
pub fn image_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    SUPPORTED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// 설정 검증 오류.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComparisonConfig::default();

        assert_eq!(config.input_path, PathBuf::from("data/data.xlsx"));
        assert_eq!(config.ticker, "^OMXH25");
        assert_eq!(config.dpi, 300);
        assert_eq!(config.output_path, PathBuf::from("kimppalotto.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ComparisonConfig::default()
            .with_dpi(150)
            .with_output("out/chart.JPG");

        assert_eq!(config.dpi, 150);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_dpi() {
        assert!(ComparisonConfig::default().with_dpi(0).validate().is_err());
        assert!(ComparisonConfig::default().with_dpi(5000).validate().is_err());
        assert!(ComparisonConfig::default().with_dpi(MIN_DPI).validate().is_ok());
        assert!(ComparisonConfig::default().with_dpi(MAX_DPI).validate().is_ok());
    }

    #[test]
    fn test_invalid_output() {
        let config = ComparisonConfig::default().with_output("chart.pdf");
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidValue(_))
        ));

        let config = ComparisonConfig::default().with_output("chart");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension(Path::new("a/b.PNG")), Some("png".to_string()));
        assert_eq!(image_extension(Path::new("a/b.svg")), None);
    }
}

//! 로또 풀 결과 파일 로더.
//!
//! 회차별 추첨일(`date`), 구매 금액(`price`), 당첨금(`win`)을 담은 표를 읽어
//! 날짜순으로 정렬된 [`LotteryRound`] 목록을 반환합니다.
//!
//! # 지원 형식
//!
//! | 확장자 | 리더 |
//! |--------|------|
//! | `xlsx`, `xlsm`, `xlsb`, `xls`, `ods` | calamine (첫 번째 시트) |
//! | `csv` | csv |
//!
//! 첫 번째 비어 있지 않은 행을 헤더로 사용하며, 컬럼 이름은 대소문자와
//! 앞뒤 공백을 무시하고 비교합니다.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{Days, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use jackpot_core::{sort_rounds, LotteryRound, Price};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{DataError, Result};

/// 필수 컬럼 이름.
const DATE_COLUMN: &str = "date";
const PRICE_COLUMN: &str = "price";
const WIN_COLUMN: &str = "win";

/// 스프레드시트 확장자.
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// 텍스트 날짜 형식 (순서대로 시도).
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// 로또 결과 파일 로드.
///
/// # Errors
///
/// - `DataError::Io` / `DataError::Spreadsheet` / `DataError::Csv`: 파일을 읽을 수 없음
/// - `DataError::MissingColumn`: 필수 컬럼 누락
/// - `DataError::ParseError`: 셀 값 파싱 실패 (행/컬럼 포함)
/// - `DataError::InvalidData`: 지원하지 않는 확장자, 음수 금액, 데이터 행 없음
pub fn load_lottery_rounds(path: impl AsRef<Path>) -> Result<Vec<LotteryRound>> {
    let path = path.as_ref();
    // 파일이 없으면 리더 종류와 관계없이 I/O 오류로 보고
    std::fs::metadata(path)?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let table = if extension == "csv" {
        read_csv_table(path)?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        read_spreadsheet_table(path)?
    } else {
        return Err(DataError::InvalidData(format!(
            "지원하지 않는 파일 형식: {}",
            path.display()
        )));
    };

    let mut rounds = table.into_rounds()?;
    sort_rounds(&mut rounds);

    info!(path = %path.display(), rounds = rounds.len(), "로또 결과 로드 완료");
    Ok(rounds)
}

// =============================================================================
// 셀 표현
// =============================================================================

/// 짧은 CSV 행의 누락된 셀.
static EMPTY_CELL: RawCell = RawCell::Empty;

/// 리더 종류와 무관한 셀 값.
#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl RawCell {
    fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(trimmed.to_string())
        }
    }

    fn from_sheet(cell: &Data) -> Self {
        match cell {
            Data::Empty => RawCell::Empty,
            Data::String(s) => RawCell::from_text(s),
            Data::Float(f) => RawCell::Number(*f),
            Data::Int(i) => RawCell::Number(*i as f64),
            Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
                Some(date) => RawCell::Date(date),
                None => RawCell::Text(cell.to_string()),
            },
            _ => RawCell::from_text(&cell.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }
}

/// 헤더와 데이터 행으로 정규화된 표.
struct RawTable {
    header: HashMap<String, usize>,
    /// (파일 기준 1부터 시작하는 행 번호, 셀)
    rows: Vec<(usize, Vec<RawCell>)>,
}

/// 필수 컬럼 위치.
#[derive(Debug, Clone, Copy)]
struct LotteryColumns {
    date: usize,
    price: usize,
    win: usize,
}

impl LotteryColumns {
    fn locate(header: &HashMap<String, usize>) -> Result<Self> {
        let find = |name: &str| {
            header
                .get(name)
                .copied()
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            price: find(PRICE_COLUMN)?,
            win: find(WIN_COLUMN)?,
        })
    }
}

impl RawTable {
    fn into_rounds(self) -> Result<Vec<LotteryRound>> {
        let columns = LotteryColumns::locate(&self.header)?;
        let mut rounds = Vec::with_capacity(self.rows.len());

        for (row_number, cells) in &self.rows {
            if cells.iter().all(RawCell::is_empty) {
                debug!(row = row_number, "빈 행 건너뜀");
                continue;
            }

            let cell = |idx: usize| cells.get(idx).unwrap_or(&EMPTY_CELL);

            let date = parse_date_cell(cell(columns.date))
                .map_err(|e| cell_error(*row_number, DATE_COLUMN, e))?;
            let price = parse_amount_cell(cell(columns.price), false)
                .map_err(|e| cell_error(*row_number, PRICE_COLUMN, e))?;
            let win = parse_amount_cell(cell(columns.win), true)
                .map_err(|e| cell_error(*row_number, WIN_COLUMN, e))?;

            if price.is_sign_negative() || win.is_sign_negative() {
                return Err(DataError::InvalidData(format!(
                    "행 {}: 음수 금액 (price={}, win={})",
                    row_number, price, win
                )));
            }

            rounds.push(LotteryRound::new(date, price, win));
        }

        if rounds.is_empty() {
            return Err(DataError::InvalidData("로또 회차 데이터가 없습니다".to_string()));
        }

        Ok(rounds)
    }
}

fn cell_error(row: usize, column: &str, message: String) -> DataError {
    DataError::ParseError(format!("행 {}, 컬럼 '{}': {}", row, column, message))
}

// =============================================================================
// 리더
// =============================================================================

fn read_csv_table(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let header = build_header_map(headers.iter());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record: StringRecord = record?;
        let row_number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);
        rows.push((row_number, record.iter().map(RawCell::from_text).collect()));
    }

    debug!(path = %path.display(), rows = rows.len(), "CSV 읽기 완료");
    Ok(RawTable { header, rows })
}

fn read_spreadsheet_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::InvalidData(format!("시트가 없습니다: {}", path.display())))??;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut sheet_rows = range
        .rows()
        .enumerate()
        .map(|(idx, cells)| {
            let cells: Vec<RawCell> = cells.iter().map(RawCell::from_sheet).collect();
            (first_row + idx + 1, cells)
        })
        .skip_while(|(_, cells)| cells.iter().all(RawCell::is_empty));

    let header = match sheet_rows.next() {
        Some((_, cells)) => build_header_map(cells.iter().map(|c| match c {
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => n.to_string(),
            RawCell::Date(d) => d.to_string(),
            RawCell::Empty => String::new(),
        })),
        None => {
            return Err(DataError::InvalidData(format!(
                "빈 시트: {}",
                path.display()
            )))
        }
    };

    let rows: Vec<_> = sheet_rows.collect();
    debug!(path = %path.display(), rows = rows.len(), "스프레드시트 읽기 완료");
    Ok(RawTable { header, rows })
}

fn build_header_map<I, S>(names: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = HashMap::new();
    for (idx, name) in names.into_iter().enumerate() {
        // 중복 이름은 첫 번째 컬럼 사용
        map.entry(normalize_header_name(name.as_ref())).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // UTF-8 BOM이 붙은 CSV 첫 헤더 처리
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

// =============================================================================
// 값 파싱
// =============================================================================

fn parse_date_cell(cell: &RawCell) -> std::result::Result<NaiveDate, String> {
    match cell {
        RawCell::Date(date) => Ok(*date),
        RawCell::Text(text) => parse_date_text(text),
        RawCell::Number(serial) => excel_serial_to_date(*serial),
        RawCell::Empty => Err("날짜가 비어 있습니다".to_string()),
    }
}

/// 텍스트 날짜 파싱 (ISO, ISO datetime, D.M.YYYY).
fn parse_date_text(text: &str) -> std::result::Result<NaiveDate, String> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }
    Err(format!("날짜 파싱 실패: {}", text))
}

/// Excel 일련번호(1900 날짜 체계)를 날짜로 변환.
fn excel_serial_to_date(serial: f64) -> std::result::Result<NaiveDate, String> {
    // 9999-12-31 = 2958465
    if !serial.is_finite() || !(1.0..=2_958_465.0).contains(&serial) {
        return Err(format!("날짜 일련번호 범위 초과: {}", serial));
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(Days::new(serial.trunc() as u64)))
        .ok_or_else(|| format!("날짜 일련번호 변환 실패: {}", serial))
}

/// 금액 셀 파싱.
///
/// `empty_as_zero`가 참이면 빈 셀을 0으로 취급합니다 (당첨 없음).
fn parse_amount_cell(cell: &RawCell, empty_as_zero: bool) -> std::result::Result<Price, String> {
    match cell {
        RawCell::Number(n) => Decimal::from_f64(*n).ok_or_else(|| format!("숫자 변환 실패: {}", n)),
        RawCell::Text(text) => parse_amount_text(text),
        RawCell::Empty if empty_as_zero => Ok(Decimal::ZERO),
        RawCell::Empty => Err("금액이 비어 있습니다".to_string()),
        RawCell::Date(d) => Err(format!("금액 대신 날짜: {}", d)),
    }
}

/// 텍스트 금액 파싱.
///
/// 통화 기호와 공백을 제거합니다. 쉼표와 점이 모두 있으면 마지막에 나온
/// 쪽이 소수점입니다. 쉼표 하나만 있으면 소수점으로 보지만, 뒤에 정확히
/// 세 자리가 오면 ("1,234") 천 단위 구분자와 구별할 수 없어 오류입니다.
fn parse_amount_text(text: &str) -> std::result::Result<Price, String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(comma), None) => {
            if cleaned.matches(',').count() > 1 {
                cleaned.replace(',', "")
            } else if cleaned[comma + 1..].len() == 3 {
                return Err(format!("천 단위 구분자인지 소수점인지 알 수 없음: {}", text));
            } else {
                cleaned.replace(',', ".")
            }
        }
        (None, _) => cleaned,
    };

    Decimal::from_str(&normalized).map_err(|e| format!("숫자 파싱 실패: {} - {}", text, e))
}

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use crate::domain::models::profile::ProfileRow;

pub const NAME_COLUMN: &str = "Name";
pub const PROFILE_COLUMN: &str = "profile";
pub const EMAIL_COLUMN: &str = "mail";

/// CSV 校验错误
///
/// 错误信息会直接展示给上传文件的用户
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CsvError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Only CSV files are allowed")]
    NotCsv,

    #[error("Error validating CSV: file is not valid UTF-8")]
    Encoding,

    #[error("Error validating CSV: {0}")]
    Malformed(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Missing values in 'Name' column at rows: {}", join_rows(.0))]
    MissingNames(Vec<u64>),

    #[error("The CSV file contains no participants")]
    Empty,
}

fn join_rows(rows: &[u64]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 上传文件的列位置
struct Columns {
    name: usize,
    profile: usize,
    email: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, CsvError> {
        let find = |wanted: &str| headers.iter().position(|h| h == wanted);

        let name = find(NAME_COLUMN);
        let profile = find(PROFILE_COLUMN);
        let missing: Vec<String> = [(NAME_COLUMN, name), (PROFILE_COLUMN, profile)]
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(col, _)| col.to_string())
            .collect();

        match (name, profile) {
            (Some(name), Some(profile)) => Ok(Self {
                name,
                profile,
                email: find(EMAIL_COLUMN),
            }),
            _ => Err(CsvError::MissingColumns(missing)),
        }
    }
}

/// 检查上传的文件名
pub fn check_file_name(file_name: &str) -> Result<(), CsvError> {
    if file_name.trim().is_empty() {
        return Err(CsvError::NoFileSelected);
    }
    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(CsvError::NotCsv);
    }
    Ok(())
}

/// 解析并校验上传的参与者 CSV
///
/// # 参数
///
/// * `file_name` - 上传时的文件名
/// * `bytes` - 文件内容
///
/// # 返回值
///
/// * `Ok(Vec<ProfileRow>)` - 按文件顺序排列的参与者
/// * `Err(CsvError)` - 校验失败的原因
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Vec<ProfileRow>, CsvError> {
    check_file_name(file_name)?;
    parse_rows(bytes)
}

/// 解析 CSV 内容，不检查文件名
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<ProfileRow>, CsvError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CsvError::Encoding)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if let Some(line) = unterminated_quote(text) {
        return Err(CsvError::Malformed(format!(
            "unterminated quoted field starting at line {}",
            line
        )));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CsvError::Malformed(e.to_string()))?
        .clone();
    let columns = Columns::locate(&headers)?;

    let mut rows = Vec::new();
    let mut missing_names = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CsvError::Malformed(e.to_string()))?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row_number = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        let cell = |idx: usize| record.get(idx).unwrap_or("");
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());

        let name = cell(columns.name);
        if name.is_empty() {
            missing_names.push(row_number);
            continue;
        }

        rows.push(ProfileRow {
            row_number,
            name: name.to_string(),
            profile_url: non_empty(cell(columns.profile)),
            email: columns.email.and_then(|idx| non_empty(cell(idx))),
        });
    }

    if !missing_names.is_empty() {
        return Err(CsvError::MissingNames(missing_names));
    }
    if rows.is_empty() {
        return Err(CsvError::Empty);
    }

    Ok(rows)
}

/// 查找没有闭合的引号字段，返回它开始的行号
///
/// csv 读取器遇到这种字段会一直读到文件末尾而不报错
fn unterminated_quote(text: &str) -> Option<u64> {
    let mut line = 1;
    let mut open_at = None;
    let mut field_start = true;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match (open_at, c) {
            (Some(_), '"') => {
                // "" is an escaped quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    open_at = None;
                    field_start = false;
                }
            }
            (Some(_), '\n') => line += 1,
            (Some(_), _) => {}
            (None, '"') if field_start => open_at = Some(line),
            (None, ',') => field_start = true,
            (None, '\n') => {
                line += 1;
                field_start = true;
            }
            (None, '\r') => {}
            (None, _) => field_start = false,
        }
    }
    open_at
}

#[cfg(test)]
#[path = "csv_ingest_test.rs"]
mod tests;

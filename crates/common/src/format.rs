use chrono::{DateTime, NaiveDate};

const EMPTY_CELL: &str = "-";

/// 将表格中的日期渲染为 `DD/MM/YYYY`
///
/// 表格返回表单中输入的原始 `YYYY-MM-DD`，或单元格被重新格式化后的
/// RFC 3339 时间戳；其他内容原样显示。
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return EMPTY_CELL.to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

pub fn display_cnpj(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let only_mask_chars = raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '/' | '-' | ' '));
    if digits.len() != 14 || !only_mask_chars {
        return raw.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &digits[0..2],
        &digits[2..5],
        &digits[5..8],
        &digits[8..12],
        &digits[12..14]
    )
}

//! 读取端点响应解码
//!
//! 外部脚本有时直接返回数组，有时返回 `{ "data": [...] }`。
//! 两种形状都显式建模，其他任何形状都归一为空列表。

use crate::models::CertidaoRecord;
use serde::Deserialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload {
    /// `[ {...}, {...} ]`
    Bare(Vec<JsonValue>),
    /// `{ "data": [ ... ] }`，`data` 缺失或为 null 时视为空
    Wrapped {
        #[serde(default)]
        data: Option<Vec<JsonValue>>,
    },
    /// 兜底：无法识别的形状
    Unrecognized(JsonValue),
}

impl ListPayload {
    pub fn parse(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    pub fn into_records(self) -> Vec<CertidaoRecord> {
        let rows = match self {
            Self::Bare(rows) => rows,
            Self::Wrapped { data } => data.unwrap_or_default(),
            Self::Unrecognized(value) => {
                tracing::debug!(shape = %shape_of(&value), "unrecognized list payload");
                Vec::new()
            }
        };
        rows.into_iter()
            .filter(JsonValue::is_object)
            .filter_map(|row| serde_json::from_value(row).ok())
            .collect()
    }
}

fn shape_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

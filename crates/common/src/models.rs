use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Federal,
    Estadual,
    Municipal,
    Trabalhista,
    Outro,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Federal,
        DocumentType::Estadual,
        DocumentType::Municipal,
        DocumentType::Trabalhista,
        DocumentType::Outro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Federal => "Federal",
            Self::Estadual => "Estadual",
            Self::Municipal => "Municipal",
            Self::Trabalhista => "Trabalhista",
            Self::Outro => "Outro",
        }
    }

    /// 空字符串表示未选择
    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == raw)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 外部表格中存储的一条合规证明
///
/// 字段名与表格的线上格式一致；表格不约束结构，缺失字段解码为空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertidaoRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub empresa: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cnpj: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tipo_documento: String,
    #[serde(deserialize_with = "lenient_string")]
    pub orgao: String,
    #[serde(deserialize_with = "lenient_string")]
    pub data_emissao: String,
    #[serde(deserialize_with = "lenient_string")]
    pub fim_vigencia: String,
    #[serde(deserialize_with = "lenient_string")]
    pub status_novo_venc: String,
}

impl CertidaoRecord {
    pub const FIELDS: [&'static str; 8] = [
        "empresa",
        "cnpj",
        "email",
        "tipoDocumento",
        "orgao",
        "dataEmissao",
        "fimVigencia",
        "statusNovoVenc",
    ];

    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "empresa" => &self.empresa,
            "cnpj" => &self.cnpj,
            "email" => &self.email,
            "tipoDocumento" => &self.tipo_documento,
            "orgao" => &self.orgao,
            "dataEmissao" => &self.data_emissao,
            "fimVigencia" => &self.fim_vigencia,
            "statusNovoVenc" => &self.status_novo_venc,
            _ => return None,
        };
        Some(value.as_str())
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "empresa" => &mut self.empresa,
            "cnpj" => &mut self.cnpj,
            "email" => &mut self.email,
            "tipoDocumento" => &mut self.tipo_documento,
            "orgao" => &mut self.orgao,
            "dataEmissao" => &mut self.data_emissao,
            "fimVigencia" => &mut self.fim_vigencia,
            "statusNovoVenc" => &mut self.status_novo_venc,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        DocumentType::from_label(&self.tipo_documento)
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .into_iter()
            .filter(|name| self.field(name).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }
}

// 表格对看起来像数字的单元格返回数字，对空单元格返回 null
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEnvelope<T = CertidaoRecord> {
    pub certidao: T,
}

/// relay（通常也是外部脚本）返回的响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl RelayReply {
    pub fn failure_reason(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Erro desconhecido ao salvar.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_uses_sheet_field_names() {
        let mut record = CertidaoRecord::default();
        assert!(record.set_field("tipoDocumento", "Federal"));
        assert!(record.set_field("fimVigencia", "2025-03-01"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["tipoDocumento"], "Federal");
        assert_eq!(value["fimVigencia"], "2025-03-01");
        assert_eq!(value["statusNovoVenc"], "");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut record = CertidaoRecord::default();
        assert!(!record.set_field("razaoSocial", "Acme"));
        assert_eq!(record, CertidaoRecord::default());
    }

    #[test]
    fn sparse_rows_decode_with_defaults() {
        let record: CertidaoRecord =
            serde_json::from_value(json!({"empresa": "Acme", "cnpj": 12345678000190_u64, "orgao": null}))
                .unwrap();
        assert_eq!(record.empresa, "Acme");
        assert_eq!(record.cnpj, "12345678000190");
        assert_eq!(record.orgao, "");
        assert_eq!(record.email, "");
    }

    #[test]
    fn missing_fields_ignore_whitespace_values() {
        let mut record = CertidaoRecord::default();
        for name in CertidaoRecord::FIELDS {
            record.set_field(name, "x");
        }
        assert!(record.missing_fields().is_empty());

        record.set_field("email", "   ");
        assert_eq!(record.missing_fields(), vec!["email"]);
    }

    #[test]
    fn document_type_round_trips_labels() {
        for kind in DocumentType::ALL {
            assert_eq!(DocumentType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(DocumentType::from_label(""), None);
    }

    #[test]
    fn relay_reply_prefers_message_then_error() {
        let reply: RelayReply = serde_json::from_value(json!({"ok": false, "error": "boom"})).unwrap();
        assert!(!reply.ok);
        assert_eq!(reply.failure_reason(), "boom");

        let reply: RelayReply = serde_json::from_value(json!({})).unwrap();
        assert_eq!(reply.failure_reason(), "Erro desconhecido ao salvar.");
    }
}

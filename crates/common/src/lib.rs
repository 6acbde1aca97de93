pub mod config;
pub mod error;
pub mod format;
pub mod listing;
#[cfg(feature = "server")]
pub mod metrics;
pub mod models;

// ============ 重新导出常用类型 ============

// 错误处理
pub use error::{CertidaoError, Result};

// 配置相关
pub use config::AppConfig;

// 数据模型
pub use models::{CertidaoRecord, DocumentType, RelayReply, SubmitEnvelope};

// 列表解码
pub use listing::ListPayload;

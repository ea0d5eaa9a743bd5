use std::fmt;

use crate::utils::url_validator::UrlValidationError;

#[derive(Debug, Clone)]
pub enum ShortenerError {
    Validation(String),
    Storage(String),
    FatalStartup(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
}

impl ShortenerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortenerError::Validation(_) => "E001",
            ShortenerError::Storage(_) => "E002",
            ShortenerError::FatalStartup(_) => "E003",
            ShortenerError::Config(_) => "E004",
            ShortenerError::FileOperation(_) => "E005",
            ShortenerError::Serialization(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortenerError::Validation(_) => "Validation Error",
            ShortenerError::Storage(_) => "Storage Error",
            ShortenerError::FatalStartup(_) => "Fatal Startup Error",
            ShortenerError::Config(_) => "Configuration Error",
            ShortenerError::FileOperation(_) => "File Operation Error",
            ShortenerError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortenerError::Validation(msg) => msg,
            ShortenerError::Storage(msg) => msg,
            ShortenerError::FatalStartup(msg) => msg,
            ShortenerError::Config(msg) => msg,
            ShortenerError::FileOperation(msg) => msg,
            ShortenerError::Serialization(msg) => msg,
        }
    }

    /// Startup failures leave no usable store behind; the process must not
    /// keep running on them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShortenerError::FatalStartup(_))
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortenerError {}

// 便捷的构造函数
impl ShortenerError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Validation(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Storage(msg.into())
    }

    pub fn fatal_startup<T: Into<String>>(msg: T) -> Self {
        ShortenerError::FatalStartup(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortenerError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortenerError::Serialization(msg.into())
    }
}

// redb 的各类错误在运行期都归为存储错误；
// 打开阶段的错误由 RedbStore::open 显式转换为 FatalStartup
impl From<redb::Error> for ShortenerError {
    fn from(err: redb::Error) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<redb::DatabaseError> for ShortenerError {
    fn from(err: redb::DatabaseError) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<redb::TransactionError> for ShortenerError {
    fn from(err: redb::TransactionError) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<redb::TableError> for ShortenerError {
    fn from(err: redb::TableError) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<redb::StorageError> for ShortenerError {
    fn from(err: redb::StorageError) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for ShortenerError {
    fn from(err: redb::CommitError) -> Self {
        ShortenerError::Storage(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ShortenerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ShortenerError::Storage(format!("storage task failed: {}", err))
    }
}

impl From<UrlValidationError> for ShortenerError {
    fn from(err: UrlValidationError) -> Self {
        ShortenerError::Validation(err.to_string())
    }
}

impl From<std::io::Error> for ShortenerError {
    fn from(err: std::io::Error) -> Self {
        ShortenerError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortenerError {
    fn from(err: serde_json::Error) -> Self {
        ShortenerError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;

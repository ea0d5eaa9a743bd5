//! URL 验证模块
//!
//! Checks that a candidate target is a request-URI style reference (an
//! absolute URI, or an absolute path) before a key is allocated for it. Only
//! the verdict is used: the caller keeps the exact string it supplied, so
//! fragments, escapes and spaces are never rewritten.

use url::Url;

/// Absolute paths are resolved against this before parsing.
const PATH_BASE: &str = "http://localhost";

/// URL 验证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    IllegalCharacter(char),
    NotAbsolute,
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "URL cannot be empty"),
            Self::IllegalCharacter(c) => {
                write!(f, "URL contains an illegal character: {:?}", c)
            }
            Self::NotAbsolute => {
                write!(f, "URL must be absolute (scheme:...) or start with '/'")
            }
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// 验证目标 URL
///
/// 检查项目：
/// 1. URL 不为空
/// 2. 不含控制字符，且不以空白开头
/// 3. 以 `/` 开头的绝对路径，或能被解析为带 scheme 的绝对 URI
///
/// Spaces inside the path are allowed. A space in the host is left to the
/// URL parser, which rejects it.
pub fn validate_target(target: &str) -> Result<(), UrlValidationError> {
    if target.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    // url 解析器会静默剔除这些字符，这里显式拒绝
    if let Some(c) = target.chars().find(|c| c.is_control()) {
        return Err(UrlValidationError::IllegalCharacter(c));
    }
    if let Some(c) = target.chars().next().filter(|c| c.is_whitespace()) {
        return Err(UrlValidationError::IllegalCharacter(c));
    }

    let parsed = if target.starts_with('/') {
        Url::parse(PATH_BASE).and_then(|base| base.join(target))
    } else {
        Url::parse(target)
    };

    match parsed {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Err(UrlValidationError::NotAbsolute),
        Err(e) => Err(UrlValidationError::InvalidFormat(e.to_string())),
    }
}

//! 全局错误类型定义
use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum I18nError {
    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则解析失败：{0}")]
    RuleParseError(String),
    #[error("内置规则包异常：{0}")]
    BundleError(String),

    // 匹配相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type I18nResult<T> = Result<T, I18nError>;

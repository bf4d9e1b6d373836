//! 错误类型定义
//!
//! 提供块分配文件系统操作的错误类型。

use core::fmt;

/// 文件系统操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 文件系统尚未挂载
    NotMounted,
    /// 魔数不匹配，设备上没有可识别的文件系统
    InvalidFilesystem,
    /// 分配表校验和不匹配
    ChecksumMismatch,
    /// 同名文件已存在
    AlreadyExists,
    /// 文件不存在
    NotFound,
    /// 分配表没有空闲槽位
    NoFreeSlot,
    /// 没有足够的连续空闲块
    OutOfSpace,
    /// 设备读取失败
    DeviceReadFailed,
    /// 设备写入失败
    DeviceWriteFailed,
    /// 设备擦除失败
    DeviceEraseFailed,
    /// 无效参数（非法文件名、越界地址、未对齐的擦除范围等）
    InvalidInput,
}

impl Error {
    /// 创建新错误
    pub const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }

    /// 获取错误类型
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取错误消息
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// 操作结果类型
pub type Result<T> = core::result::Result<T, Error>;

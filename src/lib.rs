//! blockfs_core: 裸闪存上的最小块分配文件系统
//!
//! 这是一个纯 Rust 实现的块分配文件系统核心，面向只需要存放
//! 少量命名字节块、又不想背上完整日志结构文件系统的嵌入式固件：
//! - **单张分配表**：地址 0 的目录记录 + 回绕求和校验和
//! - **首次适应分配器**：连续空闲块段，无磨损均衡、无碎片整理
//! - **擦除纪律**：写前按擦除单元擦除，每单元每次调用恰好一次
//! - **无 unsafe 代码**，显式小端磁上布局，逐字段序列化
//!
//! 单线程同步模型：没有内部锁和重试，并发调用方必须在外部串行化。
//!
//! # 示例
//!
//! ```rust,ignore
//! use blockfs_core::{BlockFs, FlashDevice, Result};
//!
//! // 为你的闪存实现 FlashDevice trait
//! struct MyFlash {
//!     // ...
//! }
//!
//! fn main() -> Result<()> {
//!     let mut fs = BlockFs::new(MyFlash::new())?;
//!     fs.mount_or_format()?;
//!
//!     fs.create("calib.bin", &[0x2A; 100])?;
//!     let mut buf = [0u8; 128];
//!     let n = fs.read("calib.bin", &mut buf)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # 模块结构
//!
//! - [`error`] - 错误类型定义
//! - [`block`] - 闪存设备抽象
//! - [`consts`] - 磁上格式常量
//! - [`table`] - 分配表操作
//! - [`bitmap`] - 位图操作
//! - [`balloc`] - 空闲块分配
//! - [`fs`] - 文件存储高级 API

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// ===== 核心模块 =====

/// 错误处理
pub mod error;

/// 闪存设备抽象
pub mod block;

/// 磁上格式常量
pub mod consts;

/// 分配表操作
pub mod table;

/// 位图操作
pub mod bitmap;

/// 空闲块分配
pub mod balloc;

/// 文件存储高级 API
pub mod fs;

// ===== 公共导出 =====

// 错误处理
pub use error::{Error, ErrorKind, Result};

// 闪存设备
pub use block::{DeviceStats, FlashDev, FlashDevice, RamFlash};

// 分配表
pub use table::{compute_checksum, AllocationTable, EntryState, FileEntry};

// 空闲块分配
pub use balloc::find_free_run;

// 文件存储
pub use fs::{BlockFs, FileInfo, FsStats};

//! 闪存设备抽象
//!
//! 提供裸闪存设备接口和字节级 I/O 包装。
//! block/device.rs 定义 `FlashDevice` trait 和 `FlashDev` 包装器，
//! 包装器负责边界检查、擦除对齐检查和操作计数。
//! block/ram.rs 提供 RAM 后备的 NOR 模型设备，供测试和主机端工具使用。

mod device;
mod ram;

pub use device::{DeviceStats, FlashDev, FlashDevice};
pub use ram::RamFlash;

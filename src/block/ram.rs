//! RAM 后备的闪存设备模型
//!
//! 用于测试和主机端工具。按 NOR 闪存语义建模：
//! 擦除将整个擦除单元填充为 0xFF，写入只允许作用于已擦除的字节，
//! 违反擦除纪律的写入会以 `DeviceWriteFailed` 失败而不是悄悄成功。

use crate::error::{Error, ErrorKind, Result};
use crate::block::FlashDevice;
use alloc::vec;
use alloc::vec::Vec;

/// 擦除后的字节值
const ERASED_BYTE: u8 = 0xFF;

/// RAM 后备的 NOR 闪存模型
pub struct RamFlash {
    data: Vec<u8>,
    erase_unit: u32,
    /// 注入的写失败次数（每次失败消耗一次）
    write_faults: u32,
}

impl RamFlash {
    /// 创建一个全新（全部已擦除）的设备
    ///
    /// # 参数
    ///
    /// * `size` - 设备容量（字节）
    /// * `erase_unit` - 擦除单元大小（字节）
    pub fn new(size: usize, erase_unit: u32) -> Self {
        Self {
            data: vec![ERASED_BYTE; size],
            erase_unit,
            write_faults: 0,
        }
    }

    /// 注入 count 次写失败
    ///
    /// 接下来的 count 次 `write` 调用会返回 `DeviceWriteFailed`，
    /// 用于测试写入中途失败的恢复路径。
    pub fn inject_write_faults(&mut self, count: u32) {
        self.write_faults = count;
    }

    /// 直接访问底层字节（测试用）
    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    /// 直接修改底层字节（测试用，模拟位翻转等损坏）
    pub fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn check_range(&self, addr: u64, len: u64) -> Result<()> {
        let size = self.data.len() as u64;
        if addr > size || len > size - addr {
            return Err(Error::new(
                ErrorKind::DeviceReadFailed,
                "access beyond end of ram flash",
            ));
        }
        Ok(())
    }
}

impl FlashDevice for RamFlash {
    fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<()> {
        self.check_range(addr, buf.len() as u64)?;
        let start = addr as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, addr: u64, buf: &[u8]) -> Result<()> {
        if self.write_faults > 0 {
            self.write_faults -= 1;
            return Err(Error::new(
                ErrorKind::DeviceWriteFailed,
                "injected write fault",
            ));
        }

        self.check_range(addr, buf.len() as u64)
            .map_err(|_| Error::new(ErrorKind::DeviceWriteFailed, "write beyond end of ram flash"))?;

        let start = addr as usize;
        let target = &mut self.data[start..start + buf.len()];

        // NOR 语义：只能写入已擦除的字节
        if target.iter().any(|&b| b != ERASED_BYTE) {
            return Err(Error::new(
                ErrorKind::DeviceWriteFailed,
                "write to non-erased region",
            ));
        }

        target.copy_from_slice(buf);
        Ok(())
    }

    fn erase(&mut self, addr: u64, len: u64) -> Result<()> {
        let unit = self.erase_unit as u64;
        if addr % unit != 0 || len % unit != 0 {
            return Err(Error::new(
                ErrorKind::DeviceEraseFailed,
                "unaligned erase range",
            ));
        }
        self.check_range(addr, len)
            .map_err(|_| Error::new(ErrorKind::DeviceEraseFailed, "erase beyond end of ram flash"))?;

        let start = addr as usize;
        self.data[start..start + len as usize].fill(ERASED_BYTE);
        Ok(())
    }

    fn device_size(&self) -> u64 {
        self.data.len() as u64
    }

    fn erase_unit_size(&self) -> u32 {
        self.erase_unit
    }
}

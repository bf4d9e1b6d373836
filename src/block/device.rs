//! 闪存设备核心类型

use crate::error::{Error, ErrorKind, Result};

/// 裸闪存设备接口
///
/// 实现此 trait 以提供底层闪存访问。读写地址无需对齐，
/// 但写入目标区域必须已被擦除；擦除地址和长度必须按擦除单元对齐。
///
/// # 示例
///
/// ```rust,ignore
/// use blockfs_core::{FlashDevice, Result};
///
/// struct MyFlash {
///     // ...
/// }
///
/// impl FlashDevice for MyFlash {
///     fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<()> {
///         // 从 addr 读取 buf.len() 字节
///         Ok(())
///     }
///
///     fn write(&mut self, addr: u64, buf: &[u8]) -> Result<()> {
///         // 向已擦除区域写入
///         Ok(())
///     }
///
///     fn erase(&mut self, addr: u64, len: u64) -> Result<()> {
///         // 擦除 [addr, addr + len)，两者均按擦除单元对齐
///         Ok(())
///     }
///
///     fn device_size(&self) -> u64 {
///         16 * 1024 * 1024
///     }
///
///     fn erase_unit_size(&self) -> u32 {
///         4096
///     }
/// }
/// ```
pub trait FlashDevice {
    /// 从设备读取字节
    ///
    /// # 参数
    ///
    /// * `addr` - 起始字节地址
    /// * `buf` - 目标缓冲区，读取 buf.len() 字节
    fn read(&mut self, addr: u64, buf: &mut [u8]) -> Result<()>;

    /// 向设备写入字节
    ///
    /// 目标区域必须已被擦除，否则行为由具体设备决定
    /// （NOR 闪存只能将位从 1 写成 0）。
    ///
    /// # 参数
    ///
    /// * `addr` - 起始字节地址
    /// * `buf` - 源数据
    fn write(&mut self, addr: u64, buf: &[u8]) -> Result<()>;

    /// 擦除字节范围
    ///
    /// `addr` 和 `len` 必须按擦除单元对齐。
    fn erase(&mut self, addr: u64, len: u64) -> Result<()>;

    /// 设备总容量（字节）
    fn device_size(&self) -> u64;

    /// 擦除单元大小（字节），即设备能原子擦除的最小区域
    fn erase_unit_size(&self) -> u32;

    /// 设备是否就绪
    fn is_ready(&self) -> bool {
        true
    }
}

/// 设备操作统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// 读操作次数
    pub read_count: u32,
    /// 写操作次数
    pub write_count: u32,
    /// 擦除操作次数
    pub erase_count: u32,
}

/// 闪存设备包装器
///
/// 在裸设备接口之上提供边界检查、擦除对齐检查和操作计数。
/// 文件系统的所有设备访问都经过这个包装器。
pub struct FlashDev<D: FlashDevice> {
    device: D,
    stats: DeviceStats,
}

impl<D: FlashDevice> FlashDev<D> {
    /// 包装一个裸设备
    ///
    /// # 错误
    ///
    /// 擦除单元大小为 0，或设备容量不是擦除单元的整数倍时
    /// 返回 `InvalidInput`。
    pub fn new(device: D) -> Result<Self> {
        let unit = device.erase_unit_size();
        if unit == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "erase unit size must be nonzero",
            ));
        }
        if device.device_size() % unit as u64 != 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "device size not a multiple of erase unit",
            ));
        }

        Ok(Self {
            device,
            stats: DeviceStats::default(),
        })
    }

    /// 设备总容量（字节）
    pub fn device_size(&self) -> u64 {
        self.device.device_size()
    }

    /// 擦除单元大小（字节）
    pub fn erase_unit_size(&self) -> u32 {
        self.device.erase_unit_size()
    }

    /// 设备是否就绪
    pub fn is_ready(&self) -> bool {
        self.device.is_ready()
    }

    /// 获取操作统计
    pub fn stats(&self) -> DeviceStats {
        self.stats
    }

    /// 取回内部设备
    pub fn into_inner(self) -> D {
        self.device
    }

    /// 地址所在的擦除单元编号
    pub fn erase_unit_of(&self, addr: u64) -> u64 {
        addr / self.device.erase_unit_size() as u64
    }

    /// 从指定地址读取字节
    pub fn read_bytes(&mut self, addr: u64, buf: &mut [u8]) -> Result<()> {
        self.check_range(addr, buf.len() as u64)?;
        self.stats.read_count += 1;
        self.device.read(addr, buf)
    }

    /// 向指定地址写入字节
    ///
    /// 目标区域必须已被擦除。
    pub fn write_bytes(&mut self, addr: u64, buf: &[u8]) -> Result<()> {
        self.check_range(addr, buf.len() as u64)?;
        self.stats.write_count += 1;
        self.device.write(addr, buf)
    }

    /// 擦除一个擦除单元
    pub fn erase_unit(&mut self, unit: u64) -> Result<()> {
        let unit_size = self.device.erase_unit_size() as u64;
        let addr = unit * unit_size;
        self.check_range(addr, unit_size)?;
        self.stats.erase_count += 1;
        self.device.erase(addr, unit_size)
    }

    /// 擦除按擦除单元对齐的字节范围
    pub fn erase_range(&mut self, addr: u64, len: u64) -> Result<()> {
        let unit_size = self.device.erase_unit_size() as u64;
        if addr % unit_size != 0 || len % unit_size != 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "erase range not aligned to erase unit",
            ));
        }
        self.check_range(addr, len)?;
        self.stats.erase_count += 1;
        self.device.erase(addr, len)
    }

    fn check_range(&self, addr: u64, len: u64) -> Result<()> {
        let size = self.device.device_size();
        if addr > size || len > size - addr {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "address range beyond device size",
            ));
        }
        Ok(())
    }
}

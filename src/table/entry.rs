//! 文件槽位记录及其磁上布局
//!
//! 槽位记录固定 48 字节，所有整数字段小端序，逐字段序列化，
//! 绝不依赖编译器内存布局：
//!
//! ```text
//! offset 0:  name[32]     NUL 填充
//! offset 32: size         u32
//! offset 36: start_block  u32
//! offset 40: block_count  u32
//! offset 44: state        u8
//! offset 45: reserved[3]
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};

/// 槽位状态
///
/// 磁上为单字节；未知的原始值按空闲处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// 从未使用
    Free,
    /// 有效文件
    Valid,
    /// 墓碑：文件已删除，槽位和块可复用
    Deleted,
}

impl EntryState {
    /// 磁上字节值
    pub fn to_raw(self) -> u8 {
        match self {
            EntryState::Free => 0,
            EntryState::Valid => 1,
            EntryState::Deleted => 2,
        }
    }

    /// 从磁上字节解析
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => EntryState::Valid,
            2 => EntryState::Deleted,
            _ => EntryState::Free,
        }
    }
}

/// 文件槽位记录
///
/// 删除时只翻转 `state`，`size` 和 `start_block` 保留最后一次的值。
/// 校验和对每个槽位的这两个字段求和而不区分状态，保留旧值使
/// 校验和在挂载周期之间保持稳定；保存和加载路径对此必须对称。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    /// 文件名，NUL 填充
    pub name: [u8; BLOCKFS_NAME_BUF_SIZE],
    /// 文件大小（字节）
    pub size: u32,
    /// 起始块号
    pub start_block: u32,
    /// 占用块数
    pub block_count: u32,
    /// 槽位状态
    pub state: EntryState,
}

impl FileEntry {
    /// 创建空槽位
    pub const fn empty() -> Self {
        Self {
            name: [0u8; BLOCKFS_NAME_BUF_SIZE],
            size: 0,
            start_block: 0,
            block_count: 0,
            state: EntryState::Free,
        }
    }

    /// 设置文件名
    ///
    /// # 错误
    ///
    /// 名字为空、超过 [`BLOCKFS_MAX_NAME_LEN`] 字节或包含 NUL
    /// 时返回 `InvalidInput`。
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        self.name = [0u8; BLOCKFS_NAME_BUF_SIZE];
        self.name[..name.len()].copy_from_slice(name.as_bytes());
        Ok(())
    }

    /// 文件名的有效长度（到第一个 NUL 为止）
    fn name_len(&self) -> usize {
        self.name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(BLOCKFS_NAME_BUF_SIZE)
    }

    /// 文件名字节（不含 NUL 填充）
    pub fn name_bytes(&self) -> &[u8] {
        &self.name[..self.name_len()]
    }

    /// 精确匹配文件名
    pub fn name_matches(&self, name: &str) -> bool {
        self.name_bytes() == name.as_bytes()
    }

    /// 序列化到 48 字节记录
    ///
    /// # Panics
    ///
    /// `buf` 长度不足 [`BLOCKFS_ENTRY_SIZE`] 时 panic（内部契约）。
    pub fn write_to(&self, buf: &mut [u8]) {
        buf[..BLOCKFS_NAME_BUF_SIZE].copy_from_slice(&self.name);
        LittleEndian::write_u32(&mut buf[32..36], self.size);
        LittleEndian::write_u32(&mut buf[36..40], self.start_block);
        LittleEndian::write_u32(&mut buf[40..44], self.block_count);
        buf[44] = self.state.to_raw();
        buf[45..48].fill(0);
    }

    /// 从 48 字节记录反序列化
    pub fn read_from(buf: &[u8]) -> Self {
        let mut name = [0u8; BLOCKFS_NAME_BUF_SIZE];
        name.copy_from_slice(&buf[..BLOCKFS_NAME_BUF_SIZE]);
        Self {
            name,
            size: LittleEndian::read_u32(&buf[32..36]),
            start_block: LittleEndian::read_u32(&buf[36..40]),
            block_count: LittleEndian::read_u32(&buf[40..44]),
            state: EntryState::from_raw(buf[44]),
        }
    }
}

/// 验证文件名
///
/// 合法的名字非空、不超过 [`BLOCKFS_MAX_NAME_LEN`] 字节、不含 NUL。
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput, "file name is empty"));
    }
    if name.len() > BLOCKFS_MAX_NAME_LEN {
        return Err(Error::new(ErrorKind::InvalidInput, "file name too long"));
    }
    if name.as_bytes().contains(&0) {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "file name contains NUL byte",
        ));
    }
    Ok(())
}

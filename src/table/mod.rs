//! 分配表操作
//!
//! 分配表是整个文件系统唯一的元数据记录，持久化在设备地址 0，
//! 角色类似 superblock：头部字段 + 固定容量的文件槽位数组 + 校验和。
//! table/entry.rs 定义槽位记录及其磁上布局；
//! table/checksum.rs 提供回绕求和校验和；
//! table/read.rs 负责读取和完整性验证；
//! table/write.rs 负责擦除后写回和格式化。

mod checksum;
mod entry;
mod read;
mod write;

pub use checksum::compute_checksum;
pub use entry::{validate_name, EntryState, FileEntry};
pub use read::load;
pub use write::{format, save};

use crate::consts::*;

/// 分配表
///
/// 进程内唯一的元数据副本，由文件存储持有并在每次变更后写回。
/// 校验和不在内存中保存，序列化和验证时按需计算。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationTable {
    /// 魔数
    pub magic: u32,
    /// 磁上格式版本
    pub version: u32,
    /// 设备总块数
    pub total_blocks: u32,
    /// 已占用块数（1 个表块 + 所有有效文件的块数）
    pub used_blocks: u32,
    /// 文件槽位数组
    pub entries: [FileEntry; BLOCKFS_MAX_FILES],
}

impl AllocationTable {
    /// 创建一张新格式化的表
    ///
    /// 所有槽位空闲，只有表块本身被计入 `used_blocks`。
    pub fn new_formatted(total_blocks: u32) -> Self {
        Self {
            magic: BLOCKFS_MAGIC,
            version: BLOCKFS_VERSION,
            total_blocks,
            used_blocks: 1,
            entries: [FileEntry::empty(); BLOCKFS_MAX_FILES],
        }
    }

    /// 按槽位序查找指定名字的有效槽位
    pub fn find_valid(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.state == EntryState::Valid && e.name_matches(name))
    }

    /// 查找第一个可复用的槽位（空闲或已删除）
    pub fn free_slot(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.state != EntryState::Valid)
    }

    /// 有效文件数量
    pub fn valid_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.state == EntryState::Valid)
            .count()
    }

    /// 根据有效槽位重新统计占用块数
    ///
    /// 恢复路径必须使用这个值，而不是盲目信任磁上的 `used_blocks`。
    pub fn count_used_blocks(&self) -> u32 {
        let mut used = 1u32; // 表块
        for entry in self.entries.iter() {
            if entry.state == EntryState::Valid {
                used = used.saturating_add(entry.block_count);
            }
        }
        used
    }
}

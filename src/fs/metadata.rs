//! 文件和存储元数据

use alloc::string::String;

/// 单个文件的元数据
///
/// `list()` 按槽位序返回这个结构。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// 文件名
    pub name: String,
    /// 文件大小（字节）
    pub size: u32,
    /// 起始块号
    pub start_block: u32,
    /// 占用块数
    pub block_count: u32,
}

/// 存储统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FsStats {
    /// 块大小（字节）
    pub block_size: u32,
    /// 设备总块数
    pub total_blocks: u32,
    /// 已占用块数（含表块）
    pub used_blocks: u32,
    /// 空闲块数
    pub free_blocks: u32,
    /// 分配器可跟踪的块数上限（真实的容量天花板）
    pub trackable_blocks: u32,
    /// 总容量（字节）
    pub total_bytes: u64,
    /// 已占用容量（字节）
    pub used_bytes: u64,
    /// 剩余容量（字节）
    pub available_bytes: u64,
    /// 有效文件数
    pub file_count: u32,
    /// 文件槽位上限
    pub max_files: u32,
}

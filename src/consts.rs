//! 磁上格式常量定义
//!
//! 这个模块包含了块分配文件系统的所有常量定义，包括：
//! - 分配表布局相关常量
//! - 容量上限
//! - 空闲块位图的可跟踪范围
//!
//! 所有磁上整数字段均为小端序。

//=============================================================================
// 基础常量
//=============================================================================

/// 分配表魔数（"BLFS"）
pub const BLOCKFS_MAGIC: u32 = 0x424C_4653;

/// 磁上格式版本号
pub const BLOCKFS_VERSION: u32 = 1;

/// 逻辑块大小（字节）
///
/// 块大小是编译期常量，不记录在磁上格式中。
pub const BLOCKFS_BLOCK_SIZE: u32 = 4096;

//=============================================================================
// 分配表布局
//=============================================================================

/// 分配表所在的块号（设备地址 0）
pub const BLOCKFS_TABLE_BLOCK: u32 = 0;

/// 分配表文件槽位数量
pub const BLOCKFS_MAX_FILES: usize = 16;

/// 文件名缓冲区大小（含 NUL 填充）
pub const BLOCKFS_NAME_BUF_SIZE: usize = 32;

/// 文件名最大长度（字节，不含 NUL）
pub const BLOCKFS_MAX_NAME_LEN: usize = BLOCKFS_NAME_BUF_SIZE - 1;

/// 单个文件槽位记录大小（字节）
///
/// name[32] + size(4) + start_block(4) + block_count(4) + state(1) + reserved(3)
pub const BLOCKFS_ENTRY_SIZE: usize = 48;

/// 分配表头部大小（magic + version + total_blocks + used_blocks）
pub const BLOCKFS_TABLE_HEADER_SIZE: usize = 16;

/// 分配表记录总大小（头部 + 槽位数组 + 校验和）
pub const BLOCKFS_TABLE_SIZE: usize =
    BLOCKFS_TABLE_HEADER_SIZE + BLOCKFS_MAX_FILES * BLOCKFS_ENTRY_SIZE + 4;

/// 校验和字段在分配表记录中的偏移
pub const BLOCKFS_CHECKSUM_OFFSET: usize =
    BLOCKFS_TABLE_HEADER_SIZE + BLOCKFS_MAX_FILES * BLOCKFS_ENTRY_SIZE;

// 分配表必须放得进块 0
const _: () = assert!(BLOCKFS_TABLE_SIZE <= BLOCKFS_BLOCK_SIZE as usize);

//=============================================================================
// 空闲块位图
//=============================================================================

/// 空闲块位图可跟踪的最大块数
///
/// 这是一个真实的容量上限：超出此范围的块永远不会被分配，
/// 即使设备更大。需要更大范围时必须同步扩大位图，而不是绕过检查。
pub const BLOCKFS_MAX_TRACKED_BLOCKS: u32 = 4096;

/// 空闲块位图大小（字节）
pub const BLOCKFS_BITMAP_SIZE: usize = (BLOCKFS_MAX_TRACKED_BLOCKS as usize) / 8;

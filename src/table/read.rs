//! 分配表读取和验证

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, warn};

use super::{checksum::compute_checksum, AllocationTable, FileEntry};
use crate::block::{FlashDev, FlashDevice};
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};

/// 从设备地址 0 加载并验证分配表
///
/// # 错误
///
/// * `InvalidFilesystem` - 魔数不匹配，设备上没有可识别的文件系统
/// * `ChecksumMismatch` - 存储的校验和与重新计算的不一致
///
/// 两种失败都不是致命错误，只表示当前没有可挂载的文件系统，
/// 调用方可以通过重新格式化恢复。
///
/// 校验和通过后会根据有效槽位重新统计 `used_blocks`；
/// 与磁上值不一致时记录警告并采用重新统计的结果。
pub fn load<D: FlashDevice>(dev: &mut FlashDev<D>) -> Result<AllocationTable> {
    let mut buf = [0u8; BLOCKFS_TABLE_SIZE];
    dev.read_bytes(0, &mut buf)?;

    let (mut table, stored_checksum) = parse_table(&buf)?;

    let computed = compute_checksum(&table);
    if stored_checksum != computed {
        return Err(Error::new(
            ErrorKind::ChecksumMismatch,
            "allocation table checksum mismatch",
        ));
    }

    // 恢复路径重新统计占用块数，不盲目信任磁上值
    let counted = table.count_used_blocks();
    if counted != table.used_blocks {
        warn!(
            "[TABLE] used_blocks mismatch: stored {}, recomputed {}",
            table.used_blocks, counted
        );
        table.used_blocks = counted;
    }

    debug!(
        "[TABLE] loaded: {} total blocks, {} used, {} files",
        table.total_blocks,
        table.used_blocks,
        table.valid_count()
    );

    Ok(table)
}

/// 解析分配表记录
///
/// 只做结构解析和魔数检查，校验和验证由调用方完成。
pub(super) fn parse_table(buf: &[u8; BLOCKFS_TABLE_SIZE]) -> Result<(AllocationTable, u32)> {
    let magic = LittleEndian::read_u32(&buf[0..4]);
    if magic != BLOCKFS_MAGIC {
        return Err(Error::new(
            ErrorKind::InvalidFilesystem,
            "bad allocation table magic",
        ));
    }

    let version = LittleEndian::read_u32(&buf[4..8]);
    let total_blocks = LittleEndian::read_u32(&buf[8..12]);
    let used_blocks = LittleEndian::read_u32(&buf[12..16]);

    let mut entries = [FileEntry::empty(); BLOCKFS_MAX_FILES];
    for (i, entry) in entries.iter_mut().enumerate() {
        let offset = BLOCKFS_TABLE_HEADER_SIZE + i * BLOCKFS_ENTRY_SIZE;
        *entry = FileEntry::read_from(&buf[offset..offset + BLOCKFS_ENTRY_SIZE]);
    }

    let stored_checksum = LittleEndian::read_u32(&buf[BLOCKFS_CHECKSUM_OFFSET..BLOCKFS_CHECKSUM_OFFSET + 4]);

    Ok((
        AllocationTable {
            magic,
            version,
            total_blocks,
            used_blocks,
            entries,
        },
        stored_checksum,
    ))
}

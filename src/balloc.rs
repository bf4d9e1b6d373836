//! 空闲块分配
//!
//! 在分配表的有效槽位之上构建内存中的 used/free 位图，
//! 按首次适应策略查找连续空闲块段。没有最佳适应，也没有
//! 压缩：删除造成的碎片会一直保留到重新格式化。

use log::debug;

use crate::bitmap;
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::table::{AllocationTable, EntryState};

/// 查找 block_count 个连续空闲块（首次适应）
///
/// 位图只覆盖前 [`BLOCKFS_MAX_TRACKED_BLOCKS`] 个块，这是一个
/// 硬性容量上限：超出范围的请求直接失败，即使设备更大也不会
/// 扫描到位图之外。
///
/// # 参数
///
/// * `table` - 当前分配表
/// * `block_count` - 需要的连续块数
/// * `reserved_blocks` - 低端保留块数（至少 1，覆盖表块；当一个
///   擦除单元跨多个块时由调用方扩大，保证数据擦除不会波及表）
///
/// # 返回
///
/// 找到返回段起始块号；没有足够的连续空闲块返回 None。
/// 请求 0 个块时返回第一个数据块且不保留任何块。
pub fn find_free_run(
    table: &AllocationTable,
    block_count: u32,
    reserved_blocks: u32,
) -> Result<Option<u32>> {
    let reserved = reserved_blocks.max(1);

    if block_count == 0 {
        return Ok(Some(reserved));
    }

    if block_count > BLOCKFS_MAX_TRACKED_BLOCKS {
        return Err(Error::new(
            ErrorKind::OutOfSpace,
            "requested run exceeds trackable block range",
        ));
    }

    let limit = table.total_blocks.min(BLOCKFS_MAX_TRACKED_BLOCKS);
    if reserved >= limit {
        return Ok(None);
    }

    let mut map = [0u8; BLOCKFS_BITMAP_SIZE];

    // 低端保留块（表块及其所在擦除单元）恒为占用
    bitmap::set_bits(&mut map, BLOCKFS_TABLE_BLOCK, reserved)?;

    // 标记每个有效槽位的块段，钳制到可跟踪范围
    for entry in table.entries.iter() {
        if entry.state != EntryState::Valid || entry.block_count == 0 {
            continue;
        }
        let start = entry.start_block.min(limit);
        let end = entry
            .start_block
            .saturating_add(entry.block_count)
            .min(limit);
        bitmap::set_bits(&mut map, start, end - start)?;
    }

    let found = bitmap::find_consecutive_zeros(&map, reserved, limit, block_count);

    debug!(
        "[BALLOC] request {} blocks (reserved {}, limit {}): {:?}",
        block_count, reserved, limit, found
    );

    Ok(found)
}

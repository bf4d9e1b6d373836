//! 分配表写回和格式化

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, info};

use super::{checksum::compute_checksum, AllocationTable};
use crate::block::{FlashDev, FlashDevice};
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};

/// 将分配表写回设备地址 0
///
/// 顺序固定：重新计算校验和，擦除表记录覆盖的所有擦除单元，
/// 然后写入完整记录。
///
/// # 注意
///
/// 没有双缓冲或日志。擦除和写入之间任何一步失败都会让表处于
/// 不确定状态，且除重新格式化外无法恢复——这是磁上格式已知的
/// 脆弱点，调用方需要更强原子性时必须在外部解决。
pub fn save<D: FlashDevice>(dev: &mut FlashDev<D>, table: &AllocationTable) -> Result<()> {
    let bytes = serialize_table(table);

    // 表记录可能跨越多个擦除单元（擦除单元小于记录时）
    let unit_size = dev.erase_unit_size() as u64;
    let unit_count = (BLOCKFS_TABLE_SIZE as u64).div_ceil(unit_size);
    for unit in 0..unit_count {
        dev.erase_unit(unit)?;
    }

    dev.write_bytes(0, &bytes)?;

    debug!(
        "[TABLE] saved: {} used of {} blocks, {} files",
        table.used_blocks,
        table.total_blocks,
        table.valid_count()
    );

    Ok(())
}

/// 格式化设备并返回新表
///
/// 所有槽位清零标记为空闲，写入魔数和版本。原有内容全部丢弃。
///
/// # 错误
///
/// 设备容量不足两个块（表块 + 至少一个数据块）时返回 `InvalidInput`。
pub fn format<D: FlashDevice>(dev: &mut FlashDev<D>) -> Result<AllocationTable> {
    let total = dev.device_size() / BLOCKFS_BLOCK_SIZE as u64;
    if total < 2 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "device too small for filesystem",
        ));
    }
    let total_blocks = total.min(u32::MAX as u64) as u32;

    let table = AllocationTable::new_formatted(total_blocks);
    save(dev, &table)?;

    info!(
        "[TABLE] formatted: {} blocks of {} bytes",
        total_blocks, BLOCKFS_BLOCK_SIZE
    );

    Ok(table)
}

/// 序列化分配表记录，校验和按当前字段计算后填入
pub(super) fn serialize_table(table: &AllocationTable) -> [u8; BLOCKFS_TABLE_SIZE] {
    let mut buf = [0u8; BLOCKFS_TABLE_SIZE];

    LittleEndian::write_u32(&mut buf[0..4], table.magic);
    LittleEndian::write_u32(&mut buf[4..8], table.version);
    LittleEndian::write_u32(&mut buf[8..12], table.total_blocks);
    LittleEndian::write_u32(&mut buf[12..16], table.used_blocks);

    for (i, entry) in table.entries.iter().enumerate() {
        let offset = BLOCKFS_TABLE_HEADER_SIZE + i * BLOCKFS_ENTRY_SIZE;
        entry.write_to(&mut buf[offset..offset + BLOCKFS_ENTRY_SIZE]);
    }

    LittleEndian::write_u32(
        &mut buf[BLOCKFS_CHECKSUM_OFFSET..BLOCKFS_CHECKSUM_OFFSET + 4],
        compute_checksum(table),
    );

    buf
}

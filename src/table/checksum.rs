//! 分配表校验和计算
//!
//! 磁上格式规定的校验和是 32 位回绕求和，不是 CRC：
//! 对 magic、version、total_blocks、used_blocks 以及每个槽位的
//! size 和 start_block 做 `wrapping_add`。求和不区分槽位状态，
//! 墓碑槽位仍然以最后一次的值参与——因此删除时对这两个字段的
//! 任何清零/保留策略变更都必须同时作用于保存和验证两条路径。

use super::AllocationTable;

/// 计算分配表校验和
///
/// 校验和字段本身不参与计算。
pub fn compute_checksum(table: &AllocationTable) -> u32 {
    let mut sum = table
        .magic
        .wrapping_add(table.version)
        .wrapping_add(table.total_blocks)
        .wrapping_add(table.used_blocks);

    for entry in table.entries.iter() {
        sum = sum.wrapping_add(entry.size).wrapping_add(entry.start_block);
    }

    sum
}

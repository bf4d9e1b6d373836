//! 位图操作
//!
//! 空闲块分配器使用的 used/free 位图基础操作。
//! 位值 1 表示块已占用，0 表示块空闲。

use crate::error::{Error, ErrorKind, Result};

/// 测试位图中某一位是否被设置
///
/// 索引超出位图范围时返回 false。
pub fn test_bit(bitmap: &[u8], index: u32) -> bool {
    let byte_index = (index / 8) as usize;
    let bit_offset = (index % 8) as u8;

    if byte_index >= bitmap.len() {
        return false;
    }

    (bitmap[byte_index] & (1 << bit_offset)) != 0
}

/// 设置位图中的某一位
///
/// # 返回
///
/// 成功返回 ()，如果索引超出范围返回错误
pub fn set_bit(bitmap: &mut [u8], index: u32) -> Result<()> {
    let byte_index = (index / 8) as usize;
    let bit_offset = (index % 8) as u8;

    if byte_index >= bitmap.len() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "bitmap index out of range",
        ));
    }

    bitmap[byte_index] |= 1 << bit_offset;
    Ok(())
}

/// 批量设置位图中的连续位
///
/// # 返回
///
/// 成功返回 ()，如果任一索引超出范围返回错误
pub fn set_bits(bitmap: &mut [u8], start: u32, count: u32) -> Result<()> {
    for i in 0..count {
        set_bit(bitmap, start + i)?;
    }
    Ok(())
}

/// 统计位图中从 start 到 end（不包含）范围内被设置的位数
pub fn count_ones(bitmap: &[u8], start: u32, end: u32) -> u32 {
    let max_bits = (bitmap.len() * 8) as u32;
    let end = end.min(max_bits);
    let mut count = 0;

    for i in start..end {
        if test_bit(bitmap, i) {
            count += 1;
        }
    }

    count
}

/// 统计位图中从 start 到 end（不包含）范围内空闲的位数
pub fn count_zeros(bitmap: &[u8], start: u32, end: u32) -> u32 {
    let max_bits = (bitmap.len() * 8) as u32;
    let end = end.min(max_bits);
    (end - start) - count_ones(bitmap, start, end)
}

/// 查找位图中连续的 count 个空闲位（首次适应）
///
/// 在 [start, end) 范围内按升序扫描，返回第一个长度至少为
/// count 的连续空闲段的起始索引；没有找到返回 None。
///
/// count 为 0 时直接返回 start，不做任何扫描。
pub fn find_consecutive_zeros(bitmap: &[u8], start: u32, end: u32, count: u32) -> Option<u32> {
    if count == 0 {
        return Some(start);
    }

    let max_bits = (bitmap.len() * 8) as u32;
    let end = end.min(max_bits);

    if start >= end || count > end - start {
        return None;
    }

    let mut consecutive = 0;
    let mut candidate_start = start;

    for i in start..end {
        if !test_bit(bitmap, i) {
            if consecutive == 0 {
                candidate_start = i;
            }
            consecutive += 1;

            if consecutive == count {
                return Some(candidate_start);
            }
        } else {
            consecutive = 0;
        }
    }

    None
}

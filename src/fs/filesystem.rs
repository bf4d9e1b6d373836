//! 文件存储核心结构

use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, info, warn};

use super::{FileInfo, FsStats};
use crate::balloc;
use crate::block::{DeviceStats, FlashDev, FlashDevice};
use crate::consts::*;
use crate::error::{Error, ErrorKind, Result};
use crate::table::{self, validate_name, AllocationTable, EntryState};

/// 块分配文件存储
///
/// 持有设备包装器和进程内唯一的分配表副本。完全单线程同步：
/// 每个操作在调用线程上运行到完成，内部没有锁、重试或后台任务，
/// 并发访问必须由调用方在外部串行化。
///
/// # 示例
///
/// ```rust,ignore
/// use blockfs_core::{BlockFs, RamFlash};
///
/// let mut fs = BlockFs::new(RamFlash::new(1024 * 1024, 4096))?;
/// fs.mount_or_format()?;
///
/// fs.create("config", b"threshold=42")?;
/// let mut buf = [0u8; 64];
/// let n = fs.read("config", &mut buf)?;
/// assert_eq!(&buf[..n], b"threshold=42");
///
/// for file in fs.list()? {
///     // 按槽位序枚举
/// }
/// ```
pub struct BlockFs<D: FlashDevice> {
    dev: FlashDev<D>,
    table: Option<AllocationTable>,
}

impl<D: FlashDevice> BlockFs<D> {
    /// 包装设备，创建未挂载的存储
    ///
    /// 随后调用 [`mount`](Self::mount)、[`format`](Self::format) 或
    /// [`mount_or_format`](Self::mount_or_format)。
    pub fn new(device: D) -> Result<Self> {
        Ok(Self {
            dev: FlashDev::new(device)?,
            table: None,
        })
    }

    /// 挂载文件系统
    ///
    /// 从地址 0 读取并验证分配表。失败时存储保持未挂载，
    /// `InvalidFilesystem` 和 `ChecksumMismatch` 都可以通过
    /// [`format`](Self::format) 恢复。
    pub fn mount(&mut self) -> Result<()> {
        let table = table::load(&mut self.dev)?;
        info!(
            "[FS] mounted: {} blocks, {} used, {} files",
            table.total_blocks,
            table.used_blocks,
            table.valid_count()
        );
        self.table = Some(table);
        Ok(())
    }

    /// 格式化设备并挂载空文件系统
    ///
    /// 原有内容全部丢弃。
    pub fn format(&mut self) -> Result<()> {
        self.table = None;
        let table = table::format(&mut self.dev)?;
        self.table = Some(table);
        Ok(())
    }

    /// 挂载，无法识别时格式化
    ///
    /// 魔数或校验和验证失败会触发格式化；设备 I/O 错误原样上抛。
    pub fn mount_or_format(&mut self) -> Result<()> {
        match self.mount() {
            Ok(()) => Ok(()),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::InvalidFilesystem | ErrorKind::ChecksumMismatch
                ) =>
            {
                warn!("[FS] mount failed ({:?}), formatting", e.kind());
                self.format()
            }
            Err(e) => Err(e),
        }
    }

    /// 是否已挂载
    pub fn is_mounted(&self) -> bool {
        self.table.is_some()
    }

    /// 创建文件并写入全部数据
    ///
    /// 从调用方视角整个文件一次写成，没有部分写或追加状态。
    /// 分配之后、表更新之前的任何设备失败都会在表被修改前中止：
    /// 失败的后果限定为“新文件不存在”，已持久化的表不受影响。
    ///
    /// # 错误
    ///
    /// * `AlreadyExists` - 已有同名有效文件
    /// * `NoFreeSlot` - 表槽位用尽
    /// * `OutOfSpace` - 没有足够的连续空闲块
    pub fn create(&mut self, name: &str, data: &[u8]) -> Result<()> {
        validate_name(name)?;
        if data.len() as u64 > u32::MAX as u64 {
            return Err(Error::new(ErrorKind::InvalidInput, "file data too large"));
        }
        let size = data.len() as u32;

        let reserved = self.reserved_blocks();
        let (slot, block_count, start_block) = {
            let table = self.table.as_ref().ok_or_else(not_mounted)?;

            if table.find_valid(name).is_some() {
                return Err(Error::new(ErrorKind::AlreadyExists, "file already exists"));
            }
            let slot = table
                .free_slot()
                .ok_or(Error::new(ErrorKind::NoFreeSlot, "allocation table full"))?;

            let block_count = size.div_ceil(BLOCKFS_BLOCK_SIZE);
            let start_block = balloc::find_free_run(table, block_count, reserved)?.ok_or(
                Error::new(ErrorKind::OutOfSpace, "no contiguous free run"),
            )?;

            (slot, block_count, start_block)
        };

        if block_count > 0 {
            self.erase_run(start_block, block_count)?;
            self.dev
                .write_bytes(start_block as u64 * BLOCKFS_BLOCK_SIZE as u64, data)?;
        }

        // 数据全部落盘后才允许修改表
        let table = self.table.as_mut().ok_or_else(not_mounted)?;
        let entry = &mut table.entries[slot];
        entry.set_name(name)?;
        entry.size = size;
        entry.start_block = start_block;
        entry.block_count = block_count;
        entry.state = EntryState::Valid;
        table.used_blocks += block_count;

        table::save(&mut self.dev, table)?;

        debug!(
            "[FS] created '{}': {} bytes in {} blocks at {}",
            name, size, block_count, start_block
        );
        Ok(())
    }

    /// 读取文件内容
    ///
    /// 传输 `min(文件大小, buf.len())` 字节，返回实际传输的字节数。
    pub fn read(&mut self, name: &str, buf: &mut [u8]) -> Result<usize> {
        let (start_block, size) = {
            let table = self.table.as_ref().ok_or_else(not_mounted)?;
            let slot = table
                .find_valid(name)
                .ok_or(Error::new(ErrorKind::NotFound, "file not found"))?;
            let entry = &table.entries[slot];
            (entry.start_block, entry.size)
        };

        let count = (size as usize).min(buf.len());
        if count > 0 {
            self.dev.read_bytes(
                start_block as u64 * BLOCKFS_BLOCK_SIZE as u64,
                &mut buf[..count],
            )?;
        }
        Ok(count)
    }

    /// 删除文件
    ///
    /// 槽位打上墓碑（`size`/`start_block` 保留最后一次的值），
    /// 数据块不立即擦除，在下一次分配把槽位当作空闲时复用。
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let table = self.table.as_mut().ok_or_else(not_mounted)?;
        let slot = table
            .find_valid(name)
            .ok_or(Error::new(ErrorKind::NotFound, "file not found"))?;

        let block_count = table.entries[slot].block_count;
        table.entries[slot].state = EntryState::Deleted;
        table.used_blocks = table.used_blocks.saturating_sub(block_count);

        table::save(&mut self.dev, table)?;

        debug!("[FS] deleted '{}', reclaimed {} blocks", name, block_count);
        Ok(())
    }

    /// 重命名文件
    ///
    /// 只改表中的名字，不移动数据。
    ///
    /// # 错误
    ///
    /// * `NotFound` - 源文件不存在
    /// * `AlreadyExists` - 目标名已被有效文件占用
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        validate_name(new_name)?;

        let table = self.table.as_mut().ok_or_else(not_mounted)?;
        let slot = table
            .find_valid(old_name)
            .ok_or(Error::new(ErrorKind::NotFound, "file not found"))?;
        if table.find_valid(new_name).is_some() {
            return Err(Error::new(ErrorKind::AlreadyExists, "target name in use"));
        }

        table.entries[slot].set_name(new_name)?;
        table::save(&mut self.dev, table)?;

        debug!("[FS] renamed '{}' -> '{}'", old_name, new_name);
        Ok(())
    }

    /// 文件是否存在
    pub fn exists(&self, name: &str) -> Result<bool> {
        let table = self.table.as_ref().ok_or_else(not_mounted)?;
        Ok(table.find_valid(name).is_some())
    }

    /// 文件大小（字节）
    pub fn size(&self, name: &str) -> Result<u32> {
        let table = self.table.as_ref().ok_or_else(not_mounted)?;
        let slot = table
            .find_valid(name)
            .ok_or(Error::new(ErrorKind::NotFound, "file not found"))?;
        Ok(table.entries[slot].size)
    }

    /// 按槽位序列出所有有效文件
    pub fn list(&self) -> Result<Vec<FileInfo>> {
        let table = self.table.as_ref().ok_or_else(not_mounted)?;
        let mut files = Vec::new();
        for entry in table.entries.iter() {
            if entry.state != EntryState::Valid {
                continue;
            }
            files.push(FileInfo {
                name: String::from_utf8_lossy(entry.name_bytes()).into_owned(),
                size: entry.size,
                start_block: entry.start_block,
                block_count: entry.block_count,
            });
        }
        Ok(files)
    }

    /// 存储统计信息
    pub fn stats(&self) -> Result<FsStats> {
        let table = self.table.as_ref().ok_or_else(not_mounted)?;
        let block_size = BLOCKFS_BLOCK_SIZE;
        let free_blocks = table.total_blocks.saturating_sub(table.used_blocks);
        Ok(FsStats {
            block_size,
            total_blocks: table.total_blocks,
            used_blocks: table.used_blocks,
            free_blocks,
            trackable_blocks: table.total_blocks.min(BLOCKFS_MAX_TRACKED_BLOCKS),
            total_bytes: table.total_blocks as u64 * block_size as u64,
            used_bytes: table.used_blocks as u64 * block_size as u64,
            available_bytes: free_blocks as u64 * block_size as u64,
            file_count: table.valid_count() as u32,
            max_files: BLOCKFS_MAX_FILES as u32,
        })
    }

    /// 设备操作统计
    pub fn device_stats(&self) -> DeviceStats {
        self.dev.stats()
    }

    /// 卸载并取回设备
    pub fn into_device(self) -> D {
        self.dev.into_inner()
    }

    /// 表块所在擦除单元覆盖的块数
    ///
    /// 数据分配从这个边界之后开始，保证文件擦除永远不会波及表。
    /// 擦除单元不大于块时恰好是 1，即只保留块 0。
    fn reserved_blocks(&self) -> u32 {
        let unit = self.dev.erase_unit_size() as u64;
        let covered = unit.div_ceil(BLOCKFS_BLOCK_SIZE as u64).max(1);
        covered.min(u32::MAX as u64) as u32
    }

    /// 擦除块段覆盖的每个擦除单元，每个单元恰好一次
    ///
    /// 多个块可能共享一个擦除单元；重复擦除会毁掉同一单元内
    /// 本次调用刚写入的数据，所以按调用跟踪已擦除的单元。
    fn erase_run(&mut self, start_block: u32, block_count: u32) -> Result<()> {
        let block_size = BLOCKFS_BLOCK_SIZE as u64;
        let mut erased: Vec<u64> = Vec::new();

        for block in start_block..start_block + block_count {
            let first = self.dev.erase_unit_of(block as u64 * block_size);
            let last = self.dev.erase_unit_of(block as u64 * block_size + block_size - 1);
            for unit in first..=last {
                if !erased.contains(&unit) {
                    self.dev.erase_unit(unit)?;
                    erased.push(unit);
                }
            }
        }
        Ok(())
    }
}

fn not_mounted() -> Error {
    Error::new(ErrorKind::NotMounted, "filesystem not mounted")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::RamFlash;
    use alloc::vec;

    /// 1 MiB 设备，4096 字节擦除单元
    fn mounted_fs() -> BlockFs<RamFlash> {
        let mut fs = BlockFs::new(RamFlash::new(1024 * 1024, 4096)).unwrap();
        fs.format().unwrap();
        fs
    }

    fn pattern(len: usize, seed: u8) -> Vec<u8> {
        (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
    }

    #[test]
    fn test_not_mounted() {
        let mut fs = BlockFs::new(RamFlash::new(1024 * 1024, 4096)).unwrap();
        assert!(!fs.is_mounted());

        let mut buf = [0u8; 8];
        assert_eq!(fs.create("a", b"x").unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.read("a", &mut buf).unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.delete("a").unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.exists("a").unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.size("a").unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.list().unwrap_err().kind(), ErrorKind::NotMounted);
        assert_eq!(fs.stats().unwrap_err().kind(), ErrorKind::NotMounted);
    }

    #[test]
    fn test_round_trip() {
        let mut fs = mounted_fs();
        let data = pattern(5000, 7);
        fs.create("blob", &data).unwrap();

        // 足够大的缓冲区拿到全部内容
        let mut buf = vec![0u8; 8192];
        let n = fs.read("blob", &mut buf).unwrap();
        assert_eq!(n, 5000);
        assert_eq!(&buf[..n], &data[..]);

        // 小缓冲区拿到前缀
        let mut small = vec![0u8; 100];
        let n = fs.read("blob", &mut small).unwrap();
        assert_eq!(n, 100);
        assert_eq!(&small[..], &data[..100]);
    }

    #[test]
    fn test_empty_file() {
        let mut fs = mounted_fs();
        fs.create("empty", &[]).unwrap();

        assert!(fs.exists("empty").unwrap());
        assert_eq!(fs.size("empty").unwrap(), 0);
        // 零长度文件不占块
        assert_eq!(fs.stats().unwrap().used_blocks, 1);

        let mut buf = [0u8; 8];
        assert_eq!(fs.read("empty", &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_create_duplicate() {
        let mut fs = mounted_fs();
        fs.create("a", b"one").unwrap();
        let err = fs.create("a", b"two").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        // 原内容不受影响
        let mut buf = [0u8; 8];
        let n = fs.read("a", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"one");
    }

    #[test]
    fn test_invalid_names() {
        let mut fs = mounted_fs();
        assert_eq!(fs.create("", b"x").unwrap_err().kind(), ErrorKind::InvalidInput);
        let long = "n".repeat(BLOCKFS_MAX_NAME_LEN + 1);
        assert_eq!(fs.create(&long, b"x").unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_no_free_slot() {
        let mut fs = mounted_fs();
        for i in 0..BLOCKFS_MAX_FILES {
            let name = alloc::format!("f{}", i);
            fs.create(&name, b"x").unwrap();
        }
        // 第 N+1 个创建失败
        let err = fs.create("overflow", b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoFreeSlot);
    }

    #[test]
    fn test_out_of_space() {
        let mut fs = mounted_fs();
        // 256 块中 255 块可用；请求 256 块必然失败
        let err = fs.create("huge", &vec![0u8; 256 * 4096]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfSpace);

        // 刚好填满数据区则成功
        fs.create("fit", &vec![0u8; 255 * 4096]).unwrap();
        assert_eq!(fs.stats().unwrap().free_blocks, 0);
    }

    #[test]
    fn test_delete_and_queries() {
        let mut fs = mounted_fs();
        fs.create("doomed", b"bytes").unwrap();
        assert!(fs.exists("doomed").unwrap());

        fs.delete("doomed").unwrap();
        assert!(!fs.exists("doomed").unwrap());
        assert_eq!(fs.size("doomed").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.delete("doomed").unwrap_err().kind(), ErrorKind::NotFound);

        let mut buf = [0u8; 8];
        assert_eq!(fs.read("doomed", &mut buf).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_reuse_after_delete() {
        let mut fs = mounted_fs();
        fs.create("a", &pattern(6000, 1)).unwrap();
        fs.delete("a").unwrap();

        let fresh = pattern(6000, 99);
        fs.create("a", &fresh).unwrap();

        // 读到的是新内容，不是删除前的旧数据
        let mut buf = vec![0u8; 6000];
        let n = fs.read("a", &mut buf).unwrap();
        assert_eq!(n, 6000);
        assert_eq!(&buf[..], &fresh[..]);
    }

    #[test]
    fn test_no_overlap_after_churn() {
        let mut fs = mounted_fs();
        fs.create("a", &pattern(9000, 1)).unwrap();
        fs.create("b", &pattern(5000, 2)).unwrap();
        fs.create("c", &pattern(100, 3)).unwrap();
        fs.delete("b").unwrap();
        fs.create("d", &pattern(4097, 4)).unwrap();
        fs.create("e", &pattern(20000, 5)).unwrap();

        let files = fs.list().unwrap();
        for (i, x) in files.iter().enumerate() {
            for y in files.iter().skip(i + 1) {
                let x_end = x.start_block + x.block_count;
                let y_end = y.start_block + y.block_count;
                assert!(
                    x_end <= y.start_block || y_end <= x.start_block,
                    "{} and {} overlap",
                    x.name,
                    y.name
                );
            }
        }
    }

    #[test]
    fn test_list_in_slot_order() {
        let mut fs = mounted_fs();
        fs.create("first", b"1").unwrap();
        fs.create("second", b"2").unwrap();
        fs.create("third", b"3").unwrap();
        // 删除中间的文件后创建新文件，复用槽位 1
        fs.delete("second").unwrap();
        fs.create("fourth", b"4").unwrap();

        let names: Vec<_> = fs.list().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["first", "fourth", "third"]);
    }

    #[test]
    fn test_rename() {
        let mut fs = mounted_fs();
        fs.create("old", b"payload").unwrap();
        fs.create("taken", b"x").unwrap();

        assert_eq!(fs.rename("missing", "new").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(fs.rename("old", "taken").unwrap_err().kind(), ErrorKind::AlreadyExists);

        fs.rename("old", "new").unwrap();
        assert!(!fs.exists("old").unwrap());
        let mut buf = [0u8; 16];
        let n = fs.read("new", &mut buf).unwrap();
        assert_eq!(&buf[..n], b"payload");
    }

    #[test]
    fn test_stats() {
        let mut fs = mounted_fs();
        fs.create("a", &pattern(5000, 1)).unwrap();

        let stats = fs.stats().unwrap();
        assert_eq!(stats.block_size, 4096);
        assert_eq!(stats.total_blocks, 256);
        assert_eq!(stats.used_blocks, 3);
        assert_eq!(stats.free_blocks, 253);
        assert_eq!(stats.trackable_blocks, 256);
        assert_eq!(stats.total_bytes, 1024 * 1024);
        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.max_files, BLOCKFS_MAX_FILES as u32);
    }

    #[test]
    fn test_create_abort_leaves_table_untouched() {
        let mut fs = mounted_fs();
        fs.create("keep", b"keep me").unwrap();

        // 数据写入阶段失败：擦除成功后第一次写失败
        let mut ram = fs.into_device();
        ram.inject_write_faults(1);
        let mut fs = BlockFs::new(ram).unwrap();
        fs.mount().unwrap();

        let err = fs.create("lost", &pattern(5000, 8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeviceWriteFailed);

        // 内存中的表未被修改
        assert!(!fs.exists("lost").unwrap());
        assert_eq!(fs.stats().unwrap().used_blocks, 2);

        // 持久化的表同样未被修改
        let mut fs = BlockFs::new(fs.into_device()).unwrap();
        fs.mount().unwrap();
        assert!(fs.exists("keep").unwrap());
        assert!(!fs.exists("lost").unwrap());
        assert_eq!(fs.stats().unwrap().used_blocks, 2);
    }

    #[test]
    fn test_persistence_across_remount() {
        let mut fs = mounted_fs();
        let data = pattern(12345, 6);
        fs.create("cfg", &data).unwrap();
        fs.create("gone", b"tombstone").unwrap();
        fs.delete("gone").unwrap();

        let mut fs = BlockFs::new(fs.into_device()).unwrap();
        fs.mount().unwrap();

        assert!(fs.exists("cfg").unwrap());
        assert!(!fs.exists("gone").unwrap());
        let mut buf = vec![0u8; data.len()];
        let n = fs.read("cfg", &mut buf).unwrap();
        assert_eq!(n, data.len());
        assert_eq!(&buf[..], &data[..]);
    }

    #[test]
    fn test_mount_or_format() {
        // 空设备：挂载失败，自动格式化
        let mut fs = BlockFs::new(RamFlash::new(1024 * 1024, 4096)).unwrap();
        fs.mount_or_format().unwrap();
        assert!(fs.is_mounted());
        fs.create("survivor", b"x").unwrap();

        // 已格式化设备：直接挂载，内容保留
        let mut fs = BlockFs::new(fs.into_device()).unwrap();
        fs.mount_or_format().unwrap();
        assert!(fs.exists("survivor").unwrap());

        // 损坏的表：校验和失败，重新格式化
        let mut ram = fs.into_device();
        ram.raw_mut()[BLOCKFS_CHECKSUM_OFFSET] ^= 0xFF;
        let mut fs = BlockFs::new(ram).unwrap();
        fs.mount_or_format().unwrap();
        assert!(!fs.exists("survivor").unwrap());
    }

    #[test]
    fn test_large_erase_units() {
        // 64 KiB 擦除单元：表的单元覆盖块 0..16，数据从块 16 开始
        let mut fs = BlockFs::new(RamFlash::new(1024 * 1024, 64 * 1024)).unwrap();
        fs.format().unwrap();

        // 跨两个擦除单元的文件（17 块），每个单元只擦一次
        let before = fs.device_stats().erase_count;
        let data = pattern(17 * 4096, 9);
        fs.create("wide", &data).unwrap();
        // 2 次数据单元擦除 + 1 次表单元擦除（save）
        assert_eq!(fs.device_stats().erase_count, before + 3);

        let files = fs.list().unwrap();
        assert_eq!(files[0].start_block, 16);

        let mut buf = vec![0u8; data.len()];
        let n = fs.read("wide", &mut buf).unwrap();
        assert_eq!(n, data.len());
        assert_eq!(&buf[..], &data[..]);

        // 重新挂载后仍然可读：表擦除没有波及数据单元
        let mut fs = BlockFs::new(fs.into_device()).unwrap();
        fs.mount().unwrap();
        let n = fs.read("wide", &mut buf).unwrap();
        assert_eq!(&buf[..n], &data[..]);
    }

    /// 1 MiB 设备、4096 字节块上的完整生命周期，
    /// 首次适应策略的每一次选择都被逐步断言。
    #[test]
    fn test_end_to_end_scenario() {
        let mut fs = mounted_fs();
        let stats = fs.stats().unwrap();
        assert_eq!(stats.total_blocks, 256);
        assert_eq!(stats.used_blocks, 1);

        // create("x", 5000) -> 2 块，起始块 1
        fs.create("x", &pattern(5000, 1)).unwrap();
        let x = fs.list().unwrap()[0].clone();
        assert_eq!(x.block_count, 2);
        assert_eq!(x.start_block, 1);
        assert_eq!(fs.stats().unwrap().used_blocks, 3);

        // create("y", 100) -> 1 块，起始块 3
        fs.create("y", &pattern(100, 2)).unwrap();
        let y = fs.list().unwrap()[1].clone();
        assert_eq!(y.block_count, 1);
        assert_eq!(y.start_block, 3);
        assert_eq!(fs.stats().unwrap().used_blocks, 4);

        // delete("x") -> 块 1..3 变为可回收
        fs.delete("x").unwrap();
        assert_eq!(fs.stats().unwrap().used_blocks, 2);
        assert!(!fs.exists("x").unwrap());

        // create("z", 8200) -> 3 块。首次适应：块 1 处的洞只有
        // 2 块放不下，y 占着块 3，所以选中块 4 的新鲜段
        fs.create("z", &pattern(8200, 3)).unwrap();
        let z = fs
            .list()
            .unwrap()
            .into_iter()
            .find(|f| f.name == "z")
            .unwrap();
        assert_eq!(z.block_count, 3);
        assert_eq!(z.start_block, 4);
        assert_eq!(fs.stats().unwrap().used_blocks, 5);
    }
}

//! 文件存储高级 API
//!
//! 这个模块提供完整的文件存储操作接口：挂载/格式化、
//! 创建/读取/删除/重命名，以及只读查询。

mod filesystem;
mod metadata;

pub use filesystem::BlockFs;
pub use metadata::{FileInfo, FsStats};

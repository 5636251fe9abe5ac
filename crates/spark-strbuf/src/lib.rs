#![cfg_attr(not(feature = "std"), no_std)]

//! `spark-strbuf` 提供永不越界、始终以 NUL 结尾的有界字符串缓冲。
//!
//! # 模块定位（Why）
//! - 为协议编解码、日志拼装、嵌入式报文等场景提供 `strcpy`/`strcat` 式的便捷写法，
//!   同时杜绝经典的缓冲区溢出：任何写入都被截断在声明容量之内。
//! - 固定容量缓冲可驻留在栈或静态区；堆上缓冲支持 `realloc` 风格的扩缩容。
//!
//! # 设计概要（How）
//! - `buffer` 模块实现 [`StrBuf`]，一次性定义全部读写操作，对存储后端保持泛型；
//! - `storage` 模块以封闭 Trait [`BufferStorage`] 描述后端能力：
//!   `[u8; SIZE]`（固定）、`&mut [u8]`（借用）与 `Vec<u8>`（堆，需 `alloc`）；
//! - `heap` 模块承担分配适配器职责：分配、复制与扩缩容，失败时原缓冲保持不变；
//! - `raw` 模块暴露与缓冲类型无关的底层原语（有界拷贝、终止符扫描、原地反转）。
//!
//! # 契约说明（What）
//! - **终止符不变量**：任一操作结束后 `len() <= capacity()` 且存储中 `len()` 处为 `0`；
//! - **截断优先**：容量不足时静默截断，不返回错误；唯一的硬失败来自堆分配；
//! - **容量口径**：[`capacity`](StrBuf::capacity) 为可用字节数，存储总长为 `capacity + 1`。
//!
//! # 风险提示（Trade-offs）
//! - 缓冲按原始字节处理，不感知 UTF-8；截断可能切开多字节字符，
//!   需要文本视图时请使用 [`StrBuf::to_str`] 自行处理错误。
//! - 类型本身不做同步，跨线程共享需调用方加锁。

#[cfg(feature = "alloc")]
extern crate alloc;

mod buffer;
mod error;
mod fixed;
mod format;
#[cfg(feature = "alloc")]
pub mod heap;
mod macros;
pub mod raw;
mod storage;

pub use buffer::StrBuf;
#[cfg(feature = "alloc")]
pub use error::{AllocError, ResizeError};
pub use error::{CapacityError, FormatError};
pub use fixed::{FixedStrBuf, SliceStrBuf};
#[cfg(feature = "alloc")]
pub use heap::HeapStrBuf;
pub use storage::BufferStorage;

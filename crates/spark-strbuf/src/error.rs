//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 缓冲操作本身从不报错：容量不足一律截断。真正需要告知调用方的只有三类事件：
//!   构造时初始内容放不下、堆分配失败、格式化实现自身报错。
//!
//! ## 设计要求（What）
//! - 所有错误类型派生 `thiserror::Error`；`thiserror` 2.x 在 `no_std` 下基于 `core::error::Error`；
//! - 分配失败必须把原缓冲交还调用方（见 [`ResizeError::into_original`]），不得泄漏或破坏原对象。

use thiserror::Error;

#[cfg(feature = "alloc")]
use alloc::collections::TryReserveError;

#[cfg(feature = "alloc")]
use crate::heap::HeapStrBuf;

/// 构造缓冲时的容量错误。
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum CapacityError {
    /// 初始内容超过声明容量。
    ///
    /// - **意图 (Why)**：声明时的溢出属于调用方错误，应当显式暴露而不是悄悄截断；
    /// - **契约 (What)**：`len` 为初始内容字节数，`capacity` 为缓冲可用字节数。
    #[error("initial content of {len} bytes exceeds declared capacity {capacity}")]
    Overflow { len: usize, capacity: usize },

    /// 存储长度为 0，连终止符都放不下。
    #[error("storage has no slot for the terminating NUL byte")]
    MissingTerminatorSlot,
}

/// 堆分配失败。
///
/// # 教案式说明
/// - **意图 (Why)**：对应 `malloc`/`realloc` 返回空指针的全部情形，但保留失败原因，方便排障；
/// - **契约 (What)**：出现该错误时，任何输入缓冲均保持原状；
/// - **设计权衡 (Trade-offs)**：容量为 0 的分配被定义为失败而非“合法的空缓冲”，
///   与 `resize(.., 0)` 释放缓冲的语义保持对称。
#[cfg(feature = "alloc")]
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
    /// 请求容量为 0。
    #[error("zero-capacity bounded buffer requested")]
    ZeroCapacity,

    /// `capacity + 1`（含终止符）溢出 `usize`。
    #[error("capacity {capacity} leaves no room for the terminator in usize arithmetic")]
    CapacityOverflow { capacity: usize },

    /// 底层分配器无法满足请求。
    #[error("allocator could not provide storage for capacity {capacity}")]
    Exhausted {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },
}

/// `heap::resize` 的失败结果，携带未被改动的原缓冲。
///
/// - **意图 (Why)**：`realloc` 失败时原对象必须保持有效；在所有权模型下，
///   这意味着原缓冲要随错误一起交还调用方，而不是随错误一起被丢弃。
/// - **契约 (What)**：`into_original` 返回的缓冲与调用前逐字节一致；
///   若调用时传入的是 `None`，则返回 `None`。
#[cfg(feature = "alloc")]
#[derive(Debug, Error)]
#[error("failed to resize bounded buffer to capacity {requested}")]
pub struct ResizeError {
    requested: usize,
    #[source]
    source: AllocError,
    original: Option<HeapStrBuf>,
}

#[cfg(feature = "alloc")]
impl ResizeError {
    pub(crate) fn new(requested: usize, source: AllocError, original: Option<HeapStrBuf>) -> Self {
        Self {
            requested,
            source,
            original,
        }
    }

    /// 请求的新容量。
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// 底层分配错误。
    pub fn alloc_error(&self) -> &AllocError {
        &self.source
    }

    /// 取回原缓冲。
    pub fn into_original(self) -> Option<HeapStrBuf> {
        self.original
    }
}

/// 格式化实现（某个 `Display`/`Debug`）返回了 `fmt::Error`。
///
/// 出现该错误时缓冲长度已经按终止符重新计算，内容为报错前已写入的前缀。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Error)]
#[error("formatter reported an error while writing into a bounded buffer")]
pub struct FormatError;

impl From<core::fmt::Error> for FormatError {
    fn from(_: core::fmt::Error) -> Self {
        FormatError
    }
}

//! 堆上有界缓冲及其分配适配器。
//!
//! # 设计背景（Why）
//! - 固定容量缓冲在编译期定长；协议字段、配置值等长度只有运行期才知道，需要堆上缓冲，
//!   并且要能像 `realloc` 一样扩缩容。
//! - C 中常见的做法是把长度/容量头部与字节数组放在同一块分配里；这里改为 `StrBuf<Vec<u8>>`，
//!   所有权与扩缩容都由容器自身表达，无需指针运算。
//!
//! # 逻辑解析（How）
//! - 所有分配走 `Vec::try_reserve_exact`，分配失败以 [`AllocError`] 返回而不是中止进程；
//! - [`resize`] 按值接收旧缓冲：成功时返回新缓冲；失败时把原缓冲放进 [`ResizeError`] 交还调用方。
//!
//! # 契约说明（What）
//! - 容量为 0 的分配一律视为失败（[`AllocError::ZeroCapacity`]），包括复制空内容；
//! - `resize(None, n)` 等价于 [`allocate_clear`]，`resize(Some(buf), 0)` 释放缓冲并返回 `Ok(None)`；
//! - 缩容时保留前 `min(len, new_capacity)` 个字节并重新补终止符。
//!
//! # 生命周期
//! `未分配 -> allocate*/duplicate* -> 存活 -> resize(n > 0) -> 存活 -> resize(0) | drop -> 释放`。
//! 旧缓冲在 `resize` 中被移动，编译器保证调用方无法继续使用已失效的实例。

use alloc::vec::Vec;

use crate::{AllocError, ResizeError, StrBuf, raw, storage::BufferStorage};

/// 堆上有界缓冲。
pub type HeapStrBuf = StrBuf<Vec<u8>>;

/// 申请 `capacity + 1` 字节、全部清零的存储。
fn reserve_storage(capacity: usize) -> Result<Vec<u8>, AllocError> {
    if capacity == 0 {
        return Err(AllocError::ZeroCapacity);
    }
    let size = capacity
        .checked_add(1)
        .ok_or(AllocError::CapacityOverflow { capacity })?;
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(size)
        .map_err(|source| AllocError::Exhausted { capacity, source })?;
    storage.resize(size, 0);
    Ok(storage)
}

fn log_failure(capacity: usize, err: &AllocError) {
    tracing::warn!(capacity, error = %err, "bounded buffer allocation failed");
}

impl StrBuf<Vec<u8>> {
    /// 分配容量为 `capacity` 的空缓冲。
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let storage = reserve_storage(capacity).inspect_err(|err| log_failure(capacity, err))?;
        tracing::debug!(capacity, "bounded buffer allocated");
        Ok(Self::from_parts(storage, 0))
    }

    /// 原地扩缩容。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：`realloc` 的可失败版本；失败时缓冲保持原样，调用方可继续使用；
    /// - **执行逻辑 (How)**：扩容先 `try_reserve_exact` 再补零；缩容截断存储并收缩分配，
    ///   随后把长度钳制到新容量并补终止符；
    /// - **契约 (What)**：`new_capacity == 0` 返回 [`AllocError::ZeroCapacity`]，释放请用 [`resize`] 或直接 `drop`。
    pub fn try_resize(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity == 0 {
            return Err(AllocError::ZeroCapacity);
        }
        let size = new_capacity
            .checked_add(1)
            .ok_or(AllocError::CapacityOverflow {
                capacity: new_capacity,
            })?;
        let old_capacity = self.capacity();
        let current = self.storage.len();
        if size > current {
            self.storage
                .try_reserve_exact(size - current)
                .map_err(|source| AllocError::Exhausted {
                    capacity: new_capacity,
                    source,
                })?;
            self.storage.resize(size, 0);
        } else if size < current {
            self.storage.truncate(size);
            self.storage.shrink_to_fit();
        }
        if self.len > new_capacity {
            self.len = new_capacity;
        }
        let len = self.len;
        self.storage[len] = 0;
        tracing::debug!(old_capacity, new_capacity, len, "bounded buffer resized");
        Ok(())
    }
}

/// 分配容量为 `capacity` 的空缓冲；`capacity == 0` 视为失败。
pub fn allocate_clear(capacity: usize) -> Result<HeapStrBuf, AllocError> {
    HeapStrBuf::try_with_capacity(capacity)
}

/// 复制一段原始字节（在首个 `0` 处结束），容量恰好等于内容长度。
pub fn duplicate_bytes(source: &[u8]) -> Result<HeapStrBuf, AllocError> {
    let mut buf = HeapStrBuf::try_with_capacity(raw::terminated_len(source))?;
    buf.copy_from_bytes(source);
    Ok(buf)
}

/// 完整复制：新缓冲的容量等于原缓冲的容量，保留富余空间。
pub fn duplicate_full<S: BufferStorage>(original: &StrBuf<S>) -> Result<HeapStrBuf, AllocError> {
    let mut buf = HeapStrBuf::try_with_capacity(original.capacity())?;
    buf.copy_from(original);
    Ok(buf)
}

/// 紧凑复制：新缓冲的容量等于原缓冲的当前长度，没有富余空间。
pub fn duplicate_used<S: BufferStorage>(original: &StrBuf<S>) -> Result<HeapStrBuf, AllocError> {
    let mut buf = HeapStrBuf::try_with_capacity(original.len())?;
    buf.copy_from(original);
    Ok(buf)
}

/// `realloc` 语义的扩缩容。
///
/// # 教案式说明
/// - **契约 (What)**：
///   - `buffer == None`：等价于 [`allocate_clear`]`(new_capacity)`；
///   - `new_capacity == 0` 且 `buffer` 非空：释放缓冲，返回 `Ok(None)`；
///   - 其余情况：扩缩容并返回 `Ok(Some(buf))`，保留前 `min(len, new_capacity)` 个字节；
///   - 失败时返回 [`ResizeError`]，[`ResizeError::into_original`] 交还未改动的原缓冲。
/// - **设计权衡 (Trade-offs)**：原缓冲按值传入，成功后旧实例不可再用，这正是 `realloc`
///   “旧指针失效”规则的所有权表达。
pub fn resize(
    buffer: Option<HeapStrBuf>,
    new_capacity: usize,
) -> Result<Option<HeapStrBuf>, ResizeError> {
    match buffer {
        None => allocate_clear(new_capacity)
            .map(Some)
            .map_err(|err| ResizeError::new(new_capacity, err, None)),
        Some(buf) if new_capacity == 0 => {
            tracing::debug!(capacity = buf.capacity(), "bounded buffer released by resize");
            drop(buf);
            Ok(None)
        }
        Some(mut buf) => match buf.try_resize(new_capacity) {
            Ok(()) => Ok(Some(buf)),
            Err(err) => {
                log_failure(new_capacity, &err);
                Err(ResizeError::new(new_capacity, err, Some(buf)))
            }
        },
    }
}

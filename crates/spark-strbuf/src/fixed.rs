//! 固定容量与借用存储上的缓冲构造。
//!
//! # 容量口径（What）
//! - [`FixedStrBuf<SIZE>`] 的 `SIZE` 是**存储字节数**（与 `snprintf` 的 `size` 参数同一口径），
//!   可用容量为 `SIZE - 1`，最后一个字节始终留给终止符；
//! - [`strbuf!`](crate::strbuf) 宏接受的是可用容量，并在展开时完成 `+ 1` 换算，
//!   日常声明优先使用宏。

use crate::{CapacityError, StrBuf};

/// 栈上/静态区的固定容量缓冲，`SIZE` 含终止符。
pub type FixedStrBuf<const SIZE: usize> = StrBuf<[u8; SIZE]>;

/// 建立在调用方切片之上的缓冲，切片最后一个字节留给终止符。
pub type SliceStrBuf<'a> = StrBuf<&'a mut [u8]>;

impl<const SIZE: usize> StrBuf<[u8; SIZE]> {
    /// 空缓冲。`SIZE == 0` 无法容纳终止符，在编译期报错。
    pub const fn new() -> Self {
        const { assert!(SIZE > 0, "fixed buffer storage must hold the terminator") };
        Self::from_parts([0; SIZE], 0)
    }

    /// 以 `init` 为初始内容构造缓冲。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：初始内容超出声明容量属于调用方错误，应在构建期暴露，而不是截断；
    /// - **执行逻辑 (How)**：在 `const` 上下文（[`strbuf!`](crate::strbuf) 宏即如此展开）中，
    ///   溢出会让常量求值失败，从而使编译失败；
    /// - **契约 (What)**：长度等于 `init.len()`，内容逐字节拷贝。
    ///
    /// # Panics
    /// 在运行期调用且 `init.len() > SIZE - 1` 时 panic；运行期构造请使用
    /// [`try_from_bytes`](Self::try_from_bytes)。
    pub const fn with_content(init: &[u8]) -> Self {
        const { assert!(SIZE > 0, "fixed buffer storage must hold the terminator") };
        assert!(
            init.len() < SIZE,
            "initial content exceeds the declared capacity"
        );
        let mut storage = [0; SIZE];
        let mut i = 0;
        while i < init.len() {
            storage[i] = init[i];
            i += 1;
        }
        Self::from_parts(storage, init.len())
    }

    /// 运行期构造：初始内容超出容量时返回 [`CapacityError::Overflow`]。
    pub fn try_from_bytes(init: &[u8]) -> Result<Self, CapacityError> {
        let Some(capacity) = SIZE.checked_sub(1) else {
            return Err(CapacityError::MissingTerminatorSlot);
        };
        if init.len() > capacity {
            return Err(CapacityError::Overflow {
                len: init.len(),
                capacity,
            });
        }
        let mut storage = [0; SIZE];
        storage[..init.len()].copy_from_slice(init);
        Ok(Self::from_parts(storage, init.len()))
    }
}

impl<const SIZE: usize> Default for StrBuf<[u8; SIZE]> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> StrBuf<&'a mut [u8]> {
    /// 在调用方提供的切片上建立空缓冲，容量为 `storage.len() - 1`。
    pub fn from_slice(storage: &'a mut [u8]) -> Result<Self, CapacityError> {
        let Some(first) = storage.first_mut() else {
            return Err(CapacityError::MissingTerminatorSlot);
        };
        *first = 0;
        Ok(Self::from_parts(storage, 0))
    }
}

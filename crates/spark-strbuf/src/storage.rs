//! 有界缓冲的存储后端契约。
//!
//! # 设计背景（Why）
//! - 固定数组、调用方借出的切片与堆上 `Vec` 在读写语义上完全一致，
//!   差别只在“谁拥有这块内存、能否改变长度”。
//! - 将差异收敛到 [`BufferStorage`]，所有缓冲操作只需在 [`StrBuf`](crate::StrBuf) 上实现一次。
//!
//! # 契约说明（What）
//! - `bytes()`/`bytes_mut()` 必须返回同一块内存，长度即 `capacity + 1`；
//! - 通过 `bytes_mut()` 访问期间长度不得改变，只有堆后端的 `try_resize` 会改变长度；
//! - Trait 通过私有 `Sealed` 封闭，外部无法新增实现，从而保证长度稳定性不被破坏。

mod sealed {
    pub trait Sealed {}

    impl<const SIZE: usize> Sealed for [u8; SIZE] {}
    impl Sealed for &mut [u8] {}
    #[cfg(feature = "alloc")]
    impl Sealed for alloc::vec::Vec<u8> {}
}

/// 有界缓冲可用的存储后端。
///
/// 目前的实现者：`[u8; SIZE]`、`&mut [u8]`，以及启用 `alloc` 后的 `Vec<u8>`。
pub trait BufferStorage: sealed::Sealed {
    /// 完整存储（含终止符槽位）。
    fn bytes(&self) -> &[u8];

    /// 完整存储的可变视图。
    fn bytes_mut(&mut self) -> &mut [u8];
}

impl<const SIZE: usize> BufferStorage for [u8; SIZE] {
    #[inline]
    fn bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl BufferStorage for &mut [u8] {
    #[inline]
    fn bytes(&self) -> &[u8] {
        self
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

#[cfg(feature = "alloc")]
impl BufferStorage for alloc::vec::Vec<u8> {
    #[inline]
    fn bytes(&self) -> &[u8] {
        self.as_slice()
    }

    #[inline]
    fn bytes_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

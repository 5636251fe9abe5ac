use core::fmt;

use crate::{raw, storage::BufferStorage};

/// `StrBuf` 是有界字符串缓冲：一块 `capacity + 1` 字节的存储，加上缓存的当前长度。
///
/// # 设计背景（Why）
/// - C 风格的 `strcpy`/`strcat` 在目标空间不足时会越界写；这里所有写入都被约束在声明容量之内，
///   溢出时静默截断，写入方无需预先计算剩余空间。
/// - 长度被显式缓存，追加、截断等操作无需反复扫描终止符。
///
/// # 逻辑解析（How）
/// - 全部操作只依赖 [`BufferStorage`] 暴露的字节视图，因此固定数组、借用切片与堆缓冲共享同一实现；
/// - 变更操作返回 `&mut Self`，便于链式调用：`buf.clear().append_bytes(b"id=").push_byte(b'7')`。
///
/// # 契约说明（What）
/// - **终止符不变量**：任一操作结束后 `len() <= capacity()`，且 `as_bytes_with_nul()` 的最后一个字节为 `0`；
/// - **截断优先**：不会写出 `[0, capacity]` 区间；超出部分丢弃，不返回错误；
/// - 越界的下标参数（例如 `overlay` 的插入点超过当前长度）视为空操作。
///
/// # 设计考量（Trade-offs）
/// - 内容按原始字节处理，允许内嵌 `0`（例如 `push_byte(0)`）；此时 `len()` 与终止符扫描结果可能不同，
///   以 `len()` 为准，直到调用 [`recompute_len`](Self::recompute_len)。
/// - 类型不做内部同步，`Send`/`Sync` 完全取决于存储后端。
#[derive(Clone)]
pub struct StrBuf<S> {
    pub(crate) len: usize,
    pub(crate) storage: S,
}

impl<S: BufferStorage> StrBuf<S> {
    /// 由已初始化的存储组装缓冲；调用方保证 `storage.bytes().len() >= 1`、
    /// `len` 不超过容量且 `storage[len] == 0`。
    pub(crate) const fn from_parts(storage: S, len: usize) -> Self {
        Self { len, storage }
    }

    /// 可用字节数（不含终止符）。
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.bytes().len() - 1
    }

    /// 当前有效字节数（不含终止符）。
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 缓冲是否已写满。
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity()
    }

    /// 剩余可追加的字节数。
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// 有效内容，不含终止符。
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.bytes()[..self.len]
    }

    /// 有效内容加上紧随其后的终止符。
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage.bytes()[..=self.len]
    }

    /// 以 UTF-8 文本视图读取内容；截断可能切开多字节字符，此时返回错误。
    pub fn to_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// 暴露完整存储（`capacity + 1` 字节），供外部写入方直接填充。
    ///
    /// 直接写入后缓存的长度不再可信，应随即调用 [`recompute_len`](Self::recompute_len)。
    pub fn storage_mut(&mut self) -> &mut [u8] {
        self.storage.bytes_mut()
    }

    /// 检查终止符不变量是否成立。
    pub fn check_invariants(&self) -> bool {
        let bytes = self.storage.bytes();
        self.len < bytes.len() && bytes[self.len] == 0
    }

    #[inline]
    fn settled(&mut self) -> &mut Self {
        #[cfg(feature = "invariant-checks")]
        assert!(
            self.check_invariants(),
            "bounded buffer lost its terminator: len {} capacity {}",
            self.len,
            self.capacity()
        );
        self
    }

    /// 在 `at` 处逐字节写入 `src`，截断到容量并补终止符，返回实际写入的字节数。
    fn write_truncated(&mut self, at: usize, src: &[u8]) -> usize {
        let capacity = self.capacity();
        let n = src.len().min(capacity - at);
        if n < src.len() {
            tracing::trace!(requested = src.len(), written = n, capacity, "bounded write truncated");
        }
        let bytes = self.storage.bytes_mut();
        bytes[at..at + n].copy_from_slice(&src[..n]);
        bytes[at + n] = 0;
        n
    }

    /// 以 C 字符串语义把 `src` 写到 `at` 处（原始字节来源），返回实际写入的字节数。
    fn write_terminated(&mut self, at: usize, src: &[u8]) -> usize {
        let n = raw::copy_terminated(&mut self.storage.bytes_mut()[at..], src);
        let requested = raw::terminated_len(src);
        if n < requested {
            tracing::trace!(requested, written = n, capacity = self.capacity(), "bounded write truncated");
        }
        n
    }

    /// 清空缓冲。
    pub fn clear(&mut self) -> &mut Self {
        self.len = 0;
        self.storage.bytes_mut()[0] = 0;
        self.settled()
    }

    /// 追加一个字节；缓冲已满时长度钉在容量上，不写入新位置。
    pub fn push_byte(&mut self, byte: u8) -> &mut Self {
        let capacity = self.capacity();
        let bytes = self.storage.bytes_mut();
        if self.len >= capacity {
            self.len = capacity;
        } else {
            bytes[self.len] = byte;
            self.len += 1;
        }
        bytes[self.len] = 0;
        self.settled()
    }

    /// 截断式拷贝：用 `source` 的内容覆盖本缓冲，最多保留 `capacity()` 个字节。
    pub fn copy_from<T: BufferStorage>(&mut self, source: &StrBuf<T>) -> &mut Self {
        self.len = self.write_truncated(0, source.as_bytes());
        self.settled()
    }

    /// 截断式拷贝原始字节；`source` 在首个 `0` 处结束。
    pub fn copy_from_bytes(&mut self, source: &[u8]) -> &mut Self {
        self.len = self.write_terminated(0, source);
        self.settled()
    }

    /// 在末尾追加 `source`，超出 `remaining()` 的部分被丢弃。
    pub fn append<T: BufferStorage>(&mut self, source: &StrBuf<T>) -> &mut Self {
        self.len += self.write_truncated(self.len, source.as_bytes());
        self.settled()
    }

    /// 在末尾追加原始字节；`source` 在首个 `0` 处结束。
    pub fn append_bytes(&mut self, source: &[u8]) -> &mut Self {
        self.len += self.write_terminated(self.len, source);
        self.settled()
    }

    /// 先拷贝 `first` 再追加 `second`，两步各自截断。
    pub fn copy_then_append<T, U>(&mut self, first: &StrBuf<T>, second: &StrBuf<U>) -> &mut Self
    where
        T: BufferStorage,
        U: BufferStorage,
    {
        self.copy_from(first).append(second)
    }

    /// [`copy_then_append`](Self::copy_then_append) 的原始字节版本。
    pub fn copy_then_append_bytes(&mut self, first: &[u8], second: &[u8]) -> &mut Self {
        self.copy_from_bytes(first).append_bytes(second)
    }

    /// 用 `byte` 填满全部容量，长度随之等于容量。
    pub fn fill(&mut self, byte: u8) -> &mut Self {
        let capacity = self.capacity();
        let bytes = self.storage.bytes_mut();
        bytes[..capacity].fill(byte);
        bytes[capacity] = 0;
        self.len = capacity;
        self.settled()
    }

    /// 通过扫描终止符重新计算长度，返回新长度。
    ///
    /// # 教案式说明
    /// - **意图 (Why)**：外部写入方经 [`storage_mut`](Self::storage_mut) 填充内容后，缓存长度需要重新对齐；
    /// - **契约 (What)**：扫描结果不小于容量（或根本没有终止符）时，长度钳制为容量，并强制在
    ///   `capacity()` 处写入终止符，修复外部写入方破坏的不变量。
    pub fn recompute_len(&mut self) -> usize {
        let capacity = self.capacity();
        let bytes = self.storage.bytes_mut();
        let scanned = raw::terminated_len(bytes);
        if scanned >= capacity {
            self.len = capacity;
            bytes[capacity] = 0;
        } else {
            self.len = scanned;
        }
        self.settled().len
    }

    /// 去掉开头的 `count` 个字节，剩余内容（连同终止符）整体前移。
    ///
    /// `count >= len()` 等价于 [`clear`](Self::clear)，`count == 0` 不做任何修改。
    pub fn trim_start(&mut self, count: usize) -> &mut Self {
        if count >= self.len {
            return self.clear();
        }
        if count > 0 {
            let len = self.len;
            self.storage.bytes_mut().copy_within(count..=len, 0);
            self.len -= count;
        }
        self.settled()
    }

    /// 去掉末尾的 `count` 个字节；`count >= len()` 等价于 [`clear`](Self::clear)。
    pub fn trim_end(&mut self, count: usize) -> &mut Self {
        if count >= self.len {
            return self.clear();
        }
        if count > 0 {
            self.len -= count;
            let len = self.len;
            self.storage.bytes_mut()[len] = 0;
        }
        self.settled()
    }

    /// 把长度截短到 `new_len`；只缩不扩，`new_len >= len()` 时不做修改。
    pub fn truncate(&mut self, new_len: usize) -> &mut Self {
        if new_len < self.len {
            self.storage.bytes_mut()[new_len] = 0;
            self.len = new_len;
        }
        self.settled()
    }

    /// 去掉末尾的空格与制表符（仅这两种字符）。
    pub fn trim_trailing_blanks(&mut self) -> &mut Self {
        let bytes = self.storage.bytes_mut();
        let mut len = self.len;
        while len > 0 && matches!(bytes[len - 1], b' ' | b'\t') {
            len -= 1;
        }
        bytes[len] = 0;
        self.len = len;
        self.settled()
    }

    /// 从 `index` 起用 `source` 的内容覆盖本缓冲。
    pub fn overlay<T: BufferStorage>(&mut self, index: usize, source: &StrBuf<T>) -> &mut Self {
        self.overlay_bytes(index, source.as_bytes())
    }

    /// 从 `index` 起逐字节覆盖写入 `source`（整段切片，包括其中的 `0`）。
    ///
    /// # 教案式说明
    /// - **契约 (What)**：
    ///   - `index > len()` 时缓冲不变：插入点必须落在现有内容之内或恰好在末尾；
    ///   - 若 `index + source.len()` 超过容量，只写入 `capacity() - len()` 个字节。
    ///     该上限按当前长度而不是插入点计算，`index < len()` 时会比真实剩余空间少写；
    ///   - 写入后按终止符扫描重新计算长度，覆盖区之后的字节决定最终长度。
    /// - **风险 (Trade-offs)**：覆盖越过原终止符时，新的长度取决于覆盖区之后残留的字节；
    ///   需要确定结果时先 [`fill`](Self::fill) 或 [`clear`](Self::clear) 存储。
    pub fn overlay_bytes(&mut self, index: usize, source: &[u8]) -> &mut Self {
        if index > self.len {
            return self.settled();
        }
        let capacity = self.capacity();
        let count = if index.saturating_add(source.len()) > capacity {
            capacity - self.len
        } else {
            source.len()
        };
        if count < source.len() {
            tracing::trace!(requested = source.len(), written = count, capacity, "overlay truncated");
        }
        self.storage.bytes_mut()[index..index + count].copy_from_slice(&source[..count]);
        self.recompute_len();
        self
    }

    /// 原地反转有效内容。
    pub fn reverse(&mut self) -> &mut Self {
        let len = self.len;
        raw::reverse_prefix(self.storage.bytes_mut(), len);
        self.settled()
    }
}

impl<S: BufferStorage> AsRef<[u8]> for StrBuf<S> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// `write!` 在现有内容之后追加，放不下的部分静默丢弃，从不返回错误。
impl<S: BufferStorage> fmt::Write for StrBuf<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += self.write_truncated(self.len, s.as_bytes());
        Ok(())
    }
}

impl<S: BufferStorage> fmt::Display for StrBuf<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }
        Ok(())
    }
}

impl<S: BufferStorage> fmt::Debug for StrBuf<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrBuf")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("content", &format_args!("\"{}\"", self.as_bytes().escape_ascii()))
            .finish()
    }
}

impl<S: BufferStorage, T: BufferStorage> PartialEq<StrBuf<T>> for StrBuf<S> {
    fn eq(&self, other: &StrBuf<T>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<S: BufferStorage> Eq for StrBuf<S> {}

impl<S: BufferStorage> PartialEq<[u8]> for StrBuf<S> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<S: BufferStorage> PartialEq<str> for StrBuf<S> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<S: BufferStorage> PartialEq<&str> for StrBuf<S> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

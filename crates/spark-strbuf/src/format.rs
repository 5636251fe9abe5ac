//! 有界格式化写入，语义对齐 `vsnprintf`。
//!
//! # 设计背景（Why）
//! - `write!` 追加内容；而格式化写入需要“整体覆盖 + 报告本应写入的长度”，
//!   调用方据此判断结果是否被截断。
//!
//! # 逻辑解析（How）
//! - [`BoundedWriter`] 只持有 `capacity + 1` 字节的目标切片，最后一个字节留给终止符，
//!   格式化器无论输出多少都无法越界；
//! - 同时累加“本应写入”的字节数，作为返回值。
//!
//! # 契约说明（What）
//! - 返回 `Ok(n)`：`n` 为完整输出的字节数，可能大于容量；
//! - `n >= capacity()` 或格式化报错时，长度改为扫描终止符得到，否则直接采信 `n`。

use core::fmt::{self, Write as _};

use crate::{FormatError, StrBuf, storage::BufferStorage};

struct BoundedWriter<'a> {
    dst: &'a mut [u8],
    written: usize,
    requested: usize,
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.dst.len() - 1 - self.written;
        let n = bytes.len().min(room);
        self.dst[self.written..self.written + n].copy_from_slice(&bytes[..n]);
        self.written += n;
        self.requested = self.requested.saturating_add(bytes.len());
        Ok(())
    }
}

impl<S: BufferStorage> StrBuf<S> {
    /// 以 `args` 的格式化结果覆盖缓冲内容。
    ///
    /// 通常经由 [`strbuf_format!`](crate::strbuf_format) 调用。
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> Result<usize, FormatError> {
        let capacity = self.capacity();
        let mut writer = BoundedWriter {
            dst: self.storage.bytes_mut(),
            written: 0,
            requested: 0,
        };
        let outcome = writer.write_fmt(args);
        let (written, requested) = (writer.written, writer.requested);
        self.storage.bytes_mut()[written] = 0;

        match outcome {
            Ok(()) if requested < capacity => {
                self.len = requested;
                Ok(requested)
            }
            Ok(()) => {
                let len = self.recompute_len();
                if requested > capacity {
                    tracing::trace!(requested, capacity, len, "formatted write truncated");
                }
                Ok(requested)
            }
            Err(err) => {
                self.recompute_len();
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::strbuf;

    #[test]
    fn output_within_capacity_trusts_reported_length() {
        let mut buf = strbuf!(20, "stale content");
        let n = buf.format(format_args!("{}{}{}", "hello", 20, "world")).unwrap();
        assert_eq!(n, 12);
        assert_eq!(buf, "hello20world");
        assert_eq!(buf.len(), 12);
    }

    #[test]
    fn overflow_reports_full_length_and_rescans() {
        let mut buf = strbuf!(10);
        let n = buf.format(format_args!("{}{}{}", "hello", 20, "world")).unwrap();
        assert_eq!(n, 12);
        assert_eq!(buf, "hello20wor");
        assert_eq!(buf.len(), buf.capacity());
        assert!(buf.check_invariants());
    }

    #[test]
    fn exact_fit_goes_through_rescan_path() {
        let mut buf = strbuf!(5);
        let n = buf.format(format_args!("{}", "12345")).unwrap();
        assert_eq!(n, 5);
        assert_eq!(buf, "12345");
    }
}

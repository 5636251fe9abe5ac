//! 固定容量缓冲的声明宏与格式化宏。

/// 声明固定容量缓冲，`$capacity` 为可用字节数（展开时自动加上终止符槽位）。
///
/// - `strbuf!(capacity)`：空缓冲；
/// - `strbuf!(capacity, "init")`：带初始内容，在 `const` 块中求值，
///   初始内容超出容量会导致**编译失败**。
///
/// ```
/// use spark_strbuf::strbuf;
///
/// let mut greeting = strbuf!(8, "hi");
/// greeting.append_bytes(b", world");
/// assert_eq!(greeting, "hi, worl");
/// assert_eq!(greeting.capacity(), 8);
/// ```
///
/// 初始内容溢出在构建期即被拒绝：
///
/// ```compile_fail
/// use spark_strbuf::strbuf;
///
/// let _overflow = strbuf!(4, "too long");
/// ```
#[macro_export]
macro_rules! strbuf {
    ($capacity:expr) => {
        $crate::FixedStrBuf::<{ $capacity + 1 }>::new()
    };
    ($capacity:expr, $init:expr) => {
        const { $crate::FixedStrBuf::<{ $capacity + 1 }>::with_content(<str>::as_bytes($init)) }
    };
}

/// 声明容量恰好等于初始内容长度的固定缓冲。
///
/// ```
/// use spark_strbuf::strbuf_tight;
///
/// let hello = strbuf_tight!("hello");
/// assert_eq!(hello.capacity(), 5);
/// assert!(hello.is_full());
/// ```
#[macro_export]
macro_rules! strbuf_tight {
    ($init:expr) => {
        const {
            $crate::FixedStrBuf::<{ <str>::len($init) + 1 }>::with_content(<str>::as_bytes($init))
        }
    };
}

/// 以格式化结果覆盖缓冲，语义同 `snprintf`：返回完整输出的字节数。
///
/// ```
/// use spark_strbuf::{strbuf, strbuf_format};
///
/// let mut small = strbuf!(10);
/// let wanted = strbuf_format!(small, "{}{}{}", "hello", 20, "world").unwrap();
/// assert_eq!(wanted, 12);
/// assert_eq!(small, "hello20wor");
/// ```
#[macro_export]
macro_rules! strbuf_format {
    ($buf:expr, $($arg:tt)*) => {
        $buf.format(::core::format_args!($($arg)*))
    };
}

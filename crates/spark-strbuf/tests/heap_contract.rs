//! `heap_contract` 集成测试：验证分配适配器遵循 `malloc`/`realloc`/`free` 契约。
//!
//! # 测试目标（Why）
//! - 复制操作的容量口径（完整/紧凑/原始字节）直接决定后续追加能否成功，必须逐一核对；
//! - `resize` 的三条分支（空输入、缩到 0、常规扩缩）以及失败时原缓冲保持不变，是调用方唯一可依赖的恢复路径。

#![cfg(feature = "alloc")]

use spark_strbuf::{
    AllocError,
    heap::{self, HeapStrBuf},
    strbuf,
};

/// 超过 `isize::MAX` 的分配请求必然失败，且不会真正触达系统分配器。
const UNSATISFIABLE: usize = isize::MAX as usize;

#[test]
fn allocate_clear_rejects_zero_capacity() {
    assert_eq!(heap::allocate_clear(0).unwrap_err(), AllocError::ZeroCapacity);

    let buf = heap::allocate_clear(10).expect("small allocation");
    assert_eq!(buf.capacity(), 10);
    assert!(buf.is_empty());
    assert_eq!(buf.as_bytes_with_nul(), b"\0");
}

#[test]
fn allocator_failure_is_reported() {
    let err = heap::allocate_clear(UNSATISFIABLE).unwrap_err();
    assert!(matches!(err, AllocError::Exhausted { capacity, .. } if capacity == UNSATISFIABLE));
}

#[test]
fn duplicate_bytes_is_sized_to_content() {
    let dup = heap::duplicate_bytes(b"hello world").expect("allocation");
    assert_eq!(dup.capacity(), 11);
    assert_eq!(dup, "hello world");
    assert!(dup.is_full());

    assert_eq!(
        heap::duplicate_bytes(b"").unwrap_err(),
        AllocError::ZeroCapacity
    );
}

#[test]
fn duplicate_full_keeps_spare_capacity_and_used_does_not() {
    let mut a = heap::allocate_clear(10).expect("allocation");
    a.copy_from_bytes(b"testing");

    let full = heap::duplicate_full(&a).expect("full copy");
    assert_eq!(full.capacity(), 10);
    assert_eq!(full, "testing");

    let used = heap::duplicate_used(&a).expect("tight copy");
    assert_eq!(used.capacity(), 7);
    assert_eq!(used, "testing");

    // 复制是深拷贝：修改原缓冲不影响副本。
    a.clear();
    assert_eq!(full, "testing");
    assert_eq!(used, "testing");
}

#[test]
fn duplicates_accept_fixed_sources() {
    let fixed = strbuf!(20, "fixed");
    let full = heap::duplicate_full(&fixed).expect("full copy");
    assert_eq!(full.capacity(), 20);
    assert_eq!(full, fixed);

    let empty = strbuf!(4);
    assert_eq!(
        heap::duplicate_used(&empty).unwrap_err(),
        AllocError::ZeroCapacity
    );
}

/// 缩容保留前缀，再扩容不会找回被截掉的内容。
#[test]
fn resize_preserves_prefix() {
    let b = heap::duplicate_bytes(b"hello world").expect("allocation");
    let b = heap::resize(Some(b), 500).expect("grow").expect("live buffer");
    assert_eq!(b.capacity(), 500);
    assert_eq!(b, "hello world");

    let b = heap::resize(Some(b), 11).expect("shrink").expect("live buffer");
    assert_eq!(b, "hello world");

    let b = heap::resize(Some(b), 3).expect("shrink").expect("live buffer");
    assert_eq!(b, "hel");
    assert_eq!(b.len(), 3);
    assert_eq!(b.as_bytes_with_nul(), b"hel\0");

    let b = heap::resize(Some(b), 10).expect("grow").expect("live buffer");
    assert_eq!(b, "hel");
    assert_eq!(b.len(), 3);
    assert_eq!(b.capacity(), 10);
}

#[test]
fn resize_of_nothing_allocates_and_resize_to_zero_frees() {
    let c = heap::resize(None, 30).expect("allocation").expect("live buffer");
    assert_eq!(c.capacity(), 30);
    assert!(c.is_empty());

    let mut c = c;
    c.copy_from_bytes(b"hello");
    let c = heap::resize(Some(c), 60).expect("grow").expect("live buffer");
    assert_eq!(c, "hello");

    assert!(heap::resize(Some(c), 0).expect("release").is_none());

    let err = heap::resize(None, 0).unwrap_err();
    assert_eq!(err.alloc_error(), &AllocError::ZeroCapacity);
    assert!(err.into_original().is_none());
}

/// 扩容失败时原缓冲随错误交还，内容、长度与容量均不变。
#[test]
fn failed_resize_hands_back_untouched_original() {
    let mut original = heap::allocate_clear(16).expect("allocation");
    original.copy_from_bytes(b"survivor");

    let err = heap::resize(Some(original), UNSATISFIABLE).unwrap_err();
    assert_eq!(err.requested(), UNSATISFIABLE);
    assert!(matches!(err.alloc_error(), AllocError::Exhausted { .. }));

    let original: HeapStrBuf = err.into_original().expect("original returned");
    assert_eq!(original, "survivor");
    assert_eq!(original.capacity(), 16);
    assert!(original.check_invariants());
}

#[test]
fn heap_buffers_support_every_operation() {
    let mut buf = heap::allocate_clear(8).expect("allocation");
    buf.append_bytes(b"ab  \t")
        .trim_trailing_blanks()
        .push_byte(b'c')
        .reverse();
    assert_eq!(buf, "cba");

    buf.try_resize(4).expect("shrink in place");
    buf.append_bytes(b"xyz");
    assert_eq!(buf, "cbax");
}

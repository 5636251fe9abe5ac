//! 与缓冲类型无关的底层字节原语。
//!
//! 这些函数同样适用于调用方自行管理的 C 风格字节数组：
//! 来源切片按 C 字符串语义读取（遇到首个 `0` 或切片结尾即停止），
//! 目标切片的最后一个字节始终保留给终止符。

/// 返回 `bytes` 中首个 `0` 之前的字节数；不存在 `0` 时返回切片长度。
#[inline]
pub fn terminated_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// 截取 `bytes` 中首个 `0` 之前的部分。
#[inline]
pub fn terminated(bytes: &[u8]) -> &[u8] {
    &bytes[..terminated_len(bytes)]
}

/// 有界拷贝：把 `src` 的 C 字符串内容写入 `dest`，并在其后写入终止符。
///
/// # 契约说明（What）
/// - 最多拷贝 `dest.len() - 1` 个字节，`dest` 的最后一个字节永远可以作为终止符；
/// - 返回实际拷贝的字节数 `n`，此时 `dest[n] == 0`；
/// - `dest` 为空时没有终止符槽位，函数什么也不做并返回 `0`。
pub fn copy_terminated(dest: &mut [u8], src: &[u8]) -> usize {
    let Some(room) = dest.len().checked_sub(1) else {
        return 0;
    };
    let src = terminated(src);
    let n = src.len().min(room);
    dest[..n].copy_from_slice(&src[..n]);
    dest[n] = 0;
    n
}

/// 原地反转 `bytes` 的前 `n` 个字节，双指针从两端向中间交换。
///
/// `n` 超过切片长度时按切片长度处理；`n <= 1` 时不做任何修改。
pub fn reverse_prefix(bytes: &mut [u8], n: usize) {
    let n = n.min(bytes.len());
    if n < 2 {
        return;
    }
    let (mut i, mut j) = (0, n - 1);
    while i < j {
        bytes.swap(i, j);
        i += 1;
        j -= 1;
    }
}

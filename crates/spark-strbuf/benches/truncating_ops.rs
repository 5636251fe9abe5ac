use criterion::{Criterion, black_box};
use spark_strbuf::{strbuf, strbuf_format};
use std::{env, time::Duration};

/// 截断式操作的基准：衡量“清空 -> 追加 -> 溢出截断”这一最常见路径的成本。
///
/// # 设计背景（Why）
/// - 截断判断与终止符维护发生在每一次写入上，是本 crate 的热点；
/// - 对比未溢出与溢出两种输入，确认截断分支不会引入额外扫描。
///
/// # 逻辑解析（How）
/// - `append_fits`：三段追加都能放下；
/// - `append_overflows`：第二段开始被截断；
/// - `format_overflows`：格式化结果超出容量，走终止符重新扫描路径。
fn bench_truncating_ops(c: &mut Criterion) {
    c.bench_function("append_fits", |b| {
        let mut buf = strbuf!(64);
        b.iter(|| {
            buf.clear()
                .append_bytes(black_box(b"GET "))
                .append_bytes(black_box(b"/index.html"))
                .append_bytes(black_box(b" HTTP/1.1"));
            black_box(buf.len())
        });
    });

    c.bench_function("append_overflows", |b| {
        let mut buf = strbuf!(16);
        let long = [b'x'; 256];
        b.iter(|| {
            buf.clear()
                .append_bytes(black_box(b"prefix-"))
                .append_bytes(black_box(&long[..]))
                .push_byte(b'!');
            black_box(buf.len())
        });
    });

    c.bench_function("format_overflows", |b| {
        let mut buf = strbuf!(10);
        b.iter(|| black_box(strbuf_format!(buf, "{}{}{}", "hello", black_box(20), "world")));
    });
}

fn main() {
    let mut quick_mode = false;
    for arg in env::args().skip(1) {
        if arg == "--quick" {
            quick_mode = true;
        }
    }

    let mut criterion = Criterion::default();
    if quick_mode {
        criterion = criterion
            .sample_size(10)
            .warm_up_time(Duration::from_millis(100))
            .measurement_time(Duration::from_millis(250));
    }

    bench_truncating_ops(&mut criterion);
    criterion.final_summary();
}

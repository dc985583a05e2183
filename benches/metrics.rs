//! 指标记录与导出性能基准测试

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pingd::metrics::{MetricsRecorder, NoopMetrics, PrometheusMetrics};
use std::hint::black_box;

// ============== 请求记录 ==============

fn bench_record_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics/record_request");

    let prometheus = PrometheusMetrics::new("bench").unwrap();
    group.bench_function("prometheus", |b| {
        b.iter(|| {
            prometheus.inc_http_request("GET", "/ping", "200");
            prometheus.observe_http_request("GET", "/ping", "200", black_box(0.0004));
        });
    });

    let noop = NoopMetrics::new();
    group.bench_function("noop", |b| {
        b.iter(|| {
            noop.inc_http_request("GET", "/ping", "200");
            noop.observe_http_request("GET", "/ping", "200", black_box(0.0004));
        });
    });

    group.finish();
}

// ============== 文本导出 ==============

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics/export");

    // 不同数量的路由标签
    for routes in [1usize, 10, 100] {
        let metrics = PrometheusMetrics::new("bench").unwrap();
        for i in 0..routes {
            let route = format!("/route/{}", i);
            metrics.inc_http_request("GET", &route, "200");
            metrics.observe_http_request("GET", &route, "200", 0.001);
        }

        group.bench_with_input(BenchmarkId::from_parameter(routes), &metrics, |b, m| {
            b.iter(|| black_box(m.export().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_request, bench_export);
criterion_main!(benches);

use cookieguard_core::{GuardConfig, RequestView};
use cookieguard_guard::CookieSupportGuard;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn guard() -> CookieSupportGuard {
    CookieSupportGuard::new(GuardConfig::new("hof_cookie", "hof_param")).unwrap()
}

fn long_query(pairs: usize) -> String {
    let query: Vec<String> = (0..pairs).map(|i| format!("k{i}=v{i}")).collect();
    format!("/my-hof-journey?{}", query.join("&"))
}

// ---------------------------------------------------------------------------
// Benchmark: decide
// ---------------------------------------------------------------------------

fn bench_decide(c: &mut Criterion) {
    let guard = guard();
    let mut group = c.benchmark_group("decide");

    let with_cookie = RequestView::new("/my-hof-journey").with_cookie("hof_cookie", "1");
    group.bench_function("proceed", |b| {
        b.iter(|| guard.decide(black_box(&with_cookie)))
    });

    let first_visit = RequestView::new(long_query(32));
    group.bench_function("redirect", |b| {
        b.iter(|| guard.decide(black_box(&first_visit)))
    });

    let retry = RequestView::new("/my-hof-journey?hof_param")
        .with_cookies(Some(BTreeMap::new()))
        .with_query_flag("hof_param");
    group.bench_function("fail", |b| b.iter(|| guard.decide(black_box(&retry))));

    group.finish();
}

criterion_group!(benches, bench_decide);
criterion_main!(benches);

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cdnmon::fetch::{FetchPhase, QueryCache};
use cdnmon::models::{FilterState, PageResponse};
use cdnmon::query::{build_query, query_string};

fn busy_filters() -> FilterState {
    FilterState {
        status: "provisioning,active,suspended".to_string(),
        cname: "edge cache eu-west".to_string(),
        date_from: "2026-10-01T00:00:00.000Z".to_string(),
        date_to: "2026-10-16T23:59:59.999Z".to_string(),
        priority: "high,low".to_string(),
        page: 7,
        limit: 50,
        sort: "-updated_at".to_string(),
    }
}

fn benchmark_query_string(c: &mut Criterion) {
    let filters = busy_filters();
    c.bench_function("build_query", |b| b.iter(|| build_query(black_box(&filters))));
    c.bench_function("query_string", |b| b.iter(|| query_string(black_box(&filters))));
}

fn benchmark_cache_lookup(c: &mut Criterion) {
    let mut cache = QueryCache::default();
    for page in 1..=50 {
        let key = FilterState {
            page,
            ..busy_filters()
        };
        if let Some(ticket) = cache.request(&key) {
            cache.complete(&ticket, Ok::<_, String>(PageResponse::default()), &key);
        }
    }
    let hit = FilterState {
        page: 25,
        ..busy_filters()
    };
    c.bench_function("cache phase lookup", |b| {
        b.iter(|| matches!(cache.phase(black_box(&hit)), FetchPhase::Success(_)))
    });
}

criterion_group!(benches, benchmark_query_string, benchmark_cache_lookup);
criterion_main!(benches);

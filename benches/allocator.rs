//! 分配器性能基准测试

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use shortener::allocator::{KEY_LENGTH, KeyAllocator, KeyGenerator, RandomGenerator};
use shortener::storage::MemoryStore;
use shortener::utils::validate_target;

fn bench_generator(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/generator");
    let generator = RandomGenerator::new();

    group.bench_function("key_8", |b| {
        b.iter(|| generator.generate(KEY_LENGTH));
    });

    group.bench_function("key_64", |b| {
        b.iter(|| generator.generate(64));
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocator/validate");

    group.bench_function("valid", |b| {
        b.iter(|| validate_target("https://example.com/path?query=1#frag").is_ok());
    });

    group.bench_function("invalid", |b| {
        b.iter(|| validate_target("not a url").is_err());
    });

    group.finish();
}

fn bench_allocate_and_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let allocator = KeyAllocator::with_default_generator(Arc::new(MemoryStore::new()));

    c.bench_function("allocator/allocate_and_store_memory", |b| {
        b.to_async(&rt)
            .iter(|| allocator.allocate_and_store("https://example.com/page"));
    });
}

criterion_group!(
    benches,
    bench_generator,
    bench_validate,
    bench_allocate_and_store
);
criterion_main!(benches);

//! Benchmark for memoization and composition overhead.
//!
//! Compares cache hits against direct computation, measures the cost of a
//! bounded policy under churn, and the per-stage cost of composed pipelines.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fnops::args;
use fnops::callable::{Arguments, Callable, CallableExt, Value};
use fnops::compose::compose;
use fnops::error::CallError;
use fnops::memoize::{CachePolicy, memoize, memoize_recursive};
use std::hint::black_box;

fn collatz_steps(mut value: u64) -> Result<u64, ()> {
    let mut steps = 0;
    while value > 1 {
        value = if value % 2 == 0 { value / 2 } else { 3 * value + 1 };
        steps += 1;
    }
    Ok(steps)
}

// =============================================================================
// Cache Hits
// =============================================================================

fn benchmark_memoize_hit(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("memoize_hit");

    group.bench_function("direct", |bencher| {
        bencher.iter(|| collatz_steps(black_box(837_799)));
    });

    let cached = memoize(collatz_steps);
    cached.invoke(837_799).ok();
    group.bench_function("cached", |bencher| {
        bencher.iter(|| cached.invoke(black_box(837_799)));
    });

    let cached_arguments = memoize(|arguments: Arguments| {
        let value: u64 = arguments.positional_as(0)?;
        collatz_steps(value)
            .map(Value::from)
            .map_err(|()| CallError::failed("unreachable"))
    });
    group.bench_function("cached_arguments", |bencher| {
        bencher.iter(|| cached_arguments.invoke(black_box(args![837_799; mode = "fast"])));
    });

    group.finish();
}

// =============================================================================
// Bounded Policy
// =============================================================================

fn benchmark_bounded_churn(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bounded_churn");

    for bound in [16, 256, 4096] {
        group.bench_with_input(BenchmarkId::new("max_entries", bound), &bound, |bencher, &bound| {
            let cached = memoize(|value: u64| Ok::<_, ()>(value.wrapping_mul(31)))
                .with_policy(CachePolicy::bounded(bound));
            let mut next = 0_u64;
            bencher.iter(|| {
                next = next.wrapping_add(1) % 8192;
                cached.invoke(black_box(next))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Recursive Memoization
// =============================================================================

fn benchmark_recursive(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("memoize_recursive");

    for size in [20_u64, 60, 90] {
        group.bench_with_input(BenchmarkId::new("fibonacci", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let fibonacci = memoize_recursive(
                    |recurse: &dyn Fn(u64) -> Result<u64, ()>, n: u64| {
                        if n < 2 {
                            Ok(n)
                        } else {
                            Ok(recurse(n - 1)? + recurse(n - 2)?)
                        }
                    },
                );
                black_box(fibonacci.invoke(size))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Composition
// =============================================================================

fn benchmark_compose(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("compose");

    let add_one = |value: u64| Ok::<_, ()>(value + 1);
    let double = |value: u64| Ok::<_, ()>(value * 2);

    group.bench_function("manual", |bencher| {
        bencher.iter(|| add_one(black_box(3)).and_then(double).and_then(add_one));
    });

    let composed = compose(add_one, compose(double, add_one));
    group.bench_function("compose", |bencher| {
        bencher.iter(|| composed.invoke(black_box(3)));
    });

    let chained = add_one.then(double).then(add_one);
    group.bench_function("then", |bencher| {
        bencher.iter(|| chained.invoke(black_box(3)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_memoize_hit,
    benchmark_bounded_churn,
    benchmark_recursive,
    benchmark_compose
);
criterion_main!(benches);

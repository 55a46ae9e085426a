use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use depository::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let depository = Depository::new();
    depository.singleton("answer", Concrete::object(42u64)).unwrap();

    // Prime the singleton
    let _ = depository.get::<u64>("answer").unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = depository.get::<u64>("answer").unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let depository = Depository::new();
                depository
                    .singleton(
                        "expensive",
                        Concrete::closure(|_| {
                            Ok(ExpensiveToCreate {
                                data: (0..1000).collect(),
                            })
                        }),
                    )
                    .unwrap();
                depository
            },
            |depository| {
                let v = depository.get::<ExpensiveToCreate>("expensive").unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_strategies(c: &mut Criterion) {
    struct Service {
        data: [u8; 64],
    }

    let mut group = c.benchmark_group("strategies");

    let depository = Depository::new();
    depository.define_class(ClassInfo::new("Service", |_| Ok(Service { data: [0; 64] })).method(
        MethodInfo::static_fn("build", |_| Ok(Service { data: [1; 64] })),
    ));
    depository
        .register("closure", Concrete::closure(|_| Ok(Service { data: [0; 64] })))
        .unwrap();
    depository.register("class", "Service").unwrap();
    depository.register("callable", "Service::build").unwrap();

    for key in ["closure", "class", "callable"] {
        group.bench_with_input(BenchmarkId::new("transient", key), &key, |b, key| {
            b.iter(|| {
                let v = depository.get::<Service>(key).unwrap();
                black_box(&v.data);
            })
        });
    }

    group.finish();
}

fn bench_parameter_injection(c: &mut Criterion) {
    struct Config {
        port: u16,
    }

    struct Server {
        config: Arc<Config>,
        workers: usize,
    }

    let depository = Depository::new();
    depository
        .define_class(
            ClassInfo::new("Server", |args| {
                Ok(Server {
                    config: args.get::<Config>(0)?,
                    workers: args.cloned(1)?,
                })
            })
            .param(Parameter::typed("config", "Config"))
            .param(Parameter::new("workers").default_value(4usize)),
        );
    depository
        .singleton("Config", Concrete::object(Config { port: 8080 }))
        .unwrap();
    depository.register("server", "Server").unwrap();

    c.bench_function("class_with_injected_singleton", |b| {
        b.iter(|| {
            let server = depository.get::<Server>("server").unwrap();
            black_box(server.config.port as usize + server.workers);
        })
    });
}

fn bench_alias_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("alias_chain");

    for &length in &[1usize, 4, 16] {
        let depository = Depository::new();
        depository.singleton("target", Concrete::object(7u32)).unwrap();
        let mut previous = String::from("target");
        for i in 0..length {
            let alias = format!("alias-{}", i);
            depository.alias(&alias, &previous).unwrap();
            previous = alias;
        }

        group.bench_with_input(BenchmarkId::new("resolve", length), &previous, |b, key| {
            b.iter(|| {
                let v = depository.get::<u32>(key).unwrap();
                black_box(v);
            })
        });
    }

    group.finish();
}

fn bench_circular_detection_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circular_detection");

    // Non-circular chain of depth 8, each link a closure bound to the next key
    let depository = Depository::new();
    depository.register("S1", Concrete::closure(|_| Ok(1usize))).unwrap();
    for i in 2..=8 {
        depository
            .register(&format!("S{}", i), Concrete::closure(|args| Ok(*args.get::<usize>(0)? + 1)))
            .unwrap()
            .with([Argument::key(format!("S{}", i - 1))]);
    }

    group.bench_function("chain_depth_8", |b| {
        b.iter(|| {
            let service = depository.get::<usize>("S8").unwrap();
            black_box(&service);
        })
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    let depository = Depository::new();
    depository.singleton("answer", Concrete::object(42u64)).unwrap();

    // Prime the singleton
    let _ = depository.get::<u64>("answer").unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let depository_ref = &depository;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = depository_ref.get::<u64>("answer").unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_registry");

    for &item_count in &[10, 100, 1000] {
        let depository = Depository::new();

        // Register a baseline item we'll always resolve
        depository.singleton("baseline", Concrete::object(42u64)).unwrap();

        for i in 0..item_count {
            let value = i as u32;
            depository
                .singleton(&format!("item-{}", i), Concrete::closure(move |_| Ok(value)))
                .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("resolve_from_large_registry", item_count),
            &item_count,
            |b, _| {
                b.iter(|| {
                    let v = depository.get::<u64>("baseline").unwrap();
                    black_box(v);
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_strategies,
    bench_parameter_injection,
    bench_alias_chain,
    bench_circular_detection_depth,
    bench_contention
);

criterion_group!(macro_benches, bench_large_registry);

criterion_main!(micro_benches, macro_benches);

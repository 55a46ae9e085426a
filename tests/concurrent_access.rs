/// Concurrent access integration tests
///
/// These tests verify that the depository behaves correctly when several
/// threads register and resolve at the same time: singletons stay unique,
/// transients stay fresh, and cycle detection stays per thread.

use crossbeam_utils::thread;
use depository::{Argument, ClassInfo, Concrete, Depository, DiError, Parameter, Resolver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

const THREADS: usize = 8;

// ===== Test Services =====

#[derive(Debug)]
struct Pool {
    id: usize,
}

#[test]
fn test_singleton_constructed_once_under_contention() {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();

    let depository = Depository::new();
    depository
        .singleton(
            "Pool",
            Concrete::closure(move |_| {
                let id = counter.fetch_add(1, Ordering::SeqCst);
                // Widen the window in which other threads race for the slot
                std::thread::sleep(Duration::from_millis(20));
                Ok(Pool { id })
            }),
        )
        .unwrap();

    let barrier = Barrier::new(THREADS);
    let pools: Vec<Arc<Pool>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|_| {
                    barrier.wait();
                    depository.get::<Pool>("Pool").unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    assert_eq!(builds.load(Ordering::SeqCst), 1);
    assert!(pools.iter().all(|pool| Arc::ptr_eq(pool, &pools[0])));
    assert_eq!(pools[0].id, 0);
}

#[test]
fn test_transients_are_fresh_per_thread() {
    let depository = Depository::new();
    depository.define_class(ClassInfo::new("Pool", |_| Ok(Pool { id: 0 })));
    depository.register("pool", "Pool").unwrap();

    let pools: Vec<Arc<Pool>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|_| depository.get::<Pool>("pool").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    for (i, a) in pools.iter().enumerate() {
        for b in &pools[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn test_concurrent_registration_and_resolution() {
    let depository = Depository::new();

    thread::scope(|s| {
        for t in 0..THREADS {
            let depository = &depository;
            s.spawn(move |_| {
                for i in 0..50 {
                    let key = format!("svc-{}-{}", t, i);
                    depository
                        .register(&key, Concrete::closure(move |_| Ok(t * 1000 + i)))
                        .unwrap();
                    assert_eq!(*depository.get::<usize>(&key).unwrap(), t * 1000 + i);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(depository.len(), THREADS * 50);
}

#[test]
fn test_nested_singletons_across_threads() {
    struct Repo {
        pool: Arc<Pool>,
    }

    let depository = Depository::new();
    depository
        .define_class(ClassInfo::new("Pool", |_| Ok(Pool { id: 7 })))
        .define_class(
            ClassInfo::new("Repo", |args| Ok(Repo { pool: args.get::<Pool>(0)? }))
                .param(Parameter::typed("pool", "Pool")),
        );
    depository.singleton("Pool", "Pool").unwrap();
    depository.register("Repo", "Repo").unwrap();

    let repos: Vec<Arc<Repo>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| s.spawn(|_| depository.get::<Repo>("Repo").unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
    .unwrap();

    let pool = depository.get::<Pool>("Pool").unwrap();
    assert!(repos.iter().all(|repo| Arc::ptr_eq(&repo.pool, &pool)));
    assert_eq!(pool.id, 7);
}

#[test]
fn test_cycle_detection_is_per_thread() {
    let depository = Depository::new();
    depository
        .register("A", Concrete::closure(|_| Ok(())))
        .unwrap()
        .with([Argument::key("B")]);
    depository
        .register("B", Concrete::closure(|_| Ok(())))
        .unwrap()
        .with([Argument::key("A")]);
    depository.register("Ok", Concrete::closure(|_| Ok(1u8))).unwrap();

    thread::scope(|s| {
        for t in 0..THREADS {
            let depository = &depository;
            s.spawn(move |_| {
                for _ in 0..20 {
                    if t % 2 == 0 {
                        assert!(matches!(depository.resolve("A"), Err(DiError::Circular(_))));
                    } else {
                        assert_eq!(*depository.get::<u8>("Ok").unwrap(), 1);
                    }
                }
            });
        }
    })
    .unwrap();
}

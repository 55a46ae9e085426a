#![no_main]

use depository::{Argument, Concrete, Depository, DepositoryOptions, DiError, Lifetime};
use libfuzzer_sys::fuzz_target;

// Each byte pair wires one node to another through a bound key argument.
// Fan-out and depth stay small so failing subgraphs, which are never
// cached, cannot blow up. Resolving any node must succeed or fail with a
// cycle or depth error.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let nodes = (data[0] % 16) as usize + 1;
    let depository = Depository::with_options(DepositoryOptions {
        max_depth: 8,
        ..DepositoryOptions::default()
    });

    let mut edges: Vec<Vec<Argument>> = vec![Vec::new(); nodes];
    for pair in data[1..].chunks_exact(2) {
        let from = pair[0] as usize % nodes;
        let to = pair[1] as usize % nodes;
        if edges[from].len() < 2 {
            edges[from].push(Argument::key(format!("n{}", to)));
        }
    }

    for (i, bound) in edges.into_iter().enumerate() {
        let lifetime = if i % 2 == 0 { Lifetime::Singleton } else { Lifetime::Transient };
        depository
            .register_with_lifetime(&format!("n{}", i), Concrete::closure(|args| Ok(args.len())), lifetime)
            .unwrap()
            .with(bound);
    }

    for i in 0..nodes {
        match depository.resolve(&format!("n{}", i)) {
            Ok(_) | Err(DiError::Circular(_)) | Err(DiError::DepthExceeded(_)) => {}
            Err(other) => panic!("unexpected resolution error: {}", other),
        }
    }
});

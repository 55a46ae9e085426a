#![no_main]

use depository::{ClassInfo, Concrete, Depository, DiError, FunctionInfo, MethodInfo};
use libfuzzer_sys::fuzz_target;

// Arbitrary key and payload strings must classify or fail with a typed
// error, never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (key, name) = text.split_once('\n').unwrap_or((text, text));

    let depository = Depository::new();
    depository
        .define_class(ClassInfo::new("Mailer", |_| Ok(())).method(MethodInfo::static_fn("send", |_| Ok(1u8))))
        .define_class(ClassInfo::new("Ns::Mailer", |_| Ok(())))
        .define_function(FunctionInfo::new("helper", |_| Ok(2u8)));

    match depository.register(key, name) {
        Ok(handle) => {
            assert_eq!(handle.key().as_str(), key);
            let _ = handle.make();
        }
        Err(DiError::InvalidKey(_)) => assert!(key.trim().is_empty()),
        Err(DiError::NotDefinable(k)) => assert_eq!(k, key),
        Err(other) => panic!("unexpected registration error: {}", other),
    }

    if let Some((class, method)) = name.split_once("::") {
        let _ = depository.register(key, Concrete::method(class, method));
    }
});

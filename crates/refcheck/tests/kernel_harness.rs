//! Integration test: a harness checking several kernel implementations.
//!
//! Mirrors how the checker is driven in practice: a reference kernel runs
//! first, then every alternative implementation is checked against it.
//! Also covers strict mode, per-worker registries and mixed element kinds.

use std::thread;

use refcheck::prelude::*;
use refcheck::BaselineRegistry;
use refcheck_test_utils::{ramp, ConstKernel, Kernel, PerturbedKernel, ScaleKernel};

fn kernels() -> Vec<Box<dyn Kernel>> {
    vec![
        Box::new(ScaleKernel::new("cpu", 3.0)),
        Box::new(ScaleKernel::new("simd", 3.0)),
        Box::new(PerturbedKernel::new(
            "gpu",
            Box::new(ScaleKernel::new("inner", 3.0)),
            5,
            0.5,
        )),
        Box::new(ConstKernel::new("stub", -1.0)),
    ]
}

#[test]
fn harness_flags_only_broken_kernels() {
    let input = create_input::<f32>(4, 8, InputPattern::Random, 99);
    let mut checker = OutputChecker::new(CheckerConfig::default()).unwrap();

    for kernel in kernels() {
        let output = kernel.run(&input);
        checker.check(&output, kernel.name(), 4, 8).unwrap();
    }

    let history = checker.history();
    assert!(matches!(history["cpu"], CheckOutcome::Registered { .. }));
    assert_eq!(history["simd"], CheckOutcome::Matched);
    let gpu = history["gpu"].report().unwrap();
    assert_eq!(gpu.mismatch_count(), 1);
    assert_eq!(gpu.mismatches()[0].index, 5);
    let stub = history["stub"].report().unwrap();
    assert_eq!(stub.mismatch_count(), 32);

    let summary = checker.summary();
    assert_eq!(summary.mismatched, 2);
    assert_eq!(summary.worst.as_ref().unwrap().0, "stub");
}

#[test]
fn strict_harness_stops_on_first_failure() {
    let input = ramp::<f32>(16);
    let mut checker = OutputChecker::new(CheckerConfig::strict()).unwrap();

    let mut failed = None;
    for kernel in kernels() {
        let output = kernel.run(&input);
        if let Err(e) = checker.check_row(&output, kernel.name()) {
            failed = Some(e);
            break;
        }
    }

    match failed {
        Some(CheckError::Mismatch(report)) => {
            assert_eq!(report.name, "gpu");
            assert_eq!(report.to_string(), format!("gpu has an error of {}", report.max_error()));
        }
        other => panic!("expected gpu mismatch, got {other:?}"),
    }
}

#[test]
fn baselines_are_kept_per_kind() {
    let mut checker = OutputChecker::new(CheckerConfig::strict()).unwrap();
    checker.check_row(&ramp::<f64>(8), "cpu").unwrap();
    checker.check_row(&ramp::<f32>(8), "cpu").unwrap();
    checker.check_row(&ramp::<i32>(8), "cpu").unwrap();
    assert_eq!(checker.registry().len(), 3);

    checker.check_row(&ramp::<f64>(8), "gpu").unwrap();
    checker.check_row(&ramp::<f32>(8), "gpu").unwrap();
    checker.check_row(&ramp::<i32>(8), "gpu").unwrap();

    let mut off_by_one = ramp::<i32>(8);
    off_by_one[7] += 1;
    assert!(checker.check_row(&off_by_one, "gpu").is_err());
}

#[test]
fn registry_survives_checker_rebuild() {
    let mut checker = OutputChecker::new(CheckerConfig::default()).unwrap();
    checker.check_row(&[2.0f64, 4.0], "cpu").unwrap();
    let registry: BaselineRegistry = checker.into_registry();

    let mut strict = OutputChecker::with_registry(CheckerConfig::strict(), registry).unwrap();
    assert_eq!(strict.check_row(&[2.0f64, 4.0], "gpu").unwrap(), CheckOutcome::Matched);
    assert!(strict.check_row(&[2.0f64, 4.1], "gpu").is_err());
}

#[test]
fn parallel_workers_use_private_checkers() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let input = create_input::<f32>(8, 8, InputPattern::Random, seed);
                let mut checker = OutputChecker::new(CheckerConfig::strict()).unwrap();
                let reference = ScaleKernel::new("cpu", 0.5).run(&input);
                checker.check(&reference, "cpu", 8, 8).unwrap();
                let candidate: Vec<f32> = input.iter().map(|x| x / 2.0).collect();
                checker.check(&candidate, "gpu", 8, 8).map(|_| checker.summary())
            })
        })
        .collect();

    for handle in handles {
        let summary = handle.join().unwrap().unwrap();
        assert!(summary.all_passed());
        assert_eq!(summary.matched, 1);
    }
}

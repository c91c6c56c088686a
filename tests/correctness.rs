use std::path::Path;
use std::process::Command;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use transbench::comm::local::run_group;
use transbench::comm::Communicator;
use transbench::matrix::symmetry::is_symmetric;
use transbench::matrix::transpose::{transpose, verify_transpose};
use transbench::{
    check_symmetric_parallel, config, transpose_parallel, Error, Matrix, MetricsRecord,
    PhaseTiming, RowBlock,
};

fn seeded_matrix(n: usize, seed: u64) -> Matrix {
    Matrix::random(n, &mut StdRng::seed_from_u64(seed))
}

fn symmetric_matrix(n: usize, seed: u64) -> Matrix {
    let mut m = seeded_matrix(n, seed);
    m.symmetrize();
    m
}

// ============================================================
// Partitioning
// ============================================================

#[test]
fn partition_covers_every_row_exactly_once() {
    let cases = [(4, 1), (4, 2), (4, 4), (8, 2), (16, 4), (16, 16), (64, 8)];

    for (n, workers) in cases {
        let mut covered = vec![0usize; n];
        for rank in 0..workers {
            let block = RowBlock::for_rank(n, rank, workers);
            assert_eq!(block.row_count, n / workers);
            assert_eq!(block.start_row, rank * (n / workers));
            for row in block.rows() {
                covered[row] += 1;
            }
        }
        assert!(
            covered.iter().all(|&c| c == 1),
            "rows not covered exactly once for n={}, workers={}",
            n,
            workers
        );
    }
}

// ============================================================
// Concrete 4×4 scenario
// ============================================================

#[test]
fn transpose_4x4_two_workers_concrete() {
    let m = Matrix::from_flat(4, (1..=16).map(|v| v as f32).collect());
    let expected: [f32; 16] = [
        1.0, 5.0, 9.0, 13.0, //
        2.0, 6.0, 10.0, 14.0, //
        3.0, 7.0, 11.0, 15.0, //
        4.0, 8.0, 12.0, 16.0,
    ];

    let serial = transpose(&m);
    assert_eq!(serial.as_slice(), &expected);

    let out = transpose_parallel(&m, 2).unwrap();
    assert_eq!(out.matrix.as_slice(), &expected);

    let sym = check_symmetric_parallel(&m, 2).unwrap();
    assert!(!sym.symmetric);
}

// ============================================================
// Parallel vs. serial oracle
// ============================================================

#[test]
fn parallel_transpose_matches_serial() {
    let cases = [
        (4, vec![1, 2, 4]),
        (8, vec![1, 2, 4, 8]),
        (16, vec![2, 4]),
        (32, vec![4, 8]),
    ];

    for (n, worker_counts) in cases {
        let m = seeded_matrix(n, n as u64);
        let oracle = transpose(&m);
        assert!(verify_transpose(&m, &oracle));

        for workers in worker_counts {
            let out = transpose_parallel(&m, workers).unwrap();
            assert_eq!(
                out.matrix, oracle,
                "mismatch for n={}, workers={}",
                n, workers
            );
            assert!(verify_transpose(&m, &out.matrix));
        }
    }
}

#[test]
fn gathered_elements_are_the_mirror_of_the_original() {
    let n = 16;
    let m = seeded_matrix(n, 3);
    let out = transpose_parallel(&m, 4).unwrap();

    for i in 0..n {
        for j in 0..n {
            assert_eq!(out.matrix.get(i, j), m.get(j, i), "at ({}, {})", i, j);
        }
    }
}

#[test]
fn double_transpose_is_identity() {
    let m = seeded_matrix(32, 9);
    assert_eq!(transpose(&transpose(&m)), m);
}

#[test]
fn parallel_symmetry_matches_serial_on_symmetric_input() {
    let m = symmetric_matrix(8, 7);
    assert!(is_symmetric(&m));

    for workers in [1, 2, 4, 8] {
        let out = check_symmetric_parallel(&m, workers).unwrap();
        assert!(out.symmetric, "workers={}", workers);
    }
}

#[test]
fn parallel_symmetry_detects_mismatch_in_any_block() {
    let n = 8;
    let base = symmetric_matrix(n, 11);

    // Break one mirror pair per row so every rank's block, including the
    // bottom one, gets a turn at catching the mismatch.
    for row in 0..n - 1 {
        let mut data = base.as_slice().to_vec();
        data[row * n + (n - 1)] += 1.0;
        let perturbed = Matrix::from_flat(n, data);
        assert!(!is_symmetric(&perturbed));

        for workers in [1, 2, 4, 8] {
            let out = check_symmetric_parallel(&perturbed, workers).unwrap();
            assert!(!out.symmetric, "missed mismatch at row {} with {} workers", row, workers);
        }
    }
}

// ============================================================
// Boundary worker counts
// ============================================================

#[test]
fn single_worker_matches_serial() {
    let m = seeded_matrix(8, 21);

    let out = transpose_parallel(&m, 1).unwrap();
    assert_eq!(out.matrix, transpose(&m));

    let sym = check_symmetric_parallel(&m, 1).unwrap();
    assert_eq!(sym.symmetric, is_symmetric(&m));
}

#[test]
fn one_row_per_worker() {
    let n = 8;
    let m = seeded_matrix(n, 22);

    let out = transpose_parallel(&m, n).unwrap();
    assert_eq!(out.matrix, transpose(&m));

    let sym = check_symmetric_parallel(&m, n).unwrap();
    assert_eq!(sym.symmetric, is_symmetric(&m));
}

// ============================================================
// Rejection
// ============================================================

#[test]
fn rejects_non_power_of_two() {
    assert!(matches!(
        config::validate(6, 2),
        Err(Error::NotPowerOfTwo { n: 6 })
    ));
    assert!(matches!(
        config::validate(0, 1),
        Err(Error::NotPowerOfTwo { n: 0 })
    ));

    let m = Matrix::from_flat(6, vec![0.0; 36]);
    assert!(matches!(
        transpose_parallel(&m, 2),
        Err(Error::NotPowerOfTwo { .. })
    ));
}

#[test]
fn rejects_indivisible_worker_count() {
    assert!(matches!(
        config::validate(16, 3),
        Err(Error::NotDivisible { n: 16, workers: 3 })
    ));

    let m = seeded_matrix(16, 1);
    assert!(matches!(
        check_symmetric_parallel(&m, 3),
        Err(Error::NotDivisible { .. })
    ));
}

// ============================================================
// Metrics
// ============================================================

#[test]
fn metrics_derivation_and_log_format() {
    let timing = PhaseTiming {
        compute: Duration::from_millis(500),
        total: Duration::from_millis(600),
    };
    let record = MetricsRecord::new(4, 1024, Duration::from_secs(1), timing);

    assert!((record.speedup - 2.0).abs() < 1e-9);
    assert!((record.efficiency_pct - 50.0).abs() < 1e-9);

    let expected_bw = 2.0 * 1024.0 * 1024.0 * 4.0 / 0.5 / 1e9;
    assert!((record.bandwidth_gbps - expected_bw).abs() < 1e-9);
    assert!(record.bandwidth_gbps > 0.0);
    assert!(record.efficiency_pct > 0.0 && record.efficiency_pct <= 100.0);

    let line = record.log_line();
    let fields: Vec<&str> = line.split(';').collect();
    assert_eq!(fields.len(), 7);
    assert_eq!(fields[0].trim(), "4");
    assert_eq!(fields[1].trim(), "1024");
}

#[test]
fn unavailable_results_log_is_a_sink_error() {
    let timing = PhaseTiming {
        compute: Duration::from_millis(10),
        total: Duration::from_millis(12),
    };
    let record = MetricsRecord::new(2, 8, Duration::from_millis(20), timing);

    let result = record.append_to(Path::new("/nonexistent_dir/results.csv"));
    assert!(matches!(result, Err(Error::Sink(_))));
}

// ============================================================
// CLI
// ============================================================

#[test]
fn missing_size_argument_prints_usage_and_rejects() {
    let output = Command::new(env!("CARGO_BIN_EXE_transbench"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

// ============================================================
// Fault propagation
// ============================================================

#[test]
fn fault_broadcast_fails_the_group() {
    let result: Result<Vec<()>, Error> = run_group(2, |comm| {
        if comm.rank() == 1 {
            comm.abort("injected allocation failure");
            return Err(Error::Allocation { rank: 1 });
        }
        comm.reduce_and(true)?;
        Ok(())
    });

    match result {
        Err(Error::Fault { .. }) | Err(Error::Allocation { .. }) => {}
        other => panic!("expected a group fault, got {:?}", other),
    }
}

#[test]
fn panicked_worker_surfaces_as_fault() {
    let result: Result<Vec<()>, Error> = run_group(2, |comm| {
        if comm.rank() == 1 {
            panic!("worker died");
        }
        comm.reduce_and(true)?;
        Ok(())
    });

    assert!(matches!(result, Err(Error::Fault { .. })));
}

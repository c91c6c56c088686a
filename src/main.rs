//! Benchmark runner: serial baselines vs. the row-partitioned worker group.

use std::path::Path;
use std::time::Instant;
use std::{env, mem, process, thread};

use transbench::comm::local::run_group;
use transbench::comm::COORDINATOR;
use transbench::matrix::{symmetry, transpose as serial};
use transbench::{config, parallel, Error, Matrix, MetricsRecord};

const RESULTS_LOG: &str = "results.csv";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(if err.is_config() { 1 } else { 2 });
    }
}

fn run() -> Result<(), Error> {
    let args: Vec<String> = env::args().collect();
    let Some(size_arg) = args.get(1) else {
        eprintln!("Usage: transbench <matrix_size> [workers]");
        process::exit(1);
    };
    // An unparsable size falls through the power-of-two check.
    let n: usize = size_arg.parse().unwrap_or(0);
    let workers: usize = match args.get(2) {
        Some(s) => s.parse().ok().unwrap_or(0),
        None => thread::available_parallelism().map(|p| p.get()).unwrap_or(1),
    };
    config::validate(n, workers)?;

    let matrix = Matrix::random(n, &mut rand::thread_rng());

    println!("\n-----------------------------SYMMETRY CHECK-----------------------------");

    let start = Instant::now();
    let serial_symmetric = symmetry::is_symmetric(&matrix);
    let serial_sym_elapsed = start.elapsed();
    println!(
        "\nSYMMETRY CHECK SERIAL time = {:12.8} sec",
        serial_sym_elapsed.as_secs_f64()
    );
    println!("{}", verdict(serial_symmetric));

    let start = Instant::now();
    let serial_transposed = serial::transpose(&matrix);
    let serial_elapsed = start.elapsed();

    // One fixed group runs both parallel phases, every rank executing the
    // same closure. Only the coordinator's slot carries the outcomes.
    let mut results = run_group(workers, |comm| {
        let sym = parallel::check_symmetry(&comm, &matrix)?;
        let tr = parallel::transpose(&comm, &matrix)?;
        Ok(sym.zip(tr))
    })?;
    let (sym_out, tr_out) = match results.swap_remove(COORDINATOR) {
        Some(pair) => pair,
        None => {
            return Err(Error::Fault {
                rank: COORDINATOR,
                reason: "coordinator produced no result".into(),
            });
        }
    };

    println!(
        "\nSYMMETRY CHECK GROUP time = {:12.8} sec ({} workers)",
        sym_out.elapsed.as_secs_f64(),
        workers
    );
    println!("{}", verdict(sym_out.symmetric));
    if sym_out.symmetric != serial_symmetric {
        println!("WARNING: group symmetry result disagrees with the serial check");
    }

    println!("\n--------------------------MATRIX TRANSPOSITION--------------------------");

    let bytes_moved = 2.0 * (n * n) as f64 * mem::size_of::<f32>() as f64;
    println!(
        "\nMATRIX TRANSPOSITION SERIAL time = {:12.8} sec",
        serial_elapsed.as_secs_f64()
    );
    println!(
        "MATRIX TRANSPOSITION SERIAL bandwidth = {:5.4} GB/sec",
        bytes_moved / serial_elapsed.as_secs_f64() / 1e9
    );
    println!(
        "{}",
        correctness(serial::verify_transpose(&matrix, &serial_transposed))
    );

    let record = MetricsRecord::new(workers, n, serial_elapsed, tr_out.timing);
    record.report();
    println!(
        "{}",
        correctness(serial::verify_transpose(&matrix, &tr_out.matrix))
    );

    // Metrics persistence is best-effort: report the failure and move on.
    if let Err(err) = record.append_to(Path::new(RESULTS_LOG)) {
        eprintln!("{err}");
    }

    Ok(())
}

fn verdict(symmetric: bool) -> &'static str {
    if symmetric { "SYMMETRIC" } else { "NOT symmetric" }
}

fn correctness(ok: bool) -> &'static str {
    if ok { "CORRECT" } else { "INCORRECT" }
}

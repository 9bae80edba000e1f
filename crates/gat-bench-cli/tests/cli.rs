use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HEADER: &str = "case_name,load_time_ms,solve_time_ms,total_time_ms,converged,iterations,num_buses,num_branches,num_gens,objective_value,baseline_objective,objective_gap_abs,objective_gap_rel,max_vm_violation_pu,max_gen_p_violation_mw,max_branch_flow_violation_mva";

fn write_csv(dir: &Path, name: &str, rows: &[&str]) {
    let mut body = format!("{HEADER}\n");
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(dir.join(name), body).unwrap();
}

fn bench_cli() -> Command {
    Command::cargo_bin("gat-bench-cli").unwrap()
}

#[test]
fn analyze_full_network_suite() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "pglib_full.csv",
        &[
            "case14,0.1,10.0,10.1,true,5,14,20,5,105.0,100.0,5.0,0.05,0,0,0",
            "case30,0.1,30.0,30.1,true,5,30,41,6,115.0,100.0,15.0,0.15,0,0,0",
            "case118,0.1,0.0,0.1,false,0,118,186,54,0,0,0,0,0,0,0",
        ],
    );

    bench_cli()
        .args(["analyze", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convergence: 2/3 (66.7%)"))
        .stdout(predicate::str::contains("median=30.00ms"))
        .stdout(predicate::str::contains("mean=20.00ms"))
        .stdout(predicate::str::contains("median=15.00%"))
        .stdout(predicate::str::contains(
            "PGLib: 2/3 conv, median=30.00ms, gap=15.00%",
        ))
        .stdout(predicate::str::contains("\\label{tab:benchmarks}"));
}

#[test]
fn analyze_sweep_with_one_file() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "pfdelta_case30_n.csv",
        &[
            "s1,0,5.0,5.0,true,3,30,41,6,0,0,0,0,0,0,0",
            "s2,0,7.0,7.0,true,3,30,41,6,0,0,0,0,0,0,0",
        ],
    );

    bench_cli()
        .args(["analyze", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("case30: 2/2 converged (100.0%)"))
        .stdout(predicate::str::contains("Avg solve time: 6.00ms"))
        .stdout(predicate::str::contains("Total: 2/2 (100.0%)"))
        .stdout(predicate::str::contains("PFDelta: 2/2 conv (100.0%)"))
        .stdout(predicate::str::contains("case57").not());
}

#[test]
fn analyze_missing_directory_succeeds() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    bench_cli()
        .args(["analyze", missing.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchmark Analysis"))
        .stdout(predicate::str::contains("PGLib results not found"))
        .stdout(predicate::str::contains("PFDelta: no result files found"))
        .stdout(predicate::str::contains("\\begin{tabular}").not());
}

#[test]
fn methods_reports_missing_and_present() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "pglib_ac.csv",
        &[
            "case5,0.1,4.0,4.1,true,10,5,6,5,101.0,100.0,1.0,0.01,0.0,0.0,0.0",
            "case14,0.1,8.0,8.1,true,20,14,20,5,2178.2,0,0,0,0.0,0.0,0.0",
        ],
    );

    bench_cli()
        .args(["methods", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("DC-OPF: File not found"))
        .stdout(predicate::str::contains("Loaded 2 results"))
        .stdout(predicate::str::contains("case5: obj=101.00, gap=1.000%, time=4.0ms"))
        .stdout(predicate::str::contains("case14: obj=2178.20, gap=N/A, time=8.0ms"))
        .stdout(predicate::str::contains("SUMMARY STATISTICS"))
        .stdout(predicate::str::contains("AC-OPF & 2/2 & 1.000 & 6.0 & 0.0000 & 0.00 \\\\"))
        .stdout(predicate::str::contains("SOCP &").not());
}

#[test]
fn baseline_extraction_writes_csv() {
    let dir = tempdir().unwrap();
    let md = dir.path().join("BASELINE.md");
    let out = dir.path().join("nested").join("baseline.csv");
    fs::write(
        &md,
        "| Case | Nodes | Edges | DC | AC |\n\
         |---|---|---|---|---|\n\
         | pglib_opf_case30_ieee | 30 | 41 | 500.1 | 576.89 |\n\
         | not a row |\n",
    )
    .unwrap();

    bench_cli()
        .args(["baseline", md.to_str().unwrap(), out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 1 baseline objectives to"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("case_name,ac_objective"));
    assert!(written.contains("pglib_opf_case30_ieee,576.89"));
}

#[test]
fn summary_fills_baselines() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "run.csv",
        &[
            "pglib_opf_case14_ieee,0.4,67.0,67.4,true,0,14,20,5,110.0,0,0,0,0.04,0,0",
            "pglib_opf_case118_ieee,1.2,500.0,501.2,false,200,118,186,54,0,0,0,0,0,0,0",
        ],
    );
    let baseline = dir.path().join("baseline.csv");
    fs::write(&baseline, "case_name,ac_objective\npglib_opf_case14_ieee,100.0\n").unwrap();

    bench_cli()
        .args([
            "summary",
            dir.path().join("run.csv").to_str().unwrap(),
            "--baseline",
            baseline.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pass Rate: 1/2 (50.0%)"))
        .stdout(predicate::str::contains("10.00%"))
        .stdout(predicate::str::contains("(fail)"));
}

#[test]
fn analyze_with_absent_baseline_file_succeeds() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "pglib_full.csv",
        &[
            "case14,0.1,10.0,10.1,true,5,14,20,5,105.0,100.0,5.0,0.05,0,0,0",
            "case30,0.1,30.0,30.1,true,5,30,41,6,115.0,100.0,15.0,0.15,0,0,0",
        ],
    );
    let absent = dir.path().join("absent_baseline.csv");

    bench_cli()
        .args([
            "analyze",
            dir.path().to_str().unwrap(),
            "--baseline",
            absent.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convergence: 2/2 (100.0%)"))
        .stdout(predicate::str::contains("median=15.00%"));
}

#[test]
fn summary_missing_file_fails() {
    let dir = tempdir().unwrap();
    bench_cli()
        .args(["summary", dir.path().join("absent.csv").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open benchmark CSV"))
        .stderr(predicate::str::contains("I/O error: "))
        .stderr(predicate::function(|err: &str| {
            err.matches("os error").count() == 1 && err.matches("Error:").count() == 1
        }));
}

#[test]
fn compare_reports_status_changes() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "before.csv",
        &[
            "case14,0,0.0,0.0,false,0,14,20,5,0,0,0,0,0,0,0",
            "case30,0,100.0,100.0,true,5,30,41,6,10,10,0,0,0,0,0",
        ],
    );
    write_csv(
        dir.path(),
        "after.csv",
        &[
            "case14,0,50.0,50.0,true,5,14,20,5,5,5,0,0,0,0,0",
            "case30,0,80.0,80.0,true,5,30,41,6,10,10,0,0,0,0,0",
        ],
    );

    bench_cli()
        .args([
            "compare",
            dir.path().join("before.csv").to_str().unwrap(),
            dir.path().join("after.csv").to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("before.csv → after.csv"))
        .stdout(predicate::str::contains("Pass Rate: 50.0% → 100.0% (+50.0%)"))
        .stdout(predicate::str::contains("case14 (now converges!)"))
        .stdout(predicate::str::contains("Avg Performance: -20.0% (faster)"));
}

#[test]
fn config_overrides_file_names() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "custom_opfdata.csv",
        &["s1,0,2.0,2.0,true,3,118,186,54,10,10,0,0.01,0,0,0"],
    );
    let config = dir.path().join("bench.toml");
    fs::write(
        &config,
        "[files]\nsingle_case = \"custom_opfdata.csv\"\nsingle_case_name = \"case118\"\n",
    )
    .unwrap();

    bench_cli()
        .args([
            "--config",
            config.to_str().unwrap(),
            "analyze",
            dir.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("OPFData AC-OPF Benchmark Results (case118)"))
        .stdout(predicate::str::contains("Convergence: 1/1 (100.0%)"));
}

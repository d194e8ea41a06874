// Exact-count scenarios run as subprocesses: each example is a
// single-threaded binary with a registered tracking allocator, so the only
// heap traffic inside a measurement window is the window's own.

use std::process::Command;

// cargo run -p test-tracking --example counters
fn run_example(name: &str) -> String {
    let output = Command::new("cargo")
        .args(["run", "-p", "test-tracking", "--example", name])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Example {name} did not exit successfully.\n\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_lines(stdout: &str, all_expected: &[&str]) {
    for expected in all_expected {
        assert!(
            stdout.contains(expected),
            "Expected:\n{expected}\n\nGot:\n{stdout}",
        );
    }
}

#[test]
fn test_counters_output() {
    let stdout = run_example("counters");

    assert_lines(
        &stdout,
        &[
            "boxed_u32 #new: 1 #delete: 1 #bytes: 4",
            "vec_capacity #new: 1 #delete: 0 #bytes: 100",
            "string_from #new: 1 #delete: 0 #bytes: 30",
            "after_reset #new: 0 #delete: 0 #bytes: 0",
        ],
    );
}

#[test]
fn test_arc_paths_output() {
    let stdout = run_example("arc_paths");

    assert_lines(
        &stdout,
        &[
            "aggregate #new: 1 #delete: 0",
            "split #new: 2 #delete: 1",
            "clones #new: 0 #delete: 0 #bytes: 0",
        ],
    );
}

#[test]
fn test_buffer_resource_output() {
    let stdout = run_example("buffer_resource");

    assert_lines(
        &stdout,
        &[
            "contained: true",
            "identity: true",
            "cross_identity: false",
            "sensor 7 dropped",
            "allocate_called: true",
            "deallocate_called: true",
            "total_allocated: 4",
        ],
    );
}

#[test]
fn test_track_block_output() {
    let stdout = run_example("track_block");

    assert_lines(
        &stdout,
        &[
            "fill_vec #new: 1 #delete: 0 #bytes: 64",
            "strings #new: 2 #delete: 2 #bytes: 9",
        ],
    );
}

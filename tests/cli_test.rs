use std::process::Command;

#[test]
fn local_games_print_a_tally() {
    let output = Command::new("cargo")
        .args([
            "run", "--quiet", "--bin", "submarine", "--", "local", "--games", "2", "--seed", "42",
            "--quiet",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run submarine binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    assert!(stdout.contains("game 1:"));
    assert!(stdout.contains("game 2:"));
}

#[test]
fn server_rejects_bad_field() {
    let output = Command::new("cargo")
        .args([
            "run", "--quiet", "--bin", "submarine", "--", "server", "--port", "0",
            "--field-width", "0",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run submarine binary");
    assert!(!output.status.success());
}

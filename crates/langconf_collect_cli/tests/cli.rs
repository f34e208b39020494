use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const C_NAME: &str = "language-configuration.json";

fn write_text(path: &Path, txt: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, txt).expect("write text");
}

/// Copy the built binary into `dir` so its `resources` lands inside the tempdir.
fn install_binary(dir: &Path) -> PathBuf {
    let path_exe = dir.join("bin").join("copy-language-configuration");
    std::fs::create_dir_all(path_exe.parent().expect("parent")).expect("create bin dir");
    std::fs::copy(env!("CARGO_BIN_EXE_copy-language-configuration"), &path_exe)
        .expect("copy binary");
    path_exe
}

fn run_binary(path_exe: &Path, arg: &Path) -> Output {
    // A freshly written executable can briefly report ETXTBSY while other test
    // threads fork.
    for _ in 0..20 {
        match Command::new(path_exe).arg(arg).output() {
            Ok(output) => return output,
            Err(e) if e.raw_os_error() == Some(26) => {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            Err(e) => panic!("spawn {}: {e}", path_exe.display()),
        }
    }
    panic!("executable stayed busy: {}", path_exe.display());
}

#[test]
fn missing_source_exits_non_zero() {
    let tmp = TempDir::new().expect("tempdir");
    let path_exe = install_binary(tmp.path());

    let output = run_binary(&path_exe, &tmp.path().join("missing"));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
    assert!(!tmp.path().join("bin/resources").exists());
}

#[test]
fn copies_into_resources_next_to_binary() {
    let tmp = TempDir::new().expect("tempdir");
    let path_exe = install_binary(tmp.path());
    let src = tmp.path().join("ext");
    write_text(&src.join(C_NAME), "root");
    write_text(&src.join("syntaxes/rust").join(C_NAME), "rust");
    write_text(&src.join("syntaxes/rust/rust.tmLanguage.json"), "grammar");

    let output = run_binary(&path_exe, &src);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let resources = tmp
        .path()
        .canonicalize()
        .expect("canonicalize")
        .join("bin/resources");
    assert_eq!(
        std::fs::read_to_string(resources.join(C_NAME)).expect("read root"),
        "root"
    );
    assert_eq!(
        std::fs::read_to_string(resources.join("syntaxes/rust").join(C_NAME)).expect("read rust"),
        "rust"
    );
    assert!(!resources.join("syntaxes/rust/rust.tmLanguage.json").exists());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let l_lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(l_lines.len(), 2);
    assert!(l_lines.iter().all(|line| line.starts_with("Copy: ")));
    assert!(l_lines[1].ends_with(&format!("=> {}", resources.join("syntaxes/rust").display())));

    let output_again = run_binary(&path_exe, &src);
    assert!(output_again.status.success());
    assert_eq!(String::from_utf8(output_again.stdout).expect("utf8"), stdout);
}

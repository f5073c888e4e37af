use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const ERROR_MESSAGE: &str = "An error has occurred\n";

/// Run the shell on `script` with an isolated HOME so no user config is picked up.
fn run_script(home: &TempDir, script: impl AsRef<[u8]>) -> Output {
    let path = home.path().join("script.wish");
    fs::write(&path, script).unwrap();
    wish(home, &[path.to_str().unwrap()])
}

fn wish(home: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wish"))
        .args(args)
        .env("HOME", home.path())
        .current_dir(home.path())
        .output()
        .expect("failed to run wish")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

// Startup

#[test]
fn too_many_scripts_exit_with_one() {
    let home = tempfile::tempdir().unwrap();
    let out = wish(&home, &["a.wish", "b.wish"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), ERROR_MESSAGE);
}

#[test]
fn missing_script_exits_with_one() {
    let home = tempfile::tempdir().unwrap();
    let out = wish(&home, &["does-not-exist.wish"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stderr(&out), ERROR_MESSAGE);
}

#[test]
fn malformed_explicit_config_exits_with_one() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "path = 42\n").unwrap();
    let script = home.path().join("empty.wish");
    fs::write(&script, "").unwrap();

    let out = wish(
        &home,
        &["--config", config.to_str().unwrap(), script.to_str().unwrap()],
    );
    assert_eq!(out.status.code(), Some(1));
}

// Running scripts

#[test]
fn end_of_input_exits_with_zero() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "echo hello world\n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "hello world\n");
    assert_eq!(stderr(&out), "");
}

#[test]
fn exit_stops_the_script() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "echo before\nexit\necho after\n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "before\n");
}

#[test]
fn exit_with_argument_is_an_error_and_continues() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "exit 1\necho still here\n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "still here\n");
    assert_eq!(stderr(&out), ERROR_MESSAGE);
}

#[test]
fn errors_do_not_stop_the_shell() {
    let home = tempfile::tempdir().unwrap();
    let script = "no-such-command\ncd\ncd /no/such/dir\nls > a > b\n > out\necho ok\n";
    let out = run_script(&home, script);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "ok\n");
    assert_eq!(stderr(&out), ERROR_MESSAGE.repeat(5));
}

#[test]
fn blank_lines_and_lone_delimiters_are_silent() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "\n   \n\t\n&\n & & \n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), "");
}

#[test]
fn redirect_captures_everything_and_leaves_the_terminal_quiet() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "echo hi > out.txt\nls /no/such/dir > err.txt\n");
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), "");
    assert_eq!(read(&home.path().join("out.txt")), "hi\n");
    assert!(!read(&home.path().join("err.txt")).is_empty());
}

#[test]
fn empty_path_disables_external_commands() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, "path\necho hi\nls\n");
    assert_eq!(stdout(&out), "");
    assert_eq!(stderr(&out), ERROR_MESSAGE.repeat(2));
}

#[test]
fn parallel_commands_all_finish_before_the_next_line() {
    let home = tempfile::tempdir().unwrap();
    let script = "\
echo one > 1.txt & echo two > 2.txt & echo three > 3.txt
cat 1.txt 2.txt 3.txt
";
    let out = run_script(&home, script);
    assert_eq!(stdout(&out), "one\ntwo\nthree\n");
}

#[test]
fn cd_is_visible_to_later_lines() {
    let home = tempfile::tempdir().unwrap();
    fs::create_dir(home.path().join("sub")).unwrap();
    let out = run_script(&home, "cd sub\necho inside > marker\n");
    assert!(out.status.success());
    assert_eq!(read(&home.path().join("sub/marker")), "inside\n");
}

#[test]
fn verbose_errors_from_config() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config/wish");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "verbose_errors = true\n").unwrap();

    let out = run_script(&home, "frobnicate\n");
    assert_eq!(stderr(&out), "wish: frobnicate: command not found\n");
}

#[test]
fn invalid_utf8_line_does_not_stop_the_script() {
    let home = tempfile::tempdir().unwrap();
    let out = run_script(&home, b"echo before\necho \xff\xfe\necho after\n");
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("before\n"));
    assert!(stdout(&out).ends_with("after\n"));
    assert_eq!(stderr(&out), "");
}

#[test]
fn exit_does_not_wait_for_children_on_its_line() {
    let home = tempfile::tempdir().unwrap();
    let started = Instant::now();
    let out = run_script(&home, "sleep 5 > sleep.out & exit\n");
    assert!(out.status.success());
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(stderr(&out), "");
}

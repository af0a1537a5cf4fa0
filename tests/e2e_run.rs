mod support;

use std::fs;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::time::Duration;

use tempfile::tempdir;

use support::{run_volley, spawn_http_server_or_skip};
#[cfg(unix)]
use support::volley_bin;

fn prep_log_path() -> Result<(tempfile::TempDir, PathBuf), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let log_path = dir.path().join("request_logs.txt");
    Ok((dir, log_path))
}

fn run_against(url: &str, requests: &str, log_path: &Path, extra: &[&str]) -> Result<String, String> {
    let mut args = vec![
        "-u".to_owned(),
        url.to_owned(),
        "-n".to_owned(),
        requests.to_owned(),
        "--no-color".to_owned(),
        "--log-file".to_owned(),
        log_path.to_string_lossy().into_owned(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_owned()));

    let output = run_volley(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn e2e_run_basic() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let (_dir, log_path) = prep_log_path()?;

    let stdout = run_against(&url, "5", &log_path, &[])?;
    if !stdout.contains("Total Requests: 5") {
        return Err(format!("Missing total in summary:\n{}", stdout));
    }
    if !stdout.contains("Successful Requests: 5") {
        return Err(format!("Missing successful count in summary:\n{}", stdout));
    }
    if !stdout.contains("Failed Requests: 0") {
        return Err(format!("Missing failed count in summary:\n{}", stdout));
    }

    let log = fs::read_to_string(&log_path).map_err(|err| format!("read log failed: {}", err))?;
    let completed = log
        .lines()
        .filter(|line| line.contains("completed in"))
        .count();
    if completed != 5 {
        return Err(format!("Expected 5 log lines, got {}:\n{}", completed, log));
    }
    Ok(())
}

#[test]
fn e2e_transport_failures_still_exit_zero() -> Result<(), String> {
    let (_dir, log_path) = prep_log_path()?;

    // Port 9 is closed; every attempt is refused, but a completed run with
    // failures is still a successful invocation.
    let stdout = run_against("http://127.0.0.1:9/", "3", &log_path, &[])?;
    if !stdout.contains("Total Requests: 3") {
        return Err(format!("Missing total in summary:\n{}", stdout));
    }
    if !stdout.contains("Failed Requests: 3") {
        return Err(format!("Missing failed count in summary:\n{}", stdout));
    }

    let log = fs::read_to_string(&log_path).map_err(|err| format!("read log failed: {}", err))?;
    let failed = log.lines().filter(|line| line.contains("failed after")).count();
    if failed != 3 {
        return Err(format!("Expected 3 failure lines, got {}:\n{}", failed, log));
    }
    Ok(())
}

#[test]
fn e2e_log_appends_across_runs() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let (_dir, log_path) = prep_log_path()?;

    run_against(&url, "2", &log_path, &[])?;
    run_against(&url, "2", &log_path, &[])?;

    let log = fs::read_to_string(&log_path).map_err(|err| format!("read log failed: {}", err))?;
    let lines = log.lines().count();
    if lines != 4 {
        return Err(format!("Expected 4 appended lines, got {}:\n{}", lines, log));
    }
    Ok(())
}

#[test]
fn e2e_jsonl_log_is_parseable() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let (_dir, log_path) = prep_log_path()?;

    run_against(&url, "3", &log_path, &["--log-format", "jsonl"])?;

    let log = fs::read_to_string(&log_path).map_err(|err| format!("read log failed: {}", err))?;
    let mut parsed = 0usize;
    for line in log.lines() {
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|err| format!("bad jsonl line: {}", err))?;
        if value.get("outcome").and_then(serde_json::Value::as_str) != Some("success") {
            return Err(format!("Unexpected outcome in line: {}", line));
        }
        parsed = parsed.saturating_add(1);
    }
    if parsed != 3 {
        return Err(format!("Expected 3 jsonl lines, got {}", parsed));
    }
    Ok(())
}

#[test]
fn e2e_zero_requests_completes_immediately() -> Result<(), String> {
    let (_dir, log_path) = prep_log_path()?;

    let stdout = run_against("http://127.0.0.1:9/", "0", &log_path, &[])?;
    if !stdout.contains("Total Requests: 0") {
        return Err(format!("Missing zero total in summary:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_rejects_an_invalid_url() -> Result<(), String> {
    let (_dir, log_path) = prep_log_path()?;

    if run_against("not a url", "1", &log_path, &[]).is_ok() {
        return Err("Expected an invalid URL to fail the invocation.".to_owned());
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_interrupt_exits_130_without_summary() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };
    let (_dir, log_path) = prep_log_path()?;
    let log_arg = log_path.to_string_lossy().into_owned();

    // A long paced run so the signal lands mid-dispatch.
    let bin = volley_bin()?;
    let mut child = std::process::Command::new(bin)
        .args([
            "-u",
            url.as_str(),
            "-n",
            "50",
            "--interval",
            "200ms",
            "--no-color",
            "--log-file",
            log_arg.as_str(),
        ])
        .env("RUST_LOG", "error")
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|err| format!("spawn volley failed: {}", err))?;

    std::thread::sleep(Duration::from_millis(800));

    let pid = child.id().to_string();
    let kill = std::process::Command::new("kill")
        .args(["-INT", pid.as_str()])
        .status()
        .map_err(|err| format!("send SIGINT failed: {}", err))?;
    if !kill.success() {
        return Err("kill -INT did not succeed".to_owned());
    }

    let output = child
        .wait_with_output()
        .map_err(|err| format!("wait for volley failed: {}", err))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.code() != Some(130) {
        return Err(format!(
            "Expected exit code 130, got {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            stdout,
            stderr
        ));
    }
    if !stderr.contains("Load test stopped.") {
        return Err(format!("Missing interrupt notice on stderr:\n{}", stderr));
    }
    if stdout.contains("Total Requests:") {
        return Err(format!(
            "An interrupted run must not print a summary:\n{}",
            stdout
        ));
    }
    Ok(())
}

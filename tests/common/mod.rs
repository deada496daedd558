#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tempfile::TempDir;

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

impl CmdResult {
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// First stdout line parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        let line = self.stdout.lines().next().unwrap_or_default();
        serde_json::from_str(line).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({e}); log: {}",
                self.log_path.display()
            )
        })
    }
}

/// An isolated HOME so runs never read or write the developer's files.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create sandbox"),
        }
    }

    pub fn home(&self) -> &Path {
        self.dir.path()
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.home().join(".config/folio/preferences.json")
    }

    pub fn activity_log(&self) -> PathBuf {
        self.home().join(".local/share/folio/activity.jsonl")
    }

    /// Write `contents` to `name` inside the sandbox and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn run(&self, case_name: &str, args: &[&str]) -> CmdResult {
        self.run_with_env(case_name, args, &[])
    }

    pub fn run_with_env(&self, case_name: &str, args: &[&str], env: &[(&str, &str)]) -> CmdResult {
        let bin_path = resolve_bin_path();
        let mut command = Command::new(&bin_path);
        command
            .args(args)
            .env("HOME", self.home())
            .env("RUST_BACKTRACE", "1")
            .env_remove("NO_COLOR");
        for (key, _) in std::env::vars() {
            if key.starts_with("FOLIO_") {
                command.env_remove(key);
            }
        }
        for (key, value) in env {
            command.env(key, value);
        }
        let output = command.output().expect("execute folio command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let mut log_content = String::new();
        let _ = writeln!(log_content, "case={case_name}");
        let _ = writeln!(log_content, "bin={}", bin_path.display());
        let _ = writeln!(log_content, "args={args:?}");
        let _ = writeln!(log_content, "env={env:?}");
        let _ = writeln!(log_content, "status={}", output.status);
        log_content.push_str("----- stdout -----\n");
        log_content.push_str(&stdout);
        log_content.push_str("\n----- stderr -----\n");
        log_content.push_str(&stderr);
        log_content.push('\n');
        let log_path = self.home().join(format!("{}.log", sanitize(case_name)));
        fs::write(&log_path, log_content).expect("write test log");

        CmdResult {
            status: output.status,
            stdout,
            stderr,
            log_path,
        }
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_folio") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) { "folio.exe" } else { "folio" };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve folio binary path for integration test"),
    }
}

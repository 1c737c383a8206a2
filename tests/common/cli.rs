use assert_cmd::Command;
use std::ffi::OsStr;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug)]
pub struct FtRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

pub struct FtWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl FtWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Run `ft init` with a standard key and grants.
    pub fn init(&self) -> FtRun {
        run_ft(
            self,
            [
                "init",
                "--key",
                "K",
                "--editor",
                "lead@example.com",
                "--viewer",
                "watchers@example.com",
            ],
        )
    }
}

pub fn run_ft<I, S>(workspace: &FtWorkspace, args: I) -> FtRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ft"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env("RUST_LOG", "formtrack=debug");
    cmd.env("RUST_BACKTRACE", "1");
    cmd.env_remove("FORMTRACK_CONFIG");
    cmd.env_remove("FORMTRACK_DB");

    let output = cmd.output().expect("run ft");
    FtRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}

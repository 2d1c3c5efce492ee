//! End-to-end tests for the full command workflows.
//!
//! Each test builds an isolated rotki root (`data/` + `develop_data/`) in a
//! temp directory, points the binary at it through `devtool.toml`, and runs
//! real commands against it.
//!
//! # What is tested
//!
//! - `backup` followed by `restore` reproduces the original tree exactly.
//! - `restore` discards whatever the target held before.
//! - Archive names carry a 14-digit UTC timestamp and `.dev` only with `--dev`.
//! - `sync-user` with an unknown user exits non-zero and changes nothing.
//! - `sync-user` only touches `global_data` with `--include-global`.
//! - `new-user` registers credentials only for variables that are set,
//!   including ones coming from `.env`.
//! - `zip-account` archives a single user directory.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

const BIN: &str = env!("CARGO_BIN_EXE_rotki-devtool");

/// Every variable `new-user` reads; cleared so the host environment cannot leak in.
const CREDENTIAL_VARS: &[&str] = &[
    "ROTKI_API_KEY",
    "ROTKI_API_SECRET",
    "CRYPTOCOMPARE_API_KEY",
    "ETHERSCAN_API_KEY",
    "OPTIMISM_ETHERSCAN_API_KEYS",
];

// ─── Fixture ──────────────────────────────────────────────────────────────────

/// A self-contained rotki root plus a working directory holding the config.
struct Fixture {
    /// Root temp dir: everything lives under here; deleted on drop.
    _root: tempfile::TempDir,
    pub prod: PathBuf,
    pub dev: PathBuf,
    pub backups: PathBuf,
    pub work_dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let data_root = root.path().join("rotki");
        let prod = data_root.join("data");
        let dev = data_root.join("develop_data");
        let backups = root.path().join("backups");
        let work_dir = root.path().join("work");

        fs::create_dir_all(prod.join("alice/nested")).unwrap();
        fs::write(prod.join("alice/rotkehlchen.db"), [1u8, 2, 3, 4]).unwrap();
        fs::write(prod.join("alice/nested/notes.txt"), "alice notes").unwrap();
        fs::create_dir_all(prod.join("global_data")).unwrap();
        fs::write(prod.join("global_data/global.db"), "prod-global").unwrap();
        fs::write(prod.join("rotkehlchen.log"), "log").unwrap();

        fs::create_dir_all(dev.join("global_data")).unwrap();
        fs::write(dev.join("global_data/global.db"), "dev-global").unwrap();

        fs::create_dir_all(&work_dir).unwrap();
        fs::write(
            work_dir.join("devtool.toml"),
            format!(
                "[paths]\ndata_root = {:?}\nbackup_dir = {:?}\n",
                data_root.display().to_string(),
                backups.display().to_string()
            ),
        )
        .unwrap();

        Self {
            _root: root,
            prod,
            dev,
            backups,
            work_dir,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.args(args)
            .current_dir(&self.work_dir)
            .env("XDG_CONFIG_HOME", self.work_dir.join(".config"))
            .env_remove("RUST_LOG");
        for var in CREDENTIAL_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    fn run_with(&self, args: &[&str], env: &[(&str, &str)]) -> (bool, String, String) {
        let mut cmd = self.command(args);
        for (k, v) in env {
            cmd.env(k, v);
        }
        let out = cmd
            .output()
            .unwrap_or_else(|e| panic!("failed to spawn {BIN}: {e}"));
        (
            out.status.success(),
            String::from_utf8_lossy(&out.stdout).into_owned(),
            String::from_utf8_lossy(&out.stderr).into_owned(),
        )
    }

    fn run(&self, args: &[&str]) -> (bool, String, String) {
        self.run_with(args, &[])
    }

    /// The single archive in the backup directory.
    fn only_archive(&self) -> PathBuf {
        let entries: Vec<PathBuf> = fs::read_dir(&self.backups)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1, "expected one archive, got {entries:?}");
        entries.into_iter().next().unwrap()
    }

    fn account(&self, username: &str) -> serde_json::Value {
        let text = fs::read_to_string(self.dev.join(username).join("account.json")).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

/// Relative path → file contents for every file under `root`.
fn tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).unwrap().to_path_buf();
                out.insert(rel, fs::read(&path).unwrap());
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

/// `<prefix><YYYYMMDD_HHMMSS><suffix>` with exactly fourteen digits.
fn assert_timestamped(name: &str, prefix: &str, suffix: &str) {
    let middle = name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .unwrap_or_else(|| panic!("{name} does not match {prefix}…{suffix}"));
    let (date, time) = middle
        .split_once('_')
        .unwrap_or_else(|| panic!("{middle} has no date/time separator"));
    assert_eq!(date.len(), 8, "{name}");
    assert_eq!(time.len(), 6, "{name}");
    assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()), "{name}");
}

// ─── backup / restore ─────────────────────────────────────────────────────────

#[test]
fn backup_then_restore_round_trips() {
    let f = Fixture::new();
    let original = tree(&f.prod);

    let (ok, _, stderr) = f.run(&["backup"]);
    assert!(ok, "backup failed: {stderr}");
    let archive = f.only_archive();
    assert_timestamped(
        &archive.file_name().unwrap().to_string_lossy(),
        "rotki_data_",
        ".zip",
    );

    // Wreck the directory, then restore over it.
    fs::remove_dir_all(f.prod.join("alice")).unwrap();
    fs::write(f.prod.join("junk.txt"), "junk").unwrap();

    let (ok, _, stderr) = f.run(&["restore", "--file", archive.to_str().unwrap()]);
    assert!(ok, "restore failed: {stderr}");
    assert_eq!(tree(&f.prod), original);
}

#[test]
fn restore_into_dev_replaces_dev_contents() {
    let f = Fixture::new();
    f.run(&["backup"]);
    let archive = f.only_archive();

    let (ok, _, stderr) = f.run(&["restore", "--file", archive.to_str().unwrap(), "--dev"]);
    assert!(ok, "restore failed: {stderr}");

    assert_eq!(tree(&f.dev), tree(&f.prod));
}

#[test]
fn dev_backup_has_dev_suffix() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run(&["backup", "--dev"]);
    assert!(ok, "backup --dev failed: {stderr}");
    assert_timestamped(
        &f.only_archive().file_name().unwrap().to_string_lossy(),
        "rotki_data_",
        ".dev.zip",
    );
}

#[test]
fn corrupt_archive_does_not_delete_target() {
    let f = Fixture::new();
    let bogus = f.work_dir.join("bogus.zip");
    fs::write(&bogus, "not a zip").unwrap();
    let before = tree(&f.prod);

    let (ok, _, _) = f.run(&["restore", "--file", bogus.to_str().unwrap()]);
    assert!(!ok);
    assert_eq!(tree(&f.prod), before);
}

// ─── sync-user ────────────────────────────────────────────────────────────────

#[test]
fn sync_user_copies_user_only() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run(&["sync-user", "--username", "alice"]);
    assert!(ok, "sync-user failed: {stderr}");

    assert_eq!(tree(&f.dev.join("alice")), tree(&f.prod.join("alice")));
    assert_eq!(
        fs::read_to_string(f.dev.join("global_data/global.db")).unwrap(),
        "dev-global"
    );
}

#[test]
fn sync_user_include_global_copies_global_data() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run(&["sync-user", "--username", "alice", "--include-global"]);
    assert!(ok, "sync-user failed: {stderr}");
    assert_eq!(
        fs::read_to_string(f.dev.join("global_data/global.db")).unwrap(),
        "prod-global"
    );
}

#[test]
fn sync_unknown_user_fails_without_changes() {
    let f = Fixture::new();
    let before = tree(&f.dev);

    let (ok, _, stderr) = f.run(&["sync-user", "--username", "nobody", "--include-global"]);

    assert!(!ok, "unknown user must exit non-zero");
    assert!(stderr.contains("does not exist"), "got: {stderr}");
    assert_eq!(tree(&f.dev), before);
}

// ─── new-user ─────────────────────────────────────────────────────────────────

#[test]
fn new_user_without_env_has_no_credentials() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run(&["new-user", "--username", "dev1"]);
    assert!(ok, "new-user failed: {stderr}");

    let account = f.account("dev1");
    assert_eq!(account["username"], "dev1");
    assert_eq!(account["settings"]["premium_should_sync"], false);
    assert_eq!(account["settings"]["submit_usage_analytics"], false);
    assert!(account["premium"].is_null());
    assert_eq!(account["external_services"], serde_json::json!([]));
    assert!(!account["rpc_nodes"].as_array().unwrap().is_empty());
}

#[test]
fn new_user_registers_premium_from_env() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run_with(&["new-user", "--username", "dev2"], &[
        ("ROTKI_API_KEY", "the-key"),
        ("ROTKI_API_SECRET", "the-secret"),
    ]);
    assert!(ok, "new-user failed: {stderr}");

    let account = f.account("dev2");
    assert_eq!(account["premium"]["api_key"], "the-key");
    assert_eq!(account["premium"]["api_secret"], "the-secret");
}

#[test]
fn new_user_reads_dotenv_file() {
    let f = Fixture::new();
    fs::write(
        f.work_dir.join(".env"),
        "ETHERSCAN_API_KEY=from-dotenv\nOPTIMISM_ETHERSCAN_API_KEYS=op-key\n",
    )
    .unwrap();

    let (ok, _, stderr) = f.run(&["new-user", "--username", "dev3"]);
    assert!(ok, "new-user failed: {stderr}");

    let account = f.account("dev3");
    assert_eq!(
        account["external_services"],
        serde_json::json!([
            { "service": "etherscan", "api_key": "from-dotenv" },
            { "service": "optimism_etherscan", "api_key": "op-key" },
        ])
    );
    assert!(account["premium"].is_null());
}

#[test]
fn new_user_twice_fails() {
    let f = Fixture::new();
    assert!(f.run(&["new-user", "--username", "dev4"]).0);
    let (ok, _, stderr) = f.run(&["new-user", "--username", "dev4"]);
    assert!(!ok);
    assert!(stderr.contains("already exists"), "got: {stderr}");
}

// ─── zip-account ──────────────────────────────────────────────────────────────

#[test]
fn zip_account_archives_single_user() {
    let f = Fixture::new();
    let (ok, _, stderr) = f.run(&["zip-account", "--username", "alice"]);
    assert!(ok, "zip-account failed: {stderr}");

    let archive = f.only_archive();
    assert_timestamped(
        &archive.file_name().unwrap().to_string_lossy(),
        "rotki_alice_",
        ".zip",
    );

    // Restoring the user archive into dev reproduces the user tree at the root.
    let (ok, _, stderr) = f.run(&["restore", "--file", archive.to_str().unwrap(), "--dev"]);
    assert!(ok, "restore failed: {stderr}");
    assert_eq!(tree(&f.dev), tree(&f.prod.join("alice")));
}

#[test]
fn zip_account_unknown_user_fails() {
    let f = Fixture::new();
    let (ok, _, _) = f.run(&["zip-account", "--username", "nobody", "--dev"]);
    assert!(!ok);
    assert!(!f.backups.exists());
}

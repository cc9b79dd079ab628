// Commit and push past-day log files for this host. Today's file is left alone
// so the repository sees one commit per finished day, not one per probe round.
// Nothing here may fail the caller: every git error is logged and ends the sync.

use std::path::{Component, Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::log_writer::{LOG_FILE_PREFIX, LOG_FILE_SUFFIX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitSyncOutcome {
    NothingToDo,
    StatusFailed,
    LogsOutsideRepo,
    AddFailed,
    CommitFailed,
    PushFailed,
    Pushed(usize),
}

/// Changed `connectivity_log_*.txt` files under `<logs_dir>/<hostname>/`
/// from `git status --porcelain` output, excluding `today_file`.
pub fn find_past_day_log_files(
    git_status: &str,
    logs_dir: &str,
    hostname: &str,
    today_file: &str,
) -> Vec<String> {
    let prefix = format!("{}/{}", host_path(logs_dir, hostname), LOG_FILE_PREFIX);
    git_status
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                return None;
            }
            parts.last().copied()
        })
        .filter(|path| path.starts_with(&prefix) && path.ends_with(LOG_FILE_SUFFIX) && *path != today_file)
        .map(str::to_string)
        .collect()
}

/// Repo-relative path of a day's log file, `/`-separated as git prints it.
pub fn repo_log_file(logs_dir: &str, hostname: &str, date: NaiveDate) -> String {
    format!(
        "{}/{}{}{}",
        host_path(logs_dir, hostname),
        LOG_FILE_PREFIX,
        date.format("%Y%m%d"),
        LOG_FILE_SUFFIX
    )
}

/// `<logs_dir>/<host>`, or just `<host>` when the logs live at the repo root.
fn host_path(logs_dir: &str, hostname: &str) -> String {
    let logs_dir = logs_dir.trim_start_matches("./").trim_end_matches('/');
    if logs_dir.is_empty() || logs_dir == "." {
        hostname.to_string()
    } else {
        format!("{}/{}", logs_dir, hostname)
    }
}

pub fn commit_message(hostname: &str) -> String {
    format!("Add connectivity log entries for past days - {}", hostname)
}

/// `path` relative to `repo_root` as git prints it (`/`-separated, no `./`).
/// `None` when `path` lies outside the repository or is not valid UTF-8.
/// Both paths are expected to be canonical.
pub fn repo_relative_path(repo_root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(repo_root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

fn git(repo_dir: &Path, args: &[&str]) -> Result<String, String> {
    match Command::new("git").args(args).current_dir(repo_dir).output() {
        Ok(out) if out.status.success() => Ok(String::from_utf8_lossy(&out.stdout).into_owned()),
        Ok(out) => Err(format!(
            "git {} exited with {}: {}",
            args.first().unwrap_or(&""),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        )),
        Err(e) => Err(format!("git not runnable: {}", e)),
    }
}

/// Stages, commits, pulls (rebase) and pushes changed past-day logs.
/// A relative `logs_dir` is taken relative to `repo_dir`; `repo_dir` may be
/// anywhere inside the working tree.
pub fn push_logs_to_git(
    repo_dir: &Path,
    logs_dir: &Path,
    hostname: &str,
    today: NaiveDate,
) -> GitSyncOutcome {
    let top = match git(repo_dir, &["rev-parse", "--show-toplevel"]) {
        Ok(s) => PathBuf::from(s.trim()),
        Err(e) => {
            debug!(error = %e, "git status check failed");
            return GitSyncOutcome::StatusFailed;
        }
    };
    let top = top.canonicalize().unwrap_or(top);

    let logs_abs = if logs_dir.is_absolute() {
        logs_dir.to_path_buf()
    } else {
        repo_dir.join(logs_dir)
    };
    let logs_abs = match logs_abs.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            debug!(dir = %logs_abs.display(), error = %e, "logs directory not found");
            return GitSyncOutcome::NothingToDo;
        }
    };
    let Some(rel_logs) = repo_relative_path(&top, &logs_abs) else {
        warn!(
            logs_dir = %logs_abs.display(),
            repo = %top.display(),
            "logs directory is outside the git repository, skipping push"
        );
        return GitSyncOutcome::LogsOutsideRepo;
    };

    let today_file = repo_log_file(&rel_logs, hostname, today);
    let host_dir = format!("{}/", host_path(&rel_logs, hostname));
    let status = match git(&top, &["status", "--porcelain", "--untracked-files=all", &host_dir]) {
        Ok(s) => s,
        Err(e) => {
            debug!(error = %e, "git status check failed");
            return GitSyncOutcome::StatusFailed;
        }
    };
    if status.trim().is_empty() {
        return GitSyncOutcome::NothingToDo;
    }

    let files = find_past_day_log_files(&status, &rel_logs, hostname, &today_file);
    if files.is_empty() {
        return GitSyncOutcome::NothingToDo;
    }
    debug!(files = ?files, "found past day log files to push");

    for file in &files {
        if let Err(e) = git(&top, &["add", file]) {
            debug!(error = %e, file = %file, "git add failed");
            return GitSyncOutcome::AddFailed;
        }
    }

    if let Err(e) = git(&top, &["commit", "-m", &commit_message(hostname)]) {
        debug!(error = %e, "git commit failed (possibly no changes)");
        return GitSyncOutcome::CommitFailed;
    }

    if let Err(e) = git(&top, &["pull", "--rebase"]) {
        debug!(error = %e, "git pull failed (possibly network issue)");
    }
    if let Err(e) = git(&top, &["push"]) {
        debug!(error = %e, "git push failed (possibly network issue)");
        return GitSyncOutcome::PushFailed;
    }

    info!(files = files.len(), "pushed past day log files");
    GitSyncOutcome::Pushed(files.len())
}

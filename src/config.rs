// Command-line arguments and the validated configuration built from them

use crate::filter::StatusFilter;
use crate::models::parse_due_date;
use crate::store::DEFAULT_FILE;
use chrono::{DateTime, FixedOffset};
use clap::{ArgGroup, Parser};
use eyre::{Result, eyre};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "todo")]
#[command(about = "To-do list manager backed by a local JSON file")]
#[command(version)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["view", "add", "update", "delete"]),
))]
pub struct Cli {
    /// View tasks
    #[arg(short = 'v', long)]
    pub view: bool,

    /// Add a task (requires --content, --tag and --due)
    #[arg(short = 'a', long)]
    pub add: bool,

    /// Mark a task as done (requires --id)
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Delete a task (requires --id)
    #[arg(short = 'd', long)]
    pub delete: bool,

    /// View filter (0: all, 1: done, 2: not done)
    #[arg(short = 'f', long, default_value = "0")]
    pub filter: StatusFilter,

    /// Task id
    #[arg(short = 'i', long)]
    pub id: Option<u64>,

    /// Task content
    #[arg(short = 'c', long)]
    pub content: Option<String>,

    /// Task tag
    #[arg(short = 't', long)]
    pub tag: Option<String>,

    /// Task due date (yyyy-mm-dd hh:mm:ss)
    #[arg(long)]
    pub due: Option<String>,

    /// Path to the task file
    #[arg(long, env = "TODO_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    View {
        filter: StatusFilter,
    },
    Add {
        content: String,
        tag: String,
        due: DateTime<FixedOffset>,
    },
    Complete {
        id: u64,
    },
    Delete {
        id: u64,
    },
}

/// Validated configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: PathBuf,
    pub action: Action,
}

impl TryFrom<Cli> for Config {
    type Error = eyre::Report;

    fn try_from(cli: Cli) -> Result<Self> {
        let action = if cli.view {
            Action::View { filter: cli.filter }
        } else if cli.add {
            let content = required_text(cli.content, "No content.")?;
            let tag = required_text(cli.tag, "No tag.")?;
            let due = required_text(cli.due, "No duedate.")?;
            Action::Add {
                content,
                tag,
                due: parse_due_date(&due)?,
            }
        } else if cli.update {
            Action::Complete {
                id: cli.id.ok_or_else(|| eyre!("No ID."))?,
            }
        } else if cli.delete {
            Action::Delete {
                id: cli.id.ok_or_else(|| eyre!("No ID."))?,
            }
        } else {
            // The required arg group makes this unreachable through clap
            return Err(eyre!("No action given (use -v, -a, -u or -d)"));
        };

        Ok(Config { file: cli.file, action })
    }
}

/// Rewrite the single-dash `-due` spelling to `--due`
///
/// clap would otherwise read `-due` as the bundled shorts `-d -u -e`.
/// Values that merely start with `-due` (e.g. `-c -due`) are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut takes_value = false;

    for arg in args {
        let normalized = match arg.to_str() {
            Some("-due") if !takes_value => OsString::from("--due"),
            Some(s) if !takes_value && s.starts_with("-due=") => OsString::from(format!("-{}", s)),
            _ => arg,
        };

        takes_value = !takes_value
            && matches!(
                normalized.to_str(),
                Some("-c" | "--content" | "-t" | "--tag" | "-i" | "--id" | "-f" | "--filter" | "--due" | "--file")
            );
        out.push(normalized);
    }

    out
}

fn required_text(value: Option<String>, missing: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(eyre!(missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["todo"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        Config::try_from(cli)
    }

    #[test]
    fn test_view_defaults_to_all() {
        let cfg = config(&["-v", "--file", "tasks.json"]).unwrap();
        assert_eq!(cfg.file, PathBuf::from("tasks.json"));
        assert_eq!(
            cfg.action,
            Action::View {
                filter: StatusFilter::All
            }
        );
    }

    #[test]
    fn test_view_with_filter() {
        let cfg = config(&["-v", "-f", "2", "--file", "t.json"]).unwrap();
        assert_eq!(
            cfg.action,
            Action::View {
                filter: StatusFilter::NotDone
            }
        );
    }

    #[test]
    fn test_invalid_filter_rejected_by_parser() {
        assert!(Cli::try_parse_from(["todo", "-v", "-f", "3"]).is_err());
    }

    #[test]
    fn test_mode_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["todo"]).is_err());
        assert!(Cli::try_parse_from(["todo", "-v", "-d", "-i", "1"]).is_err());
    }

    #[test]
    fn test_add() {
        let cfg = config(&[
            "-a",
            "-c",
            "Buy milk",
            "-t",
            "errand",
            "--due",
            "2025-01-01 10:00:00",
            "--file",
            "t.json",
        ])
        .unwrap();

        match cfg.action {
            Action::Add { content, tag, due } => {
                assert_eq!(content, "Buy milk");
                assert_eq!(tag, "errand");
                assert_eq!(due, parse_due_date("2025-01-01 10:00:00").unwrap());
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_add_missing_inputs() {
        let err = config(&["-a", "-t", "x", "--due", "2025-01-01 10:00:00"]).unwrap_err();
        assert_eq!(err.to_string(), "No content.");

        let err = config(&["-a", "-c", "x", "--due", "2025-01-01 10:00:00"]).unwrap_err();
        assert_eq!(err.to_string(), "No tag.");

        let err = config(&["-a", "-c", "x", "-t", "y"]).unwrap_err();
        assert_eq!(err.to_string(), "No duedate.");

        let err = config(&["-a", "-c", "  ", "-t", "y", "--due", "2025-01-01 10:00:00"]).unwrap_err();
        assert_eq!(err.to_string(), "No content.");
    }

    #[test]
    fn test_add_malformed_due_date() {
        let err = config(&["-a", "-c", "x", "-t", "y", "--due", "2025/01/01"]).unwrap_err();
        assert!(err.to_string().contains("Invalid duedate"));
    }

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_single_dash_due_is_accepted() {
        assert_eq!(
            normalized(&["todo", "-a", "-due", "2025-01-01 10:00:00"]),
            vec!["todo", "-a", "--due", "2025-01-01 10:00:00"]
        );
        assert_eq!(
            normalized(&["todo", "-a", "-due=2025-01-01 10:00:00"]),
            vec!["todo", "-a", "--due=2025-01-01 10:00:00"]
        );

        let argv = normalize_args(
            ["todo", "-a", "-c", "Buy milk", "-t", "errand", "-due", "2025-01-01 10:00:00"]
                .into_iter()
                .map(OsString::from),
        );
        let cfg = Config::try_from(Cli::try_parse_from(argv).unwrap()).unwrap();
        match cfg.action {
            Action::Add { due, .. } => assert_eq!(due, parse_due_date("2025-01-01 10:00:00").unwrap()),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        // "-due" given as the content itself is not a flag
        assert_eq!(
            normalized(&["todo", "-a", "-c", "-due", "-t", "x"]),
            vec!["todo", "-a", "-c", "-due", "-t", "x"]
        );
        assert_eq!(normalized(&["todo", "-d", "-u"]), vec!["todo", "-d", "-u"]);
    }

    #[test]
    fn test_update_and_delete_require_id() {
        assert_eq!(config(&["-u"]).unwrap_err().to_string(), "No ID.");
        assert_eq!(config(&["-d"]).unwrap_err().to_string(), "No ID.");

        assert_eq!(config(&["-u", "-i", "0"]).unwrap().action, Action::Complete { id: 0 });
        assert_eq!(config(&["-d", "-i", "3"]).unwrap().action, Action::Delete { id: 3 });
    }
}

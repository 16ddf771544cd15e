// View-time filtering by completion status

use crate::models::Task;
use std::str::FromStr;

/// Which tasks a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,     // 0
    Done,    // 1
    NotDone, // 2
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Done => task.done,
            StatusFilter::NotDone => !task.done,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "all" => Ok(StatusFilter::All),
            "1" | "done" => Ok(StatusFilter::Done),
            "2" | "todo" => Ok(StatusFilter::NotDone),
            other => Err(format!(
                "invalid filter {:?} (0: all, 1: done, 2: not done)",
                other
            )),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Done => write!(f, "done"),
            StatusFilter::NotDone => write!(f, "todo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_due_date;

    fn task(done: bool) -> Task {
        let ts = parse_due_date("2025-01-01 10:00:00").unwrap();
        let mut task = Task::new(0, "content", "tag", ts, ts);
        task.done = done;
        task
    }

    #[test]
    fn test_filter_matches() {
        let open = task(false);
        let closed = task(true);

        assert!(StatusFilter::All.matches(&open));
        assert!(StatusFilter::All.matches(&closed));
        assert!(StatusFilter::Done.matches(&closed));
        assert!(!StatusFilter::Done.matches(&open));
        assert!(StatusFilter::NotDone.matches(&open));
        assert!(!StatusFilter::NotDone.matches(&closed));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!("0".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("1".parse::<StatusFilter>().unwrap(), StatusFilter::Done);
        assert_eq!("2".parse::<StatusFilter>().unwrap(), StatusFilter::NotDone);
        assert_eq!("Done".parse::<StatusFilter>().unwrap(), StatusFilter::Done);
        assert_eq!("todo".parse::<StatusFilter>().unwrap(), StatusFilter::NotDone);
        assert!("3".parse::<StatusFilter>().is_err());
        assert!("".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(StatusFilter::All.to_string(), "all");
        assert_eq!(StatusFilter::NotDone.to_string(), "todo");
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }
}

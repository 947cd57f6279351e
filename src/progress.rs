//! Fire-and-forget quest progress reporting.
//!
//! Screens call [`ProgressReporter::report`] when a game finishes. The report
//! is posted onto a channel and handled by a worker thread that owns the
//! [`ProgressSink`]. Failures are logged and dropped. The game never waits
//! on the result, and nothing is retried.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::config::Player;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestType {
    CompleteGames,
    EarnStars,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub parent_id: String,
    pub child_id: String,
    pub quest: QuestType,
    pub increment: u32,
}

/// Where progress reports end up.
pub trait ProgressSink: Send + 'static {
    fn increment_quest_progress(&mut self, report: &ProgressReport) -> Result<()>;
}

/// Appends each report as a JSON line to a local ledger file.
pub struct LedgerSink {
    path: PathBuf,
}

#[derive(Serialize, Deserialize)]
pub struct LedgerEntry {
    pub recorded_at: u64,
    #[serde(flatten)]
    pub report: ProgressReport,
}

impl LedgerSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressSink for LedgerSink {
    fn increment_quest_progress(&mut self, report: &ProgressReport) -> Result<()> {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let line = serde_json::to_string(&LedgerEntry { recorded_at, report: report.clone() })?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProgressReporter {
    tx: Option<mpsc::Sender<ProgressReport>>,
    /// Disconnects once the worker has drained the channel and exited.
    done: Option<Arc<Mutex<mpsc::Receiver<()>>>>,
    player: Player,
}

impl ProgressReporter {
    /// Start a worker thread draining reports into `sink`.
    pub fn spawn<S: ProgressSink>(mut sink: S, player: Player) -> Self {
        let (tx, rx) = mpsc::channel::<ProgressReport>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let spawned = thread::Builder::new()
            .name("progress".into())
            .spawn(move || {
                let _done = done_tx;
                for report in rx {
                    if let Err(err) = sink.increment_quest_progress(&report) {
                        log::warn!("progress report {:?} failed: {err}", report.quest);
                    }
                }
            });
        match spawned {
            Ok(_) => Self {
                tx: Some(tx),
                done: Some(Arc::new(Mutex::new(done_rx))),
                player,
            },
            Err(err) => {
                log::warn!("could not start progress worker: {err}");
                Self::disabled(player)
            }
        }
    }

    /// A reporter that drops every report without starting a worker.
    pub fn disabled(player: Player) -> Self {
        Self { tx: None, done: None, player }
    }

    /// Close this handle and give the worker up to `grace` to flush what is
    /// queued. Other clones must be dropped first or the wait runs out.
    pub fn shutdown(self, grace: Duration) {
        let Self { tx, done, .. } = self;
        drop(tx);
        let Some(done) = done else { return };
        let Ok(done) = done.lock() else { return };
        if let Err(mpsc::RecvTimeoutError::Timeout) = done.recv_timeout(grace) {
            log::warn!("progress worker still busy after {grace:?}; queued reports may be lost");
        }
    }

    pub fn report(&self, quest: QuestType, increment: u32) {
        if increment == 0 {
            return;
        }
        let Some(tx) = &self.tx else { return };
        let report = ProgressReport {
            parent_id: self.player.parent_id.clone(),
            child_id: self.player.child_id.clone(),
            quest,
            increment,
        };
        log::debug!("dispatching progress {:?} +{}", quest, increment);
        // Worker gone means reporting is off for the rest of the run.
        let _ = tx.send(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct ChannelSink(mpsc::Sender<ProgressReport>);

    impl ProgressSink for ChannelSink {
        fn increment_quest_progress(&mut self, report: &ProgressReport) -> Result<()> {
            let _ = self.0.send(report.clone());
            Ok(())
        }
    }

    struct FailingSink(mpsc::Sender<()>);

    impl ProgressSink for FailingSink {
        fn increment_quest_progress(&mut self, _report: &ProgressReport) -> Result<()> {
            let _ = self.0.send(());
            Err(Error::InvalidConfig("backend unavailable".into()))
        }
    }

    fn player() -> Player {
        Player { parent_id: "parent-1".into(), child_id: "kid-7".into() }
    }

    #[test]
    fn reports_reach_the_sink() {
        let (tx, rx) = mpsc::channel();
        let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
        reporter.report(QuestType::CompleteGames, 1);
        let got = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            got,
            ProgressReport {
                parent_id: "parent-1".into(),
                child_id: "kid-7".into(),
                quest: QuestType::CompleteGames,
                increment: 1,
            }
        );
    }

    #[test]
    fn zero_increment_is_not_sent() {
        let (tx, rx) = mpsc::channel();
        let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
        reporter.report(QuestType::EarnStars, 0);
        reporter.report(QuestType::EarnStars, 2);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap().increment, 2);
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let (tx, rx) = mpsc::channel();
        let reporter = ProgressReporter::spawn(FailingSink(tx), player());
        reporter.report(QuestType::CompleteGames, 1);
        reporter.report(QuestType::CompleteGames, 1);
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
    }

    #[test]
    fn disabled_reporter_is_a_no_op() {
        let reporter = ProgressReporter::disabled(player());
        reporter.report(QuestType::CompleteGames, 1);
        reporter.shutdown(Duration::from_millis(10));
    }

    struct SlowSink(mpsc::Sender<ProgressReport>);

    impl ProgressSink for SlowSink {
        fn increment_quest_progress(&mut self, report: &ProgressReport) -> Result<()> {
            thread::sleep(Duration::from_millis(150));
            let _ = self.0.send(report.clone());
            Ok(())
        }
    }

    #[test]
    fn shutdown_waits_for_queued_reports() {
        let (tx, rx) = mpsc::channel();
        let reporter = ProgressReporter::spawn(SlowSink(tx), player());
        let screen_copy = reporter.clone();
        screen_copy.report(QuestType::CompleteGames, 1);
        screen_copy.report(QuestType::EarnStars, 2);
        drop(screen_copy);

        reporter.shutdown(Duration::from_secs(5));
        assert_eq!(rx.try_recv().unwrap().quest, QuestType::CompleteGames);
        assert_eq!(rx.try_recv().unwrap().increment, 2);
    }

    #[test]
    fn shutdown_gives_up_while_a_clone_is_alive() {
        let (tx, _rx) = mpsc::channel();
        let reporter = ProgressReporter::spawn(ChannelSink(tx), player());
        let _held = reporter.clone();
        let started = std::time::Instant::now();
        reporter.shutdown(Duration::from_millis(50));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn ledger_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let mut sink = LedgerSink::new(&path);
        let report = ProgressReport {
            parent_id: "p".into(),
            child_id: "c".into(),
            quest: QuestType::EarnStars,
            increment: 3,
        };
        sink.increment_quest_progress(&report).unwrap();
        sink.increment_quest_progress(&report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let entry: LedgerEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry.report, report);
        assert!(lines[0].contains("\"quest\":\"EARN_STARS\""));
    }
}

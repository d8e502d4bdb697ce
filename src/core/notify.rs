//! Change notifications: stores publish a topic path on every mutation,
//! subscribers watch a topic pattern and re-read state snapshots.

use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A published state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: &'static str,
    pub version: u64,
}

/// Topic pattern: exact segments, `*` for one segment, `**` for any tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPattern {
    segments: Vec<String>,
}

impl TopicPattern {
    pub fn parse(pattern: &str) -> Self {
        Self {
            segments: pattern
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&self.segments, &parts)
    }
}

fn match_segments(pattern: &[String], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((head, rest)) if head == "**" => {
            (0..=path.len()).any(|skip| match_segments(rest, &path[skip..]))
        }
        Some((head, rest)) => match path.split_first() {
            Some((part, tail)) if head == "*" || head == part => match_segments(rest, tail),
            _ => false,
        },
    }
}

#[derive(Default)]
struct WatcherList {
    version: u64,
    subscribers: Vec<(TopicPattern, mpsc::UnboundedSender<Change>)>,
}

/// Subscriber registry shared by a store and its clones
#[derive(Clone, Default)]
pub struct Watchers {
    inner: Arc<Mutex<WatcherList>>,
}

impl Watchers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to changes whose path matches `pattern`
    pub fn watch(&self, pattern: &str) -> mpsc::UnboundedReceiver<Change> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push((TopicPattern::parse(pattern), tx));
        rx
    }

    /// Publish a change; closed subscribers are dropped
    pub fn notify(&self, path: &'static str) {
        let mut list = self.lock();
        list.version += 1;
        let change = Change { path, version: list.version };
        list.subscribers.retain(|(pattern, tx)| {
            if pattern.matches(path) {
                tx.send(change.clone()).is_ok()
            } else {
                !tx.is_closed()
            }
        });
    }

    pub fn version(&self) -> u64 {
        self.lock().version
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WatcherList> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_pattern_matching() {
        let exact = TopicPattern::parse("/wallet/session");
        assert!(exact.matches("/wallet/session"));
        assert!(!exact.matches("/wallet/balance"));

        let one = TopicPattern::parse("/wallet/*");
        assert!(one.matches("/wallet/error"));
        assert!(!one.matches("/market/view"));

        let deep = TopicPattern::parse("/**");
        assert!(deep.matches("/market/inscriptions"));
        assert!(deep.matches("/wallet/session"));
    }

    #[test]
    fn notify_reaches_matching_watchers_only() {
        let watchers = Watchers::new();
        let mut wallet_rx = watchers.watch("/wallet/**");
        let mut market_rx = watchers.watch("/market/*");

        watchers.notify("/wallet/session");

        let change = wallet_rx.try_recv().unwrap();
        assert_eq!(change.path, "/wallet/session");
        assert_eq!(change.version, 1);
        assert!(market_rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let watchers = Watchers::new();
        let rx = watchers.watch("/**");
        drop(rx);
        watchers.notify("/market/view");
        assert!(watchers.lock().subscribers.is_empty());
        assert_eq!(watchers.version(), 1);
    }
}

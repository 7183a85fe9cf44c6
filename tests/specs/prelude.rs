//! Harness for talking to a bot the way a channel would.

#![allow(dead_code)]

use lockbot_core::Reply;
use lockbot_engine::Brain;
use lockbot_storage::{MemoryStore, ResourceStore, WalStore};
use std::path::Path;

pub const CHANNEL: &str = "#ops";
pub const BOT: &str = "lockbot";

/// A channel with one bot in it
pub struct Chat<S> {
    brain: Brain<S>,
}

impl Chat<MemoryStore> {
    pub fn new() -> Self {
        Self {
            brain: Brain::new(BOT, MemoryStore::new()).unwrap(),
        }
    }
}

impl Chat<WalStore> {
    /// Bot backed by the log at `path`, as after a fresh start
    pub fn persistent(path: &Path) -> Self {
        let mut store = WalStore::open(path).unwrap();
        store.compact().unwrap();
        Self {
            brain: Brain::new(BOT, store).unwrap(),
        }
    }
}

impl<S: ResourceStore> Chat<S> {
    /// Register `names` (comma separated) as `admin`
    pub fn with(mut self, names: &str) -> Self {
        self.say("admin", &format!("{}: register({})", BOT, names))
            .has("REGISTERED");
        self
    }

    /// `who` posts `text` to the channel
    pub fn say(&mut self, who: &str, text: &str) -> Said {
        self.post(who, CHANNEL, text)
    }

    /// `who` sends `text` straight to the bot
    pub fn whisper(&mut self, who: &str, text: &str) -> Said {
        self.post(who, BOT, text)
    }

    fn post(&mut self, who: &str, target: &str, text: &str) -> Said {
        let sender = format!("{}!~{}@example.net", who, who);
        Said {
            replies: self.brain.process(&sender, target, text).unwrap(),
        }
    }

    /// Status lines without the header
    pub fn locked(&mut self) -> Vec<String> {
        self.say("observer", &format!("{}: status", BOT))
            .lines()
            .into_iter()
            .skip(1)
            .collect()
    }
}

/// Replies to one chat line
pub struct Said {
    replies: Vec<Reply>,
}

impl Said {
    pub fn lines(&self) -> Vec<String> {
        self.replies.iter().map(|r| r.text.clone()).collect()
    }

    /// Assert some reply contains `expected`
    pub fn has(self, expected: &str) -> Self {
        let lines = self.lines();
        assert!(
            lines.iter().any(|l| l.contains(expected)),
            "expected a reply containing {:?}, got {:#?}",
            expected,
            lines
        );
        self
    }

    /// Assert the replies are exactly `expected`, in order
    pub fn is(self, expected: &[&str]) -> Self {
        similar_asserts::assert_eq!(self.lines(), expected);
        self
    }

    /// Assert every reply goes to `destination`
    pub fn to(self, destination: &str) -> Self {
        for reply in &self.replies {
            assert_eq!(reply.destination, destination, "reply {:?}", reply.text);
        }
        self
    }

    pub fn silent(self) {
        assert!(
            self.replies.is_empty(),
            "expected no reply, got {:#?}",
            self.lines()
        );
    }
}

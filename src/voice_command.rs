//! # Voice Command Module
//!
//! Turns recognised speech (or typed text) into cooking commands and
//! carries the raw command strings from a capture task to the session
//! consumer over a bounded single-producer / single-consumer queue.
//!
//! The consumer never touches the capture task. It drains one command at
//! a time, either polling with [`CommandReceiver::try_next`] or awaiting
//! [`CommandReceiver::next`].

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};
use tracing::{debug, warn};

/// Phrases that introduce a command
pub const WAKE_WORDS: &[&str] = &["hey chef", "hey chief", "a chef", "hey chefs"];

lazy_static! {
    /// A wake word at the very start of a line, on a word boundary. Longer
    /// alternatives come first so "hey chefs" keeps its "s".
    static ref WAKE_WORD_REGEX: Regex = {
        let mut words = WAKE_WORDS.to_vec();
        words.sort_by_key(|word| std::cmp::Reverse(word.len()));
        let alternatives: Vec<String> = words.iter().map(|word| regex::escape(word)).collect();
        Regex::new(&format!(r"(?i)^\s*(?:{})\b[\s,:!.]*", alternatives.join("|")))
            .expect("Wake word pattern should be valid")
    };
}

/// Commands understood while cooking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceCommand {
    Next,
    Previous,
    Repeat,
    StartTimer,
    PauseTimer,
    ResumeTimer,
    ResetTimer,
    Done,
    Exit,
    /// Anything else, kept for the reply
    Unknown(String),
}

/// Keyword table, checked top to bottom
const VOCABULARY: &[(&[&str], VoiceCommand)] = &[
    (&["next", "continue", "ahead"], VoiceCommand::Next),
    (&["previous", "back", "last"], VoiceCommand::Previous),
    (&["repeat", "again"], VoiceCommand::Repeat),
    (
        &["start timer", "timer on", "begin timer"],
        VoiceCommand::StartTimer,
    ),
    (&["pause timer", "stop timer"], VoiceCommand::PauseTimer),
    (&["resume"], VoiceCommand::ResumeTimer),
    (&["reset"], VoiceCommand::ResetTimer),
    (&["done", "finish", "complete"], VoiceCommand::Done),
    (&["exit", "stop cooking", "quit"], VoiceCommand::Exit),
];

/// Lower-case words separated by single spaces, padded on both sides so
/// that phrase lookups only hit whole words
fn padded_words(text: &str) -> String {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();
    format!(" {} ", words.join(" "))
}

impl VoiceCommand {
    /// Classify a command phrase
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchenmate::voice_command::VoiceCommand;
    ///
    /// assert_eq!(VoiceCommand::parse("Go back please"), VoiceCommand::Previous);
    /// assert_eq!(VoiceCommand::parse("start timer"), VoiceCommand::StartTimer);
    /// assert_eq!(
    ///     VoiceCommand::parse("sing a song"),
    ///     VoiceCommand::Unknown("sing a song".to_string())
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        let padded = padded_words(text);
        VOCABULARY
            .iter()
            .find(|(phrases, _)| {
                phrases
                    .iter()
                    .any(|phrase| padded.contains(&format!(" {phrase} ")))
            })
            .map(|(_, command)| command.clone())
            .unwrap_or_else(|| VoiceCommand::Unknown(text.trim().to_string()))
    }
}

impl fmt::Display for VoiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceCommand::Next => write!(f, "next"),
            VoiceCommand::Previous => write!(f, "previous"),
            VoiceCommand::Repeat => write!(f, "repeat"),
            VoiceCommand::StartTimer => write!(f, "start timer"),
            VoiceCommand::PauseTimer => write!(f, "pause timer"),
            VoiceCommand::ResumeTimer => write!(f, "resume timer"),
            VoiceCommand::ResetTimer => write!(f, "reset timer"),
            VoiceCommand::Done => write!(f, "done"),
            VoiceCommand::Exit => write!(f, "exit"),
            VoiceCommand::Unknown(text) => write!(f, "unknown ({text})"),
        }
    }
}

/// Text after a leading wake word, or `None` if the line does not start
/// with one. The rest keeps its original case.
///
/// ```rust
/// use kitchenmate::voice_command::strip_wake_word;
///
/// assert_eq!(strip_wake_word("Hey Chef, next step"), Some("next step".to_string()));
/// assert_eq!(strip_wake_word("next step"), None);
/// assert_eq!(strip_wake_word("tip from a chef: rinse well"), None);
/// ```
pub fn strip_wake_word(transcript: &str) -> Option<String> {
    let found = WAKE_WORD_REGEX.find(transcript)?;
    Some(transcript[found.end()..].trim().to_string())
}

/// Queue failures seen by either end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandQueueError {
    /// The bounded queue is at capacity
    Full,
    /// The other end has been dropped
    Closed,
}

impl fmt::Display for CommandQueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandQueueError::Full => write!(f, "command queue is full"),
            CommandQueueError::Closed => write!(f, "command queue is closed"),
        }
    }
}

impl std::error::Error for CommandQueueError {}

/// Producer half, owned by the capture task
#[derive(Debug)]
pub struct CommandSender {
    tx: mpsc::Sender<String>,
}

/// Consumer half, owned by the session loop
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::Receiver<String>,
}

/// Create a bounded command queue. A capacity of zero is treated as one.
pub fn command_channel(capacity: usize) -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (CommandSender { tx }, CommandReceiver { rx })
}

impl CommandSender {
    /// Queue a command without waiting
    pub fn try_send(&self, command: impl Into<String>) -> Result<(), CommandQueueError> {
        self.tx.try_send(command.into()).map_err(|err| match err {
            TrySendError::Full(dropped) => {
                warn!(command = %dropped, "Command queue full, dropping command");
                CommandQueueError::Full
            }
            TrySendError::Closed(_) => CommandQueueError::Closed,
        })
    }

    /// Queue a command, waiting for room
    pub async fn send(&self, command: impl Into<String>) -> Result<(), CommandQueueError> {
        self.tx
            .send(command.into())
            .await
            .map_err(|_| CommandQueueError::Closed)
    }
}

impl CommandReceiver {
    /// Next queued command, `Ok(None)` when nothing is waiting
    pub fn try_next(&mut self) -> Result<Option<String>, CommandQueueError> {
        match self.rx.try_recv() {
            Ok(command) => {
                debug!(command = %command, "Dequeued command");
                Ok(Some(command))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CommandQueueError::Closed),
        }
    }

    /// Wait for the next command; `None` once the sender is gone and the
    /// queue is drained
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary() {
        let cases = vec![
            ("next", VoiceCommand::Next),
            ("please continue", VoiceCommand::Next),
            ("go back", VoiceCommand::Previous),
            ("say that again", VoiceCommand::Repeat),
            ("timer on", VoiceCommand::StartTimer),
            ("stop timer", VoiceCommand::PauseTimer),
            ("resume", VoiceCommand::ResumeTimer),
            ("reset", VoiceCommand::ResetTimer),
            ("I'm done", VoiceCommand::Done),
            ("stop cooking", VoiceCommand::Exit),
            ("QUIT", VoiceCommand::Exit),
        ];
        for (text, expected) in cases {
            assert_eq!(VoiceCommand::parse(text), expected, "Parsing '{}'", text);
        }
    }

    #[test]
    fn test_order_decides_overlaps() {
        // "next" is checked before "done"
        assert_eq!(VoiceCommand::parse("done, next"), VoiceCommand::Next);
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(
            VoiceCommand::parse("feedback"),
            VoiceCommand::Unknown("feedback".to_string())
        );
    }

    #[test]
    fn test_wake_words() {
        assert_eq!(strip_wake_word("hey chef next"), Some("next".to_string()));
        assert_eq!(strip_wake_word("hey chefs, repeat"), Some("repeat".to_string()));
        assert_eq!(strip_wake_word("a chef  done!"), Some("done!".to_string()));
        assert_eq!(strip_wake_word("hey chief"), Some(String::new()));
        assert_eq!(strip_wake_word("hello there"), None);
    }

    #[test]
    fn test_wake_word_only_at_line_start() {
        assert_eq!(strip_wake_word("Tip from a chef: rinse well"), None);
        assert_eq!(strip_wake_word("1 tsp garam masala chef special"), None);
        assert_eq!(strip_wake_word("a chefknife"), None);
        assert_eq!(
            strip_wake_word("Hey chef recipe Ingredients: 2 Tomato"),
            Some("recipe Ingredients: 2 Tomato".to_string())
        );
    }

    #[test]
    fn test_queue_roundtrip() {
        let (tx, mut rx) = command_channel(2);
        assert_eq!(rx.try_next(), Ok(None));

        tx.try_send("next").unwrap();
        tx.try_send("repeat").unwrap();
        assert_eq!(tx.try_send("done"), Err(CommandQueueError::Full));

        assert_eq!(rx.try_next(), Ok(Some("next".to_string())));
        assert_eq!(rx.try_next(), Ok(Some("repeat".to_string())));

        drop(tx);
        assert_eq!(rx.try_next(), Err(CommandQueueError::Closed));
    }

    #[test]
    fn test_zero_capacity_is_one() {
        let (tx, _rx) = command_channel(0);
        assert!(tx.try_send("next").is_ok());
    }
}

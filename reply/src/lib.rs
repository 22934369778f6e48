//! Keyword based reply dispatch for SimpleBot.

mod clock;
mod rules;

pub use clock::{Clock, SystemClock};
pub use rules::Rule;

/// A single incoming message.
#[derive(Debug, Clone)]
pub struct Message<'a> {
    raw: &'a str,
    normalized: String,
}

impl<'a> Message<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: raw.trim().to_lowercase(),
        }
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    /// Trimmed and lower-cased text the rules match against.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub rule: Rule,
    pub text: String,
}

/// Maps message text to a reply. Never fails.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher<C = SystemClock> {
    clock: C,
}

impl Dispatcher<SystemClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Dispatcher<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn classify(&self, text: &str) -> Rule {
        let message = Message::new(text);
        Self::select(&message).rule
    }

    pub fn dispatch(&self, text: &str) -> Reply {
        let message = Message::new(text);
        let entry = Self::select(&message);
        Reply {
            rule: entry.rule,
            text: (entry.respond)(&message, &self.clock),
        }
    }

    fn select(message: &Message<'_>) -> &'static rules::Entry {
        rules::RULES
            .iter()
            .find(|entry| (entry.matches)(message.normalized()))
            .unwrap_or(&rules::FALLBACK)
    }
}

/// Dispatch with the system clock and return only the text.
pub fn reply(text: &str) -> String {
    Dispatcher::new().dispatch(text).text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rules::{ACKNOWLEDGMENT, GREETING, JOKE};
    use chrono::{NaiveDate, Timelike};

    fn fixed() -> Dispatcher<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 3)
            .unwrap();
        Dispatcher::with_clock(FixedClock(now))
    }

    #[test]
    fn greets_regardless_of_case_and_padding() {
        let dispatcher = fixed();
        for input in ["hi", "Hello", " HEY "] {
            let reply = dispatcher.dispatch(input);
            assert_eq!(reply.rule, Rule::Greeting, "input: {input:?}");
            assert_eq!(reply.text, GREETING);
        }
    }

    #[test]
    fn greeting_needs_the_whole_message() {
        let reply = fixed().dispatch("hi there");
        assert_eq!(reply.rule, Rule::Echo);
        assert_eq!(
            reply.text,
            "I heard: \"hi there\" — ask me for 'time' or 'joke'!"
        );
    }

    #[test]
    fn time_uses_the_clock() {
        let reply = fixed().dispatch("what time is it");
        assert_eq!(reply.rule, Rule::Time);
        assert_eq!(reply.text, "It's 2024-03-09 07:05:03 right now.");
    }

    #[test]
    fn time_reads_the_system_clock() {
        let before = chrono::Local::now().naive_local();
        let text = reply("What TIME is it?");
        let after = chrono::Local::now().naive_local();

        let stamp = text
            .strip_prefix("It's ")
            .and_then(|s| s.strip_suffix(" right now."))
            .expect("time reply shape");
        let parsed = chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
            .expect("timestamp format");
        let before = before.with_nanosecond(0).unwrap();
        assert!(before <= parsed && parsed <= after, "{parsed} not in [{before}, {after}]");
    }

    #[test]
    fn tells_a_joke() {
        assert_eq!(fixed().dispatch("tell me a joke").text, JOKE);
    }

    #[test]
    fn acknowledges_thanks() {
        assert_eq!(fixed().dispatch("thanks a lot").text, ACKNOWLEDGMENT);
        assert_eq!(fixed().dispatch("Thank you!").text, ACKNOWLEDGMENT);
    }

    #[test]
    fn earlier_rules_win() {
        let dispatcher = fixed();
        assert_eq!(dispatcher.classify("thanks for the joke"), Rule::Joke);
        assert_eq!(dispatcher.classify("time for a joke"), Rule::Time);
        assert_eq!(dispatcher.classify("joke time, thanks"), Rule::Time);
    }

    #[test]
    fn echo_keeps_original_text() {
        assert_eq!(
            reply("xyz123"),
            "I heard: \"xyz123\" — ask me for 'time' or 'joke'!"
        );
        assert_eq!(
            reply("  Mixed Case  "),
            "I heard: \"  Mixed Case  \" — ask me for 'time' or 'joke'!"
        );
    }

    #[test]
    fn empty_message_falls_through_to_echo() {
        let reply = fixed().dispatch("");
        assert_eq!(reply.rule, Rule::Echo);
        assert_eq!(reply.text, "I heard: \"\" — ask me for 'time' or 'joke'!");
        assert_eq!(fixed().classify("   "), Rule::Echo);
    }

    #[test]
    fn same_input_same_reply() {
        for input in ["hello", "tell me a joke", "thanks", "xyz123", ""] {
            assert_eq!(reply(input), reply(input));
        }
    }

    #[test]
    fn message_normalizes_once() {
        let message = Message::new("  HeLLo\n");
        assert_eq!(message.raw(), "  HeLLo\n");
        assert_eq!(message.normalized(), "hello");
    }
}

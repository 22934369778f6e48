use crate::clock::Clock;
use crate::Message;

pub(crate) const GREETING: &str = "Hello! I'm SimpleBot. 🙂";
pub(crate) const JOKE: &str =
    "Why did the programmer quit his job? Because he didn't get arrays. 😅";
pub(crate) const ACKNOWLEDGMENT: &str = "You're welcome! Glad to help.";

const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];
const TIME_FORMAT: &str = "It's %Y-%m-%d %H:%M:%S right now.";

/// Which rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Greeting,
    Time,
    Joke,
    Thanks,
    Echo,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Greeting => "greeting",
            Rule::Time => "time",
            Rule::Joke => "joke",
            Rule::Thanks => "thanks",
            Rule::Echo => "echo",
        }
    }
}

type Predicate = fn(&str) -> bool;
type Handler = fn(&Message<'_>, &dyn Clock) -> String;

pub(crate) struct Entry {
    pub rule: Rule,
    pub matches: Predicate,
    pub respond: Handler,
}

/// Evaluated top to bottom, first match wins. Order matters: the substring
/// checks overlap ("thanks for the joke" is a joke).
pub(crate) const RULES: &[Entry] = &[
    Entry {
        rule: Rule::Greeting,
        matches: is_greeting,
        respond: greeting,
    },
    Entry {
        rule: Rule::Time,
        matches: asks_time,
        respond: time,
    },
    Entry {
        rule: Rule::Joke,
        matches: asks_joke,
        respond: joke,
    },
    Entry {
        rule: Rule::Thanks,
        matches: says_thanks,
        respond: thanks,
    },
];

pub(crate) const FALLBACK: Entry = Entry {
    rule: Rule::Echo,
    matches: always,
    respond: echo,
};

fn is_greeting(text: &str) -> bool {
    GREETING_WORDS.contains(&text)
}

fn asks_time(text: &str) -> bool {
    text.contains("time")
}

fn asks_joke(text: &str) -> bool {
    text.contains("joke")
}

fn says_thanks(text: &str) -> bool {
    text.contains("thanks") || text.contains("thank you")
}

fn always(_: &str) -> bool {
    true
}

fn greeting(_: &Message<'_>, _: &dyn Clock) -> String {
    GREETING.to_string()
}

fn time(_: &Message<'_>, clock: &dyn Clock) -> String {
    clock.now().format(TIME_FORMAT).to_string()
}

fn joke(_: &Message<'_>, _: &dyn Clock) -> String {
    JOKE.to_string()
}

fn thanks(_: &Message<'_>, _: &dyn Clock) -> String {
    ACKNOWLEDGMENT.to_string()
}

// Echoes the raw text, not the normalized one.
fn echo(message: &Message<'_>, _: &dyn Clock) -> String {
    format!(
        "I heard: \"{}\" — ask me for 'time' or 'joke'!",
        message.raw()
    )
}

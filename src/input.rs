// Input classification: turns one line typed (or swiped) at the prompt into
// a command for the session loop.

use regex::Regex;
use std::sync::LazyLock;

static UID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{9}$").expect("valid regex"));

/// One identification read from the terminal. Exactly one of the two form
/// fields is populated; the other is sent empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwipeEvent {
    /// Nine-digit university ID typed by hand.
    Uid(String),
    /// Raw card-reader payload, already escaped for the form body.
    Card(String),
}

impl SwipeEvent {
    /// Value of the `uid` form field.
    pub fn uid(&self) -> &str {
        match self {
            SwipeEvent::Uid(uid) => uid,
            SwipeEvent::Card(_) => "",
        }
    }

    /// Value of the `idcard` form field.
    pub fn idcard(&self) -> &str {
        match self {
            SwipeEvent::Uid(_) => "",
            SwipeEvent::Card(card) => card,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Blank,
    Exit,
    Swipe(SwipeEvent),
}

/// Classify a raw line. Surrounding whitespace (including the newline) is
/// ignored.
pub fn classify(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Blank,
        "exit" | "quit" | "q" => Command::Exit,
        uid if UID.is_match(uid) => Command::Swipe(SwipeEvent::Uid(uid.to_string())),
        card => Command::Swipe(SwipeEvent::Card(escape_card(card))),
    }
}

/// Card readers emit `;` and `?` as track sentinels; those two are the only
/// characters escaped before the payload goes into the form body.
pub fn escape_card(raw: &str) -> String {
    raw.replace(';', "%3B").replace('?', "%3F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_digits_is_a_uid() {
        let cmd = classify("123456789\n");
        assert_eq!(cmd, Command::Swipe(SwipeEvent::Uid("123456789".into())));
        if let Command::Swipe(event) = cmd {
            assert_eq!(event.uid(), "123456789");
            assert_eq!(event.idcard(), "");
        }
    }

    #[test]
    fn other_digit_counts_are_card_payloads() {
        assert_eq!(
            classify("12345678"),
            Command::Swipe(SwipeEvent::Card("12345678".into()))
        );
        assert_eq!(
            classify("1234567890"),
            Command::Swipe(SwipeEvent::Card("1234567890".into()))
        );
    }

    #[test]
    fn card_payload_escapes_only_sentinels() {
        let cmd = classify(";6009 21?x&y+z%");
        let Command::Swipe(event) = cmd else {
            panic!("expected a swipe, got {:?}", cmd);
        };
        assert_eq!(event.idcard(), "%3B6009 21%3Fx&y+z%");
        assert_eq!(event.uid(), "");
    }

    #[test]
    fn blank_and_whitespace_lines_are_blank() {
        assert_eq!(classify(""), Command::Blank);
        assert_eq!(classify("   \t\r\n"), Command::Blank);
    }

    #[test]
    fn non_ascii_digits_are_a_card_payload() {
        let arabic = "\u{661}\u{662}\u{663}\u{664}\u{665}\u{666}\u{667}\u{668}\u{669}";
        assert_eq!(
            classify(arabic),
            Command::Swipe(SwipeEvent::Card(arabic.to_string()))
        );
    }

    #[test]
    fn exit_keywords() {
        for word in ["exit", "quit", "q", "  q  "] {
            assert_eq!(classify(word), Command::Exit, "{word:?}");
        }
        assert_ne!(classify("Quit"), Command::Exit);
    }
}

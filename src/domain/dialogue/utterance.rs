//! Lexical classification of user utterances.

use once_cell::sync::Lazy;
use regex::Regex;

static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:hi|hello|hey|greetings|good morning|good afternoon|good evening|sup|yo|wassup|what's up|whats up|thanks|thank you|ty|thx|appreciate it|cool|ok|okay|alright|nice|great|yes|no|yeah|nah|yep|nope|sure|fine|lol|haha|hehe|lmao|xd|how are you)$",
    )
    .unwrap()
});

static GREETING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:hi|hello|hey|greetings|good morning|good afternoon|good evening)\b").unwrap()
});
static THANKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:thanks|thank you|ty|thx|appreciate)").unwrap());
static SMALLTALK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"how are you|what's up|whats up|wassup").unwrap());
static JOKE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"joke|funny|laugh|lol|haha|hehe").unwrap());
static CONFUSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"confused|don't understand|what|huh|help").unwrap());

/// Conversational register of an utterance that yielded no field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Greeting,
    Thanks,
    SmallTalk,
    Joke,
    Confusion,
    Short,
    Generic,
}

/// True for canned pleasantries and very short non-numeric replies.
///
/// Trailing punctuation is ignored, so "Thanks!" is filler too.
pub fn is_filler(utterance: &str) -> bool {
    let core = utterance
        .trim()
        .trim_end_matches(|c| matches!(c, '!' | '.' | '?' | ','))
        .trim();
    if FILLER_RE.is_match(core) {
        return true;
    }
    let trimmed = utterance.trim();
    trimmed.chars().count() <= 3 && !trimmed.chars().any(|c| c.is_ascii_digit())
}

/// True if the trimmed utterance is one or more ASCII digits and nothing else.
pub fn is_purely_numeric(utterance: &str) -> bool {
    let trimmed = utterance.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Classifies an utterance; the first matching tone wins.
pub fn classify(utterance: &str) -> Tone {
    let lower = utterance.trim().to_lowercase();
    if GREETING_RE.is_match(&lower) {
        Tone::Greeting
    } else if THANKS_RE.is_match(&lower) {
        Tone::Thanks
    } else if SMALLTALK_RE.is_match(&lower) {
        Tone::SmallTalk
    } else if JOKE_RE.is_match(&lower) {
        Tone::Joke
    } else if CONFUSION_RE.is_match(&lower) {
        Tone::Confusion
    } else if lower.chars().count() < 10 {
        Tone::Short
    } else {
        Tone::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod filler {
        use super::*;

        #[test]
        fn canned_phrases_are_filler() {
            for text in ["hi", "Hello", "thank you", "OK", "nope", "lmao", "how are you"] {
                assert!(is_filler(text), "{text} should be filler");
            }
        }

        #[test]
        fn trailing_punctuation_is_ignored() {
            assert!(is_filler("Thanks!"));
            assert!(is_filler("  good morning. "));
            assert!(is_filler("how are you?"));
        }

        #[test]
        fn short_text_without_digits_is_filler() {
            assert!(is_filler("hmm"));
            assert!(is_filler("k"));
            assert!(!is_filler("12"));
        }

        #[test]
        fn substantive_text_is_not_filler() {
            assert!(!is_filler("John Smith"));
            assert!(!is_filler("thanks for the help with my form"));
            assert!(!is_filler("Computer Science"));
        }
    }

    #[test]
    fn purely_numeric_requires_only_digits() {
        assert!(is_purely_numeric("12345"));
        assert!(is_purely_numeric(" 001 "));
        assert!(!is_purely_numeric("Z123"));
        assert!(!is_purely_numeric("555-1234"));
        assert!(!is_purely_numeric(""));
    }

    mod tone {
        use super::*;

        #[test]
        fn greetings_and_thanks() {
            assert_eq!(classify("Hello there"), Tone::Greeting);
            assert_eq!(classify("thanks a lot"), Tone::Thanks);
        }

        #[test]
        fn greeting_needs_word_boundary() {
            assert_ne!(classify("history major please"), Tone::Greeting);
        }

        #[test]
        fn smalltalk_joke_and_confusion() {
            assert_eq!(classify("so how are you today"), Tone::SmallTalk);
            assert_eq!(classify("tell me a joke"), Tone::Joke);
            assert_eq!(classify("I'm confused about this"), Tone::Confusion);
        }

        #[test]
        fn short_and_generic_fallbacks() {
            assert_eq!(classify("erm"), Tone::Short);
            assert_eq!(classify("the weather is nice today"), Tone::Generic);
        }
    }
}

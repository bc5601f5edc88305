// Result types returned by the model
//
// The shapes here mirror the JSON the prompts ask for. They are validated
// after deserialization so a reply with blank fields counts as a failure.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which assistant task a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Interpretation,
    Nikud,
}

impl TaskKind {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Interpretation => "interpretation",
            TaskKind::Nikud => "nikud",
        }
    }

    /// Hebrew tab title
    pub fn title(&self) -> &'static str {
        match self {
            TaskKind::Interpretation => "פירוש תורני",
            TaskKind::Nikud => "ניקוד אוטומטי",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A difficult word and its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGloss {
    pub word: String,
    pub explanation: String,
}

/// A quoted source and what it means in context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteExplanation {
    pub quote: String,
    pub explanation: String,
}

/// Torah-style interpretation of a passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    /// The passage as the model echoed it back
    pub original_text: String,

    /// Letter / heading written for the reader
    pub letter: String,

    #[serde(default)]
    pub difficult_words: Vec<WordGloss>,

    #[serde(default)]
    pub quotes: Vec<QuoteExplanation>,
}

impl Interpretation {
    /// Check that every field the UI renders has content
    pub fn validate(&self) -> Result<(), String> {
        if self.original_text.trim().is_empty() {
            return Err("original_text is empty".to_string());
        }
        if self.letter.trim().is_empty() {
            return Err("letter is empty".to_string());
        }
        for (i, gloss) in self.difficult_words.iter().enumerate() {
            if gloss.word.trim().is_empty() || gloss.explanation.trim().is_empty() {
                return Err(format!("difficult_words[{}] has a blank member", i));
            }
        }
        for (i, quote) in self.quotes.iter().enumerate() {
            if quote.quote.trim().is_empty() || quote.explanation.trim().is_empty() {
                return Err(format!("quotes[{}] has a blank member", i));
            }
        }
        Ok(())
    }
}

/// Passage with vowel pointing added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vowelization {
    pub original_text: String,
    pub vowelized_text: String,
}

impl Vowelization {
    pub fn validate(&self) -> Result<(), String> {
        if self.original_text.trim().is_empty() {
            return Err("original_text is empty".to_string());
        }
        if self.vowelized_text.trim().is_empty() {
            return Err("vowelized_text is empty".to_string());
        }
        Ok(())
    }
}

/// A result shape the assistant can ask the model for
pub trait TaskResult: DeserializeOwned + Serialize {
    const TASK: TaskKind;

    fn validate(&self) -> Result<(), String>;
}

impl TaskResult for Interpretation {
    const TASK: TaskKind = TaskKind::Interpretation;

    fn validate(&self) -> Result<(), String> {
        Interpretation::validate(self)
    }
}

impl TaskResult for Vowelization {
    const TASK: TaskKind = TaskKind::Nikud;

    fn validate(&self) -> Result<(), String> {
        Vowelization::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Interpretation {
        Interpretation {
            original_text: "בראשית ברא אלהים".to_string(),
            letter: "לקורא היקר".to_string(),
            difficult_words: vec![WordGloss {
                word: "ברא".to_string(),
                explanation: "יצר יש מאין".to_string(),
            }],
            quotes: vec![],
        }
    }

    #[test]
    fn test_valid_interpretation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_blank_letter_rejected() {
        let mut interp = sample();
        interp.letter = "   ".to_string();
        assert_eq!(interp.validate().unwrap_err(), "letter is empty");
    }

    #[test]
    fn test_blank_gloss_member_rejected() {
        let mut interp = sample();
        interp.difficult_words[0].explanation.clear();
        assert!(interp.validate().unwrap_err().contains("difficult_words[0]"));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let json = r#"{"original_text": "שלום", "letter": "מכתב"}"#;
        let interp: Interpretation = serde_json::from_str(json).unwrap();
        assert!(interp.difficult_words.is_empty());
        assert!(interp.quotes.is_empty());
    }

    #[test]
    fn test_vowelization_requires_output() {
        let v = Vowelization {
            original_text: "שלום".to_string(),
            vowelized_text: String::new(),
        };
        assert!(v.validate().is_err());
    }

    #[test]
    fn test_task_labels() {
        assert_eq!(TaskKind::Nikud.to_string(), "nikud");
        assert_eq!(TaskKind::Interpretation.title(), "פירוש תורני");
    }
}

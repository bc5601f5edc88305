// Plain-text export of assistant results
//
// Output depends only on the result fields: same input, same bytes.

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

use crate::model::{Interpretation, TaskKind, Vowelization};

const RULE: &str = "========================================";

/// Download file name for a task
pub fn export_file_name(task: TaskKind) -> &'static str {
    match task {
        TaskKind::Interpretation => "perush.txt",
        TaskKind::Nikud => "nikud.txt",
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", RULE);
}

fn section(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}:", title);
    let _ = writeln!(out, "{}", body.trim());
}

pub fn render_interpretation(interp: &Interpretation) -> String {
    let mut out = String::new();
    heading(&mut out, TaskKind::Interpretation.title());
    section(&mut out, "טקסט מקורי", &interp.original_text);
    section(&mut out, "מכתב", &interp.letter);

    if !interp.difficult_words.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "מילים קשות:");
        for (i, gloss) in interp.difficult_words.iter().enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - {}",
                i + 1,
                gloss.word.trim(),
                gloss.explanation.trim()
            );
        }
    }

    if !interp.quotes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ציטוטים והסברים:");
        for (i, quote) in interp.quotes.iter().enumerate() {
            let _ = writeln!(out, "{}. \"{}\"", i + 1, quote.quote.trim());
            let _ = writeln!(out, "   {}", quote.explanation.trim());
        }
    }

    out
}

pub fn render_vowelization(v: &Vowelization) -> String {
    let mut out = String::new();
    heading(&mut out, TaskKind::Nikud.title());
    section(&mut out, "טקסט מקורי", &v.original_text);
    section(&mut out, "טקסט מנוקד", &v.vowelized_text);
    out
}

/// Write an export document to disk
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuoteExplanation, WordGloss};

    fn sample() -> Interpretation {
        Interpretation {
            original_text: "בראשית ברא אלהים את השמים ואת הארץ".to_string(),
            letter: "  לקורא היקר, הפסוק פותח את התורה.  ".to_string(),
            difficult_words: vec![
                WordGloss {
                    word: "ברא".to_string(),
                    explanation: "יצר יש מאין".to_string(),
                },
                WordGloss {
                    word: "השמים".to_string(),
                    explanation: "הרקיע".to_string(),
                },
            ],
            quotes: vec![QuoteExplanation {
                quote: "אמר רבי יצחק לא היה צריך להתחיל את התורה אלא מהחודש הזה לכם".to_string(),
                explanation: "רש\"י על הפסוק".to_string(),
            }],
        }
    }

    #[test]
    fn test_interpretation_layout() {
        let text = render_interpretation(&sample());
        let expected = "\
פירוש תורני
========================================

טקסט מקורי:
בראשית ברא אלהים את השמים ואת הארץ

מכתב:
לקורא היקר, הפסוק פותח את התורה.

מילים קשות:
1. ברא - יצר יש מאין
2. השמים - הרקיע

ציטוטים והסברים:
1. \"אמר רבי יצחק לא היה צריך להתחיל את התורה אלא מהחודש הזה לכם\"
   רש\"י על הפסוק
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_interpretation(&sample()), render_interpretation(&sample()));
    }

    #[test]
    fn test_empty_lists_omit_sections() {
        let mut interp = sample();
        interp.difficult_words.clear();
        interp.quotes.clear();
        let text = render_interpretation(&interp);
        assert!(!text.contains("מילים קשות"));
        assert!(!text.contains("ציטוטים"));
        assert!(text.ends_with("לקורא היקר, הפסוק פותח את התורה.\n"));
    }

    #[test]
    fn test_vowelization_layout() {
        let v = Vowelization {
            original_text: "שלום עולם".to_string(),
            vowelized_text: "שָׁלוֹם עוֹלָם".to_string(),
        };
        assert_eq!(
            render_vowelization(&v),
            "ניקוד אוטומטי\n========================================\n\nטקסט מקורי:\nשלום עולם\n\nטקסט מנוקד:\nשָׁלוֹם עוֹלָם\n"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(export_file_name(TaskKind::Interpretation), "perush.txt");
        assert_eq!(export_file_name(TaskKind::Nikud), "nikud.txt");
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perush.txt");
        write_export(&path, "תוכן\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "תוכן\n");
    }
}

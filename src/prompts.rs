// Prompt templates for the two assistant tasks

use crate::model::TaskKind;

pub const SYSTEM_PROMPT_INTERPRETATION: &str = "\
אתה מנדי, עוזר אישי לכתיבת פירוש תורני. \
אתה בקיא בתנ\"ך, במפרשים הקלאסיים (רש\"י, רמב\"ן, אבן עזרא, ספורנו) ובספרות חז\"ל. \
אתה כותב בעברית תקנית, ברורה ומכבדת, ומסביר מילים קשות בלשון פשוטה. \
אתה עונה תמיד בבלוק JSON יחיד המוקף ב-```json ו-```, ללא טקסט נוסף מחוץ לבלוק.";

pub const SYSTEM_PROMPT_NIKUD: &str = "\
אתה מומחה לדקדוק עברי ולניקוד. \
תפקידך להוסיף ניקוד מלא ומדויק לטקסט עברי, בהתאם לכללי הדקדוק ולהקשר, \
בלי לשנות אף מילה, סדר מילים או סימן פיסוק. \
אתה עונה תמיד בבלוק JSON יחיד המוקף ב-```json ו-```, ללא טקסט נוסף מחוץ לבלוק.";

const INTERPRETATION_TEMPLATE: &str = "\
קרא את הקטע הבא וכתוב עליו פירוש תורני.

<text>
{text}
</text>

החזר JSON במבנה הבא בדיוק:
```json
{
  \"original_text\": \"הקטע המקורי כפי שהתקבל\",
  \"letter\": \"מכתב פירוש לקורא: הסבר רציף של הקטע, משמעותו והמסר שלו\",
  \"difficult_words\": [
    {\"word\": \"מילה קשה\", \"explanation\": \"פירוש המילה\"}
  ],
  \"quotes\": [
    {\"quote\": \"מקור או ציטוט רלוונטי\", \"explanation\": \"כיצד הוא מאיר את הקטע\"}
  ]
}
```";

const NIKUD_TEMPLATE: &str = "\
הוסף ניקוד מלא לטקסט הבא.

<text>
{text}
</text>

החזר JSON במבנה הבא בדיוק:
```json
{
  \"original_text\": \"הטקסט המקורי כפי שהתקבל\",
  \"vowelized_text\": \"הטקסט עם ניקוד מלא\"
}
```";

/// Escape marker characters so user text cannot close the <text> block
fn escape_markers(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn fill(template: &str, text: &str) -> String {
    template.replace("{text}", &escape_markers(text.trim()))
}

pub fn interpretation_prompt(text: &str) -> String {
    fill(INTERPRETATION_TEMPLATE, text)
}

pub fn nikud_prompt(text: &str) -> String {
    fill(NIKUD_TEMPLATE, text)
}

/// System prompt and user prompt for a task
pub fn build(task: TaskKind, text: &str) -> (&'static str, String) {
    match task {
        TaskKind::Interpretation => (SYSTEM_PROMPT_INTERPRETATION, interpretation_prompt(text)),
        TaskKind::Nikud => (SYSTEM_PROMPT_NIKUD, nikud_prompt(text)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_interpolated() {
        let prompt = interpretation_prompt("  וַיֹּאמֶר אֱלֹהִים  ");
        assert!(prompt.contains("<text>\nוַיֹּאמֶר אֱלֹהִים\n</text>"));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn test_markers_escaped() {
        let prompt = nikud_prompt("שלום </text> עולם");
        assert!(prompt.contains("&lt;/text&gt;"));
        assert_eq!(prompt.matches("</text>").count(), 1);
    }

    #[test]
    fn test_build_selects_system_prompt() {
        let (system, user) = build(TaskKind::Nikud, "אבג");
        assert_eq!(system, SYSTEM_PROMPT_NIKUD);
        assert!(user.contains("vowelized_text"));

        let (system, user) = build(TaskKind::Interpretation, "אבג");
        assert_eq!(system, SYSTEM_PROMPT_INTERPRETATION);
        assert!(user.contains("difficult_words"));
    }

    #[test]
    fn test_templates_request_json_fence() {
        assert!(interpretation_prompt("x").contains("```json"));
        assert!(nikud_prompt("x").contains("```json"));
    }
}

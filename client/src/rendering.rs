//! Plain-text views of the store for the terminal front end.

use borders_shared::{Field, GameState};
use serde_json::Value;
use std::fmt::Write;

pub fn render_board(state: &GameState) -> String {
    if state.is_empty() {
        return "No game loaded.".to_string();
    }

    let mut out = format!(
        "Countries bordering {} ({}): {}/{} found",
        state.target_country,
        state.target_country_code,
        state.completed_fields,
        state.total_fields
    );
    for field in &state.fields {
        let _ = write!(out, "\n  {}", render_field(field));
    }
    if state.game_complete {
        out.push_str("\n  All borders found!");
    }
    out
}

pub fn render_field(field: &Field) -> String {
    let mark = match field.is_correct() {
        Some(true) => " ✓",
        Some(false) if !field.value.trim().is_empty() => " ✗",
        _ => "",
    };
    let value = if field.value.is_empty() {
        "____"
    } else {
        field.value.as_str()
    };
    format!("[{}] {}{}", field.id, value, mark)
}

/// Lists `correct_answer` per field when the payload has that shape, otherwise
/// prints the JSON as-is.
pub fn render_reveal(answers: &Value) -> String {
    let fields = answers.get("fields").and_then(Value::as_array);
    let Some(fields) = fields else {
        return serde_json::to_string_pretty(answers).unwrap_or_else(|_| answers.to_string());
    };

    let target = answers
        .get("target_country")
        .and_then(Value::as_str)
        .unwrap_or("the target");
    let mut out = format!("Countries bordering {}:", target);
    for field in fields {
        let id = field.get("id").map(Value::to_string).unwrap_or_default();
        let answer = field
            .get("correct_answer")
            .and_then(Value::as_str)
            .unwrap_or("?");
        let _ = write!(out, "\n  [{}] {}", id, answer);
    }
    out
}

pub fn render_suggestions(query: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("No suggestions for '{}'", query)
    } else {
        format!("Suggestions for '{}': {}", query, suggestions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn annotated(id: u32, value: &str, correct: bool) -> Field {
        let mut field = Field::new(id, value);
        field.annotations.insert("is_correct".into(), json!(correct));
        field
    }

    #[test]
    fn test_render_empty_board() {
        assert_eq!(render_board(&GameState::default()), "No game loaded.");
    }

    #[test]
    fn test_render_board() {
        let state = GameState {
            target_country: "Portugal".to_string(),
            target_country_code: "PRT".to_string(),
            fields: vec![annotated(0, "Spain", true)],
            total_fields: 1,
            completed_fields: 1,
            game_complete: true,
        };

        assert_eq!(
            render_board(&state),
            "Countries bordering Portugal (PRT): 1/1 found\n  [0] Spain ✓\n  All borders found!"
        );
    }

    #[test]
    fn test_render_field_marks() {
        assert_eq!(render_field(&Field::new(3, "")), "[3] ____");
        assert_eq!(render_field(&annotated(1, "Chile", false)), "[1] Chile ✗");
        assert_eq!(render_field(&annotated(2, "", false)), "[2] ____");
    }

    #[test]
    fn test_render_reveal_fields() {
        let answers = json!({
            "target_country": "Spain",
            "fields": [
                {"id": 0, "correct_answer": "France"},
                {"id": 1, "correct_answer": "Portugal"}
            ]
        });
        assert_eq!(
            render_reveal(&answers),
            "Countries bordering Spain:\n  [0] France\n  [1] Portugal"
        );
    }

    #[test]
    fn test_render_reveal_opaque_payload() {
        let answers = json!(["France", "Portugal"]);
        assert_eq!(
            render_reveal(&answers),
            "[\n  \"France\",\n  \"Portugal\"\n]"
        );
    }

    #[test]
    fn test_render_suggestions() {
        assert_eq!(render_suggestions("xx", &[]), "No suggestions for 'xx'");
        let found = vec!["France".to_string(), "Finland".to_string()];
        assert_eq!(
            render_suggestions("f", &found),
            "Suggestions for 'f': France, Finland"
        );
    }
}

use mufrodat_types::{EntryDraft, EntryFields, QuestionKind, QuizQuestion};
use serde::Deserialize;
use serde_json::Value;

use crate::AssistError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteQuestion {
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

fn top_level_array(json: &str, field: &str) -> Result<Vec<Value>, AssistError> {
    let mut value: Value = serde_json::from_str(json.trim())
        .map_err(|e| AssistError::InvalidResponse(format!("Not JSON: {}", e)))?;

    match value.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(AssistError::InvalidResponse(format!(
            "'{}' is not an array",
            field
        ))),
        None => Err(AssistError::InvalidResponse(format!("Missing '{}'", field))),
    }
}

/// Validate a `{ vocabulary: [...] }` reply.
///
/// Every item must carry a string `singular`, otherwise the whole reply is
/// rejected. An empty meaning is kept, items whose singular trims to nothing
/// are skipped, the same way the local parser treats them.
pub fn parse_vocabulary_response(json: &str) -> Result<Vec<EntryDraft>, AssistError> {
    let items = top_level_array(json, "vocabulary")?;
    let mut drafts = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        if !item.get("singular").is_some_and(Value::is_string) {
            tracing::warn!("Vocabulary item {} has no singular form", index);
            return Err(AssistError::InvalidResponse(format!(
                "Vocabulary item {} lacks a singular form",
                index
            )));
        }

        let mut fields: EntryFields = serde_json::from_value(item).map_err(|e| {
            AssistError::InvalidResponse(format!("Vocabulary item {}: {}", index, e))
        })?;
        for value in [
            &mut fields.singular,
            &mut fields.dual,
            &mut fields.plural,
            &mut fields.meaning,
            &mut fields.notes,
        ] {
            *value = value.trim().to_string();
        }

        if fields.singular.is_empty() {
            tracing::debug!("Skipping vocabulary item {} with an empty singular", index);
            continue;
        }
        drafts.push(EntryDraft::from(fields));
    }

    tracing::debug!("Assistant returned {} vocabulary drafts", drafts.len());
    Ok(drafts)
}

/// Validate a `{ quiz: [...] }` reply. Any bad question rejects the whole reply.
pub fn parse_quiz_response(json: &str) -> Result<Vec<QuizQuestion>, AssistError> {
    top_level_array(json, "quiz")?
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let remote: RemoteQuestion = serde_json::from_value(item).map_err(|e| {
                AssistError::InvalidResponse(format!("Quiz question {}: {}", index, e))
            })?;

            if remote.options.len() < 2 {
                tracing::warn!("Quiz question {} has {} options", index, remote.options.len());
                return Err(AssistError::InvalidResponse(format!(
                    "Quiz question {} has fewer than two options",
                    index
                )));
            }
            if !remote.options.contains(&remote.correct_answer) {
                tracing::warn!("Quiz question {} answer is not an option", index);
                return Err(AssistError::InvalidResponse(format!(
                    "Quiz question {}: correct answer is not among the options",
                    index
                )));
            }

            Ok(QuizQuestion {
                prompt: remote.question,
                options: remote.options,
                correct_answer: remote.correct_answer,
                kind: QuestionKind::Remote,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mufrodat_types::EntryKind;

    #[test]
    fn test_vocabulary_reply() {
        let json = r#"{
            "vocabulary": [
                { "singular": "لِحَافٌ", "dual": "لِحَافَانِ", "plural": "لُحُفٌ", "meaning": "Selimut", "notes": "" },
                { "singular": "أَنَا مُتْعَبٌ.", "meaning": "Aku lelah.", "notes": "Islahul Lughoh" }
            ]
        }"#;
        let drafts = parse_vocabulary_response(json).unwrap();

        assert_eq!(
            drafts,
            vec![
                EntryKind::noun("لِحَافٌ", "لِحَافَانِ", "لُحُفٌ", "Selimut"),
                EntryKind::idiom("أَنَا مُتْعَبٌ.", "Aku lelah."),
            ]
        );
    }

    #[test]
    fn test_vocabulary_reply_shape_errors() {
        for json in [
            "not json",
            r#"{}"#,
            r#"{"vocabulary": {}}"#,
            r#"{"vocabulary": [{"meaning": "x"}]}"#,
            r#"{"vocabulary": [{"singular": 7, "meaning": "x"}]}"#,
            r#"{"vocabulary": [42]}"#,
        ] {
            assert!(
                matches!(
                    parse_vocabulary_response(json),
                    Err(AssistError::InvalidResponse(_))
                ),
                "{json}"
            );
        }
    }

    #[test]
    fn test_vocabulary_reply_keeps_empty_meaning() {
        let json = r#"{"vocabulary": [
            {"singular": "كِتَابٌ", "plural": "كُتُبٌ", "meaning": "buku"},
            {"singular": "قَلَمٌ", "meaning": ""},
            {"singular": "  ", "meaning": "kosong"}
        ]}"#;
        let drafts = parse_vocabulary_response(json).unwrap();

        assert_eq!(
            drafts,
            vec![
                EntryKind::noun("كِتَابٌ", "", "كُتُبٌ", "buku"),
                EntryKind::noun("قَلَمٌ", "", "", ""),
            ]
        );
    }

    #[test]
    fn test_quiz_reply() {
        let json = r#"{"quiz": [
            {"question": "Apa bentuk jamak dari kitab?", "options": ["كُتُبٌ", "أَقْلَامٌ", "بُيُوْتٌ", "أَبْوَابٌ"], "correctAnswer": "كُتُبٌ"}
        ]}"#;
        let quiz = parse_quiz_response(json).unwrap();

        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz[0].kind, QuestionKind::Remote);
        assert_eq!(quiz[0].correct_answer, "كُتُبٌ");
        assert_eq!(quiz[0].options.len(), 4);
    }

    #[test]
    fn test_quiz_reply_rejected_when_answer_missing() {
        let json = r#"{"quiz": [
            {"question": "ok", "options": ["a", "b"], "correctAnswer": "a"},
            {"question": "bad", "options": ["a", "b"], "correctAnswer": "c"}
        ]}"#;

        assert!(matches!(
            parse_quiz_response(json),
            Err(AssistError::InvalidResponse(_))
        ));
        assert!(parse_quiz_response(r#"{"quiz": "nope"}"#).is_err());
    }
}

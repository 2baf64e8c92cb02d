//! Cheap keyword checks run before the model is involved.

const SAVE_WORDS: &[&str] = &[
    "guardar", "salvar", "anotar", "ideia", "nota", "registrar", "gravar",
];
const INTEREST_WORDS: &[&str] = &["interes", "interres"];
const AREA_WORDS: &[&str] = &["área", "area"];
const NEGATIVE_REPLIES: &[&str] = &["não", "nao", "n", "cancelar"];

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|w| text.contains(w))
}

/// The message probably asks to store a note, so the taxonomy is worth
/// fetching for the main prompt.
pub fn looks_like_save_request(text: &str) -> bool {
    contains_any(&text.trim().to_lowercase(), SAVE_WORDS)
}

/// The message asks for the list of interests and areas.
pub fn looks_like_category_question(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    text.contains("categ")
        || (contains_any(&text, INTEREST_WORDS) && contains_any(&text, AREA_WORDS))
}

/// Explicit refusal of a pending confirmation.
pub fn is_negative_reply(text: &str) -> bool {
    NEGATIVE_REPLIES.contains(&text.trim().to_lowercase().as_str())
}

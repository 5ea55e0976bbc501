use std::sync::LazyLock;

/// Trigger terms whose presence in a clinical note raises diabetes risk.
pub const TRIGGER_TERMS: [&str; 12] = [
    "Hémoglobine A1C",
    "Microalbumine",
    "Taille",
    "Poids",
    "Fumeur",
    "Fumeuse",
    "Anormal",
    "Cholestérol",
    "Vertiges",
    "Rechute",
    "Réaction",
    "Anticorps",
];

/// Lowercased trigger terms, built once on first use.
static LOWERCASE_TERMS: LazyLock<Vec<String>> =
    LazyLock::new(|| TRIGGER_TERMS.iter().map(|t| t.to_lowercase()).collect());

/// Trigger terms found in a single note, in vocabulary order.
///
/// Case-insensitive substring containment: "anormales" matches `Anormal`.
/// Each term is reported at most once per note.
pub fn matched_terms(note: &str) -> Vec<&'static str> {
    let lower = note.to_lowercase();
    TRIGGER_TERMS
        .iter()
        .zip(LOWERCASE_TERMS.iter())
        .filter(|(_, term)| lower.contains(term.as_str()))
        .map(|(original, _)| *original)
        .collect()
}

/// Total number of (note, term) pairs where the note contains the term.
pub fn count_triggers<S: AsRef<str>>(notes: &[S]) -> usize {
    notes
        .iter()
        .map(|note| {
            let lower = note.as_ref().to_lowercase();
            LOWERCASE_TERMS
                .iter()
                .filter(|term| lower.contains(term.as_str()))
                .count()
        })
        .sum()
}

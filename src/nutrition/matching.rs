use super::FoodCandidate;

const EXACT_MATCH: i32 = 100;
const PREFIX_MATCH: i32 = 60;
const SUBSTRING_MATCH: i32 = 30;
const WORD_MATCH: i32 = 10;

/// Description words that mark an unprocessed food
const PREFERRED_TERMS: &[(&str, i32)] = &[("raw", 15), ("fresh", 10)];

/// Processing words, penalized unless the query asks for them
const PROCESSED_TERMS: &[&str] = &[
    "baked", "boiled", "breaded", "candied", "canned", "cooked", "dehydrated", "dried",
    "flavored", "fried", "frozen", "juice", "mix", "pickled", "powder", "powdered",
    "prepared", "roasted", "sauce", "smoked", "snack", "soup", "sweetened",
];
const PROCESSED_PENALTY: i32 = 20;

/// Data types with lab-analyzed reference values
const REFERENCE_DATA_TYPES: &[(&str, i32)] =
    &[("Foundation", 20), ("SR Legacy", 20), ("Survey (FNDDS)", 5)];
const BRANDED_DATA_TYPE: &str = "Branded";
const BRANDED_PENALTY: i32 = 40;

/// Lowercase, punctuation to spaces, single-spaced.
pub fn clean_query(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// How well `candidate` fits the ingredient `query`; higher is better.
pub fn score_candidate(query: &str, candidate: &FoodCandidate) -> i32 {
    let query = clean_query(query);
    let description = clean_query(&candidate.description);
    let query_words: Vec<&str> = query.split_whitespace().collect();
    let description_words: Vec<&str> = description.split_whitespace().collect();

    let mut score = if query.is_empty() {
        0
    } else if description == query {
        EXACT_MATCH
    } else if description.starts_with(&query) {
        PREFIX_MATCH
    } else if description.contains(&query) {
        SUBSTRING_MATCH
    } else {
        query_words
            .iter()
            .filter(|word| description_words.contains(*word))
            .count() as i32
            * WORD_MATCH
    };

    for (term, bonus) in PREFERRED_TERMS {
        if description_words.contains(term) {
            score += bonus;
        }
    }

    for term in PROCESSED_TERMS {
        if description_words.contains(term) && !query_words.contains(term) {
            score -= PROCESSED_PENALTY;
        }
    }

    if candidate.data_type.eq_ignore_ascii_case(BRANDED_DATA_TYPE) {
        score -= BRANDED_PENALTY;
    }
    if let Some((_, bonus)) = REFERENCE_DATA_TYPES
        .iter()
        .find(|(data_type, _)| candidate.data_type.eq_ignore_ascii_case(data_type))
    {
        score += bonus;
    }

    score
}

/// Highest scoring candidate; the earliest one wins a tie.
pub fn best_match<'a>(query: &str, candidates: &'a [FoodCandidate]) -> Option<&'a FoodCandidate> {
    let mut best: Option<(&FoodCandidate, i32)> = None;
    for candidate in candidates {
        let score = score_candidate(query, candidate);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

// src/core/generator.rs

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::knowledge::{Category, KnowledgeBase};

/// One synthesized multiple-choice question, ready to be persisted as a
/// question row by the caller.
///
/// Invariant: `options[correct_option - 1]` is the fact that was selected
/// as the correct answer, regardless of how the shuffle landed. `options`
/// are pairwise distinct; they normally hold 4 entries but may hold fewer
/// when the knowledge base cannot supply 3 distractors for the chosen
/// category.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuestion {
    pub statement: String,
    pub options: Vec<String>,
    /// 1-based index into `options`.
    pub correct_option: usize,
}

#[derive(Debug)]
pub enum GeneratorError {
    /// There is nothing to sample from.
    EmptyKnowledgeBase,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::EmptyKnowledgeBase => write!(f, "knowledge base unavailable"),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Generates `count` multiple-choice questions from `keywords`.
///
/// * `keywords` is a comma-separated list; tokens are trimmed and
///   lower-cased before matching knowledge-base topics.
/// * Tokens with no matching topic are ignored; when none match at all,
///   the full topic set is used instead.
/// * Each question is drawn independently, so topics and templates may
///   repeat across the batch.
///
/// The random source is passed in so callers can seed it for
/// deterministic output.
pub fn generate<R: Rng + ?Sized>(
    kb: &KnowledgeBase,
    keywords: &str,
    count: usize,
    rng: &mut R,
) -> Result<Vec<GeneratedQuestion>, GeneratorError> {
    if kb.is_empty() {
        return Err(GeneratorError::EmptyKnowledgeBase);
    }

    let requested: Vec<String> = keywords
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| kb.contains(k))
        .collect();

    let topics: Vec<&str> = if requested.is_empty() {
        kb.topic_names().collect()
    } else {
        requested.iter().map(String::as_str).collect()
    };

    let mut questions = Vec::with_capacity(count);
    for _ in 0..count {
        let topic = *topics
            .choose(rng)
            .ok_or(GeneratorError::EmptyKnowledgeBase)?;
        let category = *Category::ALL
            .choose(rng)
            .expect("category table is non-empty");
        questions.push(build_question(kb, topic, category, rng)?);
    }

    Ok(questions)
}

fn build_question<R: Rng + ?Sized>(
    kb: &KnowledgeBase,
    topic: &str,
    category: Category,
    rng: &mut R,
) -> Result<GeneratedQuestion, GeneratorError> {
    let facts = kb.get(topic).ok_or(GeneratorError::EmptyKnowledgeBase)?;

    let template = category
        .templates()
        .choose(rng)
        .expect("template tables are non-empty");
    let statement = template.replace("{keyword}", &capitalize(topic));

    let own_facts = category.fact_pool(facts);
    let correct = *own_facts
        .choose(rng)
        .ok_or(GeneratorError::EmptyKnowledgeBase)?;

    // Distractors come from the same fact list of every other topic.
    // Topics may share fact text ("Web development" is both a python and
    // an html application), so drop anything that reads as a fact of the
    // chosen topic and dedupe the rest; otherwise an option could appear
    // twice or a distractor could be a right answer.
    let mut pool: Vec<&str> = kb
        .other_topics(topic)
        .flat_map(|(_, other)| category.fact_pool(other).iter().copied())
        .filter(|fact| !own_facts.contains(fact))
        .collect();
    pool.sort_unstable();
    pool.dedup();

    let mut options: Vec<String> = pool
        .choose_multiple(rng, 3)
        .map(|d| d.to_string())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);

    let correct_option = options
        .iter()
        .position(|o| o.as_str() == correct)
        .expect("correct answer is always among the options")
        + 1;

    Ok(GeneratedQuestion {
        statement,
        options,
        correct_option,
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn capitalize_handles_short_words() {
        assert_eq!(capitalize("css"), "Css");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn statement_contains_capitalized_topic() {
        let kb = KnowledgeBase::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let q = build_question(&kb, "python", Category::Definition, &mut rng).unwrap();
        assert!(q.statement.contains("Python"), "got: {}", q.statement);
    }

    #[test]
    fn empty_knowledge_base_is_an_error() {
        let kb = KnowledgeBase::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate(&kb, "python", 3, &mut rng).unwrap_err();
        assert!(matches!(err, GeneratorError::EmptyKnowledgeBase));
    }
}

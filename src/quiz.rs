//! Question catalog
//!
//! Phrasal verb prompts with three Korean meaning choices, one correct.

use std::rc::Rc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Number of answer choices per question (one per lane)
pub const CHOICE_COUNT: usize = 3;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub prompt: String,
    pub choices: [String; CHOICE_COUNT],
    pub correct_index: usize,
}

impl Question {
    pub fn new(prompt: impl Into<String>, choices: [&str; CHOICE_COUNT], correct_index: usize) -> Result<Self> {
        QuestionRecord {
            prompt: prompt.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_index,
        }
        .try_into()
    }

    /// Label of the correct choice
    pub fn answer(&self) -> &str {
        &self.choices[self.correct_index]
    }
}

/// Unvalidated question as it appears in a JSON catalog
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = GameError;

    fn try_from(record: QuestionRecord) -> Result<Self> {
        let count = record.choices.len();
        let choices: [String; CHOICE_COUNT] = record.choices.try_into().map_err(|_| {
            GameError::config(format!(
                "question '{}' has {count} choices, expected {CHOICE_COUNT}",
                record.prompt
            ))
        })?;
        if record.correct_index >= CHOICE_COUNT {
            return Err(GameError::config(format!(
                "question '{}' has correct_index {} out of range",
                record.prompt, record.correct_index
            )));
        }
        Ok(Self {
            prompt: record.prompt,
            choices,
            correct_index: record.correct_index,
        })
    }
}

/// Built-in catalog: (prompt, choices, correct index)
const DEFAULT_QUESTIONS: &[(&str, [&str; CHOICE_COUNT], usize)] = &[
    ("drop by", ["밥먹다", "잠시 들르다", "반성하다"], 1),
    ("look after", ["돌보다", "뒤돌아보다", "찾아보다"], 0),
    ("put off", ["연기하다", "벗다", "올려놓다"], 0),
    ("run into", ["우연히 만나다", "뛰어들다", "달리기 시작하다"], 0),
];

/// Question bank with uniform random draws
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Rc<Question>>,
    /// Refill from the built-in catalog when drawn empty
    auto_load: bool,
}

impl Default for QuestionBank {
    fn default() -> Self {
        let mut bank = Self::empty(true);
        bank.load_default();
        bank
    }
}

impl QuestionBank {
    /// Empty bank; `auto_load` wires the built-in catalog as lazy loader
    pub fn empty(auto_load: bool) -> Self {
        Self {
            questions: Vec::new(),
            auto_load,
        }
    }

    /// Bank over a fixed question set, without a default loader
    pub fn from_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: questions.into_iter().map(Rc::new).collect(),
            auto_load: false,
        }
    }

    /// Load a JSON array of question records; any malformed record rejects the load
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
        let questions = records
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>>>()?;
        if questions.is_empty() {
            return Err(GameError::EmptyBank);
        }
        log::info!("Loaded {} questions", questions.len());
        Ok(Self::from_questions(questions))
    }

    /// Clear and repopulate with the built-in phrasal verbs
    pub fn load_default(&mut self) {
        self.questions = DEFAULT_QUESTIONS
            .iter()
            .map(|(prompt, choices, correct_index)| {
                Rc::new(Question {
                    prompt: prompt.to_string(),
                    choices: choices.map(str::to_string),
                    correct_index: *correct_index,
                })
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Uniformly random question, loading the default catalog if empty
    pub fn random<R: Rng>(&mut self, rng: &mut R) -> Result<Rc<Question>> {
        if self.questions.is_empty() {
            if !self.auto_load {
                return Err(GameError::EmptyBank);
            }
            self.load_default();
        }
        let idx = rng.random_range(0..self.questions.len());
        Ok(Rc::clone(&self.questions[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_bank() {
        let bank = QuestionBank::default();
        assert_eq!(bank.len(), 4);
    }

    #[test]
    fn test_load_default_is_idempotent() {
        let mut bank = QuestionBank::default();
        bank.load_default();
        bank.load_default();
        assert_eq!(bank.len(), 4);
    }

    #[test]
    fn test_lazy_load_on_empty() {
        let mut bank = QuestionBank::empty(true);
        let mut rng = Pcg32::seed_from_u64(1);
        let q = bank.random(&mut rng).unwrap();
        assert_eq!(q.choices.len(), CHOICE_COUNT);
        assert_eq!(bank.len(), 4);
    }

    #[test]
    fn test_empty_bank_without_loader() {
        let mut bank = QuestionBank::empty(false);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(bank.random(&mut rng), Err(GameError::EmptyBank)));
    }

    #[test]
    fn test_random_covers_catalog() {
        let mut bank = QuestionBank::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(bank.random(&mut rng).unwrap().prompt.clone());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_question_validation() {
        assert!(Question::new("drop by", ["a", "b", "c"], 2).is_ok());
        assert!(matches!(
            Question::new("drop by", ["a", "b", "c"], 3),
            Err(GameError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "prompt": "give up", "choices": ["포기하다", "주다", "올리다"], "correct_index": 0 }
        ]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_wrong_choice_count() {
        let json = r#"[
            { "prompt": "give up", "choices": ["포기하다", "주다"], "correct_index": 0 }
        ]"#;
        let err = QuestionBank::from_json(json).unwrap_err();
        assert!(err.to_string().contains("give up"));
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let bank = QuestionBank::from_json(include_str!("../data/questions.json")).unwrap();
        assert_eq!(bank.len(), 8);
    }

    #[test]
    fn test_answer() {
        let q = Question::new("drop by", ["밥먹다", "잠시 들르다", "반성하다"], 1).unwrap();
        assert_eq!(q.answer(), "잠시 들르다");
    }
}

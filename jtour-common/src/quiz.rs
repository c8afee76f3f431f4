//! Culture quiz

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
    /// Index into `choices`
    pub answer: usize,
    /// Shown after the question is answered
    pub fact: &'static str,
    pub points: u32,
}

pub const QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        id: "sarhul-flower",
        prompt: "Which tree's blossoms are offered during Sarhul?",
        choices: &["Mahua", "Sal", "Palash", "Neem"],
        answer: 1,
        fact: "Sarhul literally means 'worship of sal' and marks the tribal new year.",
        points: 10,
    },
    QuizQuestion {
        id: "hundru-river",
        prompt: "Hundru Falls is formed by which river?",
        choices: &["Damodar", "Koel", "Subarnarekha", "Barakar"],
        answer: 2,
        fact: "The Subarnarekha drops 98 metres at Hundru on its way to the Bay of Bengal.",
        points: 10,
    },
    QuizQuestion {
        id: "statehood-day",
        prompt: "Jharkhand was carved out of Bihar on the birth anniversary of which leader?",
        choices: &["Birsa Munda", "Sidho Murmu", "Tilka Manjhi", "Jaipal Singh Munda"],
        answer: 0,
        fact: "The state was formed on 15 November 2000, Birsa Munda's birth anniversary.",
        points: 15,
    },
    QuizQuestion {
        id: "sohrai-art",
        prompt: "Sohrai and Khovar wall paintings are most associated with which district?",
        choices: &["Dhanbad", "Hazaribagh", "Ranchi", "Pakur"],
        answer: 1,
        fact: "Sohrai and Khovar painting from Hazaribagh received a GI tag in 2020.",
        points: 15,
    },
    QuizQuestion {
        id: "deoghar-temple",
        prompt: "Deoghar's Baidyanath Dham is one of the twelve what?",
        choices: &["Shakti Peeths", "Char Dhams", "Jyotirlingas", "Divya Desams"],
        answer: 2,
        fact: "Pilgrims walk over 100 km during Shravani Mela to offer water at Baidyanath.",
        points: 10,
    },
    QuizQuestion {
        id: "dhuska",
        prompt: "Dhuska is made mainly from rice and what?",
        choices: &["Wheat", "Urad or chana dal", "Corn", "Ragi"],
        answer: 1,
        fact: "Dhuska is usually served with a spicy potato and chickpea curry.",
        points: 5,
    },
];

/// A question as shown to the player, without the answer
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    pub choices: &'static [&'static str],
    pub points: u32,
}

impl From<&QuizQuestion> for PublicQuestion {
    fn from(q: &QuizQuestion) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            choices: q.choices,
            points: q.points,
        }
    }
}

pub fn public_questions() -> Vec<PublicQuestion> {
    QUESTIONS.iter().map(PublicQuestion::from).collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub choice: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub question_id: String,
    pub correct: bool,
    pub correct_choice: usize,
    pub fact: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: u32,
    pub max_score: u32,
    pub correct: usize,
    pub results: Vec<AnswerResult>,
}

/// Score a set of answers against the question bank
///
/// Unknown question ids are skipped, only the first answer to a question
/// counts and out-of-range choices are simply wrong.
pub fn score(answers: &[Answer]) -> QuizResult {
    let mut seen = HashSet::new();
    let mut results = Vec::new();
    let mut score = 0;

    for answer in answers {
        let Some(question) = QUESTIONS.iter().find(|q| q.id == answer.question_id) else {
            continue;
        };
        if !seen.insert(question.id) {
            continue;
        }
        let correct = answer.choice == question.answer;
        if correct {
            score += question.points;
        }
        results.push(AnswerResult {
            question_id: question.id.to_string(),
            correct,
            correct_choice: question.answer,
            fact: question.fact,
        });
    }

    QuizResult {
        score,
        max_score: QUESTIONS.iter().map(|q| q.points).sum(),
        correct: results.iter().filter(|r| r.correct).count(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(id: &str, choice: usize) -> Answer {
        Answer {
            question_id: id.to_string(),
            choice,
        }
    }

    #[test]
    fn test_answers_are_in_range() {
        for q in QUESTIONS {
            assert!(q.answer < q.choices.len(), "{} answer out of range", q.id);
        }
    }

    #[test]
    fn test_scoring() {
        let result = score(&[answer("sarhul-flower", 1), answer("hundru-river", 0)]);
        assert_eq!(result.score, 10);
        assert_eq!(result.correct, 1);
        assert_eq!(result.max_score, 65);
        assert_eq!(result.results.len(), 2);
        assert!(!result.results[1].correct);
        assert_eq!(result.results[1].correct_choice, 2);
    }

    #[test]
    fn test_first_answer_wins_and_unknown_ignored() {
        let result = score(&[
            answer("statehood-day", 3),
            answer("statehood-day", 0),
            answer("no-such-question", 0),
            answer("dhuska", 99),
        ]);
        assert_eq!(result.score, 0);
        assert_eq!(result.results.len(), 2);
    }

    #[test]
    fn test_public_questions_hide_answers() {
        let json = serde_json::to_value(public_questions()).unwrap();
        assert!(json[0].get("answer").is_none());
        assert_eq!(json[0]["id"], "sarhul-flower");
    }
}

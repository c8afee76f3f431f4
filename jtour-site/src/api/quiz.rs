//! Culture quiz API

use axum::Json;

use jtour_common::quiz::{public_questions, score, Answer, PublicQuestion, QuizResult};

/// GET /api/quiz
pub async fn get_quiz() -> Json<Vec<PublicQuestion>> {
    Json(public_questions())
}

/// POST /api/quiz/score
pub async fn score_quiz(Json(answers): Json<Vec<Answer>>) -> Json<QuizResult> {
    Json(score(&answers))
}

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod error;

use alloc::{string::String, vec::Vec};
use futures_util::{pin_mut, TryStreamExt};
use tokio::sync::Mutex;
use tokio_postgres::types::ToSql;

pub use model::{
    quiz::{Question, QuestionKind, Quiz},
    submission::{NewQuestion, NewQuiz},
};
pub use tokio_postgres::{tls::NoTls, Client, Config};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS quiz (\
        id SERIAL PRIMARY KEY, \
        title TEXT NOT NULL); \
    CREATE TABLE IF NOT EXISTS question (\
        id SERIAL PRIMARY KEY, \
        quiz_id INTEGER NOT NULL REFERENCES quiz (id), \
        type TEXT NOT NULL, \
        text TEXT NOT NULL, \
        options TEXT[] NOT NULL DEFAULT '{}', \
        answer TEXT NOT NULL)";

// One row per question, so a single statement sees one snapshot and a
// racing delete can never expose a half-deleted quiz.
const SELECT_ALL: &str = "SELECT quiz.id AS quiz_id, quiz.title, \
        question.id AS question_id, question.type AS kind, \
        question.text, question.options, question.answer \
    FROM quiz LEFT JOIN question ON question.quiz_id = quiz.id \
    ORDER BY quiz.id, question.id";

const SELECT_ONE: &str = "SELECT quiz.id AS quiz_id, quiz.title, \
        question.id AS question_id, question.type AS kind, \
        question.text, question.options, question.answer \
    FROM quiz LEFT JOIN question ON question.quiz_id = quiz.id \
    WHERE quiz.id = $1 ORDER BY question.id";

pub struct Database(Mutex<Client>);

impl From<Client> for Database {
    fn from(client: Client) -> Self {
        Self(Mutex::new(client))
    }
}

/// Folds one joined row into the accumulated quizzes. Rows arrive grouped
/// by quiz identifier; a quiz without questions yields one row whose
/// question columns are all null.
fn fold_row(quizzes: &mut Vec<Quiz>, row: tokio_postgres::Row) -> error::Result<()> {
    let id: i32 = row.try_get("quiz_id").map_err(|_| error::Error::Fatal)?;
    if quizzes.last().map_or(true, |quiz| quiz.id != id) {
        let title = row.try_get("title").map_err(|_| error::Error::Fatal)?;
        quizzes.push(Quiz { id, title, questions: Vec::new() });
    }

    let question_id: Option<i32> = row.try_get("question_id").map_err(|_| error::Error::Fatal)?;
    let Some(question_id) = question_id else { return Ok(()) };

    let kind: String = row.try_get("kind").map_err(|_| error::Error::Fatal)?;
    let kind = QuestionKind::from_tag(&kind).ok_or(error::Error::Fatal)?;
    let text = row.try_get("text").map_err(|_| error::Error::Fatal)?;
    let options = row.try_get("options").map_err(|_| error::Error::Fatal)?;
    let answer = row.try_get("answer").map_err(|_| error::Error::Fatal)?;
    if let Some(quiz) = quizzes.last_mut() {
        quiz.questions.push(Question { id: question_id, quiz_id: quiz.id, kind, text, options, answer });
    }
    Ok(())
}

impl Database {
    /// Creates both tables if they do not yet exist.
    pub async fn setup(&self) -> error::Result<()> {
        let client = self.0.lock().await;
        client.batch_execute(SCHEMA).await.map_err(|_| error::Error::Fatal)
    }

    /// Persists the quiz and all of its questions as one unit. Either
    /// every row lands or none do.
    pub async fn create_quiz(&self, new: &NewQuiz) -> error::Result<Quiz> {
        let mut client = self.0.lock().await;
        let tx = client.transaction().await.map_err(|_| error::Error::Fatal)?;

        let row = tx
            .query_one("INSERT INTO quiz (title) VALUES ($1) RETURNING id", &[&new.title])
            .await
            .map_err(|_| error::Error::Fatal)?;
        let id: i32 = row.try_get("id").map_err(|_| error::Error::Fatal)?;

        let mut questions = Vec::with_capacity(new.questions.len());
        for question in &new.questions {
            let row = tx
                .query_one(
                    "INSERT INTO question (quiz_id, type, text, options, answer) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING id",
                    &[&id, &question.kind.as_str(), &question.text, &question.options, &question.answer],
                )
                .await
                .map_err(|_| error::Error::Fatal)?;
            let question_id: i32 = row.try_get("id").map_err(|_| error::Error::Fatal)?;
            questions.push(Question {
                id: question_id,
                quiz_id: id,
                kind: question.kind,
                text: question.text.clone(),
                options: question.options.clone(),
                answer: question.answer.clone(),
            });
        }

        tx.commit().await.map_err(|_| error::Error::Fatal)?;
        Ok(Quiz { id, title: new.title.clone(), questions })
    }

    /// Fetches one quiz with all of its questions.
    pub async fn get_quiz(&self, quiz: i32) -> error::Result<Quiz> {
        let client = self.0.lock().await;
        let rows = client.query(SELECT_ONE, &[&quiz]).await.map_err(|_| error::Error::Fatal)?;
        drop(client);

        let mut quizzes = Vec::new();
        for row in rows {
            fold_row(&mut quizzes, row)?;
        }
        quizzes.pop().ok_or(error::Error::NotFound)
    }

    /// Full-table scan: every quiz with its questions, streamed row by row.
    pub async fn get_quizzes(&self) -> error::Result<Vec<Quiz>> {
        let client = self.0.lock().await;
        let stream = client
            .query_raw(SELECT_ALL, core::iter::empty::<&(dyn ToSql + Sync)>())
            .await
            .map_err(|_| error::Error::Fatal)?;
        pin_mut!(stream);

        let mut quizzes = Vec::new();
        while let Some(row) = stream.try_next().await.map_err(|_| error::Error::Fatal)? {
            fold_row(&mut quizzes, row)?;
        }
        Ok(quizzes)
    }

    /// Removes the questions, then the quiz, inside one transaction.
    /// Deleting an identifier that never existed is a no-op, not an error.
    pub async fn delete_quiz(&self, quiz: i32) -> error::Result<()> {
        let mut client = self.0.lock().await;
        let tx = client.transaction().await.map_err(|_| error::Error::Fatal)?;
        tx.execute("DELETE FROM question WHERE quiz_id = $1", &[&quiz])
            .await
            .map_err(|_| error::Error::Fatal)?;
        tx.execute("DELETE FROM quiz WHERE id = $1", &[&quiz])
            .await
            .map_err(|_| error::Error::Fatal)?;
        tx.commit().await.map_err(|_| error::Error::Fatal)
    }
}

use db::Database;
use http_body_util::{BodyExt, Full};
use hyper::{
    body::{Bytes, Incoming},
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use model::submission::Submission;

use crate::error::Error;

fn json(status: StatusCode, body: Vec<u8>) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from(body)));
    *res.status_mut() = status;
    res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    res
}

/// `POST /quizzes`: parse, normalize, persist, then echo the created quiz
/// with its generated identifiers.
pub async fn create(db: &Database, body: Incoming) -> Result<Response<Full<Bytes>>, Error> {
    let bytes = body.collect().await.map_err(|_| Error::BadPayload)?.to_bytes();
    let submission: Submission = serde_json::from_slice(&bytes).map_err(|_| Error::BadPayload)?;
    let quiz = submission.normalize().map_err(Error::Rejected)?;
    let quiz = match db.create_quiz(&quiz).await {
        Ok(quiz) => quiz,
        Err(err) => {
            log::error!("quiz creation failed: {err}");
            return Err(Error::CreateFailed);
        }
    };
    let body = serde_json::to_vec(&quiz).map_err(|_| Error::CreateFailed)?;
    Ok(json(StatusCode::CREATED, body))
}

/// `GET /quizzes`: every quiz with its questions. An empty list is a
/// valid result, not an error.
pub async fn list(db: &Database) -> Result<Response<Full<Bytes>>, Error> {
    let quizzes = match db.get_quizzes().await {
        Ok(quizzes) => quizzes,
        Err(err) => {
            log::error!("quiz listing failed: {err}");
            return Err(Error::FetchFailed);
        }
    };
    let body = serde_json::to_vec(&quizzes).map_err(|_| Error::FetchFailed)?;
    Ok(json(StatusCode::OK, body))
}

/// `GET /quizzes/:id`: one quiz. Identifiers that do not parse name no
/// quiz, so they answer 404 like any other absent id.
pub async fn fetch(db: &Database, id: &str) -> Result<Response<Full<Bytes>>, Error> {
    let id = id.parse().map_err(|_| Error::NotFound)?;
    let quiz = match db.get_quiz(id).await {
        Ok(quiz) => quiz,
        Err(db::error::Error::NotFound) => return Err(Error::NotFound),
        Err(err) => {
            log::error!("quiz lookup failed: {err}");
            return Err(Error::FetchFailed);
        }
    };
    let body = serde_json::to_vec(&quiz).map_err(|_| Error::FetchFailed)?;
    Ok(json(StatusCode::OK, body))
}

/// `DELETE /quizzes/:id`: idempotent. An identifier that never existed,
/// or does not even parse, still acknowledges with 204.
pub async fn remove(db: &Database, id: &str) -> Result<Response<Full<Bytes>>, Error> {
    if let Ok(id) = id.parse::<i32>() {
        if let Err(err) = db.delete_quiz(id).await {
            log::error!("quiz deletion failed: {err}");
            return Err(Error::DeleteFailed);
        }
    }
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::NO_CONTENT;
    Ok(res)
}

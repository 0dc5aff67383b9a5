pub mod error;
mod quiz;

use db::Database;
use error::Error;
use http_body_util::Full;
use hyper::{
    body::{Bytes, Incoming},
    Method, Request, Response,
};

/// Extracts the identifier segment of `/quizzes/:id`, rejecting empty
/// segments and deeper paths.
fn quiz_id(rest: &str) -> Option<&str> {
    let id = rest.strip_prefix('/')?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(id)
}

async fn route(req: Request<Incoming>, db: &Database) -> Result<Response<Full<Bytes>>, Error> {
    let (parts, body) = req.into_parts();
    let rest = parts.uri.path().strip_prefix("/quizzes").ok_or(Error::UnknownRoute)?;

    if rest.is_empty() || rest == "/" {
        return if parts.method == Method::POST {
            quiz::create(db, body).await
        } else if parts.method == Method::GET {
            quiz::list(db).await
        } else {
            Err(Error::MethodNotAllowed)
        };
    }

    let id = quiz_id(rest).ok_or(Error::UnknownRoute)?;
    if parts.method == Method::GET {
        quiz::fetch(db, id).await
    } else if parts.method == Method::DELETE {
        quiz::remove(db, id).await
    } else {
        Err(Error::MethodNotAllowed)
    }
}

/// Maps one request to one store operation. Every failure collapses into
/// a fixed status and message pair.
pub async fn try_respond(req: Request<Incoming>, db: &Database) -> Response<Full<Bytes>> {
    route(req, db).await.unwrap_or_else(Error::into_response)
}

#[cfg(test)]
mod tests {
    use super::quiz_id;

    #[test]
    fn identifier_segments() {
        assert_eq!(quiz_id("/17"), Some("17"));
        assert_eq!(quiz_id("/unknown-id"), Some("unknown-id"));
        assert_eq!(quiz_id("/"), None);
        assert_eq!(quiz_id(""), None);
        assert_eq!(quiz_id("/17/answers"), None);
        assert_eq!(quiz_id("17"), None);
    }
}

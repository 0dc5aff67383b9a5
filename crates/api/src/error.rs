use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use model::submission;

pub enum Error {
    /// Path does not name a known resource.
    UnknownRoute,
    /// Known path, unsupported verb.
    MethodNotAllowed,
    /// Body was unreadable or not valid JSON for the submission schema.
    BadPayload,
    /// Submission parsed but failed validation.
    Rejected(submission::Error),
    NotFound,
    CreateFailed,
    FetchFailed,
    DeleteFailed,
}

impl Error {
    const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownRoute | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadPayload | Self::Rejected(_) => StatusCode::BAD_REQUEST,
            Self::CreateFailed | Self::FetchFailed | Self::DeleteFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        Some(match self {
            Self::UnknownRoute | Self::MethodNotAllowed => return None,
            Self::BadPayload => String::from("Malformed quiz payload"),
            Self::Rejected(err) => err.to_string(),
            Self::NotFound => String::from("Quiz not found"),
            Self::CreateFailed => String::from("Failed to create quiz"),
            Self::FetchFailed => String::from("Failed to fetch quizzes"),
            Self::DeleteFailed => String::from("Failed to delete quiz"),
        })
    }

    /// Fixed status and message pair; detail never leaks to the caller.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let status = self.status();
        let Some(message) = self.message() else {
            let mut res = Response::new(Full::new(Bytes::new()));
            *res.status_mut() = status;
            return res;
        };
        let body = serde_json::to_vec(&serde_json::json!({ "error": message })).unwrap_or_default();
        let mut res = Response::new(Full::new(Bytes::from(body)));
        *res.status_mut() = status;
        res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        res
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, StatusCode};

    #[test]
    fn statuses_match_the_taxonomy() {
        assert_eq!(Error::UnknownRoute.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(Error::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(Error::BadPayload.status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::CreateFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(Error::DeleteFailed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_carries_the_expected_body() {
        assert_eq!(Error::NotFound.message().unwrap(), "Quiz not found");
        let res = Error::NotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[super::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn routing_errors_have_empty_bodies() {
        assert!(Error::UnknownRoute.message().is_none());
        assert!(Error::MethodNotAllowed.message().is_none());
    }
}

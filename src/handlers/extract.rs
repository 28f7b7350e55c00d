use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::ports::Caller;

/// Header carrying the caller's API key. Requests without it (or with a key
/// the policy does not know) are treated as anonymous; whether anonymous
/// callers get anywhere is the access policy's decision, not the extractor's.
pub const API_KEY_HEADER: &str = "x-api-key";

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let api_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        ready(Ok(Caller { api_key }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn extracts_the_api_key_header() {
        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "abc123"))
            .to_http_request();
        let caller = Caller::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(caller.api_key.as_deref(), Some("abc123"));
    }

    #[actix_web::test]
    async fn missing_header_yields_an_anonymous_caller() {
        let req = TestRequest::default().to_http_request();
        let caller = Caller::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert!(caller.api_key.is_none());
    }
}

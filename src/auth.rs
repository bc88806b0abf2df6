use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use bcrypt::hash;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::types::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaim {
    pub exp: i64,
    pub id: i32,
}

/// Identity of the user making a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i32,
}

/// Verifies HS256 bearer tokens signed with the server secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        TokenVerifier {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn resolve(&self, token: &str) -> Result<Caller, ApiError> {
        let data = decode::<UserClaim>(token, &self.key, &self.validation).map_err(|err| {
            debug!("rejected token: {}", err);
            credentials_error()
        })?;
        Ok(Caller {
            id: data.claims.id,
        })
    }
}

pub(crate) fn credentials_error() -> ApiError {
    ApiError::Unauthorized("Could not validate credentials".to_string())
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for Caller {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<TokenVerifier>>() {
            Some(verifier) => verifier,
            None => {
                error!("TokenVerifier is not registered as app data");
                return ready(Err(ApiError::Internal));
            }
        };
        let caller = match bearer_token(req) {
            Some(token) => verifier.resolve(token),
            None => Err(ApiError::Unauthorized("Not authenticated".to_string())),
        };
        ready(caller)
    }
}

/// One-way password hashing with a fixed bcrypt cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        PasswordHasher { cost }
    }

    pub fn hash(&self, plain: &str) -> Result<String, ApiError> {
        Ok(hash(plain, self.cost)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "unit-test-secret";

    fn token(id: i32, exp: i64, secret: &str) -> String {
        encode(
            &Header::default(),
            &UserClaim { exp, id },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_an_hour() -> i64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn resolves_a_valid_token() {
        let verifier = TokenVerifier::new(SECRET);
        let caller = verifier.resolve(&token(5, in_an_hour(), SECRET)).unwrap();
        assert_eq!(caller, Caller { id: 5 });
    }

    #[test]
    fn rejects_foreign_signature() {
        let verifier = TokenVerifier::new(SECRET);
        let err = verifier
            .resolve(&token(5, in_an_hour(), "another-secret"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = TokenVerifier::new(SECRET);
        let expired = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
        assert!(verifier.resolve(&token(5, expired, SECRET)).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc"));
    }

    #[actix_web::test]
    async fn extractor_reads_the_header() {
        let verifier = web::Data::new(TokenVerifier::new(SECRET));
        let (req, mut payload) = TestRequest::default()
            .app_data(verifier)
            .insert_header((
                header::AUTHORIZATION,
                format!("Bearer {}", token(3, in_an_hour(), SECRET)),
            ))
            .to_http_parts();
        let caller = Caller::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(caller.id, 3);
    }

    #[test]
    fn hashes_are_one_way_and_verifiable() {
        let hasher = PasswordHasher::new(4);
        let hashed = hasher.hash("hunter2").unwrap();
        assert_ne!(hashed, "hunter2");
        assert!(bcrypt::verify("hunter2", &hashed).unwrap());
    }
}

// server/src/web/extractors.rs

//! Caller identity read from request headers.
//!
//! Authentication itself happens upstream of this service; it forwards the
//! verified user id in `X-User-ID` and the role in `X-User-Role`.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Customer,
  Admin,
}

impl Role {
  fn from_header(value: Option<&str>) -> Self {
    match value {
      Some(role) if role.trim().eq_ignore_ascii_case("admin") => Role::Admin,
      _ => Role::Customer,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: i64,
  pub role: Role,
}

impl AuthenticatedUser {
  fn from_headers(req: &HttpRequest) -> Result<Self, AppError> {
    let user_id = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| value.trim().parse::<i64>().ok())
      .filter(|id| *id > 0)
      .ok_or_else(|| {
        warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
        AppError::Auth("Not authorized, please sign in".to_string())
      })?;
    let role = Role::from_header(req.headers().get(USER_ROLE_HEADER).and_then(|v| v.to_str().ok()));
    Ok(Self { user_id, role })
  }
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    ready(Self::from_headers(req))
  }
}

/// An authenticated caller holding the admin role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthenticatedUser);

impl AdminUser {
  pub fn user_id(&self) -> i64 {
    self.0.user_id
  }
}

impl FromRequest for AdminUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let result = AuthenticatedUser::from_headers(req).and_then(|user| match user.role {
      Role::Admin => Ok(AdminUser(user)),
      Role::Customer => {
        warn!(user_id = user.user_id, "AdminUser extractor: caller lacks the admin role.");
        Err(AppError::Forbidden("Admin access required".to_string()))
      }
    });
    ready(result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[actix_rt::test]
  async fn admin_requires_id_and_role() {
    let req = TestRequest::default().to_http_request();
    let err = AdminUser::extract(&req).await.unwrap_err();
    assert!(matches!(err, AppError::Auth(_)));

    let req = TestRequest::default().insert_header((USER_ID_HEADER, "7")).to_http_request();
    let err = AdminUser::extract(&req).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let req = TestRequest::default()
      .insert_header((USER_ID_HEADER, "7"))
      .insert_header((USER_ROLE_HEADER, "Admin"))
      .to_http_request();
    assert_eq!(AdminUser::extract(&req).await.unwrap().user_id(), 7);
  }

  #[actix_rt::test]
  async fn rejects_non_numeric_ids() {
    let req = TestRequest::default().insert_header((USER_ID_HEADER, "abc")).to_http_request();
    assert!(AuthenticatedUser::extract(&req).await.is_err());
  }
}

use actix_web::HttpResponse;

use crate::dto::WhoAmIResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/whoami
pub async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(WhoAmIResponse {
        subject: auth.subject,
        roles: auth.roles,
        scheme: auth.scheme.to_string(),
    })
}

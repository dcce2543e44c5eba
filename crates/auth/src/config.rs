//! Authentication configuration

/// Settings for validating inbound access tokens.
///
/// Tokens are HS256-signed with `jwt_secret`. `issuer` and `audience` are
/// optional: when set (from `JWT_ISSUER`/`JWT_AUDIENCE`), tokens must carry
/// matching `iss`/`aud` claims; when unset, those claims are not checked,
/// which fits single-issuer deployments where the API signs its own tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

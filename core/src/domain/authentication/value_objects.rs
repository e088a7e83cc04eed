/// Identifier reported for every caller accepted by insecure development auth.
pub const DEVELOPMENT_IDENTITY_ID: &str = "insecure-development-user";

/// The authenticated caller, resolved once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Caller verified by the identity provider.
    User(String),
    /// Sentinel caller accepted without verification.
    Development,
}

impl Identity {
    pub fn id(&self) -> &str {
        match self {
            Identity::User(id) => id,
            Identity::Development => DEVELOPMENT_IDENTITY_ID,
        }
    }
}

/// How bearer tokens are verified. Chosen once at startup from configuration.
#[derive(Debug, Clone)]
pub enum AuthMode<IP> {
    IdentityProvider(IP),
    InsecureDevelopment,
    Unconfigured,
}

impl<IP> AuthMode<IP> {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMode::IdentityProvider(_) => "identity_provider",
            AuthMode::InsecureDevelopment => "insecure_development",
            AuthMode::Unconfigured => "unconfigured",
        }
    }
}

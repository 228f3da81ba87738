use std::fmt;

/// Machine-readable key for every failure the domain can report.
///
/// Keys are stable strings shared with clients. Turning a key into
/// human-readable text is a presentation concern; see
/// `inbound::http::locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    // Input validation
    EmailIsRequired,
    EmailIsInvalid,
    PasswordIsRequired,
    PasswordIsInvalid,
    RoleIsInvalid,
    IdIsInvalid,
    NameIsInvalid,
    PriceIsInvalid,
    StockIsInvalid,
    TitleIsRequired,
    ActionIsRequired,
    EntityIsRequired,
    PageIsInvalid,
    PageSizeIsInvalid,
    BodyIsInvalid,

    // Accounts
    AlreadyExists,
    WrongCredentials,

    // Access control
    Unauthenticated,
    TokenExpiredError,
    Forbidden,

    // Lookups
    ProductNotFound,

    InternalServerError,
}

impl ErrorKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKey::EmailIsRequired => "email_IS_REQUIRED",
            ErrorKey::EmailIsInvalid => "email_IS_INVALID",
            ErrorKey::PasswordIsRequired => "password_IS_REQUIRED",
            ErrorKey::PasswordIsInvalid => "password_IS_INVALID",
            ErrorKey::RoleIsInvalid => "role_IS_INVALID",
            ErrorKey::IdIsInvalid => "id_IS_INVALID",
            ErrorKey::NameIsInvalid => "name_IS_INVALID",
            ErrorKey::PriceIsInvalid => "price_IS_INVALID",
            ErrorKey::StockIsInvalid => "stock_IS_INVALID",
            ErrorKey::TitleIsRequired => "title_IS_REQUIRED",
            ErrorKey::ActionIsRequired => "action_IS_REQUIRED",
            ErrorKey::EntityIsRequired => "entity_IS_REQUIRED",
            ErrorKey::PageIsInvalid => "page_IS_INVALID",
            ErrorKey::PageSizeIsInvalid => "pageSize_IS_INVALID",
            ErrorKey::BodyIsInvalid => "body_IS_INVALID",
            ErrorKey::AlreadyExists => "ALREADY_EXISTS",
            ErrorKey::WrongCredentials => "WRONG_CREDENTIALS",
            ErrorKey::Unauthenticated => "UNAUTHENTICATED",
            ErrorKey::TokenExpiredError => "TOKEN_EXPIRED_ERROR",
            ErrorKey::Forbidden => "FORBIDDEN",
            ErrorKey::ProductNotFound => "PRODUCT_NOT_FOUND",
            ErrorKey::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

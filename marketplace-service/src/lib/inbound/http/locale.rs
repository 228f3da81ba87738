//! Error text per language.
//!
//! The domain only emits [`ErrorKey`]s; this table is the single place that
//! turns them into words.

use axum::http::HeaderMap;

use crate::domain::errors::ErrorKey;

pub const LANG_HEADER: &str = "lang";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// `ar` selects Arabic; anything else, or no header, is English.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(LANG_HEADER).and_then(|v| v.to_str().ok()) {
            Some(value) if value.trim().eq_ignore_ascii_case("ar") => Language::Arabic,
            _ => Language::English,
        }
    }
}

pub fn translate(key: ErrorKey, language: Language) -> &'static str {
    match language {
        Language::English => english(key),
        Language::Arabic => arabic(key),
    }
}

fn english(key: ErrorKey) -> &'static str {
    match key {
        ErrorKey::EmailIsRequired => "Email is required",
        ErrorKey::EmailIsInvalid => "Email is invalid",
        ErrorKey::PasswordIsRequired => "Password is required",
        ErrorKey::PasswordIsInvalid => {
            "Password must be 8 to 16 characters of letters, digits, underscores or symbols"
        }
        ErrorKey::RoleIsInvalid => "Role must be either user or admin",
        ErrorKey::IdIsInvalid => "Id is invalid",
        ErrorKey::NameIsInvalid => "Name is required and must be at most 255 characters",
        ErrorKey::PriceIsInvalid => "Price must be a positive number",
        ErrorKey::StockIsInvalid => "Stock must be a positive whole number",
        ErrorKey::TitleIsRequired => "Title is required",
        ErrorKey::ActionIsRequired => "Action is required",
        ErrorKey::EntityIsRequired => "Entity is required",
        ErrorKey::PageIsInvalid => "Page must be a whole number of at least 1",
        ErrorKey::PageSizeIsInvalid => "Page size must be a whole number between 1 and 100",
        ErrorKey::BodyIsInvalid => "Request body is invalid",
        ErrorKey::AlreadyExists => "Email already exists",
        ErrorKey::WrongCredentials => "Email or password is incorrect",
        ErrorKey::Unauthenticated => "You are not authenticated",
        ErrorKey::TokenExpiredError => "Your session has expired, please log in again",
        ErrorKey::Forbidden => "You are not allowed to perform this action",
        ErrorKey::ProductNotFound => "Product is not found",
        ErrorKey::InternalServerError => "Something went wrong, please try again later",
    }
}

fn arabic(key: ErrorKey) -> &'static str {
    match key {
        ErrorKey::EmailIsRequired => "البريد الإلكتروني مطلوب",
        ErrorKey::EmailIsInvalid => "البريد الإلكتروني غير صالح",
        ErrorKey::PasswordIsRequired => "كلمة المرور مطلوبة",
        ErrorKey::PasswordIsInvalid => {
            "يجب أن تتكون كلمة المرور من 8 إلى 16 حرفًا من الحروف أو الأرقام أو الرموز"
        }
        ErrorKey::RoleIsInvalid => "الدور يجب أن يكون مستخدم أو مدير",
        ErrorKey::IdIsInvalid => "المعرف غير صالح",
        ErrorKey::NameIsInvalid => "الاسم مطلوب ويجب ألا يتجاوز 255 حرفًا",
        ErrorKey::PriceIsInvalid => "يجب أن يكون السعر رقمًا موجبًا",
        ErrorKey::StockIsInvalid => "يجب أن تكون الكمية عددًا صحيحًا موجبًا",
        ErrorKey::TitleIsRequired => "العنوان مطلوب",
        ErrorKey::ActionIsRequired => "الإجراء مطلوب",
        ErrorKey::EntityIsRequired => "الكيان مطلوب",
        ErrorKey::PageIsInvalid => "رقم الصفحة يجب أن يكون عددًا صحيحًا لا يقل عن 1",
        ErrorKey::PageSizeIsInvalid => "حجم الصفحة يجب أن يكون عددًا صحيحًا بين 1 و 100",
        ErrorKey::BodyIsInvalid => "محتوى الطلب غير صالح",
        ErrorKey::AlreadyExists => "البريد الإلكتروني موجود بالفعل",
        ErrorKey::WrongCredentials => "البريد الإلكتروني أو كلمة المرور غير صحيحة",
        ErrorKey::Unauthenticated => "أنت غير مسجل الدخول",
        ErrorKey::TokenExpiredError => "انتهت صلاحية الجلسة، يرجى تسجيل الدخول مرة أخرى",
        ErrorKey::Forbidden => "غير مسموح لك بتنفيذ هذا الإجراء",
        ErrorKey::ProductNotFound => "المنتج غير موجود",
        ErrorKey::InternalServerError => "حدث خطأ ما، يرجى المحاولة لاحقًا",
    }
}

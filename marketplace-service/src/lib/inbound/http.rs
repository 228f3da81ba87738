pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod router;

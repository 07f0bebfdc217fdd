//! Request extractors for content negotiation and locale.

pub mod accept;
pub mod locale;
pub use accept::Accept;
pub use locale::RequestLocale;

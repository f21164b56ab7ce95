mod id;
mod quote;
mod tag;

pub use self::id::QuoteId;
pub use self::quote::{Quote, UNKNOWN_AUTHOR, strip_quote_marks};
pub use self::tag::Tag;

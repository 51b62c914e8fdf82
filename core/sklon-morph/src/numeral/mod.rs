//! Cardinal and ordinal numerals, and the form a noun takes after a number.

mod agreement;
mod cardinal;
mod ordinal;

pub use agreement::agreement;
pub use cardinal::{cardinal, count_form, count_phrase};
pub use ordinal::ordinal;

//! Kanji drill sheets from `{reading|answer}` markup.
//!
//! Each question line is lexed and parsed ([`markup`]), collected into a
//! numbered sheet ([`engine`]) and painted by a [`rendering`] backend.

pub mod engine;
pub mod input;
pub mod markup;
pub mod rendering;

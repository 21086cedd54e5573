pub mod blend;
pub mod fuzzy;
pub mod lexical;
pub mod pipeline;

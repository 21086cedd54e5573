pub mod curator;
pub mod oracle;
pub mod parse;
pub mod prompt;
pub mod vision;

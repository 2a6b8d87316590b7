pub mod candidates;
pub mod converter;
pub mod dict;
pub mod pinyin;
pub mod reading;
pub mod settings;
pub mod unicode;

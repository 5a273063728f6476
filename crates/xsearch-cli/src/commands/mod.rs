pub mod find;
pub mod matches;
pub mod values;

pub mod class;
pub mod import;
pub mod split;
pub mod student;

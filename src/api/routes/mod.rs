pub mod analyze;
pub mod health;
pub mod options;
pub mod rules;

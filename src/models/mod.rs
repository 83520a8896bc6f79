pub mod aggregate;
pub mod error;
pub mod options;
pub mod selection;

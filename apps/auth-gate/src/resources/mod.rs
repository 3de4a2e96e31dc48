pub mod students;

pub use students::{Student, StudentStore};

pub mod arguments;
pub mod context;
pub mod incrementer;
pub mod step;

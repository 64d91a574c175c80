pub mod factories;
pub mod stubs;

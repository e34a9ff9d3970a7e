pub mod builders;
pub mod harness;
pub mod mock;

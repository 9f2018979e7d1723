pub mod offset;
pub mod spring;

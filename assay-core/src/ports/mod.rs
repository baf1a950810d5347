pub mod connector;
pub mod task;

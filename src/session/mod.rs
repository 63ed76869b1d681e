pub mod history;
pub mod input;
pub mod metrics;
pub mod queue;
pub mod timer;

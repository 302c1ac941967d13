pub mod composite;
pub mod job;
pub mod progress;
pub mod renderer;
pub mod surface;

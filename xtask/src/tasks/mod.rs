pub mod dist;
pub mod plan;
pub mod tooling;

// src/math/geometry/polygon/operations/mod.rs

pub mod boolean;
pub mod containment;
pub mod crossover;
pub mod intersection;

pub use boolean::*;
pub use containment::*;
pub use crossover::*;
pub use intersection::*;

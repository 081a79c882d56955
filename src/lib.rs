// src/lib.rs

pub mod annotation;
pub mod debug;
pub mod math;

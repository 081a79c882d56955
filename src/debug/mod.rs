// src/debug/mod.rs

// Debug-Ausgaben, nur in Debug-Builds
#[cfg(debug_assertions)]
pub mod svg;

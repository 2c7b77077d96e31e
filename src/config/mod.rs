// src/config/mod.rs

pub mod consts;
pub mod options;
pub mod selectors;

pub use options::AppOptions;
pub use selectors::SelectorTable;

pub mod detail;
pub mod gallery;

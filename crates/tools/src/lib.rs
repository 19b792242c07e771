pub mod keys;
pub mod render;
pub mod seed;

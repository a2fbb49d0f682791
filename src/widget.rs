pub mod carousel;
pub mod motion;

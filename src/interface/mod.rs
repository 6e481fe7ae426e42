// External interface module

pub mod video;

pub use video::{MinifbDisplay, VideoInterface};

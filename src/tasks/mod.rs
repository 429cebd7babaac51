//! Long-running async tasks. Each task is a plain `async fn main` generic
//! over the hardware traits it needs, so the same code runs on any
//! executor the target binary brings.

pub mod control_loop;
pub mod trainer;

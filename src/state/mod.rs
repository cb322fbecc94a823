pub mod swipe;

pub use swipe::SwipeState;

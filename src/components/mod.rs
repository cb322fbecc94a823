pub mod direction_pad;
pub mod panel;

pub use direction_pad::DirectionPad;
pub use panel::Panel;

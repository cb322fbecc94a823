// Swipe gesture state tracked between touchstart and touchend.
use crate::model::Direction;

#[derive(Default, Debug, Clone)]
pub struct SwipeState {
    tracking: bool,
    start_x: f64,
    start_y: f64,
}

impl SwipeState {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.tracking = true;
        self.start_x = x;
        self.start_y = y;
    }

    pub fn cancel(&mut self) {
        self.tracking = false;
    }

    /// Ends the gesture and resolves it to a move, if it travelled far
    /// enough. The gesture drags the plane, so the travel direction is
    /// the opposite of the finger direction: swiping left reveals the
    /// panel to the right.
    pub fn end(&mut self, x: f64, y: f64, threshold: f64) -> Option<Direction> {
        if !self.tracking {
            return None;
        }
        self.tracking = false;
        resolve(x - self.start_x, y - self.start_y, threshold)
    }
}

// Dominant axis wins; ties go to the horizontal axis.
fn resolve(dx: f64, dy: f64, threshold: f64) -> Option<Direction> {
    if dx.abs().max(dy.abs()) < threshold.max(0.0) {
        return None;
    }
    if dx.abs() >= dy.abs() {
        Some(if dx < 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy < 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

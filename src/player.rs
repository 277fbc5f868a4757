use crate::level::{Dir, Level, Pos};

/// The player keeps moving in its facing direction until a wall stops it.
/// A turn request is buffered in `queued_dir` and applied at the first cell
/// where the turn is legal.
pub struct Player {
    pub pos: Pos,
    pub dir: Option<Dir>,
    queued_dir: Option<Dir>,
}

impl Player {
    pub fn new(pos: Pos) -> Player {
        Player {
            pos,
            dir: None,
            queued_dir: None,
        }
    }

    pub fn set_direction(&mut self, dir: Dir) {
        self.queued_dir = Some(dir);
    }

    pub fn update(&mut self, level: &Level) {
        if let Some(wanted) = self.queued_dir {
            if level.can_move(self.pos, wanted) {
                self.dir = Some(wanted);
                self.queued_dir = None;
            }
        }
        if let Some(dir) = self.dir {
            if let Some(next) = level.neighbor(self.pos, dir) {
                if !level.is_wall(next) {
                    self.pos = next;
                    return;
                }
            }
            // Blocked: stop until the next input.
            self.dir = None;
        }
    }
}

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::level::{Dir, Level, Pos};

/// Ticks between direction re-picks. Between picks a ghost runs straight and
/// bounces off walls.
const TURN_COOLDOWN_TICKS: u32 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Behavior {
    /// Head for the cell that shortens the walking distance to the player.
    Chase,
    /// Pick a random open direction at each turn.
    Wander,
}

pub struct Ghost {
    pub pos: Pos,
    pub dir: Dir,
    pub behavior: Behavior,
    turn_cooldown: u32,
}

impl Ghost {
    pub fn new(pos: Pos, behavior: Behavior, rng: &mut impl Rng) -> Ghost {
        Ghost {
            pos,
            dir: *Dir::ALL.choose(rng).unwrap(),
            behavior,
            turn_cooldown: 0,
        }
    }

    /// `dist` is the BFS distance field rooted at the player, recomputed once
    /// per tick by the caller and shared by all ghosts.
    pub fn update(&mut self, level: &Level, dist: &[Vec<i32>], rng: &mut impl Rng) {
        if self.turn_cooldown == 0 {
            if let Some(dir) = self.pick_direction(level, dist, rng) {
                self.dir = dir;
            }
            self.turn_cooldown = TURN_COOLDOWN_TICKS;
        } else {
            self.turn_cooldown -= 1;
        }

        if !level.can_move(self.pos, self.dir) {
            // Bounce; a ghost boxed in on both ends stays put.
            self.dir = self.dir.opposite();
            if !level.can_move(self.pos, self.dir) {
                if let Some(dir) = open_dirs(level, self.pos).choose(rng) {
                    self.dir = *dir;
                } else {
                    return;
                }
            }
        }
        if level.can_move(self.pos, self.dir) {
            if let Some(next) = level.neighbor(self.pos, self.dir) {
                self.pos = next;
            }
        }
    }

    fn pick_direction(
        &self,
        level: &Level,
        dist: &[Vec<i32>],
        rng: &mut impl Rng,
    ) -> Option<Dir> {
        match self.behavior {
            Behavior::Chase => chase_dir(level, self.pos, dist, rng),
            Behavior::Wander => open_dirs(level, self.pos).choose(rng).copied(),
        }
    }
}

fn open_dirs(level: &Level, pos: Pos) -> Vec<Dir> {
    Dir::ALL
        .iter()
        .copied()
        .filter(|dir| level.can_move(pos, *dir))
        .collect()
}

/// Open direction minimizing BFS distance to the field's root, random
/// tie-break. Unreachable cells (dist -1) are never picked over reachable ones.
fn chase_dir(level: &Level, pos: Pos, dist: &[Vec<i32>], rng: &mut impl Rng) -> Option<Dir> {
    let mut options = Vec::new();
    let mut best = i32::MAX;
    for dir in Dir::ALL {
        let next = match level.neighbor(pos, dir) {
            Some(next) if !level.is_wall(next) => next,
            _ => continue,
        };
        let d = dist[next.y][next.x];
        if d < 0 {
            continue;
        }
        if d < best {
            best = d;
            options.clear();
            options.push(dir);
        } else if d == best {
            options.push(dir);
        }
    }
    options.choose(rng).copied()
}

pub fn bfs_distance(level: &Level, start: Pos) -> Vec<Vec<i32>> {
    let mut dist = vec![vec![-1; level.width()]; level.height()];
    let mut queue = VecDeque::new();
    dist[start.y][start.x] = 0;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        let base = dist[pos.y][pos.x];
        for dir in Dir::ALL {
            let next = match level.neighbor(pos, dir) {
                Some(next) if !level.is_wall(next) => next,
                _ => continue,
            };
            if dist[next.y][next.x] == -1 {
                dist[next.y][next.x] = base + 1;
                queue.push_back(next);
            }
        }
    }
    dist
}

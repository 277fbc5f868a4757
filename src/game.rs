use rand::Rng;

use crate::ghost::{bfs_distance, Behavior, Ghost};
use crate::level::{Dir, Level, LEVEL_LAYOUT};
use crate::player::Player;

const PELLET_SCORE: u32 = 10;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

pub struct Game {
    pub level: Level,
    pub player: Player,
    pub ghosts: Vec<Ghost>,
    pub score: u32,
    pub status: Status,
}

impl Game {
    pub fn new(rng: &mut impl Rng) -> Game {
        Game::from_layout(&LEVEL_LAYOUT, rng)
    }

    pub fn from_layout(layout: &[&str], rng: &mut impl Rng) -> Game {
        let level = Level::parse(layout);
        let player = Player::new(level.player_start());
        // Ghost starts alternate chase and wander in layout order.
        let ghosts = level
            .ghost_starts()
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let behavior = if i % 2 == 0 { Behavior::Chase } else { Behavior::Wander };
                Ghost::new(*pos, behavior, rng)
            })
            .collect();
        Game {
            level,
            player,
            ghosts,
            score: 0,
            status: Status::Playing,
        }
    }

    /// One tick: buffer input, move the player, collect a pellet, move the
    /// ghosts, then settle the status. A no-op once the game is over.
    ///
    /// A ghost reaching the player on the tick the last pellet is eaten still
    /// loses; the win check runs last.
    pub fn tick(&mut self, input: Option<Dir>, rng: &mut impl Rng) {
        if self.status != Status::Playing {
            return;
        }

        if let Some(dir) = input {
            self.player.set_direction(dir);
        }
        self.player.update(&self.level);
        if self.level.eat_pellet(self.player.pos) {
            self.score += PELLET_SCORE;
        }
        if self.ghost_contact() {
            self.status = Status::Lost;
            return;
        }

        let dist = bfs_distance(&self.level, self.player.pos);
        for ghost in &mut self.ghosts {
            ghost.update(&self.level, &dist, rng);
        }
        if self.ghost_contact() {
            self.status = Status::Lost;
            return;
        }

        if self.level.pellets_left() == 0 {
            self.status = Status::Won;
        }
    }

    fn ghost_contact(&self) -> bool {
        self.ghosts.iter().any(|ghost| ghost.pos == self.player.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Pos;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // The lone ghost is walled in so it cannot interfere.
    const QUIET_LAYOUT: [&str; 3] = ["#######", "#P.#G##", "#######"];

    #[test]
    fn collecting_the_last_pellet_wins() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::from_layout(&QUIET_LAYOUT, &mut rng);
        assert_eq!(game.level.pellets_left(), 1);

        game.tick(Some(Dir::Right), &mut rng);
        assert_eq!(game.player.pos, Pos { x: 2, y: 1 });
        assert_eq!(game.score, 10);
        assert_eq!(game.level.pellets_left(), 0);
        assert_eq!(game.status, Status::Won);
    }

    #[test]
    fn walking_into_a_ghost_loses_and_halts_updates() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = Game::from_layout(&["#####", "#PG.#", "#####"], &mut rng);

        game.tick(Some(Dir::Right), &mut rng);
        assert_eq!(game.status, Status::Lost);
        let frozen_player = game.player.pos;
        let frozen_ghosts: Vec<Pos> = game.ghosts.iter().map(|g| g.pos).collect();
        let frozen_score = game.score;

        for _ in 0..10 {
            game.tick(Some(Dir::Right), &mut rng);
        }
        assert_eq!(game.player.pos, frozen_player);
        assert_eq!(
            game.ghosts.iter().map(|g| g.pos).collect::<Vec<_>>(),
            frozen_ghosts
        );
        assert_eq!(game.score, frozen_score);
    }

    #[test]
    fn pellet_count_never_increases() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::new(&mut rng);
        let script = [Dir::Left, Dir::Up, Dir::Right, Dir::Down];
        let mut last = game.level.pellets_left();
        for dir in script.iter().cycle().take(300).copied() {
            game.tick(Some(dir), &mut rng);
            let now = game.level.pellets_left();
            assert!(now <= last);
            last = now;
        }
    }

    #[test]
    fn nobody_ever_stands_on_a_wall() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = Game::new(&mut rng);
        let script = [Dir::Down, Dir::Left, Dir::Up, Dir::Right, Dir::Up];
        for dir in script.iter().cycle().take(400).copied() {
            game.tick(Some(dir), &mut rng);
            assert!(!game.level.is_wall(game.player.pos));
            for ghost in &game.ghosts {
                assert!(!game.level.is_wall(ghost.pos));
            }
        }
    }

    #[test]
    fn same_seed_and_script_reproduce_the_run() {
        let script: Vec<Dir> = [Dir::Left, Dir::Down, Dir::Right, Dir::Up, Dir::Left]
            .iter()
            .cycle()
            .take(250)
            .copied()
            .collect();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new(&mut rng);
            for dir in &script {
                game.tick(Some(*dir), &mut rng);
            }
            (
                game.player.pos,
                game.score,
                game.status,
                game.ghosts.iter().map(|g| g.pos).collect::<Vec<_>>(),
            )
        };

        assert_eq!(run(99), run(99));
    }
}

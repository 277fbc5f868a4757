#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Pellet,
    Empty,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Default maze. `#` wall, `.` pellet, `P` player start, `G` ghost start.
pub const LEVEL_LAYOUT: [&str; 20] = [
    "###################",
    "#.................#",
    "#.###.#####.###.#.#",
    "#.#.#.....#.#.#.#.#",
    "#.#.#.###.#.#.#.#.#",
    "#.#...#.#...#...#.#",
    "#.###.#.#.#.#.###.#",
    "#.....#.#.#.#.....#",
    "#####.#.#.#.#.#####",
    "#.....#.#.#.#.....#",
    "#.###.#.#.#.#.###.#",
    "#.#...#...#...#.#.#",
    "#.#.#.###P###.#.#.#",
    "#.#.#.#.....#.#.#.#",
    "#.#.#.#.###.#.#.#.#",
    "#.#.#.#.#.#.#.#.#.#",
    "#G..#...#.#...#..G#",
    "#.###.###.###.###.#",
    "#.................#",
    "###################",
];

pub struct Level {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    pellets_left: usize,
    player_start: Pos,
    ghost_starts: Vec<Pos>,
}

impl Level {
    pub fn parse(layout: &[&str]) -> Level {
        let height = layout.len();
        let width = layout.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = vec![vec![Tile::Empty; width]; height];
        let mut pellets_left = 0;
        let mut player_start = None;
        let mut ghost_starts = Vec::new();

        for (y, row) in layout.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid[y][x] = match ch {
                    '#' => Tile::Wall,
                    '.' => {
                        pellets_left += 1;
                        Tile::Pellet
                    }
                    'P' | 'p' => {
                        player_start = Some(Pos { x, y });
                        Tile::Empty
                    }
                    'G' | 'g' => {
                        ghost_starts.push(Pos { x, y });
                        Tile::Empty
                    }
                    _ => Tile::Empty,
                };
            }
        }

        // No P marker: take the first pellet cell as the start.
        let player_start = match player_start {
            Some(pos) => pos,
            None => {
                let mut start = Pos { x: 0, y: 0 };
                'scan: for y in 0..height {
                    for x in 0..width {
                        if grid[y][x] == Tile::Pellet {
                            grid[y][x] = Tile::Empty;
                            pellets_left -= 1;
                            start = Pos { x, y };
                            break 'scan;
                        }
                    }
                }
                start
            }
        };

        if ghost_starts.is_empty() {
            ghost_starts.push(player_start);
        }

        Level {
            width,
            height,
            grid,
            pellets_left,
            player_start,
            ghost_starts,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_start(&self) -> Pos {
        self.player_start
    }

    pub fn ghost_starts(&self) -> &[Pos] {
        &self.ghost_starts
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    /// Cell lookup; anything outside the grid reads as a wall.
    pub fn tile(&self, pos: Pos) -> Tile {
        if pos.y >= self.height || pos.x >= self.width {
            return Tile::Wall;
        }
        self.grid[pos.y][pos.x]
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    pub fn can_move(&self, pos: Pos, dir: Dir) -> bool {
        match self.neighbor(pos, dir) {
            Some(next) => !self.is_wall(next),
            None => false,
        }
    }

    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return None;
        }
        Some(Pos {
            x: nx as usize,
            y: ny as usize,
        })
    }

    /// Removes the pellet at `pos` if there is one.
    pub fn eat_pellet(&mut self, pos: Pos) -> bool {
        if self.tile(pos) == Tile::Pellet {
            self.grid[pos.y][pos.x] = Tile::Empty;
            self.pellets_left -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_layout() {
        let level = Level::parse(&LEVEL_LAYOUT);
        assert_eq!(level.width(), 19);
        assert_eq!(level.height(), 20);
        assert_eq!(level.player_start(), Pos { x: 9, y: 12 });
        assert_eq!(
            level.ghost_starts(),
            &[Pos { x: 1, y: 16 }, Pos { x: 17, y: 16 }]
        );
        assert!(level.pellets_left() > 0);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let level = Level::parse(&["##", "#."]);
        assert_eq!(level.tile(Pos { x: 5, y: 0 }), Tile::Wall);
        assert_eq!(level.tile(Pos { x: 0, y: 9 }), Tile::Wall);
        assert_eq!(level.tile(Pos { x: 1, y: 1 }), Tile::Pellet);
    }

    #[test]
    fn missing_player_marker_uses_first_pellet_cell() {
        let level = Level::parse(&["####", "#..#", "####"]);
        assert_eq!(level.player_start(), Pos { x: 1, y: 1 });
        assert_eq!(level.tile(Pos { x: 1, y: 1 }), Tile::Empty);
        assert_eq!(level.pellets_left(), 1);
    }

    #[test]
    fn missing_ghost_marker_falls_back_to_player_start() {
        let level = Level::parse(&["####", "#P.#", "####"]);
        assert_eq!(level.ghost_starts(), &[Pos { x: 1, y: 1 }]);
    }

    #[test]
    fn eat_pellet_only_fires_once() {
        let mut level = Level::parse(&["###", "#.#", "###"]);
        let pos = Pos { x: 1, y: 1 };
        assert_eq!(level.pellets_left(), 1);
        assert!(level.eat_pellet(pos));
        assert_eq!(level.pellets_left(), 0);
        assert!(!level.eat_pellet(pos));
        assert_eq!(level.pellets_left(), 0);
    }

    #[test]
    fn can_move_respects_walls_and_edges() {
        let level = Level::parse(&["###", "#P#", "#.#", "###"]);
        let start = level.player_start();
        assert!(level.can_move(start, Dir::Down));
        assert!(!level.can_move(start, Dir::Up));
        assert!(!level.can_move(start, Dir::Left));
        assert!(!level.can_move(Pos { x: 0, y: 0 }, Dir::Up));
    }
}

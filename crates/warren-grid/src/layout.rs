//! Maze layouts: parsing, start positions, and the layout cache.
//!
//! A layout is a rectangular character grid:
//!
//! ```text
//! %%%%%
//! %P..%
//! %.%G%
//! %...%
//! %%%%%
//! ```
//!
//! `%` is a wall, `.` a food pellet, `o` a capsule, `P` the player start,
//! `G` (or a digit `1`–`4` for an explicit ordering) an adversary start;
//! anything else is open floor. Row 0 of the text is the *top* of the
//! board — parsing flips vertically so that `(0, 0)` is the bottom-left
//! corner, matching the movement geometry.

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::RngExt;
use std::sync::Arc;

use warren_core::Point;

use crate::error::LayoutError;
use crate::grid::Grid;

/// Static description of a maze: walls, initial food and capsules, and
/// entity start positions.
///
/// Layouts are immutable after parsing and are shared behind `Arc` by the
/// snapshot layer, so a thousand-game training run parses each maze once.
#[derive(Clone, Debug)]
pub struct Layout {
    width: u32,
    height: u32,
    /// Wall cells. Never mutated after parsing.
    pub walls: Grid,
    /// Initial pellet cells.
    pub food: Grid,
    /// Initial capsule positions.
    pub capsules: Vec<(i32, i32)>,
    /// `(is_player, cell)` start positions, player first, adversaries in
    /// their declared order.
    starts: Vec<(bool, (i32, i32))>,
    adversary_count: usize,
    total_food: usize,
    normalized_text: String,
}

impl Layout {
    /// Parse layout text into a [`Layout`].
    ///
    /// Leading/trailing whitespace is stripped from each row and blank
    /// rows are ignored, so indented string literals in tests parse
    /// cleanly.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        for (row, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(LayoutError::RaggedRow { row });
            }
        }

        let mut walls = Grid::new(width as u32, height as u32, false);
        let mut food = Grid::new(width as u32, height as u32, false);
        let mut capsules = Vec::new();
        // (rank, cell): the player ranks 0, unnumbered adversaries rank 1,
        // numbered adversaries rank by digit. Sorting yields the player
        // first and a stable adversary order.
        let mut ranked_starts: Vec<(usize, (i32, i32))> = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            // Row 0 of the text is the top of the board.
            let y = (height - 1 - row) as i32;
            for (col, ch) in line.chars().enumerate() {
                let x = col as i32;
                match ch {
                    '%' => walls.set(x, y, true),
                    '.' => food.set(x, y, true),
                    'o' => capsules.push((x, y)),
                    'P' => ranked_starts.push((0, (x, y))),
                    'G' => ranked_starts.push((1, (x, y))),
                    '1'..='4' => {
                        ranked_starts.push((ch as usize - '0' as usize, (x, y)));
                    }
                    _ => {}
                }
            }
        }

        ranked_starts.sort_unstable();
        if !matches!(ranked_starts.first(), Some((0, _))) {
            return Err(LayoutError::NoPlayerStart);
        }
        let adversary_count = ranked_starts.len() - 1;
        let starts = ranked_starts
            .into_iter()
            .map(|(rank, cell)| (rank == 0, cell))
            .collect();

        let total_food = food.count(true);
        Ok(Self {
            width: width as u32,
            height: height as u32,
            walls,
            food,
            capsules,
            starts,
            adversary_count,
            total_food,
            normalized_text: rows.join("\n"),
        })
    }

    /// Board width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Entity start positions as `(is_player, cell)`, player first.
    pub fn starts(&self) -> &[(bool, (i32, i32))] {
        &self.starts
    }

    /// Number of adversary starts declared by the layout.
    pub fn adversary_count(&self) -> usize {
        self.adversary_count
    }

    /// Number of pellets the layout starts with.
    pub fn total_food(&self) -> usize {
        self.total_food
    }

    /// The parsed text with per-row whitespace normalized away.
    ///
    /// This is the canonical cache key for the layout: two inputs that
    /// normalize identically describe the same maze.
    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }

    /// Whether `cell` is a wall.
    pub fn is_wall(&self, cell: (i32, i32)) -> bool {
        self.walls.get(cell.0, cell.1)
    }

    /// A uniformly random non-wall cell.
    pub fn random_legal_position(&self, rng: &mut impl Rng) -> (i32, i32) {
        loop {
            let x = rng.random_range(0..self.width as i32);
            let y = rng.random_range(0..self.height as i32);
            if !self.is_wall((x, y)) {
                return (x, y);
            }
        }
    }

    /// The four cells just inside the board corners.
    fn inner_corners(&self) -> [(i32, i32); 4] {
        let (w, h) = (self.width as i32, self.height as i32);
        [(1, 1), (1, h - 2), (w - 2, 1), (w - 2, h - 2)]
    }

    /// A uniformly random inner corner.
    pub fn random_corner(&self, rng: &mut impl Rng) -> (i32, i32) {
        *self
            .inner_corners()
            .choose(rng)
            .expect("inner_corners is non-empty")
    }

    /// The inner corner with the greatest Manhattan distance from `from`.
    pub fn furthest_corner(&self, from: (i32, i32)) -> (i32, i32) {
        let origin = Point::cell(from.0, from.1);
        self.inner_corners()
            .into_iter()
            .max_by(|&a, &b| {
                let da = origin.manhattan_distance(a.into());
                let db = origin.manhattan_distance(b.into());
                da.partial_cmp(&db)
                    .expect("corner distances are finite")
                    .then(a.cmp(&b))
            })
            .expect("inner_corners is non-empty")
    }
}

/// An explicit cache of parsed layouts keyed by normalized layout text.
///
/// Replaces ambient process-global caching: callers own a cache instance
/// and inject it wherever layouts are resolved, so its lifetime and
/// contents are visible. Entries are never evicted; the cache lives as
/// long as its owner (typically the whole process).
///
/// # Examples
///
/// ```
/// use warren_grid::LayoutCache;
///
/// let mut cache = LayoutCache::new();
/// let a = cache.get_or_parse("%%%\n%P%\n%%%").unwrap();
/// let b = cache.get_or_parse("  %%%  \n  %P%  \n  %%%  ").unwrap();
/// // Whitespace normalizes away, so both resolve to one entry.
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LayoutCache {
    entries: IndexMap<String, Arc<Layout>>,
}

impl LayoutCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the layout for `text`, parsing and caching it on first use.
    pub fn get_or_parse(&mut self, text: &str) -> Result<Arc<Layout>, LayoutError> {
        let normalized: String = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if let Some(layout) = self.entries.get(&normalized) {
            return Ok(Arc::clone(layout));
        }
        let layout = Arc::new(Layout::parse(&normalized)?);
        self.entries.insert(normalized, Arc::clone(&layout));
        Ok(layout)
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no layouts.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SMALL: &str = "
        %%%%%
        %P.o%
        %.%G%
        %...%
        %%%%%";

    #[test]
    fn parse_flips_rows_vertically() {
        let layout = Layout::parse(SMALL).unwrap();
        assert_eq!(layout.width(), 5);
        assert_eq!(layout.height(), 5);
        // 'P' is on text row 1 → board y = 3.
        assert_eq!(layout.starts()[0], (true, (1, 3)));
        // 'G' is on text row 2 → board y = 2.
        assert_eq!(layout.starts()[1], (false, (3, 2)));
        // The capsule sits next to the player.
        assert_eq!(layout.capsules, vec![(3, 3)]);
    }

    #[test]
    fn parse_counts_food_and_walls() {
        let layout = Layout::parse(SMALL).unwrap();
        assert_eq!(layout.total_food(), 5);
        assert!(layout.is_wall((0, 0)));
        assert!(layout.is_wall((2, 2)));
        assert!(!layout.is_wall((1, 1)));
    }

    #[test]
    fn numbered_adversaries_sort_by_digit() {
        let layout = Layout::parse(
            "%%%%%
             %2.1%
             %.P.%
             %%%%%",
        )
        .unwrap();
        let starts = layout.starts();
        assert_eq!(starts[0], (true, (2, 1)));
        // '1' outranks '2' regardless of text order.
        assert_eq!(starts[1], (false, (3, 2)));
        assert_eq!(starts[2], (false, (1, 2)));
        assert_eq!(layout.adversary_count(), 2);
    }

    #[test]
    fn empty_text_is_an_error() {
        let err = Layout::parse("   \n  ").unwrap_err();
        assert_eq!(err, LayoutError::Empty);
    }

    #[test]
    fn ragged_row_is_an_error() {
        let err = Layout::parse("%%%\n%P%%\n%%%").unwrap_err();
        assert_eq!(err, LayoutError::RaggedRow { row: 1 });
    }

    #[test]
    fn missing_player_is_an_error() {
        let err = Layout::parse("%%%\n%G%\n%%%").unwrap_err();
        assert_eq!(err, LayoutError::NoPlayerStart);
    }

    #[test]
    fn random_legal_position_avoids_walls() {
        let layout = Layout::parse(SMALL).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let cell = layout.random_legal_position(&mut rng);
            assert!(!layout.is_wall(cell));
        }
    }

    #[test]
    fn furthest_corner_maximizes_distance() {
        let layout = Layout::parse(SMALL).unwrap();
        assert_eq!(layout.furthest_corner((1, 1)), (3, 3));
    }

    #[test]
    fn cache_normalizes_whitespace() {
        let mut cache = LayoutCache::new();
        let a = cache.get_or_parse(SMALL).unwrap();
        let b = cache.get_or_parse(&format!("  {SMALL}  ")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_distinguishes_different_mazes() {
        let mut cache = LayoutCache::new();
        cache.get_or_parse(SMALL).unwrap();
        cache.get_or_parse("%%%\n%P%\n%%%").unwrap();
        assert_eq!(cache.len(), 2);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four directions the hero can move or face.
///
/// The hero faces [`Direction::Right`] at the start of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// All directions, in the order the move keywords are documented.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse the suffix of a `hero.move_<dir>` call.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// The keyword used in source, e.g. `right` for `hero.move_right`.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A cell coordinate. `x` is the column, `y` is the row (growing downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one unit step in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant;
    /// the upper bounds are the grid's concern.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (x, y) = match direction {
            Direction::Up => (Some(self.x), self.y.checked_sub(1)),
            Direction::Down => (Some(self.x), self.y.checked_add(1)),
            Direction::Left => (self.x.checked_sub(1), Some(self.y)),
            Direction::Right => (self.x.checked_add(1), Some(self.y)),
        };
        Some(Position::new(x?, y?))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single unit step, tagged with the 1-based source line that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub direction: Direction,
    pub line: u32,
}

impl Action {
    pub fn new(direction: Direction, line: u32) -> Self {
        Self { direction, line }
    }
}

/// The fully resolved, loop-expanded plan produced by compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSequence(Vec<Action>);

impl ActionSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.0
    }
}

impl From<Vec<Action>> for ActionSequence {
    fn from(actions: Vec<Action>) -> Self {
        Self(actions)
    }
}

impl FromIterator<Action> for ActionSequence {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Action> for ActionSequence {
    fn extend<I: IntoIterator<Item = Action>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ActionSequence {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ActionSequence {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_keywords() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_keyword(dir.keyword()), Some(dir));
        }
        assert_eq!(Direction::from_keyword("forward"), None);
        assert_eq!(Direction::from_keyword("Up"), None);
    }

    #[test]
    fn test_default_facing_is_right() {
        assert_eq!(Direction::default(), Direction::Right);
    }

    #[test]
    fn test_position_step() {
        let p = Position::new(1, 1);
        assert_eq!(p.step(Direction::Up), Some(Position::new(1, 0)));
        assert_eq!(p.step(Direction::Down), Some(Position::new(1, 2)));
        assert_eq!(p.step(Direction::Left), Some(Position::new(0, 1)));
        assert_eq!(p.step(Direction::Right), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_position_step_off_origin() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
    }

    #[test]
    fn test_direction_serializes_uppercase() {
        let json = serde_json::to_string(&Action::new(Direction::Left, 4)).unwrap();
        assert_eq!(json, r#"{"direction":"LEFT","line":4}"#);
    }

    #[test]
    fn test_sequence_serializes_as_list() {
        let seq: ActionSequence = vec![Action::new(Direction::Up, 1)].into();
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, r#"[{"direction":"UP","line":1}]"#);
    }
}

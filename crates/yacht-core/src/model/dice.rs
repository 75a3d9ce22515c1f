use crate::model::hold::HoldMask;
use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DICE_COUNT: usize = 5;
pub const MIN_FACE: u8 = 1;
pub const MAX_FACE: u8 = 6;

/// Five six-sided dice in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    faces: [u8; DICE_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceError {
    FaceOutOfRange { position: usize, face: u8 },
}

impl fmt::Display for DiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceError::FaceOutOfRange { position, face } => {
                write!(f, "die {} shows {face}, expected 1..=6", position + 1)
            }
        }
    }
}

impl std::error::Error for DiceError {}

impl Dice {
    pub fn new(faces: [u8; DICE_COUNT]) -> Result<Self, DiceError> {
        if let Some((position, &face)) = faces
            .iter()
            .enumerate()
            .find(|(_, face)| !(MIN_FACE..=MAX_FACE).contains(*face))
        {
            return Err(DiceError::FaceOutOfRange { position, face });
        }
        Ok(Self { faces })
    }

    /// Resting state shown before the first roll of a game.
    pub const fn initial() -> Self {
        Self {
            faces: [MIN_FACE; DICE_COUNT],
        }
    }

    /// Rerolls every die not marked in `held`.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R, held: &HoldMask) {
        for (position, face) in self.faces.iter_mut().enumerate() {
            if !held.is_held(position) {
                *face = roll_face(rng);
            }
        }
    }

    pub const fn faces(&self) -> &[u8; DICE_COUNT] {
        &self.faces
    }

    pub fn face(&self, position: usize) -> Option<u8> {
        self.faces.get(position).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.faces.iter().copied()
    }

    pub fn sum(&self) -> u32 {
        self.faces.iter().map(|&f| f as u32).sum()
    }

    /// Occurrences per face; index 0 is unused so `counts[face]` reads naturally.
    pub fn face_counts(&self) -> [u8; 7] {
        let mut counts = [0u8; 7];
        for face in self.iter() {
            counts[face as usize] += 1;
        }
        counts
    }

    pub fn count_of(&self, face: u8) -> u8 {
        self.iter().filter(|&f| f == face).count() as u8
    }

    /// Face with the highest count; the lowest face wins ties.
    pub fn most_frequent_face(&self) -> u8 {
        let counts = self.face_counts();
        let mut best_face = MIN_FACE;
        let mut best_count = 0;
        for face in MIN_FACE..=MAX_FACE {
            if counts[face as usize] > best_count {
                best_count = counts[face as usize];
                best_face = face;
            }
        }
        best_face
    }

    pub fn is_yahtzee(&self) -> bool {
        self.faces.iter().all(|&f| f == self.faces[0])
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .faces
            .iter()
            .map(|face| face.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "[{text}]")
    }
}

pub fn roll_face<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(MIN_FACE..=MAX_FACE)
}

#[cfg(test)]
mod tests {
    use super::{Dice, DiceError};
    use crate::model::hold::HoldMask;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rejects_out_of_range_faces() {
        assert_eq!(
            Dice::new([1, 2, 7, 4, 5]),
            Err(DiceError::FaceOutOfRange {
                position: 2,
                face: 7
            })
        );
        assert!(Dice::new([0, 1, 1, 1, 1]).is_err());
        assert!(Dice::new([6, 6, 6, 6, 6]).is_ok());
    }

    #[test]
    fn roll_keeps_held_positions() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut dice = Dice::new([6, 1, 6, 1, 6]).unwrap();
        let held = HoldMask::from_flags([true, false, true, false, true]);
        for _ in 0..50 {
            dice.roll(&mut rng, &held);
            assert_eq!(dice.face(0), Some(6));
            assert_eq!(dice.face(2), Some(6));
            assert_eq!(dice.face(4), Some(6));
            assert!(dice.iter().all(|f| (1..=6).contains(&f)));
        }
    }

    #[test]
    fn seeded_rolls_are_reproducible() {
        let mut a = Dice::initial();
        let mut b = Dice::initial();
        a.roll(&mut StdRng::seed_from_u64(42), &HoldMask::none());
        b.roll(&mut StdRng::seed_from_u64(42), &HoldMask::none());
        assert_eq!(a, b);
    }

    #[test]
    fn counts_and_most_frequent_face() {
        let dice = Dice::new([2, 5, 2, 5, 3]).unwrap();
        let counts = dice.face_counts();
        assert_eq!(counts[2], 2);
        assert_eq!(counts[5], 2);
        assert_eq!(dice.most_frequent_face(), 2);
        assert_eq!(dice.sum(), 17);
        assert!(!dice.is_yahtzee());
        assert!(Dice::new([4, 4, 4, 4, 4]).unwrap().is_yahtzee());
    }

    #[test]
    fn display_lists_faces() {
        let dice = Dice::new([1, 2, 3, 4, 5]).unwrap();
        assert_eq!(dice.to_string(), "[1 2 3 4 5]");
    }
}

//! Input commands fed to actors once per tick.

use bitflags::bitflags;

use crate::geo::Direction;

bitflags! {
    /// One tick's worth of input for a single actor.
    ///
    /// Direction bits may be combined for diagonals; opposing bits are
    /// treated as first-wins by [`Cmd::direction`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Cmd: u8 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const UP = 0x04;
        const DOWN = 0x08;
        /// Primary action (fire).
        const BUTTON1 = 0x10;
        /// Secondary action (pick up / slide modifier).
        const BUTTON2 = 0x20;
    }
}

impl Cmd {
    pub fn has_direction(self) -> bool {
        self.intersects(Cmd::LEFT | Cmd::RIGHT | Cmd::UP | Cmd::DOWN)
    }

    /// The facing direction this command implies, if any.
    pub fn direction(self) -> Option<Direction> {
        let dx = if self.contains(Cmd::LEFT) {
            -1
        } else if self.contains(Cmd::RIGHT) {
            1
        } else {
            0
        };
        let dy = if self.contains(Cmd::UP) {
            -1
        } else if self.contains(Cmd::DOWN) {
            1
        } else {
            0
        };
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (1, -1) => Some(Direction::UpRight),
            (1, 0) => Some(Direction::Right),
            (1, 1) => Some(Direction::DownRight),
            (0, 1) => Some(Direction::Down),
            (-1, 1) => Some(Direction::DownLeft),
            (-1, 0) => Some(Direction::Left),
            (-1, -1) => Some(Direction::UpLeft),
            _ => None,
        }
    }

    /// Reverses the direction bits, leaving buttons intact.
    ///
    /// Applied to confused actors before any other command processing.
    pub fn reversed(self) -> Self {
        let mut out = self & (Cmd::BUTTON1 | Cmd::BUTTON2);
        if self.contains(Cmd::LEFT) {
            out |= Cmd::RIGHT;
        }
        if self.contains(Cmd::RIGHT) {
            out |= Cmd::LEFT;
        }
        if self.contains(Cmd::UP) {
            out |= Cmd::DOWN;
        }
        if self.contains(Cmd::DOWN) {
            out |= Cmd::UP;
        }
        out
    }
}

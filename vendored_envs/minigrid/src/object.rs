use serde::{Deserialize, Serialize};

use crate::types::{door_state, Color, ObjectKind};

/// Contents of a single grid cell.
///
/// Door flags are only meaningful for [`ObjectKind::Door`] and `contains` is
/// only ever populated for [`ObjectKind::Box`]; the constructors are the only
/// way to build a value, so both hold for every `WorldObj` in circulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldObj {
    kind: ObjectKind,
    color: Color,
    open: bool,
    locked: bool,
    contains: Option<Box<WorldObj>>,
}

impl Default for WorldObj {
    fn default() -> Self {
        Self::empty()
    }
}

impl WorldObj {
    fn plain(kind: ObjectKind, color: Color) -> Self {
        Self { kind, color, open: false, locked: false, contains: None }
    }

    pub fn empty() -> Self { Self::plain(ObjectKind::Empty, Color::Red) }
    pub fn unseen() -> Self { Self::plain(ObjectKind::Unseen, Color::Red) }
    pub fn wall() -> Self { Self::plain(ObjectKind::Wall, Color::Grey) }
    pub fn floor(color: Color) -> Self { Self::plain(ObjectKind::Floor, color) }
    pub fn goal() -> Self { Self::plain(ObjectKind::Goal, Color::Green) }
    pub fn lava() -> Self { Self::plain(ObjectKind::Lava, Color::Red) }
    pub fn key(color: Color) -> Self { Self::plain(ObjectKind::Key, color) }
    pub fn ball(color: Color) -> Self { Self::plain(ObjectKind::Ball, color) }

    /// A locked door is always closed.
    pub fn door(color: Color, open: bool, locked: bool) -> Self {
        Self { kind: ObjectKind::Door, color, open: open && !locked, locked, contains: None }
    }

    pub fn boxed(color: Color, contents: Option<WorldObj>) -> Self {
        Self { kind: ObjectKind::Box, color, open: false, locked: false, contains: contents.map(Box::new) }
    }

    pub fn kind(&self) -> ObjectKind { self.kind }
    pub fn color(&self) -> Color { self.color }
    pub fn is_empty(&self) -> bool { self.kind == ObjectKind::Empty }
    pub fn is_open(&self) -> bool { self.open }
    pub fn is_locked(&self) -> bool { self.locked }
    pub fn contents(&self) -> Option<&WorldObj> { self.contains.as_deref() }

    pub fn can_overlap(&self) -> bool {
        match self.kind {
            ObjectKind::Empty | ObjectKind::Floor | ObjectKind::Goal | ObjectKind::Lava => true,
            ObjectKind::Door => self.open,
            _ => false,
        }
    }

    pub fn can_pickup(&self) -> bool {
        matches!(self.kind, ObjectKind::Key | ObjectKind::Ball | ObjectKind::Box)
    }

    pub fn can_see_behind(&self) -> bool {
        match self.kind {
            ObjectKind::Wall => false,
            ObjectKind::Door => self.open,
            _ => true,
        }
    }

    pub fn state_code(&self) -> u8 {
        if self.kind != ObjectKind::Door {
            return 0;
        }
        if self.locked {
            door_state::LOCKED
        } else if self.open {
            door_state::OPEN
        } else {
            door_state::CLOSED
        }
    }

    /// (type, color, state) channel triple.
    pub fn encode(&self) -> [u8; 3] {
        [self.kind as u8, self.color as u8, self.state_code()]
    }

    /// Apply a toggle to a door. A locked door opens only for a key of its own
    /// color, which also unlocks it; an unlocked door flips between open and closed.
    /// Returns whether the door changed. Non-doors are left untouched.
    pub fn toggle_door(&mut self, carrying: &WorldObj) -> bool {
        if self.kind != ObjectKind::Door {
            return false;
        }
        if self.locked {
            if carrying.kind == ObjectKind::Key && carrying.color == self.color {
                self.locked = false;
                self.open = true;
                return true;
            }
            return false;
        }
        self.open = !self.open;
        true
    }

    /// Consume a box and yield what replaces it in the cell: the nested
    /// object (keeping its own contents) or Empty.
    pub fn open_box(self) -> WorldObj {
        debug_assert_eq!(self.kind, ObjectKind::Box);
        match self.contains {
            Some(inner) => *inner,
            None => WorldObj::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_predicates() {
        assert!(WorldObj::empty().can_overlap());
        assert!(WorldObj::goal().can_overlap());
        assert!(WorldObj::lava().can_overlap());
        assert!(WorldObj::floor(Color::Blue).can_overlap());
        assert!(!WorldObj::wall().can_overlap());
        assert!(!WorldObj::key(Color::Red).can_overlap());
        assert!(!WorldObj::door(Color::Red, false, false).can_overlap());
        assert!(WorldObj::door(Color::Red, true, false).can_overlap());

        assert!(WorldObj::key(Color::Red).can_pickup());
        assert!(WorldObj::ball(Color::Red).can_pickup());
        assert!(WorldObj::boxed(Color::Red, None).can_pickup());
        assert!(!WorldObj::goal().can_pickup());

        assert!(!WorldObj::wall().can_see_behind());
        assert!(!WorldObj::door(Color::Red, false, true).can_see_behind());
        assert!(WorldObj::door(Color::Red, true, false).can_see_behind());
        assert!(WorldObj::ball(Color::Red).can_see_behind());
    }

    #[test]
    fn door_state_codes() {
        assert_eq!(WorldObj::door(Color::Yellow, true, false).encode(), [4, 4, 0]);
        assert_eq!(WorldObj::door(Color::Yellow, false, false).encode(), [4, 4, 1]);
        assert_eq!(WorldObj::door(Color::Yellow, false, true).encode(), [4, 4, 2]);
        assert_eq!(WorldObj::wall().encode(), [2, 5, 0]);
    }

    #[test]
    fn locked_door_requires_matching_key() {
        let mut door = WorldObj::door(Color::Blue, false, true);
        assert!(!door.toggle_door(&WorldObj::empty()));
        assert!(!door.toggle_door(&WorldObj::key(Color::Red)));
        assert!(!door.toggle_door(&WorldObj::ball(Color::Blue)));
        assert!(door.is_locked() && !door.is_open());

        assert!(door.toggle_door(&WorldObj::key(Color::Blue)));
        assert!(!door.is_locked() && door.is_open());

        assert!(door.toggle_door(&WorldObj::empty()));
        assert!(!door.is_open());
    }

    #[test]
    fn nested_box_opens_one_layer() {
        let inner = WorldObj::boxed(Color::Green, Some(WorldObj::key(Color::Red)));
        let outer = WorldObj::boxed(Color::Purple, Some(inner.clone()));
        let revealed = outer.open_box();
        assert_eq!(revealed, inner);
        assert_eq!(revealed.contents(), Some(&WorldObj::key(Color::Red)));
        assert_eq!(WorldObj::boxed(Color::Red, None).open_box(), WorldObj::empty());
    }
}

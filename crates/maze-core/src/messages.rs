//! What drivers send to models: [`Msg`], built from [`Key`] and [`Mods`].
//!
//! Apart from input, a driver emits [`Msg::Tick`] at a fixed pace; that is
//! when models run the next few steps of a risk scan or route search.

use std::time::Instant;

/// Keys the visualizer reacts to. Drivers drop everything else.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Esc,
    Enter,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    Char(char),
}

/// Modifier keys held with a key press.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mods {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Mods {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };
    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Whether every modifier in `required` is held. Extra modifiers are
    /// allowed, so a Ctrl binding still fires with Shift down.
    #[inline]
    pub const fn covers(self, required: Mods) -> bool {
        (self.shift || !required.shift) && (self.ctrl || !required.ctrl) && (self.alt || !required.alt)
    }
}

#[derive(Clone, Debug)]
pub enum Msg {
    KeyDown {
        key: Key,
        modifiers: Mods,
        time: Instant,
    },
    /// New terminal size, in cells.
    Screen {
        width: i32,
        height: i32,
        time: Instant,
    },
    /// Time to advance animations.
    Tick { time: Instant },
    /// First message of every run.
    Init,
    Quit,
}

impl Msg {
    pub fn key(key: Key) -> Self {
        Self::key_mod(key, Mods::NONE)
    }

    pub fn key_mod(key: Key, modifiers: Mods) -> Self {
        Self::KeyDown {
            key,
            modifiers,
            time: Instant::now(),
        }
    }

    pub fn tick() -> Self {
        Self::Tick {
            time: Instant::now(),
        }
    }
}

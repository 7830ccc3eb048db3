use bitflags::bitflags;
use serde::{de::Visitor, Deserialize, Serialize};

bitflags! {
    /// Represents the state of modifier keys, laid out like the X11 key/button state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        /// Used as the zero value
        const Zero = 0;
        const Shift = 1;
        const Lock = 1 << 1;
        const Control = 1 << 2;
        /// Mod1
        const Alt = 1 << 3;
        /// Mod2
        const NumLock = 1 << 4;
        const Mod3 = 1 << 5;
        /// Mod4
        const Super = 1 << 6;
        const Mod5 = 1 << 7;
    }
}

bitflags! {
    /// Represents the state of the mouse buttons
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Button: u8 {
        /// Used as the zero value
        const Zero = 0;
        /// Main button (left click for right-handed)
        const Button1 = 1;
        /// Middle button (pressing the scroll wheel)
        const Button2 = 1 << 1;
        /// Secondary button (right click for right-handed)
        const Button3 = 1 << 2;
        /// Scroll wheel up
        const Button4 = 1 << 3;
        /// Scroll wheel down
        const Button5 = 1 << 4;
    }
}

impl ModMask {
    /// Drops the lock modifiers so bindings match regardless of caps and num lock.
    #[must_use]
    pub fn clean(self) -> Self {
        self.intersection(
            Self::Shift | Self::Control | Self::Alt | Self::Mod3 | Self::Super | Self::Mod5,
        )
    }
}

const NUMBERED: [(Button, u32); 5] = [
    (Button::Button1, 1),
    (Button::Button2, 2),
    (Button::Button3, 3),
    (Button::Button4, 4),
    (Button::Button5, 5),
];

impl Button {
    /// Converts an X11 button number.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        NUMBERED
            .iter()
            .find(|(_, n)| *n == number)
            .map_or(Self::Zero, |(button, _)| *button)
    }

    /// The X11 button number, 0 for none.
    #[must_use]
    pub fn number(self) -> u32 {
        NUMBERED
            .iter()
            .find(|(button, _)| *button == self)
            .map_or(0, |(_, n)| *n)
    }
}

#[must_use]
pub fn into_modmask(keys: &[String]) -> ModMask {
    let mut mask = ModMask::Zero;
    for s in keys {
        mask |= into_mod(s);
    }
    mask.clean()
}

#[must_use]
pub fn into_mod(key: &str) -> ModMask {
    match key {
        "Shift" => ModMask::Shift,
        "Control" => ModMask::Control,
        "Mod1" | "Alt" => ModMask::Alt,
        // NOTE: we are ignoring the state of Numlock
        // this is left here as a reminder
        // "Mod2" | "NumLock" => ModMask::NumLock,
        "Mod3" => ModMask::Mod3,
        "Mod4" | "Super" => ModMask::Super,
        "Mod5" => ModMask::Mod5,
        _ => ModMask::Zero,
    }
}

#[must_use]
pub fn into_button(name: &str) -> Button {
    match name {
        "Button1" | "1" => Button::Button1,
        "Button2" | "2" => Button::Button2,
        "Button3" | "3" => Button::Button3,
        "Button4" | "4" => Button::Button4,
        "Button5" | "5" => Button::Button5,
        _ => Button::Zero,
    }
}

// serde impls (derive is not working with the bitflags macro)

impl Serialize for ModMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for ModMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ModmaskVisitor;

        impl<'de> Visitor<'de> for ModmaskVisitor {
            type Value = ModMask;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bitfield on 16 bits")
            }

            fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ModMask::from_bits_retain(u16::from(v)))
            }

            fn visit_u16<E>(self, v: u16) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ModMask::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u16::try_from(v)
                    .map(ModMask::from_bits_retain)
                    .map_err(|_| E::custom("modifier mask out of range"))
            }
        }

        deserializer.deserialize_u16(ModmaskVisitor)
    }
}

impl Serialize for Button {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Button {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ButtonVisitor;

        impl<'de> Visitor<'de> for ButtonVisitor {
            type Value = Button;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a bitfield on 8 bits")
            }

            fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Button::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(v)
                    .map(Button::from_bits_retain)
                    .map_err(|_| E::custom("button mask out of range"))
            }
        }

        deserializer.deserialize_u8(ButtonVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_keys_are_ignored() {
        let state = ModMask::Super | ModMask::NumLock | ModMask::Lock;
        assert_eq!(state.clean(), ModMask::Super);
    }

    #[test]
    fn modifier_names_combine() {
        let mask = into_modmask(&["Mod4".to_owned(), "Shift".to_owned(), "Bogus".to_owned()]);
        assert_eq!(mask, ModMask::Super | ModMask::Shift);
    }

    #[test]
    fn button_numbers_round_trip() {
        for n in 1..=5 {
            assert_eq!(Button::from_number(n).number(), n);
        }
        assert_eq!(Button::from_number(9), Button::Zero);
    }
}

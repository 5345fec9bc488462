use serde::{Deserialize, Serialize};

/// The palette entities can be colored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    GreyBlue,
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    Cyan,
    Teal,
    Green,
    Amber,
    Orange,
    Brown,
}

impl Color {
    /// Human readable name, used in history labels.
    pub fn name(self) -> &'static str {
        match self {
            Color::GreyBlue => "grey blue",
            Color::Red => "red",
            Color::Pink => "pink",
            Color::Purple => "purple",
            Color::DeepPurple => "deep purple",
            Color::Indigo => "indigo",
            Color::Blue => "blue",
            Color::Cyan => "cyan",
            Color::Teal => "teal",
            Color::Green => "green",
            Color::Amber => "amber",
            Color::Orange => "orange",
            Color::Brown => "brown",
        }
    }
}

/// Shade level of a color. The ordering is significant: related shades
/// (fill vs. stroke) are derived by stepping through the levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    I50,
    I100,
    I200,
    I300,
    I400,
    I500,
    I600,
    I700,
    I800,
    I900,
}

impl Intensity {
    const LEVELS: [Intensity; 10] = [
        Intensity::I50,
        Intensity::I100,
        Intensity::I200,
        Intensity::I300,
        Intensity::I400,
        Intensity::I500,
        Intensity::I600,
        Intensity::I700,
        Intensity::I800,
        Intensity::I900,
    ];

    /// The intensity `steps` levels further, wrapping around at the end of
    /// the scale.
    pub fn next(self, steps: usize) -> Intensity {
        let index = Self::LEVELS.iter().position(|&level| level == self).unwrap_or(0);
        Self::LEVELS[(index + steps) % Self::LEVELS.len()]
    }
}

/// Default color for entities that have not been explicitly colored.
pub const DEFAULT_COLOR: Color = Color::GreyBlue;
pub const DEFAULT_INTENSITY: Intensity = Intensity::I700;

/// The color state attached to a colorable entity: the base (fill) pair and
/// whether it was set explicitly or inherited from a container default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    pub color: Color,
    pub intensity: Intensity,
    pub explicit: bool,
}

impl Default for ColorRecord {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            intensity: DEFAULT_INTENSITY,
            explicit: false,
        }
    }
}

impl ColorRecord {
    /// The fill shade.
    pub fn fill(&self) -> (Color, Intensity) {
        (self.color, self.intensity)
    }

    /// The stroke shade, two levels past the fill.
    pub fn stroke(&self) -> (Color, Intensity) {
        (self.color, self.intensity.next(2))
    }
}

/// Capability for entities that carry a color record.
///
/// `color` and the reset variants mirror each other: coloring marks the
/// record explicit, resetting clears the mark while still repainting.
pub trait Colorable {
    fn color_record(&self) -> &ColorRecord;

    fn color_record_mut(&mut self) -> &mut ColorRecord;

    /// Apply `(color, intensity)`. Returns `false` without touching the
    /// record when the entity already shows exactly this pair; callers must
    /// not create a history entry in that case.
    fn color(&mut self, color: Color, intensity: Intensity) -> bool {
        let record = self.color_record_mut();
        if record.color == color && record.intensity == intensity {
            return false;
        }

        record.color = color;
        record.intensity = intensity;
        record.explicit = true;
        true
    }

    /// Fall back to the built-in default, e.g. when an entity is detached
    /// from its container.
    fn reset_color(&mut self) {
        self.reset_color_to(DEFAULT_COLOR, DEFAULT_INTENSITY);
    }

    /// Repaint with an inherited pair without marking the entity as
    /// explicitly colored.
    fn reset_color_to(&mut self, color: Color, intensity: Intensity) {
        self.color(color, intensity);
        self.color_record_mut().explicit = false;
    }

    fn is_colored(&self) -> bool {
        self.color_record().explicit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_next_wraps_cyclically() {
        assert_eq!(Intensity::I700.next(2), Intensity::I900);
        assert_eq!(Intensity::I900.next(1), Intensity::I50);
        assert_eq!(Intensity::I50.next(10), Intensity::I50);
    }

    #[test]
    fn stroke_shade_derived_from_fill() {
        let record = ColorRecord {
            color: Color::Teal,
            intensity: Intensity::I500,
            explicit: true,
        };

        assert_eq!(record.fill(), (Color::Teal, Intensity::I500));
        assert_eq!(record.stroke(), (Color::Teal, Intensity::I700));
    }
}

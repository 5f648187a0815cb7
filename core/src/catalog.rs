use crate::*;

/// Row-major 4×4 color layout of one animal face.
pub type ColorMatrix = [[Color; GRID_SIDE as usize]; GRID_SIDE as usize];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AnimalVariant {
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub colors: ColorMatrix,
}

impl AnimalVariant {
    pub const fn color_at(&self, (row, col): Coord2) -> Color {
        self.colors[row as usize][col as usize]
    }

    /// Colors in row-major order, the order the target sequence uses.
    pub fn iter_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors.iter().flatten().copied()
    }
}

const SANDY_BROWN: Color = Color::from_rgb(0xF4A460);
const BURLYWOOD: Color = Color::from_rgb(0xDEB887);
const HOT_PINK: Color = Color::from_rgb(0xFF69B4);
const CHOCOLATE: Color = Color::from_rgb(0xD2691E);
const CORAL: Color = Color::from_rgb(0xFF6B6B);
const LIGHT_PINK: Color = Color::from_rgb(0xFFB6C1);
const GRAY: Color = Color::from_rgb(0x808080);
const BLACK: Color = Color::BLACK;
const WHITE: Color = Color::WHITE;

pub const CAT: AnimalVariant = AnimalVariant {
    key: "cat",
    display_name: "ねこ",
    icon: "🐱",
    colors: [
        [SANDY_BROWN, BURLYWOOD, BURLYWOOD, SANDY_BROWN],
        [BLACK, SANDY_BROWN, SANDY_BROWN, BLACK],
        [SANDY_BROWN, HOT_PINK, HOT_PINK, SANDY_BROWN],
        [SANDY_BROWN, SANDY_BROWN, SANDY_BROWN, SANDY_BROWN],
    ],
};

pub const DOG: AnimalVariant = AnimalVariant {
    key: "dog",
    display_name: "いぬ",
    icon: "🐶",
    colors: [
        [CHOCOLATE, SANDY_BROWN, SANDY_BROWN, CHOCOLATE],
        [BLACK, SANDY_BROWN, SANDY_BROWN, BLACK],
        [SANDY_BROWN, BLACK, BLACK, SANDY_BROWN],
        [SANDY_BROWN, CORAL, CORAL, SANDY_BROWN],
    ],
};

pub const RABBIT: AnimalVariant = AnimalVariant {
    key: "rabbit",
    display_name: "うさぎ",
    icon: "🐰",
    colors: [
        [WHITE, LIGHT_PINK, LIGHT_PINK, WHITE],
        [BLACK, WHITE, WHITE, BLACK],
        [WHITE, HOT_PINK, HOT_PINK, WHITE],
        [WHITE, WHITE, WHITE, WHITE],
    ],
};

pub const ELEPHANT: AnimalVariant = AnimalVariant {
    key: "elephant",
    display_name: "ぞう",
    icon: "🐘",
    colors: [
        [GRAY, GRAY, GRAY, GRAY],
        [BLACK, GRAY, GRAY, BLACK],
        [GRAY, GRAY, GRAY, GRAY],
        [GRAY, GRAY, GRAY, GRAY],
    ],
};

pub static ANIMALS: [AnimalVariant; 4] = [CAT, DOG, RABBIT, ELEPHANT];

/// Fixed, never empty set of variants a round can draw from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Catalog {
    variants: &'static [AnimalVariant],
}

impl Catalog {
    pub fn new(variants: &'static [AnimalVariant]) -> Option<Self> {
        (!variants.is_empty()).then_some(Self { variants })
    }

    pub fn builtin() -> Self {
        Self { variants: &ANIMALS }
    }

    pub fn list(&self) -> &'static [AnimalVariant] {
        self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn get(&self, index: usize) -> Option<&'static AnimalVariant> {
        self.variants.get(index)
    }

    pub fn by_key(&self, key: &str) -> Option<&'static AnimalVariant> {
        self.variants.iter().find(|variant| variant.key == key)
    }

    /// Every variant except the one at `chosen`, the sources decoys are drawn from.
    pub fn others(&self, chosen: usize) -> impl Iterator<Item = &'static AnimalVariant> + use<> {
        let variants = self.variants;
        variants
            .iter()
            .enumerate()
            .filter(move |&(index, _)| index != chosen)
            .map(|(_, variant)| variant)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn builtin_catalog_has_four_animals() {
        let catalog = Catalog::builtin();
        let keys: Vec<_> = catalog.list().iter().map(|v| v.key).collect();
        assert_eq!(keys, ["cat", "dog", "rabbit", "elephant"]);
        assert_eq!(catalog.by_key("rabbit").map(|v| v.icon), Some("🐰"));
        assert!(catalog.by_key("fox").is_none());
    }

    #[test]
    fn empty_catalog_is_refused() {
        static NONE: [AnimalVariant; 0] = [];
        assert!(Catalog::new(&NONE).is_none());
    }

    #[test]
    fn iter_colors_is_row_major() {
        let colors: Vec<_> = DOG.iter_colors().collect();
        assert_eq!(colors.len(), usize::from(SLOT_COUNT));
        assert_eq!(colors[0], CHOCOLATE);
        assert_eq!(colors[4], BLACK);
        assert_eq!(colors[13], CORAL);
        assert_eq!(DOG.color_at((3, 1)), CORAL);
    }

    #[test]
    fn others_skips_only_the_chosen_variant() {
        let catalog = Catalog::builtin();
        let others: Vec<_> = catalog.others(1).map(|v| v.key).collect();
        assert_eq!(others, ["cat", "rabbit", "elephant"]);
    }
}

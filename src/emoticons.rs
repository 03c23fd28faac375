use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmoticonCategory {
    Happy,
    Sad,
    Teasing,
    Playful,
    Angry,
}

pub const CATEGORIES: &[EmoticonCategory] = &[
    EmoticonCategory::Happy,
    EmoticonCategory::Sad,
    EmoticonCategory::Teasing,
    EmoticonCategory::Playful,
    EmoticonCategory::Angry,
];

const HAPPY: &[&str] = &["(❁´◡`❁)", "(＾◡＾)", "(≧◡≦)", "😊", "😄"];
const SAD: &[&str] = &["(｡•́︿•̀｡)", "(⊙︵⊙)", "😢", "😭", "(•̥̥̥﹏•̥̥̥)"];
const TEASING: &[&str] = &["(¬‿¬)", "(✧_✧)", "(•‿•)", "😉", "😏"];
const PLAYFUL: &[&str] = &["(◠‿◠)", "(✧‿✧)", "(•ω•)", "😜", "😺"];
const ANGRY: &[&str] = &["(ಠ_ಠ)", "(╬ಠ益ಠ)", "(>_<)", "(▼︿▼)", "(•̀_•́)"];

impl EmoticonCategory {
    pub fn glyphs(self) -> &'static [&'static str] {
        match self {
            EmoticonCategory::Happy => HAPPY,
            EmoticonCategory::Sad => SAD,
            EmoticonCategory::Teasing => TEASING,
            EmoticonCategory::Playful => PLAYFUL,
            EmoticonCategory::Angry => ANGRY,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // CATEGORIES is non-empty
        *CATEGORIES.choose(rng).unwrap_or(&EmoticonCategory::Happy)
    }

    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.glyphs().choose(rng).copied().unwrap_or("😊")
    }
}

/// Random category, then a random glyph from it. Not tied to the reply's mood.
pub fn random_emoticon() -> &'static str {
    let mut rng = rand::thread_rng();
    EmoticonCategory::random(&mut rng).pick(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_category_has_glyphs() {
        for category in CATEGORIES {
            assert!(!category.glyphs().is_empty(), "{category:?} is empty");
        }
    }

    #[test]
    fn test_pick_stays_in_category() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in CATEGORIES {
            for _ in 0..50 {
                let glyph = category.pick(&mut rng);
                assert!(category.glyphs().contains(&glyph));
            }
        }
    }

    #[test]
    fn test_random_emoticon_comes_from_table() {
        for _ in 0..100 {
            let glyph = random_emoticon();
            assert!(CATEGORIES.iter().any(|c| c.glyphs().contains(&glyph)));
        }
    }

    #[test]
    fn test_random_category_covers_all() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(EmoticonCategory::random(&mut rng));
        }
        assert_eq!(seen.len(), CATEGORIES.len());
    }
}

use tracing::debug;

/// Tone length for a single Morse symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Dot
    Short,
    /// Dash
    Long,
}

/// Silence between symbols, characters, or words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// After every tone
    Symbol,
    /// Between characters (a space in the code string)
    Character,
    /// Between words (a `/` in the code string)
    Word,
}

/// One atomic playable element of a playback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// An audible tone
    Tone(Tone),
    /// A timed silence
    Gap(Gap),
}

impl Unit {
    /// Name of the audio resource backing this unit.
    ///
    /// Symbol and character gaps share the same pause clip.
    #[must_use]
    pub const fn clip_name(self) -> &'static str {
        match self {
            Self::Tone(Tone::Short) => "short-tone",
            Self::Tone(Tone::Long) => "long-tone",
            Self::Gap(Gap::Symbol | Gap::Character) => "short-pause",
            Self::Gap(Gap::Word) => "word-pause",
        }
    }
}

/// Scan a Morse code string into an ordered unit sequence.
///
/// Every tone is followed by a symbol gap, including the last tone of a
/// character. A space emits a character gap on top of that, a `/` emits a
/// word gap. Any other character is skipped.
#[must_use]
pub fn sequence(code: &str) -> Vec<Unit> {
    let mut units = Vec::with_capacity(code.len() * 2);

    for character in code.chars() {
        match character {
            '.' => {
                units.push(Unit::Tone(Tone::Short));
                units.push(Unit::Gap(Gap::Symbol));
            }
            '-' => {
                units.push(Unit::Tone(Tone::Long));
                units.push(Unit::Gap(Gap::Symbol));
            }
            ' ' => units.push(Unit::Gap(Gap::Character)),
            '/' => units.push(Unit::Gap(Gap::Word)),
            other => debug!(character = %other, "not a morse element, skipping"),
        }
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_code_empty_sequence() {
        assert!(sequence("").is_empty());
    }

    #[test]
    fn test_dot_dash_unit_order() {
        let units = sequence(".-");
        assert_eq!(
            units,
            vec![
                Unit::Tone(Tone::Short),
                Unit::Gap(Gap::Symbol),
                Unit::Tone(Tone::Long),
                Unit::Gap(Gap::Symbol),
            ]
        );
    }

    #[test]
    fn test_trailing_gap_after_last_tone() {
        // The last unit of a character is always a symbol gap
        let units = sequence("...");
        assert_eq!(units.len(), 6);
        assert_eq!(units.last(), Some(&Unit::Gap(Gap::Symbol)));
    }

    #[test]
    fn test_space_emits_character_gap() {
        let units = sequence(". .");
        assert_eq!(
            units,
            vec![
                Unit::Tone(Tone::Short),
                Unit::Gap(Gap::Symbol),
                Unit::Gap(Gap::Character),
                Unit::Tone(Tone::Short),
                Unit::Gap(Gap::Symbol),
            ]
        );
    }

    #[test]
    fn test_slash_emits_word_gap() {
        let units = sequence("/");
        assert_eq!(units, vec![Unit::Gap(Gap::Word)]);
    }

    #[test]
    fn test_unrecognized_characters_skipped() {
        assert_eq!(sequence("x?!"), vec![]);
        assert_eq!(sequence(".x-"), sequence(".-"));
    }

    #[test]
    fn test_clip_names() {
        assert_eq!(Unit::Tone(Tone::Short).clip_name(), "short-tone");
        assert_eq!(Unit::Tone(Tone::Long).clip_name(), "long-tone");
        assert_eq!(Unit::Gap(Gap::Symbol).clip_name(), "short-pause");
        assert_eq!(Unit::Gap(Gap::Character).clip_name(), "short-pause");
        assert_eq!(Unit::Gap(Gap::Word).clip_name(), "word-pause");
    }

    #[test]
    fn test_sequence_length_for_encoded_character() {
        // 'H' is four dots: four tones, each followed by a gap
        let units = sequence("....");
        assert_eq!(units.len(), 8);
        let tones = units
            .iter()
            .filter(|u| matches!(u, Unit::Tone(_)))
            .count();
        assert_eq!(tones, 4);
    }
}

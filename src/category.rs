//! Unicode general categories as stored in packed property records.
//!
//! Every record keeps its category in the low five bits. The numeric tags are
//! fixed by the record format and must not be renumbered: tables packed by
//! other producers rely on them.
//!
//! ## Examples
//!
//! ```rust
//! use serde_rpcjson::Category;
//!
//! assert_eq!(Category::from_record(0x4800_100F), Category::Control);
//! assert!(Category::Format.is_escaped());
//! assert!(!Category::UppercaseLetter.is_escaped());
//! ```

/// Mask selecting the category tag out of a property record.
pub const CATEGORY_MASK: u32 = 0x1F;

/// General category of a code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Category {
    #[default]
    Unassigned = 0,
    UppercaseLetter = 1,
    LowercaseLetter = 2,
    TitlecaseLetter = 3,
    ModifierLetter = 4,
    OtherLetter = 5,
    NonSpacingMark = 6,
    EnclosingMark = 7,
    CombiningSpacingMark = 8,
    DecimalDigitNumber = 9,
    LetterNumber = 10,
    OtherNumber = 11,
    SpaceSeparator = 12,
    LineSeparator = 13,
    ParagraphSeparator = 14,
    Control = 15,
    Format = 16,
    PrivateUse = 18,
    Surrogate = 19,
    DashPunctuation = 20,
    StartPunctuation = 21,
    EndPunctuation = 22,
    ConnectorPunctuation = 23,
    OtherPunctuation = 24,
    MathSymbol = 25,
    CurrencySymbol = 26,
    ModifierSymbol = 27,
    OtherSymbol = 28,
    InitialQuotePunctuation = 29,
    FinalQuotePunctuation = 30,
}

impl Category {
    /// Maps a five-bit tag to its category. Tag 17 and anything above 30 are
    /// not produced by any table and resolve to [`Category::Unassigned`].
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            1 => Category::UppercaseLetter,
            2 => Category::LowercaseLetter,
            3 => Category::TitlecaseLetter,
            4 => Category::ModifierLetter,
            5 => Category::OtherLetter,
            6 => Category::NonSpacingMark,
            7 => Category::EnclosingMark,
            8 => Category::CombiningSpacingMark,
            9 => Category::DecimalDigitNumber,
            10 => Category::LetterNumber,
            11 => Category::OtherNumber,
            12 => Category::SpaceSeparator,
            13 => Category::LineSeparator,
            14 => Category::ParagraphSeparator,
            15 => Category::Control,
            16 => Category::Format,
            18 => Category::PrivateUse,
            19 => Category::Surrogate,
            20 => Category::DashPunctuation,
            21 => Category::StartPunctuation,
            22 => Category::EndPunctuation,
            23 => Category::ConnectorPunctuation,
            24 => Category::OtherPunctuation,
            25 => Category::MathSymbol,
            26 => Category::CurrencySymbol,
            27 => Category::ModifierSymbol,
            28 => Category::OtherSymbol,
            29 => Category::InitialQuotePunctuation,
            30 => Category::FinalQuotePunctuation,
            _ => Category::Unassigned,
        }
    }

    /// Extracts the category from a full property record.
    #[must_use]
    pub const fn from_record(record: u32) -> Self {
        Self::from_tag((record & CATEGORY_MASK) as u8)
    }

    /// The numeric tag stored in the low bits of a record.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Whether characters of this category must be escaped inside a quoted
    /// string literal.
    #[must_use]
    pub const fn is_escaped(self) -> bool {
        matches!(
            self,
            Category::CombiningSpacingMark
                | Category::EnclosingMark
                | Category::NonSpacingMark
                | Category::Unassigned
                | Category::PrivateUse
                | Category::SpaceSeparator
                | Category::Control
                | Category::LineSeparator
                | Category::Format
                | Category::ParagraphSeparator
                | Category::Surrogate
        )
    }
}

impl From<unicode_general_category::GeneralCategory> for Category {
    #[allow(unreachable_patterns)]
    fn from(category: unicode_general_category::GeneralCategory) -> Self {
        use unicode_general_category::GeneralCategory as Gc;

        match category {
            Gc::UppercaseLetter => Category::UppercaseLetter,
            Gc::LowercaseLetter => Category::LowercaseLetter,
            Gc::TitlecaseLetter => Category::TitlecaseLetter,
            Gc::ModifierLetter => Category::ModifierLetter,
            Gc::OtherLetter => Category::OtherLetter,
            Gc::NonspacingMark => Category::NonSpacingMark,
            Gc::EnclosingMark => Category::EnclosingMark,
            Gc::SpacingMark => Category::CombiningSpacingMark,
            Gc::DecimalNumber => Category::DecimalDigitNumber,
            Gc::LetterNumber => Category::LetterNumber,
            Gc::OtherNumber => Category::OtherNumber,
            Gc::SpaceSeparator => Category::SpaceSeparator,
            Gc::LineSeparator => Category::LineSeparator,
            Gc::ParagraphSeparator => Category::ParagraphSeparator,
            Gc::Control => Category::Control,
            Gc::Format => Category::Format,
            Gc::PrivateUse => Category::PrivateUse,
            Gc::Surrogate => Category::Surrogate,
            Gc::DashPunctuation => Category::DashPunctuation,
            Gc::OpenPunctuation => Category::StartPunctuation,
            Gc::ClosePunctuation => Category::EndPunctuation,
            Gc::ConnectorPunctuation => Category::ConnectorPunctuation,
            Gc::OtherPunctuation => Category::OtherPunctuation,
            Gc::MathSymbol => Category::MathSymbol,
            Gc::CurrencySymbol => Category::CurrencySymbol,
            Gc::ModifierSymbol => Category::ModifierSymbol,
            Gc::OtherSymbol => Category::OtherSymbol,
            Gc::InitialPunctuation => Category::InitialQuotePunctuation,
            Gc::FinalPunctuation => Category::FinalQuotePunctuation,
            Gc::Unassigned => Category::Unassigned,
            _ => Category::Unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for tag in 0..=31u8 {
            let category = Category::from_tag(tag);
            if tag == 17 || tag > 30 {
                assert_eq!(category, Category::Unassigned);
            } else {
                assert_eq!(category.tag(), tag);
            }
        }
    }

    #[test]
    fn test_record_uses_low_bits_only() {
        assert_eq!(Category::from_record(0x0082_7FE1), Category::UppercaseLetter);
        assert_eq!(Category::from_record(0xFFFF_FFE0), Category::Unassigned);
        assert_eq!(Category::from_record(0x6000_400C), Category::SpaceSeparator);
    }

    #[test]
    fn test_escaped_set() {
        let escaped: Vec<_> = (0..=30u8)
            .map(Category::from_tag)
            .filter(|c| c.is_escaped())
            .collect();
        // Unassigned shows up twice because tag 17 maps onto it.
        assert_eq!(escaped.len(), 12);
        assert!(Category::Surrogate.is_escaped());
        assert!(!Category::OtherPunctuation.is_escaped());
        assert!(!Category::OtherSymbol.is_escaped());
    }
}

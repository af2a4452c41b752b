//! Field type behavior flags
//!
//! A [`Behavior`] is the set of [`BehaviorFlag`]s a field type belongs to.
//! Encoder and decoder consult these flags instead of comparing type names.

use std::fmt::{self, Display, Formatter};

/// Classification flag of a field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorFlag {
    /// Value travels as element text
    InfixValue,
    /// Value is an image reference (`src`)
    Image,
    /// Value travels as `value` + `data-value`
    PlainValue,
    /// Value is a JSON blob in `data-files` + `data-value`
    EmbedFiles,
    /// `min`/`max` become `minlength`/`maxlength`
    MinMaxLength,
    /// Stored value is a delimiter-joined multi-selection
    MultiValued,
    /// Decoder always falls back to element text
    TextFallback,
    /// Value is a system list id, exchanged as its legacy display value
    SystemList,
}

impl BehaviorFlag {
    /// Every flag, in declaration order
    pub const ALL: [Self; 8] = [
        Self::InfixValue,
        Self::Image,
        Self::PlainValue,
        Self::EmbedFiles,
        Self::MinMaxLength,
        Self::MultiValued,
        Self::TextFallback,
        Self::SystemList,
    ];

    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Name used in catalog configuration
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::InfixValue => "infix_value",
            Self::Image => "image",
            Self::PlainValue => "plain_value",
            Self::EmbedFiles => "embed_files",
            Self::MinMaxLength => "min_max_length",
            Self::MultiValued => "multi_valued",
            Self::TextFallback => "text_fallback",
            Self::SystemList => "system_list_type",
        }
    }
}

impl Display for BehaviorFlag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// How a field value is carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueCarrier {
    /// Escaped element text
    Text,
    /// `src` attribute
    Src,
    /// `value` and `data-value` attributes
    ValuePair,
    /// JSON string in `data-files` and `data-value`
    Files,
}

impl Display for ValueCarrier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Src => "src",
            Self::ValuePair => "value-pair",
            Self::Files => "files",
        };
        f.write_str(name)
    }
}

/// Set of behavior flags for one field type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Behavior(u16);

impl Behavior {
    /// No flags
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// With an additional flag
    #[inline]
    #[must_use]
    pub const fn with(self, flag: BehaviorFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    /// Check flag membership
    #[inline]
    #[must_use]
    pub const fn contains(self, flag: BehaviorFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Check if no flag is set
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over set flags
    pub fn flags(self) -> impl Iterator<Item = BehaviorFlag> {
        BehaviorFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }

    /// Every carrier the flags ask for
    ///
    /// A system list type that is also infix-valued only yields the value
    /// pair; its element text is never written.
    #[must_use]
    pub fn carriers(self) -> Vec<ValueCarrier> {
        let mut carriers = Vec::new();
        if self.contains(BehaviorFlag::EmbedFiles) {
            carriers.push(ValueCarrier::Files);
        }
        if self.contains(BehaviorFlag::Image) {
            carriers.push(ValueCarrier::Src);
        }
        if self.contains(BehaviorFlag::PlainValue) {
            carriers.push(ValueCarrier::ValuePair);
        }
        if self.contains(BehaviorFlag::InfixValue) && !self.contains(BehaviorFlag::SystemList) {
            carriers.push(ValueCarrier::Text);
        }
        carriers
    }

    /// The single carrier of this type's value, if any
    #[must_use]
    pub fn carrier(self) -> Option<ValueCarrier> {
        self.carriers().first().copied()
    }
}

impl FromIterator<BehaviorFlag> for Behavior {
    fn from_iter<I: IntoIterator<Item = BehaviorFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_roundtrip_through_iterator() {
        let behavior: Behavior = [BehaviorFlag::Image, BehaviorFlag::MultiValued]
            .into_iter()
            .collect();

        assert!(behavior.contains(BehaviorFlag::Image));
        assert!(!behavior.contains(BehaviorFlag::InfixValue));
        assert_eq!(behavior.flags().count(), 2);
    }

    #[test]
    fn empty_behavior_has_no_carrier() {
        assert!(Behavior::empty().is_empty());
        assert_eq!(Behavior::empty().carrier(), None);
    }

    #[test]
    fn system_list_infix_collapses_to_value_pair() {
        let behavior = Behavior::empty()
            .with(BehaviorFlag::InfixValue)
            .with(BehaviorFlag::PlainValue)
            .with(BehaviorFlag::SystemList);

        assert_eq!(behavior.carriers(), vec![ValueCarrier::ValuePair]);
    }

    #[test]
    fn infix_and_plain_conflict_without_system_list() {
        let behavior = Behavior::empty()
            .with(BehaviorFlag::InfixValue)
            .with(BehaviorFlag::PlainValue);

        assert_eq!(behavior.carriers().len(), 2);
    }

    #[test]
    fn every_flag_has_distinct_bit() {
        let all: Behavior = BehaviorFlag::ALL.into_iter().collect();
        assert_eq!(all.flags().count(), BehaviorFlag::ALL.len());
    }
}

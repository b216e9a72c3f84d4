// Typed attribute values of an analysis, with their legacy spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tags::Tag;

macro_rules! attribute_value {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $legacy:literal [$($tag:ident),*], )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $name {
            /// Value in the legacy Finnish vocabulary.
            pub fn legacy_code(self) -> &'static str {
                match self {
                    $( Self::$variant => $legacy, )*
                }
            }

            /// The value a tag denotes, if the tag belongs to this column.
            pub fn from_tag(tag: &Tag) -> Option<Self> {
                match tag {
                    $( $( Tag::$tag => Some(Self::$variant), )* )*
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.legacy_code())
            }
        }
    };
}

attribute_value! {
    /// Word class (`CLASS`).
    WordClass {
        Noun = "nimisana" [Noun],
        Adjective = "laatusana" [Adjective],
        NounAdjective = "nimisana_laatusana" [NounAdjective],
        Interjection = "huudahdussana" [Interjection],
        FirstName = "etunimi" [FirstName],
        LastName = "sukunimi" [LastName],
        PlaceName = "paikannimi" [PlaceName],
        /// Other proper names, including organization names.
        ProperName = "nimi" [OtherProperName],
        Verb = "teonsana" [Verb],
        Abbreviation = "lyhenne" [Abbreviation],
        Adverb = "seikkasana" [Adverb],
        Numeral = "lukusana" [Numeral, RomanNumeral],
        Pronoun = "asemosana" [Pronoun],
        Conjunction = "sidesana" [Conjunction],
        Adposition = "suhdesana" [Adposition],
        NegationVerb = "kieltosana" [NegationVerb],
        Prefix = "etuliite" [Prefix],
    }
}

attribute_value! {
    /// Grammatical case (`SIJAMUOTO`).
    Case {
        Nominative = "nimento" [Nominative],
        Genitive = "omanto" [Genitive],
        Partitive = "osanto" [Partitive],
        Essive = "olento" [Essive],
        Translative = "tulento" [Translative],
        Inessive = "sisaolento" [Inessive],
        Elative = "sisaeronto" [Elative],
        Illative = "sisatulento" [Illative],
        Adessive = "ulkoolento" [Adessive],
        Ablative = "ulkoeronto" [Ablative],
        Allative = "ulkotulento" [Allative],
        Abessive = "vajanto" [Abessive],
        Comitative = "seuranto" [Comitative],
        Instructive = "keinonto" [Instructive],
        StiAdverbial = "kerrontosti" [StiAdverbial],
        Accusative = "kohdanto" [Accusative],
    }
}

attribute_value! {
    /// Degree of comparison (`COMPARISON`).
    Comparison {
        Positive = "positive" [],
        Comparative = "comparative" [Comparative],
        Superlative = "superlative" [Superlative],
    }
}

attribute_value! {
    /// Focus particle (`FOCUS`).
    Focus {
        Kin = "kin" [Kin],
        Kaan = "kaan" [Kaan],
    }
}

attribute_value! {
    /// Grammatical number (`NUMBER`).
    Number {
        Singular = "singular" [Singular],
        Plural = "plural" [Plural],
    }
}

attribute_value! {
    /// Negative form (`NEGATIVE`).
    Negative {
        True = "true" [NegativeTrue],
        False = "false" [NegativeFalse],
        Both = "both" [NegativeBoth],
    }
}

attribute_value! {
    /// Mood or infinitive (`MOOD`, `REQUIRE_FOLLOWING_VERB`).
    Mood {
        AInfinitive = "A-infinitive" [AInfinitive],
        EInfinitive = "E-infinitive" [EInfinitive],
        MaInfinitive = "MA-infinitive" [MaInfinitive],
        MinenInfinitive = "MINEN-infinitive" [MinenInfinitive],
        MainenInfinitive = "MAINEN-infinitive" [MainenInfinitive],
        Indicative = "indicative" [Indicative],
        Conditional = "conditional" [Conditional],
        Imperative = "imperative" [Imperative],
        Potential = "potential" [Potential],
    }
}

impl Mood {
    /// E, MA and MINEN infinitives, which never carry a negative.
    pub fn is_second_to_fourth_infinitive(self) -> bool {
        matches!(
            self,
            Self::EInfinitive | Self::MaInfinitive | Self::MinenInfinitive
        )
    }
}

attribute_value! {
    /// Participle (`PARTICIPLE`).
    Participle {
        PresentActive = "present_active" [PresentActiveParticiple],
        PresentPassive = "present_passive" [PresentPassiveParticiple],
        PastActive = "past_active" [PastActiveParticiple],
        PastPassive = "past_passive" [PastPassiveParticiple],
        Agent = "agent" [AgentParticiple],
        Negation = "negation" [NegationParticiple],
    }
}

attribute_value! {
    /// Person (`PERSON`).
    Person {
        First = "1" [FirstPerson],
        Second = "2" [SecondPerson],
        Third = "3" [ThirdPerson],
        Fourth = "4" [FourthPerson],
    }
}

attribute_value! {
    /// Possessive suffix (`POSSESSIVE`).
    Possessive {
        FirstSingular = "1s" [PossessiveSg1],
        SecondSingular = "2s" [PossessiveSg2],
        FirstPlural = "1p" [PossessivePl1],
        SecondPlural = "2p" [PossessivePl2],
        Third = "3" [Possessive3],
    }
}

attribute_value! {
    /// Tense (`TENSE`).
    Tense {
        PresentSimple = "present_simple" [Present],
        PastImperfective = "past_imperfective" [Past],
    }
}

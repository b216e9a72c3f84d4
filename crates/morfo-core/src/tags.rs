//! The closed vocabulary of morphological tags.
//!
//! A Finnish dictionary writes tags as bracketed multi-character symbols such
//! as `[Ln]` (noun) or `[Sg]` (genitive). [`Tag`] names every tag the rule
//! layer understands and keeps anything else as [`Tag::Unknown`], so a newer
//! dictionary never loses information.

use serde::{Deserialize, Serialize};

macro_rules! tag_vocabulary {
    ($( $(#[$meta:meta])* $variant:ident => ($code:literal, $name:literal), )*) => {
        /// A morphological tag, identified by its dictionary code.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", from = "String")]
        pub enum Tag {
            $( $(#[$meta])* $variant, )*
            /// A tag code outside the known vocabulary.
            Unknown(String),
        }

        impl Tag {
            /// Look up a tag by its code, without brackets.
            pub fn from_code(code: &str) -> Self {
                match code {
                    $( $code => Self::$variant, )*
                    other => Self::Unknown(other.to_string()),
                }
            }

            /// Dictionary spelling without brackets, e.g. `"Ln"`.
            pub fn code(&self) -> &str {
                match self {
                    $( Self::$variant => $code, )*
                    Self::Unknown(code) => code,
                }
            }

            /// Stable English name, e.g. `"noun"`. Unknown tags use their code.
            pub fn name(&self) -> &str {
                match self {
                    $( Self::$variant => $name, )*
                    Self::Unknown(code) => code,
                }
            }
        }
    };
}

tag_vocabulary! {
    // Word classes
    Noun => ("Ln", "noun"),
    FirstName => ("Lee", "first_name"),
    LastName => ("Les", "last_name"),
    PlaceName => ("Lep", "place_name"),
    OtherProperName => ("Lem", "proper_name"),
    Adjective => ("Ll", "adjective"),
    NounAdjective => ("Lnl", "noun_adjective"),
    Verb => ("Lt", "verb"),
    Interjection => ("Lh", "interjection"),
    Prefix => ("Lp", "prefix"),
    Abbreviation => ("La", "abbreviation"),
    Adverb => ("Ls", "adverb"),
    Conjunction => ("Lc", "conjunction"),
    Numeral => ("Lu", "numeral"),
    RomanNumeral => ("Lur", "roman_numeral"),
    Pronoun => ("Lr", "pronoun"),
    Adposition => ("Ld", "adposition"),
    NegationVerb => ("Lk", "negation_verb"),

    // Vowel harmony
    BackVowels => ("Va", "back_vowels"),
    FrontVowels => ("V\u{e4}", "front_vowels"),
    MixedVowels => ("V\u{e4}\u{e4}", "mixed_vowels"),

    // Cases
    Nominative => ("Sn", "nominative"),
    Genitive => ("Sg", "genitive"),
    Partitive => ("Sp", "partitive"),
    Essive => ("Ses", "essive"),
    Translative => ("Str", "translative"),
    Inessive => ("Sine", "inessive"),
    Elative => ("Sela", "elative"),
    Illative => ("Sill", "illative"),
    Adessive => ("Sade", "adessive"),
    Ablative => ("Sabl", "ablative"),
    Allative => ("Sall", "allative"),
    Abessive => ("Sab", "abessive"),
    Comitative => ("Sko", "comitative"),
    Instructive => ("Sin", "instructive"),
    /// Adverbial `-sti` form.
    StiAdverbial => ("Ssti", "sti_adverbial"),
    Accusative => ("Sak", "accusative"),

    // Number
    Singular => ("Ny", "singular"),
    Plural => ("Nm", "plural"),

    // Possessive suffixes
    PossessiveSg1 => ("O1y", "possessive_1s"),
    PossessiveSg2 => ("O2y", "possessive_2s"),
    PossessivePl1 => ("O1m", "possessive_1p"),
    PossessivePl2 => ("O2m", "possessive_2p"),
    Possessive3 => ("O3", "possessive_3"),

    // Comparison
    Comparative => ("Cc", "comparative"),
    Superlative => ("Cs", "superlative"),

    // Focus particles
    Kin => ("Fkin", "clitic_kin"),
    Kaan => ("Fkaan", "clitic_kaan"),
    /// Question clitic `-ko`/`-kö`.
    Interrogative => ("Fko", "interrogative"),

    // Moods and infinitives
    AInfinitive => ("Tn1", "a_infinitive"),
    EInfinitive => ("Tn2", "e_infinitive"),
    MaInfinitive => ("Tn3", "ma_infinitive"),
    MinenInfinitive => ("Tn4", "minen_infinitive"),
    MainenInfinitive => ("Tn5", "mainen_infinitive"),
    Indicative => ("Tt", "indicative"),
    Conditional => ("Te", "conditional"),
    Imperative => ("Tk", "imperative"),
    Potential => ("Tm", "potential"),

    // Participles
    PresentActiveParticiple => ("Rv", "present_active_participle"),
    PresentPassiveParticiple => ("Ra", "present_passive_participle"),
    PastActiveParticiple => ("Ru", "past_active_participle"),
    PastPassiveParticiple => ("Rt", "past_passive_participle"),
    AgentParticiple => ("Rm", "agent_participle"),
    NegationParticiple => ("Re", "negation_participle"),

    // Person
    FirstPerson => ("P1", "first_person"),
    SecondPerson => ("P2", "second_person"),
    ThirdPerson => ("P3", "third_person"),
    /// Impersonal passive.
    FourthPerson => ("P4", "fourth_person"),

    // Tense
    Present => ("Ap", "present"),
    Past => ("Ai", "past"),

    // Negative
    NegativeTrue => ("Et", "negative"),
    NegativeFalse => ("Ef", "affirmative"),
    NegativeBoth => ("Eb", "negative_or_affirmative"),

    // Derivation flags
    /// Common noun derived from a proper name.
    DerivedCommonNoun => ("Dg", "derived_common_noun"),
    /// Proper-name prefix written with a capital initial.
    CapitalizedPrefix => ("De", "capitalized_prefix"),

    // Information flags
    InnerLocativePlace => ("Ips", "inner_locative_place"),
    OuterLocativePlace => ("Ipu", "outer_locative_place"),
    QuotationLoan => ("Isf", "quotation_loan"),
    HyphenRequired => ("Icu", "hyphen_required"),
    HyphenOptional => ("Ica", "hyphen_optional"),
    FreeSecondPart => ("Ivj", "free_second_part"),
    OrganizationName => ("Ion", "organization_name"),
    RequiresAInfinitive => ("Ira", "requires_a_infinitive"),
    RequiresMaInfinitive => ("Irm", "requires_ma_infinitive"),

    // Boundaries
    CompoundBoundary => ("Bc", "compound_boundary"),
    HyphenBoundary => ("Bh", "hyphen_boundary"),
    MorphemeBoundary => ("Bm", "morpheme_boundary"),
}

impl Tag {
    /// Parse a bracketed dictionary symbol such as `"[Sg]"`.
    ///
    /// Returns `None` for symbols that are not bracketed.
    pub fn parse(symbol: &str) -> Option<Self> {
        let code = symbol.strip_prefix('[')?.strip_suffix(']')?;
        Some(Self::from_code(code))
    }

    /// Whether this tag separates morphemes.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            Self::CompoundBoundary | Self::HyphenBoundary | Self::MorphemeBoundary
        )
    }

    /// Whether this is one of the proper-name classes.
    pub fn is_proper_name(&self) -> bool {
        matches!(
            self,
            Self::FirstName | Self::LastName | Self::PlaceName | Self::OtherProperName
        )
    }

    /// Question or focus clitic.
    pub fn is_clitic(&self) -> bool {
        matches!(self, Self::Kin | Self::Kaan | Self::Interrogative)
    }

    pub fn is_possessive(&self) -> bool {
        matches!(
            self,
            Self::PossessiveSg1
                | Self::PossessiveSg2
                | Self::PossessivePl1
                | Self::PossessivePl2
                | Self::Possessive3
        )
    }

    pub fn is_comparative(&self) -> bool {
        matches!(self, Self::Comparative | Self::Superlative)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.code().to_string()
    }
}

impl From<String> for Tag {
    fn from(code: String) -> Self {
        Tag::from_code(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_names() {
        assert_eq!(Tag::Noun.code(), "Ln");
        assert_eq!(Tag::Noun.name(), "noun");
        assert_eq!(Tag::Genitive.name(), "genitive");
        assert_eq!(Tag::Plural.name(), "plural");
        assert_eq!(Tag::from_code("Nm"), Tag::Plural);
        assert_eq!(Tag::from_code("V\u{e4}\u{e4}"), Tag::MixedVowels);
    }

    #[test]
    fn parse_bracketed_symbols() {
        assert_eq!(Tag::parse("[Sg]"), Some(Tag::Genitive));
        assert_eq!(Tag::parse("[Bc]"), Some(Tag::CompoundBoundary));
        assert_eq!(Tag::parse("Sg"), None);
        assert_eq!(Tag::parse("[Sg"), None);
        assert_eq!(Tag::parse("a"), None);
    }

    #[test]
    fn unknown_tags_are_preserved() {
        let tag = Tag::parse("[Zq]").unwrap();
        assert_eq!(tag, Tag::Unknown("Zq".to_string()));
        assert_eq!(tag.code(), "Zq");
        assert_eq!(tag.name(), "Zq");
        assert_eq!(tag.to_string(), "[Zq]");
    }

    #[test]
    fn categories() {
        assert!(Tag::HyphenBoundary.is_boundary());
        assert!(!Tag::Noun.is_boundary());
        assert!(Tag::PlaceName.is_proper_name());
        assert!(!Tag::Noun.is_proper_name());
        assert!(Tag::Interrogative.is_clitic());
        assert!(Tag::Possessive3.is_possessive());
        assert!(Tag::Superlative.is_comparative());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&vec![Tag::Noun, Tag::Unknown("Zq".into())]).unwrap();
        assert_eq!(json, r#"["Ln","Zq"]"#);
        let back: Vec<Tag> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Tag::Noun, Tag::Unknown("Zq".into())]);
    }
}

// Morphological analysis result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::attributes::{
    Case, Comparison, Focus, Mood, Negative, Number, Participle, Person, Possessive, Tense,
    WordClass,
};
use crate::tags::Tag;

// Keys of the legacy attribute map.

pub const ATTR_BASEFORM: &str = "BASEFORM";
pub const ATTR_CLASS: &str = "CLASS";
pub const ATTR_COMPARISON: &str = "COMPARISON";
pub const ATTR_FOCUS: &str = "FOCUS";
pub const ATTR_FSTOUTPUT: &str = "FSTOUTPUT";
pub const ATTR_KYSYMYSLIITE: &str = "KYSYMYSLIITE";
pub const ATTR_MALAGA_VAPAA_JALKIOSA: &str = "MALAGA_VAPAA_JALKIOSA";
pub const ATTR_MOOD: &str = "MOOD";
pub const ATTR_NEGATIVE: &str = "NEGATIVE";
pub const ATTR_NUMBER: &str = "NUMBER";
pub const ATTR_PARTICIPLE: &str = "PARTICIPLE";
pub const ATTR_PERSON: &str = "PERSON";
pub const ATTR_POSSESSIVE: &str = "POSSESSIVE";
pub const ATTR_POSSIBLE_GEOGRAPHICAL_NAME: &str = "POSSIBLE_GEOGRAPHICAL_NAME";
pub const ATTR_REQUIRE_FOLLOWING_VERB: &str = "REQUIRE_FOLLOWING_VERB";
pub const ATTR_SIJAMUOTO: &str = "SIJAMUOTO";
pub const ATTR_STRUCTURE: &str = "STRUCTURE";
pub const ATTR_TENSE: &str = "TENSE";

/// One morpheme segment of an analysed word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// The span of the input word this segment consumed, in its original case.
    pub surface: String,
    /// Dictionary-side spelling of the segment.
    pub form: String,
    /// Tags attached inside the segment. A boundary tag belongs to the
    /// segment it ends.
    pub tags: Vec<Tag>,
    /// Base forms declared by the segment's parameter blocks.
    pub base_forms: Vec<String>,
}

impl Segment {
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Nominative singular with no clitic, possessive suffix or comparison.
    pub fn is_in_base_form(&self) -> bool {
        self.has_tag(&Tag::Nominative)
            && self.has_tag(&Tag::Singular)
            && !self
                .tags
                .iter()
                .any(|t| t.is_clitic() || t.is_possessive() || t.is_comparative())
    }

    pub fn is_proper_noun(&self) -> bool {
        self.tags.iter().any(Tag::is_proper_name)
    }
}

/// A constituent of a word: a single segment, or several segments that share
/// one base form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordPart {
    Single(Segment),
    /// Compound whose parts the dictionary declares with a single `=`-split
    /// base form.
    StrongMorpheme {
        parts: Vec<Segment>,
        base_form: String,
    },
}

impl WordPart {
    pub fn base_forms(&self) -> Vec<&str> {
        match self {
            Self::Single(segment) => segment.base_forms.iter().map(String::as_str).collect(),
            Self::StrongMorpheme { base_form, .. } => vec![base_form.as_str()],
        }
    }

    /// A strong morpheme is in base form when its last part is.
    pub fn is_in_base_form(&self) -> bool {
        match self {
            Self::Single(segment) => segment.is_in_base_form(),
            Self::StrongMorpheme { parts, .. } => parts.last().is_some_and(Segment::is_in_base_form),
        }
    }

    /// A strong morpheme is a proper noun when its first part is.
    pub fn is_proper_noun(&self) -> bool {
        match self {
            Self::Single(segment) => segment.is_proper_noun(),
            Self::StrongMorpheme { parts, .. } => parts.first().is_some_and(Segment::is_proper_noun),
        }
    }

    /// Dictionary-side text of the part.
    pub fn text(&self) -> String {
        match self {
            Self::Single(segment) => segment.form.clone(),
            Self::StrongMorpheme { parts, .. } => parts.iter().map(|p| p.form.as_str()).collect(),
        }
    }
}

/// Word-part decomposition of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Word {
    pub parts: Vec<WordPart>,
}

/// A single lexical reading of a surface word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Analysis {
    pub base_form: Option<String>,
    pub word_class: Option<WordClass>,
    pub case: Option<Case>,
    pub comparison: Option<Comparison>,
    pub focus: Option<Focus>,
    pub number: Option<Number>,
    pub negative: Option<Negative>,
    pub mood: Option<Mood>,
    pub participle: Option<Participle>,
    pub person: Option<Person>,
    pub possessive: Option<Possessive>,
    pub tense: Option<Tense>,
    /// `-ko`/`-kö` question clitic present.
    pub interrogative: bool,
    /// Last part may combine freely as a compound tail.
    pub malaga_vapaa_jalkiosa: bool,
    pub possible_geographical_name: bool,
    pub require_following_verb: Option<Mood>,
    pub structure: Option<String>,
    pub fst_output: Option<String>,
    pub base_form_parts: Option<Vec<String>>,
    pub word: Option<Word>,
    pub segments: Vec<Segment>,
    /// 0-based position in the result list.
    pub rank: usize,
    /// Path cost, for weighted dictionaries.
    pub weight: Option<i32>,
}

impl Analysis {
    /// Probability derived from the path weight: `exp(-weight / 100)`.
    pub fn probability(&self) -> Option<f64> {
        self.weight.map(|w| (-f64::from(w) / 100.0).exp())
    }

    /// All tags of all segments, in order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.segments.iter().flat_map(|s| s.tags.iter())
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags().map(Tag::name).collect()
    }

    /// Flatten into the legacy key/value attribute map.
    pub fn to_voikko_format(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let mut put = |key: &str, value: Option<&str>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value.to_string());
            }
        };

        put(ATTR_BASEFORM, self.base_form.as_deref());
        put(ATTR_CLASS, self.word_class.map(WordClass::legacy_code));
        put(ATTR_SIJAMUOTO, self.case.map(Case::legacy_code));
        put(ATTR_COMPARISON, self.comparison.map(Comparison::legacy_code));
        put(ATTR_FOCUS, self.focus.map(Focus::legacy_code));
        put(ATTR_FSTOUTPUT, self.fst_output.as_deref());
        put(ATTR_STRUCTURE, self.structure.as_deref());
        put(ATTR_NUMBER, self.number.map(Number::legacy_code));
        put(ATTR_NEGATIVE, self.negative.map(Negative::legacy_code));
        put(ATTR_MOOD, self.mood.map(Mood::legacy_code));
        put(ATTR_PARTICIPLE, self.participle.map(Participle::legacy_code));
        put(ATTR_PERSON, self.person.map(Person::legacy_code));
        put(ATTR_POSSESSIVE, self.possessive.map(Possessive::legacy_code));
        put(ATTR_TENSE, self.tense.map(Tense::legacy_code));
        put(
            ATTR_REQUIRE_FOLLOWING_VERB,
            self.require_following_verb.map(Mood::legacy_code),
        );
        put(ATTR_KYSYMYSLIITE, self.interrogative.then_some("true"));
        put(
            ATTR_MALAGA_VAPAA_JALKIOSA,
            self.malaga_vapaa_jalkiosa.then_some("true"),
        );
        put(
            ATTR_POSSIBLE_GEOGRAPHICAL_NAME,
            self.possible_geographical_name.then_some("true"),
        );

        map
    }
}

// Grammatical attributes of an analysis.
//
// Tags are scanned from the end of the output towards the start, so the
// last tag of each column wins and the head of a compound decides the word
// class.

use morfo_core::Analysis;
use morfo_core::attributes::{
    Case, Comparison, Focus, Mood, Negative, Number, Participle, Person, Possessive, Tense,
    WordClass,
};
use morfo_core::tags::Tag;

use super::buffer::OutputBuffer;

/// Fill the attribute columns of `analysis` from the tags in `buffer`.
pub(crate) fn parse_basic_attributes(buffer: &OutputBuffer, analysis: &mut Analysis) {
    let tokens = buffer.tokens();
    let mut to_adjective = false;
    let mut bc_passed = false;
    let mut class_set = false;

    for (i, token) in tokens.iter().enumerate().rev() {
        let Some(tag) = &token.tag else { continue };

        if token.is_class_tag() {
            if !class_set {
                analysis.word_class = if tag == &Tag::NounAdjective {
                    let compared = matches!(
                        analysis.comparison,
                        Some(Comparison::Comparative | Comparison::Superlative)
                    );
                    if to_adjective || compared || buffer.first_is(&Tag::Numeral) {
                        Some(WordClass::Adjective)
                    } else {
                        Some(WordClass::NounAdjective)
                    }
                } else {
                    WordClass::from_tag(tag)
                };
                class_set = true;
            }
            continue;
        }

        let inflects = !matches!(
            analysis.word_class,
            Some(WordClass::Prefix | WordClass::Adverb)
        );

        match tag {
            Tag::Interrogative => analysis.interrogative = true,
            Tag::FreeSecondPart => {
                if buffer.first_char() != Some('-') {
                    analysis.malaga_vapaa_jalkiosa = true;
                }
            }
            Tag::HyphenOptional => {
                let compound_follows = buffer.contains_after(i, |t| {
                    t.is(&Tag::CompoundBoundary) || t.is(&Tag::Adjective)
                });
                if !compound_follows
                    && matches!(
                        analysis.word_class,
                        None | Some(WordClass::Noun | WordClass::NounAdjective)
                    )
                {
                    analysis.possible_geographical_name = true;
                }
            }
            Tag::RequiresAInfinitive | Tag::RequiresMaInfinitive => {
                let nominal = analysis
                    .mood
                    .is_some_and(Mood::is_second_to_fourth_infinitive);
                if !nominal && matches!(analysis.word_class, None | Some(WordClass::Verb)) {
                    analysis.require_following_verb = Some(if tag == &Tag::RequiresAInfinitive {
                        Mood::AInfinitive
                    } else {
                        Mood::MaInfinitive
                    });
                }
            }
            Tag::CompoundBoundary => {
                let after_hyphen = buffer.ends_with_char(i.checked_sub(1), '-')
                    || (i >= 2
                        && tokens[i - 1].is(&Tag::HyphenBoundary)
                        && buffer.ends_with_char(Some(i - 2), '-'));
                if !class_set && analysis.word_class.is_none() && after_hyphen {
                    analysis.word_class = Some(WordClass::Prefix);
                    class_set = true;
                }
                bc_passed = true;
            }
            _ => {
                if inflects && analysis.case.is_none() {
                    if let Some(case) = Case::from_tag(tag) {
                        analysis.case = Some(case);
                        to_adjective |= case == Case::StiAdverbial;
                        continue;
                    }
                }
                if inflects && analysis.number.is_none() {
                    if let Some(number) = Number::from_tag(tag) {
                        analysis.number = Some(number);
                        continue;
                    }
                }
                if analysis.person.is_none() {
                    analysis.person = Person::from_tag(tag);
                }
                if analysis.word_class.is_none() && analysis.mood.is_none() {
                    analysis.mood = Mood::from_tag(tag);
                }
                if analysis.tense.is_none() {
                    analysis.tense = Tense::from_tag(tag);
                }
                if analysis.focus.is_none() {
                    analysis.focus = Focus::from_tag(tag);
                }
                if analysis.possessive.is_none() {
                    analysis.possessive = Possessive::from_tag(tag);
                }
                if analysis.word_class.is_none() && analysis.comparison.is_none() {
                    analysis.comparison = Comparison::from_tag(tag);
                }
                if analysis.negative.is_none() {
                    analysis.negative = Negative::from_tag(tag);
                }
                if !bc_passed
                    && analysis.participle.is_none()
                    && (matches!(analysis.word_class, None | Some(WordClass::Adjective))
                        || buffer.last_is(&Tag::Noun))
                {
                    analysis.participle = Participle::from_tag(tag);
                }
            }
        }
    }
}

/// Cross-column adjustments applied after parsing.
pub(crate) fn post_process(analysis: &mut Analysis) {
    let non_verb = analysis.word_class.is_some_and(|c| c != WordClass::Verb);
    let nominal = analysis
        .mood
        .is_some_and(Mood::is_second_to_fourth_infinitive);
    if non_verb || nominal {
        analysis.negative = None;
    }

    if analysis.participle == Some(Participle::PastPassive) {
        analysis.word_class = Some(WordClass::Adjective);
    }

    if analysis.case == Some(Case::StiAdverbial) {
        analysis.number = None;
    }

    match analysis.word_class {
        Some(WordClass::Adjective | WordClass::NounAdjective) => {
            analysis.comparison.get_or_insert(Comparison::Positive);
        }
        Some(WordClass::Noun) => analysis.comparison = None,
        _ => {}
    }
}

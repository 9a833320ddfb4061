//! Closed code tables from release codes to target vocabulary terms.
//!
//! Every table is an exhaustive match; a miss is a typed [`LookupError`] so the
//! caller decides whether to abort the file or the run.

use crate::constants::codes;
use crate::errors::LookupError;
use crate::vocabulary::Vocabulary;

fn miss(table: &'static str, code: &str) -> LookupError {
    LookupError {
        table,
        code: code.to_string(),
    }
}

/// Description language from an ISO 639-1 code.
pub fn language(code: &str) -> Result<Vocabulary, LookupError> {
    match code {
        codes::LANGUAGE_ENGLISH => Ok(Vocabulary::EnglishLanguage),
        codes::LANGUAGE_SPANISH => Ok(Vocabulary::SpanishLanguage),
        _ => Err(miss("language", code)),
    }
}

/// Case significance term from its release code.
pub fn case_significance(code: &str) -> Result<Vocabulary, LookupError> {
    match code {
        codes::CASE_INSENSITIVE => Ok(Vocabulary::DescriptionNotCaseSensitive),
        codes::CASE_SENSITIVE => Ok(Vocabulary::DescriptionCaseSensitive),
        codes::INITIAL_CHARACTER_CASE_INSENSITIVE => {
            Ok(Vocabulary::DescriptionInitialCharacterCaseSensitive)
        }
        _ => Err(miss("case significance", code)),
    }
}

/// Description type term from its release code.
pub fn description_type(code: &str) -> Result<Vocabulary, LookupError> {
    match code {
        codes::DEFINITION_TYPE => Ok(Vocabulary::DefinitionDescriptionType),
        codes::FULLY_SPECIFIED_NAME_TYPE => Ok(Vocabulary::FullyQualifiedNameDescriptionType),
        codes::SYNONYM_TYPE => Ok(Vocabulary::RegularNameDescriptionType),
        _ => Err(miss("description type", code)),
    }
}

/// Dialect pattern from a language refset id.
pub fn dialect_pattern(refset_id: &str) -> Result<Vocabulary, LookupError> {
    match refset_id {
        codes::US_ENGLISH_REFSET => Ok(Vocabulary::UsDialectPattern),
        codes::GB_ENGLISH_REFSET => Ok(Vocabulary::GbDialectPattern),
        _ => Err(miss("dialect refset", refset_id)),
    }
}

/// Dialect acceptability term from its release code.
pub fn acceptability(code: &str) -> Result<Vocabulary, LookupError> {
    match code {
        codes::PREFERRED => Ok(Vocabulary::Preferred),
        codes::ACCEPTABLE => Ok(Vocabulary::Acceptable),
        _ => Err(miss("acceptability", code)),
    }
}

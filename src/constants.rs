/// Legacy codes recognized by the closed lookup tables.
pub mod codes {
    /// Case significance: entire term case insensitive.
    pub const CASE_INSENSITIVE: &str = "900000000000448009";
    /// Case significance: entire term case sensitive.
    pub const CASE_SENSITIVE: &str = "900000000000017005";
    /// Case significance: only the initial character is case insensitive.
    pub const INITIAL_CHARACTER_CASE_INSENSITIVE: &str = "900000000000020002";

    /// Description type: textual definition.
    pub const DEFINITION_TYPE: &str = "900000000000550004";
    /// Description type: fully specified name.
    pub const FULLY_SPECIFIED_NAME_TYPE: &str = "900000000000003001";
    /// Description type: synonym.
    pub const SYNONYM_TYPE: &str = "900000000000013009";

    /// Language refset: US English.
    pub const US_ENGLISH_REFSET: &str = "900000000000509007";
    /// Language refset: GB English.
    pub const GB_ENGLISH_REFSET: &str = "900000000000508004";

    /// Acceptability: preferred.
    pub const PREFERRED: &str = "900000000000548007";
    /// Acceptability: acceptable.
    pub const ACCEPTABLE: &str = "900000000000549004";

    /// ISO 639-1 English.
    pub const LANGUAGE_ENGLISH: &str = "en";
    /// ISO 639-1 Spanish.
    pub const LANGUAGE_SPANISH: &str = "es";

    /// Identifier source concept for SNOMED CT integer ids.
    pub const SNOMED_INTEGER_ID_SCHEME: &str = "900000000000294009";
    /// Identifier source concept for alternate identifiers in the identifier file.
    pub const ALTERNATE_ID_SCHEME: &str = "11010000107";
    /// Status flag value meaning active.
    pub const ACTIVE_FLAG: &str = "1";
}

/// Fixed inputs of the identifier derivation schemes.
pub mod identity {
    use uuid::Uuid;

    /// Name prefix for content-addressed primary-system (SNOMED CT) codes.
    pub const PRIMARY_CODE_PREFIX: &str = "org.snomed.";
    /// Name prefix for content-addressed secondary-system (LOINC) codes.
    pub const SECONDARY_CODE_PREFIX: &str = "org.loinc.";
    /// Namespace used for bracketed absolute references (RFC 4122 URL namespace).
    pub const REFERENCE_NAMESPACE: Uuid = Uuid::NAMESPACE_URL;
    /// Namespace for target vocabulary concepts.
    pub const VOCABULARY_NAMESPACE: Uuid = Uuid::from_u128(0x6d1f_4a3c_9b0e_4e57_a1c2_5f4e_2b7d_9c10);
    /// Namespace for content-addressed stamp ids.
    pub const STAMP_NAMESPACE: Uuid = Uuid::from_u128(0x0b8e_52d4_77a1_4c3f_8d26_e1f9_3a5b_c408);
}

/// File classification and discovery.
pub mod files {
    /// Concept file name keyword.
    pub const CONCEPT_KEYWORD: &str = "Concept";
    /// Text definition file name keyword.
    pub const DEFINITION_KEYWORD: &str = "Definition";
    /// Description file name keyword.
    pub const DESCRIPTION_KEYWORD: &str = "Description";
    /// Language refset file name keyword.
    pub const LANGUAGE_KEYWORD: &str = "Language";
    /// Identifier file name keyword.
    pub const IDENTIFIER_KEYWORD: &str = "Identifier";
    /// OWL expression refset file name keyword.
    pub const AXIOM_KEYWORD: &str = "OWLExpression";
    /// Extensions (case-insensitive) considered release files.
    pub const EXTENSIONS: [&str; 2] = ["txt", "tsv"];
    /// Column delimiter.
    pub const DELIMITER: char = '\t';
}

/// Column positions shared by every RF2 row schema.
pub mod columns {
    /// Component or member id.
    pub const ID: usize = 0;
    /// `YYYYMMDD` effective time.
    pub const EFFECTIVE_TIME: usize = 1;
    /// `1` when active.
    pub const ACTIVE: usize = 2;
    /// Owning module code.
    pub const MODULE_ID: usize = 3;

    /// Concept file.
    pub mod concept {
        /// Primitive or defined.
        pub const DEFINITION_STATUS_ID: usize = 4;
        /// Column count.
        pub const COUNT: usize = 5;
    }

    /// Description and text definition files.
    pub mod description {
        /// Described concept.
        pub const CONCEPT_ID: usize = 4;
        /// ISO language code.
        pub const LANGUAGE_CODE: usize = 5;
        /// Description type code.
        pub const TYPE_ID: usize = 6;
        /// Description text.
        pub const TERM: usize = 7;
        /// Case significance code.
        pub const CASE_SIGNIFICANCE_ID: usize = 8;
        /// Column count.
        pub const COUNT: usize = 9;
    }

    /// Language refset file.
    pub mod language {
        /// Refset the member belongs to.
        pub const REFSET_ID: usize = 4;
        /// Component the member refers to.
        pub const REFERENCED_COMPONENT_ID: usize = 5;
        /// Preferred or acceptable.
        pub const ACCEPTABILITY_ID: usize = 6;
        /// Column count.
        pub const COUNT: usize = 7;
    }

    /// Identifier file.
    pub mod identifier {
        /// Alternate identifier scheme.
        pub const IDENTIFIER_SCHEME_ID: usize = 4;
        /// Component the member refers to.
        pub const REFERENCED_COMPONENT_ID: usize = 5;
        /// Column count.
        pub const COUNT: usize = 6;
    }

    /// OWL expression refset file.
    pub mod axiom {
        /// Refset the member belongs to.
        pub const REFSET_ID: usize = 4;
        /// Component the member refers to.
        pub const REFERENCED_COMPONENT_ID: usize = 5;
        /// OWL functional syntax text.
        pub const OWL_EXPRESSION: usize = 6;
        /// Column count.
        pub const COUNT: usize = 7;
    }
}

/// Bootstrap concepts composed by the starter data.
pub mod starter {
    /// Name of the authoring agent for every transformed stamp.
    pub const AUTHOR_NAME: &str = "SNOMED CT LOINC Collaboration Author";
    /// Fully qualified name of the author concept.
    pub const AUTHOR_FQN: &str = "IHTSDO SNOMED CT LOINC Collaboration Author";
    /// Text definition of the author concept.
    pub const AUTHOR_DEFINITION: &str = "International Health Terminology Standards Development Organisation (IHTSDO) SNOMED CT LOINC Collaboration Author";
    /// Seed text of the LOINC Number identifier concept.
    pub const LOINC_NUMBER_SEED: &str = "705114005";
    /// Fully qualified name of the LOINC Number concept.
    pub const LOINC_NUMBER_FQN: &str = "LOINC Number";
    /// Synonym of the LOINC Number concept.
    pub const LOINC_NUMBER_SYNONYM: &str = "LOINC Num";
    /// Text definition of the LOINC Number concept.
    pub const LOINC_NUMBER_DEFINITION: &str = "Unique point of origin for identifier";
}

/// JSON-lines store layout.
pub mod store {
    /// Committed facts, one `FactLine` per line.
    pub const FACTS_FILE: &str = "facts.jsonl";
    /// Committed stamp records, one per line.
    pub const STAMPS_FILE: &str = "stamps.jsonl";
    /// Extension of the files written before commit.
    pub const STAGING_SUFFIX: &str = "partial";
}

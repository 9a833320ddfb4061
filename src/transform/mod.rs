//! Per-file transformation: schema dispatch and the streaming row loop.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace};

use crate::constants::columns::{ACTIVE, EFFECTIVE_TIME, ID, MODULE_ID};
use crate::constants::files::{
    AXIOM_KEYWORD, CONCEPT_KEYWORD, DEFINITION_KEYWORD, DELIMITER, DESCRIPTION_KEYWORD,
    IDENTIFIER_KEYWORD, LANGUAGE_KEYWORD,
};
use crate::data::Fact;
use crate::errors::{RowError, TransformError};
use crate::identity::IdentityResolver;
use crate::store::Composer;

/// OWL expression refset rows.
pub mod axiom;
/// Concept rows.
pub mod concept;
/// Text definition rows.
pub mod definition;
/// Description rows.
pub mod description;
/// Fold state for grouped schemas.
pub mod grouping;
/// Alternate identifier rows.
pub mod identifier;
/// Language refset rows.
pub mod language;

use grouping::{Boundary, GroupState, PendingRow, ReopenedGroup};

/// Row schema of a release file, chosen from its file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Concept snapshot or delta.
    Concept,
    /// Text definitions.
    Definition,
    /// Descriptions.
    Description,
    /// Language refset.
    Language,
    /// Alternate identifiers.
    Identifier,
    /// OWL expression refset.
    Axiom,
}

impl FileKind {
    /// First keyword contained in `name` wins; matching is case-sensitive.
    pub fn from_file_name(name: &str) -> Option<Self> {
        [
            (CONCEPT_KEYWORD, FileKind::Concept),
            (DEFINITION_KEYWORD, FileKind::Definition),
            (DESCRIPTION_KEYWORD, FileKind::Description),
            (LANGUAGE_KEYWORD, FileKind::Language),
            (IDENTIFIER_KEYWORD, FileKind::Identifier),
            (AXIOM_KEYWORD, FileKind::Axiom),
        ]
        .into_iter()
        .find_map(|(keyword, kind)| name.contains(keyword).then_some(kind))
    }

    /// Short lowercase name for reports.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Concept => "concept",
            FileKind::Definition => "definition",
            FileKind::Description => "description",
            FileKind::Language => "language",
            FileKind::Identifier => "identifier",
            FileKind::Axiom => "axiom",
        }
    }
}

/// One tab-split data row.
#[derive(Debug)]
pub struct Row<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Split `text` and require exactly `expected` columns.
    pub fn parse(text: &'a str, line: usize, expected: usize, path: &Path) -> Result<Self, TransformError> {
        let fields: Vec<&str> = text.split(DELIMITER).collect();
        if fields.len() != expected {
            return Err(TransformError::ColumnCount {
                path: path.to_path_buf(),
                line,
                expected,
                found: fields.len(),
            });
        }
        Ok(Self { line, fields })
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Field at `column`. Callers only pass columns below the validated count.
    pub fn get(&self, column: usize) -> &'a str {
        self.fields.get(column).copied().unwrap_or_default()
    }

    /// Value of the id column.
    pub fn id(&self) -> &'a str {
        self.get(ID)
    }
}

/// Counts for one transformed file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Data rows read.
    pub rows: usize,
    /// Groups started.
    pub groups: usize,
    /// Sessions opened.
    pub sessions: usize,
    /// Facts composed.
    pub facts: usize,
}

/// Mapping from one row schema to facts.
///
/// Grouped schemas fold consecutive rows sharing an id into one group: the
/// group accumulator is derived from the first row and `group_facts` is only
/// composed once. Ungrouped schemas treat every row as its own group.
pub(crate) trait RowTransformer {
    /// Per-group accumulator derived from the first row.
    type Group;

    const COLUMNS: usize;
    const GROUPED: bool;

    fn open_group(&self, row: &Row<'_>, resolver: &IdentityResolver) -> Result<Self::Group, RowError>;

    /// Base facts composed in the session of the group's first row.
    fn group_facts(&self, _group: &Self::Group, _row: &Row<'_>) -> Result<Vec<Fact>, RowError> {
        Ok(Vec::new())
    }

    /// Facts composed for every row of the group.
    fn row_facts(
        &self,
        _group: &Self::Group,
        _row: &Row<'_>,
        _resolver: &IdentityResolver,
    ) -> Result<Vec<Fact>, RowError> {
        Ok(Vec::new())
    }
}

/// Options shared by every file of a run.
#[derive(Clone, Copy, Debug)]
pub struct FileOptions {
    /// Reject grouped files with non-contiguous ids.
    pub validate_group_order: bool,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            validate_group_order: true,
        }
    }
}

/// Open `path` and transform it as `kind`.
pub fn transform_file(
    kind: FileKind,
    path: &Path,
    composer: &Composer<'_>,
    options: FileOptions,
) -> Result<FileStats, TransformError> {
    let file = File::open(path).map_err(|source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    transform_reader(kind, BufReader::new(file), path, composer, options)
}

/// Transform already-open release content; `path` is used for error context.
pub fn transform_reader<R: BufRead>(
    kind: FileKind,
    reader: R,
    path: &Path,
    composer: &Composer<'_>,
    options: FileOptions,
) -> Result<FileStats, TransformError> {
    match kind {
        FileKind::Concept => drive(&concept::ConceptTransformer, reader, path, composer, options),
        FileKind::Definition => {
            drive(&definition::DefinitionTransformer, reader, path, composer, options)
        }
        FileKind::Description => {
            drive(&description::DescriptionTransformer, reader, path, composer, options)
        }
        FileKind::Language => drive(&language::LanguageTransformer, reader, path, composer, options),
        FileKind::Identifier => {
            drive(&identifier::IdentifierTransformer, reader, path, composer, options)
        }
        FileKind::Axiom => drive(&axiom::AxiomTransformer, reader, path, composer, options),
    }
}

fn drive<T: RowTransformer, R: BufRead>(
    transformer: &T,
    reader: R,
    path: &Path,
    composer: &Composer<'_>,
    options: FileOptions,
) -> Result<FileStats, TransformError> {
    let resolver = composer.resolver();
    let mut state: GroupState<T::Group> =
        GroupState::new(T::GROUPED && options.validate_group_order);
    let mut stats = FileStats::default();

    // Line 1 is the header.
    for (idx, line) in reader.lines().enumerate().skip(1) {
        let line_no = idx + 1;
        let line = line.map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = line.trim_end_matches('\r');
        if text.trim().is_empty() {
            continue;
        }
        let row = Row::parse(text, line_no, T::COLUMNS, path)?;
        stats.rows += 1;

        let boundary = if T::GROUPED {
            state
                .observe(row.id())
                .map_err(|ReopenedGroup(key)| TransformError::UnsortedGroup {
                    path: path.to_path_buf(),
                    line: line_no,
                    key,
                })?
        } else {
            Boundary::Start
        };

        // The previous group is closed and complete once a new key starts.
        if boundary == Boundary::Start {
            flush(composer, state.take_pending(), &mut stats)?;
        }

        let stamp = composer
            .stamps()
            .assemble(row.get(ACTIVE), row.get(EFFECTIVE_TIME), row.get(MODULE_ID), resolver)
            .map_err(|err| err.at(path, line_no))?;

        let mut facts = Vec::new();
        if boundary == Boundary::Start {
            let group = transformer
                .open_group(&row, resolver)
                .map_err(|err| err.at(path, line_no))?;
            state.open(group);
        }
        let Some(group) = state.current() else {
            continue;
        };
        if boundary == Boundary::Start {
            facts.extend(
                transformer
                    .group_facts(group, &row)
                    .map_err(|err| err.at(path, line_no))?,
            );
        }
        facts.extend(
            transformer
                .row_facts(group, &row, resolver)
                .map_err(|err| err.at(path, line_no))?,
        );
        state.push(PendingRow {
            line: line_no,
            stamp,
            facts,
        });
    }

    flush(composer, state.take_pending(), &mut stats)?;
    stats.groups = if T::GROUPED { state.groups() } else { stats.rows };
    Ok(stats)
}

/// Compose the rows of a closed group, one session per row.
fn flush(
    composer: &Composer<'_>,
    rows: Vec<PendingRow>,
    stats: &mut FileStats,
) -> Result<(), TransformError> {
    for row in rows {
        let session = composer.open(row.stamp)?;
        stats.sessions += 1;
        debug!(
            line = row.line,
            session = session.id(),
            stamp = %session.stamp().id(),
            facts = row.facts.len(),
            "[rf2:transform] composing row"
        );
        for fact in row.facts {
            trace!(
                line = row.line,
                kind = fact.kind(),
                entity = %fact.entity,
                "[rf2:transform] composing fact"
            );
            session.compose(fact)?;
            stats.facts += 1;
        }
    }
    Ok(())
}

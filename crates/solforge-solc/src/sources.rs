//! Host-side import closure.
//!
//! A `solc` process cannot call back into the host, so every import it would ask for
//! is requested from the resolver up front: sources are scanned, each missing unit is
//! resolved once, resolved contents are scanned in turn, until nothing new appears.

use std::collections::{BTreeMap, BTreeSet};

use solforge_core::compiler::{CompilerInput, Source};
use solforge_core::resolver::{ImportResolution, ImportResolver};

use crate::imports;

/// Compiler input after import resolution.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    /// Original sources plus every dependency the resolver served.
    pub input: CompilerInput,
    /// Imports the resolver could not serve, with its error message.
    pub unresolved: BTreeMap<String, String>,
}

/// Expand `input` with every import reachable from its sources.
///
/// The resolver is called at most once per distinct source unit name.
pub fn resolve_closure(input: &CompilerInput, resolver: &dyn ImportResolver) -> ResolvedInput {
    let mut sources = input.sources.clone();
    let mut unresolved = BTreeMap::new();
    let mut attempted = BTreeSet::new();
    let mut pending: Vec<(String, String)> = sources
        .iter()
        .map(|(name, source)| (name.clone(), source.content.clone()))
        .collect();

    while let Some((importer, content)) = pending.pop() {
        for path in imports::import_paths(&content) {
            let unit = imports::resolve_import(&importer, &path);
            if sources.contains_key(&unit) || !attempted.insert(unit.clone()) {
                continue;
            }

            match resolver.resolve(&unit) {
                ImportResolution::Contents(text) => {
                    sources.insert(
                        unit.clone(),
                        Source {
                            content: text.clone(),
                        },
                    );
                    pending.push((unit, text));
                }
                ImportResolution::Error(message) => {
                    tracing::debug!(import = %unit, %message, "leaving import to the compiler");
                    unresolved.insert(unit, message);
                }
            }
        }
    }

    ResolvedInput {
        input: CompilerInput {
            language: input.language.clone(),
            sources,
            settings: input.settings.clone(),
        },
        unresolved,
    }
}

//! Extraction run: template files in, one SQL script out.
//!
//! Files are processed in the order given and lines top to bottom. Each
//! call-site goes through reference lookup, the optional operator fallback and
//! the record emitter before the next one is looked at.
use crate::config::ExtractorConfig;
use crate::emit::{emit, LookupFailure, Resolution, ResolvedLiteral};
use crate::literal::CallSiteGrammar;
use crate::pattern::ExtractionPattern;
use crate::prompt::ValuePrompt;
use crate::reference::ReferenceIndex;
use crate::resolve::resolve;
use crate::script::OutputScript;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of a run, reported to the operator and optionally as JSON.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub literals_found: usize,
    pub from_reference: usize,
    pub from_operator: usize,
    pub unresolved: usize,
    /// Written script, absent when no literal was found.
    pub output: Option<PathBuf>,
}

impl RunSummary {
    fn record(&mut self, resolution: &Resolution) {
        self.literals_found += 1;
        match resolution {
            Resolution::Reference(_) => self.from_reference += 1,
            Resolution::Operator(_) => self.from_operator += 1,
            Resolution::Unresolved => self.unresolved += 1,
        }
    }
}

/// Process `templates` and write the script to `config.output`.
///
/// Unreadable templates are skipped. A run that finds no literal writes
/// nothing. Failing to load the reference or to write the script is fatal.
/// An empty reference document is treated as no reference at all.
/// A "Processing file" line per template goes to `progress`.
pub fn run_extract(
    config: &ExtractorConfig,
    templates: &[PathBuf],
    prompt: &mut dyn ValuePrompt,
    progress: &mut dyn Write,
) -> Result<RunSummary> {
    let grammar = CallSiteGrammar::new(&config.marker)
        .with_context(|| format!("compile call-site grammar for {}", config.marker))?;
    let reference = config
        .reference
        .as_deref()
        .map(ReferenceIndex::load)
        .transpose()
        .context("load reference document")?
        .filter(|index| {
            if index.is_empty() {
                tracing::warn!("reference document is empty; resolving as if none was given");
            }
            !index.is_empty()
        });

    let extractor = Extractor {
        config,
        grammar: &grammar,
        reference: reference.as_ref(),
    };
    let mut script = OutputScript::default();
    let mut summary = RunSummary::default();

    for path in templates {
        writeln!(progress, "Processing file: {}", path.display()).context("write progress")?;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable template");
                summary.files_skipped += 1;
                continue;
            }
        };
        summary.files_processed += 1;
        extractor.process_template(&text, prompt, &mut script, &mut summary)?;
    }

    if script.is_empty() {
        return Ok(summary);
    }
    script
        .write_atomic(&config.output)
        .context("write output script")?;
    tracing::info!(
        path = %config.output.display(),
        records = script.records(),
        "wrote output script"
    );
    summary.output = Some(config.output.clone());
    Ok(summary)
}

/// Reference lookup for one line; `None` when no reference is in use.
type Lookup = Option<std::result::Result<String, LookupFailure>>;

pub(crate) struct Extractor<'a> {
    pub(crate) config: &'a ExtractorConfig,
    pub(crate) grammar: &'a CallSiteGrammar,
    pub(crate) reference: Option<&'a ReferenceIndex>,
}

impl Extractor<'_> {
    pub(crate) fn process_template(
        &self,
        text: &str,
        prompt: &mut dyn ValuePrompt,
        script: &mut OutputScript,
        summary: &mut RunSummary,
    ) -> Result<()> {
        for raw in text.lines() {
            let line = raw.trim();
            let sites = self.grammar.call_sites(line);
            if sites.is_empty() {
                continue;
            }
            let lookup = self.lookup(line);
            for site in sites {
                tracing::debug!(key = %site.key, column = site.span.start + 1, "found call-site");
                let literal = self.resolve_literal(site.key, &lookup, prompt)?;
                summary.record(&literal.resolution);
                script.push_record(emit(&self.config.schema, self.config.page_id, &literal));
            }
        }
        Ok(())
    }

    fn lookup(&self, line: &str) -> Lookup {
        let index = self.reference?;
        let pattern = match ExtractionPattern::synthesize(self.grammar, line) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(line, error = %err, "cannot build lookup pattern");
                return Some(Err(LookupFailure::Pattern(err.to_string())));
            }
        };
        if pattern.is_generic() {
            tracing::warn!(
                line,
                "call-site has no surrounding text; the first reference line will match"
            );
        }
        tracing::debug!(pattern = pattern.as_str(), "synthesized lookup pattern");
        Some(resolve(&pattern, index).ok_or(LookupFailure::NotFound))
    }

    fn resolve_literal(
        &self,
        key: String,
        lookup: &Lookup,
        prompt: &mut dyn ValuePrompt,
    ) -> Result<ResolvedLiteral> {
        let lookup_failure = match lookup {
            Some(Ok(value)) => {
                return Ok(ResolvedLiteral {
                    key,
                    resolution: Resolution::Reference(value.clone()),
                    lookup_failure: None,
                });
            }
            Some(Err(failure)) => {
                tracing::warn!(key = %key, "no default value found in reference document");
                Some(failure.clone())
            }
            None => None,
        };

        let resolution = if self.config.interactive {
            match prompt.ask(&key)? {
                Some(value) => Resolution::Operator(value),
                None => Resolution::Unresolved,
            }
        } else {
            Resolution::Unresolved
        };
        if !resolution.is_resolved() && lookup_failure.is_none() {
            tracing::warn!(key = %key, "literal recorded without default value");
        }
        Ok(ResolvedLiteral {
            key,
            resolution,
            lookup_failure,
        })
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

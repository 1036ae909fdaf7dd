use crate::error::ReconcileError;
use colorsource_core::{Element, Tag, check_nesting};
use std::iter::Peekable;
use std::slice::Iter;
use tracing::debug;

/// A highlight run taken from a flat start/end pair.
struct Run<'a> {
    start: usize,
    end: usize,
    element: &'a Element,
}

/// Merge structural tags with highlight tags into one properly nested sequence.
///
/// `structural` must be nested (as produced by [`extract`](crate::extract)); `highlight` must be
/// flat start/end pairs in order (as produced by the tokenizer). A highlight run that would
/// straddle a structural boundary is closed at the boundary and reopened after it with a clone
/// of its element.
///
/// At equal offsets structural tags go before a highlight start, and a highlight run ending at a
/// structural offset closes before the structural tag.
#[tracing::instrument(level = "debug", skip_all, fields(structural = structural.len(), highlight = highlight.len()))]
pub fn merge(structural: &[Tag], highlight: &[Tag]) -> Result<Vec<Tag>, ReconcileError> {
    let runs = flat_runs(highlight)?;
    if runs.is_empty() {
        return Ok(structural.to_vec());
    }
    if structural.is_empty() {
        return Ok(highlight.to_vec());
    }

    let mut out = Vec::with_capacity(structural.len() + highlight.len());
    let mut boundaries = structural.iter().peekable();
    let mut splits = 0usize;

    for run in &runs {
        while let Some(tag) = boundaries.next_if(|t| t.offset() <= run.start) {
            out.push(tag.clone());
        }

        out.push(Tag::start(run.start, run.element.clone()));
        while let Some(at) = boundaries.peek().map(|t| t.offset()).filter(|&at| at < run.end) {
            out.push(Tag::end(at));
            emit_boundaries_at(&mut boundaries, at, &mut out);
            out.push(Tag::start(at, run.element.clone()));
            splits += 1;
        }
        out.push(Tag::end(run.end));
    }
    out.extend(boundaries.cloned());

    debug!(splits, tags = out.len(), "merged tag sequences");
    check_nesting(&out)?;
    Ok(out)
}

fn emit_boundaries_at(boundaries: &mut Peekable<Iter<'_, Tag>>, at: usize, out: &mut Vec<Tag>) {
    while let Some(tag) = boundaries.next_if(|t| t.offset() == at) {
        out.push(tag.clone());
    }
}

fn flat_runs(highlight: &[Tag]) -> Result<Vec<Run<'_>>, ReconcileError> {
    let mut runs = Vec::with_capacity(highlight.len() / 2);
    let mut previous_end = 0usize;

    for pair in highlight.chunks(2) {
        let run = match pair {
            [Tag::Start { offset: start, element }, Tag::End { offset: end }]
                if previous_end <= *start && start <= end =>
            {
                Run {
                    start: *start,
                    end: *end,
                    element,
                }
            }
            _ => {
                return Err(ReconcileError::MalformedHighlight {
                    offset: pair[0].offset(),
                });
            }
        };
        previous_end = run.end;
        runs.push(run);
    }
    Ok(runs)
}

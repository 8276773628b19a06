//! Snyk API model types and resource services.

mod group;
mod organization;
mod project;
mod reporting;

pub use group::*;
pub use organization::*;
pub use project::*;
pub use reporting::*;

use std::borrow::Cow;

use crate::error::{Precondition, Result};

/// Zero counts as unset for optional paging parameters.
fn unset(value: &Option<u32>) -> bool {
    value.map_or(true, |v| v == 0)
}

/// Encode an identifier as exactly one path segment.
///
/// `.` and `..` are resolved as dot segments by URL joining, even when
/// percent-encoded, so they are rejected instead of sent.
fn path_segment(id: &str) -> Result<Cow<'_, str>> {
    if id == "." || id == ".." {
        return Err(Precondition::InvalidArgument.into());
    }
    Ok(urlencoding::encode(id))
}

//! Parallel layout of independent documents.

use rayon::prelude::*;

use crate::document::{Document, LayoutPass};

/// Lay out every document on the rayon pool. Reports keep input order.
pub fn layout_all(documents: &mut [Document]) -> Vec<LayoutPass> {
    documents.par_iter_mut().map(Document::layout).collect()
}

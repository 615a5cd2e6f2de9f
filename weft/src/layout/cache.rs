// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use super::LayoutResult;
use crate::options::Constraints;
use crate::style::Brush;

/// Identifies the inputs a [`LayoutResult`] was computed from.
///
/// Text, [`TruncationSpec`](crate::TruncationSpec) and options are compared by revision,
/// constraints by value, so setting constraints equal to the current ones does not invalidate
/// a layout.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutKey {
    pub(crate) text: u64,
    pub(crate) constraints: Constraints,
    pub(crate) truncation: u64,
    pub(crate) options: u64,
}

impl LayoutKey {
    /// The constraints the layout was computed for.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }
}

/// Holds the most recent layout and the key it was computed for.
#[derive(Debug)]
pub(crate) struct LayoutCache<B: Brush> {
    entry: Option<(LayoutKey, Arc<LayoutResult<B>>)>,
}

impl<B: Brush> Default for LayoutCache<B> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<B: Brush> LayoutCache<B> {
    /// Returns the cached layout if it was computed for `key`.
    pub(crate) fn get(&self, key: &LayoutKey) -> Option<&Arc<LayoutResult<B>>> {
        match &self.entry {
            Some((cached, result)) if cached == key => Some(result),
            _ => None,
        }
    }

    pub(crate) fn is_fresh(&self, key: &LayoutKey) -> bool {
        self.get(key).is_some()
    }

    /// Replace the cached layout.
    pub(crate) fn insert(&mut self, key: LayoutKey, result: Arc<LayoutResult<B>>) {
        self.entry = Some((key, result));
    }
}

// Copyright 2025 the Weft Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal space left over by exclusion paths.

use peniko::kurbo::{flatten, BezPath, PathEl, Point, Shape};
use smallvec::SmallVec;

/// Flattening tolerance for curved exclusion paths, in logical pixels.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// A horizontal span of a line that text may occupy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
}

impl Segment {
    /// Width of the span.
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }
}

/// Exclusion paths flattened to polygon edges.
#[derive(Clone, Debug, Default)]
pub(crate) struct ExclusionMap {
    polygons: Vec<Vec<(Point, Point)>>,
}

impl ExclusionMap {
    pub(crate) fn new(paths: &[BezPath]) -> Self {
        let polygons = paths
            .iter()
            .filter(|path| {
                let finite = path.bounding_box().is_finite();
                if !finite {
                    tracing::debug!("ignoring exclusion path with non-finite coordinates");
                }
                finite
            })
            .map(flatten_edges)
            .filter(|edges| !edges.is_empty())
            .collect();
        Self { polygons }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// The parts of `left..right` not covered by any exclusion within the band `y0..y1`.
    ///
    /// An exclusion only counts if it overlaps the open band, so a path that merely touches
    /// the top or bottom edge of a line leaves it alone.
    pub(crate) fn segments(
        &self,
        y0: f64,
        y1: f64,
        left: f64,
        right: f64,
    ) -> SmallVec<[Segment; 1]> {
        let mut blocked: SmallVec<[(f64, f64); 4]> = self
            .polygons
            .iter()
            .filter_map(|edges| band_extent(edges, y0, y1))
            .collect();
        blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut segments = SmallVec::new();
        let mut x = left;
        for (start, end) in blocked {
            if start > x {
                segments.push(Segment {
                    x0: x,
                    x1: start.min(right),
                });
            }
            x = x.max(end);
            if x >= right {
                break;
            }
        }
        if x < right {
            segments.push(Segment { x0: x, x1: right });
        }
        segments.retain(|segment: &mut Segment| segment.width() > 0.0);
        segments
    }
}

fn flatten_edges(path: &BezPath) -> Vec<(Point, Point)> {
    let mut edges = Vec::new();
    let mut start = None;
    let mut current = Point::ZERO;
    flatten(path, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            // Subpaths are filled, so an open one is implicitly closed.
            if let Some(s) = start.replace(p) {
                if s != current {
                    edges.push((current, s));
                }
            }
            current = p;
        }
        PathEl::LineTo(p) => {
            edges.push((current, p));
            current = p;
        }
        PathEl::ClosePath => {
            if let Some(s) = start {
                if s != current {
                    edges.push((current, s));
                }
                current = s;
            }
        }
        // Flattening only emits lines.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if let Some(s) = start {
        if s != current {
            edges.push((current, s));
        }
    }
    edges
}

/// Horizontal extent of the polygon within the open band `y0..y1`.
fn band_extent(edges: &[(Point, Point)], y0: f64, y1: f64) -> Option<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;
    for &(p, q) in edges {
        let (lo, hi) = if p.y <= q.y { (p, q) } else { (q, p) };
        let top = lo.y.max(y0);
        let bottom = hi.y.min(y1);
        if top >= bottom && !(lo.y == hi.y && lo.y > y0 && lo.y < y1) {
            continue;
        }
        let x_at = |y: f64| {
            if hi.y == lo.y {
                lo.x
            } else {
                lo.x + (hi.x - lo.x) * (y - lo.y) / (hi.y - lo.y)
            }
        };
        let (xa, xb) = if lo.y == hi.y {
            (lo.x, hi.x)
        } else {
            (x_at(top), x_at(bottom))
        };
        let (min, max) = (xa.min(xb), xa.max(xb));
        extent = Some(match extent {
            Some((x0, x1)) => (x0.min(min), x1.max(max)),
            None => (min, max),
        });
    }
    extent
}

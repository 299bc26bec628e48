// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

/// Edge-inclusive containment: a point on any edge of `rect` is inside it.
///
/// `kurbo::Rect::contains` treats the far edges as outside, which would make shared strip
/// boundaries belong to only one side before the tie-break gets a say.
pub(crate) fn contains_inclusive(rect: Rect, point: Point) -> bool {
    rect.x0 <= point.x && point.x <= rect.x1 && rect.y0 <= point.y && point.y <= rect.y1
}

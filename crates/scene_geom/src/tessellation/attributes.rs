//! Named per-vertex attributes and vertex buffer layout
//!
//! Commands carry a sparse mapping from attribute name to a scalar or
//! fixed-length numeric vector (color, thickness, custom data). Tessellation
//! computes the union of all names and widths in a stats pre-pass, assigns
//! contiguous float offsets, and interpolates values between successive
//! commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sparse attribute set: name to scalar or fixed-length vector.
///
/// `BTreeMap` keeps iteration order deterministic, which fixes the attribute
/// offsets assigned by [`AttributeLayout`].
pub type AttributeMap = BTreeMap<String, Vec<f32>>;

/// Reserved attribute name for the 2D vertex position (2 floats)
pub const ATTR_VERTEX: &str = "vertex";

/// Reserved attribute name for the antialiasing plane coefficients (3 floats)
pub const ATTR_PLANE: &str = "plane";

/// Merge `from` into `into`, overriding existing names
pub fn merge_attributes(into: &mut AttributeMap, from: &AttributeMap) {
    for (name, values) in from {
        into.insert(name.clone(), values.clone());
    }
}

/// Vertex buffer layout: contiguous float offsets per attribute.
///
/// `vertex` (2 floats) always comes first, then `plane` (3 floats), then the
/// caller-declared attributes in name order. The stride is the sum of all
/// attribute sizes; it is fixed once per tessellation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeLayout {
    offsets: BTreeMap<String, usize>,
    sizes: BTreeMap<String, usize>,
    stride: usize,
}

impl AttributeLayout {
    /// Build a layout from the caller attributes' maximum widths.
    ///
    /// Reserved names passed in `custom_sizes` are ignored; their sizes are
    /// fixed by the engine.
    pub fn new(custom_sizes: &BTreeMap<String, usize>) -> Self {
        let mut offsets = BTreeMap::new();
        let mut sizes = BTreeMap::new();
        let mut stride = 0;

        let mut place = |name: &str, size: usize, stride: &mut usize| {
            offsets.insert(name.to_string(), *stride);
            sizes.insert(name.to_string(), size);
            *stride += size;
        };

        place(ATTR_VERTEX, 2, &mut stride);
        place(ATTR_PLANE, 3, &mut stride);
        for (name, &size) in custom_sizes {
            if name == ATTR_VERTEX || name == ATTR_PLANE {
                continue;
            }
            place(name, size, &mut stride);
        }

        Self {
            offsets,
            sizes,
            stride,
        }
    }

    /// Vertex stride in floats
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Float offset of an attribute, if present
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.offsets.get(name).copied()
    }

    /// Width in floats of an attribute, if present
    pub fn size_of(&self, name: &str) -> Option<usize> {
        self.sizes.get(name).copied()
    }

    /// All attribute offsets by name
    pub fn offsets(&self) -> &BTreeMap<String, usize> {
        &self.offsets
    }

    /// Iterate the caller-declared attributes (everything except the
    /// reserved `vertex` and `plane` slots)
    pub fn custom_attributes(&self) -> impl Iterator<Item = (&str, usize, usize)> {
        self.offsets.iter().filter_map(move |(name, &offset)| {
            if name == ATTR_VERTEX || name == ATTR_PLANE {
                None
            } else {
                Some((name.as_str(), offset, self.sizes[name]))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserved_slots_first() {
        let mut custom = BTreeMap::new();
        custom.insert("color".to_string(), 4);
        custom.insert("thickness".to_string(), 1);
        let layout = AttributeLayout::new(&custom);

        assert_eq!(layout.offset_of(ATTR_VERTEX), Some(0));
        assert_eq!(layout.offset_of(ATTR_PLANE), Some(2));
        // Customs follow in name order: color, then thickness
        assert_eq!(layout.offset_of("color"), Some(5));
        assert_eq!(layout.offset_of("thickness"), Some(9));
        assert_eq!(layout.stride(), 10);
    }

    #[test]
    fn test_layout_ignores_reserved_in_custom() {
        let mut custom = BTreeMap::new();
        custom.insert("vertex".to_string(), 7);
        let layout = AttributeLayout::new(&custom);
        assert_eq!(layout.size_of(ATTR_VERTEX), Some(2));
        assert_eq!(layout.stride(), 5);
    }

    #[test]
    fn test_merge_overrides() {
        let mut a = AttributeMap::new();
        a.insert("color".to_string(), vec![1.0, 0.0, 0.0]);
        let mut b = AttributeMap::new();
        b.insert("color".to_string(), vec![0.0, 1.0, 0.0]);
        b.insert("thickness".to_string(), vec![0.5]);
        merge_attributes(&mut a, &b);
        assert_eq!(a["color"], vec![0.0, 1.0, 0.0]);
        assert_eq!(a["thickness"], vec![0.5]);
    }
}

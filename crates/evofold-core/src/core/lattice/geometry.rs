use super::shape::LatticeShape;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// A lattice site. Square lattices keep `z == 0`.
pub type Site = Point3<i32>;

/// A unit step between two lattice-adjacent sites.
pub type Offset = Vector3<i32>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("Unsupported lattice dimensionality {0}: only square (2) and cubic (3) lattices exist")]
    UnsupportedDimensionality(usize),
}

/// Adjacency rules of a hypercubic lattice in two or three dimensions.
///
/// The geometry is stateless: it only knows its dimensionality and the fixed,
/// ordered set of unit offsets (`+x, -x, +y, -y[, +z, -z]`). The order of the
/// offsets determines the order in which walks are explored during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeGeometry {
    dimensionality: usize,
    offsets: Vec<Offset>,
}

impl LatticeGeometry {
    pub fn new(dimensionality: usize) -> Result<Self, LatticeError> {
        if !(2..=3).contains(&dimensionality) {
            return Err(LatticeError::UnsupportedDimensionality(dimensionality));
        }
        Ok(Self::with_axes(dimensionality))
    }

    pub fn square() -> Self {
        Self::with_axes(2)
    }

    pub fn cubic() -> Self {
        Self::with_axes(3)
    }

    fn with_axes(dimensionality: usize) -> Self {
        let offsets = (0..dimensionality)
            .flat_map(|axis| {
                [1, -1].into_iter().map(move |step| {
                    let mut offset = Offset::zeros();
                    offset[axis] = step;
                    offset
                })
            })
            .collect();

        Self {
            dimensionality,
            offsets,
        }
    }

    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    #[inline]
    pub fn neighbor_offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn neighbors<'a>(&'a self, site: &'a Site) -> impl Iterator<Item = Site> + 'a {
        self.offsets.iter().map(move |offset| site + offset)
    }

    /// Two sites are in contact iff they differ by exactly one unit step
    /// along an axis of this lattice.
    pub fn are_adjacent(&self, a: &Site, b: &Site) -> bool {
        let delta = b - a;
        let off_lattice = delta.iter().skip(self.dimensionality).any(|&c| c != 0);
        !off_lattice && delta.iter().map(|c| c.abs()).sum::<i32>() == 1
    }

    /// The compact box a chain of `length` monomers fills on this lattice.
    pub fn shape_for(&self, length: usize) -> Option<LatticeShape> {
        LatticeShape::compact(length, self.dimensionality)
    }
}

use super::geometry::Site;
use std::fmt;

const AXIS_PERMUTATIONS_2D: [[usize; 3]; 2] = [[0, 1, 2], [1, 0, 2]];
const AXIS_PERMUTATIONS_3D: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// The box a compact chain fills completely.
///
/// Sides are stored in non-increasing order and every side is at least two
/// sites long, so a shape always admits walks that fold back on themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LatticeShape {
    sides: Vec<usize>,
}

impl LatticeShape {
    /// The most balanced box of `dimensionality` sides whose volume is `length`.
    ///
    /// Among all factorizations of `length` into sides `>= 2`, the one with the
    /// lexicographically smallest non-increasing side list wins (smallest
    /// longest side first). Returns `None` when no such box exists, i.e. the
    /// length is not compact on this lattice.
    pub fn compact(length: usize, dimensionality: usize) -> Option<Self> {
        if dimensionality == 0 {
            return None;
        }
        let mut candidates = Vec::new();
        collect_factorizations(length, dimensionality, length, &mut Vec::new(), &mut candidates);
        candidates.into_iter().min().map(|sides| Self { sides })
    }

    pub fn sides(&self) -> &[usize] {
        &self.sides
    }

    #[inline]
    pub fn dimensionality(&self) -> usize {
        self.sides.len()
    }

    pub fn volume(&self) -> usize {
        self.sides.iter().product()
    }

    pub fn contains(&self, site: &Site) -> bool {
        (0..3).all(|axis| {
            let coordinate = site[axis];
            let side = self.sides.get(axis).copied().unwrap_or(1) as i32;
            (0..side).contains(&coordinate)
        })
    }

    /// Linear index of `site` with the first axis varying fastest.
    pub fn index_of(&self, site: &Site) -> Option<usize> {
        if !self.contains(site) {
            return None;
        }
        let mut index = 0;
        let mut stride = 1;
        for (axis, &side) in self.sides.iter().enumerate() {
            index += site[axis] as usize * stride;
            stride *= side;
        }
        Some(index)
    }

    /// Every site of the box, in linear-index order.
    pub fn sites(&self) -> Vec<Site> {
        (0..self.volume())
            .map(|mut index| {
                let mut site = Site::origin();
                for (axis, &side) in self.sides.iter().enumerate() {
                    site[axis] = (index % side) as i32;
                    index /= side;
                }
                site
            })
            .collect()
    }

    /// The symmetry group of the box: all axis reflections combined with the
    /// permutations that only exchange axes of equal length.
    pub fn symmetries(&self) -> Vec<Symmetry> {
        let dimensionality = self.dimensionality();
        let permutations: &[[usize; 3]] = if dimensionality == 2 {
            &AXIS_PERMUTATIONS_2D
        } else {
            &AXIS_PERMUTATIONS_3D
        };

        let mut symmetries = Vec::new();
        for permutation in permutations {
            let preserves_box = (0..dimensionality)
                .all(|axis| self.sides[axis] == self.sides[permutation[axis]]);
            if !preserves_box {
                continue;
            }
            for mask in 0..(1u8 << dimensionality) {
                symmetries.push(Symmetry {
                    permutation: *permutation,
                    reflections: mask,
                });
            }
        }
        symmetries
    }

    /// One site per symmetry orbit: the site with the smallest linear index
    /// among all of its images.
    pub fn orbit_representatives(&self) -> Vec<Site> {
        let symmetries = self.symmetries();
        self.sites()
            .into_iter()
            .filter(|site| {
                let Some(own_index) = self.index_of(site) else {
                    return false;
                };
                symmetries.iter().all(|symmetry| {
                    self.index_of(&symmetry.apply(self, site))
                        .is_some_and(|image| image >= own_index)
                })
            })
            .collect()
    }
}

impl fmt::Display for LatticeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<String> = self.sides.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", sides.join("x"))
    }
}

/// An axis permutation followed by reflections, mapping a box onto itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symmetry {
    permutation: [usize; 3],
    reflections: u8,
}

impl Symmetry {
    pub fn apply(&self, shape: &LatticeShape, site: &Site) -> Site {
        let mut image = Site::origin();
        for (axis, &side) in shape.sides().iter().enumerate() {
            let coordinate = site[self.permutation[axis]];
            image[axis] = if self.reflections & (1 << axis) != 0 {
                side as i32 - 1 - coordinate
            } else {
                coordinate
            };
        }
        image
    }
}

fn collect_factorizations(
    remaining: usize,
    parts: usize,
    max_side: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if parts == 1 {
        if (2..=max_side).contains(&remaining) {
            let mut sides = current.clone();
            sides.push(remaining);
            out.push(sides);
        }
        return;
    }
    for side in (2..=max_side.min(remaining)).rev() {
        if remaining % side == 0 {
            current.push(side);
            collect_factorizations(remaining / side, parts - 1, side, current, out);
            current.pop();
        }
    }
}

use crate::core::lattice::geometry::{LatticeGeometry, Offset, Site};
use crate::core::lattice::shape::LatticeShape;
use crate::core::models::conformation::{Conformation, Contact};
use crate::core::models::ids::StructureId;
use std::collections::BTreeMap;

pub(crate) struct Enumeration {
    /// Unique conformations, sorted by contact signature.
    pub conformations: Vec<Conformation>,
    /// Complete walks visited, duplicates included.
    pub walks: usize,
}

/// Enumerates every self-avoiding walk that fills `shape`, keeping one walk per
/// distinct contact signature.
///
/// Walks only start from one site per symmetry orbit of the box: any other
/// walk is the image of one of those under a box symmetry, and symmetries
/// preserve contacts, so no signature is lost.
pub(crate) fn enumerate_compact(geometry: &LatticeGeometry, shape: &LatticeShape) -> Enumeration {
    let mut walker = Walker {
        offsets: geometry.neighbor_offsets(),
        shape,
        length: shape.volume(),
        path: Vec::with_capacity(shape.volume()),
        occupant: vec![None; shape.volume()],
        unique: BTreeMap::new(),
        walks: 0,
    };
    for start in shape.orbit_representatives() {
        walker.start_from(start);
    }

    let walks = walker.walks;
    let conformations = walker
        .unique
        .into_iter()
        .enumerate()
        .map(|(index, (contacts, sites))| {
            Conformation::embedded(StructureId(index), sites, contacts)
        })
        .collect();

    Enumeration {
        conformations,
        walks,
    }
}

struct Walker<'a> {
    offsets: &'a [Offset],
    shape: &'a LatticeShape,
    length: usize,
    path: Vec<Site>,
    occupant: Vec<Option<usize>>,
    unique: BTreeMap<Vec<Contact>, Vec<Site>>,
    walks: usize,
}

impl Walker<'_> {
    fn start_from(&mut self, start: Site) {
        let Some(index) = self.shape.index_of(&start) else {
            return;
        };
        self.occupant[index] = Some(0);
        self.path.push(start);
        self.extend();
        self.path.pop();
        self.occupant[index] = None;
    }

    fn extend(&mut self) {
        if self.path.len() == self.length {
            self.record();
            return;
        }

        let offsets = self.offsets;
        let tip = self.path[self.path.len() - 1];
        for offset in offsets {
            let next = tip + offset;
            let Some(index) = self.shape.index_of(&next) else {
                continue;
            };
            if self.occupant[index].is_some() {
                continue;
            }
            self.occupant[index] = Some(self.path.len());
            self.path.push(next);
            self.extend();
            self.path.pop();
            self.occupant[index] = None;
        }
    }

    fn record(&mut self) {
        self.walks += 1;

        let mut contacts = Vec::new();
        for (position, site) in self.path.iter().enumerate() {
            for offset in self.offsets {
                let Some(index) = self.shape.index_of(&(site + offset)) else {
                    continue;
                };
                if let Some(other) = self.occupant[index] {
                    if other > position + 1 {
                        contacts.push(Contact::new(position, other));
                    }
                }
            }
        }
        contacts.sort_unstable();

        // First walk found for a signature is kept as its embedding.
        self.unique
            .entry(contacts)
            .or_insert_with(|| self.path.clone());
    }
}

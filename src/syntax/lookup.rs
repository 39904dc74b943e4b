//! Position queries over a parsed tree
//!
//! Used by consumers that map a cursor position or an edited range back to
//! the nodes it touches.

use crate::base::{Loc, Position};

use super::ast::{Family, Person, RelList, Relation, Root};

/// A borrowed node of any level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Family(&'a Family),
    Relation(&'a Relation),
    RelList(&'a RelList),
    Person(&'a Person),
}

impl NodeRef<'_> {
    pub fn loc(&self) -> Loc {
        match self {
            Self::Family(node) => node.loc,
            Self::Relation(node) => node.loc,
            Self::RelList(node) => node.loc,
            Self::Person(node) => node.loc,
        }
    }
}

/// Find the innermost node whose span contains `position`.
pub fn node_at(root: &Root, position: Position) -> Option<NodeRef<'_>> {
    let family = root.families.iter().find(|f| f.loc.contains(position))?;

    let Some(relation) = family.relations.iter().find(|r| r.loc.contains(position)) else {
        return Some(NodeRef::Family(family));
    };

    let mut lists = std::iter::once(&relation.sources).chain(relation.targets.as_ref());
    let Some(list) = lists.find(|l| l.loc.contains(position)) else {
        return Some(NodeRef::Relation(relation));
    };

    match list.persons.iter().find(|p| p.loc.contains(position)) {
        Some(person) => Some(NodeRef::Person(person)),
        None => Some(NodeRef::RelList(list)),
    }
}

/// Every node overlapping `loc`, outer nodes before the nodes they contain.
pub fn nodes_overlapping(root: &Root, loc: Loc) -> Vec<NodeRef<'_>> {
    let mut found = Vec::new();

    for family in root.families.iter().filter(|f| f.loc.overlaps(&loc)) {
        found.push(NodeRef::Family(family));

        for relation in family.relations.iter().filter(|r| r.loc.overlaps(&loc)) {
            found.push(NodeRef::Relation(relation));

            let lists = std::iter::once(&relation.sources).chain(relation.targets.as_ref());
            for list in lists.filter(|l| l.loc.overlaps(&loc)) {
                found.push(NodeRef::RelList(list));
                found.extend(
                    list.persons
                        .iter()
                        .filter(|p| p.loc.overlaps(&loc))
                        .map(NodeRef::Person),
                );
            }
        }
    }

    found
}

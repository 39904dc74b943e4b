//! Syntax tree for the family notation
//!
//! Nodes own their children top-down. Tokens are referenced by [`TokenId`]
//! into the token buffer of the [`Parse`](crate::parser::Parse) that produced
//! the tree, and back-links from a child to its owner are plain indices.

use crate::base::Loc;
use crate::parser::TokenId;

// ============================================================================
// IDS
// ============================================================================

/// Index of a family in [`Root::families`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FamilyId(pub usize);

/// Index of a relation: its family, then its position in [`Family::relations`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelationId {
    pub family: FamilyId,
    pub relation: usize,
}

/// Which side of the arrow a person list is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    #[default]
    Sources,
    Targets,
}

// ============================================================================
// NODES
// ============================================================================

/// The whole document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Root {
    pub loc: Loc,
    pub families: Vec<Family>,
    /// Comments standing outside of any family
    pub comments: Vec<TokenId>,
}

impl Root {
    /// Take ownership of a family and point its relations back at it.
    pub fn push_family(&mut self, mut family: Family) -> FamilyId {
        let id = FamilyId(self.families.len());
        family.attach(id);
        self.families.push(family);
        id
    }

    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(id.0)
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.family(id.family)?.relations.get(id.relation)
    }

    /// The family owning `relation`
    pub fn family_of(&self, relation: &Relation) -> Option<&Family> {
        self.family(relation.family)
    }

    /// The relation owning `person`
    pub fn relation_of(&self, person: &Person) -> Option<&Relation> {
        self.relation(person.relation)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.families.iter().flat_map(|family| family.relations.iter())
    }

    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.relations().flat_map(Relation::persons)
    }
}

/// A named group of relations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Family {
    pub loc: Loc,
    pub name: Option<TokenId>,
    pub aliases: Vec<TokenId>,
    pub comments: Vec<TokenId>,
    pub relations: Vec<Relation>,
}

impl Family {
    /// Stamp `id` on every relation and person below this family.
    pub(crate) fn attach(&mut self, id: FamilyId) {
        for (index, relation) in self.relations.iter_mut().enumerate() {
            relation.family = id;
            let owner = RelationId {
                family: id,
                relation: index,
            };
            for person in relation.persons_mut() {
                person.relation = owner;
            }
        }
    }
}

/// One line of persons, optionally connected by an arrow to more persons
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relation {
    pub loc: Loc,
    pub sources: RelList,
    /// `None` when nothing followed the arrow, or there was no arrow
    pub targets: Option<RelList>,
    pub arrow: Option<TokenId>,
    pub label: Option<TokenId>,
    pub comments: Vec<TokenId>,
    /// The arrow is `=`: sources are parents, targets are their children
    pub is_family_def: bool,
    pub family: FamilyId,
}

impl Relation {
    pub fn list(&self, side: Side) -> Option<&RelList> {
        match side {
            Side::Sources => Some(&self.sources),
            Side::Targets => self.targets.as_ref(),
        }
    }

    /// Sources persons, then targets persons
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.sources
            .persons
            .iter()
            .chain(self.targets.iter().flat_map(|list| list.persons.iter()))
    }

    /// Drop an empty target list and derive the per-person fields.
    ///
    /// `is_family_def` must be set before.
    pub(crate) fn seal(&mut self) {
        if self.targets.as_ref().is_some_and(RelList::is_empty) {
            self.targets = None;
        }

        self.sources.seal(Side::Sources);

        if let Some(targets) = &mut self.targets {
            targets.seal(Side::Targets);
            if self.is_family_def {
                for person in &mut targets.persons {
                    person.is_child = true;
                }
            }
        }
    }

    pub(crate) fn persons_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.sources
            .persons
            .iter_mut()
            .chain(self.targets.iter_mut().flat_map(|list| list.persons.iter_mut()))
    }
}

/// Persons on one side of a relation and the tokens between them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RelList {
    /// First person's start to last person's end
    pub loc: Loc,
    pub persons: Vec<Person>,
    /// Words and punctuation between persons
    pub separators: Vec<TokenId>,
}

impl RelList {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty() && self.separators.is_empty()
    }

    /// Stamp side and index on every person and span the list over them.
    pub(crate) fn seal(&mut self, side: Side) {
        for (index, person) in self.persons.iter_mut().enumerate() {
            person.side = side;
            person.index = index;
        }

        if let (Some(first), Some(last)) = (self.persons.first(), self.persons.last()) {
            self.loc = Loc::new(first.loc.start, last.loc.end);
        }
    }
}

/// An entry of a person list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub loc: Loc,
    /// `?` marker standing for a person whose name is not known
    pub unknown: Option<TokenId>,
    pub num: Option<TokenId>,
    pub name: Option<TokenId>,
    pub surname: Option<TokenId>,
    pub aliases: Vec<TokenId>,
    pub comments: Vec<TokenId>,
    pub side: Side,
    /// Position within its list
    pub index: usize,
    /// Target of a family definition
    pub is_child: bool,
    pub relation: RelationId,
}

impl Person {
    pub fn is_unknown(&self) -> bool {
        self.unknown.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: usize) -> Person {
        Person {
            name: Some(TokenId(name)),
            ..Person::default()
        }
    }

    #[test]
    fn test_attach_sets_back_links() {
        let relation = Relation {
            sources: RelList {
                persons: vec![person(0), person(2)],
                ..RelList::default()
            },
            targets: Some(RelList {
                persons: vec![person(4)],
                ..RelList::default()
            }),
            ..Relation::default()
        };
        let family = Family {
            relations: vec![Relation::default(), relation],
            ..Family::default()
        };

        let mut root = Root::default();
        root.push_family(Family::default());
        let id = root.push_family(family);

        assert_eq!(id, FamilyId(1));
        let relation = &root.families[1].relations[1];
        assert_eq!(relation.family, id);
        assert!(relation.persons().all(|p| p.relation == RelationId { family: id, relation: 1 }));
        assert!(root.family_of(relation).is_some_and(|f| f.relations.len() == 2));

        let last = relation.persons().last();
        assert!(last.and_then(|p| root.relation_of(p)).is_some_and(|r| r.targets.is_some()));
    }

    #[test]
    fn test_persons_iterates_sources_then_targets() {
        let relation = Relation {
            sources: RelList {
                persons: vec![person(0)],
                ..RelList::default()
            },
            targets: Some(RelList {
                persons: vec![person(1), person(2)],
                ..RelList::default()
            }),
            ..Relation::default()
        };

        let names: Vec<_> = relation.persons().filter_map(|p| p.name).collect();
        assert_eq!(names, vec![TokenId(0), TokenId(1), TokenId(2)]);
        assert!(relation.list(Side::Targets).is_some());
    }

    #[test]
    fn test_seal_stamps_index_and_span() {
        let mut list = RelList {
            persons: vec![
                Person {
                    loc: Loc::from_coords(0, 0, 0, 3),
                    ..Person::default()
                },
                Person {
                    loc: Loc::from_coords(0, 6, 0, 9),
                    ..Person::default()
                },
            ],
            ..RelList::default()
        };

        list.seal(Side::Targets);

        assert_eq!(list.loc, Loc::from_coords(0, 0, 0, 9));
        assert_eq!(list.persons[1].index, 1);
        assert!(list.persons.iter().all(|p| p.side == Side::Targets));
    }

    #[test]
    fn test_out_of_range_ids_resolve_to_none() {
        let root = Root::default();
        assert!(root.family(FamilyId(3)).is_none());
        assert!(root.relation(RelationId::default()).is_none());
    }
}

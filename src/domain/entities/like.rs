//! Like-related entities: likeable kinds, their storage descriptors and like state.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The kinds of rows a user can like.
///
/// The set is closed: an unknown kind is rejected when text is parsed into
/// this type, before any store access happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Novel,
    Chapter,
}

/// Storage layout shared by every likeable kind.
///
/// One generic toggle implementation runs against any pair of
/// (entity table with a `likes_count` column, relation table keyed by
/// `(foreign_key, user_id)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeTarget {
    pub entity_table: &'static str,
    pub relation_table: &'static str,
    pub foreign_key: &'static str,
}

const NOVEL_TARGET: LikeTarget = LikeTarget {
    entity_table: "novels",
    relation_table: "novel_likes",
    foreign_key: "novel_id",
};

const CHAPTER_TARGET: LikeTarget = LikeTarget {
    entity_table: "chapters",
    relation_table: "chapter_likes",
    foreign_key: "chapter_id",
};

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Novel, EntityKind::Chapter];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Novel => "novel",
            EntityKind::Chapter => "chapter",
        }
    }

    /// Tables and key column backing this kind.
    pub fn target(&self) -> LikeTarget {
        match self {
            EntityKind::Novel => NOVEL_TARGET,
            EntityKind::Chapter => CHAPTER_TARGET,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind '{0}', expected 'novel' or 'chapter'")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "novel" | "novels" => Ok(EntityKind::Novel),
            "chapter" | "chapters" => Ok(EntityKind::Chapter),
            _ => Err(UnknownEntityKind(s.to_string())),
        }
    }
}

/// A like state as committed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub likes_count: i32,
    pub is_liked: bool,
}

impl LikeState {
    pub fn new(likes_count: i32, is_liked: bool) -> Self {
        Self {
            likes_count,
            is_liked,
        }
    }
}

/// An entity whose stored counter disagrees with its relation rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDrift {
    pub kind: EntityKind,
    pub entity_id: i64,
    pub stored: i32,
    pub actual: i64,
}

impl CounterDrift {
    pub fn delta(&self) -> i64 {
        self.actual - i64::from(self.stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_kind() {
        assert_eq!("novel".parse::<EntityKind>(), Ok(EntityKind::Novel));
        assert_eq!(" Chapter ".parse::<EntityKind>(), Ok(EntityKind::Chapter));
        assert_eq!("novels".parse::<EntityKind>(), Ok(EntityKind::Novel));
        assert!("comment".parse::<EntityKind>().is_err());
        assert!("".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_targets_are_distinct() {
        let novel = EntityKind::Novel.target();
        let chapter = EntityKind::Chapter.target();

        assert_eq!(novel.entity_table, "novels");
        assert_eq!(novel.relation_table, "novel_likes");
        assert_eq!(novel.foreign_key, "novel_id");
        assert_eq!(chapter.entity_table, "chapters");
        assert_eq!(chapter.relation_table, "chapter_likes");
        assert_eq!(chapter.foreign_key, "chapter_id");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_counter_drift_delta() {
        let drift = CounterDrift {
            kind: EntityKind::Novel,
            entity_id: 1,
            stored: 5,
            actual: 3,
        };
        assert_eq!(drift.delta(), -2);
    }
}

//! Runtime puzzle and catalog types, plus the built-in fallback catalog.

use tracing::warn;

use crate::dao::models::{CastMemberEntity, PuzzleEntity};

/// Minimum number of billed cast members a puzzle must carry to be playable.
pub const MIN_CAST: usize = 4;

/// One billed cast member shown on the guess grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    /// Actor display name.
    pub name: String,
    /// URL of the actor's headshot.
    pub image: String,
}

/// One day's movie puzzle. Immutable once loaded into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Calendar date string (`YYYY-MM-DD`); unique per catalog and used as
    /// both dictionary key and sort key.
    pub id: String,
    /// Canonical answer title, compared case-insensitively against guesses.
    pub title: String,
    /// Poster URL revealed once the puzzle is over.
    pub poster: String,
    /// Billed cast in display order, at least [`MIN_CAST`] entries.
    pub cast: Vec<CastMember>,
    /// Clue 4: director name.
    pub director: String,
    /// Clue 2: release year as a display string.
    pub release_year: String,
    /// Clue 1 (first half): formatted box-office figure.
    pub box_office: String,
    /// Clue 1 (second half): lead production company.
    pub production_company: String,
    /// Clue 3: up to three genre names.
    pub genres: Vec<String>,
}

/// Ordered set of daily puzzles, newest first, with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    puzzles: Vec<Puzzle>,
}

impl Catalog {
    /// Build a catalog from loaded puzzles, enforcing the catalog invariants:
    /// ids sorted descending (newest first), duplicates removed (first
    /// occurrence wins), and puzzles with fewer than [`MIN_CAST`] billed cast
    /// entries skipped. Skips are logged; they indicate a seeding defect.
    pub fn new(mut puzzles: Vec<Puzzle>) -> Self {
        puzzles.sort_by(|a, b| b.id.cmp(&a.id));
        puzzles.dedup_by(|next, kept| {
            if next.id == kept.id {
                warn!(id = %next.id, "dropping duplicate puzzle id from catalog");
                true
            } else {
                false
            }
        });
        puzzles.retain(|puzzle| {
            if puzzle.cast.len() < MIN_CAST {
                warn!(
                    id = %puzzle.id,
                    cast = puzzle.cast.len(),
                    "dropping puzzle with too few cast entries from catalog"
                );
                false
            } else {
                true
            }
        });

        Self { puzzles }
    }

    /// All puzzles, newest first.
    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    /// The most recent puzzle, if the catalog is non-empty.
    pub fn newest(&self) -> Option<&Puzzle> {
        self.puzzles.first()
    }

    /// Look a puzzle up by its date id.
    pub fn get(&self, id: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|puzzle| puzzle.id == id)
    }

    /// Number of puzzles in the catalog.
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// True when the catalog holds no puzzles.
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

impl From<CastMemberEntity> for CastMember {
    fn from(value: CastMemberEntity) -> Self {
        Self {
            name: value.name,
            image: value.image,
        }
    }
}

impl From<CastMember> for CastMemberEntity {
    fn from(value: CastMember) -> Self {
        Self {
            name: value.name,
            image: value.image,
        }
    }
}

impl From<PuzzleEntity> for Puzzle {
    fn from(value: PuzzleEntity) -> Self {
        Self {
            id: value.id,
            title: value.title,
            poster: value.poster,
            cast: value.cast.into_iter().map(Into::into).collect(),
            director: value.director,
            release_year: value.release_year,
            box_office: value.box_office,
            production_company: value.production_company,
            genres: value.genres,
        }
    }
}

impl From<Puzzle> for PuzzleEntity {
    fn from(value: Puzzle) -> Self {
        Self {
            id: value.id,
            title: value.title,
            poster: value.poster,
            cast: value.cast.into_iter().map(Into::into).collect(),
            director: value.director,
            release_year: value.release_year,
            box_office: value.box_office,
            production_company: value.production_company,
            genres: value.genres,
        }
    }
}

/// Built-in catalog used when the remote source is unreachable or empty.
pub fn fallback_catalog() -> Catalog {
    Catalog::new(vec![
        Puzzle {
            id: "2026-01-25".into(),
            title: "Oppenheimer".into(),
            poster: "https://image.tmdb.org/t/p/w500/8Gxv8gSFCU0XGDykEGv7zR1n2ua.jpg".into(),
            director: "Christopher Nolan".into(),
            release_year: "2023".into(),
            box_office: "$952,000,000".into(),
            production_company: "Universal Pictures".into(),
            genres: vec!["Drama".into(), "History".into()],
            cast: vec![
                CastMember {
                    name: "Cillian Murphy".into(),
                    image: "https://image.tmdb.org/t/p/w200/3W1W9XJ3n9X0n5n5.jpg".into(),
                },
                CastMember {
                    name: "Emily Blunt".into(),
                    image: "https://image.tmdb.org/t/p/w200/n5.jpg".into(),
                },
                CastMember {
                    name: "Matt Damon".into(),
                    image: "https://image.tmdb.org/t/p/w200/el.jpg".into(),
                },
                CastMember {
                    name: "Robert Downey Jr.".into(),
                    image: "https://image.tmdb.org/t/p/w200/im.jpg".into(),
                },
            ],
        },
        Puzzle {
            id: "2026-01-24".into(),
            title: "Dune".into(),
            poster: "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".into(),
            director: "Denis Villeneuve".into(),
            release_year: "2021".into(),
            box_office: "$402,027,830".into(),
            production_company: "Legendary Pictures".into(),
            genres: vec!["Science Fiction".into(), "Adventure".into()],
            cast: vec![
                CastMember {
                    name: "Timothée Chalamet".into(),
                    image: "https://image.tmdb.org/t/p/w200/tc.jpg".into(),
                },
                CastMember {
                    name: "Rebecca Ferguson".into(),
                    image: "https://image.tmdb.org/t/p/w200/rf.jpg".into(),
                },
                CastMember {
                    name: "Oscar Isaac".into(),
                    image: "https://image.tmdb.org/t/p/w200/oi.jpg".into(),
                },
                CastMember {
                    name: "Josh Brolin".into(),
                    image: "https://image.tmdb.org/t/p/w200/jb.jpg".into(),
                },
            ],
        },
        Puzzle {
            id: "2026-01-09".into(),
            title: "Inception".into(),
            poster: "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKqWDUXfF89WnUSKTb.jpg".into(),
            director: "Christopher Nolan".into(),
            release_year: "2010".into(),
            box_office: "$836,836,967".into(),
            production_company: "Warner Bros. Pictures".into(),
            genres: vec![
                "Action".into(),
                "Science Fiction".into(),
                "Adventure".into(),
            ],
            cast: vec![
                CastMember {
                    name: "Leonardo DiCaprio".into(),
                    image: "https://image.tmdb.org/t/p/w200/wo2hJpn04vbtmh0B9utCFdsQhxM.jpg".into(),
                },
                CastMember {
                    name: "Joseph Gordon-Levitt".into(),
                    image: "https://image.tmdb.org/t/p/w200/4X1X1tV8k3E2H7e6r0O9w1W4.jpg".into(),
                },
                CastMember {
                    name: "Elliot Page".into(),
                    image: "https://image.tmdb.org/t/p/w200/tp5PF4kE7yq7q5q5.jpg".into(),
                },
                CastMember {
                    name: "Tom Hardy".into(),
                    image: "https://image.tmdb.org/t/p/w200/d81K0RH8UX7tZj49tZaQhZ9ewH.jpg".into(),
                },
            ],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_puzzle(id: &str, cast: usize) -> Puzzle {
        Puzzle {
            id: id.into(),
            title: format!("Movie {id}"),
            poster: String::new(),
            cast: (0..cast)
                .map(|i| CastMember {
                    name: format!("Actor {i}"),
                    image: String::new(),
                })
                .collect(),
            director: String::new(),
            release_year: String::new(),
            box_office: String::new(),
            production_company: String::new(),
            genres: Vec::new(),
        }
    }

    #[test]
    fn catalog_sorts_newest_first() {
        let catalog = Catalog::new(vec![
            bare_puzzle("2026-01-01", 4),
            bare_puzzle("2026-01-03", 4),
            bare_puzzle("2026-01-02", 4),
        ]);

        let ids: Vec<&str> = catalog.puzzles().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2026-01-03", "2026-01-02", "2026-01-01"]);
        assert_eq!(catalog.newest().unwrap().id, "2026-01-03");
    }

    #[test]
    fn catalog_drops_duplicate_ids_and_short_casts() {
        let catalog = Catalog::new(vec![
            bare_puzzle("2026-01-02", 4),
            bare_puzzle("2026-01-02", 4),
            bare_puzzle("2026-01-01", 3),
        ]);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("2026-01-01").is_none());
    }

    #[test]
    fn fallback_catalog_is_playable() {
        let catalog = fallback_catalog();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.newest().unwrap().title, "Oppenheimer");
        for puzzle in catalog.puzzles() {
            assert!(puzzle.cast.len() >= MIN_CAST);
        }
    }
}

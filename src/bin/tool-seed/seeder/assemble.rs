//! Pure assembly steps of the seeding pipeline: record building, revenue
//! formatting, and the sequential date assignment.

use anyhow::Context;
use time::Date;

use daily_reel_back::dao::models::{CastMemberEntity, PuzzleEntity};

use super::tmdb::{Credits, Details, DiscoverMovie};

/// Cast entries kept per puzzle; fewer photographed entries disqualify the
/// movie at seed time, never at runtime.
pub const REQUIRED_CAST: usize = 4;
/// Genres kept per puzzle.
const MAX_GENRES: usize = 3;

const PROFILE_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w200";
const POSTER_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

/// A fully assembled puzzle record still waiting for its calendar date.
#[derive(Debug, Clone)]
pub struct SeedPuzzle {
    /// Canonical answer title.
    pub title: String,
    /// Poster URL.
    pub poster: String,
    /// Exactly [`REQUIRED_CAST`] photographed cast members.
    pub cast: Vec<CastMemberEntity>,
    /// Director name or `Unknown`.
    pub director: String,
    /// Release year or `N/A`.
    pub release_year: String,
    /// Formatted revenue or `N/A`.
    pub box_office: String,
    /// Lead production company or `N/A`.
    pub production_company: String,
    /// Up to [`MAX_GENRES`] genre names.
    pub genres: Vec<String>,
}

/// Assemble a puzzle from one discovery entry and its credits/details.
/// Returns `None` when fewer than [`REQUIRED_CAST`] cast members have a
/// profile photo.
pub fn build_puzzle(
    movie: &DiscoverMovie,
    credits: &Credits,
    details: &Details,
) -> Option<SeedPuzzle> {
    let cast: Vec<CastMemberEntity> = credits
        .cast
        .iter()
        .filter_map(|member| {
            member.profile_path.as_ref().map(|path| CastMemberEntity {
                name: member.name.clone(),
                image: format!("{PROFILE_IMAGE_BASE}{path}"),
            })
        })
        .take(REQUIRED_CAST)
        .collect();

    if cast.len() < REQUIRED_CAST {
        return None;
    }

    let director = credits
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone())
        .unwrap_or_else(|| "Unknown".to_owned());

    let poster = movie
        .poster_path
        .as_ref()
        .map(|path| format!("{POSTER_IMAGE_BASE}{path}"))
        .unwrap_or_default();

    let genres = details
        .genres
        .iter()
        .take(MAX_GENRES)
        .map(|genre| genre.name.clone())
        .collect();

    let production_company = details
        .production_companies
        .first()
        .map(|company| company.name.clone())
        .unwrap_or_else(|| "N/A".to_owned());

    Some(SeedPuzzle {
        title: movie.title.clone(),
        poster,
        cast,
        director,
        release_year: release_year(movie.release_date.as_deref()),
        box_office: format_revenue(details.revenue),
        production_company,
        genres,
    })
}

/// Assign one sequential calendar date per puzzle starting at `start`,
/// producing the storable entities keyed by their date ids.
pub fn assign_dates(puzzles: Vec<SeedPuzzle>, start: Date) -> anyhow::Result<Vec<PuzzleEntity>> {
    let mut date = start;
    let mut entities = Vec::with_capacity(puzzles.len());

    for puzzle in puzzles {
        let id = format_date_id(date);
        entities.push(PuzzleEntity {
            id,
            title: puzzle.title,
            poster: puzzle.poster,
            cast: puzzle.cast,
            director: puzzle.director,
            release_year: puzzle.release_year,
            box_office: puzzle.box_office,
            production_company: puzzle.production_company,
            genres: puzzle.genres,
        });
        date = date.next_day().context("calendar date overflow")?;
    }

    Ok(entities)
}

/// Format a date as a `YYYY-MM-DD` puzzle id.
pub fn format_date_id(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Year component of a `YYYY-MM-DD` release date, or `N/A`.
fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(|date| date.split('-').next())
        .filter(|year| !year.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| "N/A".to_owned())
}

/// Dollar amount with thousands separators, or `N/A` for unknown revenue.
fn format_revenue(revenue: u64) -> String {
    if revenue == 0 {
        return "N/A".to_owned();
    }

    let digits = revenue.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeder::tmdb::{CastCredit, Company, CrewCredit, Genre};
    use time::macros::date;

    fn movie() -> DiscoverMovie {
        DiscoverMovie {
            id: 438631,
            title: "Dune".into(),
            poster_path: Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".into()),
            release_date: Some("2021-09-15".into()),
        }
    }

    fn credits(photographed: usize, bare: usize) -> Credits {
        let mut cast = Vec::new();
        for i in 0..photographed {
            cast.push(CastCredit {
                name: format!("Actor {i}"),
                profile_path: Some(format!("/actor{i}.jpg")),
            });
        }
        for i in 0..bare {
            cast.push(CastCredit {
                name: format!("Unphotographed {i}"),
                profile_path: None,
            });
        }
        Credits {
            cast,
            crew: vec![
                CrewCredit {
                    name: "Mary Parent".into(),
                    job: "Producer".into(),
                },
                CrewCredit {
                    name: "Denis Villeneuve".into(),
                    job: "Director".into(),
                },
            ],
        }
    }

    fn details() -> Details {
        Details {
            revenue: 402_027_830,
            genres: ["Science Fiction", "Adventure", "Drama", "Action"]
                .into_iter()
                .map(|name| Genre { name: name.into() })
                .collect(),
            production_companies: vec![Company {
                name: "Legendary Pictures".into(),
            }],
        }
    }

    #[test]
    fn builds_a_complete_record() {
        let puzzle = build_puzzle(&movie(), &credits(5, 0), &details()).unwrap();

        assert_eq!(puzzle.title, "Dune");
        assert_eq!(puzzle.cast.len(), REQUIRED_CAST);
        assert_eq!(
            puzzle.cast[0].image,
            "https://image.tmdb.org/t/p/w200/actor0.jpg"
        );
        assert_eq!(puzzle.director, "Denis Villeneuve");
        assert_eq!(puzzle.release_year, "2021");
        assert_eq!(puzzle.box_office, "$402,027,830");
        assert_eq!(puzzle.production_company, "Legendary Pictures");
        assert_eq!(puzzle.genres.len(), 3); // capped
        assert_eq!(
            puzzle.poster,
            "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        );
    }

    #[test]
    fn skips_movies_without_enough_photographed_cast() {
        // Three photographed entries plus an unphotographed one: the photo
        // filter runs before the cut, so the movie is disqualified.
        assert!(build_puzzle(&movie(), &credits(3, 5), &details()).is_none());
        assert!(build_puzzle(&movie(), &credits(4, 0), &details()).is_some());
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let bare_movie = DiscoverMovie {
            id: 1,
            title: "Obscure".into(),
            poster_path: None,
            release_date: None,
        };
        let mut bare_credits = credits(4, 0);
        bare_credits.crew.clear();
        let bare_details = Details {
            revenue: 0,
            genres: Vec::new(),
            production_companies: Vec::new(),
        };

        let puzzle = build_puzzle(&bare_movie, &bare_credits, &bare_details).unwrap();
        assert_eq!(puzzle.director, "Unknown");
        assert_eq!(puzzle.release_year, "N/A");
        assert_eq!(puzzle.box_office, "N/A");
        assert_eq!(puzzle.production_company, "N/A");
        assert!(puzzle.genres.is_empty());
    }

    #[test]
    fn revenue_formatting_groups_thousands() {
        assert_eq!(format_revenue(0), "N/A");
        assert_eq!(format_revenue(999), "$999");
        assert_eq!(format_revenue(1_000), "$1,000");
        assert_eq!(format_revenue(952_000_000), "$952,000,000");
    }

    #[test]
    fn dates_are_assigned_sequentially_from_the_start_date() {
        let seeds = vec![
            build_puzzle(&movie(), &credits(4, 0), &details()).unwrap(),
            build_puzzle(&movie(), &credits(4, 0), &details()).unwrap(),
            build_puzzle(&movie(), &credits(4, 0), &details()).unwrap(),
        ];

        let entities = assign_dates(seeds, date!(2026 - 01 - 30)).unwrap();
        let ids: Vec<&str> = entities.iter().map(|entity| entity.id.as_str()).collect();
        assert_eq!(ids, ["2026-01-30", "2026-01-31", "2026-02-01"]);
    }
}

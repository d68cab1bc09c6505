use super::context::App;
use super::spinner::with_spinner;
use crate::format;
use crate::output::Output;
use clap::ValueEnum;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_models::{MovieId, MovieSummary, Page};
use movieflix_sources::{resolve_trailer, MovieCatalog, TrailerSource};
use owo_colors::OwoColorize;
use serde_json::json;
use std::collections::HashSet;

/// Curated lists on the catalog's front page
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Trending,
    Popular,
    TopRated,
    Upcoming,
}

impl ListKind {
    fn title(self) -> &'static str {
        match self {
            ListKind::Trending => "Trending This Week",
            ListKind::Popular => "Popular",
            ListKind::TopRated => "Top Rated",
            ListKind::Upcoming => "Upcoming",
        }
    }
}

const OVERVIEW_WIDTH: usize = 60;
const TOP_CAST: usize = 10;
const RECOMMENDATIONS_SHOWN: usize = 6;

pub async fn run_browse(app: &mut App, kind: ListKind, page: u32, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let movies = with_spinner(output, &format!("Loading {}...", kind.title()), async {
        match kind {
            ListKind::Trending => catalog.trending(page).await,
            ListKind::Popular => catalog.popular(page).await,
            ListKind::TopRated => catalog.top_rated(page).await,
            ListKind::Upcoming => catalog.upcoming(page).await,
        }
    })
    .await
    .wrap_err_with(|| format!("Failed to load {} movies", kind.title()))?;

    let in_watchlist = app.watchlist_ids();
    print_page(kind.title(), &movies, &in_watchlist, output);
    Ok(())
}

pub async fn run_search(app: &mut App, query: &str, page: u32, output: &Output) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Err(eyre!("Search query cannot be empty"));
    }

    let catalog = app.catalog()?;
    let movies = with_spinner(output, "Searching...", catalog.search(query, page))
        .await
        .wrap_err_with(|| format!("Search for '{}' failed", query))?;

    if movies.results.is_empty() && !output.is_json() {
        output.warn(format!("No movies found for '{}'", query));
        return Ok(());
    }

    let in_watchlist = app.watchlist_ids();
    print_page(&format!("Results for '{}'", query), &movies, &in_watchlist, output);
    Ok(())
}

pub async fn run_genres(app: &App, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let genres = with_spinner(output, "Loading genres...", catalog.genres())
        .await
        .wrap_err("Failed to load genres")?;

    let mut table = output.table(&["ID", "Genre"]);
    for genre in &genres.genres {
        table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
    }
    output.heading("Genres");
    output.table_or_json(table, &genres.genres);
    Ok(())
}

pub async fn run_discover(app: &mut App, genre_id: u32, page: u32, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let movies = with_spinner(
        output,
        "Discovering movies...",
        catalog.discover_by_genre(genre_id, page),
    )
    .await
    .wrap_err_with(|| format!("Failed to load movies for genre {}", genre_id))?;

    let in_watchlist = app.watchlist_ids();
    print_page(&format!("Genre {}", genre_id), &movies, &in_watchlist, output);
    Ok(())
}

pub async fn run_show(app: &mut App, id: MovieId, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let (details, credits, recommendations) = with_spinner(output, "Loading movie...", async {
        futures::try_join!(
            catalog.movie_details(id),
            catalog.movie_credits(id),
            catalog.recommendations(id),
        )
    })
    .await
    .wrap_err_with(|| format!("Failed to load movie {}", id))?;

    let in_watchlist = app.store.watchlist().contains(id);
    let rating = app.store.ratings().get_rating(id);
    let progress = app.store.continue_watching().get(id).map(|e| e.progress);

    if output.is_json() {
        output.json(&json!({
            "movie": details,
            "poster_url": details.poster_path.as_deref().map(|p| catalog.image_url(p, None)),
            "cast": credits.top_cast(TOP_CAST),
            "directors": credits.directors(),
            "recommendations": recommendations.results,
            "in_watchlist": in_watchlist,
            "your_rating": rating.map(|r| r.get()),
            "progress": progress,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let year = details
        .release_date
        .map(|d| format!(" ({})", d.format("%Y")))
        .unwrap_or_default();
    output.heading(format!("{}{}", details.title, year));
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("{}", output.muted(tagline));
    }

    let mut table = output.table(&["Field", "Value"]);
    table.add_row(vec!["Released".to_string(), format::long_date(details.release_date)]);
    if let Some(runtime) = details.runtime.filter(|r| *r > 0) {
        table.add_row(vec!["Runtime".to_string(), format::runtime(runtime)]);
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        table.add_row(vec!["Genres".to_string(), genres.join(", ")]);
    }
    table.add_row(vec![
        "Rating".to_string(),
        format!(
            "{} {} ({} votes)",
            format::vote_stars(details.vote_average),
            format::percentage(details.vote_average),
            format::thousands(details.vote_count)
        ),
    ]);
    let directors: Vec<&str> = credits.directors().into_iter().map(|c| c.name.as_str()).collect();
    if !directors.is_empty() {
        table.add_row(vec!["Director".to_string(), directors.join(", ")]);
    }
    if let Some(status) = &details.status {
        table.add_row(vec!["Status".to_string(), status.clone()]);
    }
    if details.budget > 0 {
        table.add_row(vec!["Budget".to_string(), format::currency(details.budget)]);
    }
    if details.revenue > 0 {
        table.add_row(vec!["Revenue".to_string(), format::currency(details.revenue)]);
    }
    if let Some(poster) = &details.poster_path {
        table.add_row(vec!["Poster".to_string(), catalog.image_url(poster, None)]);
    }
    if let Some(homepage) = details.homepage.as_deref().filter(|h| !h.is_empty()) {
        table.add_row(vec!["Homepage".to_string(), homepage.to_string()]);
    }
    table.add_row(vec![
        "In watchlist".to_string(),
        if in_watchlist { "✓".green().to_string() } else { "✗".red().to_string() },
    ]);
    table.add_row(vec![
        "Your rating".to_string(),
        rating
            .map(|r| format!("{} ({})", format::stars(f64::from(r.get())), r))
            .unwrap_or_else(|| "Not rated".to_string()),
    ]);
    if let Some(progress) = progress {
        table.add_row(vec!["Progress".to_string(), format::progress(progress)]);
    }
    println!("{}", table);

    if !details.overview.is_empty() {
        output.heading("Overview");
        println!("{}", details.overview);
    }

    let cast = credits.top_cast(TOP_CAST);
    if !cast.is_empty() {
        output.heading("Cast");
        let mut cast_table = output.table(&["Name", "Character"]);
        for member in cast {
            cast_table.add_row(vec![
                member.name.clone(),
                member.character.clone().unwrap_or_default(),
            ]);
        }
        println!("{}", cast_table);
    }

    if !recommendations.results.is_empty() {
        output.heading("You might also like");
        for movie in recommendations.results.iter().take(RECOMMENDATIONS_SHOWN) {
            println!(
                "  {} {} {}",
                movie.title,
                output.muted(format!("#{}", movie.id)),
                format::vote_stars(movie.vote_average)
            );
        }
    }

    Ok(())
}

pub async fn run_trailer(app: &App, id: MovieId, output: &Output) -> Result<()> {
    let catalog = app.catalog()?;
    let search = app.trailer_search()?;

    let trailer = with_spinner(output, "Looking for a trailer...", async {
        let details = catalog.movie_details(id).await?;
        let trailer = resolve_trailer(
            &catalog,
            search.as_ref().map(|s| s as &dyn TrailerSource),
            id,
            &details.title,
        )
        .await?;
        Ok::<_, movieflix_sources::SourceError>((details.title, trailer))
    })
    .await
    .wrap_err_with(|| format!("Failed to load trailer for movie {}", id))?;

    match trailer {
        (title, Some(trailer)) => {
            if output.is_json() {
                output.json(&json!({
                    "movie_id": id,
                    "title": title,
                    "trailer": trailer,
                    "embed_url": trailer.embed_url(),
                    "watch_url": trailer.watch_url(),
                }));
            } else {
                output.success(format!(
                    "{}: {}",
                    title,
                    trailer.name.as_deref().unwrap_or("Trailer")
                ));
                output.info(format!("  Watch: {}", trailer.watch_url()));
                output.info(format!("  Embed: {}", trailer.embed_url()));
            }
        }
        (title, None) => {
            output.warn(format!("No trailer found for {}", title));
        }
    }
    Ok(())
}

/// Movie list as a table; `in_watchlist` marks saved movies
pub fn print_movies(
    title: &str,
    movies: &[MovieSummary],
    in_watchlist: &HashSet<MovieId>,
    output: &Output,
) {
    let mut table = output.table(&["ID", "Title", "Released", "Rating", "", "Overview"]);
    for movie in movies {
        let saved = if in_watchlist.contains(&movie.id) { "♥" } else { "" };
        table.add_row(vec![
            Cell::new(movie.id),
            Cell::new(&movie.title),
            Cell::new(
                movie
                    .year()
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "Soon".to_string()),
            ),
            Cell::new(format::vote_stars(movie.vote_average)),
            Cell::new(saved),
            Cell::new(format::truncate(&movie.overview, OVERVIEW_WIDTH)),
        ]);
    }
    output.heading(title);
    output.table_or_json(table, &movies);
}

fn print_page(
    title: &str,
    page: &Page<MovieSummary>,
    in_watchlist: &HashSet<MovieId>,
    output: &Output,
) {
    if output.is_json() {
        output.json(page);
        return;
    }
    print_movies(title, &page.results, in_watchlist, output);
    if page.total_pages > 1 {
        output.info(output.muted(format!(
            "Page {} of {} ({} movies). Use --page to see more.",
            page.page,
            page.total_pages,
            format::thousands(u64::from(page.total_results))
        )));
    }
}
